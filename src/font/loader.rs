use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use futures::channel::oneshot;

use super::Typeface;

pub const DEFAULT_FONT_URL: &str =
    "https://threejs.org/examples/fonts/helvetiker_regular.typeface.json";

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Where the typeface JSON comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontSource {
    Url(String),
    File(PathBuf),
}

impl FontSource {
    /// `http://` and `https://` locations are fetched, anything else is a path
    pub fn parse(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            FontSource::Url(location.to_string())
        } else {
            FontSource::File(PathBuf::from(location))
        }
    }

    /// Blocking fetch and parse
    pub fn fetch(&self) -> Result<Typeface> {
        let bytes = match self {
            FontSource::Url(url) => {
                let client = reqwest::blocking::Client::builder()
                    .timeout(FETCH_TIMEOUT)
                    .build()
                    .context("Failed to build HTTP client")?;
                client
                    .get(url)
                    .send()
                    .and_then(|response| response.error_for_status())
                    .with_context(|| format!("Failed to download font from {}", url))?
                    .bytes()
                    .with_context(|| format!("Failed to read font body from {}", url))?
                    .to_vec()
            }
            FontSource::File(path) => std::fs::read(path)
                .with_context(|| format!("Failed to read font file {}", path.display()))?,
        };
        Typeface::from_slice(&bytes).with_context(|| format!("Invalid typeface at {}", self))
    }
}

impl Default for FontSource {
    fn default() -> Self {
        FontSource::Url(DEFAULT_FONT_URL.to_string())
    }
}

impl fmt::Display for FontSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontSource::Url(url) => write!(f, "{}", url),
            FontSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Fetches a typeface on a worker thread; the frame loop polls for it.
///
/// The worker sends at most one typeface. On failure it logs a warning and
/// drops the sender, after which the loader is no longer pending.
pub struct FontLoader {
    receiver: Option<oneshot::Receiver<Typeface>>,
}

impl FontLoader {
    pub fn spawn(source: FontSource) -> Result<Self> {
        let (sender, receiver) = oneshot::channel();
        log::info!("Loading font from {}", source);

        std::thread::Builder::new()
            .name("font-loader".into())
            .spawn(move || match source.fetch() {
                Ok(typeface) => {
                    log::info!(
                        "Loaded font {:?} with {} glyphs at {} units per em",
                        typeface.family_name(),
                        typeface.glyph_count(),
                        typeface.resolution()
                    );
                    // The receiver is gone when the app already exited
                    let _ = sender.send(typeface);
                }
                Err(e) => log::warn!("Font unavailable, text will not be shown: {:#}", e),
            })
            .context("Failed to spawn font loader thread")?;

        Ok(Self {
            receiver: Some(receiver),
        })
    }

    /// Loader that yields `typeface` on the first poll
    pub fn ready(typeface: Typeface) -> Self {
        let (sender, receiver) = oneshot::channel();
        let _ = sender.send(typeface);
        Self {
            receiver: Some(receiver),
        }
    }

    /// Loader that never yields
    pub fn inert() -> Self {
        Self { receiver: None }
    }

    pub fn is_pending(&self) -> bool {
        self.receiver.is_some()
    }

    /// Non-blocking check for the typeface; yields it at most once
    pub fn poll(&mut self) -> Option<Typeface> {
        let receiver = self.receiver.as_mut()?;
        match receiver.try_recv() {
            Ok(Some(typeface)) => {
                self.receiver = None;
                Some(typeface)
            }
            Ok(None) => None,
            Err(oneshot::Canceled) => {
                self.receiver = None;
                None
            }
        }
    }
}
