// cli.rs - Command-line interface configuration
use clap::Parser;

use crate::font::{FontSource, DEFAULT_FONT_URL};
use crate::particles::PARTICLE_COUNT;

#[derive(Parser, Debug, Clone)]
#[command(name = "freedom-within")]
#[command(about = "Orbiting 3D text in a field of particles", long_about = None)]
pub struct Cli {
    /// Disable the FPS overlay
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,

    /// Typeface JSON to load, as an http(s) URL or a local path
    #[arg(long, default_value = DEFAULT_FONT_URL)]
    pub font: String,

    /// Seed for the particle layout; random when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of particles in the background field
    #[arg(long, default_value_t = PARTICLE_COUNT)]
    pub particles: usize,
}

impl Cli {
    pub fn font_source(&self) -> FontSource {
        FontSource::parse(&self.font)
    }
}
