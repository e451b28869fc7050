use std::collections::HashMap;

use anyhow::{bail, Context, Result};
use glam::Vec2;
use serde::Deserialize;

use super::outline::shapes_from_paths;
use crate::geometry::{Path2, Shape};

/// Glyph substituted for characters the typeface does not cover
pub const FALLBACK_GLYPH: char = '?';

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TypefaceData {
    glyphs: HashMap<String, GlyphData>,
    #[serde(default)]
    family_name: String,
    resolution: f32,
    bounding_box: BoundingBox,
    #[serde(default)]
    underline_thickness: f32,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BoundingBox {
    y_min: f32,
    y_max: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GlyphData {
    /// Horizontal advance in font units
    pub ha: f32,
    /// Outline commands, e.g. `"m 0 0 l 10 0 q 20 10 15 5"`
    #[serde(default)]
    pub o: Option<String>,
    #[serde(default)]
    pub x_min: f32,
    #[serde(default)]
    pub x_max: f32,
}

/// Font in the typeface JSON format with outlines in font units
#[derive(Debug, Clone)]
pub struct Typeface {
    family_name: String,
    resolution: f32,
    line_extent: f32,
    glyphs: HashMap<char, GlyphData>,
}

impl Typeface {
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let data: TypefaceData =
            serde_json::from_slice(bytes).context("Failed to parse typeface JSON")?;
        Self::from_data(data)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let data: TypefaceData =
            serde_json::from_str(json).context("Failed to parse typeface JSON")?;
        Self::from_data(data)
    }

    fn from_data(data: TypefaceData) -> Result<Self> {
        if !(data.resolution > 0.0) {
            bail!("Typeface resolution must be positive, got {}", data.resolution);
        }

        let glyphs = data
            .glyphs
            .into_iter()
            .filter_map(|(key, glyph)| {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some((c, glyph)),
                    _ => None,
                }
            })
            .collect();

        Ok(Self {
            family_name: data.family_name,
            resolution: data.resolution,
            line_extent: data.bounding_box.y_max - data.bounding_box.y_min
                + data.underline_thickness,
            glyphs,
        })
    }

    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    pub fn resolution(&self) -> f32 {
        self.resolution
    }

    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    pub fn glyph(&self, c: char) -> Option<&GlyphData> {
        self.glyphs.get(&c)
    }

    /// Distance between baselines at the given text size
    pub fn line_height(&self, size: f32) -> f32 {
        self.line_extent * size / self.resolution
    }

    /// Lay out `text` and return one list of outline paths per glyph.
    ///
    /// `\n` starts a new line below the previous one.
    pub fn glyph_paths(&self, text: &str, size: f32) -> Vec<Vec<Path2>> {
        let scale = size / self.resolution;
        let line_height = self.line_height(size);
        let mut offset = Vec2::ZERO;
        let mut glyphs = Vec::new();

        for c in text.chars() {
            if c == '\n' {
                offset.x = 0.0;
                offset.y -= line_height;
                continue;
            }

            let Some(glyph) = self.glyph(c).or_else(|| self.glyph(FALLBACK_GLYPH)) else {
                log::warn!(
                    "Character {:?} is missing from typeface {:?} and has no fallback",
                    c,
                    self.family_name
                );
                continue;
            };

            if let Some(outline) = &glyph.o {
                match parse_outline(outline, scale, offset) {
                    Ok(paths) => glyphs.push(paths),
                    Err(e) => log::warn!("Skipping glyph {:?}: {:#}", c, e),
                }
            }
            offset.x += glyph.ha * scale;
        }

        glyphs
    }

    /// Filled shapes for `text` at the given size, in layout order
    pub fn generate_shapes(&self, text: &str, size: f32) -> Vec<Shape> {
        self.glyph_paths(text, size)
            .into_iter()
            .flat_map(shapes_from_paths)
            .collect()
    }
}

/// Parse glyph outline commands into closed paths.
///
/// `q` and `b` list the end point before their control points.
/// Unknown command tokens are ignored.
pub fn parse_outline(outline: &str, scale: f32, offset: Vec2) -> Result<Vec<Path2>> {
    let mut tokens = outline.split_whitespace();
    let mut paths: Vec<Path2> = Vec::new();

    let point = |tokens: &mut std::str::SplitWhitespace<'_>| -> Result<Vec2> {
        let mut coord = || -> Result<f32> {
            let token = tokens.next().context("Outline ends in the middle of a command")?;
            token
                .parse::<f32>()
                .with_context(|| format!("Invalid outline coordinate {:?}", token))
        };
        let x = coord()?;
        let y = coord()?;
        Ok(Vec2::new(x, y) * scale + offset)
    };

    while let Some(command) = tokens.next() {
        match command {
            "m" => {
                let start = point(&mut tokens)?;
                paths.push(Path2::new(start));
            }
            "l" => {
                let to = point(&mut tokens)?;
                current(&mut paths)?.line_to(to);
            }
            "q" => {
                let to = point(&mut tokens)?;
                let control = point(&mut tokens)?;
                current(&mut paths)?.quadratic_to(control, to);
            }
            "b" => {
                let to = point(&mut tokens)?;
                let control1 = point(&mut tokens)?;
                let control2 = point(&mut tokens)?;
                current(&mut paths)?.cubic_to(control1, control2, to);
            }
            _ => {}
        }
    }

    Ok(paths)
}

fn current(paths: &mut [Path2]) -> Result<&mut Path2> {
    paths.last_mut().context("Outline draws before its first move")
}
