#![allow(dead_code)]

use freedom_within::camera::PerspectiveCamera;
use freedom_within::font::Typeface;
use freedom_within::particles::{ParticleField, PARTICLE_SPREAD};
use freedom_within::SceneState;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Block letters in font units. Outer contours run clockwise, holes
/// counter-clockwise. Letters without a glyph fall back to `?`.
pub const BLOCK_FONT: &str = r#"{
    "familyName": "Block",
    "resolution": 1000,
    "boundingBox": { "yMin": -200, "yMax": 800 },
    "underlineThickness": 50,
    "glyphs": {
        "?": { "ha": 700, "x_min": 0, "x_max": 600, "o": "m 0 0 l 0 700 l 600 700 l 600 0 z" },
        "I": { "ha": 300, "x_min": 0, "x_max": 200, "o": "m 0 0 l 0 700 l 200 700 l 200 0 z" },
        "O": { "ha": 700, "x_min": 0, "x_max": 600, "o": "m 0 0 l 0 700 l 600 700 l 600 0 z m 150 150 l 450 150 l 450 550 l 150 550 z" },
        " ": { "ha": 300 }
    }
}"#;

pub fn block_font() -> Typeface {
    Typeface::from_json_str(BLOCK_FONT).expect("fixture font parses")
}

pub fn scene_with_particles(count: usize) -> SceneState {
    let particles = ParticleField::generate(count, PARTICLE_SPREAD, &mut StdRng::seed_from_u64(42));
    SceneState::new(PerspectiveCamera::for_viewport(800, 600), particles)
}
