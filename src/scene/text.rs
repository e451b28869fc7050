use std::sync::Arc;

use glam::Vec3;

use super::{Material, MeshNode};
use crate::font::Typeface;
use crate::geometry::{extrude, ExtrudeOptions, MeshData};
use crate::glow::{GlowMaterial, GLOW_SCALE};
use crate::math::Transform;

pub const FREEDOM_TEXT: &str = "FREEDOM";
pub const WITHIN_TEXT: &str = "WITHIN";

/// Size, extrusion and color of one word
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub extrude: ExtrudeOptions,
    pub color: u32,
}

pub const FREEDOM_STYLE: TextStyle = TextStyle {
    size: 0.8,
    extrude: ExtrudeOptions {
        depth: 0.3,
        steps: 1,
        curve_segments: 12,
        bevel_enabled: true,
        bevel_thickness: 0.04,
        bevel_size: 0.03,
        bevel_offset: 0.0,
        bevel_segments: 5,
    },
    color: 0x0000ff,
};

pub const WITHIN_STYLE: TextStyle = TextStyle {
    size: 0.5,
    extrude: ExtrudeOptions {
        depth: 0.2,
        steps: 1,
        curve_segments: 12,
        bevel_enabled: true,
        bevel_thickness: 0.02,
        bevel_size: 0.01,
        bevel_offset: 0.0,
        bevel_segments: 5,
    },
    color: 0xff0000,
};

/// Extruded, bounding-box-centered geometry for `text`
pub fn build_text_geometry(typeface: &Typeface, text: &str, style: &TextStyle) -> MeshData {
    let shapes = typeface.generate_shapes(text, style.size);
    let mut mesh = extrude(&shapes, &style.extrude);
    mesh.center();
    log::debug!(
        "Built {:?}: {} shapes, {} triangles",
        text,
        shapes.len(),
        mesh.triangle_count()
    );
    mesh
}

/// The static word, the orbiting word and its glow shell
#[derive(Debug, Clone)]
pub struct TextNodes {
    pub freedom: MeshNode,
    pub within: MeshNode,
    pub glow: MeshNode,
}

impl TextNodes {
    pub fn build(typeface: &Typeface) -> Self {
        let freedom = MeshNode {
            geometry: Arc::new(build_text_geometry(typeface, FREEDOM_TEXT, &FREEDOM_STYLE)),
            material: Material::phong(FREEDOM_STYLE.color),
            transform: Transform::from_position(Vec3::ZERO),
        };

        let within_geometry = Arc::new(build_text_geometry(typeface, WITHIN_TEXT, &WITHIN_STYLE));
        let within = MeshNode {
            geometry: Arc::clone(&within_geometry),
            material: Material::phong(WITHIN_STYLE.color),
            transform: Transform::IDENTITY,
        };
        let glow = MeshNode {
            geometry: within_geometry,
            material: Material::Glow(GlowMaterial::default()),
            transform: Transform::IDENTITY.with_scale(GLOW_SCALE),
        };

        Self {
            freedom,
            within,
            glow,
        }
    }

    /// Move the orbiting word and its glow to `position`, both facing the origin
    pub fn place_orbiter(&mut self, position: Vec3) {
        self.within.transform.position = position;
        self.within.transform.look_at(Vec3::ZERO);

        self.glow.transform.position = self.within.transform.position;
        self.glow.transform.rotation = self.within.transform.rotation;
    }
}
