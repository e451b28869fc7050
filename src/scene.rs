//! Everything that is drawn, and the state the animation mutates

pub mod lighting;
pub mod text;

use std::sync::Arc;

use crate::camera::PerspectiveCamera;
use crate::font::Typeface;
use crate::geometry::MeshData;
use crate::glow::GlowMaterial;
use crate::math::Transform;
use crate::particles::ParticleField;

pub use lighting::{AmbientLight, Lighting, PointLight};
pub use text::{TextNodes, TextStyle, FREEDOM_STYLE, WITHIN_STYLE};

pub const PHONG_SHININESS: f32 = 30.0;
pub const PHONG_SPECULAR: u32 = 0x111111;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    Phong { color: u32, specular: u32, shininess: f32 },
    Glow(GlowMaterial),
}

impl Material {
    pub fn phong(color: u32) -> Self {
        Material::Phong {
            color,
            specular: PHONG_SPECULAR,
            shininess: PHONG_SHININESS,
        }
    }
}

/// Triangle mesh placed in the scene; geometry may be shared between nodes
#[derive(Debug, Clone)]
pub struct MeshNode {
    pub geometry: Arc<MeshData>,
    pub material: Material,
    pub transform: Transform,
}

/// The whole scene. Text stays `None` until the font arrives.
#[derive(Debug, Clone)]
pub struct SceneState {
    pub camera: PerspectiveCamera,
    pub particles: ParticleField,
    pub lighting: Lighting,
    pub text: Option<TextNodes>,
}

impl SceneState {
    pub fn new(camera: PerspectiveCamera, particles: ParticleField) -> Self {
        Self {
            camera,
            particles,
            lighting: Lighting::default(),
            text: None,
        }
    }

    /// Build and insert the text meshes. Only the first call has an effect.
    pub fn attach_text(&mut self, typeface: &Typeface) -> bool {
        if self.text.is_some() {
            return false;
        }
        self.text = Some(TextNodes::build(typeface));
        true
    }

    pub fn has_text(&self) -> bool {
        self.text.is_some()
    }

    /// Meshes in draw order: opaque words first, then the glow shell
    pub fn mesh_nodes(&self) -> impl Iterator<Item = &MeshNode> {
        self.text
            .iter()
            .flat_map(|text| [&text.freedom, &text.within, &text.glow])
    }
}
