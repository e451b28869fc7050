use glam::Vec3;

pub const GLOW_COLOR: u32 = 0xff0000;
pub const GLOW_OPACITY: f32 = 0.3;
/// Uniform scale of the glow shell relative to the mesh it surrounds
pub const GLOW_SCALE: f32 = 1.1;

/// Additive rim glow: strongest where the surface turns away from the viewer.
///
/// `glow.wgsl` evaluates the same formula per fragment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlowMaterial {
    pub color: u32,
    pub opacity: f32,
    pub bias: f32,
    pub power: f32,
}

impl Default for GlowMaterial {
    fn default() -> Self {
        Self {
            color: GLOW_COLOR,
            opacity: GLOW_OPACITY,
            bias: 0.7,
            power: 4.0,
        }
    }
}

impl GlowMaterial {
    /// `(bias - n·z)^power` for a view-space normal.
    ///
    /// The base goes negative for normals facing the viewer; its magnitude
    /// is used.
    pub fn intensity(&self, view_normal: Vec3) -> f32 {
        (self.bias - view_normal.dot(Vec3::Z)).abs().powf(self.power)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facing_viewer() {
        let glow = GlowMaterial::default();
        let expected = (-0.3f32).powi(4);
        assert!((glow.intensity(Vec3::Z) - expected).abs() < 1e-7);
    }

    #[test]
    fn test_edge_on() {
        let glow = GlowMaterial::default();
        let expected = 0.7f32.powi(4);
        assert!((glow.intensity(Vec3::X) - expected).abs() < 1e-6);
        assert!((glow.intensity(Vec3::Y) - expected).abs() < 1e-6);
    }

    #[test]
    fn test_facing_away_is_brightest() {
        let glow = GlowMaterial::default();
        assert!(glow.intensity(-Vec3::Z) > glow.intensity(Vec3::X));
        assert!(glow.intensity(Vec3::X) > glow.intensity(Vec3::Z));
    }
}
