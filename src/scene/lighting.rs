use glam::Vec3;

use crate::math::hex_to_linear_rgb;

pub const AMBIENT_COLOR: u32 = 0x404040;
pub const POINT_LIGHT_COLOR: u32 = 0xffffff;
pub const POINT_LIGHT_INTENSITY: f32 = 1.0;
pub const POINT_LIGHT_DISTANCE: f32 = 100.0;
pub const POINT_LIGHT_DECAY: f32 = 2.0;
pub const POINT_LIGHT_POSITION: Vec3 = Vec3::new(5.0, 5.0, 5.0);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    pub color: u32,
    pub intensity: f32,
}

impl AmbientLight {
    /// Linear RGB scaled by intensity
    pub fn radiance(&self) -> Vec3 {
        Vec3::from_array(hex_to_linear_rgb(self.color)) * self.intensity
    }
}

/// Omni light with a smooth cutoff at `distance`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub color: u32,
    pub intensity: f32,
    pub distance: f32,
    pub decay: f32,
    pub position: Vec3,
}

impl PointLight {
    pub fn radiance(&self) -> Vec3 {
        Vec3::from_array(hex_to_linear_rgb(self.color)) * self.intensity
    }

    /// Inverse-power falloff windowed to reach zero at `distance`.
    /// A zero `distance` means no cutoff.
    pub fn attenuation(&self, distance: f32) -> f32 {
        let falloff = 1.0 / distance.powf(self.decay).max(0.01);
        if self.distance > 0.0 {
            let ratio = distance / self.distance;
            let window = (1.0 - ratio.powi(4)).clamp(0.0, 1.0);
            falloff * window * window
        } else {
            falloff
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lighting {
    pub ambient: AmbientLight,
    pub point: PointLight,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            ambient: AmbientLight {
                color: AMBIENT_COLOR,
                intensity: 1.0,
            },
            point: PointLight {
                color: POINT_LIGHT_COLOR,
                intensity: POINT_LIGHT_INTENSITY,
                distance: POINT_LIGHT_DISTANCE,
                decay: POINT_LIGHT_DECAY,
                position: POINT_LIGHT_POSITION,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rig() {
        let lighting = Lighting::default();
        assert_eq!(lighting.ambient.color, 0x404040);
        assert_eq!(lighting.point.position, Vec3::new(5.0, 5.0, 5.0));
        assert_eq!(lighting.point.distance, 100.0);
        assert_eq!(lighting.point.decay, 2.0);
        assert_eq!(lighting.point.radiance(), Vec3::ONE);
    }

    #[test]
    fn test_attenuation_inverse_square_then_cutoff() {
        let light = Lighting::default().point;
        let near = light.attenuation(2.0);
        // Window is nearly 1 this close to the light
        assert!((near - 0.25).abs() < 1e-4);
        assert!(light.attenuation(4.0) < near);
        assert_eq!(light.attenuation(100.0), 0.0);
        assert_eq!(light.attenuation(150.0), 0.0);
    }

    #[test]
    fn test_attenuation_is_bounded_at_the_light() {
        let light = Lighting::default().point;
        assert_eq!(light.attenuation(0.0), 100.0);
    }
}
