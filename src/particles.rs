use glam::{Mat4, Vec3};
use rand::Rng;

pub const PARTICLE_COUNT: usize = 5000;
/// Edge length of the cube the particles fill, centered on the origin
pub const PARTICLE_SPREAD: f32 = 20.0;
pub const PARTICLE_SIZE: f32 = 0.005;
pub const PARTICLE_COLOR: u32 = 0xffffff;
pub const PARTICLE_OPACITY: f32 = 0.5;

/// Point cloud spinning about the world Y axis
#[derive(Debug, Clone)]
pub struct ParticleField {
    pub positions: Vec<Vec3>,
    pub color: u32,
    pub opacity: f32,
    pub size: f32,
    /// Radians about Y; f64 keeps 0.001 steps exact at large angles
    spin: f64,
}

impl ParticleField {
    /// `count` points uniformly distributed in a cube of edge `spread`
    pub fn generate<R: Rng>(count: usize, spread: f32, rng: &mut R) -> Self {
        let mut coord = || (rng.gen::<f32>() - 0.5) * spread;
        let positions = (0..count)
            .map(|_| Vec3::new(coord(), coord(), coord()))
            .collect();

        Self {
            positions,
            color: PARTICLE_COLOR,
            opacity: PARTICLE_OPACITY,
            size: PARTICLE_SIZE,
            spin: 0.0,
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Rotation about Y in radians
    pub fn spin_angle(&self) -> f64 {
        self.spin
    }

    pub fn spin(&mut self, delta: f64) {
        self.spin += delta;
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_y((self.spin % std::f64::consts::TAU) as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generate_count_and_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let field = ParticleField::generate(PARTICLE_COUNT, PARTICLE_SPREAD, &mut rng);

        assert_eq!(field.len(), 5000);
        let half = PARTICLE_SPREAD / 2.0;
        for p in &field.positions {
            assert!(p.abs().max_element() <= half, "{:?} out of range", p);
        }
    }

    #[test]
    fn test_generate_is_deterministic_for_a_seed() {
        let a = ParticleField::generate(100, 20.0, &mut StdRng::seed_from_u64(42));
        let b = ParticleField::generate(100, 20.0, &mut StdRng::seed_from_u64(42));
        assert_eq!(a.positions, b.positions);
    }

    #[test]
    fn test_generate_fills_the_cube() {
        let field = ParticleField::generate(5000, 20.0, &mut StdRng::seed_from_u64(1));
        let min = field.positions.iter().fold(Vec3::splat(f32::MAX), |m, p| m.min(*p));
        let max = field.positions.iter().fold(Vec3::splat(f32::MIN), |m, p| m.max(*p));
        assert!(min.max_element() < -9.0);
        assert!(max.min_element() > 9.0);
    }

    #[test]
    fn test_spin_accumulates() {
        let mut field = ParticleField::generate(0, 20.0, &mut StdRng::seed_from_u64(0));
        assert!(field.is_empty());
        field.spin(0.25);
        field.spin(0.25);
        assert_eq!(field.spin_angle(), 0.5);

        let rotated = field.model_matrix().transform_point3(Vec3::X);
        assert!((rotated - Vec3::new(0.5f32.cos(), 0.0, -0.5f32.sin())).length() < 1e-6);
    }

    #[test]
    fn test_spin_step_survives_large_angles() {
        let mut field = ParticleField::generate(0, 20.0, &mut StdRng::seed_from_u64(0));
        for start in [100.0, 32768.0, 1.0e7] {
            field.spin(start - field.spin_angle());
            let before = field.spin_angle();
            field.spin(0.001);
            let step = field.spin_angle() - before;
            assert!((step - 0.001).abs() < 1e-8, "step {} at {}", step, start);
        }
    }

    #[test]
    fn test_model_matrix_after_full_turns() {
        let mut field = ParticleField::generate(0, 20.0, &mut StdRng::seed_from_u64(0));
        field.spin(std::f64::consts::TAU * 5000.0 + 0.5);
        let rotated = field.model_matrix().transform_point3(Vec3::X);
        assert!((rotated - Vec3::new(0.5f32.cos(), 0.0, -0.5f32.sin())).length() < 1e-4);
    }

    #[test]
    fn test_material_defaults() {
        let field = ParticleField::generate(1, 20.0, &mut StdRng::seed_from_u64(0));
        assert_eq!(field.color, 0xffffff);
        assert_eq!(field.opacity, 0.5);
        assert_eq!(field.size, 0.005);
    }
}
