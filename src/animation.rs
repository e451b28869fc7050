use glam::Vec3;

use crate::scene::SceneState;

pub const ORBIT_RADIUS: f64 = 3.5;
/// Particle rotation per tick in radians, independent of frame time
pub const PARTICLE_SPIN_STEP: f64 = 0.001;

/// Point on the orbit of the moving word at time `t` seconds.
///
/// A circle in the XY plane with a slower, half-amplitude wobble along Z.
pub fn orbit_position(t: f64) -> Vec3 {
    let r = ORBIT_RADIUS;
    Vec3::new(
        (t.cos() * r) as f32,
        (t.sin() * r) as f32,
        ((t * 0.5).sin() * r * 0.5) as f32,
    )
}

/// Advance the scene by one frame at wall-clock time `t` seconds.
///
/// Moves the orbiting word and its glow together when the text is loaded,
/// and always turns the particle field by one spin step.
pub fn tick(state: &mut SceneState, t: f64) {
    if let Some(text) = state.text.as_mut() {
        text.place_orbiter(orbit_position(t));
    }
    state.particles.spin(PARTICLE_SPIN_STEP);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orbit_at_zero() {
        assert_eq!(orbit_position(0.0), Vec3::new(3.5, 0.0, 0.0));
    }

    #[test]
    fn test_orbit_at_half_turn() {
        let p = orbit_position(std::f64::consts::PI);
        assert!((p - Vec3::new(-3.5, 0.0, 1.75)).length() < 1e-5);
    }

    #[test]
    fn test_orbit_formula_over_many_times() {
        for i in 0..1000 {
            let t = i as f64 * 0.37 - 50.0;
            let p = orbit_position(t);
            assert_eq!(p.x, (3.5 * t.cos()) as f32);
            assert_eq!(p.y, (3.5 * t.sin()) as f32);
            assert_eq!(p.z, (1.75 * (0.5 * t).sin()) as f32);
        }
    }

    #[test]
    fn test_orbit_stays_near_radius_in_xy() {
        let p = orbit_position(12.3);
        assert!((p.truncate().length() - 3.5).abs() < 1e-5);
    }
}
