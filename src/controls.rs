use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};

use crate::camera::PerspectiveCamera;

/// Zoom factor per wheel notch
const DOLLY_BASE: f32 = 0.95;
/// Wheel pixels that count as one notch
const PIXELS_PER_NOTCH: f32 = 100.0;
/// Keeps the polar angle off the poles, where the up vector degenerates
const POLE_EPSILON: f32 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DragState {
    None,
    Rotate,
    Pan,
    Dolly,
}

/// Mouse orbiting around a target: left drag rotates, right drag pans,
/// middle drag and the wheel dolly.
///
/// Input only accumulates deltas; `update` applies them to the camera.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub enabled: bool,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_polar_angle: f32,
    pub max_polar_angle: f32,
    viewport_height: f32,
    drag: DragState,
    cursor: Option<Vec2>,
    delta_theta: f32,
    delta_phi: f32,
    scale: f32,
    pan_pixels: Vec2,
}

impl OrbitControls {
    pub fn new(viewport_height: u32) -> Self {
        Self {
            enabled: true,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            min_polar_angle: 0.0,
            max_polar_angle: PI,
            viewport_height: viewport_height.max(1) as f32,
            drag: DragState::None,
            cursor: None,
            delta_theta: 0.0,
            delta_phi: 0.0,
            scale: 1.0,
            pan_pixels: Vec2::ZERO,
        }
    }

    pub fn set_viewport_height(&mut self, height: u32) {
        if height > 0 {
            self.viewport_height = height as f32;
        }
    }

    /// Feed a window event. Returns true when the event was used.
    pub fn handle_event(&mut self, event: &WindowEvent) -> bool {
        if !self.enabled {
            return false;
        }
        match event {
            WindowEvent::MouseInput { state, button, .. } => self.mouse_button(*button, *state),
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_moved(Vec2::new(position.x as f32, position.y as f32))
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
                self.drag = DragState::None;
                false
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let notches = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(p) => p.y as f32 / PIXELS_PER_NOTCH,
                };
                self.dolly(notches);
                true
            }
            _ => false,
        }
    }

    pub fn mouse_button(&mut self, button: MouseButton, state: ElementState) -> bool {
        match state {
            ElementState::Pressed => {
                self.drag = match button {
                    MouseButton::Left => DragState::Rotate,
                    MouseButton::Right => DragState::Pan,
                    MouseButton::Middle => DragState::Dolly,
                    _ => return false,
                };
                true
            }
            ElementState::Released => {
                let was_dragging = self.drag != DragState::None;
                self.drag = DragState::None;
                was_dragging
            }
        }
    }

    pub fn cursor_moved(&mut self, position: Vec2) -> bool {
        let previous = self.cursor.replace(position);
        let Some(previous) = previous else {
            return false;
        };
        let delta = position - previous;

        match self.drag {
            DragState::None => return false,
            DragState::Rotate => self.rotate(delta),
            DragState::Pan => self.pan(delta),
            DragState::Dolly => self.dolly(-delta.y / PIXELS_PER_NOTCH),
        }
        true
    }

    /// Orbit by a cursor movement in pixels; a full viewport height is a
    /// full turn.
    pub fn rotate(&mut self, pixels: Vec2) {
        let turn = TAU * self.rotate_speed / self.viewport_height;
        self.delta_theta -= pixels.x * turn;
        self.delta_phi -= pixels.y * turn;
    }

    /// Pan by a cursor movement in pixels
    pub fn pan(&mut self, pixels: Vec2) {
        self.pan_pixels += pixels * self.pan_speed;
    }

    /// Positive notches move the camera towards the target
    pub fn dolly(&mut self, notches: f32) {
        self.scale *= DOLLY_BASE.powf(self.zoom_speed * notches);
    }

    /// Apply accumulated input to the camera. Returns true when it moved.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
        let old_position = camera.position;
        let old_target = camera.target;

        let offset = camera.position - camera.target;
        let radius = offset.length();
        let mut theta = offset.x.atan2(offset.z);
        let mut phi = if radius > 0.0 {
            (offset.y / radius).clamp(-1.0, 1.0).acos()
        } else {
            0.0
        };

        theta += self.delta_theta;
        phi = (phi + self.delta_phi)
            .clamp(self.min_polar_angle, self.max_polar_angle)
            .clamp(POLE_EPSILON, PI - POLE_EPSILON);
        let new_radius = (radius * self.scale).clamp(self.min_distance, self.max_distance);

        if self.pan_pixels != Vec2::ZERO {
            camera.target += self.pan_offset(camera, radius);
        }

        let sin_phi_radius = phi.sin() * new_radius;
        let new_offset = Vec3::new(
            sin_phi_radius * theta.sin(),
            new_radius * phi.cos(),
            sin_phi_radius * theta.cos(),
        );
        camera.position = camera.target + new_offset;
        camera.look_at(camera.target);

        self.delta_theta = 0.0;
        self.delta_phi = 0.0;
        self.scale = 1.0;
        self.pan_pixels = Vec2::ZERO;

        camera.position.distance_squared(old_position) > f32::EPSILON
            || camera.target != old_target
    }

    fn pan_offset(&self, camera: &PerspectiveCamera, distance: f32) -> Vec3 {
        let forward = (camera.target - camera.position).normalize_or_zero();
        let right = forward.cross(camera.up).normalize_or_zero();
        let up = right.cross(forward);

        // World units per pixel at the target's depth
        let target_extent = distance * (camera.fov.to_radians() * 0.5).tan();
        let per_pixel = 2.0 * target_extent / self.viewport_height;

        -right * (self.pan_pixels.x * per_pixel) + up * (self.pan_pixels.y * per_pixel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (OrbitControls, PerspectiveCamera) {
        (OrbitControls::new(600), PerspectiveCamera::for_viewport(800, 600))
    }

    #[test]
    fn test_no_input_keeps_camera() {
        let (mut controls, mut camera) = setup();
        assert!(!controls.update(&mut camera));
        assert!((camera.position - Vec3::new(0.0, 0.0, 6.0)).length() < 1e-5);
    }

    #[test]
    fn test_rotation_preserves_distance() {
        let (mut controls, mut camera) = setup();
        controls.rotate(Vec2::new(150.0, -40.0));
        assert!(controls.update(&mut camera));

        assert!((camera.distance_to_target() - 6.0).abs() < 1e-4);
        assert!(camera.position.x.abs() > 0.1);
    }

    #[test]
    fn test_quarter_viewport_drag_is_quarter_turn() {
        let (mut controls, mut camera) = setup();
        controls.rotate(Vec2::new(-150.0, 0.0));
        controls.update(&mut camera);
        // theta grows by pi/2: +z swings round to +x
        assert!((camera.position - Vec3::new(6.0, 0.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_polar_angle_is_clamped() {
        let (mut controls, mut camera) = setup();
        controls.min_polar_angle = 0.5;
        controls.max_polar_angle = 2.0;

        controls.rotate(Vec2::new(0.0, 5000.0));
        controls.update(&mut camera);
        let phi = (camera.position.y / camera.distance_to_target()).acos();
        assert!(phi >= 0.5 - 1e-4 && phi <= 2.0 + 1e-4, "phi = {}", phi);

        controls.rotate(Vec2::new(0.0, -5000.0));
        controls.update(&mut camera);
        let phi = (camera.position.y / camera.distance_to_target()).acos();
        assert!(phi >= 0.5 - 1e-4 && phi <= 2.0 + 1e-4, "phi = {}", phi);
    }

    #[test]
    fn test_never_reaches_the_pole() {
        let (mut controls, mut camera) = setup();
        controls.rotate(Vec2::new(0.0, 100_000.0));
        controls.update(&mut camera);
        assert!(camera.position.x.abs() + camera.position.z.abs() > 0.0);
    }

    #[test]
    fn test_scroll_up_moves_closer() {
        let (mut controls, mut camera) = setup();
        controls.dolly(1.0);
        controls.update(&mut camera);
        assert!((camera.distance_to_target() - 6.0 * 0.95).abs() < 1e-4);

        controls.dolly(-2.0);
        controls.update(&mut camera);
        assert!((camera.distance_to_target() - 6.0 / 0.95).abs() < 1e-4);
    }

    #[test]
    fn test_dolly_respects_limits() {
        let (mut controls, mut camera) = setup();
        controls.min_distance = 2.0;
        controls.max_distance = 10.0;

        controls.dolly(100.0);
        controls.update(&mut camera);
        assert!((camera.distance_to_target() - 2.0).abs() < 1e-4);

        controls.dolly(-500.0);
        controls.update(&mut camera);
        assert!((camera.distance_to_target() - 10.0).abs() < 1e-3);
    }

    #[test]
    fn test_pan_moves_target_and_camera_together() {
        let (mut controls, mut camera) = setup();
        controls.pan(Vec2::new(100.0, 0.0));
        assert!(controls.update(&mut camera));

        // Dragging right moves the view to the left
        assert!(camera.target.x < 0.0);
        assert!(camera.target.y.abs() < 1e-5);
        assert!((camera.position - camera.target - Vec3::new(0.0, 0.0, 6.0)).length() < 1e-4);
    }

    #[test]
    fn test_drag_state_machine() {
        let mut controls = OrbitControls::new(600);
        assert!(!controls.cursor_moved(Vec2::new(10.0, 10.0)));
        assert!(!controls.cursor_moved(Vec2::new(20.0, 10.0)));

        assert!(controls.mouse_button(MouseButton::Left, ElementState::Pressed));
        assert!(controls.cursor_moved(Vec2::new(30.0, 10.0)));
        assert!(controls.delta_theta < 0.0);

        assert!(controls.mouse_button(MouseButton::Left, ElementState::Released));
        assert!(!controls.cursor_moved(Vec2::new(40.0, 10.0)));
    }

    #[test]
    fn test_disabled_ignores_events() {
        let mut controls = OrbitControls::new(600);
        controls.enabled = false;
        assert!(!controls.handle_event(&WindowEvent::Focused(true)));
    }
}
