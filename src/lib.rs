pub mod animation;
pub mod app;
pub mod camera;
pub mod cli;
pub mod controls;
pub mod font;
pub mod frame;
pub mod geometry;
pub mod glow;
pub mod math;
pub mod particles;
pub mod renderer;
pub mod resize;
pub mod scene;
pub mod types;

pub use animation::{orbit_position, tick};
pub use resize::{handle_resize, OutputSurface};
pub use scene::SceneState;
