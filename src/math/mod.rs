mod aabb;
mod color;
mod transform;

pub use aabb::AABB;
pub use color::{hex_to_linear_rgb, hex_to_linear_rgba, srgb_to_linear};
pub use transform::{look_at_rotation, normal_matrix, Transform};
