use glam::Vec3;

use crate::math::AABB;

/// Non-indexed triangle soup with one flat normal per triangle corner
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
}

impl MeshData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_triangle(&mut self, a: Vec3, b: Vec3, c: Vec3) {
        let normal = (b - a).cross(c - a).normalize_or_zero();
        self.positions.extend_from_slice(&[a, b, c]);
        self.normals.extend_from_slice(&[normal, normal, normal]);
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn bounding_box(&self) -> Option<AABB> {
        AABB::from_points(self.positions.iter().copied())
    }

    pub fn translate(&mut self, offset: Vec3) {
        for p in &mut self.positions {
            *p += offset;
        }
    }

    /// Move the geometry so its bounding box is centered on the origin.
    /// Returns the applied offset.
    pub fn center(&mut self) -> Vec3 {
        let offset = self
            .bounding_box()
            .map(|aabb| -aabb.center())
            .unwrap_or(Vec3::ZERO);
        self.translate(offset);
        offset
    }
}
