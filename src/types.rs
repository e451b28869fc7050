use glam::{Mat4, Vec3};

use crate::camera::PerspectiveCamera;
use crate::scene::Lighting;

/// Per-frame uniform buffer data for GPU (group 0)
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniform {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub camera_position: [f32; 3],
    pub _pad0: f32,
    pub ambient: [f32; 3],
    pub _pad1: f32,
    pub light_position: [f32; 3],
    pub _pad2: f32,
    pub light_color: [f32; 3],
    pub _pad3: f32,
    /// Cutoff distance, decay exponent
    pub light_params: [f32; 4],
}

impl FrameUniform {
    pub fn new(camera: &PerspectiveCamera, lighting: &Lighting) -> Self {
        let point = &lighting.point;
        Self {
            view: camera.view_matrix().to_cols_array_2d(),
            projection: camera.projection_matrix().to_cols_array_2d(),
            camera_position: camera.position.to_array(),
            _pad0: 0.0,
            ambient: lighting.ambient.radiance().to_array(),
            _pad1: 0.0,
            light_position: point.position.to_array(),
            _pad2: 0.0,
            light_color: point.radiance().to_array(),
            _pad3: 0.0,
            light_params: [point.distance, point.decay, 0.0, 0.0],
        }
    }
}

/// Per-node uniform buffer data for GPU (group 1)
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniform {
    pub model: [[f32; 4]; 4],
    pub normal_matrix: [[f32; 4]; 4],
    /// Linear RGB and opacity
    pub color: [f32; 4],
    /// Linear specular RGB and shininess
    pub specular: [f32; 4],
    /// Material specific: glow bias and power
    pub params: [f32; 4],
}

impl ObjectUniform {
    pub fn new(model: Mat4, color: [f32; 4]) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            normal_matrix: crate::math::normal_matrix(model).to_cols_array_2d(),
            color,
            specular: [0.0; 4],
            params: [0.0; 4],
        }
    }

    pub fn with_specular(mut self, specular: Vec3, shininess: f32) -> Self {
        self.specular = specular.extend(shininess).to_array();
        self
    }

    pub fn with_params(mut self, params: [f32; 4]) -> Self {
        self.params = params;
        self
    }
}

/// Vertex of an extruded mesh
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl MeshVertex {
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Vertex of the particle field
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointVertex {
    pub position: [f32; 3],
}

impl PointVertex {
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<PointVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}
