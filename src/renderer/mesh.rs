use std::sync::Arc;

use wgpu::util::DeviceExt;

use crate::geometry::MeshData;
use crate::types::{MeshVertex, ObjectUniform, PointVertex};

/// Vertex buffer holding one non-indexed draw
pub struct GpuMesh {
    pub vertex_buffer: wgpu::Buffer,
    pub vertex_count: u32,
}

impl GpuMesh {
    pub fn from_mesh(device: &wgpu::Device, mesh: &MeshData, label: &str) -> Self {
        let vertices = mesh_vertices(mesh);
        Self::from_vertices(device, bytemuck::cast_slice(&vertices), vertices.len(), label)
    }

    pub fn from_points(device: &wgpu::Device, points: &[glam::Vec3], label: &str) -> Self {
        let vertices: Vec<PointVertex> = points
            .iter()
            .map(|p| PointVertex {
                position: p.to_array(),
            })
            .collect();
        Self::from_vertices(device, bytemuck::cast_slice(&vertices), vertices.len(), label)
    }

    fn from_vertices(device: &wgpu::Device, contents: &[u8], count: usize, label: &str) -> Self {
        // Zero-sized buffers cannot be bound; keep one stray vertex around
        let padding = [0u8; 4];
        let contents = if contents.is_empty() { &padding[..] } else { contents };
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents,
            usage: wgpu::BufferUsages::VERTEX,
        });
        Self {
            vertex_buffer,
            vertex_count: count as u32,
        }
    }

    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        if self.vertex_count == 0 {
            return;
        }
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.draw(0..self.vertex_count, 0..1);
    }
}

pub fn mesh_vertices(mesh: &MeshData) -> Vec<MeshVertex> {
    mesh.positions
        .iter()
        .zip(&mesh.normals)
        .map(|(p, n)| MeshVertex {
            position: p.to_array(),
            normal: n.to_array(),
        })
        .collect()
}

/// Uniform buffer and bind group for one drawn node
pub struct NodeBinding {
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
}

impl NodeBinding {
    pub fn new(device: &wgpu::Device, layout: &wgpu::BindGroupLayout, label: &str) -> Self {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: std::mem::size_of::<ObjectUniform>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label: Some(label),
        });
        Self { buffer, bind_group }
    }

    pub fn write(&self, queue: &wgpu::Queue, uniform: &ObjectUniform) {
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(uniform));
    }
}

/// Uploaded meshes; nodes sharing an `Arc<MeshData>` share one buffer
#[derive(Default)]
pub struct MeshCache {
    entries: Vec<(Arc<MeshData>, Arc<GpuMesh>)>,
}

impl MeshCache {
    pub fn get_or_upload(
        &mut self,
        device: &wgpu::Device,
        mesh: &Arc<MeshData>,
        label: &str,
    ) -> Arc<GpuMesh> {
        if let Some((_, gpu)) = self.entries.iter().find(|(m, _)| Arc::ptr_eq(m, mesh)) {
            return Arc::clone(gpu);
        }
        let gpu = Arc::new(GpuMesh::from_mesh(device, mesh, label));
        self.entries.push((Arc::clone(mesh), Arc::clone(&gpu)));
        gpu
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
