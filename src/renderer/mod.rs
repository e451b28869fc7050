//! Forward renderer: particle points, Phong-lit text and the additive glow
//! shell, plus an optional egui FPS overlay.

mod gpu;
mod mesh;
mod overlay;
mod pipelines;

use std::sync::Arc;

use anyhow::{Context, Result};
use winit::window::Window;

use crate::math::{hex_to_linear_rgb, hex_to_linear_rgba};
use crate::resize::OutputSurface;
use crate::scene::{Material, SceneState};
use crate::types::{FrameUniform, ObjectUniform};

pub use gpu::{DEPTH_FORMAT, SAMPLE_COUNT};
pub use mesh::{mesh_vertices, GpuMesh, MeshCache, NodeBinding};
use overlay::Overlay;
use pipelines::{SceneLayouts, ScenePipelines};

const CLEAR_COLOR: wgpu::Color = wgpu::Color::BLACK;

struct DrawNode {
    mesh: Arc<GpuMesh>,
    binding: NodeBinding,
}

pub struct SceneRenderer {
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
    targets: gpu::RenderTargets,
    layouts: SceneLayouts,
    pipelines: ScenePipelines,
    frame_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    particles: GpuMesh,
    particle_binding: NodeBinding,
    mesh_cache: MeshCache,
    text_nodes: Vec<DrawNode>,
    overlay: Option<Overlay>,
}

impl SceneRenderer {
    pub async fn new(window: Arc<Window>, scene: &SceneState, show_overlay: bool) -> Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("Failed to create surface")?;
        let adapter = gpu::request_adapter(&instance, &surface).await?;
        let (device, queue) = gpu::request_device(&adapter).await?;

        let config = gpu::create_surface_config(&surface, &adapter, size)?;
        surface.configure(&device, &config);
        log::info!(
            "Using {} ({:?}), surface format {:?}",
            adapter.get_info().name,
            adapter.get_info().backend,
            config.format
        );

        let targets = gpu::RenderTargets::new(&device, &config);
        let layouts = SceneLayouts::new(&device);
        let pipelines = ScenePipelines::new(&device, &layouts.pipeline, config.format);

        let frame_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Frame Uniform Buffer"),
            size: std::mem::size_of::<FrameUniform>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &layouts.frame,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_buffer.as_entire_binding(),
            }],
            label: Some("frame_bind_group"),
        });

        let particles = GpuMesh::from_points(&device, &scene.particles.positions, "Particle Buffer");
        let particle_binding = NodeBinding::new(&device, &layouts.node, "Particle Uniforms");

        let overlay = show_overlay.then(|| Overlay::new(&device, config.format, &window));

        log::info!("Renderer initialized: {} particles", scene.particles.len());

        Ok(Self {
            device,
            queue,
            surface,
            config,
            targets,
            layouts,
            pipelines,
            frame_buffer,
            frame_bind_group,
            particles,
            particle_binding,
            mesh_cache: MeshCache::default(),
            text_nodes: Vec::new(),
            overlay,
        })
    }

    /// Returns true when the overlay consumed the event
    pub fn handle_event(&mut self, window: &Window, event: &winit::event::WindowEvent) -> bool {
        match &mut self.overlay {
            Some(overlay) => overlay.handle_event(window, event),
            None => false,
        }
    }

    /// Re-apply the current surface configuration after a lost or outdated surface
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Upload text meshes the first time the scene has them
    fn sync_text(&mut self, scene: &SceneState) {
        if !self.text_nodes.is_empty() || !scene.has_text() {
            return;
        }
        for (i, node) in scene.mesh_nodes().enumerate() {
            let label = format!("Text Mesh {}", i);
            let mesh = self
                .mesh_cache
                .get_or_upload(&self.device, &node.geometry, &label);
            let binding = NodeBinding::new(&self.device, &self.layouts.node, &label);
            self.text_nodes.push(DrawNode { mesh, binding });
        }
        log::info!(
            "Uploaded {} text nodes sharing {} meshes",
            self.text_nodes.len(),
            self.mesh_cache.len()
        );
    }

    fn write_uniforms(&self, scene: &SceneState) {
        let frame = FrameUniform::new(&scene.camera, &scene.lighting);
        self.queue
            .write_buffer(&self.frame_buffer, 0, bytemuck::bytes_of(&frame));

        let particles = &scene.particles;
        self.particle_binding.write(
            &self.queue,
            &ObjectUniform::new(
                particles.model_matrix(),
                hex_to_linear_rgba(particles.color, particles.opacity),
            ),
        );

        for (node, draw) in scene.mesh_nodes().zip(&self.text_nodes) {
            let model = node.transform.matrix();
            let uniform = match node.material {
                Material::Phong {
                    color,
                    specular,
                    shininess,
                } => ObjectUniform::new(model, hex_to_linear_rgba(color, 1.0))
                    .with_specular(glam::Vec3::from_array(hex_to_linear_rgb(specular)), shininess),
                Material::Glow(glow) => ObjectUniform::new(model, hex_to_linear_rgba(glow.color, glow.opacity))
                    .with_params([glow.bias, glow.power, 0.0, 0.0]),
            };
            draw.binding.write(&self.queue, &uniform);
        }
    }

    pub fn render(
        &mut self,
        scene: &SceneState,
        window: &Window,
        fps: f32,
    ) -> std::result::Result<(), wgpu::SurfaceError> {
        self.sync_text(scene);
        self.write_uniforms(scene);

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Scene Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.color,
                    resolve_target: Some(&view),
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Discard,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            render_pass.set_bind_group(0, &self.frame_bind_group, &[]);

            // Opaque words first, then the translucent particles and glow
            render_pass.set_pipeline(&self.pipelines.phong);
            for (node, draw) in scene.mesh_nodes().zip(&self.text_nodes) {
                if let Material::Phong { .. } = node.material {
                    render_pass.set_bind_group(1, &draw.binding.bind_group, &[]);
                    draw.mesh.draw(&mut render_pass);
                }
            }

            render_pass.set_pipeline(&self.pipelines.points);
            render_pass.set_bind_group(1, &self.particle_binding.bind_group, &[]);
            self.particles.draw(&mut render_pass);

            render_pass.set_pipeline(&self.pipelines.glow);
            for (node, draw) in scene.mesh_nodes().zip(&self.text_nodes) {
                if let Material::Glow(_) = node.material {
                    render_pass.set_bind_group(1, &draw.binding.bind_group, &[]);
                    draw.mesh.draw(&mut render_pass);
                }
            }
        }

        if let Some(overlay) = &mut self.overlay {
            overlay.render(&self.device, &self.queue, &mut encoder, window, &view, fps);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

impl OutputSurface for SceneRenderer {
    fn set_size(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.targets = gpu::RenderTargets::new(&self.device, &self.config);
    }

    fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }
}
