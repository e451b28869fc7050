use super::gpu::{DEPTH_FORMAT, SAMPLE_COUNT};
use crate::types::{MeshVertex, PointVertex};

/// Bind group layouts shared by every pipeline: frame data in group 0,
/// per-node data in group 1
pub struct SceneLayouts {
    pub frame: wgpu::BindGroupLayout,
    pub node: wgpu::BindGroupLayout,
    pub pipeline: wgpu::PipelineLayout,
}

impl SceneLayouts {
    pub fn new(device: &wgpu::Device) -> Self {
        let frame = uniform_layout(device, "frame_bind_group_layout");
        let node = uniform_layout(device, "node_bind_group_layout");
        let pipeline = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Scene Pipeline Layout"),
            bind_group_layouts: &[&frame, &node],
            push_constant_ranges: &[],
        });
        Self {
            frame,
            node,
            pipeline,
        }
    }
}

fn uniform_layout(device: &wgpu::Device, label: &str) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
        label: Some(label),
    })
}

pub struct ScenePipelines {
    pub points: wgpu::RenderPipeline,
    pub phong: wgpu::RenderPipeline,
    pub glow: wgpu::RenderPipeline,
}

/// Fixed-function state that differs between the pipelines
struct PipelineSpec<'a> {
    label: &'a str,
    source: &'a str,
    vertex_layout: wgpu::VertexBufferLayout<'static>,
    topology: wgpu::PrimitiveTopology,
    cull_mode: Option<wgpu::Face>,
    blend: wgpu::BlendState,
}

impl ScenePipelines {
    pub fn new(
        device: &wgpu::Device,
        layout: &wgpu::PipelineLayout,
        format: wgpu::TextureFormat,
    ) -> Self {
        let points = create_pipeline(
            device,
            layout,
            format,
            PipelineSpec {
                label: "Points Pipeline",
                source: include_str!("../points.wgsl"),
                vertex_layout: PointVertex::layout(),
                topology: wgpu::PrimitiveTopology::PointList,
                cull_mode: None,
                blend: wgpu::BlendState::ALPHA_BLENDING,
            },
        );

        let phong = create_pipeline(
            device,
            layout,
            format,
            PipelineSpec {
                label: "Phong Pipeline",
                source: include_str!("../phong.wgsl"),
                vertex_layout: MeshVertex::layout(),
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: Some(wgpu::Face::Back),
                blend: wgpu::BlendState::REPLACE,
            },
        );

        let additive = wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::SrcAlpha,
            dst_factor: wgpu::BlendFactor::One,
            operation: wgpu::BlendOperation::Add,
        };
        let glow = create_pipeline(
            device,
            layout,
            format,
            PipelineSpec {
                label: "Glow Pipeline",
                source: include_str!("../glow.wgsl"),
                vertex_layout: MeshVertex::layout(),
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: Some(wgpu::Face::Back),
                blend: wgpu::BlendState {
                    color: additive,
                    alpha: additive,
                },
            },
        );

        Self {
            points,
            phong,
            glow,
        }
    }
}

fn create_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    format: wgpu::TextureFormat,
    spec: PipelineSpec<'_>,
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(spec.label),
        source: wgpu::ShaderSource::Wgsl(spec.source.into()),
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(spec.label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[spec.vertex_layout],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(spec.blend),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: spec.topology,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: spec.cull_mode,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState {
            count: SAMPLE_COUNT,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        multiview: None,
        cache: None,
    })
}
