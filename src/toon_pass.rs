//! Toon-shaded mesh rendering with depth testing.
//!
//! Renders the section meshes with a three-band toon ramp lit by a single
//! directional light, plus exponential-squared distance fog toward the clear
//! color. Two bind groups: camera uniforms at group 0, per-draw model
//! uniforms at group 1 via dynamic offsets into one uniform buffer.
//!
//! The pass owns the depth buffer; [`ParticlePass`](crate::ParticlePass)
//! shares it with depth writes disabled so particles occlude correctly.
//! Call [`ToonPass::ensure_depth_size`] before rendering in case the window
//! resized.

use glam::Vec3;

use crate::camera::{Camera, CameraRig};
use crate::gpu::GpuContext;
use crate::mesh::{Mesh, Transform, Vertex3d};

/// Per-frame camera uniforms shared by all toon draws.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniforms {
    /// Combined view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    /// Camera eye position in world space, for fog distance.
    pub camera_pos: [f32; 3],
    /// Elapsed time in seconds.
    pub time: f32,
    /// Color the scene fades into with distance.
    pub fog_color: [f32; 3],
    /// Exp2 fog density.
    pub fog_density: f32,
}

/// Per-draw model uniforms, written at a dynamic offset per section mesh.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelUniforms {
    /// Model matrix (object to world).
    pub model: [[f32; 4]; 4],
    /// Inverse transpose of the model matrix, for normals.
    pub normal_matrix: [[f32; 4]; 4],
    /// RGBA material color.
    pub color: [f32; 4],
}

/// A mesh queued for toon rendering this frame.
pub struct DrawCall<'a> {
    pub mesh: &'a Mesh,
    pub transform: Transform,
    pub color: Vec3,
}

// Dynamic-offset stride; covers ModelUniforms under the default
// min_uniform_buffer_offset_alignment.
const MODEL_STRIDE: u64 = 256;
/// Most meshes a single pass invocation can draw.
pub const MAX_DRAWS: usize = 8;

/// Toon mesh render pass.
pub struct ToonPass {
    pipeline: wgpu::RenderPipeline,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    model_buffer: wgpu::Buffer,
    model_bind_group: wgpu::BindGroup,
    depth_texture: wgpu::Texture,
    depth_view: wgpu::TextureView,
    depth_size: (u32, u32),
    /// Clear/fog color of the scene background.
    pub background: Vec3,
    /// Exp2 fog density.
    pub fog_density: f32,
}

impl ToonPass {
    /// Create the pass: pipeline, uniform buffers, and a depth buffer sized
    /// to the current surface.
    pub fn new(gpu: &GpuContext) -> Self {
        let device = &gpu.device;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Toon Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/toon.wgsl").into()),
        });

        let camera_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Toon Camera Uniforms"),
            size: std::mem::size_of::<CameraUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let camera_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Toon Camera Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Toon Camera Bind Group"),
            layout: &camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let model_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Toon Model Uniforms"),
            size: MODEL_STRIDE * MAX_DRAWS as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let model_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Toon Model Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: true,
                        min_binding_size: wgpu::BufferSize::new(
                            std::mem::size_of::<ModelUniforms>() as u64,
                        ),
                    },
                    count: None,
                }],
            });

        let model_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Toon Model Bind Group"),
            layout: &model_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &model_buffer,
                    offset: 0,
                    size: wgpu::BufferSize::new(std::mem::size_of::<ModelUniforms>() as u64),
                }),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Toon Pipeline Layout"),
            bind_group_layouts: &[&camera_bind_group_layout, &model_bind_group_layout],
            push_constant_ranges: &[],
        });

        let (depth_texture, depth_view) = Self::create_depth_texture(gpu);

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Toon Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs"),
                buffers: &[Vertex3d::LAYOUT],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: gpu.config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: Some(wgpu::Face::Back),
                front_face: wgpu::FrontFace::Ccw,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Self {
            pipeline,
            camera_buffer,
            camera_bind_group,
            model_buffer,
            model_bind_group,
            depth_texture,
            depth_view,
            depth_size: (gpu.width(), gpu.height()),
            background: Vec3::ZERO,
            fog_density: 0.1,
        }
    }

    fn create_depth_texture(gpu: &GpuContext) -> (wgpu::Texture, wgpu::TextureView) {
        let texture = gpu.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width: gpu.width(),
                height: gpu.height(),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        (texture, view)
    }

    /// Recreate the depth buffer if the surface size changed.
    pub fn ensure_depth_size(&mut self, gpu: &GpuContext) {
        if self.depth_size != (gpu.width(), gpu.height()) {
            let (texture, view) = Self::create_depth_texture(gpu);
            self.depth_texture = texture;
            self.depth_view = view;
            self.depth_size = (gpu.width(), gpu.height());
        }
    }

    /// View of the depth buffer, for the frame's render pass attachment.
    pub fn depth_view(&self) -> &wgpu::TextureView {
        &self.depth_view
    }

    /// Upload camera and model uniforms for this frame's draw calls.
    ///
    /// Must run before the render pass that uses them is encoded. Draws past
    /// [`MAX_DRAWS`] are dropped with a warning.
    pub fn prepare(
        &self,
        gpu: &GpuContext,
        camera: &Camera,
        rig: &CameraRig,
        time: f32,
        draw_calls: &[DrawCall],
    ) {
        let view_proj = camera.projection_matrix(gpu.aspect()) * rig.view_matrix();
        let camera_uniforms = CameraUniforms {
            view_proj: view_proj.to_cols_array_2d(),
            camera_pos: rig.eye().to_array(),
            time,
            fog_color: self.background.to_array(),
            fog_density: self.fog_density,
        };
        gpu.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[camera_uniforms]),
        );

        for (i, call) in draw_calls.iter().take(MAX_DRAWS).enumerate() {
            let model_matrix = call.transform.matrix();
            let model_uniforms = ModelUniforms {
                model: model_matrix.to_cols_array_2d(),
                normal_matrix: model_matrix.inverse().transpose().to_cols_array_2d(),
                color: [call.color.x, call.color.y, call.color.z, 1.0],
            };
            gpu.queue.write_buffer(
                &self.model_buffer,
                i as u64 * MODEL_STRIDE,
                bytemuck::cast_slice(&[model_uniforms]),
            );
        }
        if draw_calls.len() > MAX_DRAWS {
            log::warn!("dropping {} draws over capacity", draw_calls.len() - MAX_DRAWS);
        }
    }

    /// Record the draw calls prepared by [`prepare`](Self::prepare).
    pub fn render(&self, render_pass: &mut wgpu::RenderPass, draw_calls: &[DrawCall]) {
        if draw_calls.is_empty() {
            return;
        }

        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);

        for (i, call) in draw_calls.iter().take(MAX_DRAWS).enumerate() {
            let offset = (i as u64 * MODEL_STRIDE) as u32;
            render_pass.set_bind_group(1, &self.model_bind_group, &[offset]);
            render_pass.set_vertex_buffer(0, call.mesh.vertex_buffer.slice(..));
            render_pass
                .set_index_buffer(call.mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            render_pass.draw_indexed(0..call.mesh.index_count, 0, 0..1);
        }
    }
}
