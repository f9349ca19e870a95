//! GPU mesh geometry and spatial transforms.
//!
//! - [`Vertex3d`] — the vertex format shared by every mesh: position, normal,
//!   and UV, 32 bytes per vertex
//! - [`Mesh`] — GPU-resident geometry with vertex and index buffers
//! - [`Transform`] — position, rotation, and scale for placing meshes in
//!   world space
//!
//! Meshes are built from [`RawGeometry`](crate::geometry::RawGeometry)
//! produced by the generators in [`geometry`](crate::geometry) and are
//! immutable after upload.

use crate::geometry::RawGeometry;
use crate::gpu::GpuContext;
use glam::{Mat4, Quat, Vec3};

/// A vertex with position, normal, and texture coordinates.
///
/// `#[repr(C)]` plus the bytemuck derives give a predictable layout for GPU
/// upload: position at offset 0, normal at 12, uv at 24.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex3d {
    /// Model-space position.
    pub position: [f32; 3],
    /// Surface normal; must be normalized for correct shading.
    pub normal: [f32; 3],
    /// Texture coordinates in [0, 1].
    pub uv: [f32; 2],
}

impl Vertex3d {
    /// The wgpu vertex buffer layout for this vertex type: position at
    /// shader location 0, normal at 1, uv at 2, stepped per vertex.
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex3d>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            // position
            wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x3,
            },
            // normal
            wgpu::VertexAttribute {
                offset: 12,
                shader_location: 1,
                format: wgpu::VertexFormat::Float32x3,
            },
            // uv
            wgpu::VertexAttribute {
                offset: 24,
                shader_location: 2,
                format: wgpu::VertexFormat::Float32x2,
            },
        ],
    };

    pub fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            uv,
        }
    }
}

/// GPU-resident mesh geometry.
#[derive(Debug)]
pub struct Mesh {
    pub(crate) vertex_buffer: wgpu::Buffer,
    pub(crate) index_buffer: wgpu::Buffer,
    pub(crate) index_count: u32,
}

impl Mesh {
    /// Upload raw vertex and index data to GPU buffers.
    pub fn new(gpu: &GpuContext, vertices: &[Vertex3d], indices: &[u32]) -> Self {
        use wgpu::util::DeviceExt;

        let vertex_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Mesh Vertex Buffer"),
                contents: bytemuck::cast_slice(vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });

        let index_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Mesh Index Buffer"),
                contents: bytemuck::cast_slice(indices),
                usage: wgpu::BufferUsages::INDEX,
            });

        Self {
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
        }
    }

    /// Upload a generated primitive.
    pub fn from_geometry(gpu: &GpuContext, geometry: &RawGeometry) -> Self {
        Self::new(gpu, &geometry.vertices, &geometry.indices)
    }
}

/// Position, rotation, and scale combined into a model matrix in SRT order.
///
/// # Example
///
/// ```
/// use glam::{Quat, Vec3};
/// use triptych::Transform;
///
/// let transform = Transform::new()
///     .position(Vec3::new(2.0, -4.0, 0.0))
///     .rotation(Quat::from_rotation_y(0.5));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Transform {
    /// World-space position (translation).
    pub position: Vec3,
    /// Rotation as a unit quaternion.
    pub rotation: Quat,
    /// Scale factors for each axis.
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Identity transform: origin, no rotation, unit scale.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the position (translation) component.
    pub fn position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Sets the rotation component.
    pub fn rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Sets non-uniform scale factors for each axis.
    pub fn scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// The 4×4 model matrix, applied Scale → Rotate → Translate.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}
