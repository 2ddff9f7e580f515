//! Vertex types
//!
//! GPU layouts for the textured box and the 2D overlay.

use crate::reconstruct::BoxVertex;
use bytemuck::{Pod, Zeroable};

/// Vertex with position and texture coordinate.
///
/// `uv` follows the GPU convention: `v = 0` is the top image row.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct VertexPU {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

impl VertexPU {
    pub const fn new(position: [f32; 3], uv: [f32; 2]) -> Self {
        Self { position, uv }
    }

    /// Get the vertex buffer layout for this vertex type.
    pub const fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<VertexPU>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                // position
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                // uv
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}

impl From<BoxVertex> for VertexPU {
    /// Flip the y-up texture coordinate into GPU row order.
    fn from(v: BoxVertex) -> Self {
        Self::new(v.position.to_array(), [v.uv.x, 1.0 - v.uv.y])
    }
}

/// 2D overlay vertex in normalized device coordinates.
///
/// `local` spans `[-1, 1]` across a dot quad and is zero for lines; the
/// fragment shader discards outside the unit circle.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct OverlayVertex {
    pub position: [f32; 2],
    pub local: [f32; 2],
    pub color: [f32; 4],
}

impl OverlayVertex {
    pub const fn new(position: [f32; 2], local: [f32; 2], color: [f32; 4]) -> Self {
        Self {
            position,
            local,
            color,
        }
    }

    /// Get the vertex buffer layout for this vertex type.
    pub const fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<OverlayVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                // position
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                // local
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
                // color
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 4]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec2, Vec3};

    #[test]
    fn test_box_vertex_uv_flips() {
        let v = VertexPU::from(BoxVertex {
            position: Vec3::new(1.0, 2.0, 3.0),
            uv: Vec2::new(0.25, 0.75),
        });
        assert_eq!(v.position, [1.0, 2.0, 3.0]);
        assert_eq!(v.uv, [0.25, 0.25]);
    }

    #[test]
    fn test_layout_strides() {
        assert_eq!(VertexPU::layout().array_stride, 20);
        assert_eq!(OverlayVertex::layout().array_stride, 32);
    }
}
