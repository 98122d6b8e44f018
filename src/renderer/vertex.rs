//! Vertex types for the 3D scene
//!
//! Positions are already in clip space (projected on the CPU), so the
//! shader is a pass-through and the GPU does the homogeneous clipping.

use bytemuck::{Pod, Zeroable};
use glam::Vec4;

/// Clip-space vertex with color
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 4],
    pub color: [f32; 4],
}

impl Vertex {
    pub fn new(clip: Vec4, color: [f32; 4]) -> Self {
        Self {
            position: clip.to_array(),
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 4]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const SKY: [f32; 4] = [0.529, 0.808, 0.922, 1.0]; // #87ceeb
    pub const GROUND: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
    pub const PLAYER: [f32; 4] = [0.0, 0.0, 1.0, 1.0];
    pub const OBSTACLE: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const COIN: [f32; 4] = [1.0, 1.0, 0.0, 1.0];

    /// Darken a color for side faces
    pub fn shade(color: [f32; 4], factor: f32) -> [f32; 4] {
        [
            color[0] * factor,
            color[1] * factor,
            color[2] * factor,
            color[3],
        ]
    }
}
