//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
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
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const SKY: [f32; 4] = [0.45, 0.7, 0.95, 1.0];
    pub const PLATFORM: [f32; 4] = [0.45, 0.3, 0.18, 1.0];
    pub const PLATFORM_TOP: [f32; 4] = [0.3, 0.75, 0.3, 1.0];
    pub const HAZARD: [f32; 4] = [0.85, 0.85, 0.9, 1.0];
    pub const GOAL_POLE: [f32; 4] = [0.9, 0.9, 0.9, 1.0];
    pub const GOAL_FLAG: [f32; 4] = [1.0, 0.8, 0.1, 1.0];
    pub const MONSTER: [f32; 4] = [0.75, 0.15, 0.2, 1.0];
    pub const PLAYER: [f32; 4] = [0.2, 0.35, 0.9, 1.0];
    pub const PLAYER_LEGS: [f32; 4] = [0.1, 0.15, 0.45, 1.0];
    pub const EYE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
}
