//! Shape generation for 2D primitives
//!
//! All shapes are emitted as triangle lists in viewport pixel space.

use glam::Vec2;

use super::vertex::Vertex;
use crate::Rect;

/// Generate vertices for a filled rectangle
pub fn rect(r: &Rect, color: [f32; 4]) -> Vec<Vertex> {
    let (x0, y0, x1, y1) = (r.x, r.y, r.right(), r.bottom());
    vec![
        Vertex::new(x0, y0, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x1, y1, color),
    ]
}

/// Generate a row of upward spikes filling a rectangle
pub fn spikes(r: &Rect, spike_width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let count = (r.w / spike_width).round().max(1.0) as u32;
    let step = r.w / count as f32;
    let mut vertices = Vec::with_capacity(count as usize * 3);

    for i in 0..count {
        let left = r.x + i as f32 * step;
        vertices.push(Vertex::new(left, r.bottom(), color));
        vertices.push(Vertex::new(left + step / 2.0, r.y, color));
        vertices.push(Vertex::new(left + step, r.bottom(), color));
    }

    vertices
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * std::f32::consts::TAU;
        let theta2 = ((i + 1) as f32 / segments as f32) * std::f32::consts::TAU;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}
