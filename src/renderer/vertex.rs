//! Vertex batch output for the software renderer

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use super::color::Color;
use super::surface::Surface;

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
}

/// A text label queued alongside the triangles
#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub text: String,
    pub anchor: Vec2,
    pub size: f32,
    pub color: [f32; 4],
}

/// Triangle-list surface: every fill becomes a fan, every stroke a band of quads
///
/// The vertex slice can be uploaded as-is (`bytemuck::cast_slice`) to any 2D
/// backend; labels are left for the backend's text renderer.
#[derive(Debug, Clone)]
pub struct VertexBatch {
    width: f32,
    height: f32,
    alpha: f32,
    pub vertices: Vec<Vertex>,
    pub labels: Vec<TextLabel>,
}

impl VertexBatch {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            alpha: 1.0,
            vertices: Vec::with_capacity(16 * 1024),
            labels: Vec::new(),
        }
    }

    /// Start a new frame, keeping allocations
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.labels.clear();
        self.alpha = 1.0;
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Raw bytes for buffer upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    fn with_surface_alpha(&self, color: Color) -> [f32; 4] {
        color.with_alpha(color.a * self.alpha).to_array()
    }
}

impl Surface for VertexBatch {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
        if points.len() < 3 {
            return;
        }
        let color = self.with_surface_alpha(color);
        let origin = points[0];
        for pair in points[1..].windows(2) {
            self.vertices.push(Vertex::new(origin.x, origin.y, color));
            self.vertices.push(Vertex::new(pair[0].x, pair[0].y, color));
            self.vertices.push(Vertex::new(pair[1].x, pair[1].y, color));
        }
    }

    fn stroke_polygon(&mut self, points: &[Vec2], color: Color, line_width: f32) {
        if points.len() < 2 {
            return;
        }
        for i in 0..points.len() {
            let a = points[i];
            let b = points[(i + 1) % points.len()];
            self.draw_line(a, b, color, line_width);
        }
    }

    fn fill_text(&mut self, text: &str, anchor: Vec2, size: f32, color: Color) {
        let color = self.with_surface_alpha(color);
        self.labels.push(TextLabel {
            text: text.to_string(),
            anchor,
            size,
            color,
        });
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha.clamp(0.0, 1.0);
    }
}
