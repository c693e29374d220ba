//! The flat drawing target the scene renderer paints onto
//!
//! Anything that can fill and stroke convex polygons in screen space can host
//! the renderer. [`VertexBatch`](super::vertex::VertexBatch) is the bundled
//! implementation.

use glam::Vec2;

use super::color::Color;

/// 2D drawing surface (screen pixels, y grows down)
pub trait Surface {
    fn width(&self) -> f32;
    fn height(&self) -> f32;

    /// Fill a convex polygon
    fn fill_polygon(&mut self, points: &[Vec2], color: Color);

    /// Outline a closed polygon
    fn stroke_polygon(&mut self, points: &[Vec2], color: Color, line_width: f32);

    /// Draw a text label anchored at its baseline center
    fn fill_text(&mut self, text: &str, anchor: Vec2, size: f32, color: Color);

    /// Global opacity multiplier applied to everything drawn afterwards
    fn set_alpha(&mut self, alpha: f32);

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        self.fill_polygon(
            &[
                Vec2::new(x, y),
                Vec2::new(x + w, y),
                Vec2::new(x + w, y + h),
                Vec2::new(x, y + h),
            ],
            color,
        );
    }

    fn draw_line(&mut self, a: Vec2, b: Vec2, color: Color, line_width: f32) {
        let dir = (b - a).normalize_or_zero();
        if dir == Vec2::ZERO {
            return;
        }
        let perp = Vec2::new(-dir.y, dir.x) * (line_width * 0.5);
        self.fill_polygon(&[a + perp, b + perp, b - perp, a - perp], color);
    }
}
