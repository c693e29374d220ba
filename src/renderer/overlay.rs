//! Fixed screen-space layers: sky backdrop, speed lines, crosshair, phase tint
//!
//! These read only scalar snapshot fields and never touch the projector.

use glam::Vec2;

use super::color::Color;
use super::surface::Surface;

const HORIZON_COLOR: Color = Color::rgb(0.75, 0.9, 0.97);
const SPEED_LINE_COUNT: u32 = 24;
/// Speed lines start to appear above this forward speed
const SPEED_LINE_THRESHOLD: f32 = 0.18;
const CROSSHAIR_SIZE: f32 = 8.0;
const PHASE_TINT: Color = Color::rgba(0.55, 0.3, 0.9, 0.12);

/// Vertical sky gradient filling the whole surface, drawn before the scene
pub fn draw_sky(surface: &mut dyn Surface) {
    let w = surface.width();
    let h = surface.height();
    let bands = 8;
    let band_h = h / bands as f32;
    for i in 0..bands {
        let t = i as f32 / (bands - 1) as f32;
        let color = Color::SKY.mix(HORIZON_COLOR, t);
        surface.fill_rect(0.0, i as f32 * band_h, w, band_h + 0.5, color);
    }
}

/// Opacity of the speed lines for a forward speed, 0 below the threshold
pub fn speed_line_strength(speed: f32, max_speed: f32) -> f32 {
    if speed <= SPEED_LINE_THRESHOLD || max_speed <= SPEED_LINE_THRESHOLD {
        return 0.0;
    }
    ((speed - SPEED_LINE_THRESHOLD) / (max_speed - SPEED_LINE_THRESHOLD)).clamp(0.0, 1.0)
}

/// Radial streaks from the screen edges toward the center
pub fn draw_speed_lines(surface: &mut dyn Surface, speed: f32, max_speed: f32, time_ms: f32) {
    let strength = speed_line_strength(speed, max_speed);
    if strength <= 0.0 {
        return;
    }
    let center = Vec2::new(surface.width() * 0.5, surface.height() * 0.5);
    let radius = center.length();
    let color = Color::rgba(1.0, 1.0, 1.0, 0.35 * strength);
    let t = time_ms * 0.001;

    for i in 0..SPEED_LINE_COUNT {
        let angle = i as f32 / SPEED_LINE_COUNT as f32 * std::f32::consts::TAU;
        // Each streak slides inward at its own rate
        let travel = (t * 3.0 + i as f32 * 0.37).fract();
        let dir = Vec2::from_angle(angle);
        let outer = center + dir * radius * (1.0 - 0.2 * travel);
        let inner = outer - dir * radius * (0.12 + 0.2 * strength);
        surface.draw_line(outer, inner, color, 1.5);
    }
}

/// Center crosshair, tinted while phase is active
pub fn draw_crosshair(surface: &mut dyn Surface, phase_active: bool) {
    let c = Vec2::new(surface.width() * 0.5, surface.height() * 0.5);
    let color = if phase_active {
        Color::rgba(0.7, 0.5, 1.0, 0.9)
    } else {
        Color::rgba(1.0, 1.0, 1.0, 0.7)
    };
    surface.draw_line(c - Vec2::X * CROSSHAIR_SIZE, c + Vec2::X * CROSSHAIR_SIZE, color, 2.0);
    surface.draw_line(c - Vec2::Y * CROSSHAIR_SIZE, c + Vec2::Y * CROSSHAIR_SIZE, color, 2.0);
}

/// Full-screen wash while phase is active, pulsing as it runs out
pub fn draw_phase_tint(surface: &mut dyn Surface, time_remaining_ms: f32) {
    let pulse = if time_remaining_ms < 1000.0 {
        0.5 + 0.5 * (time_remaining_ms * 0.02).sin()
    } else {
        1.0
    };
    let color = PHASE_TINT.with_alpha(PHASE_TINT.a * pulse);
    surface.fill_rect(0.0, 0.0, surface.width(), surface.height(), color);
}
