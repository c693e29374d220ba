//! Perspective projection and distance fog
//!
//! There is no cached view matrix: every vertex is pushed through
//! [`project`] independently each frame.

use glam::{Vec2, Vec3};

use super::color::Color;
use crate::consts::*;
use crate::sim::PlayerState;

/// A projected point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    /// Screen x (pixels, grows right)
    pub x: f32,
    /// Screen y (pixels, grows down)
    pub y: f32,
    /// Perspective scale (pixels per world unit at this depth)
    pub scale: f32,
    /// Camera-space depth
    pub depth: f32,
}

impl Projected {
    #[inline]
    pub fn screen(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Project a world point for a camera at `camera_pos` with the given roll and pitch
///
/// Returns `None` when the point is at or behind the near plane.
pub fn project(
    point: Vec3,
    camera_pos: Vec3,
    width: f32,
    height: f32,
    roll: f32,
    pitch: f32,
) -> Option<Projected> {
    let rel = point - camera_pos;

    // Roll: banking in the lateral/vertical plane
    let (sin_r, cos_r) = roll.sin_cos();
    let x = rel.x * cos_r - rel.y * sin_r;
    let y = rel.x * sin_r + rel.y * cos_r;

    // Pitch: positive looks down
    let (sin_p, cos_p) = pitch.sin_cos();
    let y_p = y * cos_p + rel.z * sin_p;
    let z_p = rel.z * cos_p - y * sin_p;

    if z_p <= NEAR_PLANE {
        return None;
    }

    let scale = FOCAL_LENGTH / z_p;
    Some(Projected {
        x: width * 0.5 + x * scale,
        y: height * 0.5 - y_p * scale,
        scale,
        depth: z_p,
    })
}

/// Fog weight toward the sky color for a depth, squared for a sharper falloff
pub fn fog_factor(depth: f32) -> f32 {
    let t = ((depth - 5.0) / (FOG_DISTANCE - 10.0)).clamp(0.0, 1.0);
    t * t
}

/// Blend `color` toward the sky by the fog weight at `depth`
pub fn apply_fog(color: Color, depth: f32) -> Color {
    color.mix(Color::SKY, fog_factor(depth))
}

/// Camera transform for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub roll: f32,
    pub pitch: f32,
    pub width: f32,
    pub height: f32,
}

impl Camera {
    /// Chase camera behind and above the runner, banking with its tilt
    pub fn follow(player: &PlayerState, width: f32, height: f32) -> Self {
        Self {
            position: Vec3::new(
                player.pos.x,
                player.pos.y + CAMERA_HEIGHT,
                player.pos.z - CAMERA_DISTANCE,
            ),
            roll: player.tilt,
            pitch: CAMERA_PITCH,
            width,
            height,
        }
    }

    /// Jitter the camera position by the current shake intensity
    pub fn shaken(mut self, intensity: f32, time_ms: f32) -> Self {
        if intensity > 0.0 {
            let t = time_ms * 0.001;
            let amount = intensity * 0.004;
            self.position.x += (t * 53.0).sin() * amount;
            self.position.y += (t * 41.0).cos() * amount;
        }
        self
    }

    #[inline]
    pub fn project(&self, point: Vec3) -> Option<Projected> {
        project(point, self.position, self.width, self.height, self.roll, self.pitch)
    }
}
