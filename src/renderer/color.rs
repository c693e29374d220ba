//! Colors and the static block palette

use crate::consts::SKY_COLOR;
use crate::lerp;
use crate::sim::BlockType;

/// Linear RGBA color, components 0-1
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const SKY: Color = Color::rgb(SKY_COLOR[0], SKY_COLOR[1], SKY_COLOR[2]);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_array(rgb: [f32; 3]) -> Self {
        Self::rgb(rgb[0], rgb[1], rgb[2])
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Multiply RGB by `factor` (simple face shading)
    pub fn shade(self, factor: f32) -> Self {
        Self {
            r: (self.r * factor).clamp(0.0, 1.0),
            g: (self.g * factor).clamp(0.0, 1.0),
            b: (self.b * factor).clamp(0.0, 1.0),
            a: self.a,
        }
    }

    /// Blend RGB toward `other`, keeping this color's alpha
    pub fn mix(self, other: Color, t: f32) -> Self {
        Self {
            r: lerp(self.r, other.r, t),
            g: lerp(self.g, other.g, t),
            b: lerp(self.b, other.b, t),
            a: self.a,
        }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Face colors for one block type
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockColors {
    pub top: Color,
    pub side: Color,
    pub front: Color,
    pub detail: Option<Color>,
}

const fn colors(top: Color, side: Color, front: Color, detail: Option<Color>) -> BlockColors {
    BlockColors {
        top,
        side,
        front,
        detail,
    }
}

/// Static color table for every block type
pub fn palette(kind: BlockType) -> BlockColors {
    match kind {
        BlockType::Grass => colors(
            Color::rgb(0.36, 0.66, 0.25),
            Color::rgb(0.53, 0.38, 0.25),
            Color::rgb(0.49, 0.35, 0.23),
            Some(Color::rgb(0.31, 0.58, 0.21)),
        ),
        BlockType::Dirt => colors(
            Color::rgb(0.55, 0.4, 0.27),
            Color::rgb(0.5, 0.36, 0.24),
            Color::rgb(0.47, 0.34, 0.22),
            None,
        ),
        BlockType::Stone => colors(
            Color::rgb(0.55, 0.55, 0.55),
            Color::rgb(0.47, 0.47, 0.47),
            Color::rgb(0.5, 0.5, 0.5),
            Some(Color::rgb(0.36, 0.36, 0.38)),
        ),
        BlockType::Wood => colors(
            Color::rgb(0.72, 0.58, 0.36),
            Color::rgb(0.45, 0.33, 0.18),
            Color::rgb(0.42, 0.31, 0.17),
            Some(Color::rgb(0.33, 0.23, 0.12)),
        ),
        BlockType::Leaves => colors(
            Color::rgb(0.22, 0.52, 0.16),
            Color::rgb(0.19, 0.46, 0.14),
            Color::rgb(0.2, 0.49, 0.15),
            Some(Color::rgb(0.13, 0.35, 0.1)),
        ),
        BlockType::Gold => colors(
            Color::rgb(1.0, 0.88, 0.2),
            Color::rgb(0.9, 0.72, 0.1),
            Color::rgb(0.95, 0.8, 0.15),
            Some(Color::rgb(1.0, 0.98, 0.7)),
        ),
        BlockType::Tnt => colors(
            Color::rgb(0.75, 0.2, 0.15),
            Color::rgb(0.86, 0.22, 0.16),
            Color::rgb(0.86, 0.22, 0.16),
            Some(Color::rgb(0.15, 0.15, 0.15)),
        ),
        BlockType::Lava => colors(
            Color::rgb(1.0, 0.5, 0.05),
            Color::rgb(0.9, 0.35, 0.0),
            Color::rgb(0.95, 0.4, 0.02),
            Some(Color::rgb(1.0, 0.85, 0.3)),
        ),
        BlockType::Creeper => colors(
            Color::rgb(0.36, 0.78, 0.33),
            Color::rgb(0.3, 0.68, 0.28),
            Color::rgb(0.33, 0.73, 0.3),
            Some(Color::rgb(0.05, 0.12, 0.05)),
        ),
        BlockType::Skeleton => colors(
            Color::rgb(0.88, 0.88, 0.86),
            Color::rgb(0.78, 0.78, 0.76),
            Color::rgb(0.83, 0.83, 0.81),
            Some(Color::rgb(0.2, 0.2, 0.2)),
        ),
    }
}
