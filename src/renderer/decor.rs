//! Per-block-type face decoration
//!
//! Every detail is a sub-rectangle of the face in UV space, mapped onto the
//! projected quad with [`Quad::sub`].

use super::camera::apply_fog;
use super::color::{BlockColors, Color};
use super::cube::{Face, Quad};
use super::surface::Surface;
use crate::sim::BlockType;

/// Beyond this depth the Tnt label is too small to bother with
const TNT_LABEL_DEPTH: f32 = 15.0;
const SPECKLE_COUNT: u32 = 6;
const SPECKLE_SIZE: f32 = 0.12;

/// What the decorator needs to know about the face being drawn
pub struct FaceContext<'a> {
    pub kind: BlockType,
    pub face: Face,
    pub quad: &'a Quad,
    pub colors: &'a BlockColors,
    pub depth: f32,
    /// Gold spin phase plus animation time
    pub spin: f32,
}

impl FaceContext<'_> {
    fn is_side(&self) -> bool {
        matches!(self.face, Face::Front | Face::Left | Face::Right | Face::Back)
    }

    fn fill(&self, surface: &mut dyn Surface, u0: f32, v0: f32, u1: f32, v1: f32, color: Color) {
        let sub = self.quad.sub(u0, v0, u1, v1);
        surface.fill_polygon(sub.points(), apply_fog(color, self.depth));
    }
}

/// Layer type-specific details over a face's base color
pub fn decorate(surface: &mut dyn Surface, ctx: &FaceContext<'_>) {
    let detail = ctx.colors.detail.unwrap_or(ctx.colors.side.shade(0.7));

    match ctx.kind {
        BlockType::Grass => {
            if ctx.is_side() {
                // Overhang from the top
                ctx.fill(surface, 0.0, 0.0, 1.0, 0.2, ctx.colors.top);
                ctx.fill(surface, 0.1, 0.2, 0.25, 0.32, detail);
                ctx.fill(surface, 0.55, 0.2, 0.7, 0.28, detail);
            }
        }
        BlockType::Dirt => {}
        BlockType::Stone => speckles(surface, ctx, detail),
        BlockType::Leaves => speckles(surface, ctx, detail),
        BlockType::Wood => {
            if ctx.face == Face::Top {
                let ring = ctx.quad.sub(0.25, 0.25, 0.75, 0.75);
                surface.stroke_polygon(ring.points(), apply_fog(detail, ctx.depth), 1.0);
            } else {
                ctx.fill(surface, 0.28, 0.0, 0.34, 1.0, detail);
                ctx.fill(surface, 0.64, 0.0, 0.7, 1.0, detail);
            }
        }
        BlockType::Gold => {
            let bevel = ctx.quad.sub(0.08, 0.08, 0.92, 0.92);
            let edge = apply_fog(ctx.colors.side.shade(0.8), ctx.depth);
            surface.stroke_polygon(bevel.points(), edge, 1.5);
            let drift = ctx.spin.sin() * 0.1;
            ctx.fill(surface, 0.2 + drift, 0.2, 0.45 + drift, 0.4, detail);
        }
        BlockType::Tnt => {
            if ctx.is_side() && ctx.depth < TNT_LABEL_DEPTH {
                ctx.fill(surface, 0.0, 0.35, 1.0, 0.65, Color::WHITE);
                ctx.fill(surface, 0.3, 0.42, 0.7, 0.58, detail);
            } else if ctx.face == Face::Top {
                ctx.fill(surface, 0.4, 0.4, 0.6, 0.6, detail);
            }
        }
        BlockType::Lava => {
            let glow = 0.5 + 0.5 * ctx.spin.sin();
            let hot = detail.mix(ctx.colors.top, glow);
            ctx.fill(surface, 0.15, 0.2, 0.55, 0.45, hot);
            ctx.fill(surface, 0.5, 0.6, 0.85, 0.8, hot);
        }
        BlockType::Creeper => {
            if ctx.face == Face::Front {
                // Eyes
                ctx.fill(surface, 0.15, 0.2, 0.4, 0.42, detail);
                ctx.fill(surface, 0.6, 0.2, 0.85, 0.42, detail);
                // Nose and frown
                ctx.fill(surface, 0.4, 0.42, 0.6, 0.65, detail);
                ctx.fill(surface, 0.28, 0.55, 0.4, 0.85, detail);
                ctx.fill(surface, 0.6, 0.55, 0.72, 0.85, detail);
            } else {
                speckles(surface, ctx, ctx.colors.side.shade(0.85));
            }
        }
        BlockType::Skeleton => {
            if ctx.face == Face::Front {
                ctx.fill(surface, 0.18, 0.25, 0.4, 0.45, detail);
                ctx.fill(surface, 0.6, 0.25, 0.82, 0.45, detail);
                ctx.fill(surface, 0.45, 0.5, 0.55, 0.6, detail);
                ctx.fill(surface, 0.25, 0.7, 0.75, 0.76, detail);
            }
        }
    }
}

/// Scatter small squares seeded from the quad's screen position
///
/// A block that doesn't move on screen keeps the same pattern every frame.
fn speckles(surface: &mut dyn Surface, ctx: &FaceContext<'_>, color: Color) {
    let anchor = ctx.quad.0[0];
    let mut seed = speckle_seed(anchor.x, anchor.y, ctx.face);
    for _ in 0..SPECKLE_COUNT {
        let u = 0.05 + next_unit(&mut seed) * (0.9 - SPECKLE_SIZE);
        let v = 0.05 + next_unit(&mut seed) * (0.9 - SPECKLE_SIZE);
        ctx.fill(surface, u, v, u + SPECKLE_SIZE, v + SPECKLE_SIZE, color);
    }
}

fn speckle_seed(x: f32, y: f32, face: Face) -> u32 {
    let xi = x.round() as i32 as u32;
    let yi = y.round() as i32 as u32;
    xi.wrapping_mul(73_856_093)
        ^ yi.wrapping_mul(19_349_663)
        ^ (face as u32).wrapping_mul(83_492_791)
}

/// xorshift step mapped to [0, 1)
fn next_unit(seed: &mut u32) -> f32 {
    let mut x = *seed | 1;
    x ^= x << 13;
    x ^= x >> 17;
    x ^= x << 5;
    *seed = x;
    (x >> 8) as f32 / (1u32 << 24) as f32
}
