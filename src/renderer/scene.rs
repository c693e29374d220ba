//! Painter's-algorithm scene renderer
//!
//! Every frame the snapshot's cubes, figures and particles are merged into one
//! list, sorted far to near by distance from the camera, and drawn in that
//! order onto a [`Surface`]. No depth buffer is involved.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::camera::{Camera, apply_fog};
use super::color::{BlockColors, Color, palette};
use super::cube::{Face, Quad, cube_corners, project_corners, visible_faces};
use super::decor::{FaceContext, decorate};
use super::figure::{FigureColors, draw_figure, pose};
use super::overlay;
use super::surface::Surface;
use crate::consts::*;
use crate::sim::{BlockType, Entity, Particle, Snapshot};

/// Non-gold faces while phase is active
const PHASE_FACE_ALPHA: f32 = 0.4;
const PHASE_SHELL_ALPHA: f32 = 0.3;
const PHASE_SHELL_HALF: f32 = 0.6;
const PHASE_SHELL_COLOR: Color = Color::rgb(0.6, 0.4, 1.0);
const EDGE_ALPHA: f32 = 0.35;
const LABEL_SIZE: f32 = 12.0;
/// Feet sit half a unit below the collision center
const FIGURE_ROOT_DROP: f32 = 0.5;

/// Another runner drawn alongside the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Companion {
    pub name: String,
    pub pos: Vec3,
    #[serde(default)]
    pub is_jumping: bool,
}

/// Toggles the renderer reads every frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    /// Per-type face decorations
    pub detail: bool,
    pub speed_lines: bool,
    pub crosshair: bool,
    /// Screen shake multiplier (0 disables)
    pub screen_shake: f32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            detail: true,
            speed_lines: true,
            crosshair: true,
            screen_shake: 1.0,
        }
    }
}

/// What one frame drew
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub blocks: usize,
    pub culled: usize,
    pub faces: usize,
    pub figures: usize,
    pub particles: usize,
}

#[derive(Debug, Clone, Copy)]
enum Drawable<'a> {
    Block(&'a Entity),
    PhaseShell(Vec3),
    Player,
    Companion(&'a Companion),
    Particle(&'a Particle),
}

/// Stateless apart from its options; one instance can render any snapshot
#[derive(Debug, Clone, Default)]
pub struct SceneRenderer {
    pub options: RenderOptions,
}

impl SceneRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Camera for a snapshot, including screen shake
    pub fn camera(&self, snap: &Snapshot, width: f32, height: f32) -> Camera {
        Camera::follow(&snap.player, width, height)
            .shaken(snap.shake_intensity * self.options.screen_shake, snap.elapsed_ms)
    }

    /// Draw one complete frame
    pub fn render(
        &self,
        snap: &Snapshot,
        companions: &[Companion],
        surface: &mut dyn Surface,
    ) -> FrameStats {
        let camera = self.camera(snap, surface.width(), surface.height());
        let mut stats = FrameStats::default();

        surface.set_alpha(1.0);
        overlay::draw_sky(surface);

        for (_, drawable) in self.draw_list(&camera, snap, companions) {
            match drawable {
                Drawable::Block(entity) => {
                    self.draw_block(surface, &camera, snap, entity, &mut stats)
                }
                Drawable::PhaseShell(center) => {
                    self.draw_phase_shell(surface, &camera, center, &mut stats)
                }
                Drawable::Player => {
                    let root = snap.player.pos - Vec3::Y * FIGURE_ROOT_DROP;
                    let airborne = !snap.player.is_grounded();
                    let colors = FigureColors::PLAYER;
                    let boxes = pose(root, snap.elapsed_ms * 0.001, airborne, &colors);
                    draw_figure(surface, &camera, &boxes, &colors);
                    stats.figures += 1;
                }
                Drawable::Companion(companion) => {
                    let root = companion.pos - Vec3::Y * FIGURE_ROOT_DROP;
                    let colors = FigureColors::COMPANION;
                    let boxes = pose(root, snap.elapsed_ms * 0.001, companion.is_jumping, &colors);
                    if let Some(head) = draw_figure(surface, &camera, &boxes, &colors) {
                        surface.fill_text(&companion.name, head, LABEL_SIZE, Color::WHITE);
                    }
                    stats.figures += 1;
                }
                Drawable::Particle(particle) => {
                    self.draw_particle(surface, &camera, particle, &mut stats)
                }
            }
        }

        surface.set_alpha(1.0);
        if self.options.speed_lines {
            let max_speed = snap.difficulty.config().max_speed;
            overlay::draw_speed_lines(surface, snap.speed, max_speed, snap.elapsed_ms);
        }
        if snap.player.phase_active {
            overlay::draw_phase_tint(surface, snap.player.phase_time_remaining);
        }
        if self.options.crosshair {
            overlay::draw_crosshair(surface, snap.player.phase_active);
        }
        stats
    }

    /// Every drawable with its camera distance, farthest first
    fn draw_list<'a>(
        &self,
        camera: &Camera,
        snap: &'a Snapshot,
        companions: &'a [Companion],
    ) -> Vec<(f32, Drawable<'a>)> {
        let eye = camera.position;
        let capacity = snap.entities.len() + snap.particles.len() + companions.len() + 2;
        let mut list: Vec<(f32, Drawable<'a>)> = Vec::with_capacity(capacity);

        list.extend(
            snap.entities
                .iter()
                .filter(|e| !e.collected)
                .map(|e| (e.pos.distance(eye), Drawable::Block(e))),
        );
        list.push((snap.player.pos.distance(eye), Drawable::Player));
        if snap.player.phase_active {
            // Slightly nearer than the figure so the shell draws over it
            let near = snap.player.pos.distance(eye) - 0.01;
            list.push((near, Drawable::PhaseShell(snap.player.pos)));
        }
        list.extend(companions.iter().map(|c| (c.pos.distance(eye), Drawable::Companion(c))));
        list.extend(snap.particles.iter().map(|p| (p.pos.distance(eye), Drawable::Particle(p))));

        list.sort_by(|a, b| b.0.total_cmp(&a.0));
        list
    }

    fn draw_block(
        &self,
        surface: &mut dyn Surface,
        camera: &Camera,
        snap: &Snapshot,
        entity: &Entity,
        stats: &mut FrameStats,
    ) {
        let half = entity.half_extents();
        let Some(quads) = visible_quads(camera, entity.pos, half) else {
            stats.culled += 1;
            return;
        };
        let depth = match camera.project(entity.pos) {
            Some(p) if p.depth <= FOG_DISTANCE => p.depth,
            _ => {
                stats.culled += 1;
                return;
            }
        };

        let colors = palette(entity.kind);
        let ghosted = snap.player.phase_active && entity.kind != BlockType::Gold;
        surface.set_alpha(if ghosted { PHASE_FACE_ALPHA } else { 1.0 });

        let spin = entity.rotation.unwrap_or(0.0) + snap.elapsed_ms * 0.003;
        for (face, quad) in &quads {
            surface.fill_polygon(quad.points(), apply_fog(face_color(&colors, *face), depth));
            if self.options.detail {
                let ctx = FaceContext {
                    kind: entity.kind,
                    face: *face,
                    quad,
                    colors: &colors,
                    depth,
                    spin,
                };
                decorate(surface, &ctx);
            }
            draw_edges(surface, quad, depth);
        }

        surface.set_alpha(1.0);
        stats.blocks += 1;
        stats.faces += quads.len();
    }

    fn draw_phase_shell(
        &self,
        surface: &mut dyn Surface,
        camera: &Camera,
        center: Vec3,
        stats: &mut FrameStats,
    ) {
        let Some(quads) = visible_quads(camera, center, Vec3::splat(PHASE_SHELL_HALF)) else {
            return;
        };
        let depth = center.distance(camera.position);
        surface.set_alpha(PHASE_SHELL_ALPHA);
        for (face, quad) in &quads {
            let color = match face {
                Face::Top => PHASE_SHELL_COLOR,
                _ => PHASE_SHELL_COLOR.shade(0.8),
            };
            surface.fill_polygon(quad.points(), apply_fog(color, depth));
        }
        surface.set_alpha(1.0);
        stats.faces += quads.len();
    }

    fn draw_particle(
        &self,
        surface: &mut dyn Surface,
        camera: &Camera,
        particle: &Particle,
        stats: &mut FrameStats,
    ) {
        let Some(p) = camera.project(particle.pos) else {
            return;
        };
        if p.depth > FOG_DISTANCE {
            return;
        }
        let size = (particle.size * p.scale).max(1.0);
        let color = apply_fog(Color::from_array(particle.color), p.depth)
            .with_alpha(particle.life.clamp(0.0, 1.0));
        surface.fill_rect(p.x - size * 0.5, p.y - size * 0.5, size, size, color);
        stats.particles += 1;
    }
}

/// Visible faces of an axis-aligned cube, or `None` if any of them reaches behind the camera
fn visible_quads(camera: &Camera, center: Vec3, half: Vec3) -> Option<Vec<(Face, Quad)>> {
    let faces = visible_faces(center, half, camera.position);
    let projected = project_corners(camera, &cube_corners(center, half));
    faces
        .into_iter()
        .map(|face| Quad::from_face(&projected, face).map(|q| (face, q)))
        .collect()
}

fn face_color(colors: &BlockColors, face: Face) -> Color {
    match face {
        Face::Top => colors.top,
        Face::Front | Face::Back => colors.front,
        Face::Left | Face::Right => colors.side,
        Face::Bottom => colors.side.shade(0.6),
    }
}

fn draw_edges(surface: &mut dyn Surface, quad: &Quad, depth: f32) {
    let fade = (1.0 - depth / FOG_DISTANCE).clamp(0.0, 1.0);
    if fade <= 0.0 {
        return;
    }
    surface.stroke_polygon(quad.points(), Color::rgba(0.0, 0.0, 0.0, EDGE_ALPHA * fade), 1.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::vertex::VertexBatch;
    use crate::sim::{Difficulty, GameState};

    fn state_with(entities: Vec<Entity>) -> GameState {
        let mut state = GameState::with_seed(Difficulty::Medium, 3);
        state.entities = entities;
        state.particles.clear();
        state
    }

    fn block(id: u32, kind: BlockType, pos: Vec3) -> Entity {
        Entity {
            id,
            kind,
            pos,
            size: 1.0,
            collected: false,
            rotation: None,
        }
    }

    fn plain() -> SceneRenderer {
        SceneRenderer::new(RenderOptions {
            detail: false,
            speed_lines: false,
            crosshair: false,
            screen_shake: 0.0,
        })
    }

    fn count_alpha(batch: &VertexBatch, alpha: f32) -> usize {
        batch.vertices.iter().filter(|v| (v.color[3] - alpha).abs() < 1e-6).count()
    }

    #[test]
    fn test_fresh_session_renders() {
        let state = GameState::with_seed(Difficulty::Medium, 11);
        let mut batch = VertexBatch::new(800.0, 600.0);
        let stats = SceneRenderer::default().render(&state.snapshot(), &[], &mut batch);
        assert!(stats.blocks > 20);
        assert_eq!(stats.figures, 1);
        assert!(batch.triangle_count() > stats.faces * 2);
    }

    #[test]
    fn test_draw_list_is_far_to_near() {
        let state = state_with(vec![
            block(1, BlockType::Stone, Vec3::new(0.0, 0.0, 3.0)),
            block(2, BlockType::Stone, Vec3::new(1.0, 0.0, 15.0)),
            block(3, BlockType::Gold, Vec3::new(-1.0, 0.3, 8.0)),
        ]);
        let snap = state.snapshot();
        let renderer = plain();
        let camera = renderer.camera(&snap, 800.0, 600.0);
        let list = renderer.draw_list(&camera, &snap, &[]);
        assert_eq!(list.len(), 4);
        assert!(list.windows(2).all(|w| w[0].0 >= w[1].0));
        // The runner is nearer than every block
        assert!(matches!(list.last(), Some((_, Drawable::Player))));
    }

    #[test]
    fn test_blocks_behind_or_past_fog_are_culled() {
        let state = state_with(vec![
            block(1, BlockType::Stone, Vec3::new(0.0, 0.0, -8.0)),
            block(2, BlockType::Stone, Vec3::new(0.0, 0.0, 40.0)),
            block(3, BlockType::Stone, Vec3::new(0.0, 0.0, 6.0)),
        ]);
        let mut batch = VertexBatch::new(800.0, 600.0);
        let stats = plain().render(&state.snapshot(), &[], &mut batch);
        assert_eq!(stats.blocks, 1);
        assert_eq!(stats.culled, 2);
    }

    #[test]
    fn test_collected_blocks_are_skipped() {
        let mut gold = block(1, BlockType::Gold, Vec3::new(0.0, 0.3, 6.0));
        gold.collected = true;
        let state = state_with(vec![gold]);
        let mut batch = VertexBatch::new(800.0, 600.0);
        let stats = plain().render(&state.snapshot(), &[], &mut batch);
        assert_eq!(stats.blocks + stats.culled, 0);
    }

    #[test]
    fn test_phase_ghosts_everything_but_gold() {
        let mut state = state_with(vec![block(1, BlockType::Stone, Vec3::new(1.0, 0.0, 6.0))]);
        let renderer = plain();

        let mut solid = VertexBatch::new(800.0, 600.0);
        renderer.render(&state.snapshot(), &[], &mut solid);
        assert_eq!(count_alpha(&solid, PHASE_FACE_ALPHA), 0);

        state.player.phase_active = true;
        state.player.phase_time_remaining = 3000.0;
        let mut ghosted = VertexBatch::new(800.0, 600.0);
        let stats = renderer.render(&state.snapshot(), &[], &mut ghosted);
        assert!(count_alpha(&ghosted, PHASE_FACE_ALPHA) > 0);
        // Shell faces around the runner
        assert!(count_alpha(&ghosted, PHASE_SHELL_ALPHA) > 0);
        assert!(stats.faces > 3);

        state.entities = vec![block(1, BlockType::Gold, Vec3::new(1.0, 0.3, 6.0))];
        let mut gold = VertexBatch::new(800.0, 600.0);
        renderer.render(&state.snapshot(), &[], &mut gold);
        assert_eq!(count_alpha(&gold, PHASE_FACE_ALPHA), 0);
    }

    #[test]
    fn test_companion_gets_name_label() {
        let state = state_with(Vec::new());
        let companions = vec![Companion {
            name: "Alex".to_string(),
            pos: Vec3::new(1.5, 0.0, 2.0),
            is_jumping: false,
        }];
        let mut batch = VertexBatch::new(800.0, 600.0);
        let stats = plain().render(&state.snapshot(), &companions, &mut batch);
        assert_eq!(stats.figures, 2);
        assert_eq!(batch.labels.len(), 1);
        assert_eq!(batch.labels[0].text, "Alex");
    }

    #[test]
    fn test_detail_toggle_changes_output() {
        let state = state_with(vec![block(1, BlockType::Tnt, Vec3::new(1.0, 0.0, 5.0))]);
        let mut bare = VertexBatch::new(800.0, 600.0);
        let mut rich = VertexBatch::new(800.0, 600.0);
        plain().render(&state.snapshot(), &[], &mut bare);
        SceneRenderer::new(RenderOptions {
            detail: true,
            ..plain().options
        })
        .render(&state.snapshot(), &[], &mut rich);
        assert!(rich.triangle_count() > bare.triangle_count());
    }

    #[test]
    fn test_particles_fade_with_life() {
        let mut state = state_with(Vec::new());
        state.particles.push(Particle {
            id: 1,
            pos: Vec3::new(0.0, 0.5, 4.0),
            vel: Vec3::ZERO,
            life: 0.25,
            color: [1.0, 0.0, 0.0],
            size: 0.1,
        });
        let mut batch = VertexBatch::new(800.0, 600.0);
        let stats = plain().render(&state.snapshot(), &[], &mut batch);
        assert_eq!(stats.particles, 1);
        assert!(count_alpha(&batch, 0.25) >= 6);
    }
}
