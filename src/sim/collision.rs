//! Axis-aligned collision detection and response
//!
//! The player is a fixed box; every world cube is a box of its own edge
//! length. Overlap is a per-axis half-extent test, nothing more.

use glam::Vec3;

use super::state::{BlockType, Entity, GameEvent, GameState, PlayerState};
use crate::consts::*;

/// Colors for the four explosion layers
const EXPLOSION_LAYERS: [([f32; 3], usize, f32); 4] = [
    ([1.0, 0.95, 0.6], 12, 1.8),
    ([1.0, 0.6, 0.1], 16, 1.4),
    ([0.86, 0.2, 0.15], 14, 1.0),
    ([0.3, 0.3, 0.3], 10, 0.6),
];

/// True when two boxes overlap on all three axes
#[inline]
pub fn aabb_overlap(a_center: Vec3, a_half: Vec3, b_center: Vec3, b_half: Vec3) -> bool {
    let gap = (a_center - b_center).abs();
    gap.cmplt(a_half + b_half).all()
}

/// True when the player's box touches an entity's cube
#[inline]
pub fn player_overlaps(player_pos: Vec3, entity: &Entity) -> bool {
    aabb_overlap(
        player_pos,
        PlayerState::half_extents(),
        entity.pos,
        entity.half_extents(),
    )
}

impl GameState {
    /// Test the player against every live entity and resolve hits
    pub(crate) fn detect_collisions(&mut self) {
        let player_pos = self.player.pos;
        let hits: Vec<usize> = self
            .entities
            .iter()
            .enumerate()
            .filter(|(_, e)| player_overlaps(player_pos, e))
            .map(|(i, _)| i)
            .collect();

        for index in hits {
            self.handle_collision(index);
        }
    }

    fn handle_collision(&mut self, index: usize) {
        let Some(entity) = self.entities.get(index) else {
            return;
        };
        // An entity counts once, and nothing counts after the run has ended
        if entity.collected || !self.is_playing {
            return;
        }
        let kind = entity.kind;
        let pos = entity.pos;

        if kind.is_collectible() {
            self.entities[index].collected = true;
            self.score += GOLD_SCORE;
            self.gold_collected += 1;
            self.spawn_particles(pos, kind.burst_color(), 15, 1.0);
            self.events.push(GameEvent::Collect);

            if self.score >= WIN_SCORE && !self.game_won {
                self.game_won = true;
                self.is_playing = false;
                self.events.push(GameEvent::Win);
                log::info!("Run won with score {}", self.score);
            }
            return;
        }

        // Phasing makes hazards inert
        if self.player.phase_active {
            return;
        }

        self.entities[index].collected = true;
        self.lives = self.lives.saturating_sub(1);
        self.events.push(GameEvent::Hit(kind));

        if kind == BlockType::Tnt {
            self.shake_intensity = SHAKE_EXPLOSION;
            for (color, count, speed) in EXPLOSION_LAYERS {
                self.spawn_particles(pos, color, count, speed);
            }
        } else {
            self.shake_intensity = SHAKE_HIT;
            self.spawn_particles(pos, kind.burst_color(), 20, 1.2);
        }

        if self.lives == 0 {
            self.game_over = true;
            self.is_playing = false;
            self.events.push(GameEvent::GameOver);
            log::info!(
                "Game over at distance {:.1}, score {}",
                self.distance(),
                self.score
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const PLAYER_HALF: Vec3 = Vec3::new(0.3, 0.45, 0.3);
    const UNIT_HALF: Vec3 = Vec3::splat(0.5);

    #[test]
    fn test_identical_centers_collide() {
        assert!(aabb_overlap(Vec3::ZERO, PLAYER_HALF, Vec3::ZERO, UNIT_HALF));
    }

    #[test]
    fn test_offset_beyond_extent_misses() {
        // Half-extent sums are 0.8, 0.95, 0.8; an offset of one full size clears each axis
        assert!(!aabb_overlap(Vec3::ZERO, PLAYER_HALF, Vec3::new(1.0, 0.0, 0.0), UNIT_HALF));
        assert!(!aabb_overlap(Vec3::ZERO, PLAYER_HALF, Vec3::new(0.0, 1.0, 0.0), UNIT_HALF));
        assert!(!aabb_overlap(Vec3::ZERO, PLAYER_HALF, Vec3::new(0.0, 0.0, 1.0), UNIT_HALF));
    }

    #[test]
    fn test_partial_overlap_on_all_axes() {
        assert!(aabb_overlap(
            Vec3::ZERO,
            PLAYER_HALF,
            Vec3::new(0.7, 0.9, -0.7),
            UNIT_HALF
        ));
    }

    #[test]
    fn test_ground_row_does_not_touch_standing_player() {
        let state = GameState::with_seed(crate::sim::Difficulty::Medium, 5);
        let ground = state.entities.iter().find(|e| e.pos == Vec3::new(0.0, GROUND_Y, 0.0));
        let ground = ground.expect("tile under the spawn point");
        assert!(!player_overlaps(Vec3::ZERO, ground));
    }

    /// Player at the origin with nothing else on the track
    fn empty_track() -> GameState {
        let mut state = GameState::with_seed(crate::sim::Difficulty::Medium, 5);
        state.entities.clear();
        state
    }

    #[test]
    fn test_gold_after_fatal_hit_is_ignored() {
        let mut state = empty_track();
        state.lives = 1;
        state.score = WIN_SCORE - GOLD_SCORE;
        state.spawn_entity(BlockType::Stone, Vec3::ZERO, 1.0);
        state.spawn_entity(BlockType::Gold, Vec3::new(0.0, 0.3, 0.0), 0.5);

        state.detect_collisions();
        assert!(state.game_over);
        assert!(!state.game_won);
        assert!(!state.is_playing);
        assert_eq!(state.score, WIN_SCORE - GOLD_SCORE);
        assert!(!state.entities[1].collected);

        let events = state.drain_events();
        assert!(events.contains(&GameEvent::GameOver));
        assert!(!events.contains(&GameEvent::Win));
        assert!(!events.contains(&GameEvent::Collect));
    }

    #[test]
    fn test_hazard_after_win_is_ignored() {
        let mut state = empty_track();
        state.score = WIN_SCORE - GOLD_SCORE;
        let lives = state.lives;
        state.spawn_entity(BlockType::Gold, Vec3::new(0.0, 0.3, 0.0), 0.5);
        state.spawn_entity(BlockType::Stone, Vec3::ZERO, 1.0);

        state.detect_collisions();
        assert!(state.game_won);
        assert!(!state.game_over);
        assert_eq!(state.lives, lives);
        assert!(!state.entities[1].collected);

        let events = state.drain_events();
        assert_eq!(events, vec![GameEvent::Collect, GameEvent::Win]);
    }

    #[test]
    fn test_stacked_hazards_each_cost_one_life() {
        let mut state = empty_track();
        state.player.pos.y = 0.5;
        state.spawn_entity(BlockType::Stone, Vec3::ZERO, 1.0);
        state.spawn_entity(BlockType::Stone, Vec3::new(0.0, 1.0, 0.0), 1.0);
        assert!(state.entities.iter().all(|e| player_overlaps(state.player.pos, e)));

        // Both blocks touch the player, each takes exactly one life
        state.detect_collisions();
        assert_eq!(state.lives, 1);
        assert!(state.entities.iter().all(|e| e.collected));

        // Still overlapping on the next pass, and on a repeated hit
        state.detect_collisions();
        state.handle_collision(0);
        assert_eq!(state.lives, 1);
        let hits = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::Hit(_)))
            .count();
        assert_eq!(hits, 2);
    }

    proptest! {
        #[test]
        fn prop_overlap_matches_per_axis_rule(
            d in prop::array::uniform3(-3.0f32..3.0),
            ha in prop::array::uniform3(0.05f32..1.5),
            hb in prop::array::uniform3(0.05f32..1.5),
        ) {
            let (d, ha, hb) = (Vec3::from_array(d), Vec3::from_array(ha), Vec3::from_array(hb));
            let expected = (0..3).all(|i| d[i].abs() < ha[i] + hb[i]);
            prop_assert_eq!(aabb_overlap(Vec3::ZERO, ha, d, hb), expected);
        }

        #[test]
        fn prop_overlap_symmetric_under_axis_permutation(
            d in prop::array::uniform3(-3.0f32..3.0),
            ha in prop::array::uniform3(0.05f32..1.5),
            hb in prop::array::uniform3(0.05f32..1.5),
        ) {
            let base = aabb_overlap(
                Vec3::ZERO,
                Vec3::from_array(ha),
                Vec3::from_array(d),
                Vec3::from_array(hb),
            );
            let perm = |v: [f32; 3]| Vec3::new(v[2], v[0], v[1]);
            let permuted = aabb_overlap(Vec3::ZERO, perm(ha), perm(d), perm(hb));
            prop_assert_eq!(base, permuted);
            // Swapping the two boxes changes nothing either
            let swapped = aabb_overlap(
                Vec3::from_array(d),
                Vec3::from_array(hb),
                Vec3::ZERO,
                Vec3::from_array(ha),
            );
            prop_assert_eq!(base, swapped);
        }
    }
}
