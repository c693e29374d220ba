//! Per-frame simulation step
//!
//! Advances the run in a fixed order: shake, ability timers, ability trigger,
//! leveling, speed, forward motion, lateral physics, jumping, generation,
//! culling, collisions and particles.

use serde::{Deserialize, Serialize};

use super::state::{GameEvent, GameState};
use crate::consts::*;

/// Input flags sampled once per tick
///
/// Edge detection for `jump` and `phase` happens inside the simulation, so a
/// driver just reports what is currently held.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub phase: bool,
}

const PHASE_COLOR: [f32; 3] = [0.55, 0.35, 1.0];
const PUFF_COLOR: [f32; 3] = [0.95, 0.95, 0.95];

impl GameState {
    /// Advance the simulation by one tick
    pub fn update(&mut self, input: &TickInput, dt_ms: f32) {
        if self.game_won || !self.is_playing {
            return;
        }

        self.time_ticks += 1;
        self.elapsed_ms += dt_ms;

        self.decay_shake();
        self.advance_phase_timers(dt_ms);
        self.trigger_phase(input.phase);
        self.check_level_up();
        self.ease_speed();

        self.player.pos.z += self.speed;

        self.update_lateral(input);
        self.update_vertical(input.jump);

        self.extend_track();
        let cutoff = self.player.pos.z - CULL_MARGIN;
        self.entities.retain(|e| e.pos.z >= cutoff);

        self.detect_collisions();
        self.update_particles();
    }

    fn decay_shake(&mut self) {
        self.shake_intensity *= SHAKE_DECAY;
        if self.shake_intensity < SHAKE_EPSILON {
            self.shake_intensity = 0.0;
        }
    }

    fn advance_phase_timers(&mut self, dt_ms: f32) {
        if self.player.phase_active {
            self.player.phase_time_remaining = (self.player.phase_time_remaining - dt_ms).max(0.0);
            if self.player.phase_time_remaining <= 0.0 {
                self.player.phase_active = false;
                log::debug!("Phase ended");
            }
        }
        if self.player.phase_cooldown > 0.0 {
            self.player.phase_cooldown = (self.player.phase_cooldown - dt_ms).max(0.0);
        }
    }

    fn trigger_phase(&mut self, held: bool) {
        let pressed = held && !self.prev_phase;
        self.prev_phase = held;
        if !pressed || self.player.phase_cooldown > 0.0 {
            return;
        }

        self.player.phase_active = true;
        self.player.phase_time_remaining = PHASE_DURATION_MS;
        self.player.phase_cooldown = PHASE_COOLDOWN_MS;
        let pos = self.player.pos;
        self.spawn_particles(pos, PHASE_COLOR, 30, 1.5);
        self.events.push(GameEvent::PhaseActivated);
        log::debug!("Phase activated at z={:.1}", pos.z);
    }

    fn check_level_up(&mut self) {
        if self.gold_collected < self.level_target {
            return;
        }
        self.level += 1;
        self.gold_collected = 0;
        self.level_target += LEVEL_TARGET_INCREMENT;
        if self.difficulty.scales_with_level() {
            // The bump never pushes past the tier's ceiling
            let max = self.difficulty.config().max_speed;
            self.speed = (self.speed + LEVEL_UP_SPEED_BUMP).min(max).max(self.speed);
        }
        self.events.push(GameEvent::LevelUp(self.level));
        log::info!("Level {} reached (next target {})", self.level, self.level_target);
    }

    fn ease_speed(&mut self) {
        let target = self.difficulty.target_speed(self.level);
        if self.speed < target {
            let accel = self.difficulty.config().acceleration;
            self.speed = (self.speed + accel).min(target);
        }
    }

    fn update_lateral(&mut self, input: &TickInput) {
        let player = &mut self.player;
        if input.left {
            player.vel.x -= LATERAL_ACCEL;
        }
        if input.right {
            player.vel.x += LATERAL_ACCEL;
        }
        player.vel.x *= LATERAL_FRICTION;
        player.vel.x = player.vel.x.clamp(-MAX_LATERAL_SPEED, MAX_LATERAL_SPEED);
        player.pos.x += player.vel.x;
        player.tilt = -player.vel.x * TILT_FACTOR;

        if player.pos.x.abs() >= PLAYER_X_LIMIT {
            player.pos.x = player.pos.x.clamp(-PLAYER_X_LIMIT, PLAYER_X_LIMIT);
            player.vel.x = 0.0;
        }
    }

    fn update_vertical(&mut self, held: bool) {
        let pressed = held && !self.prev_jump;
        self.prev_jump = held;

        if pressed {
            if self.player.is_grounded() {
                self.player.vel.y = JUMP_FORCE;
                self.player.is_jumping = true;
                self.player.jump_count = 1;
                self.events.push(GameEvent::Jump);
            } else if self.player.jump_count < 2 {
                self.player.vel.y = DOUBLE_JUMP_FORCE;
                self.player.jump_count = 2;
                let pos = self.player.pos;
                self.spawn_particles(pos, PUFF_COLOR, 8, 0.5);
                self.events.push(GameEvent::DoubleJump);
            }
        }

        self.player.vel.y -= GRAVITY;
        self.player.pos.y += self.player.vel.y;

        if self.player.pos.y <= 0.0 {
            self.player.pos.y = 0.0;
            self.player.vel.y = 0.0;
            self.player.is_jumping = false;
            self.player.jump_count = 0;
        }
    }

    fn extend_track(&mut self) {
        let last_generated = (self.next_slice_z - 1) as f32;
        if self.player.pos.z + RENDER_DISTANCE > last_generated {
            let z = self.next_slice_z;
            self.generate_slice(z);
            self.next_slice_z += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::BlockType;
    use crate::sim::Difficulty;
    use glam::Vec3;

    const DT: f32 = FRAME_MS;

    fn jump() -> TickInput {
        TickInput {
            jump: true,
            ..Default::default()
        }
    }

    fn phase() -> TickInput {
        TickInput {
            phase: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_jump_and_double_jump() {
        let mut state = GameState::with_seed(Difficulty::Medium, 1);
        state.update(&jump(), DT);
        assert!(state.player.is_jumping);
        assert_eq!(state.player.jump_count, 1);
        assert!((state.player.vel.y - (JUMP_FORCE - GRAVITY)).abs() < 1e-6);

        // Held without release: no second jump
        state.update(&jump(), DT);
        assert_eq!(state.player.jump_count, 1);
        assert!((state.player.vel.y - (JUMP_FORCE - 2.0 * GRAVITY)).abs() < 1e-6);

        // Release, then press again mid-air
        state.update(&TickInput::default(), DT);
        state.update(&jump(), DT);
        assert_eq!(state.player.jump_count, 2);
        assert!((state.player.vel.y - (DOUBLE_JUMP_FORCE - GRAVITY)).abs() < 1e-6);
        assert!(DOUBLE_JUMP_FORCE < JUMP_FORCE);

        // A third press does nothing
        state.update(&TickInput::default(), DT);
        state.update(&jump(), DT);
        assert_eq!(state.player.jump_count, 2);
    }

    #[test]
    fn test_jump_lands() {
        let mut state = GameState::with_seed(Difficulty::Medium, 1);
        state.update(&jump(), DT);
        for _ in 0..60 {
            state.update(&TickInput::default(), DT);
        }
        assert!(!state.player.is_jumping);
        assert_eq!(state.player.jump_count, 0);
        assert_eq!(state.player.pos.y, 0.0);
        assert_eq!(state.player.vel.y, 0.0);
    }

    #[test]
    fn test_forward_motion_is_automatic() {
        let mut state = GameState::with_seed(Difficulty::Medium, 1);
        let speed = state.speed;
        state.update(&TickInput::default(), DT);
        assert!(state.player.pos.z >= speed);
        assert_eq!(state.snapshot().distance, state.player.pos.z);
    }

    #[test]
    fn test_lateral_clamped_to_track() {
        let mut state = GameState::with_seed(Difficulty::Medium, 1);
        let right = TickInput {
            right: true,
            ..Default::default()
        };
        for _ in 0..60 {
            state.update(&right, DT);
            assert!(state.player.vel.x.abs() <= MAX_LATERAL_SPEED);
            assert!(state.player.pos.x <= PLAYER_X_LIMIT);
        }
        assert_eq!(state.player.pos.x, PLAYER_X_LIMIT);
    }

    #[test]
    fn test_tilt_banks_against_motion() {
        let mut state = GameState::with_seed(Difficulty::Medium, 1);
        let left = TickInput {
            left: true,
            ..Default::default()
        };
        state.update(&left, DT);
        assert!(state.player.vel.x < 0.0);
        assert!(state.player.tilt > 0.0);
        assert!((state.player.tilt + state.player.vel.x * TILT_FACTOR).abs() < 1e-6);
    }

    #[test]
    fn test_phase_edge_and_timers() {
        let mut state = GameState::with_seed(Difficulty::Medium, 1);
        state.update(&phase(), DT);
        assert!(state.player.phase_active);
        assert_eq!(state.player.phase_time_remaining, PHASE_DURATION_MS);
        assert_eq!(state.player.phase_cooldown, PHASE_COOLDOWN_MS);
        assert!(!state.particles.is_empty());

        // Holding the key does not retrigger and the timers tick
        state.update(&phase(), 1000.0);
        assert_eq!(state.player.phase_time_remaining, PHASE_DURATION_MS - 1000.0);
        assert_eq!(state.player.phase_cooldown, PHASE_COOLDOWN_MS - 1000.0);

        state.update(&TickInput::default(), 4000.0);
        assert!(!state.player.phase_active);

        // Still cooling down
        state.update(&phase(), 1000.0);
        assert!(!state.player.phase_active);

        state.update(&TickInput::default(), 4000.0);
        assert_eq!(state.player.phase_cooldown, 0.0);
        state.update(&phase(), DT);
        assert!(state.player.phase_active);
    }

    #[test]
    fn test_phase_suppresses_hazards() {
        let hazards = [
            BlockType::Stone,
            BlockType::Tnt,
            BlockType::Lava,
            BlockType::Creeper,
            BlockType::Skeleton,
        ];
        for kind in hazards {
            let mut state = GameState::with_seed(Difficulty::Medium, 1);
            state.spawn_entity(kind, Vec3::new(0.0, 0.0, 0.1), 1.0);
            state.update(&phase(), DT);
            for _ in 0..10 {
                state.update(&TickInput::default(), DT);
                assert!(state.player.phase_time_remaining > 0.0);
            }
            assert_eq!(state.lives, 3, "{kind:?}");
        }
    }

    #[test]
    fn test_hazard_costs_one_life_across_ticks() {
        let mut state = GameState::with_seed(Difficulty::Medium, 1);
        state.spawn_entity(BlockType::Stone, Vec3::new(0.0, 0.0, 0.1), 1.0);
        state.spawn_entity(BlockType::Tnt, Vec3::new(0.0, 1.0, 0.1), 1.0);
        state.update(&TickInput::default(), DT);
        // The Tnt one block up clears a standing player
        assert_eq!(state.lives, 2);
        assert!(state.shake_intensity > 0.0);
        state.update(&TickInput::default(), DT);
        assert_eq!(state.lives, 2);
        assert!(state.drain_events().contains(&GameEvent::Hit(BlockType::Stone)));
    }

    #[test]
    fn test_gold_collects_once() {
        let mut state = GameState::with_seed(Difficulty::Medium, 1);
        let id = state.spawn_entity(BlockType::Gold, Vec3::new(0.0, 0.3, 0.1), GOLD_SIZE);
        state.update(&TickInput::default(), DT);
        assert_eq!(state.score, GOLD_SCORE);
        assert_eq!(state.score, 10);
        let gold = state.entities.iter().find(|e| e.id == id).map(|e| e.collected);
        assert_eq!(gold, Some(true));

        state.update(&TickInput::default(), DT);
        assert_eq!(state.score, 10);
        assert_eq!(state.gold_collected, 1);
    }

    #[test]
    fn test_level_up_after_target() {
        let mut state = GameState::with_seed(Difficulty::Medium, 1);
        assert_eq!(state.level_target, LEVEL_TARGET_BASE);
        for _ in 0..LEVEL_TARGET_BASE {
            state.spawn_entity(BlockType::Gold, Vec3::new(0.0, 0.3, 0.1), GOLD_SIZE);
        }
        state.update(&TickInput::default(), DT);
        assert_eq!(state.gold_collected, LEVEL_TARGET_BASE);
        assert_eq!(state.level, 1);

        let speed_before = state.speed;
        state.update(&TickInput::default(), DT);
        assert_eq!(state.level, 2);
        assert_eq!(state.gold_collected, 0);
        assert_eq!(state.level_target, LEVEL_TARGET_BASE + LEVEL_TARGET_INCREMENT);
        assert!(state.speed > speed_before);
        assert!(state.speed <= Difficulty::Medium.config().max_speed);
    }

    #[test]
    fn test_easy_level_up_keeps_speed() {
        let mut state = GameState::with_seed(Difficulty::Easy, 1);
        state.gold_collected = state.level_target;
        state.update(&TickInput::default(), DT);
        assert_eq!(state.level, 2);
        assert_eq!(state.speed, Difficulty::Easy.config().start_speed);
    }

    #[test]
    fn test_speed_never_decreases() {
        let mut state = GameState::with_seed(Difficulty::Hard, 1);
        state.level = 8;
        let mut last = state.speed;
        for _ in 0..500 {
            state.update(&TickInput::default(), DT);
            if !state.is_playing {
                break;
            }
            assert!(state.speed >= last);
            assert!(state.speed <= Difficulty::Hard.config().max_speed);
            last = state.speed;
        }
    }

    #[test]
    fn test_win_at_threshold() {
        let mut state = GameState::with_seed(Difficulty::Medium, 1);
        state.score = WIN_SCORE - GOLD_SCORE;
        state.spawn_entity(BlockType::Gold, Vec3::new(0.0, 0.3, 0.1), GOLD_SIZE);
        state.update(&TickInput::default(), DT);
        let snap = state.snapshot();
        assert_eq!(snap.score, 250);
        assert!(snap.game_won);
        assert!(!snap.is_playing);

        // Further updates are no-ops
        let z = state.player.pos.z;
        state.update(&TickInput::default(), DT);
        assert_eq!(state.player.pos.z, z);
    }

    #[test]
    fn test_game_over_at_zero_lives() {
        let mut state = GameState::with_seed(Difficulty::Medium, 1);
        state.lives = 1;
        state.spawn_entity(BlockType::Skeleton, Vec3::new(0.0, 0.0, 0.1), 1.0);
        state.update(&TickInput::default(), DT);
        assert_eq!(state.lives, 0);
        assert!(state.game_over);
        assert!(!state.is_playing);
        assert!(state.drain_events().contains(&GameEvent::GameOver));
    }

    #[test]
    fn test_shake_decays_to_zero() {
        let mut state = GameState::with_seed(Difficulty::Medium, 1);
        state.shake_intensity = SHAKE_EXPLOSION;
        state.update(&TickInput::default(), DT);
        assert!((state.shake_intensity - SHAKE_EXPLOSION * SHAKE_DECAY).abs() < 1e-4);
        // Stays inside the hazard-free warm-up stretch
        for _ in 0..60 {
            state.update(&TickInput::default(), DT);
        }
        assert_eq!(state.shake_intensity, 0.0);
    }

    #[test]
    fn test_track_streams_and_culls() {
        let mut state = GameState::with_seed(Difficulty::Easy, 1);
        state.make_unkillable();
        for _ in 0..600 {
            state.update(&TickInput::default(), DT);
        }
        let z = state.player.pos.z;
        assert!(state.entities.iter().all(|e| e.pos.z >= z - CULL_MARGIN));
        let furthest = state.entities.iter().map(|e| e.pos.z).fold(f32::MIN, f32::max);
        assert!(furthest + 1.0 >= z + RENDER_DISTANCE);
    }

    #[test]
    fn test_missing_input_fields_default_inactive() {
        let input: TickInput = serde_json::from_str(r#"{"left": true}"#).unwrap();
        assert!(input.left);
        assert!(!input.phase);
        assert!(!input.jump);
    }

    impl GameState {
        /// Keep a long run alive regardless of what spawns
        fn make_unkillable(&mut self) {
            self.lives = u32::MAX;
        }
    }
}
