//! Procedural track generation, one z-slice at a time

use glam::Vec3;
use rand::Rng;

use super::state::{BlockType, GameState};
use crate::consts::*;

/// Hazards unlocked at a given level
pub fn hazard_pool(level: u32) -> &'static [BlockType] {
    const BASE: [BlockType; 2] = [BlockType::Stone, BlockType::Tnt];
    const WITH_CREEPER: [BlockType; 3] = [BlockType::Stone, BlockType::Tnt, BlockType::Creeper];
    const WITH_SKELETON: [BlockType; 4] = [
        BlockType::Stone,
        BlockType::Tnt,
        BlockType::Creeper,
        BlockType::Skeleton,
    ];
    match level {
        0..=1 => &BASE,
        2 => &WITH_CREEPER,
        _ => &WITH_SKELETON,
    }
}

/// Probability that a slice carries a hazard
pub fn hazard_probability(base_chance: f32, level: u32) -> f32 {
    let bonus = level.saturating_sub(1) as f32 * HAZARD_CHANCE_PER_LEVEL;
    (base_chance + bonus).min(MAX_HAZARD_CHANCE)
}

/// Decorative bob for floating gold, keyed to z
#[inline]
pub fn gold_height(z: f32) -> f32 {
    GOLD_BASE_Y + (z * GOLD_BOB_FREQUENCY).sin() * GOLD_BOB_AMPLITUDE
}

impl GameState {
    /// Populate one slice of track at `z`
    pub(crate) fn generate_slice(&mut self, z: i32) {
        let zf = z as f32;

        for lane in -TRACK_HALF_WIDTH..=TRACK_HALF_WIDTH {
            // Mostly grass with the odd dirt patch
            let kind = if self.rng.random::<f32>() < 0.1 {
                BlockType::Dirt
            } else {
                BlockType::Grass
            };
            self.spawn_entity(kind, Vec3::new(lane as f32, GROUND_Y, zf), 1.0);
        }

        if zf <= WARMUP_DISTANCE {
            return;
        }

        let hazard_p = hazard_probability(self.difficulty.config().hazard_chance, self.level);
        let roll = self.rng.random::<f32>();
        let lane = self.rng.random_range(-TRACK_HALF_WIDTH..=TRACK_HALF_WIDTH) as f32;

        if roll < hazard_p {
            let pool = hazard_pool(self.level);
            let kind = pool[self.rng.random_range(0..pool.len())];
            self.spawn_entity(kind, Vec3::new(lane, 0.0, zf), 1.0);

            if !kind.is_mob() && self.rng.random::<f32>() < STACK_CHANCE {
                let top = pool[self.rng.random_range(0..2)];
                self.spawn_entity(top, Vec3::new(lane, 1.0, zf), 1.0);
            }
            log::debug!("Slice {}: {:?} in lane {}", z, kind, lane);
        } else if roll < hazard_p + GOLD_CHANCE {
            let pos = Vec3::new(lane, gold_height(zf), zf);
            let id = self.spawn_entity(BlockType::Gold, pos, GOLD_SIZE);
            if let Some(gold) = self.entities.last_mut().filter(|e| e.id == id) {
                gold.rotation = Some(zf * 0.7);
            }
        }
    }
}
