//! Difficulty tiers and their speed/hazard tuning

use serde::{Deserialize, Serialize};

use crate::consts::LEVEL_SPEED_STEP;

/// Difficulty tier selected at reset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

/// Per-tier tuning (speeds are world units per tick)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyConfig {
    pub start_speed: f32,
    pub max_speed: f32,
    /// Per-tick easing increment toward the cruise speed
    pub acceleration: f32,
    /// Base probability of a hazard in a slice
    pub hazard_chance: f32,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn config(&self) -> DifficultyConfig {
        match self {
            Difficulty::Easy => DifficultyConfig {
                start_speed: 0.12,
                max_speed: 0.2,
                acceleration: 0.0001,
                hazard_chance: 0.15,
            },
            Difficulty::Medium => DifficultyConfig {
                start_speed: 0.15,
                max_speed: 0.3,
                acceleration: 0.0002,
                hazard_chance: 0.25,
            },
            Difficulty::Hard => DifficultyConfig {
                start_speed: 0.2,
                max_speed: 0.4,
                acceleration: 0.0003,
                hazard_chance: 0.35,
            },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" | "normal" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Easy runs at a flat speed and skips the level-up bump
    pub fn scales_with_level(&self) -> bool {
        !matches!(self, Difficulty::Easy)
    }

    /// Cruise speed the current speed eases toward at a given level
    pub fn target_speed(&self, level: u32) -> f32 {
        let cfg = self.config();
        if !self.scales_with_level() {
            return cfg.start_speed;
        }
        let steps = level.saturating_sub(1) as f32;
        (cfg.start_speed + steps * LEVEL_SPEED_STEP).min(cfg.max_speed)
    }
}
