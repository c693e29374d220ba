//! Runner simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering:
//! - One `update` call per tick, in a fixed step order
//! - Seeded RNG only, so a seed reproduces a run
//! - Consumers read a cloned [`Snapshot`], never the live state

pub mod collision;
pub mod difficulty;
pub mod particles;
pub mod slice;
pub mod state;
pub mod tick;

pub use collision::{aabb_overlap, player_overlaps};
pub use difficulty::{Difficulty, DifficultyConfig};
pub use slice::{gold_height, hazard_pool, hazard_probability};
pub use state::{BlockType, Entity, GameEvent, GameState, Particle, PlayerState, Snapshot};
pub use tick::TickInput;
