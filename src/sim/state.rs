//! Game state and core simulation types
//!
//! Everything the simulation owns lives here. Consumers only ever see a
//! [`Snapshot`], which is a cloned value.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty::Difficulty;
use crate::consts::*;

/// Block types making up the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockType {
    Grass,
    Dirt,
    Stone,
    Wood,
    Leaves,
    /// Collectible
    Gold,
    /// Explosive hazard
    Tnt,
    Lava,
    Creeper,
    Skeleton,
}

impl BlockType {
    pub fn is_collectible(self) -> bool {
        matches!(self, BlockType::Gold)
    }

    pub fn is_mob(self) -> bool {
        matches!(self, BlockType::Creeper | BlockType::Skeleton)
    }

    /// Particle color used when this block is hit
    pub fn burst_color(self) -> [f32; 3] {
        match self {
            BlockType::Grass => [0.36, 0.6, 0.25],
            BlockType::Dirt => [0.53, 0.38, 0.25],
            BlockType::Stone => [0.5, 0.5, 0.5],
            BlockType::Wood => [0.6, 0.45, 0.25],
            BlockType::Leaves => [0.2, 0.5, 0.15],
            BlockType::Gold => [1.0, 0.84, 0.0],
            BlockType::Tnt => [0.86, 0.2, 0.15],
            BlockType::Lava => [1.0, 0.45, 0.0],
            BlockType::Creeper => [0.3, 0.75, 0.3],
            BlockType::Skeleton => [0.85, 0.85, 0.85],
        }
    }
}

/// One world cube: ground tile, obstacle or collectible
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    pub kind: BlockType,
    /// Cube center
    pub pos: Vec3,
    /// Edge length (> 0)
    pub size: f32,
    pub collected: bool,
    /// Decorative spin phase (radians), not used for collision
    #[serde(default)]
    pub rotation: Option<f32>,
}

impl Entity {
    #[inline]
    pub fn half_extents(&self) -> Vec3 {
        Vec3::splat(self.size * 0.5)
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub id: u32,
    pub pos: Vec3,
    pub vel: Vec3,
    /// 0-1, decreases every tick
    pub life: f32,
    /// RGB 0-1
    pub color: [f32; 3],
    pub size: f32,
}

/// The runner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub pos: Vec3,
    pub vel: Vec3,
    pub is_jumping: bool,
    /// Camera roll derived from lateral velocity
    pub tilt: f32,
    /// 0 grounded, 1 jumped, 2 double-jumped
    pub jump_count: u8,
    pub phase_active: bool,
    /// Remaining phase time (ms)
    pub phase_time_remaining: f32,
    /// Remaining cooldown before phase can trigger again (ms)
    pub phase_cooldown: f32,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            pos: Vec3::ZERO,
            vel: Vec3::ZERO,
            is_jumping: false,
            tilt: 0.0,
            jump_count: 0,
            phase_active: false,
            phase_time_remaining: 0.0,
            phase_cooldown: 0.0,
        }
    }
}

impl PlayerState {
    #[inline]
    pub fn is_grounded(&self) -> bool {
        !self.is_jumping
    }

    #[inline]
    pub fn half_extents() -> Vec3 {
        Vec3::from_array(PLAYER_HALF_EXTENTS)
    }
}

/// Notable things that happened during a tick, drained by the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Jump,
    DoubleJump,
    PhaseActivated,
    Collect,
    Hit(BlockType),
    LevelUp(u32),
    Win,
    GameOver,
}

/// Read-only copy of the simulation at a point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub entities: Vec<Entity>,
    pub particles: Vec<Particle>,
    pub player: PlayerState,
    pub score: u32,
    pub lives: u32,
    pub level: u32,
    pub speed: f32,
    pub distance: f32,
    pub is_playing: bool,
    pub game_over: bool,
    pub game_won: bool,
    pub gold_collected: u32,
    pub level_target: u32,
    pub shake_intensity: f32,
    pub difficulty: Difficulty,
    /// Session time (ms), drives animation
    pub elapsed_ms: f32,
}

/// Complete simulation state for one session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub difficulty: Difficulty,
    pub player: PlayerState,
    /// World cubes (sorted by id, i.e. generation order)
    pub entities: Vec<Entity>,
    pub particles: Vec<Particle>,
    pub score: u32,
    pub lives: u32,
    pub level: u32,
    pub gold_collected: u32,
    pub level_target: u32,
    /// Forward speed (units per tick)
    pub speed: f32,
    pub shake_intensity: f32,
    pub is_playing: bool,
    pub game_over: bool,
    pub game_won: bool,
    pub elapsed_ms: f32,
    pub time_ticks: u64,
    /// Particle cap (quality dependent)
    pub max_particles: usize,
    /// Next slice z to generate
    pub(crate) next_slice_z: i32,
    pub(crate) prev_jump: bool,
    pub(crate) prev_phase: bool,
    pub(crate) events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a new session on the given difficulty with a fixed seed
    pub fn with_seed(difficulty: Difficulty, seed: u64) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            difficulty,
            player: PlayerState::default(),
            entities: Vec::new(),
            particles: Vec::new(),
            score: 0,
            lives: START_LIVES,
            level: 1,
            gold_collected: 0,
            level_target: LEVEL_TARGET_BASE,
            speed: difficulty.config().start_speed,
            shake_intensity: 0.0,
            is_playing: true,
            game_over: false,
            game_won: false,
            elapsed_ms: 0.0,
            time_ticks: 0,
            max_particles: MAX_PARTICLES,
            next_slice_z: -BACKFILL_SLICES,
            prev_jump: false,
            prev_phase: false,
            events: Vec::new(),
            next_id: 1,
        };
        state.reset(difficulty);
        state
    }

    /// Reinitialize everything to session start and pre-generate the track
    pub fn reset(&mut self, difficulty: Difficulty) {
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.difficulty = difficulty;
        self.player = PlayerState::default();
        self.entities.clear();
        self.particles.clear();
        self.score = 0;
        self.lives = START_LIVES;
        self.level = 1;
        self.gold_collected = 0;
        self.level_target = LEVEL_TARGET_BASE;
        self.speed = difficulty.config().start_speed;
        self.shake_intensity = 0.0;
        self.is_playing = true;
        self.game_over = false;
        self.game_won = false;
        self.elapsed_ms = 0.0;
        self.time_ticks = 0;
        self.prev_jump = false;
        self.prev_phase = false;
        self.events.clear();
        self.next_id = 1;

        self.next_slice_z = -BACKFILL_SLICES;
        let initial_end = RENDER_DISTANCE as i32;
        while self.next_slice_z <= initial_end {
            let z = self.next_slice_z;
            self.generate_slice(z);
            self.next_slice_z += 1;
        }

        log::info!(
            "Session reset: difficulty={}, seed={}, {} entities",
            difficulty.as_str(),
            self.seed,
            self.entities.len()
        );
    }

    /// Allocate a new entity/particle ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add a world cube, returning its id
    pub fn spawn_entity(&mut self, kind: BlockType, pos: Vec3, size: f32) -> u32 {
        let id = self.next_entity_id();
        self.entities.push(Entity {
            id,
            kind,
            pos,
            size,
            collected: false,
            rotation: None,
        });
        id
    }

    /// Distance travelled along the track
    pub fn distance(&self) -> f32 {
        self.player.pos.z
    }

    /// Take the events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Value copy of the current state for renderers and UI
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            entities: self.entities.clone(),
            particles: self.particles.clone(),
            player: self.player.clone(),
            score: self.score,
            lives: self.lives,
            level: self.level,
            speed: self.speed,
            distance: self.distance(),
            is_playing: self.is_playing,
            game_over: self.game_over,
            game_won: self.game_won,
            gold_collected: self.gold_collected,
            level_target: self.level_target,
            shake_intensity: self.shake_intensity,
            difficulty: self.difficulty,
            elapsed_ms: self.elapsed_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_initial_state() {
        let state = GameState::with_seed(Difficulty::Medium, 7);
        assert_eq!(state.lives, 3);
        assert_eq!(state.level, 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.player.pos, Vec3::ZERO);
        assert_eq!(state.speed, Difficulty::Medium.config().start_speed);
        assert!(state.particles.is_empty());
        assert!(state.is_playing);
        // Track is generated ahead so the first frame isn't empty
        let furthest = state
            .entities
            .iter()
            .map(|e| e.pos.z)
            .fold(f32::MIN, f32::max);
        assert!(furthest >= RENDER_DISTANCE);
        assert!(state.entities.iter().all(|e| e.size > 0.0));
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut state = GameState::with_seed(Difficulty::Hard, 99);
        let first = state.snapshot();
        state.score = 120;
        state.lives = 1;
        state.player.pos.z = 40.0;
        state.reset(Difficulty::Hard);
        assert_eq!(state.snapshot(), first);
        state.reset(Difficulty::Hard);
        assert_eq!(state.snapshot(), first);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let state = GameState::with_seed(Difficulty::Easy, 1);
        let mut snap = state.snapshot();
        snap.entities.clear();
        snap.player.pos.x = 9.0;
        assert!(!state.entities.is_empty());
        assert_eq!(state.player.pos.x, 0.0);
    }

    #[test]
    fn test_block_type_classes() {
        assert!(BlockType::Gold.is_collectible());
        assert!(!BlockType::Tnt.is_collectible());
        assert!(BlockType::Creeper.is_mob());
        assert!(BlockType::Skeleton.is_mob());
        assert!(!BlockType::Stone.is_mob());
    }
}
