//! Blockrunner - An endless voxel runner with a software pseudo-3D renderer
//!
//! Core modules:
//! - `sim`: Simulation (player physics, phase ability, world generation, collisions)
//! - `renderer`: Software projection, fog, painter's-algorithm scene drawing
//! - `session`: Frame driver tying input, simulation, feedback and rendering together
//! - `audio`: Feedback collaborator interface
//! - `highscores`: Top-N leaderboard
//! - `settings`: User preferences

pub mod audio;
pub mod highscores;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use session::{CancelToken, Session};
pub use settings::{QualityPreset, Settings};

/// Game configuration constants
pub mod consts {
    /// Nominal frame duration the per-tick constants are tuned for (ms)
    pub const FRAME_MS: f32 = 1000.0 / 60.0;

    /// Track layout: lanes run from -TRACK_HALF_WIDTH to TRACK_HALF_WIDTH
    pub const TRACK_HALF_WIDTH: i32 = 2;
    /// Lateral bound for the player's center
    pub const PLAYER_X_LIMIT: f32 = 2.2;
    /// Height of ground tile centers (top face sits at y = -0.5)
    pub const GROUND_Y: f32 = -1.0;

    /// Slices kept generated ahead of the player
    pub const RENDER_DISTANCE: f32 = 25.0;
    /// Slices generated behind the origin on reset
    pub const BACKFILL_SLICES: i32 = 5;
    /// No hazards or gold before this z
    pub const WARMUP_DISTANCE: f32 = 12.0;
    /// Entities further than this behind the player are dropped
    pub const CULL_MARGIN: f32 = 5.0;

    /// Player bounding box half extents
    pub const PLAYER_HALF_EXTENTS: [f32; 3] = [0.3, 0.45, 0.3];

    /// Lateral physics (per tick)
    pub const LATERAL_ACCEL: f32 = 0.02;
    pub const LATERAL_FRICTION: f32 = 0.85;
    pub const MAX_LATERAL_SPEED: f32 = 0.15;
    /// Camera roll per unit of lateral velocity
    pub const TILT_FACTOR: f32 = 0.8;

    /// Vertical physics (per tick)
    pub const GRAVITY: f32 = 0.015;
    pub const JUMP_FORCE: f32 = 0.3;
    pub const DOUBLE_JUMP_FORCE: f32 = 0.25;

    /// Phase ability timings (ms)
    pub const PHASE_DURATION_MS: f32 = 5000.0;
    pub const PHASE_COOLDOWN_MS: f32 = 10000.0;

    /// Scoring
    pub const GOLD_SCORE: u32 = 10;
    pub const WIN_SCORE: u32 = 250;
    pub const START_LIVES: u32 = 3;

    /// Leveling
    pub const LEVEL_TARGET_BASE: u32 = 5;
    pub const LEVEL_TARGET_INCREMENT: u32 = 3;
    pub const LEVEL_SPEED_STEP: f32 = 0.02;
    pub const LEVEL_UP_SPEED_BUMP: f32 = 0.01;

    /// Slice generation odds
    pub const HAZARD_CHANCE_PER_LEVEL: f32 = 0.03;
    pub const MAX_HAZARD_CHANCE: f32 = 0.6;
    pub const GOLD_CHANCE: f32 = 0.15;
    pub const STACK_CHANCE: f32 = 0.3;
    pub const GOLD_SIZE: f32 = 0.5;
    pub const GOLD_BASE_Y: f32 = 0.3;
    pub const GOLD_BOB_AMPLITUDE: f32 = 0.2;
    pub const GOLD_BOB_FREQUENCY: f32 = 0.5;

    /// Screen shake
    pub const SHAKE_DECAY: f32 = 0.85;
    pub const SHAKE_EPSILON: f32 = 0.01;
    pub const SHAKE_HIT: f32 = 10.0;
    pub const SHAKE_EXPLOSION: f32 = 20.0;

    /// Particles
    pub const PARTICLE_LIFE_STEP: f32 = 1.0 / 32.0;
    pub const PARTICLE_GRAVITY: f32 = 0.01;
    pub const PARTICLE_SPREAD: f32 = 0.2;
    pub const PARTICLE_LIFT: f32 = 0.25;
    pub const MAX_PARTICLES: usize = 512;

    /// Projection
    pub const FOCAL_LENGTH: f32 = 500.0;
    pub const NEAR_PLANE: f32 = 0.1;
    pub const FOG_DISTANCE: f32 = 28.0;
    /// Sky color fog blends toward (RGB 0-1)
    pub const SKY_COLOR: [f32; 3] = [0.53, 0.81, 0.92];

    /// Camera rig relative to the player
    pub const CAMERA_HEIGHT: f32 = 2.2;
    pub const CAMERA_DISTANCE: f32 = 4.0;
    pub const CAMERA_PITCH: f32 = 0.25;
}

/// Linear interpolation
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
