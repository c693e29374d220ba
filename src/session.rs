//! Frame driver for one game session
//!
//! A host (browser frame callback, fixed-rate timer, test harness) calls
//! [`Session::frame`] repeatedly. Each call samples the latest input, runs one
//! simulation tick, plays the tick's sound cues, and renders the resulting
//! snapshot, in that order. Once the run ends the session's [`CancelToken`] is
//! tripped and later calls do nothing.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::audio::{AudioManager, AudioSink, SoundEffect};
use crate::highscores::{HighScoreEntry, HighScores};
use crate::renderer::{Companion, FrameStats, SceneRenderer, Surface};
use crate::settings::Settings;
use crate::sim::{GameState, Snapshot, TickInput};

/// Shared flag that stops a frame loop
///
/// Clones observe the same flag, so the host can hold one and cancel from
/// outside the loop.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

/// One run from reset to win or game over
pub struct Session {
    state: GameState,
    input: TickInput,
    renderer: SceneRenderer,
    audio: AudioManager,
    companions: Vec<Companion>,
    high_scores: HighScores,
    player_name: String,
    token: CancelToken,
    last_stats: FrameStats,
    /// Leaderboard rank of the finished run, if it placed
    final_rank: Option<usize>,
}

impl Session {
    /// Start a session from user settings
    ///
    /// Uses the settings' fixed seed when present, a random one otherwise.
    pub fn new(settings: &Settings) -> Self {
        let seed = settings.seed.unwrap_or_else(rand::random);
        let mut state = GameState::with_seed(settings.difficulty, seed);
        state.max_particles = settings.max_particles();

        let mut audio = AudioManager::default();
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_muted(settings.muted);

        log::info!(
            "Session started: {} difficulty, seed {}",
            settings.difficulty.as_str(),
            seed
        );

        Self {
            state,
            input: TickInput::default(),
            renderer: SceneRenderer::new(settings.render_options()),
            audio,
            companions: Vec::new(),
            high_scores: HighScores::new(),
            player_name: settings.player_name.clone(),
            token: CancelToken::new(),
            last_stats: FrameStats::default(),
            final_rank: None,
        }
    }

    /// Route sound cues to a real output, keeping the configured volume
    pub fn with_audio_sink(mut self, sink: Box<dyn AudioSink>) -> Self {
        self.audio.set_sink(sink);
        self
    }

    /// Seed the leaderboard the finished run will be submitted to
    pub fn with_high_scores(mut self, high_scores: HighScores) -> Self {
        self.high_scores = high_scores;
        self
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.token.clone()
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Latest input from the input collaborator, read at the next frame
    pub fn set_input(&mut self, input: TickInput) {
        self.input = input;
    }

    pub fn set_companions(&mut self, companions: Vec<Companion>) {
        self.companions = companions;
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    pub fn last_stats(&self) -> FrameStats {
        self.last_stats
    }

    pub fn final_rank(&self) -> Option<usize> {
        self.final_rank
    }

    /// Advance the simulation one tick without drawing
    ///
    /// Returns false once the session is cancelled.
    pub fn tick(&mut self, dt_ms: f32) -> bool {
        if self.token.is_cancelled() {
            return false;
        }
        let input = self.input;
        self.state.update(&input, dt_ms);
        let events = self.state.drain_events();
        self.audio.dispatch(&events);

        if self.state.game_over || self.state.game_won {
            self.finish();
        }
        true
    }

    /// Tick, then draw the resulting snapshot
    ///
    /// Returns false (and draws nothing) once the session is cancelled. The
    /// frame that ends the run is still drawn.
    pub fn frame(&mut self, dt_ms: f32, surface: &mut dyn Surface) -> bool {
        if !self.tick(dt_ms) {
            return false;
        }
        let snap = self.state.snapshot();
        self.last_stats = self.renderer.render(&snap, &self.companions, surface);
        true
    }

    /// Start over on the same track with a fresh cancel token
    pub fn restart(&mut self) {
        let difficulty = self.state.difficulty;
        self.state.reset(difficulty);
        self.input = TickInput::default();
        self.token = CancelToken::new();
        self.final_rank = None;
    }

    fn finish(&mut self) {
        let outcome = if self.state.game_won { "won" } else { "lost" };
        log::info!(
            "Run {}: score {} at level {} after {:.0} units",
            outcome,
            self.state.score,
            self.state.level,
            self.state.distance()
        );

        let entry = HighScoreEntry {
            name: self.player_name.clone(),
            score: self.state.score,
            level: self.state.level,
            difficulty: self.state.difficulty,
            won: self.state.game_won,
            timestamp: now_ms(),
        };
        self.final_rank = self.high_scores.add_score(entry);
        if let Some(rank) = self.final_rank {
            log::info!("New high score, rank {}", rank);
            self.audio.play(SoundEffect::HighScore);
        }
        self.token.cancel();
    }
}

fn now_ms() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}
