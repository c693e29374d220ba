//! Game settings and preferences
//!
//! Stored as JSON. Missing fields fall back to their defaults, so older files
//! keep loading as options are added.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::renderer::RenderOptions;
use crate::sim::Difficulty;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub const ALL: [QualityPreset; 3] =
        [QualityPreset::Low, QualityPreset::Medium, QualityPreset::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Maximum live particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 100,
            QualityPreset::Medium => 500,
            QualityPreset::High => 2000,
        }
    }

    /// Whether per-type face decorations are drawn
    pub fn decorations_enabled(&self) -> bool {
        !matches!(self, QualityPreset::Low)
    }

    pub fn speed_lines_enabled(&self) -> bool {
        !matches!(self, QualityPreset::Low)
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Gameplay ===
    pub difficulty: Difficulty,
    /// Fixed run seed; a fresh one is picked per run when unset
    pub seed: Option<u64>,
    /// Name recorded with high scores
    pub player_name: String,

    // === Visual Effects ===
    /// Screen shake on impacts
    pub screen_shake: bool,
    /// Particle effects (collection bursts, explosions)
    pub particles: bool,
    pub speed_lines: bool,

    // === HUD ===
    pub show_crosshair: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    // === Accessibility ===
    /// Reduced motion (no shake, no speed lines)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,

            difficulty: Difficulty::Medium,
            seed: None,
            player_name: "Player".to_string(),

            screen_shake: true,
            particles: true,
            speed_lines: true,

            show_crosshair: true,

            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset (applies preset defaults)
    pub fn from_preset(preset: QualityPreset) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(preset);
        settings
    }

    /// Apply a quality preset (updates quality-dependent settings)
    pub fn apply_preset(&mut self, preset: QualityPreset) {
        self.quality = preset;

        // Low preset drops the purely cosmetic overlays
        if preset == QualityPreset::Low {
            self.speed_lines = false;
        }
    }

    /// Screen shake multiplier (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> f32 {
        if self.screen_shake && !self.reduced_motion {
            1.0
        } else {
            0.0
        }
    }

    /// Speed lines (respects reduced_motion and quality)
    pub fn effective_speed_lines(&self) -> bool {
        self.speed_lines && !self.reduced_motion && self.quality.speed_lines_enabled()
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Renderer toggles for these settings
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            detail: self.quality.decorations_enabled(),
            speed_lines: self.effective_speed_lines(),
            crosshair: self.show_crosshair,
            screen_shake: self.effective_screen_shake(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::info!("Using default settings ({}: {})", path.display(), e);
                return Self::default();
            }
        };
        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring malformed settings in {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings as JSON
    pub fn save(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let json = self.to_json()?;
        fs::write(path.as_ref(), json)?;
        log::info!("Settings saved");
        Ok(())
    }
}
