//! Game settings and preferences
//!
//! Persisted in the same key-value store as scores, under their own key.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::persistence::{self, KeyValueStore, SETTINGS_KEY};
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
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    /// Maximum live particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 40,
            QualityPreset::Medium => 150,
            QualityPreset::High => 400,
        }
    }
}

impl fmt::Display for QualityPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QualityPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(QualityPreset::Low),
            "medium" | "med" => Ok(QualityPreset::Medium),
            "high" => Ok(QualityPreset::High),
            other => Err(format!("unknown quality '{other}' (expected low, medium or high)")),
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Difficulty selected on the menu last time
    pub difficulty: Difficulty,
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Visual Effects ===
    /// Screen shake on hits and failures
    pub screen_shake: bool,
    /// Full-screen flash on perfect hits
    pub flash: bool,
    /// Particle bursts
    pub particles: bool,

    // === Feedback ===
    /// Vibration on supported devices
    pub haptics: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,

    // === Accessibility ===
    /// Reduced motion (no shake, flash or distortion)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Medium,
            quality: QualityPreset::Medium,

            screen_shake: true,
            flash: true,
            particles: true,

            haptics: true,
            master_volume: 0.25,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Effective flash and distortion (respects reduced_motion)
    pub fn effective_flash(&self) -> bool {
        self.flash && !self.reduced_motion
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Set master volume, clamped to 0.0 - 1.0
    pub fn set_master_volume(&mut self, volume: f32) {
        self.master_volume = volume.clamp(0.0, 1.0);
    }

    /// Load settings, falling back to defaults
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let settings: Self = persistence::load_or_default(store, SETTINGS_KEY);
        log::info!(
            "Settings: {} difficulty, {} quality",
            settings.difficulty,
            settings.quality
        );
        settings
    }

    /// Save settings (best-effort)
    pub fn save(&self, store: &mut dyn KeyValueStore) {
        persistence::save_best_effort(store, SETTINGS_KEY, self);
    }
}
