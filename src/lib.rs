//! Hold Ring - a hold-and-release reflex arcade game
//!
//! A ring grows from the center of the screen while the pointer is held.
//! Let go inside the safe zone to score; let go outside it (or let the ring
//! run off the screen) and the run is over.
//!
//! Core modules:
//! - `sim`: Deterministic simulation (difficulty, scoring, round state, clock, input)
//! - `stats`: Lifetime statistics aggregated from simulation events
//! - `persistence`: Key-value storage for best score, stats and settings
//! - `effects`: Presentation effects driven by simulation events
//! - `audio` / `haptics`: Collaborator interfaces for feedback cues
//! - `game`: Session driver wiring the above together

pub mod audio;
pub mod effects;
pub mod game;
pub mod haptics;
pub mod persistence;
pub mod settings;
pub mod sim;
pub mod stats;

pub use game::Game;
pub use settings::{QualityPreset, Settings};
pub use stats::LifetimeStats;

/// Game configuration constants
pub mod consts {
    /// Nominal frame rate the clock is tuned for (one tick per display frame)
    pub const FRAME_RATE: u32 = 60;

    /// Cumulative score at which difficulty stops increasing
    pub const DIFFICULTY_SCORE_CAP: f32 = 2500.0;
    /// Zone thickness lost at full difficulty (fraction of base)
    pub const ZONE_SHRINK_AT_CAP: f32 = 0.6;
    /// Speed gained at full difficulty (fraction of base)
    pub const SPEED_GAIN_AT_CAP: f32 = 2.0;

    /// Zone inner edge band, as fractions of the smaller viewport dimension
    pub const ZONE_BAND_START: f32 = 0.15;
    pub const ZONE_BAND_SPAN: f32 = 0.28;

    /// Ring fails once it would pass this fraction of the smaller viewport dimension
    pub const OVERSHOOT_LIMIT: f32 = 0.95;

    /// Precision needed for the top and mid feedback tiers
    pub const PERFECT_TIER_PRECISION: f32 = 0.92;
    pub const GREAT_TIER_PRECISION: f32 = 0.75;
    /// Precision needed to keep a combo going
    pub const COMBO_PRECISION: f32 = 0.9;

    /// Radius pixels per point before combo and difficulty multipliers
    pub const RADIUS_PER_POINT: f32 = 8.0;
    /// Extra reward per combo step
    pub const COMBO_BONUS: f32 = 0.5;

    /// Score thresholds that pause play for a celebration
    pub const MILESTONES: [u64; 6] = [100, 500, 1000, 2500, 5000, 10000];
    /// Combo counts divisible by this get a streak callout
    pub const COMBO_CALLOUT_EVERY: u32 = 5;

    /// A failed release this close to a zone edge counts as a near miss
    pub const NEAR_MISS_MARGIN: f32 = 15.0;
}

/// Whole frames covering `millis` at the nominal frame rate (rounded up)
#[inline]
pub fn millis_to_frames(millis: u32) -> u32 {
    (millis * consts::FRAME_RATE).div_ceil(1000)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_millis_to_frames() {
        assert_eq!(millis_to_frames(1000), 60);
        assert_eq!(millis_to_frames(1200), 72);
        assert_eq!(millis_to_frames(200), 12);
        assert_eq!(millis_to_frames(10), 1);
        assert_eq!(millis_to_frames(0), 0);
    }
}
