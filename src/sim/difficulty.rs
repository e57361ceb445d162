//! Difficulty model
//!
//! Maps cumulative run score and the chosen difficulty to the parameters of
//! the next round: where the safe zone sits, how thick it is, and how fast the
//! ring grows.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Difficulty chosen at the start of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    /// Zone thickness (pixels) at zero progress
    pub fn base_zone_thickness(&self) -> f32 {
        match self {
            Difficulty::Easy => 90.0,
            Difficulty::Medium => 70.0,
            Difficulty::Hard => 50.0,
        }
    }

    /// Ring growth (pixels per frame) at zero progress
    pub fn base_speed(&self) -> f32 {
        match self {
            Difficulty::Easy => 2.5,
            Difficulty::Medium => 3.5,
            Difficulty::Hard => 5.0,
        }
    }

    /// Points multiplier applied to every hit
    pub fn score_multiplier(&self) -> f32 {
        match self {
            Difficulty::Easy => 0.7,
            Difficulty::Medium => 1.0,
            Difficulty::Hard => 1.5,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" | "med" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty '{other}' (expected easy, medium or hard)")),
        }
    }
}

/// Display surface size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Smaller of the two dimensions; every radius in the game scales with it
    #[inline]
    pub fn min_dimension(&self) -> f32 {
        self.width.min(self.height)
    }

    /// Largest radius the ring may reach before the run fails
    #[inline]
    pub fn overshoot_limit(&self) -> f32 {
        self.min_dimension() * OVERSHOOT_LIMIT
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}

/// Parameters fixed for the duration of one round
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoundParams {
    /// Inner edge of the safe zone (pixels from center)
    pub zone_min: f32,
    /// Outer edge of the safe zone
    pub zone_max: f32,
    /// Ring growth per simulated frame
    pub speed: f32,
}

impl RoundParams {
    #[inline]
    pub fn thickness(&self) -> f32 {
        self.zone_max - self.zone_min
    }

    #[inline]
    pub fn center(&self) -> f32 {
        (self.zone_min + self.zone_max) / 2.0
    }

    #[inline]
    pub fn contains(&self, radius: f32) -> bool {
        radius >= self.zone_min && radius <= self.zone_max
    }
}

/// Difficulty progress in [0, 1]; stops rising at the score cap
#[inline]
pub fn progress(score: u64) -> f32 {
    (score as f32 / DIFFICULTY_SCORE_CAP).min(1.0)
}

/// Zone thickness for a given cumulative score
pub fn zone_thickness(score: u64, difficulty: Difficulty) -> f32 {
    let base = difficulty.base_zone_thickness();
    base * (1.0 - progress(score) * ZONE_SHRINK_AT_CAP)
}

/// Ring growth per frame for a given cumulative score
pub fn expansion_speed(score: u64, difficulty: Difficulty) -> f32 {
    let base = difficulty.base_speed();
    base * (1.0 + progress(score) * SPEED_GAIN_AT_CAP)
}

/// Roll the parameters for a new round.
///
/// The zone's inner edge is placed uniformly within
/// `[0.15, 0.43) × min(width, height)`; thickness and speed follow the score.
pub fn compute_round_parameters<R: Rng + ?Sized>(
    score: u64,
    difficulty: Difficulty,
    viewport: Viewport,
    rng: &mut R,
) -> RoundParams {
    let base_size = viewport.min_dimension();
    let zone_min = base_size * ZONE_BAND_START + rng.random::<f32>() * base_size * ZONE_BAND_SPAN;

    RoundParams {
        zone_min,
        zone_max: zone_min + zone_thickness(score, difficulty),
        speed: expansion_speed(score, difficulty),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_base_parameters_at_zero_score() {
        assert_eq!(zone_thickness(0, Difficulty::Easy), 90.0);
        assert_eq!(expansion_speed(0, Difficulty::Easy), 2.5);
        assert_eq!(zone_thickness(0, Difficulty::Medium), 70.0);
        assert_eq!(expansion_speed(0, Difficulty::Medium), 3.5);
        assert_eq!(zone_thickness(0, Difficulty::Hard), 50.0);
        assert_eq!(expansion_speed(0, Difficulty::Hard), 5.0);
    }

    #[test]
    fn test_full_progress_parameters() {
        // 40% of base thickness, triple speed
        assert!((zone_thickness(2500, Difficulty::Medium) - 28.0).abs() < 1e-4);
        assert!((expansion_speed(2500, Difficulty::Medium) - 10.5).abs() < 1e-4);
    }

    #[test]
    fn test_zone_placement_within_band() {
        let viewport = Viewport::new(800.0, 600.0);
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..500 {
            let params = compute_round_parameters(0, Difficulty::Medium, viewport, &mut rng);
            assert!(params.zone_min >= 600.0 * 0.15);
            assert!(params.zone_min < 600.0 * 0.43 + 1e-3);
            assert!(params.zone_min < params.zone_max);
            assert!((params.thickness() - 70.0).abs() < 1e-3);
            assert_eq!(params.speed, 3.5);
        }
    }

    #[test]
    fn test_zone_rerolled_each_round() {
        let viewport = Viewport::default();
        let mut rng = Pcg32::seed_from_u64(42);
        let a = compute_round_parameters(0, Difficulty::Hard, viewport, &mut rng);
        let b = compute_round_parameters(0, Difficulty::Hard, viewport, &mut rng);
        assert_ne!(a.zone_min, b.zone_min);
    }

    #[test]
    fn test_difficulty_parse() {
        assert_eq!("EASY".parse::<Difficulty>(), Ok(Difficulty::Easy));
        assert_eq!("med".parse::<Difficulty>(), Ok(Difficulty::Medium));
        assert_eq!("hard".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert!("nightmare".parse::<Difficulty>().is_err());
    }

    proptest! {
        #[test]
        fn prop_progress_clamps_past_cap(score in 2500u64..10_000_000, tier in 0usize..3) {
            let difficulty = Difficulty::ALL[tier];
            prop_assert_eq!(zone_thickness(score, difficulty), zone_thickness(2500, difficulty));
            prop_assert_eq!(expansion_speed(score, difficulty), expansion_speed(2500, difficulty));
        }

        #[test]
        fn prop_harder_as_score_rises(a in 0u64..=2500, b in 0u64..=2500, tier in 0usize..3) {
            let difficulty = Difficulty::ALL[tier];
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(zone_thickness(hi, difficulty) <= zone_thickness(lo, difficulty));
            prop_assert!(expansion_speed(hi, difficulty) >= expansion_speed(lo, difficulty));
        }

        #[test]
        fn prop_thickness_never_below_floor(score in any::<u64>(), tier in 0usize..3) {
            let difficulty = Difficulty::ALL[tier];
            let floor = difficulty.base_zone_thickness() * 0.4;
            prop_assert!(zone_thickness(score, difficulty) >= floor - 1e-4);
        }
    }
}
