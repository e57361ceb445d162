//! Release evaluation
//!
//! Pure scoring rules: given where the ring was released and where the safe
//! zone sits, decide hit or miss, how precise the hit was, the points it is
//! worth and what happens to the combo.

use serde::{Deserialize, Serialize};

use super::difficulty::Difficulty;
use crate::consts::*;

/// Feedback tier of a successful release (selects cue intensity, not points)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrecisionTier {
    /// Precision above 0.92
    Perfect,
    /// Precision above 0.75
    Great,
    Nice,
}

impl PrecisionTier {
    pub fn from_precision(precision: f32) -> Self {
        if precision > PERFECT_TIER_PRECISION {
            PrecisionTier::Perfect
        } else if precision > GREAT_TIER_PRECISION {
            PrecisionTier::Great
        } else {
            PrecisionTier::Nice
        }
    }

    /// Callout text shown for this tier
    pub fn label(&self) -> &'static str {
        match self {
            PrecisionTier::Perfect => "PERFECT!",
            PrecisionTier::Great => "GREAT!",
            PrecisionTier::Nice => "NICE.",
        }
    }
}

/// Result of evaluating one release
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitOutcome {
    Hit {
        /// 1.0 at the zone center, 0.0 at either edge
        precision: f32,
        tier: PrecisionTier,
        points: u64,
        combo: u32,
    },
    Miss {
        /// Released within a few pixels of a zone edge
        near_miss: bool,
    },
}

impl HitOutcome {
    pub fn is_hit(&self) -> bool {
        matches!(self, HitOutcome::Hit { .. })
    }

    /// Combo after this release (misses always clear it)
    pub fn combo(&self) -> u32 {
        match self {
            HitOutcome::Hit { combo, .. } => *combo,
            HitOutcome::Miss { .. } => 0,
        }
    }
}

/// Precision of a release inside `[zone_min, zone_max]`
pub fn precision(radius: f32, zone_min: f32, zone_max: f32) -> f32 {
    let center = (zone_min + zone_max) / 2.0;
    let half_width = (zone_max - zone_min) / 2.0;
    if half_width <= 0.0 {
        return 1.0;
    }
    // Edge releases can land a hair below zero from rounding
    (1.0 - (radius - center).abs() / half_width).clamp(0.0, 1.0)
}

/// Evaluate a release at `radius` against the current zone
pub fn evaluate(
    radius: f32,
    zone_min: f32,
    zone_max: f32,
    combo: u32,
    difficulty: Difficulty,
) -> HitOutcome {
    let in_zone = radius >= zone_min && radius <= zone_max;
    if !in_zone {
        let near_miss = (radius - zone_min).abs() < NEAR_MISS_MARGIN
            || (radius - zone_max).abs() < NEAR_MISS_MARGIN;
        return HitOutcome::Miss { near_miss };
    }

    let precision = precision(radius, zone_min, zone_max);
    // Only near-perfect hits sustain a streak
    let combo = if precision > COMBO_PRECISION { combo + 1 } else { 0 };

    let reward = (radius / RADIUS_PER_POINT)
        * (1.0 + combo as f32 * COMBO_BONUS)
        * difficulty.score_multiplier();

    HitOutcome::Hit {
        precision,
        tier: PrecisionTier::from_precision(precision),
        points: reward.floor() as u64,
        combo,
    }
}

/// The first milestone `m` (ascending) with `prior < m <= next`.
///
/// Only one milestone is reported per hit, even when a single jump skips past
/// several thresholds.
pub fn milestone_crossed(prior: u64, next: u64) -> Option<u64> {
    MILESTONES.iter().copied().find(|&m| prior < m && next >= m)
}

/// Whether a combo count earns a streak callout ("5 HITS!")
#[inline]
pub fn is_combo_callout(combo: u32) -> bool {
    combo > 0 && combo % COMBO_CALLOUT_EVERY == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_precision_center_and_edges() {
        assert_eq!(precision(125.0, 100.0, 150.0), 1.0);
        assert_eq!(precision(100.0, 100.0, 150.0), 0.0);
        assert_eq!(precision(150.0, 100.0, 150.0), 0.0);
        assert!((precision(112.5, 100.0, 150.0) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_center_hit_medium() {
        let outcome = evaluate(125.0, 100.0, 150.0, 0, Difficulty::Medium);
        assert_eq!(
            outcome,
            HitOutcome::Hit {
                precision: 1.0,
                tier: PrecisionTier::Perfect,
                // 125 / 8 * 1.5 * 1.0 = 23.4375
                points: 23,
                combo: 1,
            }
        );
    }

    #[test]
    fn test_combo_resets_on_imprecise_hit() {
        // precision 0.8: a success, but not near-perfect
        let outcome = evaluate(130.0, 100.0, 150.0, 4, Difficulty::Medium);
        match outcome {
            HitOutcome::Hit { tier, combo, points, .. } => {
                assert_eq!(tier, PrecisionTier::Great);
                assert_eq!(combo, 0);
                // 130 / 8 = 16.25, no combo bonus
                assert_eq!(points, 16);
            }
            HitOutcome::Miss { .. } => panic!("expected a hit"),
        }
    }

    #[test]
    fn test_combo_bonus_and_multiplier() {
        // combo 3 -> 4, bonus 1 + 4*0.5 = 3, hard 1.5x: 160/8 * 3 * 1.5 = 90
        let outcome = evaluate(160.0, 140.0, 180.0, 3, Difficulty::Hard);
        assert_eq!(outcome.combo(), 4);
        assert!(matches!(outcome, HitOutcome::Hit { points: 90, .. }));

        // easy 0.7x: 160/8 * 1.5 * 0.7 = 21.0
        let outcome = evaluate(160.0, 140.0, 180.0, 0, Difficulty::Easy);
        assert!(matches!(outcome, HitOutcome::Hit { points: 21, .. }));
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(PrecisionTier::from_precision(0.93), PrecisionTier::Perfect);
        assert_eq!(PrecisionTier::from_precision(0.92), PrecisionTier::Great);
        assert_eq!(PrecisionTier::from_precision(0.76), PrecisionTier::Great);
        assert_eq!(PrecisionTier::from_precision(0.75), PrecisionTier::Nice);
        assert_eq!(PrecisionTier::from_precision(0.0), PrecisionTier::Nice);
    }

    #[test]
    fn test_miss_and_near_miss() {
        assert_eq!(
            evaluate(90.0, 100.0, 150.0, 7, Difficulty::Medium),
            HitOutcome::Miss { near_miss: true }
        );
        assert_eq!(
            evaluate(40.0, 100.0, 150.0, 7, Difficulty::Medium),
            HitOutcome::Miss { near_miss: false }
        );
        assert_eq!(
            evaluate(160.0, 100.0, 150.0, 0, Difficulty::Medium),
            HitOutcome::Miss { near_miss: true }
        );
        assert_eq!(evaluate(160.0, 100.0, 150.0, 7, Difficulty::Medium).combo(), 0);
    }

    #[test]
    fn test_single_milestone_per_hit() {
        assert_eq!(milestone_crossed(80, 600), Some(100));
        assert_eq!(milestone_crossed(90, 5200), Some(100));
        assert_eq!(milestone_crossed(100, 499), None);
        assert_eq!(milestone_crossed(499, 500), Some(500));
        assert_eq!(milestone_crossed(9_000, 20_000), Some(10_000));
        assert_eq!(milestone_crossed(10_000, 50_000), None);
    }

    #[test]
    fn test_combo_callout() {
        assert!(!is_combo_callout(0));
        assert!(!is_combo_callout(4));
        assert!(is_combo_callout(5));
        assert!(is_combo_callout(10));
        assert!(!is_combo_callout(11));
    }

    proptest! {
        #[test]
        fn prop_hit_precision_in_range(
            zone_min in 50.0f32..400.0,
            thickness in 10.0f32..100.0,
            t in 0.0f32..=1.0,
            combo in 0u32..50,
        ) {
            let zone_max = zone_min + thickness;
            let radius = (zone_min + t * thickness).clamp(zone_min, zone_max);
            match evaluate(radius, zone_min, zone_max, combo, Difficulty::Medium) {
                HitOutcome::Hit { precision, combo: next, .. } => {
                    prop_assert!((0.0..=1.0).contains(&precision));
                    if precision > COMBO_PRECISION {
                        prop_assert_eq!(next, combo + 1);
                    } else {
                        prop_assert_eq!(next, 0);
                    }
                }
                HitOutcome::Miss { .. } => prop_assert!(false, "in-zone release must hit"),
            }
        }

        #[test]
        fn prop_milestone_is_smallest_crossed(prior in 0u64..20_000, gain in 0u64..20_000) {
            let next = prior + gain;
            if let Some(m) = milestone_crossed(prior, next) {
                prop_assert!(prior < m && m <= next);
                prop_assert!(MILESTONES.iter().all(|&other| other >= m || !(prior < other && other <= next)));
            } else {
                prop_assert!(MILESTONES.iter().all(|&m| !(prior < m && m <= next)));
            }
        }
    }
}
