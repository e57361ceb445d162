//! Vibration patterns
//!
//! Patterns are alternating on/off durations in milliseconds, as accepted by
//! the browser vibration API.

use crate::sim::{GameEvent, PrecisionTier};

pub const PERFECT_HIT: &[u32] = &[50, 30, 50];
pub const GREAT_HIT: &[u32] = &[30];
pub const NICE_HIT: &[u32] = &[15];
pub const NEAR_MISS: &[u32] = &[10, 50, 10];
pub const FAILURE: &[u32] = &[100];

/// Pattern to play for an event, if any
pub fn pattern_for(event: &GameEvent) -> Option<&'static [u32]> {
    match *event {
        GameEvent::Hit { tier, .. } => Some(match tier {
            PrecisionTier::Perfect => PERFECT_HIT,
            PrecisionTier::Great => GREAT_HIT,
            PrecisionTier::Nice => NICE_HIT,
        }),
        GameEvent::GameOver { near_miss: true, .. } => Some(NEAR_MISS),
        GameEvent::GameOver { .. } => Some(FAILURE),
        _ => None,
    }
}

/// Platform vibration backend
pub trait Haptics {
    fn vibrate(&mut self, pattern: &[u32]);
}

/// Device without vibration
#[derive(Debug, Default)]
pub struct NoHaptics;

impl Haptics for NoHaptics {
    fn vibrate(&mut self, _pattern: &[u32]) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::FailCause;

    #[test]
    fn test_patterns() {
        let hit = |tier| GameEvent::Hit {
            precision: 0.5,
            tier,
            points: 1,
            combo: 0,
            score: 1,
        };
        assert_eq!(pattern_for(&hit(PrecisionTier::Perfect)), Some(&[50, 30, 50][..]));
        assert_eq!(pattern_for(&hit(PrecisionTier::Nice)), Some(&[15][..]));

        let over = |near_miss| GameEvent::GameOver {
            cause: FailCause::Released,
            score: 0,
            combo: 0,
            near_miss,
        };
        assert_eq!(pattern_for(&over(true)), Some(&[10, 50, 10][..]));
        assert_eq!(pattern_for(&over(false)), Some(&[100][..]));
        assert_eq!(pattern_for(&GameEvent::HoldStarted), None);
    }
}
