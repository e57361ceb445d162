//! Lifetime statistics
//!
//! Monotonic counters that outlive individual runs. Built from persisted
//! storage at startup and updated from simulation events.

use serde::{Deserialize, Serialize};

use crate::sim::GameEvent;

/// Lifetime counters (stored as a JSON object under the stats key)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LifetimeStats {
    #[serde(rename = "totalPlaytime")]
    pub total_playtime_seconds: u64,
    #[serde(rename = "totalGames")]
    pub total_games_started: u64,
    #[serde(rename = "totalScore")]
    pub cumulative_score: u64,
    #[serde(rename = "highestCombo")]
    pub highest_combo: u32,
    #[serde(rename = "totalAttempts")]
    pub total_release_attempts: u64,
    #[serde(rename = "successfulAttempts")]
    pub successful_release_attempts: u64,
}

impl LifetimeStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one event into the counters. Returns true if anything changed.
    pub fn record(&mut self, event: &GameEvent) -> bool {
        match *event {
            GameEvent::GameStarted { .. } => self.total_games_started += 1,
            GameEvent::HoldReleased => self.total_release_attempts += 1,
            GameEvent::Hit { .. } => self.successful_release_attempts += 1,
            GameEvent::GameOver { score, combo, .. } => {
                self.cumulative_score += score;
                self.highest_combo = self.highest_combo.max(combo);
            }
            GameEvent::SecondPlayed => self.total_playtime_seconds += 1,
            _ => return false,
        }
        true
    }

    /// Mean final score per game started
    pub fn average_score(&self) -> u64 {
        if self.total_games_started == 0 {
            0
        } else {
            self.cumulative_score / self.total_games_started
        }
    }

    /// Share of releases that landed in the zone, as a whole percent
    pub fn accuracy_percent(&self) -> u64 {
        if self.total_release_attempts == 0 {
            0
        } else {
            self.successful_release_attempts * 100 / self.total_release_attempts
        }
    }

    /// Playtime as "{m}m {s}s"
    pub fn playtime_display(&self) -> String {
        format!(
            "{}m {}s",
            self.total_playtime_seconds / 60,
            self.total_playtime_seconds % 60
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Difficulty, FailCause, PrecisionTier};

    fn hit() -> GameEvent {
        GameEvent::Hit {
            precision: 1.0,
            tier: PrecisionTier::Perfect,
            points: 10,
            combo: 1,
            score: 10,
        }
    }

    #[test]
    fn test_record_run() {
        let mut stats = LifetimeStats::new();
        assert!(stats.record(&GameEvent::GameStarted { difficulty: Difficulty::Medium }));
        assert!(!stats.record(&GameEvent::HoldStarted));
        stats.record(&GameEvent::HoldReleased);
        stats.record(&hit());
        stats.record(&GameEvent::HoldReleased);
        stats.record(&GameEvent::GameOver {
            cause: FailCause::Released,
            score: 10,
            combo: 1,
            near_miss: false,
        });

        assert_eq!(stats.total_games_started, 1);
        assert_eq!(stats.total_release_attempts, 2);
        assert_eq!(stats.successful_release_attempts, 1);
        assert_eq!(stats.cumulative_score, 10);
        assert_eq!(stats.highest_combo, 1);
        assert_eq!(stats.accuracy_percent(), 50);
        assert_eq!(stats.average_score(), 10);
    }

    #[test]
    fn test_highest_combo_keeps_max() {
        let mut stats = LifetimeStats {
            highest_combo: 9,
            ..Default::default()
        };
        stats.record(&GameEvent::GameOver {
            cause: FailCause::Overshoot,
            score: 0,
            combo: 3,
            near_miss: false,
        });
        assert_eq!(stats.highest_combo, 9);
    }

    #[test]
    fn test_derived_figures_with_no_games() {
        let stats = LifetimeStats::new();
        assert_eq!(stats.average_score(), 0);
        assert_eq!(stats.accuracy_percent(), 0);
        assert_eq!(stats.playtime_display(), "0m 0s");
    }

    #[test]
    fn test_playtime_display() {
        let stats = LifetimeStats {
            total_playtime_seconds: 125,
            ..Default::default()
        };
        assert_eq!(stats.playtime_display(), "2m 5s");
    }

    #[test]
    fn test_json_shape() {
        let stats = LifetimeStats {
            total_playtime_seconds: 61,
            total_games_started: 3,
            cumulative_score: 420,
            highest_combo: 7,
            total_release_attempts: 12,
            successful_release_attempts: 9,
        };
        let json: serde_json::Value = serde_json::to_value(stats).unwrap();
        assert_eq!(json["totalPlaytime"], 61);
        assert_eq!(json["totalGames"], 3);
        assert_eq!(json["totalScore"], 420);
        assert_eq!(json["highestCombo"], 7);
        assert_eq!(json["totalAttempts"], 12);
        assert_eq!(json["successfulAttempts"], 9);

        // Missing fields default to zero
        let partial: LifetimeStats = serde_json::from_str(r#"{"totalGames": 4}"#).unwrap();
        assert_eq!(partial.total_games_started, 4);
        assert_eq!(partial.cumulative_score, 0);
    }
}
