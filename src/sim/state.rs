//! Game state and round state machine
//!
//! `GameState` owns everything that changes during a session. It is mutated
//! only through the transition methods below (and the clock in `tick`);
//! transitions that are not allowed in the current phase are ignored and
//! return `false`. Every observable side effect is queued as a [`GameEvent`]
//! for the caller to drain.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty::{Difficulty, RoundParams, Viewport, compute_round_parameters};
use super::scoring::{HitOutcome, PrecisionTier, evaluate, is_combo_callout, milestone_crossed};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Main menu
    Intro,
    /// Active run
    Playing,
    /// Run suspended by the player
    Paused,
    /// Run ended
    GameOver,
    /// Lifetime statistics screen (menu only)
    Stats,
}

/// How a run was lost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailCause {
    /// Released outside the safe zone
    Released,
    /// Ring grew past the edge of the screen
    Overshoot,
}

/// Discrete notifications emitted by the state machine
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    GameStarted { difficulty: Difficulty },
    RoundStarted { params: RoundParams },
    HoldStarted,
    /// Every explicit release, hit or miss
    HoldReleased,
    Hit {
        precision: f32,
        tier: PrecisionTier,
        points: u64,
        combo: u32,
        score: u64,
    },
    /// Combo reached a multiple of five
    ComboStreak { combo: u32 },
    MilestoneReached { milestone: u64 },
    /// Milestone celebration dismissed
    MilestoneAcknowledged,
    BestImproved { best: u64 },
    GameOver {
        cause: FailCause,
        score: u64,
        combo: u32,
        near_miss: bool,
    },
    Paused,
    Resumed,
    ExitedToMenu,
    /// One second of Playing time has elapsed (frame count based)
    SecondPlayed,
}

/// What the display surface needs each frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RunSnapshot {
    pub phase: GamePhase,
    pub radius: f32,
    pub zone_min: f32,
    pub zone_max: f32,
    pub holding: bool,
    pub in_zone: bool,
    pub combo: u32,
    pub score: u64,
    pub best: u64,
    pub pending_milestone: Option<u64>,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: GamePhase,
    pub difficulty: Difficulty,
    /// Run score
    pub score: u64,
    /// Best score ever (never decreases)
    pub best: u64,
    /// Consecutive near-perfect hits
    pub combo: u32,
    /// Current ring radius (pixels)
    pub radius: f32,
    /// Active round parameters
    pub round: RoundParams,
    /// Pointer is held and the ring is growing
    pub holding: bool,
    /// Milestone awaiting acknowledgement; suspends the round while set
    pub pending_milestone: Option<u64>,
    /// Display size used for zone placement and the overshoot limit
    pub viewport: Viewport,
    /// Frames simulated while Playing
    pub play_ticks: u64,
    rng: Pcg32,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a session at the menu with the given RNG seed and best score
    pub fn new(seed: u64, best: u64, viewport: Viewport) -> Self {
        Self {
            phase: GamePhase::Intro,
            difficulty: Difficulty::default(),
            score: 0,
            best,
            combo: 0,
            radius: 0.0,
            round: RoundParams {
                zone_min: 100.0,
                zone_max: 150.0,
                speed: Difficulty::default().base_speed(),
            },
            holding: false,
            pending_milestone: None,
            viewport,
            play_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        }
    }

    /// Take all events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Whether the ring should grow this frame
    #[inline]
    pub fn is_advancing(&self) -> bool {
        self.phase == GamePhase::Playing && self.holding && self.pending_milestone.is_none()
    }

    /// Update the display size (applies to the overshoot check immediately
    /// and to zone placement from the next round)
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn snapshot(&self) -> RunSnapshot {
        RunSnapshot {
            phase: self.phase,
            radius: self.radius,
            zone_min: self.round.zone_min,
            zone_max: self.round.zone_max,
            holding: self.holding,
            in_zone: self.round.contains(self.radius),
            combo: self.combo,
            score: self.score,
            best: self.best,
            pending_milestone: self.pending_milestone,
        }
    }

    /// Roll a fresh round at the current score
    fn new_round(&mut self) {
        self.round = compute_round_parameters(self.score, self.difficulty, self.viewport, &mut self.rng);
        self.radius = 0.0;
        self.holding = false;
        log::debug!(
            "Round: zone {:.1}..{:.1}, speed {:.2}",
            self.round.zone_min,
            self.round.zone_max,
            self.round.speed
        );
        self.emit(GameEvent::RoundStarted { params: self.round });
    }

    /// Start a run (from the menu, or retry after game over)
    pub fn start_game(&mut self, difficulty: Difficulty) -> bool {
        if !matches!(self.phase, GamePhase::Intro | GamePhase::GameOver) {
            return false;
        }
        self.difficulty = difficulty;
        self.score = 0;
        self.combo = 0;
        self.pending_milestone = None;
        self.emit(GameEvent::GameStarted { difficulty });
        self.new_round();
        self.phase = GamePhase::Playing;
        true
    }

    /// Retry after game over with the same difficulty
    pub fn retry(&mut self) -> bool {
        if self.phase != GamePhase::GameOver {
            return false;
        }
        self.start_game(self.difficulty)
    }

    /// Pointer went down: start growing the ring
    pub fn begin_hold(&mut self) -> bool {
        if self.phase != GamePhase::Playing || self.pending_milestone.is_some() || self.holding {
            return false;
        }
        self.holding = true;
        self.emit(GameEvent::HoldStarted);
        true
    }

    /// Pointer came up: score the release
    pub fn end_hold(&mut self) -> bool {
        if !self.holding {
            return false;
        }
        self.holding = false;
        self.emit(GameEvent::HoldReleased);

        let outcome = evaluate(
            self.radius,
            self.round.zone_min,
            self.round.zone_max,
            self.combo,
            self.difficulty,
        );

        match outcome {
            HitOutcome::Hit { precision, tier, points, combo } => {
                let prior = self.score;
                self.score += points;
                self.combo = combo;
                self.emit(GameEvent::Hit {
                    precision,
                    tier,
                    points,
                    combo,
                    score: self.score,
                });

                if is_combo_callout(combo) {
                    self.emit(GameEvent::ComboStreak { combo });
                }

                if self.score > self.best {
                    self.best = self.score;
                    self.emit(GameEvent::BestImproved { best: self.best });
                }

                if let Some(milestone) = milestone_crossed(prior, self.score) {
                    log::info!("Milestone {} reached", milestone);
                    self.pending_milestone = Some(milestone);
                    self.emit(GameEvent::MilestoneReached { milestone });
                } else {
                    self.new_round();
                }
            }
            HitOutcome::Miss { near_miss } => {
                self.fail(FailCause::Released, near_miss);
            }
        }
        true
    }

    /// End the run
    pub(crate) fn fail(&mut self, cause: FailCause, near_miss: bool) {
        self.holding = false;
        self.phase = GamePhase::GameOver;
        log::info!(
            "Game over ({:?}): score {}, combo {}",
            cause,
            self.score,
            self.combo
        );
        self.emit(GameEvent::GameOver {
            cause,
            score: self.score,
            combo: self.combo,
            near_miss,
        });
    }

    /// Dismiss the milestone celebration and continue at the same score
    pub fn acknowledge_milestone(&mut self) -> bool {
        if self.pending_milestone.is_none() {
            return false;
        }
        self.pending_milestone = None;
        self.emit(GameEvent::MilestoneAcknowledged);
        self.new_round();
        true
    }

    /// Toggle between Playing and Paused
    pub fn toggle_pause(&mut self) -> bool {
        if self.pending_milestone.is_some() {
            return false;
        }
        match self.phase {
            GamePhase::Playing => {
                self.phase = GamePhase::Paused;
                self.holding = false;
                self.emit(GameEvent::Paused);
                true
            }
            GamePhase::Paused => {
                self.phase = GamePhase::Playing;
                self.emit(GameEvent::Resumed);
                true
            }
            _ => false,
        }
    }

    /// Back to the main menu
    pub fn exit_to_menu(&mut self) -> bool {
        match self.phase {
            GamePhase::Paused | GamePhase::GameOver | GamePhase::Stats => {
                self.phase = GamePhase::Intro;
                self.holding = false;
                self.pending_milestone = None;
                self.emit(GameEvent::ExitedToMenu);
                true
            }
            _ => false,
        }
    }

    /// Open the statistics screen from the menu
    pub fn show_stats(&mut self) -> bool {
        if self.phase != GamePhase::Intro {
            return false;
        }
        self.phase = GamePhase::Stats;
        true
    }
}
