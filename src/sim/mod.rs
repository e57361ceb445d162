//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick advances the ring by a fixed step (no wall clock)
//! - Seeded RNG only
//! - No rendering, storage or platform dependencies
//!
//! Side effects leave the module as [`GameEvent`]s queued on the state.

pub mod difficulty;
pub mod input;
pub mod scoring;
pub mod state;
pub mod tick;

pub use difficulty::{Difficulty, RoundParams, Viewport, compute_round_parameters};
pub use input::{PointerEdge, PointerInterpreter};
pub use scoring::{HitOutcome, PrecisionTier, evaluate, milestone_crossed, precision};
pub use state::{FailCause, GameEvent, GamePhase, GameState, RunSnapshot};
pub use tick::tick;
