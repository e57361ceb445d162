//! Fixed-step simulation tick
//!
//! One call is one display frame. The ring grows by the round's speed per
//! call regardless of how much real time passed, so the clock can be driven
//! synchronously in tests.

use super::state::{FailCause, GameEvent, GamePhase, GameState};
use crate::consts::FRAME_RATE;

/// Advance the game state by one frame
pub fn tick(state: &mut GameState) {
    if state.phase != GamePhase::Playing {
        return;
    }

    state.play_ticks += 1;
    if state.play_ticks % FRAME_RATE as u64 == 0 {
        state.emit(GameEvent::SecondPlayed);
    }

    if !state.is_advancing() {
        return;
    }

    let next_radius = state.radius + state.round.speed;
    if next_radius > state.viewport.overshoot_limit() {
        // Ring stays where it was; running off screen counts as a miss
        state.fail(FailCause::Overshoot, false);
        return;
    }
    state.radius = next_radius;
}
