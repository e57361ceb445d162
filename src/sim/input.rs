//! Pointer input interpretation
//!
//! Turns raw press/release/leave edges into hold transitions. Duplicate edges
//! are harmless, and losing the pointer always releases.

use serde::{Deserialize, Serialize};

use super::state::GameState;

/// Raw edge delivered by the input source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerEdge {
    Press,
    Release,
    /// Pointer left the play surface (treated as a release)
    Leave,
}

/// Tracks the physical pointer so repeated edges collapse to one transition
#[derive(Debug, Clone, Default)]
pub struct PointerInterpreter {
    down: bool,
}

impl PointerInterpreter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the pointer is currently down
    pub fn is_down(&self) -> bool {
        self.down
    }

    /// Apply an edge to the game. Returns true if it caused a transition.
    pub fn handle(&mut self, state: &mut GameState, edge: PointerEdge) -> bool {
        match edge {
            PointerEdge::Press => {
                if self.down && state.holding {
                    return false;
                }
                self.down = true;
                state.begin_hold()
            }
            PointerEdge::Release | PointerEdge::Leave => {
                self.down = false;
                // Always forwarded; end_hold is a no-op unless holding
                state.end_hold()
            }
        }
    }
}
