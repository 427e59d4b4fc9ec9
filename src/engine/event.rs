//! Turn events and observers.
//!
//! The engine emits one `TurnEvent` per executed turn. Observers (a
//! renderer, a recorder, a log) receive events but never feed anything
//! back into the engine.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::board::Instruction;

/// What a renderer sees after each turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnEvent {
    /// 1-based turn number.
    pub turn: u64,

    /// Position after the turn.
    pub position: usize,

    /// Score after the turn.
    pub score: i64,

    /// Instruction at the new position.
    pub instruction: Instruction,

    /// Most recent die value. Carried over unchanged on jump turns.
    pub last_roll: u32,

    /// Whether this turn rolled the die (false for jumps).
    pub rolled: bool,
}

impl fmt::Display for TurnEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Pos: {} Score: {}, instruction {} Rolled: {}",
            self.position, self.score, self.instruction, self.last_roll
        )
    }
}

/// Receives turn events from a running engine.
pub trait TurnObserver {
    fn on_turn(&mut self, event: &TurnEvent);
}

impl<F: FnMut(&TurnEvent)> TurnObserver for F {
    fn on_turn(&mut self, event: &TurnEvent) {
        self(event)
    }
}

/// Records every event.
impl TurnObserver for Vec<TurnEvent> {
    fn on_turn(&mut self, event: &TurnEvent) {
        self.push(*event);
    }
}

/// Ignores events.
impl TurnObserver for () {
    fn on_turn(&mut self, _event: &TurnEvent) {}
}
