//! Execution engine: walks a board turn by turn until it halts.
//!
//! - `state`: token position, score, counters
//! - `dice`: the `Dice` seam and a scripted source for replays
//! - `event`: per-turn events and observers
//! - `machine`: the state machine itself

pub mod state;
pub mod dice;
pub mod event;
pub mod machine;

pub use state::{GameState, Status};
pub use dice::{Dice, ScriptedDice};
pub use event::{TurnEvent, TurnObserver};
pub use machine::{run_board, Engine, Outcome};
