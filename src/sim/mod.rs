//! Drivers that wire generation and execution together.
//!
//! - `playthrough`: one seeded game, with recording and roll-for-roll replay
//! - `batch`: many independent games, one stream each

pub mod playthrough;
pub mod batch;

pub use playthrough::{Playthrough, PlaythroughBuilder, Recording};
pub use batch::{run_batch, BatchConfig, BatchSummary, GameRecord};
