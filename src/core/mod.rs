//! Core building blocks: errors, the random stream, configuration.
//!
//! Nothing here knows about boards or turns; the `board` and `engine`
//! modules build on these types.

pub mod error;
pub mod rng;
pub mod config;

pub use error::{Error, Result};
pub use rng::{parse_seed, GameRng, GameRngState};
pub use config::{EngineConfig, GeneratorConfig, KindWeights};
