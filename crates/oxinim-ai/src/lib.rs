pub use self::{candidates::*, player::*, strategist::*};

mod candidates;
mod player;
mod strategist;

use oxinim_engine::InvalidInput;
use serde::{Deserialize, Serialize};

#[derive(
    Default,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::FromStr,
)]
pub enum AiType {
    /// Plays the Nim-sum strategy, with misère endgame handling.
    #[default]
    #[display("optimal")]
    Optimal,
    /// Takes a random number of items from a random nonempty heap.
    #[display("random")]
    Random,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum StrategyError {
    #[display("invalid heap vector: {_0}")]
    InvalidInput(InvalidInput),
    #[display("no move available: every heap is empty")]
    PreconditionViolation,
    #[display("no zeroing move found for {heaps:?} although its nim-sum is non-zero")]
    InternalInvariantViolation { heaps: Vec<u32> },
}

impl From<InvalidInput> for StrategyError {
    fn from(err: InvalidInput) -> Self {
        Self::InvalidInput(err)
    }
}
