pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("nim-sum requires at least 2 heaps, got {len}")]
pub struct InvalidInput {
    pub len: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum HeapsError {
    #[display("at least {min} heaps are required, got {len}", min = Heaps::MIN_LEN)]
    TooFew { len: usize },
    #[display("at most {max} heaps are supported, got {len}", max = Heaps::MAX_LEN)]
    TooMany { len: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum MoveError {
    #[display("the game is already over")]
    GameOver,
    #[display("heap #{} does not exist", heap + 1)]
    HeapOutOfRange { heap: usize },
    #[display("at least one item must be taken")]
    ZeroCount,
    #[display("heap #{} holds only {available} items", heap + 1)]
    TooMany {
        heap: usize,
        requested: u32,
        available: u32,
    },
}
