use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A single move: take `count` items from the heap at index `heap`.
///
/// Heap indices are 0-based internally; [`Display`](std::fmt::Display) shows
/// them 1-based the way players see them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[display("take {count} from heap #{}", heap + 1)]
pub struct Move {
    pub heap: usize,
    pub count: u32,
}

impl Move {
    #[must_use]
    pub const fn new(heap: usize, count: u32) -> Self {
        Self { heap, count }
    }
}

/// One of the two alternating movers.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::IsVariant,
)]
pub enum Side {
    First,
    Second,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::First, Side::Second];

    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Side::First => 0,
            Side::Second => 1,
        }
    }
}

/// Which mover wins when the last item is taken.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::IsVariant,
)]
pub enum WinCondition {
    /// The player taking the last item wins.
    #[default]
    #[display("normal")]
    Normal,
    /// The player taking the last item loses.
    #[display("misère")]
    Misere,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown win condition `{input}`: expected `normal` or `misere`")]
pub struct ParseWinConditionError {
    input: String,
}

/// Accepts `normal`, `misere` and `misère`, ignoring case.
impl FromStr for WinCondition {
    type Err = ParseWinConditionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "normal" => Ok(Self::Normal),
            "misere" | "misère" => Ok(Self::Misere),
            _ => Err(ParseWinConditionError {
                input: s.to_owned(),
            }),
        }
    }
}

impl WinCondition {
    #[must_use]
    pub const fn from_misere_flag(misere: bool) -> Self {
        if misere { Self::Misere } else { Self::Normal }
    }

    /// Returns the winner given the side that took the last item.
    #[must_use]
    pub const fn winner(self, last_mover: Side) -> Side {
        match self {
            WinCondition::Normal => last_mover,
            WinCondition::Misere => last_mover.opponent(),
        }
    }
}
