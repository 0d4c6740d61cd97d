use chrono::{DateTime, Utc};
use oxinim_ai::AiType;
use oxinim_engine::{GameSeed, HeapLayout, Heaps, Move, Side, WinCondition};
use serde::{Deserialize, Serialize};

/// A finished (or abandoned) game with everything needed to replay it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordedGame {
    /// Timestamp when recording was created (ISO 8601 format)
    pub recorded_at: DateTime<Utc>,
    /// Seed used for heap generation, the coin toss and computer moves
    pub seed: GameSeed,
    pub win_condition: WinCondition,
    pub layout: HeapLayout,
    /// Players in move order: `[first, second]`
    pub players: [PlayerInfo; 2],
    pub initial_heaps: Heaps,
    pub moves: Vec<MoveRecord>,
    /// `None` when the game was quit before the last item was taken
    pub winner: Option<Side>,
}

/// A single applied move and the position it was played from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// Turn number (0-indexed)
    pub turn: usize,
    pub side: Side,
    pub heaps_before: Heaps,
    #[serde(rename = "move")]
    pub mv: Move,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInfo {
    pub name: String,
    pub controller: Controller,
}

/// Who decides the moves of a side
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::IsVariant,
)]
pub enum Controller {
    #[display("human")]
    Human,
    #[display("{_0}")]
    Computer(AiType),
}
