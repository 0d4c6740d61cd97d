use chrono::Utc;
use oxinim_ai::{AiType, ComputerPlayer};
use oxinim_engine::{GameSeed, GameSession, HeapLayout, Move, MoveError, Side, WinCondition};
use rand::Rng as _;
use rand_pcg::Pcg32;

use crate::schema::record::{Controller, MoveRecord, PlayerInfo, RecordedGame};

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::FromStr)]
pub(crate) enum Opponent {
    #[display("human")]
    Human,
    #[default]
    #[display("computer")]
    Computer,
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::FromStr)]
pub(crate) enum FirstMover {
    #[display("you")]
    You,
    #[display("opponent")]
    Opponent,
    /// Toss a coin from the game seed
    #[default]
    #[display("random")]
    Random,
}

/// Settings of a game, fixed before the first move.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct GameConfig {
    pub(crate) win_condition: WinCondition,
    pub(crate) layout: HeapLayout,
    pub(crate) opponent: Opponent,
    pub(crate) ai_type: AiType,
    pub(crate) first: FirstMover,
}

impl GameConfig {
    /// Returns `(you, opponent)`.
    fn players(&self) -> (PlayerInfo, PlayerInfo) {
        let player = |name: &str, controller| PlayerInfo {
            name: name.to_owned(),
            controller,
        };
        match self.opponent {
            Opponent::Computer => (
                player("You", Controller::Human),
                player("Computer", Controller::Computer(self.ai_type)),
            ),
            Opponent::Human => (
                player("Player 1", Controller::Human),
                player("Player 2", Controller::Human),
            ),
        }
    }
}

/// One game between two seated players.
///
/// Wraps [`GameSession`] with the players' identities, the seeded generator
/// that drives every random choice, and the list of applied moves.
#[derive(Debug)]
pub(crate) struct Match {
    config: GameConfig,
    seed: GameSeed,
    rng: Pcg32,
    players: [PlayerInfo; 2],
    session: GameSession,
    moves: Vec<MoveRecord>,
}

impl Match {
    pub(crate) fn new(config: GameConfig, seed: GameSeed) -> Self {
        let mut rng = seed.rng();
        let heaps = config.layout.generate(&mut rng);
        let you_first = match config.first {
            FirstMover::You => true,
            FirstMover::Opponent => false,
            FirstMover::Random => rng.random(),
        };
        let (you, opponent) = config.players();
        let players = if you_first {
            [you, opponent]
        } else {
            [opponent, you]
        };

        tracing::info!(
            %seed,
            heaps = ?heaps.as_slice(),
            win_condition = %config.win_condition,
            first = %players[0].name,
            "new game"
        );
        let session = GameSession::new(heaps, config.win_condition, Side::First);
        Self {
            config,
            seed,
            rng,
            players,
            session,
            moves: vec![],
        }
    }

    /// Starts another game with the same settings and a seed drawn from this one.
    pub(crate) fn next_game(&mut self) -> Self {
        let seed = self.rng.random();
        Self::new(self.config, seed)
    }

    pub(crate) fn session(&self) -> &GameSession {
        &self.session
    }

    pub(crate) fn player(&self, side: Side) -> &PlayerInfo {
        &self.players[side.index()]
    }

    pub(crate) fn current_player(&self) -> &PlayerInfo {
        self.player(self.session.to_move())
    }

    pub(crate) fn is_computer_turn(&self) -> bool {
        self.session.state().is_playing() && self.current_player().controller.is_computer()
    }

    pub(crate) fn is_human_turn(&self) -> bool {
        self.session.state().is_playing() && self.current_player().controller.is_human()
    }

    /// Lets the computer seated at the side to move choose and play its move.
    pub(crate) fn play_computer_move(&mut self) -> anyhow::Result<Move> {
        let Controller::Computer(ai_type) = self.current_player().controller else {
            anyhow::bail!("it is not the computer's turn");
        };
        let computer = ComputerPlayer::new(ai_type, self.config.win_condition);
        let mv = computer.select_move(self.session.heaps(), &mut self.rng)?;
        self.apply(mv)?;
        Ok(mv)
    }

    pub(crate) fn play_human_move(&mut self, mv: Move) -> Result<(), MoveError> {
        if !self.is_human_turn() {
            return Err(MoveError::GameOver);
        }
        self.apply(mv)
    }

    fn apply(&mut self, mv: Move) -> Result<(), MoveError> {
        let side = self.session.to_move();
        let heaps_before = self.session.heaps().clone();
        self.session.apply_move(mv)?;

        tracing::debug!(player = %self.player(side).name, %mv, "move applied");
        self.moves.push(MoveRecord {
            turn: self.moves.len(),
            side,
            heaps_before,
            mv,
        });
        if let Some(winner) = self.session.winner() {
            tracing::info!(
                winner = %self.player(winner).name,
                turns = self.moves.len(),
                "game over"
            );
        }
        Ok(())
    }

    pub(crate) fn to_record(&self) -> RecordedGame {
        RecordedGame {
            recorded_at: Utc::now(),
            seed: self.seed,
            win_condition: self.config.win_condition,
            layout: self.config.layout,
            players: self.players.clone(),
            initial_heaps: self.session.initial_heaps().clone(),
            moves: self.moves.clone(),
            winner: self.session.winner(),
        }
    }
}
