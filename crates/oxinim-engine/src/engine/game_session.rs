use crate::{Heaps, Move, MoveError, Side, WinCondition};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    Playing,
    Finished { winner: Side },
}

/// A single game from the initial heaps to the last item taken.
///
/// The session owns the heap vector, alternates the two sides and decides the
/// winner once every heap is empty. Who controls each side (a human or a
/// computer player) is up to the caller.
#[derive(Debug, Clone)]
pub struct GameSession {
    initial_heaps: Heaps,
    heaps: Heaps,
    win_condition: WinCondition,
    to_move: Side,
    turn: usize,
    last_move: Option<(Side, Move)>,
    state: SessionState,
}

impl GameSession {
    #[must_use]
    pub fn new(heaps: Heaps, win_condition: WinCondition, first: Side) -> Self {
        // a game starting on cleared heaps has no moves; the first side never moves
        let state = if heaps.is_cleared() {
            SessionState::Finished {
                winner: win_condition.winner(first.opponent()),
            }
        } else {
            SessionState::Playing
        };
        Self {
            initial_heaps: heaps.clone(),
            heaps,
            win_condition,
            to_move: first,
            turn: 0,
            last_move: None,
            state,
        }
    }

    #[must_use]
    pub fn heaps(&self) -> &Heaps {
        &self.heaps
    }

    #[must_use]
    pub fn initial_heaps(&self) -> &Heaps {
        &self.initial_heaps
    }

    #[must_use]
    pub fn win_condition(&self) -> WinCondition {
        self.win_condition
    }

    /// Returns the side whose turn it is (or would be, once finished).
    #[must_use]
    pub fn to_move(&self) -> Side {
        self.to_move
    }

    /// Returns the number of moves applied so far.
    #[must_use]
    pub fn turn(&self) -> usize {
        self.turn
    }

    #[must_use]
    pub fn last_move(&self) -> Option<(Side, Move)> {
        self.last_move
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn winner(&self) -> Option<Side> {
        match self.state {
            SessionState::Playing => None,
            SessionState::Finished { winner } => Some(winner),
        }
    }

    /// Applies a move for the side to move and passes the turn.
    ///
    /// When the move empties the last heap, the session finishes and the
    /// winner is decided by the win condition.
    pub fn apply_move(&mut self, mv: Move) -> Result<(), MoveError> {
        if self.state.is_finished() {
            return Err(MoveError::GameOver);
        }
        self.heaps.apply(mv)?;

        let mover = self.to_move;
        self.turn += 1;
        self.last_move = Some((mover, mv));
        self.to_move = mover.opponent();
        if self.heaps.is_cleared() {
            self.state = SessionState::Finished {
                winner: self.win_condition.winner(mover),
            };
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(sizes: &[u32], win_condition: WinCondition) -> GameSession {
        let heaps = Heaps::new(sizes.iter().copied()).unwrap();
        GameSession::new(heaps, win_condition, Side::First)
    }

    #[test]
    fn test_turns_alternate() {
        let mut game = session(&[2, 3], WinCondition::Normal);
        assert_eq!(game.to_move(), Side::First);

        game.apply_move(Move::new(0, 1)).unwrap();
        assert_eq!(game.to_move(), Side::Second);
        assert_eq!(game.turn(), 1);
        assert_eq!(game.last_move(), Some((Side::First, Move::new(0, 1))));

        game.apply_move(Move::new(1, 3)).unwrap();
        assert_eq!(game.to_move(), Side::First);
        assert_eq!(game.heaps().as_slice(), &[1, 0]);
        assert_eq!(game.initial_heaps().as_slice(), &[2, 3]);
        assert!(game.state().is_playing());
    }

    #[test]
    fn test_illegal_move_keeps_turn() {
        let mut game = session(&[2, 3], WinCondition::Normal);
        assert!(game.apply_move(Move::new(0, 5)).is_err());
        assert!(game.apply_move(Move::new(9, 1)).is_err());
        assert_eq!(game.to_move(), Side::First);
        assert_eq!(game.turn(), 0);
        assert_eq!(game.last_move(), None);
    }

    #[test]
    fn test_normal_last_mover_wins() {
        let mut game = session(&[1, 1], WinCondition::Normal);
        game.apply_move(Move::new(0, 1)).unwrap();
        assert_eq!(game.winner(), None);
        game.apply_move(Move::new(1, 1)).unwrap();
        assert_eq!(game.winner(), Some(Side::Second));
        assert_eq!(game.apply_move(Move::new(0, 1)), Err(MoveError::GameOver));
    }

    #[test]
    fn test_misere_last_mover_loses() {
        let mut game = session(&[1, 1], WinCondition::Misere);
        game.apply_move(Move::new(0, 1)).unwrap();
        game.apply_move(Move::new(1, 1)).unwrap();
        assert_eq!(game.winner(), Some(Side::First));
    }

    #[test]
    fn test_single_move_game() {
        let mut game = session(&[0, 4], WinCondition::Normal);
        game.apply_move(Move::new(1, 4)).unwrap();
        assert_eq!(
            game.state(),
            SessionState::Finished {
                winner: Side::First
            }
        );
    }
}
