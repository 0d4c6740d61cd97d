use oxinim_engine::{Heaps, Move, WinCondition};
use rand::Rng;

use crate::{AiType, CandidateSet, StrategyError, decide_move};

/// A computer-controlled side.
///
/// The configuration is fixed when the player is created; the random number
/// generator is supplied per call so that one seeded generator can drive a
/// whole game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComputerPlayer {
    ai_type: AiType,
    win_condition: WinCondition,
}

impl ComputerPlayer {
    #[must_use]
    pub const fn new(ai_type: AiType, win_condition: WinCondition) -> Self {
        Self {
            ai_type,
            win_condition,
        }
    }

    #[must_use]
    pub const fn ai_type(&self) -> AiType {
        self.ai_type
    }

    pub fn select_move<R>(&self, heaps: &Heaps, rng: &mut R) -> Result<Move, StrategyError>
    where
        R: Rng + ?Sized,
    {
        let mv = match self.ai_type {
            AiType::Optimal => decide_move(heaps, self.win_condition, rng)?,
            AiType::Random => random_move(heaps, rng)?,
        };
        tracing::debug!(
            ai = %self.ai_type,
            win_condition = %self.win_condition,
            heaps = ?heaps.as_slice(),
            nim_sum = heaps.nim_sum(),
            %mv,
            "computer move selected"
        );
        Ok(mv)
    }
}

fn random_move<R>(heaps: &[u32], rng: &mut R) -> Result<Move, StrategyError>
where
    R: Rng + ?Sized,
{
    let heap = CandidateSet::nonempty(heaps)
        .pick(rng)
        .ok_or(StrategyError::PreconditionViolation)?;
    Ok(Move::new(heap, rng.random_range(1..=heaps[heap])))
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    #[test]
    fn test_random_player_moves_are_legal() {
        let player = ComputerPlayer::new(AiType::Random, WinCondition::Normal);
        let mut rng = Pcg32::seed_from_u64(5);
        let heaps = Heaps::new([0, 3, 0, 7]).unwrap();
        let mut seen_heaps = [false; 4];
        for _ in 0..200 {
            let mv = player.select_move(&heaps, &mut rng).unwrap();
            assert!(heaps.validate(mv).is_ok(), "{mv:?}");
            seen_heaps[mv.heap] = true;
        }
        assert_eq!(seen_heaps, [false, true, false, true]);
    }

    #[test]
    fn test_optimal_player_uses_strategist() {
        let player = ComputerPlayer::new(AiType::Optimal, WinCondition::Misere);
        let mut rng = Pcg32::seed_from_u64(5);
        let heaps = Heaps::new([0, 0, 5]).unwrap();
        assert_eq!(player.select_move(&heaps, &mut rng), Ok(Move::new(2, 4)));
    }

    #[test]
    fn test_cleared_heaps_are_rejected() {
        let mut rng = Pcg32::seed_from_u64(5);
        let heaps = Heaps::new([0, 0]).unwrap();
        for ai_type in [AiType::Optimal, AiType::Random] {
            let player = ComputerPlayer::new(ai_type, WinCondition::Normal);
            assert_eq!(
                player.select_move(&heaps, &mut rng),
                Err(StrategyError::PreconditionViolation)
            );
        }
    }

    #[test]
    fn test_ai_type_parse() {
        assert_eq!("optimal".parse::<AiType>().unwrap(), AiType::Optimal);
        assert_eq!("Random".parse::<AiType>().unwrap(), AiType::Random);
        assert!("genius".parse::<AiType>().is_err());
    }
}
