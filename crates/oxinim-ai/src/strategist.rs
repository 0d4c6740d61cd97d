//! Nim-sum move selection.
//!
//! Under normal play a position is lost for the mover iff its Nim-sum is zero,
//! and from any other position some move brings the Nim-sum back to zero.
//! [`decide_move`] searches for that move. Under misère play the same search
//! is correct until the position is about to consist of unit heaps only; the
//! endgame branches below handle those positions by leaving the opponent an
//! odd number of unit heaps.

use oxinim_engine::{InvalidInput, Move, WinCondition, nim_sum};
use rand::Rng;

use crate::{CandidateSet, StrategyError};

/// Chooses the computer's move for the given heap vector.
///
/// Exactly one call is made per computer turn. The heap vector is only read;
/// applying the move is up to the caller. Every random choice (the preselected
/// heap, the forced move in a lost position) is drawn from `rng`.
///
/// # Errors
///
/// - [`StrategyError::InvalidInput`] when fewer than two heaps are given
/// - [`StrategyError::PreconditionViolation`] when every heap is empty
/// - [`StrategyError::InternalInvariantViolation`] when the search runs out
///   of heaps although the Nim-sum is non-zero (a bug, never expected)
///
/// # Example
///
/// ```
/// use oxinim_ai::decide_move;
/// use oxinim_engine::{GameSeed, Move, WinCondition};
///
/// let mut rng = GameSeed::from_bytes([0; 16]).rng();
/// let mv = decide_move(&[3, 4, 5], WinCondition::Normal, &mut rng).unwrap();
/// assert_eq!(mv, Move::new(0, 2));
/// ```
pub fn decide_move<R>(
    heaps: &[u32],
    win_condition: WinCondition,
    rng: &mut R,
) -> Result<Move, StrategyError>
where
    R: Rng + ?Sized,
{
    let total = nim_sum(heaps)?;
    let candidates = CandidateSet::nonempty(heaps);
    let selected = candidates
        .pick(rng)
        .ok_or(StrategyError::PreconditionViolation)?;

    if win_condition.is_misere()
        && let Some(mv) = misere_endgame(heaps, selected)
    {
        tracing::trace!(?heaps, %mv, "misère endgame move");
        return Ok(mv);
    }

    let mv = if total == 0 {
        forced_move(heaps, selected, rng)
    } else {
        zeroing_search(heaps, total, selected, candidates, rng)?
    };

    if win_condition.is_misere() {
        return Ok(leave_odd_unit_heaps(heaps, mv));
    }
    Ok(mv)
}

/// Returns `true` if the player to move wins with optimal play.
///
/// # Errors
///
/// Returns [`InvalidInput`] when fewer than two heaps are given.
pub fn is_winning_position(
    heaps: &[u32],
    win_condition: WinCondition,
) -> Result<bool, InvalidInput> {
    let total = nim_sum(heaps)?;
    let winning = match win_condition {
        WinCondition::Normal => total != 0,
        WinCondition::Misere if heaps.iter().all(|&size| size <= 1) => total == 0,
        WinCondition::Misere => total != 0,
    };
    Ok(winning)
}

/// The mover is lost against optimal play; any legal move will do.
fn forced_move<R>(heaps: &[u32], selected: usize, rng: &mut R) -> Move
where
    R: Rng + ?Sized,
{
    let count = rng.random_range(1..=heaps[selected]);
    Move::new(selected, count)
}

/// Finds a move that drives the Nim-sum to zero.
///
/// Heaps are tried in random order starting with `first`. A heap has at most
/// one zeroing count: the one that leaves it at the XOR of the other heaps.
fn zeroing_search<R>(
    heaps: &[u32],
    total: u32,
    first: usize,
    mut candidates: CandidateSet,
    rng: &mut R,
) -> Result<Move, StrategyError>
where
    R: Rng + ?Sized,
{
    let mut heap = first;
    loop {
        let size = heaps[heap];
        let rest = total ^ size;
        if rest < size {
            return Ok(Move::new(heap, size - rest));
        }

        candidates.exclude(heap);
        heap = candidates
            .pick(rng)
            .ok_or_else(|| StrategyError::InternalInvariantViolation {
                heaps: heaps.to_vec(),
            })?;
    }
}

/// Small misère endgames with at most three nonempty heaps.
///
/// Returns `None` when the position is not one of them and the general search
/// applies.
fn misere_endgame(heaps: &[u32], selected: usize) -> Option<Move> {
    let nonempty: Vec<usize> = (0..heaps.len()).filter(|&i| heaps[i] > 0).collect();
    let units = nonempty.iter().filter(|&&i| heaps[i] == 1).count();

    match (nonempty.as_slice(), units) {
        // leave a single item; a lone unit heap has to be taken
        (&[only], _) => Some(Move::new(only, heaps[only].saturating_sub(1).max(1))),
        // take the larger heap entirely, the opponent gets the last item
        (&[a, b], 1) => {
            let heap = if heaps[selected] == 1 {
                if selected == a { b } else { a }
            } else {
                selected
            };
            Some(Move::new(heap, heaps[heap]))
        }
        (&[_, _], 2) => Some(Move::new(selected, 1)),
        // three unit heaps after this move
        (&[_, _, _], 2) => {
            let heap = nonempty.iter().copied().find(|&i| heaps[i] > 1)?;
            Some(Move::new(heap, heaps[heap] - 1))
        }
        _ => None,
    }
}

/// Adjusts a move that would leave only unit heaps so that their count is odd.
fn leave_odd_unit_heaps(heaps: &[u32], mv: Move) -> Move {
    let size = heaps[mv.heap];
    let others_small = heaps
        .iter()
        .enumerate()
        .all(|(i, &s)| i == mv.heap || s <= 1);
    if size < 2 || !others_small {
        return mv;
    }

    let other_units = heaps
        .iter()
        .enumerate()
        .filter(|&(i, &s)| i != mv.heap && s == 1)
        .count();
    let keep = u32::from(other_units % 2 == 0);
    Move::new(mv.heap, size - keep)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use quickcheck::QuickCheck;
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    fn after(heaps: &[u32], mv: Move) -> Vec<u32> {
        assert!(mv.count >= 1 && mv.count <= heaps[mv.heap], "{heaps:?} {mv:?}");
        let mut next = heaps.to_vec();
        next[mv.heap] -= mv.count;
        next
    }

    fn moves_for_seeds(heaps: &[u32], win_condition: WinCondition) -> Vec<Move> {
        (0..64)
            .map(|seed| {
                let mut rng = Pcg32::seed_from_u64(seed);
                decide_move(heaps, win_condition, &mut rng).unwrap()
            })
            .collect()
    }

    /// Plain game-tree search used as ground truth.
    struct Solver {
        win_condition: WinCondition,
        memo: HashMap<Vec<u32>, bool>,
    }

    impl Solver {
        fn new(win_condition: WinCondition) -> Self {
            Self {
                win_condition,
                memo: HashMap::new(),
            }
        }

        fn mover_wins(&mut self, heaps: &[u32]) -> bool {
            let mut key = heaps.to_vec();
            key.sort_unstable();
            if let Some(&known) = self.memo.get(&key) {
                return known;
            }
            let result = if key.iter().all(|&s| s == 0) {
                self.win_condition.is_misere()
            } else {
                let mut any = false;
                for heap in 0..key.len() {
                    for count in 1..=key[heap] {
                        if !self.mover_wins(&after(&key, Move::new(heap, count))) {
                            any = true;
                        }
                    }
                }
                any
            };
            self.memo.insert(key, result);
            result
        }
    }

    fn positions(len: usize, max: u32) -> Vec<Vec<u32>> {
        let mut out = vec![vec![]];
        for _ in 0..len {
            out = out
                .into_iter()
                .flat_map(|prefix| {
                    (0..=max).map(move |size| {
                        let mut next = prefix.clone();
                        next.push(size);
                        next
                    })
                })
                .collect();
        }
        out
    }

    #[test]
    fn test_misere_single_heap_leaves_one() {
        for mv in moves_for_seeds(&[0, 0, 5], WinCondition::Misere) {
            assert_eq!(mv, Move::new(2, 4));
        }
    }

    #[test]
    fn test_misere_lone_unit_heap_is_taken() {
        for mv in moves_for_seeds(&[0, 1], WinCondition::Misere) {
            assert_eq!(mv, Move::new(1, 1));
        }
    }

    #[test]
    fn test_misere_takes_heap_next_to_unit() {
        for mv in moves_for_seeds(&[1, 3], WinCondition::Misere) {
            assert_eq!(mv, Move::new(1, 3));
        }
        for mv in moves_for_seeds(&[4, 0, 1], WinCondition::Misere) {
            assert_eq!(mv, Move::new(0, 4));
        }
    }

    #[test]
    fn test_misere_two_unit_heaps() {
        let moves = moves_for_seeds(&[1, 1], WinCondition::Misere);
        assert!(moves.iter().all(|mv| mv.count == 1));
        assert!(moves.contains(&Move::new(0, 1)));
        assert!(moves.contains(&Move::new(1, 1)));
    }

    #[test]
    fn test_misere_two_large_heaps_are_equalized() {
        for mv in moves_for_seeds(&[2, 3], WinCondition::Misere) {
            assert_eq!(mv, Move::new(1, 1));
        }
    }

    #[test]
    fn test_misere_three_heaps_two_units() {
        for mv in moves_for_seeds(&[1, 1, 4], WinCondition::Misere) {
            assert_eq!(mv, Move::new(2, 3));
        }
        for mv in moves_for_seeds(&[1, 6, 0, 1], WinCondition::Misere) {
            assert_eq!(mv, Move::new(1, 5));
        }
    }

    #[test]
    fn test_misere_unit_tail_stays_odd() {
        // zeroing would leave four unit heaps; taking the big heap leaves three
        for mv in moves_for_seeds(&[1, 1, 1, 2], WinCondition::Misere) {
            assert_eq!(mv, Move::new(3, 2));
        }
        for mv in moves_for_seeds(&[1, 1, 1, 1, 7], WinCondition::Misere) {
            assert_eq!(mv, Move::new(4, 6));
        }
    }

    #[test]
    fn test_normal_winning_example() {
        for mv in moves_for_seeds(&[3, 4, 5], WinCondition::Normal) {
            assert_eq!(mv, Move::new(0, 2));
            assert_eq!(nim_sum(&after(&[3, 4, 5], mv)), Ok(0));
        }
    }

    #[test]
    fn test_huge_heap_is_zeroed_directly() {
        for mv in moves_for_seeds(&[u32::MAX, 1, 0], WinCondition::Normal) {
            assert_eq!(mv, Move::new(0, u32::MAX - 1));
        }
        for mv in moves_for_seeds(&[u32::MAX, u32::MAX >> 1], WinCondition::Normal) {
            assert_eq!(mv, Move::new(0, u32::MAX - (u32::MAX >> 1)));
        }
    }

    #[test]
    fn test_normal_losing_example_is_legal() {
        let moves = moves_for_seeds(&[1, 4, 5], WinCondition::Normal);
        for mv in &moves {
            after(&[1, 4, 5], *mv);
        }
        // the forced move is random, not a fixed choice
        assert!(moves.iter().any(|mv| *mv != moves[0]));
    }

    #[test]
    fn test_errors() {
        let mut rng = Pcg32::seed_from_u64(0);
        assert_eq!(
            decide_move(&[0, 0, 0], WinCondition::Normal, &mut rng),
            Err(StrategyError::PreconditionViolation)
        );
        assert_eq!(
            decide_move(&[0, 0], WinCondition::Misere, &mut rng),
            Err(StrategyError::PreconditionViolation)
        );
        assert_eq!(
            decide_move(&[4], WinCondition::Normal, &mut rng),
            Err(StrategyError::InvalidInput(InvalidInput { len: 1 }))
        );
    }

    #[test]
    fn test_exhausted_search_is_reported() {
        let mut rng = Pcg32::seed_from_u64(0);
        let heaps = [1, 2];
        // a nim-sum that does not belong to the heaps leaves no zeroing move
        let result = zeroing_search(&heaps, 7, 0, CandidateSet::nonempty(&heaps), &mut rng);
        assert_eq!(
            result,
            Err(StrategyError::InternalInvariantViolation {
                heaps: vec![1, 2]
            })
        );
    }

    #[test]
    fn test_same_seed_same_move() {
        for heaps in [[1, 4, 5], [3, 4, 5], [6, 6, 2]] {
            for condition in [WinCondition::Normal, WinCondition::Misere] {
                let mut rng1 = Pcg32::seed_from_u64(99);
                let mut rng2 = Pcg32::seed_from_u64(99);
                assert_eq!(
                    decide_move(&heaps, condition, &mut rng1),
                    decide_move(&heaps, condition, &mut rng2)
                );
            }
        }
    }

    #[test]
    fn normal_move_zeroes_nim_sum() {
        let mut qc = QuickCheck::new();
        let test = |sizes: Vec<u8>, seed: u64| {
            let mut heaps: Vec<u32> = sizes.iter().map(|&s| u32::from(s % 16)).collect();
            heaps.resize(heaps.len().max(2), 3);
            if heaps.iter().all(|&s| s == 0) {
                return;
            }
            let mut rng = Pcg32::seed_from_u64(seed);
            let mv = decide_move(&heaps, WinCondition::Normal, &mut rng).unwrap();
            let next = after(&heaps, mv);
            if nim_sum(&heaps).unwrap() != 0 {
                assert_eq!(nim_sum(&next), Ok(0), "{heaps:?} -> {next:?}");
            }
        };
        qc.quickcheck(test as fn(Vec<u8>, u64));
    }

    #[test]
    fn misere_move_is_legal() {
        let mut qc = QuickCheck::new();
        let test = |sizes: Vec<u8>, seed: u64| {
            let mut heaps: Vec<u32> = sizes.iter().map(|&s| u32::from(s % 16)).collect();
            heaps.resize(heaps.len().max(2), 1);
            if heaps.iter().all(|&s| s == 0) {
                return;
            }
            let mut rng = Pcg32::seed_from_u64(seed);
            let mv = decide_move(&heaps, WinCondition::Misere, &mut rng).unwrap();
            after(&heaps, mv);
        };
        qc.quickcheck(test as fn(Vec<u8>, u64));
    }

    #[test]
    fn wins_every_winning_position() {
        for condition in [WinCondition::Normal, WinCondition::Misere] {
            let mut solver = Solver::new(condition);
            let small = positions(2, 6)
                .into_iter()
                .chain(positions(3, 5))
                .chain(positions(4, 3));
            for heaps in small {
                if heaps.iter().all(|&s| s == 0) {
                    continue;
                }
                let winning = solver.mover_wins(&heaps);
                assert_eq!(
                    is_winning_position(&heaps, condition),
                    Ok(winning),
                    "{condition} {heaps:?}"
                );
                if !winning {
                    continue;
                }
                for seed in 0..4 {
                    let mut rng = Pcg32::seed_from_u64(seed);
                    let mv = decide_move(&heaps, condition, &mut rng).unwrap();
                    let next = after(&heaps, mv);
                    assert!(
                        !solver.mover_wins(&next),
                        "{condition} {heaps:?}: {mv} leaves a winning {next:?}"
                    );
                }
            }
        }
    }
}
