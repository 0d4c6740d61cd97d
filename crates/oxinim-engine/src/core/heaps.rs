use std::ops::Deref;

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::{HeapsError, Move, MoveError, core::nim_sum::xor_all};

const MAX_HEAPS: usize = 16;

/// The heap vector of a game: one item count per heap.
///
/// Heaps never disappear. A heap that reaches zero is empty but keeps its
/// index, so moves and displays refer to the same heap numbers for the whole
/// game. The vector always holds between [`Heaps::MIN_LEN`] and
/// [`Heaps::MAX_LEN`] heaps.
///
/// # Example
///
/// ```
/// use oxinim_engine::{Heaps, Move};
///
/// let mut heaps = Heaps::new([3, 4, 5]).unwrap();
/// assert_eq!(heaps.nim_sum(), 2);
///
/// heaps.apply(Move::new(0, 2)).unwrap();
/// assert_eq!(heaps.as_slice(), &[1, 4, 5]);
/// assert_eq!(heaps.nim_sum(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u32>", into = "Vec<u32>")]
pub struct Heaps {
    sizes: ArrayVec<u32, MAX_HEAPS>,
}

impl Heaps {
    pub const MIN_LEN: usize = 2;
    pub const MAX_LEN: usize = MAX_HEAPS;

    pub fn new<I>(sizes: I) -> Result<Self, HeapsError>
    where
        I: IntoIterator<Item = u32>,
    {
        let mut collected = ArrayVec::new();
        let mut len = 0;
        for size in sizes {
            len += 1;
            // keep counting past capacity so the error reports the real length
            let _ = collected.try_push(size);
        }
        if len < Self::MIN_LEN {
            return Err(HeapsError::TooFew { len });
        }
        if len > Self::MAX_LEN {
            return Err(HeapsError::TooMany { len });
        }
        Ok(Self { sizes: collected })
    }

    #[must_use]
    pub fn as_slice(&self) -> &[u32] {
        &self.sizes
    }

    /// Returns the Nim-sum of the current position.
    #[must_use]
    pub fn nim_sum(&self) -> u32 {
        xor_all(&self.sizes)
    }

    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.sizes.iter().sum()
    }

    /// Returns `true` when every heap is empty.
    #[must_use]
    pub fn is_cleared(&self) -> bool {
        self.sizes.iter().all(|&size| size == 0)
    }

    /// Returns indices of the heaps that still hold items.
    pub fn nonempty_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.sizes
            .iter()
            .enumerate()
            .filter(|(_, size)| **size > 0)
            .map(|(i, _)| i)
    }

    /// Checks a move against the current sizes without applying it.
    pub fn validate(&self, mv: Move) -> Result<(), MoveError> {
        let Some(&available) = self.sizes.get(mv.heap) else {
            return Err(MoveError::HeapOutOfRange { heap: mv.heap });
        };
        if mv.count == 0 {
            return Err(MoveError::ZeroCount);
        }
        if mv.count > available {
            return Err(MoveError::TooMany {
                heap: mv.heap,
                requested: mv.count,
                available,
            });
        }
        Ok(())
    }

    /// Removes `mv.count` items from heap `mv.heap`.
    pub fn apply(&mut self, mv: Move) -> Result<(), MoveError> {
        self.validate(mv)?;
        self.sizes[mv.heap] -= mv.count;
        Ok(())
    }
}

impl Deref for Heaps {
    type Target = [u32];

    fn deref(&self) -> &Self::Target {
        &self.sizes
    }
}

impl TryFrom<Vec<u32>> for Heaps {
    type Error = HeapsError;

    fn try_from(value: Vec<u32>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Heaps> for Vec<u32> {
    fn from(value: Heaps) -> Self {
        value.sizes.to_vec()
    }
}
