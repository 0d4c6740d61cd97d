use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::Heaps;

/// How the initial heap vector of a game is generated.
///
/// Both layouts draw the heap count uniformly from
/// [`MIN_HEAPS`](Self::MIN_HEAPS)`..=`[`MAX_HEAPS`](Self::MAX_HEAPS).
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
    derive_more::FromStr,
)]
pub enum HeapLayout {
    /// Each heap holds `2n+1 ..= 2n+4` items, where `n` is the heap count.
    #[default]
    #[display("random")]
    Random,
    /// Heap `i` holds `2i+1` items: 1, 3, 5, 7, 9.
    #[display("staircase")]
    Staircase,
}

impl HeapLayout {
    pub const MIN_HEAPS: u32 = 2;
    pub const MAX_HEAPS: u32 = 5;

    /// Generates an initial heap vector.
    ///
    /// # Example
    ///
    /// ```
    /// use oxinim_engine::{GameSeed, HeapLayout};
    ///
    /// let mut rng = GameSeed::from_bytes([7; 16]).rng();
    /// let heaps = HeapLayout::Staircase.generate(&mut rng);
    /// assert_eq!(heaps[..2], [1, 3]);
    /// ```
    pub fn generate<R>(self, rng: &mut R) -> Heaps
    where
        R: Rng + ?Sized,
    {
        let count = rng.random_range(Self::MIN_HEAPS..=Self::MAX_HEAPS);
        let sizes: Vec<u32> = match self {
            HeapLayout::Random => (0..count)
                .map(|_| rng.random_range(2 * count + 1..=2 * count + 4))
                .collect(),
            HeapLayout::Staircase => (0..count).map(|i| 2 * i + 1).collect(),
        };
        Heaps::new(sizes).expect("heap count is always within Heaps bounds")
    }
}
