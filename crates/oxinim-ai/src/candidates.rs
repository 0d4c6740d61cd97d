use rand::Rng;

/// Heap indices that have not been ruled out yet.
///
/// The strategist draws heaps from this set at random and excludes each heap
/// it has fully scanned without finding a move, so no heap is tried twice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateSet {
    indices: Vec<usize>,
}

impl CandidateSet {
    /// Creates a set containing every nonempty heap of `heaps`.
    #[must_use]
    pub fn nonempty(heaps: &[u32]) -> Self {
        let indices = heaps
            .iter()
            .enumerate()
            .filter(|(_, size)| **size > 0)
            .map(|(i, _)| i)
            .collect();
        Self { indices }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }

    /// Draws a remaining index uniformly at random without removing it.
    ///
    /// Returns `None` only when the set is empty.
    pub fn pick<R>(&self, rng: &mut R) -> Option<usize>
    where
        R: Rng + ?Sized,
    {
        if self.indices.is_empty() {
            return None;
        }
        Some(self.indices[rng.random_range(0..self.indices.len())])
    }

    /// Removes `index` from the set; returns whether it was present.
    pub fn exclude(&mut self, index: usize) -> bool {
        let Some(pos) = self.indices.iter().position(|&i| i == index) else {
            return false;
        };
        // keep ascending order so draws stay reproducible for a fixed seed
        self.indices.remove(pos);
        true
    }
}
