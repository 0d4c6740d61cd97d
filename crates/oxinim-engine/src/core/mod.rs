pub use self::{heaps::*, moves::*, nim_sum::*};

mod heaps;
mod moves;
mod nim_sum;
