//! Game flow built on top of the core data structures.
//!
//! - [`GameSeed`] - Seed for deterministic heap generation and computer moves
//! - [`HeapLayout`] - How the initial heap vector is generated
//! - [`GameSession`] - Turn alternation, move application and win detection
//!
//! # Game Flow
//!
//! 1. Draw a [`GameSeed`] and turn it into a random number generator
//! 2. Generate the initial [`Heaps`](crate::Heaps) with a [`HeapLayout`]
//! 3. Start a [`GameSession`] with the chosen win condition and first mover
//! 4. Apply one move per turn until every heap is empty
//! 5. Ask the session for the winner
//!
//! # Example
//!
//! ```
//! use oxinim_engine::{GameSeed, GameSession, HeapLayout, Move, Side, WinCondition};
//!
//! let seed: GameSeed = "000102030405060708090a0b0c0d0e0f".parse().unwrap();
//! let mut rng = seed.rng();
//! let heaps = HeapLayout::Random.generate(&mut rng);
//!
//! let mut session = GameSession::new(heaps, WinCondition::Normal, Side::First);
//! loop {
//!     let next = session.heaps().nonempty_indices().next();
//!     let Some(heap) = next else { break };
//!     let count = session.heaps()[heap];
//!     session.apply_move(Move::new(heap, count)).unwrap();
//! }
//!
//! assert!(session.winner().is_some());
//! ```

pub use self::{game_session::*, heap_layout::*, seed::*};

mod game_session;
mod heap_layout;
mod seed;
