//! Port traits defining external boundaries.
//!
//! Each trait is a boundary between the drawing core and something it does
//! not own: the wall clock and the version-control tool. Implementations
//! live in `src/adapters/`.

pub mod clock;
pub mod repo;

pub use clock::Clock;
pub use repo::{ConfiguredIdentity, RepositoryBackend, StreamConsumer};
