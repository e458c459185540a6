//! Event dispatch engine.
//!
//! Provides a generic, single-owner event loop: journal → reduce → route →
//! recurse until settled. Events are handled strictly in the order they are
//! observed; events emitted while handling one are queued behind it.
//!
//! Consumers define their domain by implementing `Reducer` (pure state
//! updates) and `Router` (side-effectful handlers that emit new events).

pub mod engine;
pub mod journal;
pub mod traits;

pub use engine::Engine;
pub use journal::{JournalEntry, MemoryJournal, TracingJournal};
pub use traits::{EventJournal, EventLike, Reducer, Router};
