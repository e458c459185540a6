//! Core traits for the event engine.

use anyhow::Result;
use async_trait::async_trait;

use crate::journal::JournalEntry;

/// Events carry a type string and know how to serialize for the journal.
pub trait EventLike: Clone + Send + Sync + 'static {
    /// Short, stable name such as `"selection:changed"`.
    fn event_type_str(&self) -> String;

    /// JSON payload recorded alongside the type.
    fn to_journal_payload(&self) -> serde_json::Value;
}

/// Pure state updates. No I/O, no side effects.
///
/// Called for every event before routing.
pub trait Reducer<E: EventLike, S: Send>: Send + Sync {
    fn reduce(&self, state: &mut S, event: &E);
}

/// Routes events to handlers. May perform I/O, emit new events.
///
/// Sees the state after the event was reduced. Returns zero or more child
/// events that re-enter the dispatch loop behind any already-queued events.
#[async_trait]
pub trait Router<E: EventLike, S: Send + Sync, D: Send>: Send + Sync {
    async fn route(&self, event: &E, state: &S, deps: &mut D) -> Result<Vec<E>>;
}

/// Records dispatched events with sequence numbers and causal parents.
///
/// Implemented by `TracingJournal` (logs only) and `MemoryJournal` (tests).
pub trait EventJournal: Send + Sync {
    fn record(
        &self,
        event_type: String,
        payload: serde_json::Value,
        caused_by_seq: Option<u64>,
    ) -> JournalEntry;
}
