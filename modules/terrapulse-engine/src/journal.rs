//! EventJournal implementations.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::traits::EventJournal;

#[derive(Debug, Clone, PartialEq)]
pub struct JournalEntry {
    pub seq: u64,
    pub event_type: String,
    pub caused_by_seq: Option<u64>,
    pub payload: serde_json::Value,
}

// ---------------------------------------------------------------------------
// TracingJournal (log only, nothing retained)
// ---------------------------------------------------------------------------

pub struct TracingJournal {
    next_seq: AtomicU64,
}

impl TracingJournal {
    pub fn new() -> Self {
        Self {
            next_seq: AtomicU64::new(1),
        }
    }
}

impl Default for TracingJournal {
    fn default() -> Self {
        Self::new()
    }
}

impl EventJournal for TracingJournal {
    fn record(
        &self,
        event_type: String,
        payload: serde_json::Value,
        caused_by_seq: Option<u64>,
    ) -> JournalEntry {
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(seq, event_type = %event_type, caused_by_seq, "dispatch");
        JournalEntry {
            seq,
            event_type,
            caused_by_seq,
            payload: serde_json::Value::Null,
        }
    }
}

// ---------------------------------------------------------------------------
// MemoryJournal (keeps entries for ordering assertions)
// ---------------------------------------------------------------------------

/// In-memory journal. Keeps every entry, payload included. Thread-safe.
pub struct MemoryJournal {
    next_seq: AtomicU64,
    entries: Mutex<Vec<JournalEntry>>,
}

impl MemoryJournal {
    pub fn new() -> Self {
        Self {
            next_seq: AtomicU64::new(1),
            entries: Mutex::new(Vec::new()),
        }
    }

    pub fn entries(&self) -> Vec<JournalEntry> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    /// Event types in dispatch order.
    pub fn event_types(&self) -> Vec<String> {
        self.entries().into_iter().map(|e| e.event_type).collect()
    }
}

impl Default for MemoryJournal {
    fn default() -> Self {
        Self::new()
    }
}

impl EventJournal for MemoryJournal {
    fn record(
        &self,
        event_type: String,
        payload: serde_json::Value,
        caused_by_seq: Option<u64>,
    ) -> JournalEntry {
        let entry = JournalEntry {
            seq: self.next_seq.fetch_add(1, Ordering::SeqCst),
            event_type,
            caused_by_seq,
            payload,
        };
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(entry.clone());
        }
        entry
    }
}

// ---------------------------------------------------------------------------
// Arc<J> blanket: lets tests share the journal for assertions
// ---------------------------------------------------------------------------

impl<J: EventJournal + ?Sized> EventJournal for Arc<J> {
    fn record(
        &self,
        event_type: String,
        payload: serde_json::Value,
        caused_by_seq: Option<u64>,
    ) -> JournalEntry {
        (**self).record(event_type, payload, caused_by_seq)
    }
}
