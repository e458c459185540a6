//! The dispatch loop.

use std::collections::VecDeque;
use std::marker::PhantomData;

use anyhow::Result;

use crate::traits::{EventJournal, EventLike, Reducer, Router};

/// Generic event dispatch engine.
///
/// Journal → reduce → route → recurse until settled.
/// Causal chaining is automatic: child events reference their trigger's seq.
pub struct Engine<E, S, D, Red, Rout, J>
where
    E: EventLike,
    S: Send + Sync,
    D: Send,
    Red: Reducer<E, S>,
    Rout: Router<E, S, D>,
    J: EventJournal,
{
    reducer: Red,
    router: Rout,
    journal: J,
    _phantom: PhantomData<fn() -> (E, S, D)>,
}

impl<E, S, D, Red, Rout, J> Engine<E, S, D, Red, Rout, J>
where
    E: EventLike,
    S: Send + Sync,
    D: Send,
    Red: Reducer<E, S>,
    Rout: Router<E, S, D>,
    J: EventJournal,
{
    pub fn new(reducer: Red, router: Rout, journal: J) -> Self {
        Self {
            reducer,
            router,
            journal,
            _phantom: PhantomData,
        }
    }

    /// Dispatch an event. Journals it, reduces state, routes to handler,
    /// and processes any emitted child events until the queue is empty.
    ///
    /// A router error stops the chain it came from; already-reduced state
    /// is kept.
    pub async fn dispatch(&self, event: E, state: &mut S, deps: &mut D) -> Result<()> {
        let mut queue: VecDeque<(E, Option<u64>)> = VecDeque::new();
        queue.push_back((event, None));

        while let Some((evt, parent_seq)) = queue.pop_front() {
            // 1. Journal with causal chain
            let entry = self.journal.record(
                evt.event_type_str(),
                evt.to_journal_payload(),
                parent_seq,
            );

            // 2. Reduce (pure state update)
            self.reducer.reduce(state, &evt);

            // 3. Route (may do I/O, may emit new events)
            let children = self.router.route(&evt, &*state, deps).await?;

            // 4. Enqueue children (chained off this event)
            for child in children {
                queue.push_back((child, Some(entry.seq)));
            }
        }

        Ok(())
    }

    pub fn journal(&self) -> &J {
        &self.journal
    }
}
