//! Process-local [`EventSink`] for development wiring and tests.
//!
//! Events live only as long as the process; nothing is persisted. Production
//! deployments hand events to the external state store instead.

use std::collections::HashSet;

use async_trait::async_trait;
use intake::{EnqueueOutcome, EventId, EventRecord, EventSink, SinkError};
use tokio::sync::Mutex;

/// An [`EventSink`] that keeps accepted events in memory, in arrival order.
///
/// Deduplicates on `event_id` like the real state store.
#[derive(Debug, Default)]
pub struct InMemoryEventSink {
    state: Mutex<SinkState>,
}

#[derive(Debug, Default)]
struct SinkState {
    seen: HashSet<EventId>,
    events: Vec<EventRecord>,
}

impl InMemoryEventSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct events accepted.
    pub async fn len(&self) -> usize {
        self.state.lock().await.events.len()
    }

    /// Returns `true` if no event has been accepted.
    pub async fn is_empty(&self) -> bool {
        self.state.lock().await.events.is_empty()
    }

    /// Returns `true` if an event with `event_id` has been accepted.
    pub async fn contains(&self, event_id: &EventId) -> bool {
        self.state.lock().await.seen.contains(event_id)
    }

    /// Snapshot of the accepted events, oldest first.
    pub async fn events(&self) -> Vec<EventRecord> {
        self.state.lock().await.events.clone()
    }
}

#[async_trait]
impl EventSink for InMemoryEventSink {
    async fn enqueue(&self, event: &EventRecord) -> Result<EnqueueOutcome, SinkError> {
        let mut state = self.state.lock().await;
        if !state.seen.insert(event.event_id.clone()) {
            return Ok(EnqueueOutcome::Duplicate);
        }
        state.events.push(event.clone());
        Ok(EnqueueOutcome::Inserted)
    }
}

#[cfg(test)]
#[path = "memory_sink_tests.rs"]
mod tests;
