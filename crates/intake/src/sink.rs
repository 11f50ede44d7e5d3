//! Port to the downstream state store.
//!
//! The state store owns the event queue, deduplication, per-issue leases and
//! session records. Intake sees none of that: it hands each accepted
//! [`EventRecord`] to [`EventSink::enqueue`] and learns only whether the event
//! was new.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{EventRecord, SinkError};

/// Result of handing an event to an [`EventSink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnqueueOutcome {
    /// The event was queued for processing.
    Inserted,
    /// An event with the same `event_id` was already queued; nothing changed.
    Duplicate,
}

/// Destination for normalized webhook events.
///
/// Implementations must be idempotent on [`EventRecord::event_id`]: enqueuing
/// a redelivered event returns [`EnqueueOutcome::Duplicate`] instead of
/// queuing it twice.
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Queues `event` unless its `event_id` has been seen before.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError`] when the store is unreachable or refuses the
    /// record. A duplicate is not an error.
    async fn enqueue(&self, event: &EventRecord) -> Result<EnqueueOutcome, SinkError>;
}
