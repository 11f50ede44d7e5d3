//! Verification and normalization of issue-tracker webhook deliveries.
//!
//! This crate turns a raw webhook delivery into a verified, normalized
//! [`EventRecord`] ready for the event queue. Everything here is a pure
//! function over its inputs: no I/O, no shared state, safe to call from any
//! number of request tasks at once.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** The HTTP listener and the state store
//! are external; the store is reached only through the [`EventSink`] port.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`mention`] | `@agent` mention matching |
//! | [`signature`] | HMAC-SHA256 signature verification |
//! | [`freshness`] | `webhookTimestamp` parsing and replay window |
//! | [`normalize`] | Payload decoding, field extraction, fallback event ids |
//! | [`sink`] | The [`EventSink`] port and [`EnqueueOutcome`] |
//! | [`identifiers`] | Newtype identifiers (`EventId`, `AgentName`, `DeliveryId`) |
//! | [`types`] | [`EventRecord`] and [`EventType`] |
//! | [`errors`] | [`IntakeError`] and [`SinkError`] |
//!
//! ## Request flow
//!
//! ```text
//! raw bytes + signature header
//!   -> verify_signature        (reject if false)
//!   -> decode_payload          (reject on error)
//!   -> is_fresh                (reject if false, when enforced)
//!   -> normalize_with          (never fails; uses a MentionMatcher)
//!   -> EventSink::enqueue      (idempotent on event_id)
//! ```

pub mod errors;
pub mod freshness;
pub mod identifiers;
pub mod mention;
pub mod normalize;
pub mod signature;
pub mod sink;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use errors::{IntakeError, SinkError};
pub use freshness::{
    is_fresh, is_fresh_at, parse_timestamp, DEFAULT_MAX_AGE_SECONDS, TIMESTAMP_FIELD,
};
pub use identifiers::{AgentName, DeliveryId, EventId};
pub use mention::{contains_mention, MentionMatcher};
pub use normalize::{decode_payload, fallback_event_id, normalize, normalize_with};
pub use signature::{sign_payload, verify_signature};
pub use sink::{EnqueueOutcome, EventSink};
pub use types::{EventRecord, EventType, WEBHOOK_SOURCE};
