//! Error types for the intake domain.
//!
//! The verification and normalization functions themselves never fail: a bad
//! signature or a stale timestamp is a `false`, a missing field is an empty
//! string. [`IntakeError`] covers the few conditions that are genuinely
//! errors (invalid configuration, empty identifiers), and [`SinkError`] is
//! what an [`crate::EventSink`] implementation reports when the downstream
//! state store cannot take the event.

use thiserror::Error;

// ---------------------------------------------------------------------------
// Domain errors
// ---------------------------------------------------------------------------

/// Errors produced while constructing intake domain values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IntakeError {
    /// An identifier that must be non-empty was given an empty string.
    #[error("{kind} must not be empty")]
    EmptyIdentifier {
        /// Name of the identifier type (e.g. `"EventId"`).
        kind: &'static str,
    },

    /// The ingestion configuration is invalid.
    ///
    /// Produced at load time; an ingestor is never built from an invalid config.
    #[error("Configuration error: {message}")]
    ConfigurationError {
        /// Description of the configuration problem.
        message: String,
    },
}

// ---------------------------------------------------------------------------
// Sink errors
// ---------------------------------------------------------------------------

/// Failure reported by an [`crate::EventSink`].
///
/// A duplicate `event_id` is **not** an error; it is reported as
/// [`crate::EnqueueOutcome::Duplicate`].
#[derive(Debug, Error)]
pub enum SinkError {
    /// The state store could not be reached or did not answer.
    #[error("Event sink unavailable: {message}")]
    Unavailable {
        /// Description of the transport or store failure.
        message: String,
    },

    /// The state store refused the event record.
    #[error("Event sink rejected event '{event_id}': {message}")]
    Rejected {
        /// The event that was refused.
        event_id: String,
        /// The store's reason.
        message: String,
    },
}
