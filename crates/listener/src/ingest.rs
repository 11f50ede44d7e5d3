//! The ingestion pipeline for one webhook delivery.
//!
//! [`WebhookIngestor::ingest`] runs the checks in order and stops at the first
//! rejection:
//!
//! | Step | Failure |
//! |------|---------|
//! | signature over raw bytes | [`IngestError::InvalidSignature`] |
//! | JSON decode | [`IngestError::MalformedPayload`] |
//! | `webhookTimestamp` window (when enforced) | [`IngestError::StaleTimestamp`] |
//! | normalize | never fails |
//! | enqueue | [`IngestError::Sink`]; a redelivery is [`IngestOutcome::Duplicate`] |

use std::sync::Arc;

use intake::{
    decode_payload, fallback_event_id, is_fresh, normalize_with, verify_signature, DeliveryId,
    EnqueueOutcome, EventRecord, EventSink, IntakeError, MentionMatcher, SinkError,
};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::{IngestConfig, WebhookDelivery};

// ---------------------------------------------------------------------------
// Outcome and errors
// ---------------------------------------------------------------------------

/// Successful result of ingesting a delivery.
#[derive(Debug, Clone, PartialEq)]
pub enum IngestOutcome {
    /// The event was new and has been queued.
    Accepted(EventRecord),
    /// The event had already been queued by an earlier delivery.
    Duplicate(EventRecord),
}

impl IngestOutcome {
    /// The normalized record, whether it was queued or a duplicate.
    pub fn event(&self) -> &EventRecord {
        match self {
            Self::Accepted(event) | Self::Duplicate(event) => event,
        }
    }

    /// Returns `true` for a redelivery.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate(_))
    }
}

/// Reasons a delivery is rejected.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The signature header is missing or does not match the body.
    #[error("Webhook signature is missing or invalid")]
    InvalidSignature,

    /// The body is not valid UTF-8 JSON.
    #[error("Webhook payload is not valid JSON: {0}")]
    MalformedPayload(#[source] serde_json::Error),

    /// The embedded timestamp is missing, unparseable, or outside the window.
    #[error("Webhook timestamp is missing or older than {max_age_seconds}s")]
    StaleTimestamp {
        /// The configured window.
        max_age_seconds: u64,
    },

    /// The state store did not accept the event.
    #[error(transparent)]
    Sink(#[from] SinkError),
}

impl IngestError {
    /// Returns `true` if the sender is at fault (answer 4xx), `false` if the
    /// failure is on our side (answer 5xx so the provider redelivers).
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Sink(_))
    }
}

// ---------------------------------------------------------------------------
// Ingestor
// ---------------------------------------------------------------------------

/// Verifies, normalizes, and enqueues webhook deliveries.
///
/// Holds only immutable configuration and a shared sink handle, so one
/// instance can serve every request task concurrently.
pub struct WebhookIngestor<S: ?Sized> {
    config: IngestConfig,
    mentions: MentionMatcher,
    sink: Arc<S>,
}

impl<S: EventSink + ?Sized> WebhookIngestor<S> {
    /// Creates an ingestor after validating `config`.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::ConfigurationError`] if the configuration is
    /// invalid (see [`IngestConfig::validate`]) or the agent name cannot be
    /// compiled into a [`MentionMatcher`].
    pub fn new(config: IngestConfig, sink: Arc<S>) -> Result<Self, IntakeError> {
        config.validate()?;
        let mentions = MentionMatcher::new(config.agent_name.as_str())?;
        Ok(Self {
            config,
            mentions,
            sink,
        })
    }

    /// The configuration this ingestor checks deliveries against.
    pub fn config(&self) -> &IngestConfig {
        &self.config
    }

    /// Runs one delivery through verification, normalization, and enqueue.
    ///
    /// # Errors
    ///
    /// See the module documentation for the rejection order. Nothing is
    /// enqueued when an error is returned.
    #[instrument(
        skip(self, delivery),
        fields(delivery_id = %DeliveryId::new_random(), body_len = delivery.body.len())
    )]
    pub async fn ingest(&self, delivery: &WebhookDelivery) -> Result<IngestOutcome, IngestError> {
        if !verify_signature(
            &delivery.body,
            delivery.signature(),
            &self.config.webhook_secret,
        ) {
            warn!(
                has_signature = delivery.signature.is_some(),
                "Rejecting webhook delivery: signature verification failed"
            );
            return Err(IngestError::InvalidSignature);
        }

        let payload = decode_payload(&delivery.body).map_err(|e| {
            warn!(error = %e, "Rejecting webhook delivery: body is not valid JSON");
            IngestError::MalformedPayload(e)
        })?;

        if self.config.require_fresh_timestamp
            && !is_fresh(&payload, self.config.max_timestamp_age_seconds)
        {
            warn!(
                max_age_seconds = self.config.max_timestamp_age_seconds,
                "Rejecting webhook delivery: timestamp missing or outside window"
            );
            return Err(IngestError::StaleTimestamp {
                max_age_seconds: self.config.max_timestamp_age_seconds,
            });
        }

        let fallback = fallback_event_id(&delivery.body);
        let event = normalize_with(payload, &self.mentions, &fallback);

        match self.sink.enqueue(&event).await {
            Ok(EnqueueOutcome::Inserted) => {
                info!(
                    event_id = %event.event_id,
                    event_type = %event.event_type,
                    issue_identifier = %event.issue_identifier,
                    contains_mention = event.contains_mention,
                    "Webhook event accepted"
                );
                Ok(IngestOutcome::Accepted(event))
            }
            Ok(EnqueueOutcome::Duplicate) => {
                debug!(event_id = %event.event_id, "Webhook event already queued");
                Ok(IngestOutcome::Duplicate(event))
            }
            Err(e) => {
                warn!(event_id = %event.event_id, error = %e, "Event sink rejected webhook event");
                Err(IngestError::Sink(e))
            }
        }
    }
}

#[cfg(test)]
#[path = "ingest_tests.rs"]
mod tests;
