//! Webhook ingestion infrastructure.
//!
//! Composes the pure checks of the [`intake`] crate into the per-delivery
//! control flow that an HTTP listener invokes:
//!
//! - [`WebhookIngestor`] — verifies the signature over the raw body, decodes
//!   the JSON, enforces the timestamp window, normalizes the payload, and
//!   hands the [`intake::EventRecord`] to an [`intake::EventSink`].
//! - [`IngestConfig`] — the secret, agent name, and freshness policy, loaded
//!   from the host's configuration or from `INTAKE_*` environment variables.
//! - [`InMemoryEventSink`] — a non-persistent, deduplicating sink for
//!   development wiring and tests.
//! - [`telemetry`] — `tracing-subscriber` setup (JSON or pretty, `RUST_LOG`).
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** The HTTP server itself and the persistent state store
//! are external. The server passes each request in as a [`WebhookDelivery`]
//! and maps [`IngestError::is_client_error`] onto a 4xx or 5xx response.

pub mod config;
pub mod delivery;
pub mod ingest;
pub mod memory_sink;
pub mod telemetry;

pub use config::IngestConfig;
pub use delivery::{WebhookDelivery, SIGNATURE_HEADER};
pub use ingest::{IngestError, IngestOutcome, WebhookIngestor};
pub use memory_sink::InMemoryEventSink;
pub use telemetry::{init_tracing, LogFormat};
