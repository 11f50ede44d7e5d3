//! Newtype domain identifiers.
//!
//! Identifiers that must never be empty are wrapped in distinct newtypes so an
//! empty string cannot reach the event queue as a deduplication key, and so an
//! [`EventId`] is never confused with an [`AgentName`] even though both are
//! strings under the hood.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Macro for String-wrapped newtypes.
// Generates: struct, new() returning Option<Self>, as_str(), Display, and
// serde via String so an empty value is rejected on deserialization too.
// ---------------------------------------------------------------------------
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, returning `None` if the value is empty.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                if v.is_empty() { None } else { Some(Self(v)) }
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = crate::IntakeError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value).ok_or(crate::IntakeError::EmptyIdentifier {
                    kind: stringify!($name),
                })
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Identifiers — String-backed
// ---------------------------------------------------------------------------

string_id! {
    /// Deduplication key of one webhook delivery.
    ///
    /// Taken from the provider's `webhookId`, else the payload's `id`, else the
    /// SHA-256 of the raw body (see [`crate::fallback_event_id`]). Redelivery of
    /// the same event must produce the same [`EventId`].
    EventId
}

string_id! {
    /// The bot identity that comment mentions are matched against
    /// (e.g. `"francis"` for `@francis`).
    AgentName
}

impl EventId {
    /// Derives an id from the SHA-256 of `content` (64 lower-case hex chars).
    pub fn from_content_hash(content: &[u8]) -> Self {
        Self(hex::encode(Sha256::digest(content)))
    }
}

// ---------------------------------------------------------------------------
// Identifiers — UUID-backed (internally generated)
// ---------------------------------------------------------------------------

/// Identifies a single ingest attempt.
///
/// Generated fresh for every inbound delivery and attached to its tracing span
/// so the verify/decode/normalize/enqueue steps of one request correlate. Not
/// part of the [`crate::EventRecord`]: two deliveries of the same event get
/// different delivery ids but the same [`EventId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeliveryId(Uuid);

impl DeliveryId {
    /// Generates a new random delivery identifier.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a [`DeliveryId`] from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Returns the underlying [`Uuid`].
    pub fn as_uuid(self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for DeliveryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[path = "identifiers_tests.rs"]
mod tests;
