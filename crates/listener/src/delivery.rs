//! The inbound call contract: raw body bytes plus the signature header.

use std::collections::HashMap;

/// Header the provider places the HMAC-SHA256 digest in.
pub const SIGNATURE_HEADER: &str = "linear-signature";

/// One webhook delivery as received by the HTTP listener.
///
/// `body` must be the exact bytes of the request; the signature is computed
/// over them and any re-encoding breaks verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookDelivery {
    /// Raw request body.
    pub body: Vec<u8>,

    /// Value of the signature header, if the request carried one.
    pub signature: Option<String>,
}

impl WebhookDelivery {
    /// Creates a delivery from the body and signature header value.
    pub fn new(body: impl Into<Vec<u8>>, signature: Option<String>) -> Self {
        Self {
            body: body.into(),
            signature,
        }
    }

    /// Creates a delivery from the body and the full request header map.
    ///
    /// HTTP header names are case-insensitive, so the signature header is
    /// found regardless of how the transport cased it.
    pub fn from_headers(body: impl Into<Vec<u8>>, headers: &HashMap<String, String>) -> Self {
        let signature = headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(SIGNATURE_HEADER))
            .map(|(_, value)| value.clone());
        Self::new(body, signature)
    }

    /// The signature header value, or `""` when absent.
    pub fn signature(&self) -> &str {
        self.signature.as_deref().unwrap_or_default()
    }
}
