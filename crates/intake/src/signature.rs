//! HMAC-SHA256 webhook signature verification.
//!
//! The provider signs the exact request body bytes with the shared secret and
//! sends the lower-case hex digest in a header, optionally prefixed with the
//! algorithm (`sha256=<hex>`). Verification must run over the raw bytes as
//! received: re-serializing the decoded JSON changes whitespace and key order
//! and would break every signature.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Returns `true` if `signature_header` is the HMAC-SHA256 of `raw_body`
/// under `secret`.
///
/// An empty `secret` always fails: an unconfigured secret must never mean
/// "skip verification". The header is trimmed, anything up to and including
/// the first `=` is dropped, and the remainder is compared case-insensitively
/// in constant time.
pub fn verify_signature(raw_body: &[u8], signature_header: &str, secret: &str) -> bool {
    if secret.is_empty() {
        return false;
    }

    let provided = normalize_signature(signature_header);
    if provided.is_empty() {
        return false;
    }

    // Not hex means it cannot be a digest we produced.
    let Ok(provided_bytes) = hex::decode(&provided) else {
        return false;
    };

    let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
        return false;
    };
    mac.update(raw_body);

    // verify_slice compares in constant time and rejects length mismatches.
    mac.verify_slice(&provided_bytes).is_ok()
}

/// Computes the lower-case hex HMAC-SHA256 of `raw_body` under `secret`.
///
/// This is the value a provider places in the signature header.
pub fn sign_payload(raw_body: &[u8], secret: &str) -> String {
    // HMAC accepts keys of any length, so this never takes the error branch.
    let mut mac = match HmacSha256::new_from_slice(secret.as_bytes()) {
        Ok(mac) => mac,
        Err(_) => return String::new(),
    };
    mac.update(raw_body);
    hex::encode(mac.finalize().into_bytes())
}

/// Trims the header, strips an `<algorithm>=` prefix, and lower-cases it.
fn normalize_signature(value: &str) -> String {
    let sig = value.trim();
    let sig = match sig.split_once('=') {
        Some((_, digest)) => digest,
        None => sig,
    };
    sig.to_lowercase()
}

#[cfg(test)]
#[path = "signature_tests.rs"]
mod tests;
