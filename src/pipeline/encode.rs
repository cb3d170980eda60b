//! Transport encoding: raw PDF bytes → base64 payload string.
//!
//! The vision route embeds the whole document in the JSON request body, so
//! the bytes must become transport-safe ASCII first. Standard (padded)
//! base64 is what the generateContent API expects for `inlineData`.
//!
//! Payloads that arrive already wrapped as data-URLs
//! (`data:application/pdf;base64,JVBERi...`) are reduced to the bare
//! encoding by [`strip_data_url_prefix`]; the remote rejects requests that
//! still carry the metadata prefix.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use tracing::debug;

/// Encode raw bytes as a transport-safe base64 string.
///
/// Pure transform: identical input always yields the identical string, and
/// the output never carries a data-URL prefix.
pub fn encode_for_transport(bytes: &[u8]) -> String {
    let encoded = STANDARD.encode(bytes);
    debug!(
        raw = bytes.len(),
        encoded = encoded.len(),
        "encoded binary for transport"
    );
    encoded
}

/// Strip a data-URL metadata prefix, if present.
///
/// Everything up to and including the first comma is dropped; a string
/// without a comma is returned unchanged.
pub fn strip_data_url_prefix(payload: &str) -> &str {
    match payload.split_once(',') {
        Some((_, rest)) => rest,
        None => payload,
    }
}
