//! Error types for the mozhi library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`MozhiError`] — **Fatal**: the translation cannot proceed at all
//!   (nothing to translate, wrong file type, missing credential, remote
//!   service failure). Returned as `Err(MozhiError)` from the top-level
//!   `translate*` functions.
//!
//! * [`ExtractionError`] — **Non-fatal**: pulling the text layer out of a
//!   PDF failed (corrupt document, image-only scan). The adapter inspects
//!   this result and degrades to the vision path instead of failing the
//!   request, so callers never see it as a request failure.
//!
//! The separation keeps the fallback decision visible in exactly one place
//! (the adapter) rather than hidden inside a swallowed exception.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the mozhi library.
///
/// Text-extraction failures use [`ExtractionError`] and are consumed inside
/// the adapter rather than propagated here.
#[derive(Debug, Error)]
pub enum MozhiError {
    // ── Validation errors ─────────────────────────────────────────────────
    /// Text mode was invoked with nothing to translate.
    #[error("No text provided.\nEnter some text to translate.")]
    EmptyInput,

    /// Text mode input exceeds the configured character gate.
    #[error("Input is too long: {chars} characters (limit {limit}).\nSplit the text and translate it in parts.")]
    InputTooLong { chars: usize, limit: usize },

    /// Input file was not found at the given path.
    #[error("PDF file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The file exists and was read, but is not a PDF.
    #[error("File is not a valid PDF: '{path}'\nFirst bytes: {magic:?}\nOnly application/pdf files are supported.")]
    NotAPdf { path: PathBuf, magic: [u8; 4] },

    /// PDF mode requires a credential before any work is attempted.
    #[error("API Key is missing.\nSet GEMINI_API_KEY or pass one via TranslatorConfig::builder().api_key(..).")]
    MissingApiKey,

    // ── Size limit ────────────────────────────────────────────────────────
    /// PDF exceeds the vision-path payload ceiling and has no usable text layer.
    #[error(
        "File is too large for image-based translation: {size_mb:.1} MB (limit {limit_mb} MB for scanned PDFs).\n\
        Try a text-based PDF."
    )]
    FileTooLarge { size_mb: f64, limit_mb: u64 },

    // ── Service errors ────────────────────────────────────────────────────
    /// The remote generation call failed (network, quota, malformed response).
    #[error("Translation service error: {message}\nPlease try again.")]
    Service { message: String },

    // ── Export errors ─────────────────────────────────────────────────────
    /// Rendering or writing the exported PDF failed.
    #[cfg(feature = "export")]
    #[error("Failed to export PDF: {detail}\nTry copying the text instead.")]
    Export { detail: String },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl MozhiError {
    /// Wrap a remote-service failure detail.
    pub(crate) fn service(message: impl Into<String>) -> Self {
        MozhiError::Service {
            message: message.into(),
        }
    }
}

/// A non-fatal text-extraction failure.
///
/// Produced by [`crate::pipeline::extract::extract_text`] and inspected by
/// the adapter, which logs it and falls back to the vision path. It never
/// escapes a `translate*` call.
#[derive(Debug, Clone, Error)]
pub enum ExtractionError {
    /// The bytes could not be parsed as a PDF document.
    #[error("could not parse PDF document: {detail}")]
    Parse { detail: String },

    /// A specific page's content stream failed to decode.
    #[error("page {page}: text decode failed: {detail}")]
    PageDecode { page: u32, detail: String },
}
