//! Result types returned by the translation adapter.

use serde::{Deserialize, Serialize};

/// Which request shape the adapter ended up sending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TranslationRoute {
    /// Raw text request (text mode).
    Text,
    /// PDF with a usable text layer, sent as extracted text.
    ExtractedText,
    /// PDF without a usable text layer, sent as inline binary.
    Vision,
}

/// A completed translation.
///
/// Serializable so the CLI's `--json` mode can emit it directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Translation {
    /// The translated text (or the per-route fallback literal when the
    /// service returned an empty result).
    pub text: String,
    /// Which path the request took.
    pub route: TranslationRoute,
    /// Characters recovered by the extractor. Zero on the text route.
    pub extracted_chars: usize,
    /// Prompt tokens reported by the service, when available.
    pub prompt_tokens: u32,
    /// Completion tokens reported by the service, when available.
    pub completion_tokens: u32,
    /// Wall-clock duration of the whole translate call in milliseconds.
    pub duration_ms: u64,
}
