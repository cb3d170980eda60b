//! Configuration types for the translation adapter.
//!
//! All adapter behaviour is controlled through [`TranslatorConfig`], built
//! via its [`TranslatorConfigBuilder`]. Keeping every knob in one struct
//! makes it trivial to share configs across tasks, serialise them for
//! logging, and diff two runs to understand why their outputs differ.
//!
//! The routing constants the adapter relies on (extraction threshold, vision
//! size ceiling, input character gate) live here as tunable fields rather
//! than literals buried in the decision logic. Their defaults are load-
//! bearing compatibility values and should not be changed casually.

use crate::error::MozhiError;
use crate::service::GenerationService;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Default Gemini model used for all translation requests.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Default API endpoint for the Gemini generateContent family.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Configuration for a translation request.
///
/// Built via [`TranslatorConfig::builder()`] or using
/// [`TranslatorConfig::default()`].
///
/// # Example
/// ```rust
/// use mozhi::TranslatorConfig;
///
/// let config = TranslatorConfig::builder()
///     .api_key("AIza...")
///     .model("gemini-2.5-flash")
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct TranslatorConfig {
    /// Gemini model identifier. Default: [`DEFAULT_MODEL`].
    pub model: String,

    /// Base URL of the generation API. Default: [`DEFAULT_BASE_URL`].
    ///
    /// Overridable so tests and proxies can point the client elsewhere.
    pub base_url: String,

    /// API credential. If empty, the `GEMINI_API_KEY` environment variable
    /// is consulted at service-resolution time. PDF mode refuses to run
    /// without a credential; text mode lets the remote reject the call.
    pub api_key: String,

    /// Pre-constructed generation service. Takes precedence over any
    /// credential and skips client construction entirely. This is the seam
    /// tests and custom middleware hook into.
    pub service: Option<Arc<dyn GenerationService>>,

    /// Sampling temperature for text-mode requests. Default: 0.7.
    ///
    /// Casual register benefits from some variation; 0.7 is what the
    /// translation prompt was tuned against. PDF routes omit temperature
    /// and use the service default.
    pub text_temperature: f32,

    /// Maximum tokens the service may generate per request. Default: 8192.
    ///
    /// Long documents produce long translations; 8192 covers them without
    /// silently truncating mid-sentence.
    pub max_output_tokens: u32,

    /// Minimum extracted-text length (in characters) for a PDF to take the
    /// text route instead of the vision fallback. Default: 50.
    ///
    /// Distinguishes "this PDF has a real text layer" from "extraction
    /// returned noise or near-nothing". Below the threshold the document is
    /// assumed to be a scan and shipped to the service as inline binary.
    pub extracted_text_threshold: usize,

    /// Maximum PDF byte size accepted on the vision path. Default: 10 MiB.
    ///
    /// Transport encoding adds roughly 33% overhead and the remote service
    /// enforces an overall payload ceiling, so oversized files are rejected
    /// before any encoding or network work is spent on them.
    pub max_vision_file_bytes: u64,

    /// Maximum accepted text-mode input length in characters. Default: 10,000.
    pub max_input_chars: usize,

    /// Per-request HTTP timeout in seconds. Default: 120.
    ///
    /// Document translations can legitimately take a while; this guards
    /// against a hung connection, not a slow model.
    pub api_timeout_secs: u64,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            service: None,
            text_temperature: 0.7,
            max_output_tokens: 8192,
            extracted_text_threshold: 50,
            max_vision_file_bytes: 10 * 1024 * 1024,
            max_input_chars: 10_000,
            api_timeout_secs: 120,
        }
    }
}

impl fmt::Debug for TranslatorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranslatorConfig")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("api_key", &if self.api_key.is_empty() { "<unset>" } else { "<redacted>" })
            .field("service", &self.service.as_ref().map(|_| "<dyn GenerationService>"))
            .field("text_temperature", &self.text_temperature)
            .field("max_output_tokens", &self.max_output_tokens)
            .field("extracted_text_threshold", &self.extracted_text_threshold)
            .field("max_vision_file_bytes", &self.max_vision_file_bytes)
            .field("max_input_chars", &self.max_input_chars)
            .field("api_timeout_secs", &self.api_timeout_secs)
            .finish()
    }
}

impl TranslatorConfig {
    /// Create a new builder for `TranslatorConfig`.
    pub fn builder() -> TranslatorConfigBuilder {
        TranslatorConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`TranslatorConfig`].
#[derive(Debug)]
pub struct TranslatorConfigBuilder {
    config: TranslatorConfig,
}

impl TranslatorConfigBuilder {
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = key.into();
        self
    }

    pub fn service(mut self, service: Arc<dyn GenerationService>) -> Self {
        self.config.service = Some(service);
        self
    }

    pub fn text_temperature(mut self, t: f32) -> Self {
        self.config.text_temperature = t.clamp(0.0, 2.0);
        self
    }

    pub fn max_output_tokens(mut self, n: u32) -> Self {
        self.config.max_output_tokens = n;
        self
    }

    pub fn extracted_text_threshold(mut self, chars: usize) -> Self {
        self.config.extracted_text_threshold = chars;
        self
    }

    pub fn max_vision_file_bytes(mut self, bytes: u64) -> Self {
        self.config.max_vision_file_bytes = bytes;
        self
    }

    pub fn max_input_chars(mut self, chars: usize) -> Self {
        self.config.max_input_chars = chars.max(1);
        self
    }

    pub fn api_timeout_secs(mut self, secs: u64) -> Self {
        self.config.api_timeout_secs = secs;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<TranslatorConfig, MozhiError> {
        let c = &self.config;
        if c.model.is_empty() {
            return Err(MozhiError::InvalidConfig("model must not be empty".into()));
        }
        if c.base_url.is_empty() {
            return Err(MozhiError::InvalidConfig(
                "base_url must not be empty".into(),
            ));
        }
        if c.max_output_tokens == 0 {
            return Err(MozhiError::InvalidConfig(
                "max_output_tokens must be ≥ 1".into(),
            ));
        }
        if c.max_vision_file_bytes == 0 {
            return Err(MozhiError::InvalidConfig(
                "max_vision_file_bytes must be ≥ 1".into(),
            ));
        }
        Ok(self.config)
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// The declared language of the input text.
///
/// Closed on purpose: the prompt wording depends on the exact variant, so a
/// new source language is a compile-time addition, not a runtime string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SourceLanguage {
    /// Plain English input. (default)
    #[default]
    English,
    /// Malayalam written in Latin-script transliteration.
    Manglish,
}

impl fmt::Display for SourceLanguage {
    /// Renders the exact word interpolated into prompts.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceLanguage::English => f.write_str("English"),
            SourceLanguage::Manglish => f.write_str("Manglish"),
        }
    }
}

/// Which kind of input a translation request consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TranslationMode {
    /// Raw text typed or pasted by the caller.
    Text,
    /// A PDF document, routed through extraction or the vision fallback.
    Pdf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_compatibility_values() {
        let c = TranslatorConfig::default();
        assert_eq!(c.extracted_text_threshold, 50);
        assert_eq!(c.max_vision_file_bytes, 10 * 1024 * 1024);
        assert_eq!(c.max_input_chars, 10_000);
        assert_eq!(c.max_output_tokens, 8192);
        assert_eq!(c.text_temperature, 0.7);
        assert_eq!(c.model, "gemini-2.5-flash");
    }

    #[test]
    fn builder_rejects_empty_model() {
        let err = TranslatorConfig::builder().model("").build().unwrap_err();
        assert!(err.to_string().contains("model"));
    }

    #[test]
    fn builder_clamps_temperature() {
        let c = TranslatorConfig::builder()
            .text_temperature(9.0)
            .build()
            .unwrap();
        assert_eq!(c.text_temperature, 2.0);
    }

    #[test]
    fn debug_redacts_api_key() {
        let c = TranslatorConfig::builder().api_key("secret").build().unwrap();
        let dbg = format!("{c:?}");
        assert!(!dbg.contains("secret"));
        assert!(dbg.contains("<redacted>"));
    }

    #[test]
    fn source_language_display_matches_prompt_words() {
        assert_eq!(SourceLanguage::English.to_string(), "English");
        assert_eq!(SourceLanguage::Manglish.to_string(), "Manglish");
    }
}
