//! The translation request adapter.
//!
//! This is the decision core of the crate: given text or a PDF and a
//! declared source language, choose how to ask the generation service for a
//! casual-Malayalam rendering and classify whatever comes back.
//!
//! ## Routing
//!
//! ```text
//! Text(input)
//!   empty after trim ───────────────▶ EmptyInput
//!   over the character gate ────────▶ InputTooLong
//!   else ───────────────────────────▶ one text request (temperature 0.7)
//!
//! Pdf(file)
//!   read + magic-validate bytes
//!   no credential, no injected service ▶ MissingApiKey
//!   extract text layer
//!     failed ──▶ log, treat as empty (never fails the request)
//!     > threshold chars ─────────────▶ one extracted-text request
//!     else ──▶ vision fallback:
//!       over the size ceiling ───────▶ FileTooLarge (before encoding,
//!                                      before any network call)
//!       else ────────────────────────▶ one inline-PDF request
//! ```
//!
//! Extraction-first is a latency/cost choice: text-bearing PDFs skip the
//! larger, size-capped multimodal request entirely. The threshold separates
//! a real text layer from extraction noise; below it the document is
//! assumed to be a scan.
//!
//! The adapter holds no state across invocations, so overlapping calls are
//! independently safe. There is no retry, no timeout beyond the HTTP
//! client's, and no cancellation: every failure surfaces immediately.

use crate::config::{SourceLanguage, TranslationMode, TranslatorConfig};
use crate::error::MozhiError;
use crate::output::{Translation, TranslationRoute};
use crate::pipeline::{encode, extract, input};
use crate::prompts;
use crate::service::gemini::GeminiClient;
use crate::service::{GenerationPart, GenerationRequest, GenerationService};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Fallback literals returned when the service produces no usable text.
/// One per route, matching what callers of each path historically saw.
const FALLBACK_TEXT: &str = "Could not generate translation.";
const FALLBACK_EXTRACTED: &str = "Could not generate translation from extracted PDF text.";
const FALLBACK_VISION: &str = "Could not generate translation from PDF.";

/// What a translation request consumes.
///
/// Closed on purpose: the adapter's routing is a compile-time-checked match
/// over these variants, not a string comparison.
#[derive(Debug, Clone)]
pub enum InputPayload {
    /// Raw text typed or pasted by the caller.
    Text(String),
    /// Path to a local PDF file.
    PdfFile(PathBuf),
    /// In-memory PDF bytes (callers holding uploads or streams).
    PdfBytes(Vec<u8>),
}

impl InputPayload {
    /// The mode this payload selects.
    pub fn mode(&self) -> TranslationMode {
        match self {
            InputPayload::Text(_) => TranslationMode::Text,
            InputPayload::PdfFile(_) | InputPayload::PdfBytes(_) => TranslationMode::Pdf,
        }
    }
}

/// The translation adapter: a resolved service plus configuration.
///
/// Construct once and reuse; each call is independent.
pub struct Translator {
    service: Arc<dyn GenerationService>,
    has_credential: bool,
    config: TranslatorConfig,
}

impl Translator {
    /// Build a translator from configuration.
    ///
    /// Service resolution, most- to least-specific (the credential itself is
    /// plain configuration data, fixed at construction time):
    ///
    /// 1. A pre-built service injected via [`TranslatorConfig::service`] —
    ///    used as-is; tests and middleware hook in here.
    /// 2. An explicit `api_key` in the config.
    /// 3. The `GEMINI_API_KEY` environment variable.
    ///
    /// When none yields a credential the translator is still constructed:
    /// text mode sends unauthenticated requests and lets the remote reject
    /// them (a service failure), while PDF mode fails fast with
    /// [`MozhiError::MissingApiKey`] before doing any work.
    pub fn new(config: TranslatorConfig) -> Result<Self, MozhiError> {
        if let Some(service) = config.service.clone() {
            return Ok(Self {
                service,
                has_credential: true,
                config,
            });
        }

        let mut config = config;
        if config.api_key.is_empty() {
            if let Ok(key) = std::env::var("GEMINI_API_KEY") {
                config.api_key = key;
            }
        }
        let has_credential = !config.api_key.is_empty();
        let client = GeminiClient::new(&config)?;

        Ok(Self {
            service: Arc::new(client),
            has_credential,
            config,
        })
    }

    /// The configuration this translator was built with.
    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    /// Translate any payload, dispatching on its mode.
    pub async fn translate(
        &self,
        payload: InputPayload,
        source_lang: SourceLanguage,
    ) -> Result<Translation, MozhiError> {
        match payload {
            InputPayload::Text(text) => self.translate_text(&text, source_lang).await,
            InputPayload::PdfFile(path) => self.translate_pdf(&path, source_lang).await,
            InputPayload::PdfBytes(bytes) => self.translate_pdf_bytes(&bytes, source_lang).await,
        }
    }

    /// Translate raw text.
    pub async fn translate_text(
        &self,
        text: &str,
        source_lang: SourceLanguage,
    ) -> Result<Translation, MozhiError> {
        let start = Instant::now();

        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(MozhiError::EmptyInput);
        }
        let chars = text.chars().count();
        if chars > self.config.max_input_chars {
            return Err(MozhiError::InputTooLong {
                chars,
                limit: self.config.max_input_chars,
            });
        }

        info!(%source_lang, chars, "translating text input");

        let request = GenerationRequest {
            system_instruction: prompts::SYSTEM_INSTRUCTION.to_string(),
            parts: vec![GenerationPart::Text(prompts::text_prompt(
                source_lang,
                text,
            ))],
            temperature: Some(self.config.text_temperature),
            max_output_tokens: self.config.max_output_tokens,
        };

        self.send(request, TranslationRoute::Text, 0, start).await
    }

    /// Translate a PDF document on disk.
    pub async fn translate_pdf(
        &self,
        path: impl AsRef<Path>,
        source_lang: SourceLanguage,
    ) -> Result<Translation, MozhiError> {
        let bytes = input::read_pdf(path).await?;
        self.translate_pdf_bytes(&bytes, source_lang).await
    }

    /// Translate in-memory PDF bytes.
    ///
    /// This is the route that carries the adapter's decision logic:
    /// extraction first, vision fallback, size ceiling before any encoding.
    pub async fn translate_pdf_bytes(
        &self,
        bytes: &[u8],
        source_lang: SourceLanguage,
    ) -> Result<Translation, MozhiError> {
        let start = Instant::now();

        input::validate_magic(bytes).map_err(|magic| MozhiError::NotAPdf {
            path: PathBuf::from("<bytes>"),
            magic,
        })?;

        // PDF mode never proceeds without a credential; checked before any
        // extraction or encoding so the failure costs nothing.
        if !self.has_credential {
            return Err(MozhiError::MissingApiKey);
        }

        // Extraction failure is non-fatal: inspect, log, continue as if the
        // document had no text layer. The fallback decision lives here and
        // nowhere else.
        let extracted = match extract::extract_text(bytes) {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "PDF text extraction failed, falling back to vision");
                String::new()
            }
        };

        let extracted_chars = extracted.chars().count();
        if extracted_chars > self.config.extracted_text_threshold {
            info!(
                %source_lang,
                extracted_chars,
                "PDF has a usable text layer, taking the extracted-text route"
            );
            let request = GenerationRequest {
                system_instruction: prompts::SYSTEM_INSTRUCTION.to_string(),
                parts: vec![GenerationPart::Text(prompts::document_prompt(
                    source_lang,
                    &extracted,
                ))],
                temperature: None,
                max_output_tokens: self.config.max_output_tokens,
            };
            return self
                .send(request, TranslationRoute::ExtractedText, extracted_chars, start)
                .await;
        }

        // Vision fallback. The ceiling is checked before encoding: transport
        // encoding adds ~33% and the remote enforces an overall payload
        // limit, so an oversized file would be rejected anyway.
        let size = bytes.len() as u64;
        if size > self.config.max_vision_file_bytes {
            return Err(MozhiError::FileTooLarge {
                size_mb: size as f64 / (1024.0 * 1024.0),
                limit_mb: self.config.max_vision_file_bytes / (1024 * 1024),
            });
        }

        info!(
            %source_lang,
            size_bytes = size,
            extracted_chars,
            "no usable text layer, taking the vision route"
        );

        let encoded = encode::encode_for_transport(bytes);
        let request = GenerationRequest {
            system_instruction: prompts::SYSTEM_INSTRUCTION.to_string(),
            parts: vec![
                GenerationPart::InlineData {
                    mime_type: "application/pdf".to_string(),
                    data: encoded,
                },
                GenerationPart::Text(prompts::vision_prompt(source_lang)),
            ],
            temperature: None,
            max_output_tokens: self.config.max_output_tokens,
        };

        self.send(request, TranslationRoute::Vision, extracted_chars, start)
            .await
    }

    /// Issue the request and shape the response into a [`Translation`].
    async fn send(
        &self,
        request: GenerationRequest,
        route: TranslationRoute,
        extracted_chars: usize,
        start: Instant,
    ) -> Result<Translation, MozhiError> {
        let response = self.service.generate(&request).await?;
        let duration_ms = start.elapsed().as_millis() as u64;

        let text = match response.text {
            Some(t) => t,
            None => {
                debug!(?route, "service returned no usable text, applying fallback literal");
                fallback_literal(route).to_string()
            }
        };

        debug!(
            ?route,
            duration_ms,
            prompt_tokens = response.prompt_tokens,
            completion_tokens = response.completion_tokens,
            "translation complete"
        );

        Ok(Translation {
            text,
            route,
            extracted_chars,
            prompt_tokens: response.prompt_tokens,
            completion_tokens: response.completion_tokens,
            duration_ms,
        })
    }
}

fn fallback_literal(route: TranslationRoute) -> &'static str {
    match route {
        TranslationRoute::Text => FALLBACK_TEXT,
        TranslationRoute::ExtractedText => FALLBACK_EXTRACTED,
        TranslationRoute::Vision => FALLBACK_VISION,
    }
}

// ── Free-function entry points ───────────────────────────────────────────

/// Translate raw text to casual Malayalam.
///
/// This is the primary text-mode entry point for the library.
///
/// # Errors
/// [`MozhiError::EmptyInput`] for blank input, [`MozhiError::InputTooLong`]
/// past the character gate, [`MozhiError::Service`] when the remote call
/// fails.
pub async fn translate_text(
    text: &str,
    source_lang: SourceLanguage,
    config: &TranslatorConfig,
) -> Result<Translation, MozhiError> {
    Translator::new(config.clone())?
        .translate_text(text, source_lang)
        .await
}

/// Translate a PDF document to casual Malayalam.
///
/// Extraction-first: documents with a usable text layer are sent as text;
/// scans fall back to an inline-binary vision request, subject to the size
/// ceiling.
pub async fn translate_pdf(
    path: impl AsRef<Path>,
    source_lang: SourceLanguage,
    config: &TranslatorConfig,
) -> Result<Translation, MozhiError> {
    Translator::new(config.clone())?
        .translate_pdf(path, source_lang)
        .await
}

/// Translate in-memory PDF bytes, for callers that hold the document
/// already (uploads, database blobs) and have no file on disk.
pub async fn translate_pdf_bytes(
    bytes: &[u8],
    source_lang: SourceLanguage,
    config: &TranslatorConfig,
) -> Result<Translation, MozhiError> {
    Translator::new(config.clone())?
        .translate_pdf_bytes(bytes, source_lang)
        .await
}
