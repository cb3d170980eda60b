//! # mozhi
//!
//! Translate English or Manglish text and PDF documents into casual,
//! spoken-register Malayalam using the Gemini generateContent API.
//!
//! ## Why this crate?
//!
//! General-purpose translators produce formal, bookish ("Achadi")
//! Malayalam that nobody actually speaks. mozhi pins the register in the
//! system instruction (the kind of language friends use when chatting)
//! and wraps the one genuinely fiddly part in a tested adapter: deciding
//! whether a PDF should travel as extracted text or as an inline binary
//! for the model to read visually.
//!
//! ## Pipeline Overview
//!
//! ```text
//! Text ────────────────────────────────▶ one text request
//!
//! PDF
//!  │
//!  ├─ 1. Input    read bytes, validate %PDF magic
//!  ├─ 2. Extract  pull the text layer via lopdf (failure is non-fatal)
//!  │      > 50 extracted chars ────────▶ extracted-text request
//!  │      otherwise:
//!  ├─ 3. Ceiling  reject > 10 MB before any encoding or network call
//!  ├─ 4. Encode   base64 the raw bytes
//!  └─ 5. Vision   inline application/pdf request
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mozhi::{translate_text, SourceLanguage, TranslatorConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Credential read from GEMINI_API_KEY if not set explicitly
//!     let config = TranslatorConfig::default();
//!     let result = translate_text("Eda, enthada vishesham?", SourceLanguage::Manglish, &config).await?;
//!     println!("{}", result.text);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature  | Default | Description |
//! |----------|---------|-------------|
//! | `cli`    | on      | Enables the `mozhi` binary (clap + anyhow + tracing-subscriber) |
//! | `export` | on      | A4 PDF export of translations (genpdf + chrono) |
//!
//! Disable both when using only the library:
//! ```toml
//! mozhi = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
#[cfg(feature = "export")]
pub mod export;
pub mod output;
pub mod pipeline;
pub mod prompts;
pub mod service;
pub mod translate;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{SourceLanguage, TranslationMode, TranslatorConfig, TranslatorConfigBuilder};
pub use error::{ExtractionError, MozhiError};
#[cfg(feature = "export")]
pub use export::export_pdf;
pub use output::{Translation, TranslationRoute};
pub use service::{GenerationPart, GenerationRequest, GenerationResponse, GenerationService};
pub use translate::{
    translate_pdf, translate_pdf_bytes, translate_text, InputPayload, Translator,
};
