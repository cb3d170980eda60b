//! Prompt construction for casual-Malayalam translation.
//!
//! Centralising every prompt here serves two purposes:
//!
//! 1. **Single source of truth** — the register instructions (avoid formal
//!    "Achadi" Malayalam, keep technical terms as people actually say them)
//!    live in exactly one place.
//!
//! 2. **Testability** — unit tests can inspect the assembled prompts
//!    directly without calling a real service, so a wording regression that
//!    would silently change translation quality is caught in CI.
//!
//! Three request shapes exist, one per route the adapter can take: raw
//! text, extracted document text, and the inline-PDF vision fallback.

use crate::config::SourceLanguage;

/// System instruction sent with every translation request.
pub const SYSTEM_INSTRUCTION: &str = r#"
You are a highly skilled translator specializing in "Casual Malayalam".
Your goal is to translate the input text (which could be English or Manglish) into natural, spoken-style Malayalam (Casual Malayalam).
Avoid formal, bookish, or "Achadi" Malayalam. Use the kind of language friends use when chatting.
If the input is technical, keep the technical terms in English or transliterated Malayalam if that's how people naturally speak.
"#;

/// Prompt for the raw-text route: names the source language and quotes the
/// input verbatim.
pub fn text_prompt(source_lang: SourceLanguage, text: &str) -> String {
    format!("Translate the following {source_lang} text to Casual Malayalam:\n\n\"{text}\"")
}

/// Prompt for the extracted-document route. The extracted text is appended
/// under a marker so the instruction and the content stay visually separate
/// in the request.
pub fn document_prompt(source_lang: SourceLanguage, extracted: &str) -> String {
    format!(
        "Translate the content of this document from {source_lang} to Casual Malayalam. \
        Maintain the original structure where possible.\n\n--- Document Content ---\n{extracted}"
    )
}

/// Prompt accompanying the inline PDF on the vision fallback route.
pub fn vision_prompt(source_lang: SourceLanguage) -> String {
    format!(
        "Translate the content of this PDF from {source_lang} to Casual Malayalam. \
        Maintain the original structure where possible, but ensure the tone is conversational."
    )
}
