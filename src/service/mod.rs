//! The generation-service seam.
//!
//! The adapter never talks HTTP directly; it builds a [`GenerationRequest`]
//! and hands it to whatever implements [`GenerationService`]. The production
//! implementation is [`gemini::GeminiClient`]; tests substitute a recording
//! mock through [`crate::config::TranslatorConfig::service`]. Every routing
//! property the adapter guarantees (one call per request, no call on
//! validation failure, no inline part on the text route) is asserted against
//! this seam.

pub mod gemini;

use crate::error::MozhiError;
use async_trait::async_trait;

/// One ordered piece of a generation request.
///
/// Requests are either pure text or text plus one inline binary document;
/// the service renders the parts in the order given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationPart {
    /// Plain prompt text.
    Text(String),
    /// Transport-encoded binary content with its MIME type
    /// (`application/pdf` on the vision route).
    InlineData { mime_type: String, data: String },
}

impl GenerationPart {
    /// Whether this part carries inline binary content.
    pub fn is_inline_data(&self) -> bool {
        matches!(self, GenerationPart::InlineData { .. })
    }
}

/// A single request to the remote generation service.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// Fixed behavioural instruction, sent out-of-band from the user parts.
    pub system_instruction: String,
    /// Ordered user content parts.
    pub parts: Vec<GenerationPart>,
    /// Sampling temperature. `None` leaves the service default in place.
    pub temperature: Option<f32>,
    /// Output token budget for this request.
    pub max_output_tokens: u32,
}

impl GenerationRequest {
    /// Concatenated text of every [`GenerationPart::Text`] part, for logging
    /// and test assertions.
    pub fn prompt_text(&self) -> String {
        self.parts
            .iter()
            .filter_map(|p| match p {
                GenerationPart::Text(t) => Some(t.as_str()),
                GenerationPart::InlineData { .. } => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Whether any part carries inline binary content.
    pub fn has_inline_data(&self) -> bool {
        self.parts.iter().any(GenerationPart::is_inline_data)
    }
}

/// What came back from the service.
///
/// Absence of text is not a transport error: the remote can legitimately
/// return an empty candidate (safety block, empty completion), and the
/// adapter substitutes a fallback literal in that case.
#[derive(Debug, Clone, Default)]
pub struct GenerationResponse {
    /// The generated text, if the response carried any.
    pub text: Option<String>,
    /// Prompt token count, when the service reports usage.
    pub prompt_tokens: u32,
    /// Completion token count, when the service reports usage.
    pub completion_tokens: u32,
}

/// A remote text-generation service.
///
/// One operation, no retry obligations: implementations surface every
/// failure immediately and the adapter decides what it means.
#[async_trait]
pub trait GenerationService: Send + Sync {
    /// Run one generation request to completion.
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResponse, MozhiError>;
}
