//! Gemini `generateContent` client.
//!
//! A thin reqwest implementation of [`GenerationService`] against the
//! Google Generative Language REST API. The wire format is the camelCase
//! JSON the API documents: `systemInstruction`, `contents[].parts[]` with
//! either `text` or `inlineData {mimeType, data}`, and a `generationConfig`
//! block for sampling parameters.
//!
//! No retry logic lives here: every failure (connect error, timeout,
//! non-2xx status, unparseable body) maps to [`MozhiError::Service`] and
//! surfaces immediately. Absence of candidate text is *not* a failure; it
//! comes back as `GenerationResponse { text: None, .. }` for the adapter to
//! handle.

use crate::config::TranslatorConfig;
use crate::error::MozhiError;
use crate::service::{GenerationPart, GenerationRequest, GenerationResponse, GenerationService};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// HTTP client for the Gemini generateContent endpoint.
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    /// Build a client from the adapter configuration.
    ///
    /// An empty `api_key` is accepted on purpose: text-mode requests are
    /// allowed to reach the remote and be rejected there (the rejection
    /// surfaces as [`MozhiError::Service`]). PDF mode never gets this far
    /// without a credential.
    pub fn new(config: &TranslatorConfig) -> Result<Self, MozhiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.api_timeout_secs))
            .build()
            .map_err(|e| MozhiError::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

#[async_trait]
impl GenerationService for GeminiClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResponse, MozhiError> {
        let body = WireRequest::from(request);
        debug!(
            model = %self.model,
            parts = request.parts.len(),
            inline = request.has_inline_data(),
            "sending generateContent request"
        );

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    MozhiError::service(format!("request timed out: {e}"))
                } else {
                    MozhiError::service(format!("request failed: {e}"))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            warn!(%status, "generateContent returned an error status");
            return Err(MozhiError::service(format!(
                "HTTP {status}: {}",
                truncate(&detail, 300)
            )));
        }

        let wire: WireResponse = response
            .json()
            .await
            .map_err(|e| MozhiError::service(format!("malformed response body: {e}")))?;

        Ok(wire.into_response())
    }
}

/// Clip long error bodies so a quota page does not flood the terminal.
fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

// ── Wire types ───────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireRequest {
    system_instruction: WireContent,
    contents: Vec<WireContent>,
    generation_config: WireGenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    // A candidate cut off before producing content has no parts at all.
    #[serde(default)]
    parts: Vec<WirePart>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
enum WirePart {
    #[serde(rename = "text")]
    Text(String),
    #[serde(rename = "inlineData", rename_all = "camelCase")]
    InlineData { mime_type: String, data: String },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    max_output_tokens: u32,
}

impl From<&GenerationRequest> for WireRequest {
    fn from(req: &GenerationRequest) -> Self {
        let parts = req
            .parts
            .iter()
            .map(|p| match p {
                GenerationPart::Text(t) => WirePart::Text(t.clone()),
                GenerationPart::InlineData { mime_type, data } => WirePart::InlineData {
                    mime_type: mime_type.clone(),
                    data: data.clone(),
                },
            })
            .collect();

        WireRequest {
            system_instruction: WireContent {
                role: None,
                parts: vec![WirePart::Text(req.system_instruction.clone())],
            },
            contents: vec![WireContent {
                role: Some("user".to_string()),
                parts,
            }],
            generation_config: WireGenerationConfig {
                temperature: req.temperature,
                max_output_tokens: req.max_output_tokens,
            },
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct WireResponse {
    #[serde(default)]
    candidates: Vec<WireCandidate>,
    #[serde(default)]
    usage_metadata: Option<WireUsage>,
}

#[derive(Debug, Deserialize)]
struct WireCandidate {
    #[serde(default)]
    content: Option<WireContent>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct WireUsage {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
}

impl WireResponse {
    /// Concatenate the first candidate's text parts; empty or missing text
    /// becomes `None` so the adapter can apply its fallback literal.
    fn into_response(self) -> GenerationResponse {
        let text = self
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| match p {
                        WirePart::Text(t) => Some(t),
                        WirePart::InlineData { .. } => None,
                    })
                    .collect::<Vec<_>>()
                    .join("")
            })
            .filter(|t| !t.trim().is_empty());

        let usage = self.usage_metadata.unwrap_or_default();
        GenerationResponse {
            text,
            prompt_tokens: usage.prompt_token_count,
            completion_tokens: usage.candidates_token_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_request() -> GenerationRequest {
        GenerationRequest {
            system_instruction: "be casual".into(),
            parts: vec![
                GenerationPart::InlineData {
                    mime_type: "application/pdf".into(),
                    data: "JVBERi0=".into(),
                },
                GenerationPart::Text("translate this PDF".into()),
            ],
            temperature: Some(0.7),
            max_output_tokens: 8192,
        }
    }

    #[test]
    fn wire_request_serialises_camel_case() {
        let wire = WireRequest::from(&sample_request());
        let json = serde_json::to_value(&wire).unwrap();

        assert!(json.get("systemInstruction").is_some());
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 8192);
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(
            json["contents"][0]["parts"][0]["inlineData"]["mimeType"],
            "application/pdf"
        );
        assert_eq!(json["contents"][0]["parts"][1]["text"], "translate this PDF");
    }

    #[test]
    fn wire_request_omits_temperature_when_unset() {
        let mut req = sample_request();
        req.temperature = None;
        let json = serde_json::to_value(WireRequest::from(&req)).unwrap();
        assert!(json["generationConfig"].get("temperature").is_none());
    }

    #[test]
    fn response_text_concatenated_from_first_candidate() {
        let raw = serde_json::json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{"text": "എടാ, "}, {"text": "എന്താടാ വിശേഷം?"}]
                }
            }],
            "usageMetadata": {"promptTokenCount": 12, "candidatesTokenCount": 9}
        });
        let wire: WireResponse = serde_json::from_value(raw).unwrap();
        let resp = wire.into_response();
        assert_eq!(resp.text.as_deref(), Some("എടാ, എന്താടാ വിശേഷം?"));
        assert_eq!(resp.prompt_tokens, 12);
        assert_eq!(resp.completion_tokens, 9);
    }

    #[test]
    fn empty_candidates_yield_no_text() {
        let wire: WireResponse = serde_json::from_value(serde_json::json!({})).unwrap();
        let resp = wire.into_response();
        assert!(resp.text.is_none());
    }

    #[test]
    fn whitespace_only_text_counts_as_empty() {
        let raw = serde_json::json!({
            "candidates": [{"content": {"parts": [{"text": "   "}]}}]
        });
        let wire: WireResponse = serde_json::from_value(raw).unwrap();
        assert!(wire.into_response().text.is_none());
    }
}
