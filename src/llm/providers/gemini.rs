//! Gemini `generateContent` provider.
//!
//! Sends the prompt as the single text part of a single content block and
//! pulls the reply out of `candidates[0].content.parts[0].text`. A flat
//! top-level `output` string is accepted when that path is missing. All
//! Gemini wire types are private to this module.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::config::GeminiConfig;
use crate::llm::ProviderError;

// ── Public provider ───────────────────────────────────────────────────────────

/// Constructed once at startup, then cheaply cloned because
/// `reqwest::Client` is an `Arc` internally.
#[derive(Clone)]
pub struct GeminiProvider {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl std::fmt::Debug for GeminiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiProvider")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl GeminiProvider {
    /// Build a provider with separate connect and read timeouts.
    pub fn new(config: &GeminiConfig, api_key: String) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .read_timeout(Duration::from_secs(config.read_timeout_seconds))
            .build()
            .map_err(|e| ProviderError::Request(format!("failed to build HTTP client: {e}")))?;

        let endpoint = format!(
            "{}/{}:generateContent",
            config.api_base_url.trim_end_matches('/'),
            config.model
        );

        Ok(Self { client, endpoint, api_key })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// One round-trip: POST the prompt, classify the reply body.
    pub async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        let payload = GenerateContentRequest {
            contents: vec![RequestContent { parts: vec![RequestPart { text: prompt.to_string() }] }],
        };

        debug!(endpoint = %self.endpoint, prompt_len = prompt.len(), "sending generateContent request");

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                warn!(endpoint = %self.endpoint, timeout = e.is_timeout(), error = %e, "generateContent transport failure");
                ProviderError::Request(e.to_string())
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Request(format!("failed to read response body: {e}")))?;

        if !status.is_success() {
            warn!(%status, "generateContent returned HTTP error");
            return Err(ProviderError::Status { status: status.as_u16(), body });
        }

        trace!(response = %body, "full generateContent response");

        match ResponseShape::classify(&body) {
            ResponseShape::Primary(text) => Ok(text),
            ResponseShape::FallbackOutput(text) => {
                debug!("using top-level output field");
                Ok(text)
            }
            ResponseShape::Unrecognized => Err(ProviderError::Shape(truncate(&body, 200))),
        }
    }
}

// ── Response shapes ───────────────────────────────────────────────────────────

/// The forms a `generateContent` reply body can take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseShape {
    /// `candidates[0].content.parts[0].text`
    Primary(String),
    /// Top-level `output` string.
    FallbackOutput(String),
    /// Anything else, including empty text.
    Unrecognized,
}

impl ResponseShape {
    pub fn classify(body: &str) -> Self {
        let Ok(parsed) = serde_json::from_str::<GenerateContentResponse>(body) else {
            return ResponseShape::Unrecognized;
        };

        if let Some(text) = parsed.primary_text() {
            return ResponseShape::Primary(text);
        }

        match parsed.output.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => ResponseShape::FallbackOutput(text.to_string()),
            _ => ResponseShape::Unrecognized,
        }
    }
}

// ── Private wire types ────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<RequestContent>,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Option<Vec<Candidate>>,
    #[serde(default)]
    output: Option<String>,
}

impl GenerateContentResponse {
    fn primary_text(&self) -> Option<String> {
        let text = self
            .candidates
            .as_ref()?
            .first()?
            .content
            .as_ref()?
            .parts
            .as_ref()?
            .first()?
            .text
            .as_deref()?
            .trim();
        (!text.is_empty()).then(|| text.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Option<Vec<Part>>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

fn truncate(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => format!("{}…", &s[..idx]),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_shape() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"  Gout is arthritis.  "}],"role":"model"}}]}"#;
        assert_eq!(ResponseShape::classify(body), ResponseShape::Primary("Gout is arthritis.".into()));
    }

    #[test]
    fn primary_takes_first_candidate_and_part() {
        let body = r#"{"candidates":[
            {"content":{"parts":[{"text":"first"},{"text":"second"}]}},
            {"content":{"parts":[{"text":"other"}]}}
        ]}"#;
        assert_eq!(ResponseShape::classify(body), ResponseShape::Primary("first".into()));
    }

    #[test]
    fn primary_wins_over_output() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"a"}]}}],"output":"b"}"#;
        assert_eq!(ResponseShape::classify(body), ResponseShape::Primary("a".into()));
    }

    #[test]
    fn output_fallback() {
        assert_eq!(
            ResponseShape::classify(r#"{"output":"flat answer"}"#),
            ResponseShape::FallbackOutput("flat answer".into())
        );
    }

    #[test]
    fn broken_primary_falls_back_to_output() {
        let body = r#"{"candidates":[],"output":"flat"}"#;
        assert_eq!(ResponseShape::classify(body), ResponseShape::FallbackOutput("flat".into()));
    }

    #[test]
    fn each_missing_level_is_unrecognized() {
        let bodies = [
            r#"{}"#,
            r#"{"candidates":[]}"#,
            r#"{"candidates":[{}]}"#,
            r#"{"candidates":[{"content":{}}]}"#,
            r#"{"candidates":[{"content":{"parts":[]}}]}"#,
            r#"{"candidates":[{"content":{"parts":[{}]}}]}"#,
            r#"{"candidates":[{"content":{"parts":[{"text":"   "}]}}]}"#,
            r#"{"output":""}"#,
        ];
        for body in bodies {
            assert_eq!(ResponseShape::classify(body), ResponseShape::Unrecognized, "body: {body}");
        }
    }

    #[test]
    fn non_json_is_unrecognized() {
        assert_eq!(ResponseShape::classify("<html>502</html>"), ResponseShape::Unrecognized);
        assert_eq!(ResponseShape::classify(r#"{"candidates":"nope"}"#), ResponseShape::Unrecognized);
    }

    #[test]
    fn request_wire_shape() {
        let payload = GenerateContentRequest {
            contents: vec![RequestContent { parts: vec![RequestPart { text: "hi".into() }] }],
        };
        let v = serde_json::to_value(&payload).unwrap();
        assert_eq!(v, serde_json::json!({"contents":[{"parts":[{"text":"hi"}]}]}));
    }

    #[test]
    fn endpoint_joins_model() {
        let cfg = GeminiConfig {
            api_base_url: "http://127.0.0.1:1/v1beta/models/".into(),
            model: "gemini-2.5-flash".into(),
            connect_timeout_seconds: 1,
            read_timeout_seconds: 1,
        };
        let p = GeminiProvider::new(&cfg, "k".into()).unwrap();
        assert_eq!(p.endpoint(), "http://127.0.0.1:1/v1beta/models/gemini-2.5-flash:generateContent");
        assert!(!format!("{p:?}").contains("\"k\""));
    }

    #[test]
    fn truncate_long_body() {
        assert_eq!(truncate("abcdef", 3), "abc…");
        assert_eq!(truncate("abc", 3), "abc");
    }
}
