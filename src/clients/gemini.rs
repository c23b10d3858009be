use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::clients::traits::{GenerativeModel, ModelResponse};
use crate::config::{Config, DEFAULT_API_BASE, DEFAULT_MODEL};
use crate::error::{MandalaError, Result};
use crate::prompts::StructuredRequest;

const ERROR_BODY_CAP_BYTES: usize = 2 * 1024;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'a str,
    response_schema: &'a Value,
    temperature: f32,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// Concatenated text of the first candidate, or `EmptyResponse`
fn extract_text(response: GenerateContentResponse) -> Result<String> {
    let Some(candidate) = response.candidates.into_iter().next() else {
        return Err(MandalaError::EmptyResponse {
            message: "response carried no candidates".to_string(),
        });
    };
    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();
    if text.trim().is_empty() {
        return Err(MandalaError::EmptyResponse {
            message: format!(
                "candidate had no text (finish reason: {})",
                candidate.finish_reason.as_deref().unwrap_or("unknown")
            ),
        });
    }
    Ok(text)
}

/// Gemini `generateContent` client using JSON response mode
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    api_base: String,
    temperature: f32,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::build(
            api_key.into(),
            DEFAULT_MODEL.to_string(),
            DEFAULT_API_BASE.to_string(),
            Duration::from_secs(120),
            0.7,
        )
    }

    /// Build from loaded configuration; fails with `MissingCredential` when no key is set
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config
            .runtime
            .api_key
            .clone()
            .ok_or_else(|| MandalaError::MissingCredential {
                message: "GEMINI_API_KEY is not set".to_string(),
            })?;
        Self::build(
            api_key,
            config.model.name.clone(),
            config.model.api_base.clone(),
            Duration::from_millis(config.model.timeout_ms),
            config.model.temperature,
        )
    }

    fn build(
        api_key: String,
        model: String,
        api_base: String,
        timeout: Duration,
        temperature: f32,
    ) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(MandalaError::MissingCredential {
                message: "API key is empty".to_string(),
            });
        }
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MandalaError::Config {
                message: format!("Failed to build reqwest client: {}", e),
            })?;
        Ok(Self {
            client,
            api_key,
            model,
            api_base: api_base.trim_end_matches('/').to_string(),
            temperature,
        })
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_base, self.model)
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    async fn generate(&self, request: &StructuredRequest) -> Result<ModelResponse> {
        debug!(
            "Gemini request (model={}, kind={:?}, prompt_chars={})",
            self.model,
            request.kind,
            request.prompt.chars().count()
        );

        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart {
                    text: &request.prompt,
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: &request.schema,
                temperature: self.temperature,
            },
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let mut error_text = response.text().await.unwrap_or_default();
            if error_text.len() > ERROR_BODY_CAP_BYTES {
                let mut cut = ERROR_BODY_CAP_BYTES;
                while !error_text.is_char_boundary(cut) {
                    cut -= 1;
                }
                error_text.truncate(cut);
            }
            return Err(MandalaError::Http {
                message: format!("Gemini API error {}: {}", status, error_text),
            });
        }

        let raw = response.text().await?;
        if raw.trim().is_empty() {
            return Err(MandalaError::EmptyResponse {
                message: "Gemini returned an empty body".to_string(),
            });
        }
        let parsed: GenerateContentResponse = serde_json::from_str(&raw)?;
        let text = extract_text(parsed)?;
        debug!("Gemini response received ({} chars)", text.chars().count());

        Ok(ModelResponse {
            model: self.model.clone(),
            text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_text_joins_parts() {
        let resp: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"[{\"a\":"},{"text":"1}]"}]},"finishReason":"STOP"}]}"#,
        )
        .unwrap();
        assert_eq!(extract_text(resp).unwrap(), r#"[{"a":1}]"#);
    }

    #[test]
    fn test_no_candidates_is_empty_response() {
        let resp: GenerateContentResponse =
            serde_json::from_str(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#).unwrap();
        assert!(matches!(
            extract_text(resp),
            Err(MandalaError::EmptyResponse { .. })
        ));
    }

    #[test]
    fn test_blank_candidate_is_empty_response() {
        let resp: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[]},"finishReason":"MAX_TOKENS"}]}"#,
        )
        .unwrap();
        let err = extract_text(resp).unwrap_err();
        assert!(err.to_string().contains("MAX_TOKENS"));
    }

    #[test]
    fn test_missing_key_is_missing_credential() {
        let config = Config::default();
        assert!(matches!(
            GeminiClient::from_config(&config),
            Err(MandalaError::MissingCredential { .. })
        ));
        assert!(matches!(
            GeminiClient::new("  "),
            Err(MandalaError::MissingCredential { .. })
        ));
    }

    #[test]
    fn test_endpoint_uses_model_name() {
        let client = GeminiClient::new("k").unwrap().with_model("gemini-test");
        assert_eq!(
            client.endpoint(),
            format!("{}/models/gemini-test:generateContent", DEFAULT_API_BASE)
        );
    }

    #[test]
    fn test_request_body_shape() {
        let schema = serde_json::json!({"type": "ARRAY"});
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart { text: "hi" }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: &schema,
                temperature: 0.5,
            },
        };
        let v = serde_json::to_value(&body).unwrap();
        assert_eq!(
            v["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(v["generationConfig"]["responseSchema"]["type"], "ARRAY");
        assert_eq!(v["contents"][0]["parts"][0]["text"], "hi");
    }
}
