// src/services/genai.rs
//! Hosted text-generation client.
//!
//! All AI features (job analysis, resume structuring, resume enhancement)
//! go through this service. Requests use a fixed generation config
//! (temperature 0.2, topK 40, topP 0.8, 2048 output tokens) and fixed
//! content-safety thresholds; callers supply only the prompt.

use regex::Regex;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, info, warn};

#[derive(Debug, thiserror::Error)]
pub enum GenAiError {
    #[error("API key not configured")]
    NotConfigured,

    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}

#[derive(Debug, Clone)]
pub struct GenAiConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
}

impl GenAiConfig {
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("GEMINI_API_KEY").ok(),
            base_url: std::env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| "https://generativelanguage.googleapis.com".to_string()),
            model: std::env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-1.5-flash".to_string()),
        }
    }
}

/// Which feature a generation request is serving; selects the system framing
#[derive(Debug, Clone, Copy)]
pub enum GenerationPurpose {
    JobAnalysis,
    ResumeStructuring,
    ResumeEnhancement,
}

impl GenerationPurpose {
    fn system_framing(&self) -> &'static str {
        match self {
            GenerationPurpose::JobAnalysis => {
                "You are an expert recruiter and job-posting analyst. You respond with a single JSON object and nothing else."
            }
            GenerationPurpose::ResumeStructuring => {
                "You are an expert resume parser. Given raw resume text, you respond with a single JSON object matching the requested schema and nothing else."
            }
            GenerationPurpose::ResumeEnhancement => {
                "You are an expert resume writer tailoring resumes to job postings. You never invent employment history. You respond with a single JSON object and nothing else."
            }
        }
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
    #[serde(rename = "safetySettings")]
    safety_settings: Vec<SafetySetting>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "topK")]
    top_k: u32,
    #[serde(rename = "topP")]
    top_p: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.2,
            top_k: 40,
            top_p: 0.8,
            max_output_tokens: 2048,
        }
    }
}

#[derive(Debug, Serialize)]
struct SafetySetting {
    category: &'static str,
    threshold: &'static str,
}

fn default_safety_settings() -> Vec<SafetySetting> {
    [
        "HARM_CATEGORY_HARASSMENT",
        "HARM_CATEGORY_HATE_SPEECH",
        "HARM_CATEGORY_SEXUALLY_EXPLICIT",
        "HARM_CATEGORY_DANGEROUS_CONTENT",
    ]
    .into_iter()
    .map(|category| SafetySetting {
        category,
        threshold: "BLOCK_MEDIUM_AND_ABOVE",
    })
    .collect()
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(rename = "usageMetadata")]
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UsageMetadata {
    #[serde(rename = "totalTokenCount", default)]
    total_token_count: u32,
}

// ============================================================================
// Service
// ============================================================================

#[derive(Debug)]
pub struct GenAiService {
    config: GenAiConfig,
    client: Client,
}

impl GenAiService {
    pub fn new(config: GenAiConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { config, client }
    }

    /// Generate text for the given purpose.
    ///
    /// The prompt is prefixed with a purpose-specific framing; generation
    /// parameters and safety thresholds are fixed.
    pub async fn generate_text(
        &self,
        purpose: GenerationPurpose,
        prompt: &str,
    ) -> Result<String, GenAiError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(GenAiError::NotConfigured)?;

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: format!("{}\n\n{}", purpose.system_framing(), prompt),
                }],
            }],
            generation_config: GenerationConfig::default(),
            safety_settings: default_safety_settings(),
        };

        debug!(purpose = ?purpose, model = %self.config.model, "Sending text generation request");

        let response = self
            .make_request_with_retry(api_key, &request)
            .await?;

        if let Some(usage) = &response.usage_metadata {
            info!(
                purpose = ?purpose,
                model = %self.config.model,
                tokens_used = usage.total_token_count,
                "Text generation completed"
            );
        }

        let candidate = response
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| GenAiError::InvalidResponse("No candidates in response".to_string()))?;

        if let Some(reason) = &candidate.finish_reason {
            if reason == "SAFETY" {
                return Err(GenAiError::InvalidResponse(
                    "Generation blocked by safety filter".to_string(),
                ));
            }
        }

        candidate
            .content
            .and_then(|c| c.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| GenAiError::InvalidResponse("No text in candidate".to_string()))
    }

    /// Generate text and parse the first JSON object out of the reply.
    pub async fn generate_json(
        &self,
        purpose: GenerationPurpose,
        prompt: &str,
    ) -> Result<Value, GenAiError> {
        let text = self.generate_text(purpose, prompt).await?;
        extract_json_object(&text)
            .ok_or_else(|| GenAiError::InvalidResponse("No JSON object in model output".to_string()))
    }

    async fn make_request_with_retry(
        &self,
        api_key: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GenAiError> {
        let max_retries = 3;
        let mut last_error = None;

        for attempt in 1..=max_retries {
            match self.make_request(api_key, request).await {
                Ok(response) => return Ok(response),
                Err(e) => {
                    warn!(
                        attempt = attempt,
                        max_retries = max_retries,
                        error = %e,
                        "Generation request failed, retrying..."
                    );
                    last_error = Some(e);

                    // Exponential backoff
                    if attempt < max_retries {
                        let delay = std::time::Duration::from_millis(1000 * 2_u64.pow(attempt - 1));
                        tokio::time::sleep(delay).await;
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| GenAiError::RequestFailed("Unknown error".to_string())))
    }

    async fn make_request(
        &self,
        api_key: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GenAiError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.config.base_url.trim_end_matches('/'),
            self.config.model,
            api_key
        );

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| GenAiError::RequestFailed(e.to_string()))?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(GenAiError::RateLimitExceeded);
        }

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!(status = %status, error = %error_text, "Generation API request failed");
            return Err(GenAiError::RequestFailed(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| GenAiError::InvalidResponse(e.to_string()))
    }
}

/// Locate the first `{...}` span in model output and parse it as JSON.
///
/// Models frequently wrap their JSON in prose or markdown fences; the span
/// from the first `{` to the last `}` is taken and handed to serde.
pub fn extract_json_object(text: &str) -> Option<Value> {
    let re = Regex::new(r"\{[\s\S]*\}").ok()?;
    let span = re.find(text)?;
    serde_json::from_str(span.as_str()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_json_object_plain() {
        let value = extract_json_object(r#"{"skills": ["Rust"]}"#).unwrap();
        assert_eq!(value["skills"][0], "Rust");
    }

    #[test]
    fn test_extract_json_object_wrapped_in_prose() {
        let text = "Sure! Here is the analysis:\n```json\n{\"quality_score\": 87}\n```\nHope that helps.";
        let value = extract_json_object(text).unwrap();
        assert_eq!(value["quality_score"], 87);
    }

    #[test]
    fn test_extract_json_object_nested_braces() {
        let text = "prefix {\"outer\": {\"inner\": 1}} suffix";
        let value = extract_json_object(text).unwrap();
        assert_eq!(value["outer"]["inner"], 1);
    }

    #[test]
    fn test_extract_json_object_missing() {
        assert!(extract_json_object("no json here").is_none());
        assert!(extract_json_object("broken { not json }").is_none());
    }

    #[test]
    fn test_generation_config_defaults() {
        let config = GenerationConfig::default();
        assert_eq!(config.temperature, 0.2);
        assert_eq!(config.top_k, 40);
        assert_eq!(config.top_p, 0.8);
        assert_eq!(config.max_output_tokens, 2048);
    }

    #[test]
    fn test_safety_settings_cover_all_categories() {
        let settings = default_safety_settings();
        assert_eq!(settings.len(), 4);
        assert!(settings
            .iter()
            .all(|s| s.threshold == "BLOCK_MEDIUM_AND_ABOVE"));
    }
}
