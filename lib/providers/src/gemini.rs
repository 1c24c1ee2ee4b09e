//! Text generation through the Gemini `generateContent` API.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use ragshelf_core::Error;
use ragshelf_rag::Generator;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::{Deserialize, Serialize};

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.0-pro";

pub struct GeminiGenerator {
    api_key: String,
    endpoint: String,
    client: Client,
}

impl GeminiGenerator {
    pub fn new(api_key: String, model: String) -> Result<Self> {
        Self::with_base_url(api_key, model, DEFAULT_GEMINI_BASE_URL)
    }

    pub fn with_base_url(api_key: String, model: String, base_url: &str) -> Result<Self> {
        anyhow::ensure!(!api_key.trim().is_empty(), "missing Gemini API key");
        anyhow::ensure!(!model.trim().is_empty(), "missing Gemini model name");
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .context("failed to build Gemini HTTP client")?;
        Ok(Self {
            api_key,
            endpoint: generate_endpoint(base_url, &model),
            client,
        })
    }

    fn request(&self, prompt: &str) -> Result<String> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-goog-api-key",
            HeaderValue::from_str(self.api_key.trim()).context("invalid Gemini API key")?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let body = GenerateRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart { text: prompt }],
            }],
        };
        let resp = self
            .client
            .post(&self.endpoint)
            .headers(headers)
            .json(&body)
            .send()
            .context("failed to call Gemini generateContent API")?;
        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp
                .text()
                .unwrap_or_else(|_| "<body unavailable>".to_string());
            bail!("Gemini returned {}: {}", status, text);
        }
        let parsed: GenerateResponse = resp.json().context("failed to parse Gemini response")?;
        extract_text(parsed)
    }
}

impl Generator for GeminiGenerator {
    fn generate(&self, prompt: &str) -> ragshelf_core::Result<String> {
        self.request(prompt)
            .map_err(|e| Error::Generation(format!("{:#}", e)))
    }
}

fn generate_endpoint(base_url: &str, model: &str) -> String {
    format!(
        "{}/models/{}:generateContent",
        base_url.trim_end_matches('/'),
        model
    )
}

/// Text parts of the first candidate, joined
fn extract_text(response: GenerateResponse) -> Result<String> {
    let Some(candidate) = response.candidates.into_iter().next() else {
        bail!("Gemini response has no candidates");
    };
    let text = candidate
        .content
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();
    if text.is_empty() {
        bail!("Gemini response missing text content");
    }
    Ok(text)
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
}

#[derive(Serialize)]
struct GeminiContent<'a> {
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_endpoint() {
        assert_eq!(
            generate_endpoint("https://example.test/v1beta/", "gemini-1.0-pro"),
            "https://example.test/v1beta/models/gemini-1.0-pro:generateContent"
        );
    }

    #[test]
    fn test_request_body() {
        let body = GenerateRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart { text: "hi" }],
            }],
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"contents": [{"parts": [{"text": "hi"}]}]})
        );
    }

    #[test]
    fn test_extract_text_joins_parts() {
        let response: GenerateResponse = serde_json::from_value(json!({
            "candidates": [
                {"content": {"parts": [{"text": "Try "}, {"text": "Gentle Cream."}], "role": "model"}},
                {"content": {"parts": [{"text": "ignored"}]}}
            ]
        }))
        .unwrap();
        assert_eq!(extract_text(response).unwrap(), "Try Gentle Cream.");
    }

    #[test]
    fn test_extract_text_errors() {
        let empty: GenerateResponse = serde_json::from_value(json!({})).unwrap();
        assert!(extract_text(empty).is_err());

        let blocked: GenerateResponse =
            serde_json::from_value(json!({"candidates": [{"finishReason": "SAFETY"}]})).unwrap();
        assert!(extract_text(blocked).is_err());
    }

    #[test]
    fn test_missing_key_rejected() {
        assert!(GeminiGenerator::new(String::new(), DEFAULT_GEMINI_MODEL.to_string()).is_err());
    }
}
