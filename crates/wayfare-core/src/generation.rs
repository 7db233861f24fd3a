//! Itinerary generation service client.
//!
//! [`Generator`] is the seam between the recommender and whatever produces
//! city plans. [`GeminiClient`] talks to the Gemini REST API with a structured
//! output schema; tests and offline tooling provide their own implementations.

use std::{env, time::Duration};

use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{Result, WayfareError};

/// Model used when `WAYFARE_MODEL` is not set.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash-latest";

/// Request timeout used when `WAYFARE_GENERATION_TIMEOUT_SECS` is not set.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
const API_KEY_VARS: [&str; 2] = ["GOOGLE_API_KEY", "GEMINI_API_KEY"];
const MODEL_VAR: &str = "WAYFARE_MODEL";
const TIMEOUT_VAR: &str = "WAYFARE_GENERATION_TIMEOUT_SECS";

/// One city proposed by the generation service.
///
/// `schedule` stays untyped; the canonicalizer decides what shape it has.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CityPlan {
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub schedule: Value,
}

/// Decoded reply of the generation service.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GenerationReply {
    #[serde(default)]
    pub data: Vec<CityPlan>,
}

/// Produces city plans for a prompt.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Sends the prompt and decodes the reply.
    ///
    /// # Errors
    ///
    /// Returns `WayfareError::GenerationUnavailable` when the service cannot
    /// be reached or answers without content, and
    /// `WayfareError::MalformedGeneration` when the content is not valid JSON.
    async fn generate(&self, prompt: &str) -> Result<GenerationReply>;
}

/// Removes an optional surrounding markdown code fence.
pub fn strip_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(body) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // The info string may sit on its own line or run straight into the body.
    let body = body.strip_prefix("json").unwrap_or(body);
    let body = match body.split_once('\n') {
        Some((info, rest)) if is_info_string(info) => rest,
        _ => body,
    };
    body.trim_end()
        .strip_suffix("```")
        .unwrap_or(body)
        .trim()
}

fn is_info_string(line: &str) -> bool {
    let line = line.trim();
    !line.is_empty() && !line.starts_with(['{', '['])
}

/// Decodes raw reply text into a [`GenerationReply`].
pub fn parse_reply(text: &str) -> Result<GenerationReply> {
    serde_json::from_str(strip_fences(text))
        .map_err(|source| WayfareError::MalformedGeneration { source })
}

/// Connection settings for [`GeminiClient`].
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    pub api_key: String,
    pub model: String,
    pub timeout: Duration,
    pub endpoint: String,
}

impl GenerationConfig {
    /// Creates a configuration with default model, timeout and endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    /// Reads the configuration from the process environment.
    ///
    /// The API key comes from `GOOGLE_API_KEY` or `GEMINI_API_KEY`. The model
    /// and timeout can be overridden with `WAYFARE_MODEL` and
    /// `WAYFARE_GENERATION_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = API_KEY_VARS
            .iter()
            .filter_map(|name| lookup(*name))
            .find(|key| !key.trim().is_empty())
            .ok_or_else(|| WayfareError::Configuration {
                message: format!("Set {} to enable generation", API_KEY_VARS.join(" or ")),
            })?;

        let mut config = Self::new(api_key.trim());
        if let Some(model) = lookup(MODEL_VAR).filter(|m| !m.trim().is_empty()) {
            config.model = model.trim().to_string();
        }
        if let Some(secs) = lookup(TIMEOUT_VAR) {
            let secs = secs.trim().parse::<u64>().map_err(|e| WayfareError::Configuration {
                message: format!("Invalid {TIMEOUT_VAR} '{secs}': {e}"),
            })?;
            config.timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateContentResponse {
    fn into_text(self) -> Result<String> {
        self.candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts.into_iter().next())
            .and_then(|part| part.text)
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| WayfareError::unavailable("response contained no candidate text"))
    }
}

fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "data": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "city": { "type": "STRING" },
                        "country": { "type": "STRING" },
                        "reason": { "type": "STRING" },
                        "schedule": {
                            "type": "ARRAY",
                            "items": {
                                "type": "OBJECT",
                                "properties": {
                                    "day": { "type": "STRING" },
                                    "activities": {
                                        "type": "ARRAY",
                                        "items": {
                                            "type": "OBJECT",
                                            "properties": {
                                                "time": { "type": "STRING" },
                                                "activity": { "type": "STRING" }
                                            },
                                            "required": ["time", "activity"]
                                        }
                                    }
                                },
                                "required": ["day", "activities"]
                            }
                        }
                    },
                    "required": ["city", "country", "reason", "schedule"]
                }
            }
        },
        "required": ["data"]
    })
}

/// [`Generator`] backed by the Gemini `generateContent` endpoint.
pub struct GeminiClient {
    client: Client,
    config: GenerationConfig,
}

impl GeminiClient {
    pub fn new(config: GenerationConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| WayfareError::Configuration {
                message: format!("Failed to build HTTP client: {e}"),
            })?;
        Ok(Self { client, config })
    }

    /// Shorthand for `GeminiClient::new(GenerationConfig::from_env()?)`.
    pub fn from_env() -> Result<Self> {
        Self::new(GenerationConfig::from_env()?)
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model
        )
    }
}

#[async_trait]
impl Generator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<GenerationReply> {
        info!("Requesting itinerary from {}", self.config.model);
        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&json!({
                "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
                "generationConfig": {
                    "responseMimeType": "application/json",
                    "responseSchema": response_schema(),
                }
            }))
            .send()
            .await
            .map_err(WayfareError::unavailable)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!("Generation error body: {body}");
            return Err(WayfareError::unavailable(format!("HTTP {status}")));
        }

        let envelope: GenerateContentResponse =
            response.json().await.map_err(WayfareError::unavailable)?;
        let text = envelope.into_text()?;
        debug!("Raw generation reply: {} bytes", text.len());
        parse_reply(&text)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    const REPLY: &str = r#"{"data":[{"city":"Kyoto","country":"Japan","reason":"Temples.",
        "schedule":[{"day":"day_1","activities":[{"time":"09:00-10:00","activity":"Walk"}]}]}]}"#;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_strip_fences() {
        assert_eq!(strip_fences("```json\n{\"data\":[]}\n```"), r#"{"data":[]}"#);
        assert_eq!(strip_fences("```\n{}\n```  "), "{}");
        assert_eq!(strip_fences("  {\"data\":[]} "), r#"{"data":[]}"#);
        assert_eq!(strip_fences("```json\n{}"), "{}");
        assert_eq!(strip_fences("```JSON\n{}\n```"), "{}");
        assert_eq!(strip_fences("```json{\"data\":[]}```"), r#"{"data":[]}"#);
        assert_eq!(strip_fences("```json {\n}\n```"), "{\n}");
    }

    #[test]
    fn test_parse_reply_accepts_fenced_json() {
        let reply = parse_reply(&format!("```json\n{REPLY}\n```")).unwrap();
        assert_eq!(reply.data.len(), 1);
        assert_eq!(reply.data[0].city, "Kyoto");
        assert!(reply.data[0].schedule.is_array());

        let inline = parse_reply(&format!("```json{REPLY}```")).unwrap();
        assert_eq!(inline, reply);
    }

    #[test]
    fn test_parse_reply_tolerates_missing_fields() {
        let reply = parse_reply(r#"{"data":[{"city":"Oslo"}]}"#).unwrap();
        assert_eq!(reply.data[0].country, "");
        assert!(reply.data[0].schedule.is_null());
        assert!(parse_reply("{}").unwrap().data.is_empty());
    }

    #[test]
    fn test_parse_reply_malformed() {
        let err = parse_reply("{'data': []}").unwrap_err();
        assert!(matches!(err, WayfareError::MalformedGeneration { .. }));
        assert!(matches!(
            parse_reply("Sure! Here is your trip.").unwrap_err(),
            WayfareError::MalformedGeneration { .. }
        ));
    }

    #[test]
    fn test_candidate_text_extraction() {
        let envelope: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{ "content": { "parts": [{ "text": REPLY }] } }]
        }))
        .unwrap();
        assert_eq!(envelope.into_text().unwrap(), REPLY);

        let empty: GenerateContentResponse =
            serde_json::from_value(json!({ "candidates": [] })).unwrap();
        assert!(matches!(
            empty.into_text().unwrap_err(),
            WayfareError::GenerationUnavailable { .. }
        ));
    }

    #[test]
    fn test_config_from_lookup() {
        let config = GenerationConfig::from_lookup(lookup(&[
            ("GEMINI_API_KEY", " secret "),
            ("WAYFARE_MODEL", "gemini-2.0-flash"),
            ("WAYFARE_GENERATION_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(config.api_key, "secret");
        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.timeout, Duration::from_secs(5));

        let defaults = GenerationConfig::from_lookup(lookup(&[("GOOGLE_API_KEY", "k")])).unwrap();
        assert_eq!(defaults.model, DEFAULT_MODEL);
        assert_eq!(defaults.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_config_errors() {
        assert!(matches!(
            GenerationConfig::from_lookup(lookup(&[])).unwrap_err(),
            WayfareError::Configuration { .. }
        ));
        assert!(GenerationConfig::from_lookup(lookup(&[
            ("GOOGLE_API_KEY", "k"),
            ("WAYFARE_GENERATION_TIMEOUT_SECS", "soon"),
        ]))
        .is_err());
    }

    #[test]
    fn test_request_url() {
        let mut config = GenerationConfig::new("k");
        config.endpoint = "http://localhost:9/v1beta/".to_string();
        let client = GeminiClient::new(config).unwrap();
        assert_eq!(
            client.url(),
            format!("http://localhost:9/v1beta/models/{DEFAULT_MODEL}:generateContent")
        );
    }
}
