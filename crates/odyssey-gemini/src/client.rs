// SPDX-FileCopyrightText: 2026 Odyssey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Gemini REST API.
//!
//! Provides [`GeminiClient`] which handles request construction,
//! authentication, and transient error retry across the three API surfaces
//! Odyssey uses: `generateContent`, Imagen `predict`, and Veo
//! `predictLongRunning`.

use std::time::Duration;

use odyssey_config::GeminiConfig;
use odyssey_core::OdysseyError;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::types::{
    ApiErrorResponse, GenerateContentRequest, GenerateContentResponse, Operation,
    PredictInstance, PredictParameters, PredictRequest, PredictResponse, VideoParameters,
    VideoRequest,
};

/// HTTP client for Gemini API communication.
///
/// Manages authentication headers, connection pooling, and retry logic for
/// transient errors (429, 500, 503).
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    text_model: String,
    image_model: String,
    media_model: String,
    video_model: String,
    max_retries: u32,
}

impl GeminiClient {
    /// Creates a new Gemini API client from the `[gemini]` config section.
    ///
    /// Returns [`OdysseyError::NotConfigured`] when no API key is set, so
    /// the caller can refuse to start instead of failing mid-workflow.
    pub fn new(config: &GeminiConfig) -> Result<Self, OdysseyError> {
        let api_key = config
            .api_key
            .as_deref()
            .ok_or(OdysseyError::NotConfigured)?;

        let mut headers = HeaderMap::new();
        headers.insert(
            "x-goog-api-key",
            HeaderValue::from_str(api_key)
                .map_err(|e| OdysseyError::Config(format!("invalid API key header value: {e}")))?,
        );
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(|e| OdysseyError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: config.api_base.trim_end_matches('/').to_string(),
            text_model: config.text_model.clone(),
            image_model: config.image_model.clone(),
            media_model: config.media_model.clone(),
            video_model: config.video_model.clone(),
            max_retries: config.max_retries,
        })
    }

    /// Text/structured-JSON generation on the default text model.
    pub async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, OdysseyError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.text_model
        );
        self.post_json(&url, request).await
    }

    /// Multimodal generation (image output) on the media model.
    pub async fn generate_media(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, OdysseyError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.media_model
        );
        self.post_json(&url, request).await
    }

    /// Single high-quality image synthesis via Imagen.
    pub async fn predict_image(&self, prompt: &str) -> Result<PredictResponse, OdysseyError> {
        let url = format!(
            "{}/v1beta/models/{}:predict",
            self.base_url, self.image_model
        );
        let request = PredictRequest {
            instances: vec![PredictInstance {
                prompt: prompt.to_string(),
            }],
            parameters: PredictParameters { sample_count: 1 },
        };
        self.post_json(&url, &request).await
    }

    /// Starts a long-running video synthesis job via Veo.
    pub async fn start_video_operation(&self, prompt: &str) -> Result<Operation, OdysseyError> {
        let url = format!(
            "{}/v1beta/models/{}:predictLongRunning",
            self.base_url, self.video_model
        );
        let request = VideoRequest {
            instances: vec![PredictInstance {
                prompt: prompt.to_string(),
            }],
            parameters: VideoParameters {
                aspect_ratio: "16:9".to_string(),
                resolution: "720p".to_string(),
            },
        };
        self.post_json(&url, &request).await
    }

    /// Fetches the current state of a long-running operation.
    pub async fn get_operation(&self, operation_name: &str) -> Result<Operation, OdysseyError> {
        let url = format!(
            "{}/v1beta/{}",
            self.base_url,
            operation_name.trim_start_matches('/')
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| OdysseyError::Provider {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, operation = %operation_name, "operation poll response");
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(OdysseyError::Provider {
                message: api_error_message(status, &body),
                source: None,
            });
        }

        serde_json::from_str(&body).map_err(|e| OdysseyError::Provider {
            message: format!("failed to parse operation response: {e}"),
            source: Some(Box::new(e)),
        })
    }

    /// Downloads raw bytes from a video URI reported by a finished operation.
    pub async fn download(&self, uri: &str) -> Result<Vec<u8>, OdysseyError> {
        let response = self
            .client
            .get(uri)
            .send()
            .await
            .map_err(|e| OdysseyError::Provider {
                message: format!("video download failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(OdysseyError::Provider {
                message: format!("video download returned {status}"),
                source: None,
            });
        }

        let bytes = response.bytes().await.map_err(|e| OdysseyError::Provider {
            message: format!("failed to read video body: {e}"),
            source: Some(Box::new(e)),
        })?;
        Ok(bytes.to_vec())
    }

    /// Overrides the base URL (for testing with wiremock).
    #[cfg(test)]
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// POSTs a JSON body and parses a JSON response.
    ///
    /// On transient errors (429, 500, 503), retries after a 1-second delay
    /// up to `max_retries` additional attempts.
    async fn post_json<B: Serialize, R: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<R, OdysseyError> {
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                warn!(attempt, url, "retrying request after transient error");
                tokio::time::sleep(Duration::from_secs(1)).await;
            }

            let response = self
                .client
                .post(url)
                .json(body)
                .send()
                .await
                .map_err(|e| OdysseyError::Provider {
                    message: format!("HTTP request failed: {e}"),
                    source: Some(Box::new(e)),
                })?;

            let status = response.status();
            debug!(status = %status, attempt, url, "response received");

            if status.is_success() {
                let text = response.text().await.map_err(|e| OdysseyError::Provider {
                    message: format!("failed to read response body: {e}"),
                    source: Some(Box::new(e)),
                })?;
                return serde_json::from_str(&text).map_err(|e| OdysseyError::Provider {
                    message: format!("failed to parse API response: {e}"),
                    source: Some(Box::new(e)),
                });
            }

            if is_transient_error(status) && attempt < self.max_retries {
                let text = response.text().await.unwrap_or_default();
                warn!(status = %status, body = %text, "transient error, will retry");
                last_error = Some(OdysseyError::Provider {
                    message: api_error_message(status, &text),
                    source: None,
                });
                continue;
            }

            // Non-transient error or exhausted retries.
            let text = response.text().await.unwrap_or_default();
            return Err(OdysseyError::Provider {
                message: api_error_message(status, &text),
                source: None,
            });
        }

        Err(last_error.unwrap_or_else(|| OdysseyError::Provider {
            message: "request failed after retries".into(),
            source: None,
        }))
    }
}

/// Formats an error message from a non-2xx response, preferring the
/// structured API error body when one is present.
fn api_error_message(status: reqwest::StatusCode, body: &str) -> String {
    if let Ok(api_err) = serde_json::from_str::<ApiErrorResponse>(body) {
        format!(
            "Gemini API error ({}): {}",
            api_err.error.status, api_err.error.message
        )
    } else {
        format!("API returned {status}: {body}")
    }
}

/// Returns true for HTTP status codes that indicate transient errors worth retrying.
fn is_transient_error(status: reqwest::StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 503)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Content;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str) -> GeminiClient {
        let config = GeminiConfig {
            api_key: Some("test-api-key".into()),
            ..GeminiConfig::default()
        };
        GeminiClient::new(&config)
            .unwrap()
            .with_base_url(base_url.to_string())
    }

    fn text_request(prompt: &str) -> GenerateContentRequest {
        GenerateContentRequest {
            system_instruction: None,
            contents: vec![Content::with_role("user", prompt)],
            generation_config: None,
        }
    }

    fn text_response(text: &str) -> serde_json::Value {
        serde_json::json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": text}]}
            }]
        })
    }

    #[test]
    fn missing_api_key_is_not_configured() {
        let config = GeminiConfig::default();
        assert!(matches!(
            GeminiClient::new(&config),
            Err(OdysseyError::NotConfigured)
        ));
    }

    #[tokio::test]
    async fn generate_content_success() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
            .and(header("x-goog-api-key", "test-api-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(text_response("// HAL: merhaba")))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let response = client.generate_content(&text_request("merhaba")).await.unwrap();
        assert_eq!(response.first_text().as_deref(), Some("// HAL: merhaba"));
    }

    #[tokio::test]
    async fn generate_content_retries_on_429() {
        let server = MockServer::start().await;

        let error_body = serde_json::json!({
            "error": {"code": 429, "message": "quota", "status": "RESOURCE_EXHAUSTED"}
        });

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
            .respond_with(ResponseTemplate::new(429).set_body_json(&error_body))
            .up_to_n_times(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(text_response("after retry")))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let response = client.generate_content(&text_request("hi")).await.unwrap();
        assert_eq!(response.first_text().as_deref(), Some("after retry"));
    }

    #[tokio::test]
    async fn generate_content_fails_on_400() {
        let server = MockServer::start().await;

        let error_body = serde_json::json!({
            "error": {"code": 400, "message": "bad model", "status": "INVALID_ARGUMENT"}
        });

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
            .respond_with(ResponseTemplate::new(400).set_body_json(&error_body))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client
            .generate_content(&text_request("hi"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("INVALID_ARGUMENT"), "got: {err}");
    }

    #[tokio::test]
    async fn predict_image_parses_prediction() {
        let server = MockServer::start().await;

        let body = serde_json::json!({
            "predictions": [{"bytesBase64Encoded": "aW1hZ2U=", "mimeType": "image/jpeg"}]
        });

        Mock::given(method("POST"))
            .and(path("/v1beta/models/imagen-4.0-generate-001:predict"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let response = client.predict_image("a crystal comet").await.unwrap();
        assert_eq!(response.predictions[0].bytes_base64_encoded, "aW1hZ2U=");
    }

    #[tokio::test]
    async fn video_operation_round_trip() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(
                "/v1beta/models/veo-3.1-fast-generate-preview:predictLongRunning",
            ))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"name": "operations/vid-1"})),
            )
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/v1beta/operations/vid-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "name": "operations/vid-1",
                "done": true,
                "response": {
                    "generateVideoResponse": {
                        "generatedSamples": [{"video": {"uri": "https://dl/v.mp4"}}]
                    }
                }
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let op = client.start_video_operation("a cinematic log").await.unwrap();
        assert_eq!(op.name, "operations/vid-1");
        assert!(!op.done);

        let polled = client.get_operation(&op.name).await.unwrap();
        assert!(polled.done);
        assert_eq!(polled.video_uri(), Some("https://dl/v.mp4"));
    }

    #[tokio::test]
    async fn download_returns_bytes() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/video.mp4"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"mp4data".to_vec()))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let bytes = client
            .download(&format!("{}/video.mp4", server.uri()))
            .await
            .unwrap();
        assert_eq!(bytes, b"mp4data");
    }
}
