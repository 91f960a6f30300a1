// SPDX-FileCopyrightText: 2026 Odyssey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire types for the Gemini REST API.
//!
//! Covers the three surfaces Odyssey uses: `generateContent` (text,
//! structured JSON, multimodal image editing), Imagen `predict` (scene
//! images), and Veo `predictLongRunning` plus operation polling (videos).

use serde::{Deserialize, Serialize};

/// Request body for `models/{model}:generateContent`.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest {
    #[serde(rename = "systemInstruction", skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    pub contents: Vec<Content>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

/// One conversational content block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    /// A role-less content block holding a single text part, used for
    /// system instructions and one-shot prompts.
    pub fn text(text: impl Into<String>) -> Self {
        Content {
            role: None,
            parts: vec![Part::text(text)],
        }
    }

    /// A content block with an explicit conversational role.
    pub fn with_role(role: impl Into<String>, text: impl Into<String>) -> Self {
        Content {
            role: Some(role.into()),
            parts: vec![Part::text(text)],
        }
    }
}

/// A single part of a content block: text or inline binary data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(rename = "inlineData", skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Part {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn inline_data(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Part {
            inline_data: Some(InlineData {
                mime_type: mime_type.into(),
                data: data.into(),
            }),
            ..Default::default()
        }
    }
}

/// Base64-encoded binary payload inside a content part.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InlineData {
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    pub data: String,
}

/// Generation controls. `response_schema` is kept as a raw JSON value since
/// each call site declares its own schema inline.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GenerationConfig {
    #[serde(rename = "responseMimeType", skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    #[serde(rename = "responseSchema", skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<serde_json::Value>,
    #[serde(rename = "responseModalities", skip_serializing_if = "Option::is_none")]
    pub response_modalities: Option<Vec<String>>,
}

/// Response body of `generateContent`.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    pub content: Option<Content>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate's text parts.
    pub fn first_text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.is_empty() { None } else { Some(text) }
    }

    /// First inline-data part of the first candidate, if any.
    pub fn first_inline_data(&self) -> Option<&InlineData> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .iter()
            .find_map(|p| p.inline_data.as_ref())
    }
}

/// Request body for Imagen `models/{model}:predict`.
#[derive(Debug, Clone, Serialize)]
pub struct PredictRequest {
    pub instances: Vec<PredictInstance>,
    pub parameters: PredictParameters,
}

#[derive(Debug, Clone, Serialize)]
pub struct PredictInstance {
    pub prompt: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PredictParameters {
    #[serde(rename = "sampleCount")]
    pub sample_count: u32,
}

/// Response body of Imagen `predict`.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictResponse {
    #[serde(default)]
    pub predictions: Vec<Prediction>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Prediction {
    #[serde(rename = "bytesBase64Encoded")]
    pub bytes_base64_encoded: String,
    #[serde(rename = "mimeType", default = "default_image_mime")]
    pub mime_type: String,
}

fn default_image_mime() -> String {
    "image/jpeg".to_string()
}

/// Request body for Veo `models/{model}:predictLongRunning`.
#[derive(Debug, Clone, Serialize)]
pub struct VideoRequest {
    pub instances: Vec<PredictInstance>,
    pub parameters: VideoParameters,
}

#[derive(Debug, Clone, Serialize)]
pub struct VideoParameters {
    #[serde(rename = "aspectRatio")]
    pub aspect_ratio: String,
    pub resolution: String,
}

/// A long-running operation, as returned by `predictLongRunning` and by
/// polling `GET /{operation_name}`.
#[derive(Debug, Clone, Deserialize)]
pub struct Operation {
    pub name: String,
    #[serde(default)]
    pub done: bool,
    pub response: Option<OperationResponse>,
    pub error: Option<OperationError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OperationResponse {
    #[serde(rename = "generateVideoResponse")]
    pub generate_video_response: Option<GenerateVideoResponse>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateVideoResponse {
    #[serde(rename = "generatedSamples", default)]
    pub generated_samples: Vec<GeneratedSample>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedSample {
    pub video: VideoRef,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VideoRef {
    pub uri: String,
}

impl Operation {
    /// Download URI of the first generated video, when the operation is done.
    pub fn video_uri(&self) -> Option<&str> {
        self.response
            .as_ref()?
            .generate_video_response
            .as_ref()?
            .generated_samples
            .first()
            .map(|s| s.video.uri.as_str())
    }
}

/// Error body shape for non-2xx Gemini responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiError,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub code: i64,
    pub message: String,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OperationError {
    pub message: String,
}
