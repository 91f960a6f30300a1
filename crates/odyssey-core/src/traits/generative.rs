// SPDX-FileCopyrightText: 2026 Odyssey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Generative backend trait: the consumed capability set of the external
//! generative AI service (text, structured JSON, image, video).

use async_trait::async_trait;

use crate::error::OdysseyError;
use crate::types::{
    AstrobotMissionResult, ConversationEntry, Hotspot, ImageData, InterpretedCommand,
    InterpretedData, VideoJob, VideoStatus,
};

/// Adapter for the generative AI service.
///
/// Implementations own prompt wording and model selection; callers depend
/// only on the input/output contracts below. Per-call failure semantics
/// that differ from plain `Result` propagation are noted on each method.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    /// Classifies a free-text utterance into a typed command via a
    /// structured-output call. Malformed output is an error here; the
    /// interpreter fails closed to `Unknown` on the caller side.
    async fn classify_command(
        &self,
        text: &str,
        actor: &str,
    ) -> Result<InterpretedCommand, OdysseyError>;

    /// Free-form in-character conversational reply given the mission
    /// objective and the full conversation history.
    async fn generate_reply(
        &self,
        objective: &str,
        actor: &str,
        history: &[ConversationEntry],
    ) -> Result<String, OdysseyError>;

    /// In-character error narration. Must not itself fail: implementations
    /// fall back to a hardcoded message.
    async fn generate_error_narration(&self, error_text: &str, actor: &str) -> String;

    /// In-character greeting opening a mission.
    async fn generate_greeting(&self, actor: &str, objective: &str)
    -> Result<String, OdysseyError>;

    /// Opening scene image for a mission.
    async fn generate_scene_image(&self, prompt: &str) -> Result<ImageData, OdysseyError>;

    /// Interactive points of interest derived from a scene image.
    /// Defaults to an empty list on failure; never aborts the caller.
    async fn generate_hotspots(
        &self,
        image: &ImageData,
        original_prompt: &str,
        actor: &str,
    ) -> Vec<Hotspot>;

    /// Edits an existing image per a creative instruction.
    async fn edit_image(
        &self,
        image: &ImageData,
        instruction: &str,
    ) -> Result<ImageData, OdysseyError>;

    /// Two-step astrobot mission generation: a detailed mission description,
    /// then an image rendered from that description.
    async fn generate_astrobot_mission(
        &self,
        instruction: &str,
        actor: &str,
    ) -> Result<AstrobotMissionResult, OdysseyError>;

    /// Cinematic video-summary prompt derived from the conversation history
    /// and mission objective.
    async fn generate_video_prompt(
        &self,
        history: &[ConversationEntry],
        objective: &str,
        actor: &str,
    ) -> Result<String, OdysseyError>;

    /// Starts a long-running video synthesis job.
    async fn start_video(&self, prompt: &str) -> Result<VideoJob, OdysseyError>;

    /// Polls a video job. The caller owns the poll interval and timeout.
    async fn poll_video(&self, job: &VideoJob) -> Result<VideoStatus, OdysseyError>;

    /// Downloads the finished video from the URI reported by the job.
    async fn fetch_video(&self, uri: &str) -> Result<Vec<u8>, OdysseyError>;

    /// Structured interpretation of raw astronomical data.
    async fn interpret_data(
        &self,
        raw_data: &str,
        actor: &str,
    ) -> Result<InterpretedData, OdysseyError>;
}
