// SPDX-FileCopyrightText: 2026 Odyssey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock generative backend for deterministic testing.
//!
//! Each method pops from its own FIFO queue; an empty queue yields a
//! sensible default. Fallible methods can be forced to fail by name via
//! [`MockBackend::fail_on`].

use std::collections::{HashSet, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use odyssey_core::types::{
    AstrobotMissionResult, ConversationEntry, Hotspot, ImageData, InterpretedCommand,
    InterpretedData, VideoJob, VideoStatus,
};
use odyssey_core::{GenerativeBackend, OdysseyError};

#[derive(Default)]
struct Queues {
    classifications: VecDeque<InterpretedCommand>,
    replies: VecDeque<String>,
    greetings: VecDeque<String>,
    scene_images: VecDeque<ImageData>,
    hotspots: VecDeque<Vec<Hotspot>>,
    edited_images: VecDeque<ImageData>,
    astrobot_results: VecDeque<AstrobotMissionResult>,
    video_prompts: VecDeque<String>,
    poll_statuses: VecDeque<VideoStatus>,
    interpretations: VecDeque<InterpretedData>,
}

/// Per-method invocation counters, readable from assertions.
#[derive(Default)]
pub struct CallCounts {
    pub classify: AtomicUsize,
    pub reply: AtomicUsize,
    pub error_narration: AtomicUsize,
    pub greeting: AtomicUsize,
    pub scene_image: AtomicUsize,
    pub hotspots: AtomicUsize,
    pub edit_image: AtomicUsize,
    pub astrobot: AtomicUsize,
    pub video_prompt: AtomicUsize,
    pub start_video: AtomicUsize,
    pub poll_video: AtomicUsize,
    pub fetch_video: AtomicUsize,
    pub interpret_data: AtomicUsize,
}

/// A mock generative backend with pre-configured responses.
pub struct MockBackend {
    queues: Arc<Mutex<Queues>>,
    failures: Arc<Mutex<HashSet<&'static str>>>,
    /// Invocation counters, one per trait method.
    pub calls: Arc<CallCounts>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            queues: Arc::new(Mutex::new(Queues::default())),
            failures: Arc::new(Mutex::new(HashSet::new())),
            calls: Arc::new(CallCounts::default()),
        }
    }

    /// Make the named method fail until [`Self::succeed_on`] is called.
    /// Method names match the trait: `"classify_command"`, `"edit_image"`, ...
    pub async fn fail_on(&self, method: &'static str) {
        self.failures.lock().await.insert(method);
    }

    /// Clear a failure injected with [`Self::fail_on`].
    pub async fn succeed_on(&self, method: &'static str) {
        self.failures.lock().await.remove(method);
    }

    async fn check_failure(&self, method: &'static str) -> Result<(), OdysseyError> {
        if self.failures.lock().await.contains(method) {
            Err(OdysseyError::provider(format!("injected failure: {method}")))
        } else {
            Ok(())
        }
    }

    pub async fn queue_classification(&self, cmd: InterpretedCommand) {
        self.queues.lock().await.classifications.push_back(cmd);
    }

    pub async fn queue_reply(&self, text: impl Into<String>) {
        self.queues.lock().await.replies.push_back(text.into());
    }

    pub async fn queue_greeting(&self, text: impl Into<String>) {
        self.queues.lock().await.greetings.push_back(text.into());
    }

    pub async fn queue_scene_image(&self, image: ImageData) {
        self.queues.lock().await.scene_images.push_back(image);
    }

    pub async fn queue_hotspots(&self, hotspots: Vec<Hotspot>) {
        self.queues.lock().await.hotspots.push_back(hotspots);
    }

    pub async fn queue_edited_image(&self, image: ImageData) {
        self.queues.lock().await.edited_images.push_back(image);
    }

    pub async fn queue_astrobot_result(&self, result: AstrobotMissionResult) {
        self.queues.lock().await.astrobot_results.push_back(result);
    }

    pub async fn queue_video_prompt(&self, prompt: impl Into<String>) {
        self.queues.lock().await.video_prompts.push_back(prompt.into());
    }

    pub async fn queue_poll_status(&self, status: VideoStatus) {
        self.queues.lock().await.poll_statuses.push_back(status);
    }

    pub async fn queue_interpretation(&self, data: InterpretedData) {
        self.queues.lock().await.interpretations.push_back(data);
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn default_command() -> InterpretedCommand {
    InterpretedCommand {
        action: odyssey_core::types::CommandAction::GeneralConversation,
        is_critical: false,
        params: Default::default(),
    }
}

#[async_trait]
impl GenerativeBackend for MockBackend {
    async fn classify_command(
        &self,
        _text: &str,
        _actor: &str,
    ) -> Result<InterpretedCommand, OdysseyError> {
        self.calls.classify.fetch_add(1, Ordering::SeqCst);
        self.check_failure("classify_command").await?;
        Ok(self
            .queues
            .lock()
            .await
            .classifications
            .pop_front()
            .unwrap_or_else(default_command))
    }

    async fn generate_reply(
        &self,
        _objective: &str,
        _actor: &str,
        _history: &[ConversationEntry],
    ) -> Result<String, OdysseyError> {
        self.calls.reply.fetch_add(1, Ordering::SeqCst);
        self.check_failure("generate_reply").await?;
        Ok(self
            .queues
            .lock()
            .await
            .replies
            .pop_front()
            .unwrap_or_else(|| "// HAL: mock yanıt.".to_string()))
    }

    async fn generate_error_narration(&self, error_text: &str, _actor: &str) -> String {
        self.calls.error_narration.fetch_add(1, Ordering::SeqCst);
        format!("// HAL: hata: {error_text}")
    }

    async fn generate_greeting(
        &self,
        actor: &str,
        _objective: &str,
    ) -> Result<String, OdysseyError> {
        self.calls.greeting.fetch_add(1, Ordering::SeqCst);
        self.check_failure("generate_greeting").await?;
        Ok(self
            .queues
            .lock()
            .await
            .greetings
            .pop_front()
            .unwrap_or_else(|| format!("// HAL: Günaydın, Kaptan {actor}.")))
    }

    async fn generate_scene_image(&self, _prompt: &str) -> Result<ImageData, OdysseyError> {
        self.calls.scene_image.fetch_add(1, Ordering::SeqCst);
        self.check_failure("generate_scene_image").await?;
        Ok(self
            .queues
            .lock()
            .await
            .scene_images
            .pop_front()
            .unwrap_or_else(|| ImageData::jpeg("bW9jay1zY2VuZQ==")))
    }

    async fn generate_hotspots(
        &self,
        _image: &ImageData,
        _original_prompt: &str,
        _actor: &str,
    ) -> Vec<Hotspot> {
        self.calls.hotspots.fetch_add(1, Ordering::SeqCst);
        self.queues
            .lock()
            .await
            .hotspots
            .pop_front()
            .unwrap_or_default()
    }

    async fn edit_image(
        &self,
        _image: &ImageData,
        _instruction: &str,
    ) -> Result<ImageData, OdysseyError> {
        self.calls.edit_image.fetch_add(1, Ordering::SeqCst);
        self.check_failure("edit_image").await?;
        Ok(self
            .queues
            .lock()
            .await
            .edited_images
            .pop_front()
            .unwrap_or_else(|| ImageData::jpeg("bW9jay1lZGl0")))
    }

    async fn generate_astrobot_mission(
        &self,
        instruction: &str,
        _actor: &str,
    ) -> Result<AstrobotMissionResult, OdysseyError> {
        self.calls.astrobot.fetch_add(1, Ordering::SeqCst);
        self.check_failure("generate_astrobot_mission").await?;
        Ok(self
            .queues
            .lock()
            .await
            .astrobot_results
            .pop_front()
            .unwrap_or_else(|| AstrobotMissionResult {
                image: ImageData::jpeg("bW9jay1ib3Q="),
                description: format!("An astrobot performing: {instruction}"),
            }))
    }

    async fn generate_video_prompt(
        &self,
        _history: &[ConversationEntry],
        objective: &str,
        actor: &str,
    ) -> Result<String, OdysseyError> {
        self.calls.video_prompt.fetch_add(1, Ordering::SeqCst);
        self.check_failure("generate_video_prompt").await?;
        Ok(self
            .queues
            .lock()
            .await
            .video_prompts
            .pop_front()
            .unwrap_or_else(|| {
                format!("A cinematic mission log for Captain {actor}: {objective}")
            }))
    }

    async fn start_video(&self, _prompt: &str) -> Result<VideoJob, OdysseyError> {
        self.calls.start_video.fetch_add(1, Ordering::SeqCst);
        self.check_failure("start_video").await?;
        Ok(VideoJob {
            operation_name: "operations/mock-video".to_string(),
        })
    }

    async fn poll_video(&self, _job: &VideoJob) -> Result<VideoStatus, OdysseyError> {
        self.calls.poll_video.fetch_add(1, Ordering::SeqCst);
        self.check_failure("poll_video").await?;
        Ok(self
            .queues
            .lock()
            .await
            .poll_statuses
            .pop_front()
            .unwrap_or(VideoStatus::Done {
                uri: "https://mock/video.mp4".to_string(),
            }))
    }

    async fn fetch_video(&self, _uri: &str) -> Result<Vec<u8>, OdysseyError> {
        self.calls.fetch_video.fetch_add(1, Ordering::SeqCst);
        self.check_failure("fetch_video").await?;
        Ok(b"mock-video-bytes".to_vec())
    }

    async fn interpret_data(
        &self,
        _raw_data: &str,
        _actor: &str,
    ) -> Result<InterpretedData, OdysseyError> {
        self.calls.interpret_data.fetch_add(1, Ordering::SeqCst);
        self.check_failure("interpret_data").await?;
        Ok(self
            .queues
            .lock()
            .await
            .interpretations
            .pop_front()
            .unwrap_or_else(|| InterpretedData {
                summary: "// DATA: mock özet.".to_string(),
                object_name: "Mock Nesnesi".to_string(),
                distance: "1.00 AU".to_string(),
                velocity: "10.0 km/s".to_string(),
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use odyssey_core::types::CommandAction;

    #[tokio::test]
    async fn queued_classifications_pop_in_order() {
        let backend = MockBackend::new();
        backend
            .queue_classification(InterpretedCommand {
                action: CommandAction::CompleteMission,
                is_critical: true,
                params: Default::default(),
            })
            .await;

        let first = backend.classify_command("görevi bitir", "Kaptan").await.unwrap();
        assert_eq!(first.action, CommandAction::CompleteMission);

        // Queue exhausted, falls back to the default.
        let second = backend.classify_command("merhaba", "Kaptan").await.unwrap();
        assert_eq!(second.action, CommandAction::GeneralConversation);
        assert_eq!(backend.calls.classify.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn fail_on_injects_and_clears() {
        let backend = MockBackend::new();
        backend.fail_on("generate_reply").await;
        assert!(backend.generate_reply("o", "K", &[]).await.is_err());

        backend.succeed_on("generate_reply").await;
        assert!(backend.generate_reply("o", "K", &[]).await.is_ok());
    }

    #[tokio::test]
    async fn error_narration_is_infallible() {
        let backend = MockBackend::new();
        backend.fail_on("generate_reply").await;
        let narration = backend.generate_error_narration("disk dolu", "Kaptan").await;
        assert_eq!(narration, "// HAL: hata: disk dolu");
    }
}
