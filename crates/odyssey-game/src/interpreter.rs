// SPDX-FileCopyrightText: 2026 Odyssey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Free-text command interpretation.
//!
//! A thin, stateless layer over the backend's structured classification
//! call. The interpreter never errors: classification failures fail closed
//! to [`CommandAction::Unknown`], and criticality is recomputed locally
//! rather than trusted from the wire.

use std::sync::Arc;

use odyssey_core::types::{CommandAction, InterpretedCommand};
use odyssey_core::GenerativeBackend;

/// Diagnostic placeholder carried by the fail-closed fallback command.
pub const UNKNOWN_DIAGNOSTIC: &str = "Komut anlaşılamadı.";

/// Classifies user utterances into typed commands.
pub struct CommandInterpreter {
    backend: Arc<dyn GenerativeBackend>,
}

impl CommandInterpreter {
    pub fn new(backend: Arc<dyn GenerativeBackend>) -> Self {
        CommandInterpreter { backend }
    }

    /// Classifies one utterance. Infallible by contract: any backend error
    /// or malformed output degrades to `Unknown`, which the executor treats
    /// as general conversation.
    ///
    /// `is_critical` is derived from the action here; only
    /// `COMPLETE_MISSION` is ever confirmation-gated, regardless of what
    /// the backend claimed.
    pub async fn interpret(&self, text: &str, actor: &str) -> InterpretedCommand {
        match self.backend.classify_command(text, actor).await {
            Ok(mut command) => {
                command.is_critical = command.action == CommandAction::CompleteMission;
                command
            }
            Err(error) => {
                tracing::warn!(%error, "command classification failed, treating as unknown");
                InterpretedCommand::unknown(UNKNOWN_DIAGNOSTIC)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use odyssey_core::types::CommandParams;
    use odyssey_test_utils::MockBackend;

    #[tokio::test]
    async fn criticality_is_recomputed_locally() {
        let backend = Arc::new(MockBackend::new());
        // A backend that wrongly flags a non-critical action as critical.
        backend
            .queue_classification(InterpretedCommand {
                action: CommandAction::EditImage,
                is_critical: true,
                params: CommandParams {
                    prompt: Some("bulutsu ekle".into()),
                    target: None,
                },
            })
            .await;
        // And one that forgets to flag mission completion.
        backend
            .queue_classification(InterpretedCommand {
                action: CommandAction::CompleteMission,
                is_critical: false,
                params: CommandParams::default(),
            })
            .await;

        let interpreter = CommandInterpreter::new(backend);

        let edit = interpreter.interpret("görüntüye bulutsu ekle", "Kaptan").await;
        assert_eq!(edit.action, CommandAction::EditImage);
        assert!(!edit.is_critical);

        let complete = interpreter.interpret("görevi tamamla", "Kaptan").await;
        assert_eq!(complete.action, CommandAction::CompleteMission);
        assert!(complete.is_critical);
    }

    #[tokio::test]
    async fn classification_failure_fails_closed() {
        let backend = Arc::new(MockBackend::new());
        backend.fail_on("classify_command").await;

        let interpreter = CommandInterpreter::new(backend);
        let command = interpreter.interpret("gibberish", "Kaptan").await;

        assert_eq!(command.action, CommandAction::Unknown);
        assert!(!command.is_critical);
        assert_eq!(command.params.prompt.as_deref(), Some(UNKNOWN_DIAGNOSTIC));
    }
}
