// SPDX-FileCopyrightText: 2026 Odyssey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared across the Odyssey workspace.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// A player profile. Created on first authentication or offline bootstrap;
/// never deleted by the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub uid: String,
    pub name: String,
    pub gender: Gender,
    pub avatar: Avatar,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_ship_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

/// Visual identity, opaque to the core: a variant tag plus a display color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Avatar {
    pub kind: String,
    pub color: String,
}

/// A shared session container: one crew, one active mission, one ordered
/// conversation history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ship {
    pub id: String,
    pub name: String,
    pub captain_id: String,
    pub crew: Vec<String>,
    pub current_mission_id: String,
    #[serde(default)]
    pub conversation_history: Vec<ConversationEntry>,
}

impl Ship {
    /// Creates a ship with the captain as the founding crew member.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        captain_id: impl Into<String>,
        mission_id: impl Into<String>,
    ) -> Self {
        let captain_id = captain_id.into();
        Ship {
            id: id.into(),
            name: name.into(),
            crew: vec![captain_id.clone()],
            captain_id,
            current_mission_id: mission_id.into(),
            conversation_history: Vec::new(),
        }
    }

    /// Adds a crew member. The captain is always a crew member; joining is
    /// idempotent.
    pub fn join(&mut self, uid: impl Into<String>) {
        let uid = uid.into();
        if !self.crew.contains(&uid) {
            self.crew.push(uid);
        }
    }
}

/// A scenario definition driving narrative and generative content.
/// Immutable during a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionStep {
    pub id: String,
    pub story: String,
    pub objective: String,
    pub success_prompt_keywords: Vec<String>,
    pub image_prompt: String,
    pub video_prompt: String,
}

/// One turn of the shared conversation. Strictly ordered, append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationEntry {
    pub role: Role,
    pub content: String,
}

impl ConversationEntry {
    pub fn user(content: impl Into<String>) -> Self {
        ConversationEntry {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn model(content: impl Into<String>) -> Self {
        ConversationEntry {
            role: Role::Model,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// The closed set of actions a free-text command can classify into.
///
/// Only `CompleteMission` is ever critical (confirmation-gated).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommandAction {
    GeneralConversation,
    EditImage,
    AstrobotMission,
    InterpretData,
    CompleteMission,
    Unknown,
}

/// The typed result of classifying one user utterance. Transient: consumed
/// immediately by the confirmation gate or the executor, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterpretedCommand {
    pub action: CommandAction,
    #[serde(rename = "isCritical")]
    pub is_critical: bool,
    #[serde(default)]
    pub params: CommandParams,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

impl InterpretedCommand {
    /// The fail-closed fallback: classification failures degrade to this
    /// instead of propagating.
    pub fn unknown(diagnostic: impl Into<String>) -> Self {
        InterpretedCommand {
            action: CommandAction::Unknown,
            is_critical: false,
            params: CommandParams {
                prompt: Some(diagnostic.into()),
                target: None,
            },
        }
    }
}

/// An append-only audit/narrative record, one per user message, model reply,
/// or system notification. Timestamps are UTC milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptainLogEntry {
    pub id: String,
    pub timestamp: i64,
    pub author: String,
    pub content: String,
}

impl CaptainLogEntry {
    pub fn now(author: impl Into<String>, content: impl Into<String>) -> Self {
        CaptainLogEntry {
            id: format!("log-{}", uuid::Uuid::new_v4()),
            timestamp: chrono::Utc::now().timestamp_millis(),
            author: author.into(),
            content: content.into(),
        }
    }
}

/// A generated artifact saved to the shared gallery. Append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerAsset {
    pub id: String,
    pub timestamp: i64,
    pub kind: AssetKind,
    pub prompt: String,
    pub image: ImageData,
    pub author: String,
}

impl PlayerAsset {
    pub fn now(
        kind: AssetKind,
        prompt: impl Into<String>,
        image: ImageData,
        author: impl Into<String>,
    ) -> Self {
        PlayerAsset {
            id: format!("asset-{}", uuid::Uuid::new_v4()),
            timestamp: chrono::Utc::now().timestamp_millis(),
            kind,
            prompt: prompt.into(),
            image,
            author: author.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Telescope,
    Astrobot,
}

/// Structured interpretation of an external data lookup. Ephemeral
/// presentation state, not persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterpretedData {
    pub summary: String,
    #[serde(rename = "objectName")]
    pub object_name: String,
    pub distance: String,
    pub velocity: String,
}

/// A base64-encoded image plus its MIME type — the transferable encoded form
/// passed to and returned from the generative backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageData {
    pub base64: String,
    pub mime_type: String,
}

impl ImageData {
    pub fn jpeg(base64: impl Into<String>) -> Self {
        ImageData {
            base64: base64.into(),
            mime_type: "image/jpeg".to_string(),
        }
    }
}

/// A backend-derived interactive point of interest overlaid on a scene
/// image. Coordinates are percentages (0-100).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotspot {
    pub id: u32,
    pub x: f64,
    pub y: f64,
    pub label: String,
    pub prompt: String,
}

/// Result of the two-step astrobot mission generation: a detailed mission
/// description plus the image rendered from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AstrobotMissionResult {
    pub image: ImageData,
    pub description: String,
}

/// Handle for a long-running video synthesis job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoJob {
    pub operation_name: String,
}

/// Poll result for a video job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoStatus {
    Pending,
    Done { uri: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn command_action_wire_names_round_trip() {
        let actions = [
            CommandAction::GeneralConversation,
            CommandAction::EditImage,
            CommandAction::AstrobotMission,
            CommandAction::InterpretData,
            CommandAction::CompleteMission,
            CommandAction::Unknown,
        ];
        assert_eq!(actions.len(), 6, "CommandAction must stay a closed set of 6");
        for action in &actions {
            let s = action.to_string();
            assert_eq!(s, s.to_uppercase(), "wire names are SCREAMING_SNAKE");
            assert_eq!(CommandAction::from_str(&s).unwrap(), *action);
            let json = serde_json::to_string(action).unwrap();
            let parsed: CommandAction = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, *action);
        }
    }

    #[test]
    fn interpreted_command_parses_wire_shape() {
        let json = r#"{"action":"EDIT_IMAGE","isCritical":false,"params":{"prompt":"add a nebula"}}"#;
        let cmd: InterpretedCommand = serde_json::from_str(json).unwrap();
        assert_eq!(cmd.action, CommandAction::EditImage);
        assert!(!cmd.is_critical);
        assert_eq!(cmd.params.prompt.as_deref(), Some("add a nebula"));
        assert_eq!(cmd.params.target, None);
    }

    #[test]
    fn unknown_fallback_is_never_critical() {
        let cmd = InterpretedCommand::unknown("Komut anlaşılamadı.");
        assert_eq!(cmd.action, CommandAction::Unknown);
        assert!(!cmd.is_critical);
        assert!(cmd.params.prompt.is_some());
    }

    #[test]
    fn ship_captain_is_always_crew() {
        let mut ship = Ship::new("s1", "Odyssey", "cap-1", "mission-1");
        assert!(ship.crew.contains(&ship.captain_id));

        ship.join("crew-2");
        ship.join("crew-2");
        assert_eq!(ship.crew, vec!["cap-1".to_string(), "crew-2".to_string()]);
    }

    #[test]
    fn conversation_entry_roles_serialize_lowercase() {
        let entry = ConversationEntry::user("merhaba");
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains(r#""role":"user""#));

        let entry = ConversationEntry::model("// HAL: merhaba");
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains(r#""role":"model""#));
    }

    #[test]
    fn log_entries_and_assets_get_unique_ids() {
        let a = CaptainLogEntry::now("HAL", "first");
        let b = CaptainLogEntry::now("HAL", "second");
        assert_ne!(a.id, b.id);

        let asset = PlayerAsset::now(
            AssetKind::Telescope,
            "a crystal comet",
            ImageData::jpeg("aGVsbG8="),
            "Kaptan",
        );
        assert!(asset.id.starts_with("asset-"));
        assert_eq!(asset.kind, AssetKind::Telescope);
    }
}
