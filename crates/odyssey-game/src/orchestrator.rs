// SPDX-FileCopyrightText: 2026 Odyssey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session and mission orchestration.
//!
//! [`Game`] owns the full session state and is the sole writer of
//! conversation history: every append from any workflow funnels through
//! [`Game::add_message`], which updates local state, mirrors to persistent
//! storage when configured, and writes a parallel captain's log entry.

use std::sync::Arc;

use odyssey_config::GameConfig;
use odyssey_core::types::{
    Avatar, CaptainLogEntry, ConversationEntry, Gender, Hotspot, ImageData, MissionStep, Role,
    Ship, User,
};
use odyssey_core::{GenerativeBackend, OdysseyError, PersistenceBackend, SmallBodyLookup};

use crate::gate::{ConfirmationGate, GateDecision};
use crate::interpreter::CommandInterpreter;
use crate::state::{AppStatus, GameState};

/// Ship id used by the offline bootstrap.
pub const OFFLINE_SHIP_ID: &str = "local_ship";

const CANCEL_NOTICE: &str = "// HAL: Anlaşıldı. Eylem iptal edildi.";
const PROFILE_UPDATED: &str = "// HAL: Kaptan profili güncellendi.";

/// One running game session: a captain, a ship, an active mission, and the
/// state machine that drives them.
pub struct Game {
    pub(crate) backend: Arc<dyn GenerativeBackend>,
    pub(crate) store: Arc<dyn PersistenceBackend>,
    pub(crate) lookup: Arc<dyn SmallBodyLookup>,
    pub(crate) config: GameConfig,
    interpreter: CommandInterpreter,
    gate: ConfirmationGate,
    pub user: User,
    pub ship: Ship,
    pub mission: MissionStep,
    pub state: GameState,
}

impl Game {
    /// Assembles a session. `ship.conversation_history` seeds the local
    /// history, so a returning crew resumes where it left off.
    pub fn new(
        backend: Arc<dyn GenerativeBackend>,
        store: Arc<dyn PersistenceBackend>,
        lookup: Arc<dyn SmallBodyLookup>,
        config: GameConfig,
        user: User,
        ship: Ship,
        mission: MissionStep,
    ) -> Self {
        let state = GameState {
            history: ship.conversation_history.clone(),
            ..GameState::default()
        };
        Game {
            interpreter: CommandInterpreter::new(backend.clone()),
            gate: ConfirmationGate::default(),
            backend,
            store,
            lookup,
            config,
            user,
            ship,
            mission,
            state,
        }
    }

    /// Synthesizes the local captain profile for offline mode.
    pub fn offline_user(config: &GameConfig) -> User {
        User {
            uid: config.captain_uid.clone(),
            name: config.captain_name.clone(),
            gender: Gender::Male,
            avatar: Avatar {
                kind: "explorer".to_string(),
                color: "#38bdf8".to_string(),
            },
            current_ship_id: Some(OFFLINE_SHIP_ID.to_string()),
        }
    }

    /// Synthesizes the local ship for offline mode.
    pub fn offline_ship(config: &GameConfig) -> Ship {
        Ship::new(
            OFFLINE_SHIP_ID,
            format!("{} (Çevrimdışı)", config.ship_name),
            config.captain_uid.clone(),
            config.default_mission.clone(),
        )
    }

    /// Whether a critical command is awaiting confirmation.
    pub fn awaiting_confirmation(&self) -> bool {
        self.gate.is_pending()
    }

    /// Generates the opening scene and greeting, exactly once per mission:
    /// a non-empty conversation history means the mission is already
    /// initialized and this is a no-op.
    ///
    /// The scene image (plus its points of interest) and the greeting are
    /// requested concurrently; either failure aborts the joint step,
    /// records the error and narrates it to the captain's log, and leaves
    /// the history empty so a retry stays possible.
    pub async fn initialize_mission(&mut self) {
        if !self.state.history.is_empty() {
            return;
        }

        self.state.last_error = None;
        self.state.telescope_prompt = self.mission.image_prompt.clone();
        self.state.telescope_hotspots.clear();

        match self.generate_opening().await {
            Ok((image, hotspots, greeting)) => {
                self.state.telescope_image = Some(image);
                self.state.telescope_hotspots = hotspots;
                self.add_message(Role::Model, greeting).await;
            }
            Err(error) => {
                let message = error.to_string();
                tracing::error!(error = %message, "mission initialization failed");
                self.state.last_error = Some(message.clone());
                let narration = self
                    .backend
                    .generate_error_narration(&message, &self.user.name)
                    .await;
                self.append_log("HAL", narration).await;
            }
        }
    }

    async fn generate_opening(
        &self,
    ) -> Result<(ImageData, Vec<Hotspot>, String), OdysseyError> {
        let backend = self.backend.clone();
        let prompt = self.mission.image_prompt.clone();
        let actor = self.user.name.clone();

        let scene = async {
            let image = backend.generate_scene_image(&prompt).await?;
            let hotspots = backend.generate_hotspots(&image, &prompt, &actor).await;
            Ok::<_, OdysseyError>((image, hotspots))
        };
        let greeting = self
            .backend
            .generate_greeting(&self.user.name, &self.mission.objective);

        let ((image, hotspots), greeting) = tokio::try_join!(scene, greeting)?;
        Ok((image, hotspots, greeting))
    }

    /// Handles one line of captain input: appends it to history, then
    /// either resolves a pending confirmation or interprets and dispatches
    /// a fresh command. Input is refused while a workflow is in flight or
    /// after mission completion.
    pub async fn handle_input(&mut self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        if self.state.status.is_busy() {
            tracing::warn!(status = ?self.state.status, "input refused while busy");
            return;
        }

        self.add_message(Role::User, text).await;

        // A pending confirmation claims the reply before the interpreter
        // can see it.
        if self.gate.is_pending() {
            match self.gate.intercept(text) {
                GateDecision::Execute(command) => self.execute(command).await,
                GateDecision::Cancelled => self.add_message(Role::Model, CANCEL_NOTICE).await,
                GateDecision::NotPending => {}
            }
            return;
        }

        self.state.status = AppStatus::Thinking;
        let command = self.interpreter.interpret(text, &self.user.name).await;

        if command.is_critical {
            let prompt = format!(
                "// HAL: Kaptan, '{}' eylemini onaylıyor musunuz?",
                command.action.to_string().replace('_', " ")
            );
            self.gate.arm(command);
            self.add_message(Role::Model, prompt).await;
            self.state.status = AppStatus::Idle;
        } else {
            self.execute(command).await;
        }
    }

    /// The sole writer of conversation history. Appends locally, mirrors
    /// the full history document when storage is configured, and writes
    /// the parallel log entry. Persistence failures are logged and
    /// swallowed so a storage hiccup cannot derail a narration.
    pub(crate) async fn add_message(&mut self, role: Role, content: impl Into<String>) {
        let content = content.into();
        let author = match role {
            Role::User => self.user.name.clone(),
            Role::Model => "HAL".to_string(),
        };
        self.state.history.push(ConversationEntry {
            role,
            content: content.clone(),
        });

        if self.store.is_configured() {
            if let Err(error) = self
                .store
                .save_conversation(&self.ship.id, &self.state.history)
                .await
            {
                tracing::warn!(%error, ship = %self.ship.id, "conversation mirror failed");
            }
        }

        self.append_log(author, content).await;
    }

    /// Appends a captain's log entry, locally and (when configured)
    /// persistently.
    pub(crate) async fn append_log(
        &mut self,
        author: impl Into<String>,
        content: impl Into<String>,
    ) {
        let entry = CaptainLogEntry::now(author, content);
        if self.store.is_configured() {
            if let Err(error) = self.store.append_log_entry(&self.ship.id, &entry).await {
                tracing::warn!(%error, ship = %self.ship.id, "log entry persist failed");
            }
        }
        self.state.log.push(entry);
    }

    /// Saves a free-form log note authored by the captain.
    pub async fn save_log_note(&mut self, content: &str) {
        let content = content.trim();
        if content.is_empty() {
            return;
        }
        let author = self.user.name.clone();
        self.append_log(author, content).await;
    }

    /// Prompt text behind a telescope point of interest, for click-to-fill
    /// console input.
    pub fn hotspot_prompt(&self, id: u32) -> Option<String> {
        self.state
            .telescope_hotspots
            .iter()
            .find(|h| h.id == id)
            .map(|h| h.prompt.clone())
    }

    /// Applies a profile edit and narrates the outcome in-character.
    pub async fn update_profile(
        &mut self,
        name: Option<String>,
        gender: Option<Gender>,
        avatar: Option<Avatar>,
    ) {
        let mut updated = self.user.clone();
        if let Some(name) = name {
            updated.name = name;
        }
        if let Some(gender) = gender {
            updated.gender = gender;
        }
        if let Some(avatar) = avatar {
            updated.avatar = avatar;
        }

        if self.store.is_configured() {
            if let Err(error) = self.store.update_user(&updated).await {
                let message = error.to_string();
                tracing::error!(error = %message, "profile update failed");
                self.state.last_error = Some(message.clone());
                let narration = self
                    .backend
                    .generate_error_narration(&message, &self.user.name)
                    .await;
                self.add_message(Role::Model, narration).await;
                return;
            }
        }

        self.user = updated;
        self.add_message(Role::Model, PROFILE_UPDATED).await;
    }
}
