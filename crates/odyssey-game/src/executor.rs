// SPDX-FileCopyrightText: 2026 Odyssey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command execution workflows.
//!
//! Each interpreted command dispatches to one side-effecting workflow.
//! The busy status is set on entry and unconditionally returned to `Idle`
//! on every exit path, except the terminal `MissionComplete`. Any workflow
//! failure is caught once here, recorded as the last error, and narrated
//! back through the conversation; it never propagates to the caller.

use std::time::{Duration, Instant};

use odyssey_core::types::{
    AssetKind, CommandAction, InterpretedCommand, InterpretedData, PlayerAsset, Role, VideoStatus,
};
use odyssey_core::OdysseyError;

use crate::orchestrator::Game;
use crate::state::AppStatus;

const REJECT_EDIT: &str =
    "// HAL: Düzenlenecek bir teleskop görüntüsü veya geçerli bir talimat yok, Kaptan.";
const REJECT_ASTROBOT: &str =
    "// HAL: Astrobot için bir görev talimatı belirtmelisiniz, Kaptan.";
const REJECT_INTERPRET: &str =
    "// HAL: Yorumlanacak bir hedef belirtmelisiniz, Kaptan.";

impl Game {
    /// Runs one interpreted command to completion.
    pub async fn execute(&mut self, command: InterpretedCommand) {
        let result = self.run_command(&command).await;

        if let Err(error) = result {
            let message = error.to_string();
            tracing::error!(action = %command.action, error = %message, "command failed");
            self.state.last_error = Some(message.clone());
            let narration = self
                .backend
                .generate_error_narration(&message, &self.user.name)
                .await;
            self.add_message(Role::Model, narration).await;
        }

        // Mission completion is terminal; everything else releases the
        // console.
        if self.state.status != AppStatus::MissionComplete {
            self.state.status = AppStatus::Idle;
        }
    }

    async fn run_command(&mut self, command: &InterpretedCommand) -> Result<(), OdysseyError> {
        match command.action {
            CommandAction::CompleteMission => self.complete_mission().await,
            CommandAction::EditImage => self.edit_image(command).await,
            CommandAction::AstrobotMission => self.astrobot_mission(command).await,
            CommandAction::InterpretData => self.interpret_data(command).await,
            CommandAction::GeneralConversation | CommandAction::Unknown => {
                self.general_conversation().await
            }
        }
    }

    /// Narrates intent, derives a cinematic prompt from the whole mission
    /// conversation, then drives the long-running video job to completion
    /// under the configured poll interval and timeout.
    async fn complete_mission(&mut self) -> Result<(), OdysseyError> {
        self.state.status = AppStatus::GeneratingVideo;
        self.add_message(
            Role::Model,
            "// HAL: Anlaşıldı, Kaptan. Görev günlüğünü derliyor ve video kaydını oluşturuyorum.",
        )
        .await;

        let prompt = self
            .backend
            .generate_video_prompt(&self.state.history, &self.mission.objective, &self.user.name)
            .await?;
        let job = self.backend.start_video(&prompt).await?;

        let interval = Duration::from_secs(self.config.video_poll_interval_secs);
        let timeout = Duration::from_secs(self.config.video_timeout_secs);
        let deadline = Instant::now() + timeout;

        let uri = loop {
            match self.backend.poll_video(&job).await? {
                VideoStatus::Done { uri } => break uri,
                VideoStatus::Pending => {
                    if Instant::now() >= deadline {
                        return Err(OdysseyError::Timeout { duration: timeout });
                    }
                    tokio::time::sleep(interval).await;
                }
            }
        };

        let video = self.backend.fetch_video(&uri).await?;
        self.state.video = Some(video);
        self.state.status = AppStatus::MissionComplete;
        Ok(())
    }

    /// Edits the current telescope image per the captain's instruction and
    /// saves the result to the shared gallery.
    async fn edit_image(&mut self, command: &InterpretedCommand) -> Result<(), OdysseyError> {
        let prompt = command.params.prompt.clone().filter(|p| !p.is_empty());
        let (Some(prompt), Some(image)) = (prompt, self.state.telescope_image.clone()) else {
            self.add_message(Role::Model, REJECT_EDIT).await;
            return Ok(());
        };

        self.state.status = AppStatus::GeneratingImage;
        let edited = self.backend.edit_image(&image, &prompt).await?;
        self.state.telescope_image = Some(edited.clone());

        let asset = PlayerAsset::now(AssetKind::Telescope, &prompt, edited, &self.user.name);
        self.save_asset(asset).await;

        self.add_message(
            Role::Model,
            format!(
                "// HAL: Görüntü geliştirildi ve gemi galerisine kaydedildi, {}.",
                self.user.name
            ),
        )
        .await;
        self.append_log(
            "Sistem",
            format!(
                "Teleskop görüntüsü, Kaptan {} tarafından verilen \"{}\" komutuyla düzenlendi.",
                self.user.name, prompt
            ),
        )
        .await;
        Ok(())
    }

    /// Assigns the astrobot a new mission: a generated description plus the
    /// image rendered from it.
    async fn astrobot_mission(&mut self, command: &InterpretedCommand) -> Result<(), OdysseyError> {
        let Some(prompt) = command.params.prompt.clone().filter(|p| !p.is_empty()) else {
            self.add_message(Role::Model, REJECT_ASTROBOT).await;
            return Ok(());
        };

        self.state.status = AppStatus::GeneratingImage;
        let result = self
            .backend
            .generate_astrobot_mission(&prompt, &self.user.name)
            .await?;

        self.state.astrobot_image = Some(result.image.clone());
        self.state.astrobot_prompt = Some(result.description.clone());

        let asset = PlayerAsset::now(
            AssetKind::Astrobot,
            &result.description,
            result.image,
            &self.user.name,
        );
        self.save_asset(asset).await;

        self.add_message(
            Role::Model,
            "// HAL: Astrobot için yeni görev atandı ve galeriye kaydedildi. Detaylar HUD'da.",
        )
        .await;
        self.append_log(
            "Sistem",
            format!("Astrobot'a yeni görev atandı: {}", result.description),
        )
        .await;
        Ok(())
    }

    /// Looks up a celestial object and interprets the raw data. A missing
    /// object produces a locally synthesized "no data" result without
    /// consulting the backend.
    async fn interpret_data(&mut self, command: &InterpretedCommand) -> Result<(), OdysseyError> {
        let Some(target) = command.params.target.clone().filter(|t| !t.is_empty()) else {
            self.add_message(Role::Model, REJECT_INTERPRET).await;
            return Ok(());
        };

        self.state.status = AppStatus::Interpreting;
        self.state.interpreted_data = None;
        self.append_log(
            "Sistem",
            format!("NASA veritabanından '{target}' için veri isteniyor."),
        )
        .await;

        let interpretation = match self.lookup.lookup(&target).await? {
            Some(raw) => self.backend.interpret_data(&raw, &self.user.name).await?,
            None => InterpretedData {
                summary: format!("// VERİ ALINAMADI: '{target}' hedefi bulunamadı."),
                object_name: target.clone(),
                distance: "N/A".to_string(),
                velocity: "N/A".to_string(),
            },
        };

        let object_name = interpretation.object_name.clone();
        self.state.interpreted_data = Some(interpretation);
        self.add_message(
            Role::Model,
            format!(
                "// HAL: Kaptan, {object_name} hakkındaki verileri yorumladım. Detaylar teleskop \
                 HUD'unda mevcut."
            ),
        )
        .await;
        Ok(())
    }

    /// The fallback workflow: a free-form in-character reply.
    async fn general_conversation(&mut self) -> Result<(), OdysseyError> {
        self.state.status = AppStatus::Thinking;
        let reply = self
            .backend
            .generate_reply(&self.mission.objective, &self.user.name, &self.state.history)
            .await?;
        self.add_message(Role::Model, reply).await;
        Ok(())
    }

    /// Appends an asset locally and mirrors it when storage is configured.
    /// Persistence failures are logged and swallowed, like conversation
    /// mirroring.
    async fn save_asset(&mut self, asset: PlayerAsset) {
        if self.store.is_configured() {
            if let Err(error) = self.store.append_asset(&self.ship.id, &asset).await {
                tracing::warn!(%error, ship = %self.ship.id, "asset persist failed");
            }
        }
        self.state.assets.push(asset);
    }
}
