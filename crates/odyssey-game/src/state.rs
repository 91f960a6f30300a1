// SPDX-FileCopyrightText: 2026 Odyssey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Application state owned by the orchestrator.
//!
//! All mutation funnels through [`crate::Game`]; the presentation layer
//! reads this struct and never writes it. Status and view transitions are
//! explicit tagged variants so illegal combinations are unrepresentable.

use odyssey_core::types::{
    CaptainLogEntry, ConversationEntry, Hotspot, ImageData, InterpretedData, PlayerAsset, Role,
    Ship, User,
};

/// What the bridge is currently doing. Anything other than `Idle` blocks
/// new input; `MissionComplete` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppStatus {
    #[default]
    Idle,
    /// A text workflow (classification or reply) is in flight.
    Thinking,
    GeneratingImage,
    GeneratingVideo,
    /// An external data lookup and interpretation is in flight.
    Interpreting,
    MissionComplete,
}

impl AppStatus {
    pub fn is_busy(self) -> bool {
        self != AppStatus::Idle
    }
}

/// Which top-level surface the session is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    Loading,
    /// No persistence backend configured; offer the offline bootstrap.
    SetupRequired,
    Auth,
    ProfileSetup,
    ShipSelection,
    Game,
}

/// Pure view-state resolution from what the session has established so far.
///
/// `Loading` never comes out of this function; it is only the initial state
/// before resolution runs.
pub fn resolve_view_state(
    configured: bool,
    identity: Option<&str>,
    profile: Option<&User>,
    ship: Option<&Ship>,
) -> ViewState {
    if !configured {
        return ViewState::SetupRequired;
    }
    if identity.is_none() {
        return ViewState::Auth;
    }
    if profile.is_none() {
        return ViewState::ProfileSetup;
    }
    if ship.is_none() {
        return ViewState::ShipSelection;
    }
    ViewState::Game
}

/// The full mutable game state for one session.
#[derive(Debug, Default)]
pub struct GameState {
    pub status: AppStatus,

    /// Current telescope scene image, if one has been generated.
    pub telescope_image: Option<ImageData>,
    /// Prompt the current telescope image was generated or edited from.
    pub telescope_prompt: String,
    pub telescope_hotspots: Vec<Hotspot>,

    pub astrobot_image: Option<ImageData>,
    pub astrobot_prompt: Option<String>,

    /// Latest structured data interpretation, shown on the telescope HUD.
    pub interpreted_data: Option<InterpretedData>,

    /// The finished mission video, present only in `MissionComplete`.
    pub video: Option<Vec<u8>>,

    /// Last workflow error, for the error banner. Cleared on the next
    /// successful initialization.
    pub last_error: Option<String>,

    /// The shared conversation, strictly append-only and ordered.
    pub history: Vec<ConversationEntry>,
    /// Captain's log, chronological.
    pub log: Vec<CaptainLogEntry>,
    /// Generated artifacts, chronological.
    pub assets: Vec<PlayerAsset>,
}

impl GameState {
    /// The most recent model turn, which the console renders as HAL's
    /// current line.
    pub fn last_model_message(&self) -> Option<&str> {
        self.history
            .iter()
            .rev()
            .find(|entry| entry.role == Role::Model)
            .map(|entry| entry.content.as_str())
    }
}
