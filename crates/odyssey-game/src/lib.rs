// SPDX-FileCopyrightText: 2026 Odyssey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The Odyssey game core: command interpretation, confirmation gating,
//! workflow execution, and session/mission orchestration.
//!
//! Free-text captain input flows through one pipeline:
//!
//! ```text
//! input -> ConfirmationGate (if pending) -> CommandInterpreter
//!       -> Game::execute -> generative/lookup calls -> state + narration
//! ```
//!
//! [`Game`] owns all mutable session state; collaborators (generative
//! backend, persistence, data lookup) are trait objects supplied at
//! assembly time, so the whole loop runs identically against live
//! services, SQLite, or in-memory test doubles.

pub mod executor;
pub mod gate;
pub mod interpreter;
pub mod missions;
pub mod orchestrator;
pub mod state;

pub use gate::{ConfirmationGate, GateDecision, AFFIRMATIVE_TOKENS};
pub use interpreter::CommandInterpreter;
pub use missions::{builtin_missions, load_missions, resolve_mission};
pub use orchestrator::{Game, OFFLINE_SHIP_ID};
pub use state::{resolve_view_state, AppStatus, GameState, ViewState};
