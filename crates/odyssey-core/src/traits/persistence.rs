// SPDX-FileCopyrightText: 2026 Odyssey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persistence backend trait: profiles, ships, conversation history, and
//! the append-only log/asset subcollections.

use async_trait::async_trait;

use crate::error::OdysseyError;
use crate::types::{CaptainLogEntry, ConversationEntry, MissionStep, PlayerAsset, Ship, User};

/// Adapter for the persistence backend.
///
/// The core must operate correctly against any implementation: a SQLite
/// store (online mode), an in-memory store (offline mode), or a null store
/// whose writers fail with [`OdysseyError::NotConfigured`].
///
/// Log entries and assets are append-only; readers return the full
/// collection, newest data included, and callers replace their local copy
/// wholesale.
#[async_trait]
pub trait PersistenceBackend: Send + Sync {
    /// Whether this backend actually persists anything. Drives the
    /// offline-bootstrap decision in the orchestrator.
    fn is_configured(&self) -> bool;

    // --- Profiles ---

    async fn get_user(&self, uid: &str) -> Result<Option<User>, OdysseyError>;
    async fn create_user(&self, user: &User) -> Result<(), OdysseyError>;
    async fn update_user(&self, user: &User) -> Result<(), OdysseyError>;

    // --- Ships ---

    async fn get_ship(&self, id: &str) -> Result<Option<Ship>, OdysseyError>;
    async fn create_ship(&self, ship: &Ship) -> Result<(), OdysseyError>;
    /// Adds a user to a ship's crew and points their profile at the ship.
    async fn join_ship(&self, ship_id: &str, uid: &str) -> Result<(), OdysseyError>;

    /// Mirrors the full conversation history document for a ship.
    async fn save_conversation(
        &self,
        ship_id: &str,
        history: &[ConversationEntry],
    ) -> Result<(), OdysseyError>;

    // --- Append-only subcollections ---

    async fn append_log_entry(
        &self,
        ship_id: &str,
        entry: &CaptainLogEntry,
    ) -> Result<(), OdysseyError>;
    async fn list_log_entries(&self, ship_id: &str)
    -> Result<Vec<CaptainLogEntry>, OdysseyError>;

    async fn append_asset(&self, ship_id: &str, asset: &PlayerAsset)
    -> Result<(), OdysseyError>;
    async fn list_assets(&self, ship_id: &str) -> Result<Vec<PlayerAsset>, OdysseyError>;

    // --- Mission definitions (administrative surface) ---

    /// Admin-edited mission definitions. An empty list means "use the
    /// built-in catalog".
    async fn list_missions(&self) -> Result<Vec<MissionStep>, OdysseyError>;
    async fn upsert_mission(&self, mission: &MissionStep) -> Result<(), OdysseyError>;
}
