// SPDX-FileCopyrightText: 2026 Odyssey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the persistence backend.

use async_trait::async_trait;
use tracing::debug;

use odyssey_core::types::{
    CaptainLogEntry, ConversationEntry, MissionStep, PlayerAsset, Ship, User,
};
use odyssey_core::{OdysseyError, PersistenceBackend};

use crate::database::Database;
use crate::queries;

/// SQLite-backed persistence. All operations delegate to the typed query
/// modules over a single serialized connection.
#[derive(Clone)]
pub struct SqliteStore {
    db: Database,
}

impl SqliteStore {
    /// Opens (or creates) the store at `path`.
    pub async fn open(path: &str) -> Result<Self, OdysseyError> {
        let db = Database::open(path).await?;
        debug!(path, "SQLite store initialized");
        Ok(Self { db })
    }

    /// Checkpoints the WAL. Called on shutdown.
    pub async fn close(&self) -> Result<(), OdysseyError> {
        self.db.close().await
    }
}

#[async_trait]
impl PersistenceBackend for SqliteStore {
    fn is_configured(&self) -> bool {
        true
    }

    async fn get_user(&self, uid: &str) -> Result<Option<User>, OdysseyError> {
        queries::users::get_user(&self.db, uid).await
    }

    async fn create_user(&self, user: &User) -> Result<(), OdysseyError> {
        queries::users::create_user(&self.db, user).await
    }

    async fn update_user(&self, user: &User) -> Result<(), OdysseyError> {
        queries::users::update_user(&self.db, user).await
    }

    async fn get_ship(&self, id: &str) -> Result<Option<Ship>, OdysseyError> {
        queries::ships::get_ship(&self.db, id).await
    }

    async fn create_ship(&self, ship: &Ship) -> Result<(), OdysseyError> {
        queries::ships::create_ship(&self.db, ship).await
    }

    async fn join_ship(&self, ship_id: &str, uid: &str) -> Result<(), OdysseyError> {
        queries::ships::join_ship(&self.db, ship_id, uid).await
    }

    async fn save_conversation(
        &self,
        ship_id: &str,
        history: &[ConversationEntry],
    ) -> Result<(), OdysseyError> {
        queries::ships::save_conversation(&self.db, ship_id, history).await
    }

    async fn append_log_entry(
        &self,
        ship_id: &str,
        entry: &CaptainLogEntry,
    ) -> Result<(), OdysseyError> {
        queries::logs::append_log_entry(&self.db, ship_id, entry).await
    }

    async fn list_log_entries(
        &self,
        ship_id: &str,
    ) -> Result<Vec<CaptainLogEntry>, OdysseyError> {
        queries::logs::list_log_entries(&self.db, ship_id).await
    }

    async fn append_asset(
        &self,
        ship_id: &str,
        asset: &PlayerAsset,
    ) -> Result<(), OdysseyError> {
        queries::assets::append_asset(&self.db, ship_id, asset).await
    }

    async fn list_assets(&self, ship_id: &str) -> Result<Vec<PlayerAsset>, OdysseyError> {
        queries::assets::list_assets(&self.db, ship_id).await
    }

    async fn list_missions(&self) -> Result<Vec<MissionStep>, OdysseyError> {
        queries::missions::list_missions(&self.db).await
    }

    async fn upsert_mission(&self, mission: &MissionStep) -> Result<(), OdysseyError> {
        queries::missions::upsert_mission(&self.db, mission).await
    }
}
