// SPDX-FileCopyrightText: 2026 Odyssey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Null persistence backend: reads are empty, writes fail.
//!
//! Used when no storage is wired at all; the core must surface
//! [`OdysseyError::NotConfigured`] instead of silently dropping writes.

use async_trait::async_trait;

use odyssey_core::types::{
    CaptainLogEntry, ConversationEntry, MissionStep, PlayerAsset, Ship, User,
};
use odyssey_core::{OdysseyError, PersistenceBackend};

/// Backend that persists nothing and rejects all writes.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullStore;

#[async_trait]
impl PersistenceBackend for NullStore {
    fn is_configured(&self) -> bool {
        false
    }

    async fn get_user(&self, _uid: &str) -> Result<Option<User>, OdysseyError> {
        Ok(None)
    }

    async fn create_user(&self, _user: &User) -> Result<(), OdysseyError> {
        Err(OdysseyError::NotConfigured)
    }

    async fn update_user(&self, _user: &User) -> Result<(), OdysseyError> {
        Err(OdysseyError::NotConfigured)
    }

    async fn get_ship(&self, _id: &str) -> Result<Option<Ship>, OdysseyError> {
        Ok(None)
    }

    async fn create_ship(&self, _ship: &Ship) -> Result<(), OdysseyError> {
        Err(OdysseyError::NotConfigured)
    }

    async fn join_ship(&self, _ship_id: &str, _uid: &str) -> Result<(), OdysseyError> {
        Err(OdysseyError::NotConfigured)
    }

    async fn save_conversation(
        &self,
        _ship_id: &str,
        _history: &[ConversationEntry],
    ) -> Result<(), OdysseyError> {
        Err(OdysseyError::NotConfigured)
    }

    async fn append_log_entry(
        &self,
        _ship_id: &str,
        _entry: &CaptainLogEntry,
    ) -> Result<(), OdysseyError> {
        Err(OdysseyError::NotConfigured)
    }

    async fn list_log_entries(
        &self,
        _ship_id: &str,
    ) -> Result<Vec<CaptainLogEntry>, OdysseyError> {
        Ok(Vec::new())
    }

    async fn append_asset(
        &self,
        _ship_id: &str,
        _asset: &PlayerAsset,
    ) -> Result<(), OdysseyError> {
        Err(OdysseyError::NotConfigured)
    }

    async fn list_assets(&self, _ship_id: &str) -> Result<Vec<PlayerAsset>, OdysseyError> {
        Ok(Vec::new())
    }

    async fn list_missions(&self) -> Result<Vec<MissionStep>, OdysseyError> {
        Ok(Vec::new())
    }

    async fn upsert_mission(&self, _mission: &MissionStep) -> Result<(), OdysseyError> {
        Err(OdysseyError::NotConfigured)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reads_are_empty_and_writes_fail() {
        let store = NullStore;
        assert!(!store.is_configured());
        assert!(store.get_user("u").await.unwrap().is_none());
        assert!(store.list_log_entries("s").await.unwrap().is_empty());
        assert!(matches!(
            store.save_conversation("s", &[]).await,
            Err(OdysseyError::NotConfigured)
        ));
    }
}
