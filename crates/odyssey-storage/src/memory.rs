// SPDX-FileCopyrightText: 2026 Odyssey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory persistence backend for offline mode and tests.
//!
//! Holds everything in `RwLock`-guarded maps; nothing survives the process.
//! `is_configured()` reports `false` so the orchestrator runs its offline
//! bootstrap against it.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use odyssey_core::types::{
    CaptainLogEntry, ConversationEntry, MissionStep, PlayerAsset, Ship, User,
};
use odyssey_core::{OdysseyError, PersistenceBackend};

/// Volatile store used when persistence is disabled.
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<String, User>>,
    ships: RwLock<HashMap<String, Ship>>,
    logs: RwLock<HashMap<String, Vec<CaptainLogEntry>>>,
    assets: RwLock<HashMap<String, Vec<PlayerAsset>>>,
    missions: RwLock<HashMap<String, MissionStep>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PersistenceBackend for MemoryStore {
    fn is_configured(&self) -> bool {
        false
    }

    async fn get_user(&self, uid: &str) -> Result<Option<User>, OdysseyError> {
        Ok(self.users.read().await.get(uid).cloned())
    }

    async fn create_user(&self, user: &User) -> Result<(), OdysseyError> {
        self.users
            .write()
            .await
            .insert(user.uid.clone(), user.clone());
        Ok(())
    }

    async fn update_user(&self, user: &User) -> Result<(), OdysseyError> {
        self.users
            .write()
            .await
            .insert(user.uid.clone(), user.clone());
        Ok(())
    }

    async fn get_ship(&self, id: &str) -> Result<Option<Ship>, OdysseyError> {
        Ok(self.ships.read().await.get(id).cloned())
    }

    async fn create_ship(&self, ship: &Ship) -> Result<(), OdysseyError> {
        self.ships
            .write()
            .await
            .insert(ship.id.clone(), ship.clone());
        Ok(())
    }

    async fn join_ship(&self, ship_id: &str, uid: &str) -> Result<(), OdysseyError> {
        if let Some(ship) = self.ships.write().await.get_mut(ship_id) {
            ship.join(uid);
        }
        if let Some(user) = self.users.write().await.get_mut(uid) {
            user.current_ship_id = Some(ship_id.to_string());
        }
        Ok(())
    }

    async fn save_conversation(
        &self,
        ship_id: &str,
        history: &[ConversationEntry],
    ) -> Result<(), OdysseyError> {
        if let Some(ship) = self.ships.write().await.get_mut(ship_id) {
            ship.conversation_history = history.to_vec();
        }
        Ok(())
    }

    async fn append_log_entry(
        &self,
        ship_id: &str,
        entry: &CaptainLogEntry,
    ) -> Result<(), OdysseyError> {
        self.logs
            .write()
            .await
            .entry(ship_id.to_string())
            .or_default()
            .push(entry.clone());
        Ok(())
    }

    async fn list_log_entries(
        &self,
        ship_id: &str,
    ) -> Result<Vec<CaptainLogEntry>, OdysseyError> {
        Ok(self
            .logs
            .read()
            .await
            .get(ship_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn append_asset(
        &self,
        ship_id: &str,
        asset: &PlayerAsset,
    ) -> Result<(), OdysseyError> {
        self.assets
            .write()
            .await
            .entry(ship_id.to_string())
            .or_default()
            .push(asset.clone());
        Ok(())
    }

    async fn list_assets(&self, ship_id: &str) -> Result<Vec<PlayerAsset>, OdysseyError> {
        Ok(self
            .assets
            .read()
            .await
            .get(ship_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn list_missions(&self) -> Result<Vec<MissionStep>, OdysseyError> {
        let mut missions: Vec<MissionStep> =
            self.missions.read().await.values().cloned().collect();
        missions.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(missions)
    }

    async fn upsert_mission(&self, mission: &MissionStep) -> Result<(), OdysseyError> {
        self.missions
            .write()
            .await
            .insert(mission.id.clone(), mission.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_store_reports_unconfigured() {
        let store = MemoryStore::new();
        assert!(!store.is_configured());
    }

    #[tokio::test]
    async fn ship_and_conversation_round_trip() {
        let store = MemoryStore::new();
        let ship = Ship::new("s1", "Odyssey (Çevrimdışı)", "local_user", "mission-1");
        store.create_ship(&ship).await.unwrap();

        let history = vec![ConversationEntry::user("merhaba")];
        store.save_conversation("s1", &history).await.unwrap();

        let ship = store.get_ship("s1").await.unwrap().unwrap();
        assert_eq!(ship.conversation_history, history);
    }

    #[tokio::test]
    async fn logs_are_isolated_per_ship() {
        let store = MemoryStore::new();
        store
            .append_log_entry("a", &CaptainLogEntry::now("HAL", "gemi a"))
            .await
            .unwrap();
        assert_eq!(store.list_log_entries("a").await.unwrap().len(), 1);
        assert!(store.list_log_entries("b").await.unwrap().is_empty());
    }
}
