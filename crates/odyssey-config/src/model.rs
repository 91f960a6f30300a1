// SPDX-FileCopyrightText: 2026 Odyssey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Odyssey game framework.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Odyssey configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional and default to sensible
/// values; the defaults alone yield a working offline-mode game.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OdysseyConfig {
    /// Game session and identity settings.
    #[serde(default)]
    pub game: GameConfig,

    /// Gemini generative API settings.
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Persistence backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// External small-body data lookup settings.
    #[serde(default)]
    pub lookup: LookupConfig,
}

/// Game session and identity configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GameConfig {
    /// Name of the shared ship created on bootstrap.
    #[serde(default = "default_ship_name")]
    pub ship_name: String,

    /// Identity used when no auth provider is in play.
    #[serde(default = "default_captain_uid")]
    pub captain_uid: String,

    /// Display name for the bootstrap captain profile.
    #[serde(default = "default_captain_name")]
    pub captain_name: String,

    /// Mission id to start a new ship on.
    #[serde(default = "default_mission_id")]
    pub default_mission: String,

    /// Seconds between polls of a running video job.
    #[serde(default = "default_video_poll_interval")]
    pub video_poll_interval_secs: u64,

    /// Upper bound on total video job wait time.
    #[serde(default = "default_video_timeout")]
    pub video_timeout_secs: u64,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            ship_name: default_ship_name(),
            captain_uid: default_captain_uid(),
            captain_name: default_captain_name(),
            default_mission: default_mission_id(),
            video_poll_interval_secs: default_video_poll_interval(),
            video_timeout_secs: default_video_timeout(),
            log_level: default_log_level(),
        }
    }
}

fn default_ship_name() -> String {
    "Odyssey".to_string()
}

fn default_captain_uid() -> String {
    "local_user".to_string()
}

fn default_captain_name() -> String {
    "Kaptan".to_string()
}

fn default_mission_id() -> String {
    "mission-1".to_string()
}

fn default_video_poll_interval() -> u64 {
    10
}

fn default_video_timeout() -> u64 {
    600
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Gemini generative API configuration.
///
/// The API key is required to take the bridge; offline mode only relaxes
/// the persistence backend, never the generative one.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GeminiConfig {
    /// API key. Usually provided via `ODYSSEY_GEMINI_API_KEY`.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL of the generative API (overridable for testing).
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Model for text and structured-JSON calls.
    #[serde(default = "default_text_model")]
    pub text_model: String,

    /// Model for scene image synthesis.
    #[serde(default = "default_image_model")]
    pub image_model: String,

    /// Multimodal model for image generation/editing.
    #[serde(default = "default_media_model")]
    pub media_model: String,

    /// Model for video synthesis jobs.
    #[serde(default = "default_video_model")]
    pub video_model: String,

    /// Retries on transient HTTP errors (429/500/503).
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: default_api_base(),
            text_model: default_text_model(),
            image_model: default_image_model(),
            media_model: default_media_model(),
            video_model: default_video_model(),
            max_retries: default_max_retries(),
        }
    }
}

fn default_api_base() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_text_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_image_model() -> String {
    "imagen-4.0-generate-001".to_string()
}

fn default_media_model() -> String {
    "gemini-2.5-flash-image".to_string()
}

fn default_video_model() -> String {
    "veo-3.1-fast-generate-preview".to_string()
}

fn default_max_retries() -> u32 {
    1
}

/// Persistence backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Whether to persist at all. `false` selects the in-memory store.
    #[serde(default = "default_storage_enabled")]
    pub enabled: bool,

    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            enabled: default_storage_enabled(),
            database_path: default_database_path(),
        }
    }
}

fn default_storage_enabled() -> bool {
    true
}

fn default_database_path() -> String {
    "odyssey.db".to_string()
}

/// External small-body data lookup configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LookupConfig {
    /// JPL Small-Body Database API endpoint.
    #[serde(default = "default_sbdb_url")]
    pub sbdb_url: String,

    /// Total attempts per lookup before degrading to "no data".
    #[serde(default = "default_lookup_retries")]
    pub retries: u32,

    /// Initial backoff between attempts; doubles per retry.
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            sbdb_url: default_sbdb_url(),
            retries: default_lookup_retries(),
            initial_backoff_ms: default_initial_backoff_ms(),
        }
    }
}

fn default_sbdb_url() -> String {
    "https://ssd-api.jpl.nasa.gov/sbdb.api".to_string()
}

fn default_lookup_retries() -> u32 {
    3
}

fn default_initial_backoff_ms() -> u64 {
    1000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_yield_offline_capable_config() {
        let config = OdysseyConfig::default();
        assert_eq!(config.game.ship_name, "Odyssey");
        assert_eq!(config.game.default_mission, "mission-1");
        assert!(config.gemini.api_key.is_none());
        assert!(config.storage.enabled);
        assert_eq!(config.lookup.retries, 3);
    }

    #[test]
    fn video_polling_defaults_match_backend_cadence() {
        let game = GameConfig::default();
        assert_eq!(game.video_poll_interval_secs, 10);
        assert_eq!(game.video_timeout_secs, 600);
    }
}
