// SPDX-FileCopyrightText: 2026 Odyssey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./odyssey.toml` > `~/.config/odyssey/odyssey.toml`
//! > `/etc/odyssey/odyssey.toml` with environment variable overrides via the
//! `ODYSSEY_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::OdysseyConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/odyssey/odyssey.toml` (system-wide)
/// 3. `~/.config/odyssey/odyssey.toml` (user XDG config)
/// 4. `./odyssey.toml` (local directory)
/// 5. `ODYSSEY_*` environment variables
pub fn load_config() -> Result<OdysseyConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(OdysseyConfig::default()))
        .merge(Toml::file("/etc/odyssey/odyssey.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("odyssey/odyssey.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("odyssey.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<OdysseyConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(OdysseyConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<OdysseyConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(OdysseyConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `ODYSSEY_GEMINI_API_KEY` must map to
/// `gemini.api_key`, not `gemini.api.key`.
fn env_provider() -> Env {
    Env::prefixed("ODYSSEY_").map(|key| {
        // `key` is the env var name with prefix stripped, in its original
        // (typically upper) case; lowercase it before mapping.
        // Example: ODYSSEY_GEMINI_API_KEY -> "gemini_api_key"
        let key_str = key.as_str().to_ascii_lowercase();
        let mapped = key_str
            .replacen("game_", "game.", 1)
            .replacen("gemini_", "gemini.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("lookup_", "lookup.", 1);
        mapped.into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config.game.ship_name, "Odyssey");
        assert_eq!(config.gemini.text_model, "gemini-2.5-flash");
    }

    #[test]
    fn toml_overrides_defaults() {
        let toml = r#"
[game]
ship_name = "Discovery One"
video_poll_interval_secs = 5

[storage]
enabled = false
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.game.ship_name, "Discovery One");
        assert_eq!(config.game.video_poll_interval_secs, 5);
        assert!(!config.storage.enabled);
        // untouched sections keep defaults
        assert_eq!(config.lookup.retries, 3);
    }

    #[test]
    fn unknown_key_is_rejected() {
        let toml = r#"
[game]
shipname = "typo"
"#;
        assert!(load_config_from_str(toml).is_err());
    }

    #[test]
    fn env_vars_override_config() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("ODYSSEY_GEMINI_API_KEY", "test-key-123");
            jail.set_env("ODYSSEY_GAME_SHIP_NAME", "Leonov");

            let config: OdysseyConfig = Figment::new()
                .merge(Serialized::defaults(OdysseyConfig::default()))
                .merge(super::env_provider())
                .extract()?;

            assert_eq!(config.gemini.api_key.as_deref(), Some("test-key-123"));
            assert_eq!(config.game.ship_name, "Leonov");
            Ok(())
        });
    }
}
