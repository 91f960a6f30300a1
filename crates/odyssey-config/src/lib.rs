// SPDX-FileCopyrightText: 2026 Odyssey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the Odyssey game framework.
//!
//! Provides TOML configuration parsing with strict validation
//! (`deny_unknown_fields`), XDG file hierarchy lookup, environment variable
//! overrides, and diagnostic error rendering with typo suggestions.
//!
//! # Usage
//!
//! ```no_run
//! use odyssey_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("Ship: {}", config.game.ship_name);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

pub use diagnostic::{render_errors, ConfigError};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{GameConfig, GeminiConfig, LookupConfig, OdysseyConfig, StorageConfig};

/// Load configuration from the XDG hierarchy and validate it.
///
/// This is the high-level entry point that:
/// 1. Loads config from TOML files + env vars via Figment
/// 2. On success: runs post-deserialization validation
/// 3. On Figment error: converts to miette diagnostics with typo suggestions
///
/// Returns either a valid `OdysseyConfig` or a list of diagnostic errors.
pub fn load_and_validate() -> Result<OdysseyConfig, Vec<ConfigError>> {
    match loader::load_config() {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(err)),
    }
}

/// Load configuration from a TOML string and validate it.
///
/// Useful for testing and explicit configuration.
pub fn load_and_validate_str(toml_content: &str) -> Result<OdysseyConfig, Vec<ConfigError>> {
    match loader::load_config_from_str(toml_content) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_and_validate_str_happy_path() {
        let toml = r#"
[gemini]
api_key = "abc123"

[game]
default_mission = "mission-2"
"#;
        let config = load_and_validate_str(toml).unwrap();
        assert_eq!(config.gemini.api_key.as_deref(), Some("abc123"));
        assert_eq!(config.game.default_mission, "mission-2");
    }

    #[test]
    fn load_and_validate_str_reports_typos() {
        let toml = r#"
[game]
ship_naem = "Odyssey"
"#;
        let errors = load_and_validate_str(toml).unwrap_err();
        assert!(errors.iter().any(|e| matches!(
            e,
            ConfigError::UnknownKey { suggestion, .. }
                if suggestion.as_deref() == Some("ship_name")
        )));
    }

    #[test]
    fn load_and_validate_str_reports_semantic_errors() {
        let toml = r#"
[game]
video_poll_interval_secs = 0
"#;
        let errors = load_and_validate_str(toml).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { .. })));
    }
}
