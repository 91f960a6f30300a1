// SPDX-FileCopyrightText: 2026 Odyssey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as non-empty paths and coherent timing values.

use crate::diagnostic::ConfigError;
use crate::model::OdysseyConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &OdysseyConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.game.ship_name.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "game.ship_name must not be empty".to_string(),
        });
    }

    if config.game.captain_uid.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "game.captain_uid must not be empty".to_string(),
        });
    }

    if config.game.video_poll_interval_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "game.video_poll_interval_secs must be at least 1".to_string(),
        });
    }

    if config.game.video_timeout_secs < config.game.video_poll_interval_secs {
        errors.push(ConfigError::Validation {
            message: format!(
                "game.video_timeout_secs ({}) must be at least video_poll_interval_secs ({})",
                config.game.video_timeout_secs, config.game.video_poll_interval_secs
            ),
        });
    }

    if config.storage.enabled && config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty when storage is enabled"
                .to_string(),
        });
    }

    if config.lookup.retries == 0 {
        errors.push(ConfigError::Validation {
            message: "lookup.retries must be at least 1".to_string(),
        });
    }

    if config.lookup.sbdb_url.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "lookup.sbdb_url must not be empty".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = OdysseyConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn zero_poll_interval_fails_validation() {
        let mut config = OdysseyConfig::default();
        config.game.video_poll_interval_secs = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("video_poll_interval_secs"))
        ));
    }

    #[test]
    fn timeout_shorter_than_interval_fails_validation() {
        let mut config = OdysseyConfig::default();
        config.game.video_poll_interval_secs = 30;
        config.game.video_timeout_secs = 10;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("video_timeout_secs"))
        ));
    }

    #[test]
    fn empty_database_path_fails_only_when_storage_enabled() {
        let mut config = OdysseyConfig::default();
        config.storage.database_path = String::new();
        assert!(validate_config(&config).is_err());

        config.storage.enabled = false;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn multiple_errors_are_collected() {
        let mut config = OdysseyConfig::default();
        config.game.ship_name = String::new();
        config.lookup.retries = 0;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}
