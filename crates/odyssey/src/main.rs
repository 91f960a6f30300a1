// SPDX-FileCopyrightText: 2026 Odyssey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Odyssey - a narrative space-exploration bridge console.
//!
//! This is the binary entry point for the Odyssey game.

mod bridge;

use clap::{Parser, Subcommand};

/// Odyssey - a narrative space-exploration bridge console.
#[derive(Parser, Debug)]
#[command(name = "odyssey", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Take the bridge: start an interactive game session.
    Bridge,
    /// Manage Odyssey configuration.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// List the available missions.
    Missions,
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the effective configuration as TOML.
    Show,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match odyssey_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            odyssey_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.game.log_level);

    let result = match cli.command {
        Some(Commands::Bridge) => bridge::run_bridge(config).await,
        Some(Commands::Config {
            action: ConfigAction::Show,
        }) => show_config(config),
        Some(Commands::Missions) => list_missions(config).await,
        None => {
            println!("odyssey: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

/// Prints the effective configuration, with the API key redacted.
fn show_config(mut config: odyssey_config::OdysseyConfig) -> Result<(), odyssey_core::OdysseyError> {
    if config.gemini.api_key.is_some() {
        config.gemini.api_key = Some("<redacted>".to_string());
    }
    let rendered = toml::to_string_pretty(&config)
        .map_err(|e| odyssey_core::OdysseyError::Internal(e.to_string()))?;
    print!("{rendered}");
    Ok(())
}

/// Lists the mission catalog: persisted missions when any exist, otherwise
/// the built-in scenarios.
async fn list_missions(
    config: odyssey_config::OdysseyConfig,
) -> Result<(), odyssey_core::OdysseyError> {
    let missions = if config.storage.enabled {
        let store = odyssey_storage::SqliteStore::open(&config.storage.database_path).await?;
        let missions = odyssey_game::load_missions(&store).await;
        store.close().await?;
        missions
    } else {
        odyssey_game::builtin_missions()
    };

    for mission in &missions {
        let marker = if mission.id == config.game.default_mission {
            "*"
        } else {
            " "
        };
        println!("{marker} {}", mission.id);
        println!("    {}", mission.objective);
    }
    Ok(())
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("odyssey={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    #[test]
    #[serial]
    fn binary_loads_config_defaults() {
        // Verify config loads with defaults (no config file needed).
        let config =
            odyssey_config::load_and_validate().expect("default config should be valid");
        assert_eq!(config.game.ship_name, "Odyssey");
        assert_eq!(config.game.default_mission, "mission-1");
    }
}
