// SPDX-FileCopyrightText: 2026 Odyssey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `odyssey bridge` command implementation.
//!
//! Launches the interactive bridge console: resolves the captain's session
//! (creating the profile and ship on first run, or bootstrapping an
//! offline session when storage is disabled), initializes the mission, and
//! runs a readline REPL over the game loop.

use std::sync::Arc;

use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::{debug, info};

use odyssey_config::OdysseyConfig;
use odyssey_core::types::{Ship, User};
use odyssey_core::{OdysseyError, PersistenceBackend};
use odyssey_game::{resolve_mission, resolve_view_state, AppStatus, Game, ViewState};
use odyssey_gemini::GeminiBackend;
use odyssey_nasa::SbdbLookup;
use odyssey_storage::{MemoryStore, SqliteStore};

/// File the finished mission video is written to.
const VIDEO_FILE: &str = "gorev_kaydi.mp4";

/// Runs the `odyssey bridge` interactive session.
pub async fn run_bridge(config: OdysseyConfig) -> Result<(), OdysseyError> {
    let backend = Arc::new(GeminiBackend::new(&config.gemini).inspect_err(|_| {
        eprintln!(
            "error: Gemini API key required. Set it in odyssey.toml ([gemini] api_key) or via ODYSSEY_GEMINI_API_KEY."
        );
    })?);
    let lookup = Arc::new(SbdbLookup::new(&config.lookup)?);

    // SQLite when storage is enabled; otherwise a session-scoped in-memory
    // store, which puts the orchestrator on its offline bootstrap path.
    let sqlite = if config.storage.enabled {
        Some(SqliteStore::open(&config.storage.database_path).await?)
    } else {
        None
    };
    let store: Arc<dyn PersistenceBackend> = match &sqlite {
        Some(s) => Arc::new(s.clone()),
        None => Arc::new(MemoryStore::new()),
    };

    let (user, ship) = resolve_session(store.as_ref(), &config).await?;
    let missions = odyssey_game::load_missions(store.as_ref()).await;
    let mission = resolve_mission(&missions, &ship.current_mission_id)
        .ok_or_else(|| OdysseyError::Internal("empty mission catalog".to_string()))?;
    info!(mission = %mission.id, ship = %ship.name, "session resolved");

    let mut game = Game::new(
        backend,
        store,
        lookup,
        config.game.clone(),
        user,
        ship,
        mission,
    );

    println!("{}", "ODYSSEY KÖPRÜSÜ".bold().green());
    println!(
        "Gemi: {}  Görev: {}",
        game.ship.name.cyan(),
        game.mission.id.cyan()
    );
    if sqlite.is_none() {
        println!("{}", "Çevrimdışı mod: bu oturum kalıcı değil.".yellow());
    }
    println!(
        "Komutlar: {} çıkış, {} günlük notu, {} HUD, {} ilgi noktası.\n",
        "/quit".yellow(),
        "/log <not>".yellow(),
        "/hud".yellow(),
        "/hotspot <no>".yellow()
    );

    print!("{}", "Görev başlatılıyor...".dimmed());
    println!();
    game.initialize_mission().await;
    render_turn(&game);

    let mut rl = DefaultEditor::new()
        .map_err(|e| OdysseyError::Internal(format!("failed to initialize readline: {e}")))?;
    let history_path = dirs::data_dir().map(|d| d.join("odyssey").join("history"));
    if let Some(path) = &history_path {
        let _ = std::fs::create_dir_all(path.parent().unwrap_or(path));
        let _ = rl.load_history(path);
    }
    let prompt = format!("{}> ", game.user.name.green());

    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed == "/quit" || trimmed == "/exit" {
                    break;
                }
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(&line);

                if let Some(note) = trimmed.strip_prefix("/log ") {
                    game.save_log_note(note).await;
                    println!("{}", "Günlüğe kaydedildi.".dimmed());
                    continue;
                }
                if trimmed == "/hud" {
                    render_hud(&game);
                    continue;
                }
                if let Some(id) = trimmed.strip_prefix("/hotspot ") {
                    // Click-to-command: a point of interest expands to its
                    // prepared prompt.
                    match id.trim().parse().ok().and_then(|id| game.hotspot_prompt(id)) {
                        Some(prompt) => {
                            println!("{} {prompt}", ">".dimmed());
                            game.handle_input(&prompt).await;
                            render_turn(&game);
                        }
                        None => println!("{}", "Bilinmeyen ilgi noktası.".yellow()),
                    }
                    continue;
                }

                game.handle_input(trimmed).await;
                render_turn(&game);

                if game.state.status == AppStatus::MissionComplete {
                    finish_mission(&game);
                    break;
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                break;
            }
        }
    }

    if let Some(path) = &history_path {
        let _ = rl.save_history(path);
    }
    if let Some(sqlite) = sqlite {
        sqlite.close().await?;
    }
    println!("{}", "Köprüden ayrıldınız.".dimmed());
    Ok(())
}

/// Resolves the captain and ship, walking the view-state machine to GAME.
///
/// The auth, profile-setup, and ship-selection surfaces collapse to
/// non-interactive steps in CLI mode: the configured captain identity
/// stands in for authentication, and missing profile or ship records are
/// created from the configuration.
async fn resolve_session(
    store: &dyn PersistenceBackend,
    config: &OdysseyConfig,
) -> Result<(User, Ship), OdysseyError> {
    let mut identity: Option<String> = None;
    let mut profile: Option<User> = None;
    let mut ship: Option<Ship> = None;

    loop {
        let view = resolve_view_state(
            store.is_configured(),
            identity.as_deref(),
            profile.as_ref(),
            ship.as_ref(),
        );
        debug!(?view, "session resolution step");

        match view {
            ViewState::Loading => unreachable!("resolution never yields Loading"),
            ViewState::SetupRequired => {
                // Offline bootstrap: synthesize a local captain and ship.
                return Ok((
                    Game::offline_user(&config.game),
                    Game::offline_ship(&config.game),
                ));
            }
            ViewState::Auth => {
                identity = Some(config.game.captain_uid.clone());
            }
            ViewState::ProfileSetup => {
                let uid = identity.as_deref().unwrap_or(&config.game.captain_uid);
                profile = match store.get_user(uid).await? {
                    Some(user) => Some(user),
                    None => {
                        let user = Game::offline_user(&config.game);
                        store.create_user(&user).await?;
                        info!(uid = %user.uid, "captain profile created");
                        Some(user)
                    }
                };
            }
            ViewState::ShipSelection => {
                let user = profile.as_mut().ok_or_else(|| {
                    OdysseyError::Internal("ship selection without a profile".to_string())
                })?;
                let existing = match user.current_ship_id.as_deref() {
                    Some(id) => store.get_ship(id).await?,
                    None => None,
                };
                ship = match existing {
                    Some(ship) => Some(ship),
                    None => {
                        let new_ship = Ship::new(
                            format!("ship-{}", uuid::Uuid::new_v4()),
                            config.game.ship_name.clone(),
                            user.uid.clone(),
                            config.game.default_mission.clone(),
                        );
                        store.create_ship(&new_ship).await?;
                        store.join_ship(&new_ship.id, &user.uid).await?;
                        user.current_ship_id = Some(new_ship.id.clone());
                        info!(ship = %new_ship.id, "ship created");
                        Some(new_ship)
                    }
                };
            }
            ViewState::Game => {
                let user = profile.ok_or_else(|| {
                    OdysseyError::Internal("game view without a profile".to_string())
                })?;
                let ship = ship.ok_or_else(|| {
                    OdysseyError::Internal("game view without a ship".to_string())
                })?;
                return Ok((user, ship));
            }
        }
    }
}

/// Renders HAL's current line and the status strip after a turn.
fn render_turn(game: &Game) {
    let fallback = format!("// HAL: {}, göreve hazırım.", game.user.name);
    let line = game.state.last_model_message().unwrap_or(&fallback);
    println!("{}", line.cyan());

    if game.awaiting_confirmation() {
        println!("{}", "(onay bekleniyor: evet / onayla / doğru)".yellow());
    }
    if let Some(error) = &game.state.last_error {
        println!("{}", format!("! {error}").red());
    }
}

/// Renders the HUD panels: telescope, astrobot, and data interpretation.
fn render_hud(game: &Game) {
    println!("{}", "--- HUD ---".dimmed());
    println!("Teleskop: {}", game.state.telescope_prompt);
    if game.state.telescope_image.is_none() {
        println!("  (görüntü yok)");
    }
    for hotspot in &game.state.telescope_hotspots {
        println!(
            "  [{}] {} ({:.0}%, {:.0}%)",
            hotspot.id, hotspot.label, hotspot.x, hotspot.y
        );
    }
    if let Some(prompt) = &game.state.astrobot_prompt {
        println!("Astrobot: {prompt}");
    }
    if let Some(data) = &game.state.interpreted_data {
        println!("Veri: {}", data.summary);
        println!(
            "  Nesne: {}  Mesafe: {}  Hız: {}",
            data.object_name, data.distance, data.velocity
        );
    }
    println!(
        "Günlük: {} kayıt, Galeri: {} öğe",
        game.state.log.len(),
        game.state.assets.len()
    );
}

/// Announces mission completion and writes the video to disk.
fn finish_mission(game: &Game) {
    println!("{}", "GÖREV TAMAMLANDI".bold().green());
    if let Some(video) = &game.state.video {
        match std::fs::write(VIDEO_FILE, video) {
            Ok(()) => println!("Görev kaydı yazıldı: {}", VIDEO_FILE.cyan()),
            Err(e) => eprintln!("{}: görev kaydı yazılamadı: {e}", "error".red()),
        }
    }
}
