//! Tactical Board demo
//!
//! Plays a short scripted skirmish on the rules core, checks invariants
//! after every step, then replays the script and compares state digests.

use std::sync::Arc;

use anyhow::{bail, Context};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use tactical_board::{
    EventSink, GameConfig, GameEvent, GameEventData, GridTransform, Intent, TurnController, VERSION,
    game::{events::TracingSink, invariants::check_invariants},
};

/// One scripted step.
#[derive(Clone, Copy, Debug)]
enum Step {
    Play(Intent),
    EndTurn,
    Pause(bool),
}

use Step::{EndTurn, Pause, Play};

/// Move the token on `from` to the adjacent `to`.
const fn mv(from: (i32, i32), to: (i32, i32)) -> [Step; 3] {
    [
        Play(Intent::select(from.0, from.1)),
        Play(Intent::select(to.0, to.1)),
        Play(Intent::confirm_move()),
    ]
}

/// Demo script for the standard layout.
fn script() -> Vec<Step> {
    let mut steps = Vec::new();

    // White: march the d-file knight up the board (4 AP, turn ends itself).
    steps.extend(mv((3, 0), (3, 1)));
    steps.extend(mv((3, 1), (3, 2)));
    steps.extend(mv((3, 2), (3, 3)));
    steps.extend(mv((3, 3), (3, 4)));

    // Black: close in, strike, then guard a flank.
    steps.extend(mv((3, 7), (3, 6)));
    steps.extend(mv((3, 6), (3, 5)));
    steps.push(Play(Intent::select(3, 5)));
    steps.push(Play(Intent::select(3, 4)));
    steps.push(Play(Intent::select(4, 7)));
    steps.push(Play(Intent::select(4, 6)));
    steps.push(Play(Intent::confirm_defend()));

    // White: look, strike back, pause mid-turn, then give up the rest.
    steps.push(Play(Intent::hover(3, 5)));
    steps.push(Play(Intent::select(3, 4)));
    steps.push(Play(Intent::select(3, 5)));
    steps.push(Pause(true));
    steps.push(Play(Intent::select(3, 4)));
    steps.push(Pause(false));
    steps.push(Play(Intent::select(4, 0)));
    steps.push(Play(Intent::cancel()));
    steps.push(EndTurn);

    steps
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Tactical Board v{}", VERSION);

    let config = match std::env::args().nth(1) {
        Some(path) => GameConfig::from_json_file(&path)
            .with_context(|| format!("failed to load config from {path}"))?,
        None => GameConfig::standard(),
    };
    info!("Layout: {} tokens", config.layout.token_count());

    info!("=== Starting Demo Game ===");
    let hash = run_script(&config, true)?;
    info!("Final State Hash: {}", hex::encode(hash));

    info!("=== Verifying Determinism ===");
    let replay_hash = run_script(&config, false)?;
    info!("Replay State Hash: {}", hex::encode(replay_hash));

    if hash != replay_hash {
        bail!("determinism check failed: replay diverged");
    }
    info!("Determinism check PASSED");
    Ok(())
}

/// Play the script on a fresh game and return the final digest.
fn run_script(config: &GameConfig, verbose: bool) -> anyhow::Result<[u8; 32]> {
    let mut game = TurnController::new(config, Arc::new(GridTransform::default()))
        .context("game initialization failed")?;
    if verbose {
        game = game.with_sink(Box::new(Narrator));
    }

    for (index, step) in script().into_iter().enumerate() {
        match step {
            Play(intent) => {
                if let Some(report) = game.handle_intent(intent) {
                    debug!(index, ?report, "action");
                }
            }
            EndTurn => {
                game.end_turn();
            }
            Pause(paused) => {
                game.set_paused(paused);
            }
        }

        // Without a sink nothing drains the queue.
        game.take_events();

        let violations = check_invariants(&game);
        if let Some(first) = violations.first() {
            bail!("step {index} ({step:?}): {first}");
        }
    }

    if verbose {
        info!(
            "Turn {}: {} to act, {} AP, White {} / Black {} tokens",
            game.turn_counter(),
            game.active_team(),
            game.action_points(),
            game.player(tactical_board::Team::White).len(),
            game.player(tactical_board::Team::Black).len(),
        );
    }

    Ok(game.state_hash())
}

/// Sink that narrates the notable events at info level and leaves the rest
/// to [`TracingSink`].
#[derive(Debug)]
struct Narrator;

impl EventSink for Narrator {
    fn notify(&mut self, event: &GameEvent) {
        TracingSink.notify(event);
        match &event.data {
            GameEventData::TokenAttacked { attacker, target, damage } => {
                info!("{} attacked {} for {} damage", attacker, target, damage);
            }
            GameEventData::TokenRemoved { token, team, token_type, coord } => {
                info!("{} {} {} died at {}", team, token_type, token, coord);
            }
            GameEventData::TokenHovered { token, stats, position, .. } => {
                let (x, y) = position.to_floats();
                info!(
                    "Hovering {} at ({:.2}, {:.2}): health {} attack {} defence {}",
                    token, x, y, stats.health, stats.attack, stats.defence
                );
            }
            GameEventData::ActivePlayerChanged { team } => {
                info!("{} to move", team);
            }
            GameEventData::GameOver { winner } => {
                info!("Game over! Winner: {}", winner);
            }
            _ => {}
        }
    }
}
