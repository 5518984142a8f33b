//! Headless combat driver.
//!
//! Builds a [`CombatEngine`] from a content directory and plays rounds with a
//! simple hero policy, printing the combat log to stdout. Diagnostics go to
//! stderr through `tracing`.
mod autoplay;
mod config;

use std::sync::Arc;

use anyhow::{Context, Result};
use game_content::ContentFactory;
use runtime::{BoxedRng, CombatEngine, Event, EventBus, RoundOutcome, Side, StdRngOracle, Topic};
use tokio::sync::broadcast::Receiver;
use tokio::sync::broadcast::error::RecvError;

use config::ClientConfig;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = ClientConfig::from_env();
    tracing::info!(dir = %config.content_dir.display(), module = %config.module, seed = ?config.seed, "starting combat session");

    let content = Arc::new(ContentFactory::from_dir(&config.content_dir));
    let game_config = content
        .load_config(&config.module)
        .await
        .with_context(|| format!("loading config for module `{}`", config.module))?;

    let rng: BoxedRng = match config.seed {
        Some(seed) => Box::new(StdRngOracle::seeded(seed)),
        None => Box::new(StdRngOracle::from_entropy()),
    };

    let bus = EventBus::new();
    let printer = tokio::spawn(print_log(bus.subscribe(Topic::Log)));

    let mut engine = CombatEngine::initialize(game_config, content, rng, bus.clone())
        .await
        .context("initializing combat engine")?;
    drop(bus);

    let (rounds, victories) = play(&mut engine, config.max_rounds).await?;
    tracing::info!(rounds, victories, hero_hp = engine.hero().hp, "session finished");

    drop(engine);
    printer.await.context("log printer panicked")?;
    Ok(())
}

async fn play(engine: &mut CombatEngine, max_rounds: u32) -> Result<(u32, u32)> {
    autoplay::gear_up(engine);

    let mut victories = 0;
    for round in 1..=max_rounds {
        if let Some(action) = autoplay::choose_action(engine) {
            engine.use_action(&action, Side::Hero);
        }
        match engine.next_round().await? {
            RoundOutcome::Defeat => return Ok((round, victories)),
            RoundOutcome::Victory => victories += 1,
            RoundOutcome::Continued { .. } => {}
        }
    }
    Ok((max_rounds, victories))
}

/// Prints log lines until every bus handle is dropped.
async fn print_log(mut log: Receiver<Event>) {
    loop {
        match log.recv().await {
            Ok(Event::Log(line)) => println!("{line}"),
            Ok(_) => {}
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "combat log lagged");
            }
            Err(RecvError::Closed) => break,
        }
    }
}
