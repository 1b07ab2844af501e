//! Headless skirmish: fight the named monsters one after another.
//!
//! ```text
//! skirmish [--json] <monster> [<monster>...]
//! ```
//!
//! Commands are read from stdin, prompts go to stderr and the narration (or
//! one JSON object per event with `--json`) goes to stdout.
use std::sync::Arc;

use anyhow::{Context, Result};
use combat_core::{CombatEvent, Fighter, PcgRng, Player, Resolution, RoundOutcome};
use combat_runtime::{
    CombatSession, EncounterReport, InMemoryLocation, LineActions, ListenerRegistry, Location,
    RuntimeConfig, TracingListener, setup_logging,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = RuntimeConfig::from_env();
    let _guard = setup_logging(&config).context("failed to set up logging")?;

    let mut json = false;
    let mut queries = Vec::new();
    for arg in std::env::args().skip(1) {
        if arg == "--json" {
            json = true;
        } else {
            queries.push(arg);
        }
    }
    if queries.is_empty() {
        anyhow::bail!("usage: skirmish [--json] <monster> [<monster>...]");
    }

    let (combat_config, bestiary) = config.load_content()?;

    let mut location = InMemoryLocation::new("Skirmish Grounds");
    for query in &queries {
        location.add_monster(bestiary.spawn(query)?);
    }
    let opponents: Vec<String> = location
        .monsters()
        .iter()
        .map(|m| m.name().to_string())
        .collect();

    let rng = PcgRng;
    let listeners = ListenerRegistry::new()
        .with_kill(Arc::new(TracingListener))
        .with_loot(Arc::new(TracingListener));
    let mut session = CombatSession::new(&combat_config, &rng, config.seed).with_listeners(listeners);
    let mut player = Player::new("Hero");
    let mut source = LineActions::stdio();

    for opponent in opponents {
        let report = session
            .engage_observed(&mut player, &mut location, &opponent, &mut source, |outcome| {
                print_outcome(outcome, json)
            })
            .await
            .with_context(|| format!("fight against {} failed", opponent))?;

        print_report(&report, json)?;
        if report.resolution == Resolution::Defeat {
            break;
        }
    }

    Ok(())
}

fn print_outcome(outcome: &RoundOutcome, json: bool) {
    for event in &outcome.events {
        print_event(event, json);
    }
}

fn print_event(event: &CombatEvent, json: bool) {
    if !json {
        println!("{}", event);
        return;
    }
    match serde_json::to_string(event) {
        Ok(line) => println!("{}", line),
        Err(e) => tracing::warn!(error = %e, "failed to encode event"),
    }
}

fn print_report(report: &EncounterReport, json: bool) -> Result<()> {
    if json {
        let summary = serde_json::json!({
            "report": {
                "monster": report.monster,
                "resolution": report.resolution,
                "rounds": report.rounds,
                "seed": report.seed,
                "loot": report.loot.iter().map(|item| item.name.as_str()).collect::<Vec<_>>(),
                "campaign_complete": report.campaign_complete,
            }
        });
        println!("{}", serde_json::to_string(&summary)?);
        return Ok(());
    }

    println!(
        "== {}: {} after {} rounds (seed {}) ==",
        report.monster, report.resolution, report.rounds, report.seed
    );
    if report.campaign_complete {
        println!("The Shadow of the Mountain is vanquished. Your campaign is complete!");
    }
    Ok(())
}
