//! Headless Mango Runner
//!
//! Drives the pet simulation on a virtual clock and prints a summary.
//! Useful for balancing decay and event constants without waiting in real time.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::rc::Rc;

use chrono::Utc;
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use mango_pet::actions::ActionId;
use mango_pet::core::clock::ManualClock;
use mango_pet::persistence::{JsonFileStore, MemoryStore, PetStore};
use mango_pet::{MangoError, Mood, PetState, Result, Simulation, SimulationConfig, SimulationEvent};

/// Headless Mango Runner - simulate a pet on a virtual clock
#[derive(Parser, Debug)]
#[command(name = "mango_sim")]
#[command(about = "Run the Mango pet simulation headlessly and report the outcome")]
struct Args {
    /// Number of ticks to run
    #[arg(long, default_value_t = 2880)]
    ticks: u64,

    /// Virtual seconds between ticks
    #[arg(long, default_value_t = 30)]
    step_secs: i64,

    /// Store directory; runs in memory when omitted
    #[arg(long)]
    store_dir: Option<PathBuf>,

    /// TOML config overriding the default constants
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Look after Mango with a simple care policy
    #[arg(long)]
    caretaker: bool,

    /// Care action to perform after every tick; repeat the flag for several
    /// (feed, bathe, play, rest, medicine, discipline)
    #[arg(long = "action")]
    actions: Vec<String>,

    /// Mini-game score to report after every N ticks (0 disables)
    #[arg(long, default_value_t = 0)]
    score_every: u64,

    /// Output format: json or text
    #[arg(long, default_value = "text")]
    format: String,

    /// Log filter
    #[arg(long, default_value = "mango_pet=info")]
    log: String,
}

#[derive(Serialize)]
struct RunSummary {
    ticks_run: u64,
    virtual_hours: f64,
    seed: Option<u64>,
    final_state: PetState,
    mood: Mood,
    is_sick: bool,
    misbehavior_count: u32,
    high_score: u32,
    game_over_at_tick: Option<u64>,
    actions_performed: u64,
    storage_healthy: bool,
    event_counts: BTreeMap<String, u64>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut config = match &args.config {
        Some(path) => SimulationConfig::load_from_toml(path)?,
        None => SimulationConfig::new(),
    };
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    let seed = config.seed;

    let routine = parse_routine(&args.actions)?;

    let clock = Rc::new(ManualClock::new(Utc::now()));
    let store: Box<dyn PetStore> = match &args.store_dir {
        Some(dir) => Box::new(JsonFileStore::with_clock(dir, clock.clone())),
        None => Box::new(MemoryStore::with_clock(clock.clone())),
    };

    let mut sim = Simulation::new(config, store, clock.clone())?;
    tracing::info!("Running {} ticks of {}s", args.ticks, args.step_secs);

    let mut event_counts: BTreeMap<String, u64> = BTreeMap::new();
    let mut game_over_at_tick = None;
    let mut actions_performed = 0;
    let mut ticks_run = 0;

    for tick in 1..=args.ticks {
        clock.advance_secs(args.step_secs);
        ticks_run = tick;

        for event in sim.tick() {
            *event_counts.entry(event_name(&event).to_string()).or_default() += 1;
            if event == SimulationEvent::GameOver {
                game_over_at_tick = Some(tick);
            }
        }
        if game_over_at_tick.is_some() {
            break;
        }

        if args.caretaker {
            actions_performed += care_for(&mut sim);
        }
        for &action in &routine {
            actions_performed += u64::from(sim.perform(action));
        }
        if args.score_every > 0 && tick % args.score_every == 0 {
            let score = (tick / args.score_every % 15) as u32;
            sim.record_score(score);
        }
    }

    let summary = RunSummary {
        ticks_run,
        virtual_hours: (ticks_run as f64 * args.step_secs as f64) / 3600.0,
        seed,
        final_state: sim.pet().clone(),
        mood: sim.mood(),
        is_sick: sim.status().is_sick,
        misbehavior_count: sim.status().misbehavior_count,
        high_score: sim.high_score(),
        game_over_at_tick,
        actions_performed,
        storage_healthy: sim.storage_healthy(),
        event_counts,
    };

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_text(&summary);
    }

    Ok(())
}

/// Resolve `--action` names, rejecting unknown ones
fn parse_routine(names: &[String]) -> Result<Vec<ActionId>> {
    names
        .iter()
        .map(|name| {
            ActionId::from_name(name).ok_or_else(|| MangoError::Config(format!("unknown action: {}", name)))
        })
        .collect()
}

/// One pass of a simple caretaker: fix the worst problem first
fn care_for(sim: &mut Simulation) -> u64 {
    let pet = sim.pet().clone();
    let status = sim.status().clone();

    let acted = if status.is_sick {
        sim.give_medicine()
    } else if status.misbehavior_count > 0 {
        sim.discipline()
    } else if pet.hunger.value() < 40 {
        sim.feed()
    } else if pet.cleanliness.value() < 40 {
        sim.bathe()
    } else if pet.energy.value() < 30 {
        sim.rest()
    } else if pet.happiness.value() < 50 {
        sim.play()
    } else {
        false
    };
    u64::from(acted)
}

fn event_name(event: &SimulationEvent) -> &'static str {
    match event {
        SimulationEvent::Decayed { .. } => "decayed",
        SimulationEvent::HealthLost { .. } => "health_lost",
        SimulationEvent::BecameSick { .. } => "became_sick",
        SimulationEvent::Misbehaved { .. } => "misbehaved",
        SimulationEvent::Aged { .. } => "aged",
        SimulationEvent::GameOver => "game_over",
    }
}

fn print_text(summary: &RunSummary) {
    let state = &summary.final_state;
    println!("=== MANGO RUN ===");
    println!("Ticks: {} ({:.1} virtual hours)", summary.ticks_run, summary.virtual_hours);
    if let Some(seed) = summary.seed {
        println!("Seed: {}", seed);
    }
    println!();
    println!("Hunger:      {:>3}", state.hunger);
    println!("Happiness:   {:>3}", state.happiness);
    println!("Cleanliness: {:>3}", state.cleanliness);
    println!("Energy:      {:>3}", state.energy);
    println!("Health:      {:>3}", state.health);
    println!("Age:         {} days", state.age);
    println!();
    println!("Mood: {}{}", summary.mood, if summary.is_sick { " (sick)" } else { "" });
    println!("Misbehavior: {}", summary.misbehavior_count);
    println!("High score: {}", summary.high_score);
    println!("Care actions: {}", summary.actions_performed);
    match summary.game_over_at_tick {
        Some(tick) => println!("Game over at tick {}", tick),
        None => println!("Mango survived"),
    }
    if !summary.storage_healthy {
        println!("Warning: storage failed during the run; state was kept in memory");
    }
    println!();
    println!("--- Events ---");
    for (name, count) in &summary.event_counts {
        println!("{:<12} {}", name, count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_routine() {
        let names = vec!["feed".to_string(), "rest".to_string()];
        assert_eq!(parse_routine(&names).unwrap(), vec![ActionId::Feed, ActionId::Rest]);
        assert!(parse_routine(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_parse_routine_rejects_unknown() {
        let names = vec!["feed".to_string(), "dance".to_string()];
        assert!(matches!(parse_routine(&names), Err(MangoError::Config(_))));
    }

    #[test]
    fn test_args_accept_repeated_action() {
        let args = Args::parse_from(["mango_sim", "--action", "play", "--action", "medicine"]);
        assert_eq!(args.actions, vec!["play", "medicine"]);
        assert_eq!(parse_routine(&args.actions).unwrap(), vec![ActionId::Play, ActionId::Medicine]);
    }

    #[test]
    fn test_routine_runs_against_default_config() {
        let clock = Rc::new(ManualClock::new(Utc::now()));
        let store = Box::new(MemoryStore::with_clock(clock.clone()));
        let config = SimulationConfig::new().with_seed(1);
        let mut sim = Simulation::new(config, store, clock).unwrap();
        for action in parse_routine(&["feed".to_string()]).unwrap() {
            assert!(sim.perform(action));
        }
        assert_eq!(sim.pet().hunger.value(), 100);
    }
}
