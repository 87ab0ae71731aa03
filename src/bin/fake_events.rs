use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use env_logger::Env;
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;

use pitch_events::config::flag_value;
use pitch_events::event_parse::FlatEvent;
use pitch_events::fake_events::{DEMO_PLAYERS, synthetic_match};

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let match_id = parse_arg(&args, "--match-id", 1u64)?;
    let len = parse_arg(&args, "--len", 1800usize)?;
    let seed = parse_arg(&args, "--seed", 42u64)?;
    let out = flag_value(&args, "--out")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(format!("{match_id}.json")));

    let mut rng = StdRng::seed_from_u64(seed);
    let events = synthetic_match(&mut rng, match_id, &DEMO_PLAYERS, len);
    let records: Vec<FlatEvent> = events.iter().map(FlatEvent::from).collect();
    let raw = serde_json::to_string_pretty(&records).context("serialize events")?;
    fs::write(&out, raw).with_context(|| format!("write {}", out.display()))?;

    info!("wrote {} events for match {match_id} to {}", records.len(), out.display());
    Ok(())
}

fn parse_arg<T: std::str::FromStr>(args: &[String], name: &str, default: T) -> Result<T> {
    match flag_value(args, name) {
        Some(raw) => raw
            .parse::<T>()
            .map_err(|_| anyhow!("invalid value for {name}: `{raw}`")),
        None => Ok(default),
    }
}
