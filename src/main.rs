use anyhow::{Context, Result};
use env_logger::Env;
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;

use pitch_events::carry::{PlayerCarrySummary, summarize_carries};
use pitch_events::config::{DEFAULT_DEMO_EVENTS, DEFAULT_DEMO_MATCHES, ReportConfig};
use pitch_events::dribble::{PlayerDribbleSummary, summarize_dribbles};
use pitch_events::event::Event;
use pitch_events::event_parse::load_events;
use pitch_events::export::export_summaries_xlsx;
use pitch_events::fake_events::{DEMO_PLAYERS, synthetic_match};
use pitch_events::normalize::normalize_event;
use pitch_events::window::adjacency_mask;

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cfg = ReportConfig::from_env_and_args()?;
    let events = collect_events(&cfg)?;
    info!("{} events in report", events.len());

    let carries = summarize_carries(&events).context("carry summary")?;
    let dribbles = summarize_dribbles(&events, &cfg.dribble).context("dribble summary")?;

    print_carries(&carries);
    println!();
    print_dribbles(&dribbles);

    if let Some(player) = cfg.window_player.as_deref() {
        println!();
        print_window(&events, player, &cfg.window_event_type);
    }

    if let Some(path) = cfg.xlsx_path.as_deref() {
        let report = export_summaries_xlsx(path, &carries, &dribbles)?;
        println!();
        println!(
            "Exported {} carry rows and {} dribble rows to {} ({})",
            report.carry_rows,
            report.dribble_rows,
            path.display(),
            report.generated_at
        );
    }

    Ok(())
}

fn collect_events(cfg: &ReportConfig) -> Result<Vec<Event>> {
    let mut events = Vec::new();
    for path in &cfg.event_paths {
        events.extend(load_events(path, cfg.load_parallelism)?);
    }
    if cfg.demo {
        let mut rng = StdRng::seed_from_u64(42);
        for match_id in 1..=DEFAULT_DEMO_MATCHES {
            events.extend(synthetic_match(
                &mut rng,
                match_id,
                &DEMO_PLAYERS,
                DEFAULT_DEMO_EVENTS,
            ));
        }
    }
    Ok(events)
}

fn print_carries(rows: &[PlayerCarrySummary]) {
    println!("Carries");
    println!(
        "{:<24} {:>8} {:>8} {:>10} {:>10} {:>10}",
        "Player", "Carries", "Matches", "Total", "Max/match", "Avg/match"
    );
    for r in rows {
        println!(
            "{:<24} {:>8} {:>8} {:>10} {:>10} {:>10.1}",
            r.player_name,
            r.carry_count,
            r.matches_played,
            r.total_distance,
            r.max_distance_single_match,
            r.avg_distance_per_match
        );
    }
}

fn print_dribbles(rows: &[PlayerDribbleSummary]) {
    println!("Dribbles");
    println!(
        "{:>5} {:<24} {:>8} {:>10} {:>6} {:>6} {:>7} {:>9} {:>9} {:>9}",
        "Index",
        "Player",
        "Complete",
        "Incomplete",
        "Total",
        "Rate",
        "Matches",
        "Per match",
        "Rate rk",
        "Freq rk"
    );
    for (idx, r) in rows.iter().enumerate() {
        println!(
            "{:>5} {:<24} {:>8} {:>10} {:>6} {:>6} {:>7} {:>9.1} {:>9} {:>9}",
            idx,
            r.player_name,
            r.complete,
            r.incomplete,
            r.total,
            opt_fmt(r.success_rate, 2),
            r.matches_played,
            r.dribbles_per_match,
            opt_fmt(r.success_rate_rank, 1),
            opt_fmt(r.dribbles_per_match_rank, 1)
        );
    }
}

fn print_window(events: &[Event], player: &str, event_type: &str) {
    let mask = adjacency_mask(events, player, event_type);
    let selected = mask.iter().filter(|m| **m).count();
    println!("Events around {event_type} by {player} ({selected} rows)");
    for (event, _) in events.iter().zip(&mask).filter(|(_, keep)| **keep) {
        let norm = normalize_event(event);
        println!(
            "{:>6} {:>8} {:<16} {:<24} start=({}, {}) end=({}, {}) outcome={}",
            norm.index,
            norm.match_id.map(|m| m.to_string()).unwrap_or_default(),
            norm.type_name,
            norm.player_name.as_deref().unwrap_or("-"),
            opt_fmt(norm.x_start, 1),
            opt_fmt(norm.y_start, 1),
            opt_fmt(norm.x_end, 1),
            opt_fmt(norm.y_end, 1),
            norm.outcome.as_deref().unwrap_or("-")
        );
    }
}

fn opt_fmt(value: Option<f64>, decimals: usize) -> String {
    value
        .map(|v| format!("{v:.decimals$}"))
        .unwrap_or_else(|| "-".to_string())
}
