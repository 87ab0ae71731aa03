use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use log::{debug, info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::event::{Event, EventKind, Point, kind_from_parts};

/// Parses a JSON array of event records. Nested (StatsBomb open-data) and
/// flattened (`type_name`, `pass_end_location`, ...) records may be mixed.
pub fn parse_events_json(raw: &str) -> Result<Vec<Event>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }

    let root: Value = serde_json::from_str(trimmed).context("invalid events json")?;
    let Value::Array(records) = root else {
        return Err(anyhow!("expected a JSON array of event records"));
    };

    let mut out = Vec::with_capacity(records.len());
    for (pos, record) in records.into_iter().enumerate() {
        let event = if record.get("type").is_some() {
            let nested: NestedEvent = serde_json::from_value(record)
                .with_context(|| format!("event record {pos}: invalid nested event"))?;
            nested.into_event(pos)?
        } else {
            let flat: FlatEvent = serde_json::from_value(record)
                .with_context(|| format!("event record {pos}: invalid flat event"))?;
            flat.into_event(pos)?
        };
        out.push(event);
    }
    Ok(out)
}

/// Like [`parse_events_json`], stamping `match_id` on events that lack one.
pub fn parse_match_events_json(raw: &str, match_id: u64) -> Result<Vec<Event>> {
    let mut events = parse_events_json(raw)?;
    for event in &mut events {
        event.match_id.get_or_insert(match_id);
    }
    Ok(events)
}

/// Reads one events file. A numeric file stem (`3788741.json`) is used as the match id.
pub fn load_match_events(path: &Path) -> Result<Vec<Event>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read events file {}", path.display()))?;
    let events = match match_id_from_path(path) {
        Some(match_id) => parse_match_events_json(&raw, match_id),
        None => parse_events_json(&raw),
    }
    .with_context(|| format!("parse events file {}", path.display()))?;
    info!("loaded {} events from {}", events.len(), path.display());
    Ok(events)
}

/// Reads every `*.json` file in `dir`. Files are parsed in parallel and
/// concatenated in file-name order.
pub fn load_events_dir(dir: &Path, parallelism: usize) -> Result<Vec<Event>> {
    let files = json_files_in(dir)?;
    if files.is_empty() {
        warn!("no event files found in {}", dir.display());
        return Ok(Vec::new());
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(parallelism.clamp(1, 32))
        .build()
        .ok();
    let load_all = || {
        files
            .par_iter()
            .map(|path| load_match_events(path))
            .collect::<Result<Vec<_>>>()
    };
    let per_file = match pool.as_ref() {
        Some(pool) => pool.install(load_all),
        None => load_all(),
    }?;

    let events: Vec<Event> = per_file.into_iter().flatten().collect();
    info!(
        "loaded {} events from {} files in {}",
        events.len(),
        files.len(),
        dir.display()
    );
    Ok(events)
}

/// Dispatches to [`load_events_dir`] or [`load_match_events`].
pub fn load_events(path: &Path, parallelism: usize) -> Result<Vec<Event>> {
    if path.is_dir() {
        load_events_dir(path, parallelism)
    } else {
        load_match_events(path)
    }
}

fn json_files_in(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("read events dir {}", dir.display()))?;
    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("list events dir {}", dir.display()))?
            .path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        } else {
            debug!("skipping {}", path.display());
        }
    }
    files.sort();
    Ok(files)
}

fn match_id_from_path(path: &Path) -> Option<u64> {
    path.file_stem()?.to_str()?.trim().parse::<u64>().ok()
}

#[derive(Debug, Deserialize)]
struct NamedRef {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NestedDetail {
    end_location: Option<Vec<f64>>,
    outcome: Option<NamedRef>,
}

#[derive(Debug, Deserialize)]
struct NestedEvent {
    index: Option<u32>,
    match_id: Option<u64>,
    period: Option<u8>,
    minute: Option<u16>,
    second: Option<u16>,
    #[serde(rename = "type")]
    event_type: Option<NamedRef>,
    player: Option<NamedRef>,
    team: Option<NamedRef>,
    location: Option<Vec<f64>>,
    pass: Option<NestedDetail>,
    carry: Option<NestedDetail>,
    shot: Option<NestedDetail>,
    dribble: Option<NestedDetail>,
    duel: Option<NestedDetail>,
    interception: Option<NestedDetail>,
    ball_receipt: Option<NestedDetail>,
}

impl NestedEvent {
    fn into_event(self, pos: usize) -> Result<Event> {
        let type_name = self
            .event_type
            .and_then(|t| t.name)
            .ok_or_else(|| anyhow!("event record {pos} is missing `type.name`"))?;
        let index = self
            .index
            .ok_or_else(|| anyhow!("event record {pos} is missing `index`"))?;

        let detail = match type_name.as_str() {
            "Pass" => self.pass,
            "Carry" => self.carry,
            "Shot" => self.shot,
            "Dribble" => self.dribble,
            "Duel" => self.duel,
            "Interception" => self.interception,
            "Ball Receipt" | "Ball Receipt*" => self.ball_receipt,
            _ => None,
        };
        let (end_location, outcome) = match detail {
            Some(d) => (d.end_location, d.outcome.and_then(|o| o.name)),
            None => (None, None),
        };

        Ok(Event {
            index,
            match_id: self.match_id,
            period: self.period,
            minute: self.minute,
            second: self.second,
            player_name: self.player.and_then(|p| p.name),
            team_name: self.team.and_then(|t| t.name),
            location: location_from(self.location.as_deref(), pos),
            kind: kind_from_parts(&type_name, end_location.as_deref(), outcome),
        })
    }
}

/// One event as a flat record, the shape produced by normalizing nested
/// records with `_` as the key separator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlatEvent {
    pub index: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minute: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second: Option<u16>,
    pub type_name: Option<String>,
    pub player_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_name: Option<String>,
    pub location: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pass_end_location: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pass_outcome_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carry_end_location: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shot_end_location: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shot_outcome_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dribble_outcome_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duel_outcome_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interception_outcome_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ball_receipt_outcome_name: Option<String>,
}

impl FlatEvent {
    fn into_event(self, pos: usize) -> Result<Event> {
        let type_name = self
            .type_name
            .ok_or_else(|| anyhow!("event record {pos} is missing `type_name`"))?;
        let index = self
            .index
            .ok_or_else(|| anyhow!("event record {pos} is missing `index`"))?;

        let (end_location, outcome) = match type_name.as_str() {
            "Pass" => (self.pass_end_location, self.pass_outcome_name),
            "Carry" => (self.carry_end_location, None),
            "Shot" => (self.shot_end_location, self.shot_outcome_name),
            "Dribble" => (None, self.dribble_outcome_name),
            "Duel" => (None, self.duel_outcome_name),
            "Interception" => (None, self.interception_outcome_name),
            "Ball Receipt" | "Ball Receipt*" => (None, self.ball_receipt_outcome_name),
            _ => (None, None),
        };

        Ok(Event {
            index,
            match_id: self.match_id,
            period: self.period,
            minute: self.minute,
            second: self.second,
            player_name: self.player_name,
            team_name: self.team_name,
            location: location_from(self.location.as_deref(), pos),
            kind: kind_from_parts(&type_name, end_location.as_deref(), outcome),
        })
    }
}

impl From<&Event> for FlatEvent {
    fn from(event: &Event) -> Self {
        let mut flat = FlatEvent {
            index: Some(event.index),
            match_id: event.match_id,
            period: event.period,
            minute: event.minute,
            second: event.second,
            type_name: Some(event.type_name().to_string()),
            player_name: event.player_name.clone(),
            team_name: event.team_name.clone(),
            location: event.location.map(|p| vec![p.x, p.y]),
            ..Default::default()
        };
        match &event.kind {
            EventKind::Pass {
                end_location,
                outcome,
            } => {
                flat.pass_end_location = end_location.map(|p| vec![p.x, p.y]);
                flat.pass_outcome_name = outcome.clone();
            }
            EventKind::Carry { end_location } => {
                flat.carry_end_location = end_location.map(|p| vec![p.x, p.y]);
            }
            EventKind::Shot {
                end_location,
                outcome,
            } => {
                flat.shot_end_location = end_location.map(|p| {
                    let mut v = vec![p.x, p.y];
                    v.extend(p.z);
                    v
                });
                flat.shot_outcome_name = outcome.clone();
            }
            EventKind::Dribble { outcome } => flat.dribble_outcome_name = outcome.clone(),
            EventKind::Duel { outcome } => flat.duel_outcome_name = outcome.clone(),
            EventKind::Interception { outcome } => {
                flat.interception_outcome_name = outcome.clone()
            }
            EventKind::BallReceipt { outcome } => {
                flat.ball_receipt_outcome_name = outcome.clone()
            }
            EventKind::Other { .. } => {}
        }
        flat
    }
}

fn location_from(raw: Option<&[f64]>, pos: usize) -> Option<Point> {
    let raw = raw?;
    let point = Point::from_slice(raw);
    if point.is_none() {
        debug!(
            "event record {pos}: dropping location with {} components",
            raw.len()
        );
    }
    point
}
