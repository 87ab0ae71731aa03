//! Plot-ready layers derived from normalized events: markers for event maps,
//! arrows for pass/carry maps, point clouds for heat maps and per-type counts
//! for radar charts. Drawing them is left to the caller.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::dribble::{COMPLETE, INCOMPLETE};
use crate::event::{BALL_RECEIPT, CARRY, DRIBBLE, PASS, Point, SHOT, canonical_type_name};
use crate::normalize::NormalizedEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MarkerClass {
    BallReceipt,
    Carry,
    CompleteDribble,
    IncompleteDribble,
    CompletePass,
    IncompletePass,
    Goal,
    MissedShot,
    Unplotted,
}

impl MarkerClass {
    pub fn label(self) -> &'static str {
        match self {
            MarkerClass::BallReceipt => "Ball Receipt",
            MarkerClass::Carry => "Carry",
            MarkerClass::CompleteDribble => "Complete Dribble",
            MarkerClass::IncompleteDribble => "Incomplete Dribble",
            MarkerClass::CompletePass => "Complete Pass",
            MarkerClass::IncompletePass => "Incomplete Pass",
            MarkerClass::Goal => "Goal!",
            MarkerClass::MissedShot => "Missed Shot",
            MarkerClass::Unplotted => "",
        }
    }

    /// Whether the event map draws an arrow from the marker.
    pub fn has_arrow(self) -> bool {
        matches!(
            self,
            MarkerClass::Carry | MarkerClass::CompletePass | MarkerClass::IncompletePass
        )
    }
}

pub fn classify_marker(event: &NormalizedEvent) -> MarkerClass {
    let outcome = event.outcome.as_deref();
    match event.type_name.as_str() {
        BALL_RECEIPT => MarkerClass::BallReceipt,
        CARRY => MarkerClass::Carry,
        DRIBBLE => match outcome {
            Some(COMPLETE) => MarkerClass::CompleteDribble,
            Some(INCOMPLETE) => MarkerClass::IncompleteDribble,
            _ => MarkerClass::Unplotted,
        },
        // Successful passes have no outcome at all.
        PASS => match outcome {
            Some(INCOMPLETE) => MarkerClass::IncompletePass,
            _ => MarkerClass::CompletePass,
        },
        SHOT => match outcome {
            Some("Goal") => MarkerClass::Goal,
            _ => MarkerClass::MissedShot,
        },
        _ => MarkerClass::Unplotted,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Marker {
    pub class: MarkerClass,
    pub x: f64,
    pub y: f64,
}

/// Markers for every classifiable event with a known start.
pub fn event_markers(events: &[NormalizedEvent]) -> Vec<Marker> {
    events
        .iter()
        .filter_map(|e| {
            let class = classify_marker(e);
            if class == MarkerClass::Unplotted {
                return None;
            }
            let start = e.start()?;
            Some(Marker {
                class,
                x: start.x,
                y: start.y,
            })
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Arrow {
    pub x: f64,
    pub y: f64,
    pub dx: f64,
    pub dy: f64,
}

pub fn arrows(events: &[NormalizedEvent], event_type: &str) -> Vec<Arrow> {
    let event_type = canonical_type_name(event_type);
    events
        .iter()
        .filter(|e| e.type_name == event_type)
        .filter_map(|e| {
            let start = e.start()?;
            let d = e.displacement()?;
            Some(Arrow {
                x: start.x,
                y: start.y,
                dx: d.dx,
                dy: d.dy,
            })
        })
        .collect()
}

pub fn heat_points(events: &[NormalizedEvent]) -> Vec<Point> {
    events.iter().filter_map(NormalizedEvent::start).collect()
}

/// Event counts per type for one player, ordered by type name.
pub fn type_profile(events: &[NormalizedEvent], player: &str) -> Vec<(String, u32)> {
    let mut counts: BTreeMap<&str, u32> = BTreeMap::new();
    for e in events
        .iter()
        .filter(|e| e.player_name.as_deref() == Some(player))
    {
        *counts.entry(e.type_name.as_str()).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(name, n)| (name.to_string(), n))
        .collect()
}
