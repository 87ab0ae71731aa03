use std::collections::{BTreeMap, HashMap, HashSet};

use anyhow::{Result, anyhow};
use serde::Serialize;

use crate::event::{Event, EventKind};
use crate::rank::round_to;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerCarrySummary {
    pub player_name: String,
    pub carry_count: u32,
    pub matches_played: u32,
    pub total_distance: u32,
    pub max_distance_single_match: u32,
    pub avg_distance_per_match: f64,
}

/// Straight-line length of a carry, rounded to a whole unit and capped at
/// `u32::MAX`. Anything that is not a carry with two usable coordinates
/// counts as 0.
pub fn carry_distance(event: &Event) -> u32 {
    let EventKind::Carry {
        end_location: Some(end),
    } = &event.kind
    else {
        return 0;
    };
    let Some(start) = event.location else {
        return 0;
    };
    if !start.is_finite() || !end.is_finite() {
        return 0;
    }
    round_to(start.distance_to(end), 0) as u32
}

#[derive(Default)]
struct CarryAcc {
    carries: u32,
    total: u32,
    per_match: HashMap<u64, u32>,
}

/// One row per player that appears in `events`, sorted by name.
///
/// Every event with a player must carry a `match_id`; otherwise the matches
/// played column is meaningless and the call fails.
pub fn summarize_carries(events: &[Event]) -> Result<Vec<PlayerCarrySummary>> {
    let mut by_player: BTreeMap<&str, CarryAcc> = BTreeMap::new();

    for event in events {
        let Some(player) = event.player_name.as_deref() else {
            continue;
        };
        let match_id = require_match_id(event, player)?;

        let distance = carry_distance(event);
        let acc = by_player.entry(player).or_default();
        if matches!(event.kind, EventKind::Carry { .. }) {
            acc.carries += 1;
        }
        acc.total = acc.total.saturating_add(distance);
        let in_match = acc.per_match.entry(match_id).or_insert(0);
        *in_match = in_match.saturating_add(distance);
    }

    Ok(by_player
        .into_iter()
        .map(|(player, acc)| {
            let matches_played = acc.per_match.len() as u32;
            let max_distance_single_match = acc.per_match.values().copied().max().unwrap_or(0);
            let avg_distance_per_match = if matches_played == 0 {
                0.0
            } else {
                round_to(acc.total as f64 / matches_played as f64, 1)
            };
            PlayerCarrySummary {
                player_name: player.to_string(),
                carry_count: acc.carries,
                matches_played,
                total_distance: acc.total,
                max_distance_single_match,
                avg_distance_per_match,
            }
        })
        .collect())
}

pub(crate) fn require_match_id(event: &Event, player: &str) -> Result<u64> {
    event.match_id.ok_or_else(|| {
        anyhow!(
            "event {} ({}, {player}) has no match_id; per-match summaries need one on every event",
            event.index,
            event.type_name()
        )
    })
}

/// Distinct match ids per player, over all events that have a player.
pub(crate) fn matches_by_player(events: &[Event]) -> Result<HashMap<&str, HashSet<u64>>> {
    let mut out: HashMap<&str, HashSet<u64>> = HashMap::new();
    for event in events {
        let Some(player) = event.player_name.as_deref() else {
            continue;
        };
        let match_id = require_match_id(event, player)?;
        out.entry(player).or_default().insert(match_id);
    }
    Ok(out)
}
