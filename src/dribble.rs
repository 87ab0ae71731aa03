use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::str::FromStr;

use anyhow::{Result, anyhow};
use serde::Serialize;

use crate::carry::matches_by_player;
use crate::event::{Event, EventKind};
use crate::rank::{RankOrder, average_ranks, round_to};

pub const COMPLETE: &str = "Complete";
pub const INCOMPLETE: &str = "Incomplete";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerDribbleSummary {
    pub player_name: String,
    pub complete: u32,
    pub incomplete: u32,
    pub total: u32,
    pub success_rate: Option<f64>,
    pub matches_played: u32,
    pub dribbles_per_match: f64,
    pub success_rate_rank: Option<f64>,
    pub dribbles_per_match_rank: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DribbleColumn {
    Player,
    Complete,
    Incomplete,
    Total,
    SuccessRate,
    MatchesPlayed,
    DribblesPerMatch,
    SuccessRateRank,
    DribblesPerMatchRank,
}

impl DribbleColumn {
    pub fn label(self) -> &'static str {
        match self {
            DribbleColumn::Player => "Player",
            DribbleColumn::Complete => "Complete",
            DribbleColumn::Incomplete => "Incomplete",
            DribbleColumn::Total => "Total dribbles",
            DribbleColumn::SuccessRate => "Success rate",
            DribbleColumn::MatchesPlayed => "Matches played",
            DribbleColumn::DribblesPerMatch => "Dribbles per match",
            DribbleColumn::SuccessRateRank => "Success rate ranking",
            DribbleColumn::DribblesPerMatchRank => "Dribbles per match ranking",
        }
    }

    const ALL: [DribbleColumn; 9] = [
        DribbleColumn::Player,
        DribbleColumn::Complete,
        DribbleColumn::Incomplete,
        DribbleColumn::Total,
        DribbleColumn::SuccessRate,
        DribbleColumn::MatchesPlayed,
        DribbleColumn::DribblesPerMatch,
        DribbleColumn::SuccessRateRank,
        DribbleColumn::DribblesPerMatchRank,
    ];
}

impl FromStr for DribbleColumn {
    type Err = anyhow::Error;

    /// Accepts the report label (`"Success rate"`) or a snake_case name
    /// (`success_rate`), case-insensitively.
    fn from_str(raw: &str) -> Result<Self> {
        let wanted = raw.trim().to_lowercase().replace('_', " ");
        let found = match wanted.as_str() {
            "player name" => Some(DribbleColumn::Player),
            "total" => Some(DribbleColumn::Total),
            _ => DribbleColumn::ALL
                .into_iter()
                .find(|col| col.label().to_lowercase() == wanted),
        };
        found.ok_or_else(|| anyhow!("unknown dribble column `{raw}`"))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DribbleOptions {
    pub sort_by: DribbleColumn,
    pub ascending: bool,
    pub rank_order: RankOrder,
}

impl Default for DribbleOptions {
    fn default() -> Self {
        Self {
            sort_by: DribbleColumn::Complete,
            ascending: false,
            rank_order: RankOrder::Descending,
        }
    }
}

#[derive(Default)]
struct DribbleAcc {
    complete: u32,
    incomplete: u32,
}

/// Per-player dribble table for every player with at least one dribble.
///
/// Matches played counts every match the player appears in, not only the
/// matches with a dribble.
pub fn summarize_dribbles(
    events: &[Event],
    opts: &DribbleOptions,
) -> Result<Vec<PlayerDribbleSummary>> {
    let matches = matches_by_player(events)?;

    let mut by_player: BTreeMap<&str, DribbleAcc> = BTreeMap::new();
    for event in events {
        let EventKind::Dribble { outcome } = &event.kind else {
            continue;
        };
        let Some(player) = event.player_name.as_deref() else {
            continue;
        };
        let acc = by_player.entry(player).or_default();
        match outcome.as_deref() {
            Some(COMPLETE) => acc.complete += 1,
            Some(INCOMPLETE) => acc.incomplete += 1,
            _ => {}
        }
    }

    let mut rows: Vec<PlayerDribbleSummary> = by_player
        .into_iter()
        .map(|(player, acc)| {
            let total = acc.complete + acc.incomplete;
            let matches_played = matches.get(player).map_or(0, |m| m.len() as u32);
            let success_rate =
                (total > 0).then(|| round_to(acc.complete as f64 / total as f64, 2));
            let dribbles_per_match = if matches_played == 0 {
                0.0
            } else {
                round_to(total as f64 / matches_played as f64, 1)
            };
            PlayerDribbleSummary {
                player_name: player.to_string(),
                complete: acc.complete,
                incomplete: acc.incomplete,
                total,
                success_rate,
                matches_played,
                dribbles_per_match,
                success_rate_rank: None,
                dribbles_per_match_rank: None,
            }
        })
        .collect();

    if rows.len() > 1 {
        let rates: Vec<Option<f64>> = rows.iter().map(|r| r.success_rate).collect();
        let per_match: Vec<Option<f64>> =
            rows.iter().map(|r| Some(r.dribbles_per_match)).collect();
        let rate_ranks = average_ranks(&rates, opts.rank_order);
        let per_match_ranks = average_ranks(&per_match, opts.rank_order);
        for ((row, rate_rank), per_match_rank) in
            rows.iter_mut().zip(rate_ranks).zip(per_match_ranks)
        {
            row.success_rate_rank = rate_rank;
            row.dribbles_per_match_rank = per_match_rank;
        }
    }

    sort_rows(&mut rows, opts.sort_by, opts.ascending);
    Ok(rows)
}

/// Stable sort; missing values always go last regardless of direction.
fn sort_rows(rows: &mut [PlayerDribbleSummary], column: DribbleColumn, ascending: bool) {
    if column == DribbleColumn::Player {
        rows.sort_by(|a, b| {
            let ord = a.player_name.cmp(&b.player_name);
            if ascending { ord } else { ord.reverse() }
        });
        return;
    }
    rows.sort_by(|a, b| match (sort_value(a, column), sort_value(b, column)) {
        (Some(x), Some(y)) => {
            let ord = x.partial_cmp(&y).unwrap_or(Ordering::Equal);
            if ascending { ord } else { ord.reverse() }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

fn sort_value(row: &PlayerDribbleSummary, column: DribbleColumn) -> Option<f64> {
    match column {
        DribbleColumn::Player => None,
        DribbleColumn::Complete => Some(row.complete as f64),
        DribbleColumn::Incomplete => Some(row.incomplete as f64),
        DribbleColumn::Total => Some(row.total as f64),
        DribbleColumn::SuccessRate => row.success_rate,
        DribbleColumn::MatchesPlayed => Some(row.matches_played as f64),
        DribbleColumn::DribblesPerMatch => Some(row.dribbles_per_match),
        DribbleColumn::SuccessRateRank => row.success_rate_rank,
        DribbleColumn::DribblesPerMatchRank => row.dribbles_per_match_rank,
    }
}
