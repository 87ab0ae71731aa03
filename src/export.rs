use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::carry::PlayerCarrySummary;
use crate::dribble::{DribbleColumn, PlayerDribbleSummary};

pub struct ExportReport {
    pub carry_rows: usize,
    pub dribble_rows: usize,
    pub generated_at: String,
}

#[derive(Debug, Clone, PartialEq)]
enum Cell {
    Text(String),
    Number(f64),
    Empty,
}

pub fn export_summaries_xlsx(
    path: &Path,
    carries: &[PlayerCarrySummary],
    dribbles: &[PlayerDribbleSummary],
) -> Result<ExportReport> {
    let generated_at = Utc::now().to_rfc3339();
    let carry_rows = carry_table(carries);
    let dribble_rows = dribble_table(dribbles);

    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Carries")?;
        write_rows(sheet, &carry_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Dribbles")?;
        write_rows(sheet, &dribble_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("About")?;
        write_rows(
            sheet,
            &[
                vec![text("Generated at"), text(&generated_at)],
                vec![text("Players with carries"), Cell::Number(carries.len() as f64)],
                vec![text("Players with dribbles"), Cell::Number(dribbles.len() as f64)],
            ],
        )?;
    }

    workbook
        .save(path)
        .with_context(|| format!("failed writing workbook to {}", path.display()))?;

    Ok(ExportReport {
        carry_rows: carry_rows.len().saturating_sub(1),
        dribble_rows: dribble_rows.len().saturating_sub(1),
        generated_at,
    })
}

fn carry_table(rows: &[PlayerCarrySummary]) -> Vec<Vec<Cell>> {
    let mut out = vec![
        [
            "Player",
            "Nr. of Carries",
            "Matches Played",
            "Total Distance Carried",
            "Max. Distance in One Match",
            "Avg. Distance per Match",
        ]
        .into_iter()
        .map(text)
        .collect::<Vec<_>>(),
    ];
    out.extend(rows.iter().map(|r| {
        vec![
            text(&r.player_name),
            Cell::Number(r.carry_count as f64),
            Cell::Number(r.matches_played as f64),
            Cell::Number(r.total_distance as f64),
            Cell::Number(r.max_distance_single_match as f64),
            Cell::Number(r.avg_distance_per_match),
        ]
    }));
    out
}

fn dribble_table(rows: &[PlayerDribbleSummary]) -> Vec<Vec<Cell>> {
    let mut header = vec![text("Index")];
    header.extend(
        [
            DribbleColumn::Player,
            DribbleColumn::Complete,
            DribbleColumn::Incomplete,
            DribbleColumn::Total,
            DribbleColumn::SuccessRate,
            DribbleColumn::MatchesPlayed,
            DribbleColumn::DribblesPerMatch,
            DribbleColumn::SuccessRateRank,
            DribbleColumn::DribblesPerMatchRank,
        ]
        .into_iter()
        .map(|c| text(c.label())),
    );

    let mut out = vec![header];
    out.extend(rows.iter().enumerate().map(|(idx, r)| {
        vec![
            Cell::Number(idx as f64),
            text(&r.player_name),
            Cell::Number(r.complete as f64),
            Cell::Number(r.incomplete as f64),
            Cell::Number(r.total as f64),
            opt_number(r.success_rate),
            Cell::Number(r.matches_played as f64),
            Cell::Number(r.dribbles_per_match),
            opt_number(r.success_rate_rank),
            opt_number(r.dribbles_per_match_rank),
        ]
    }));
    out
}

fn text(value: &str) -> Cell {
    Cell::Text(value.to_string())
}

fn opt_number(value: Option<f64>) -> Cell {
    value.map_or(Cell::Empty, Cell::Number)
}

fn write_rows(worksheet: &mut Worksheet, rows: &[Vec<Cell>]) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            let (r, c) = (row_idx as u32, col_idx as u16);
            match value {
                Cell::Text(s) => worksheet.write_string(r, c, s).map(|_| ()),
                Cell::Number(n) => worksheet.write_number(r, c, *n).map(|_| ()),
                Cell::Empty => Ok(()),
            }
            .with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
        }
    }
    Ok(())
}
