use std::collections::HashSet;
use std::path::Path;

use crate::cards::{io_common::file_safe, io_csv::write_rows, *};

pub const CARDS_JSON_FILE: &str = "scorecards.json";
pub const CARDS_CSV_FILE: &str = "scorecards.csv";
pub const SUMMARY_FILE: &str = "summary.json";
const ROSTER_PREFIX: &str = "checkin_session_";

pub fn roster_file_name(session: &str) -> String {
    format!("{}{}.csv", ROSTER_PREFIX, file_safe(session))
}

/// One file name per roster. Sessions that only differ by characters that
/// cannot go in a file name get a numbered suffix, in roster order.
fn roster_file_names(rosters: &[Roster]) -> Vec<String> {
    let mut used: HashSet<String> = HashSet::new();
    let mut res = Vec::with_capacity(rosters.len());
    for roster in rosters {
        let base = file_safe(&roster.session);
        let mut name = roster_file_name(&roster.session);
        let mut n = 1;
        while used.contains(&name) {
            n += 1;
            name = format!("{}{}_{}.csv", ROSTER_PREFIX, base, n);
        }
        if n > 1 {
            warn!(
                "roster_file_names: session {:?} shares its file name with another session, written as {}",
                roster.session, name
            );
        }
        used.insert(name.clone());
        res.push(name);
    }
    res
}

fn sheet_to_json(sheet: &GridSheet) -> JSValue {
    let cells: Vec<JSValue> = sheet
        .cells()
        .map(|(row, col, cell)| {
            json!({
                "row": row,
                "col": col,
                "value": cell.value,
                "span": cell.span,
                "bold": cell.style.bold,
                "fontSize": cell.style.font_size,
                "border": cell.style.border,
                "align": match cell.style.align {
                    sheet::Align::Left => "left",
                    sheet::Align::Center => "center",
                },
                "wrap": cell.style.wrap,
            })
        })
        .collect();
    let heights: Vec<JSValue> = (0..sheet.num_rows())
        .map(|r| json!(sheet.row_height(r).units()))
        .collect();
    json!({
        "sheet": sheet.name,
        "columns": CARD_COLUMNS,
        "rowHeights": heights,
        "cells": cells,
    })
}

pub fn write_text(path: &Path, contents: &str) -> CardResult<()> {
    fs::write(path, contents).context(WritingOutputSnafu {
        path: path.display().to_string(),
    })
}

// Rosters of a previous run may belong to sessions that no longer exist.
fn remove_old_rosters(out_dir: &Path) -> CardResult<()> {
    let entries = fs::read_dir(out_dir).context(WritingOutputSnafu {
        path: out_dir.display().to_string(),
    })?;
    for entry in entries.flatten() {
        let name = entry.file_name().to_string_lossy().to_string();
        if name.starts_with(ROSTER_PREFIX) && name.ends_with(".csv") {
            debug!("remove_old_rosters: removing {:?}", name);
            fs::remove_file(entry.path()).context(WritingOutputSnafu { path: name })?;
        }
    }
    Ok(())
}

/// Writes the scorecards and the rosters in the output directory, replacing
/// the files of any previous run.
pub fn write_outputs(out_dir: &Path, cards: &GridSheet, rosters: &[Roster]) -> CardResult<()> {
    fs::create_dir_all(out_dir).context(WritingOutputSnafu {
        path: out_dir.display().to_string(),
    })?;

    let cards_js = serde_json::to_string_pretty(&sheet_to_json(cards)).context(SerializingJsonSnafu {
        what: CARDS_JSON_FILE,
    })?;
    write_text(&out_dir.join(CARDS_JSON_FILE), &cards_js)?;
    write_rows(&out_dir.join(CARDS_CSV_FILE), &cards.to_rows())?;
    info!(
        "write_outputs: {} rows of scorecards written in {:?}",
        cards.num_rows(),
        out_dir
    );

    remove_old_rosters(out_dir)?;
    for (roster, file_name) in rosters.iter().zip(roster_file_names(rosters)) {
        let mut sheet = GridSheet::new(&format!("Session {}", roster.session));
        roster.render(&mut sheet).context(RenderingSnafu {
            what: sheet.name.clone(),
        })?;
        let p = out_dir.join(file_name);
        write_rows(&p, &sheet.to_rows())?;
        info!(
            "write_outputs: roster of session {} ({} climbers) written in {:?}",
            roster.session,
            roster.rows.len(),
            p
        );
    }
    Ok(())
}
