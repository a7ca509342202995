use log::{debug, info};

use crate::config::{ClimberRecord, ParsedRegistrations, SkipReason};
use crate::parse::first_digit_run;

pub const NO_SESSION_REASON: &str = "No session information found";
pub const NO_TICKET_REASON: &str = "No registration/ticket information found";

/// The delimiter used when a whole row was exported into a single cell.
pub const ROW_DELIMITER: char = ',';

const TICKET_SUFFIXES: [&str; 3] = [" boulder ticket", " lead ticket", " rope ticket"];

/// Returns the cells of a row as a flat list.
///
/// Some exports put a whole row in the first cell, joined by the delimiter.
/// Such a row is split; any other row is returned as is. Every row is
/// looked at on its own, since both forms can appear in the same table.
pub fn normalize_row(row: &[String], delimiter: char) -> Vec<String> {
    match row.split_first() {
        Some((first, rest))
            if first.contains(delimiter) && rest.iter().all(|c| c.trim().is_empty()) =>
        {
            first.split(delimiter).map(|s| s.to_string()).collect()
        }
        _ => row.to_vec(),
    }
}

/// The trimmed content of a cell, or an empty string for a missing column or a short row.
pub(crate) fn cell(row: &[String], idx: Option<usize>) -> &str {
    idx.and_then(|i| row.get(i)).map(|s| s.trim()).unwrap_or("")
}

#[derive(Eq, PartialEq, Debug, Clone)]
struct TicketColumn {
    index: usize,
    category: String,
}

fn ticket_category(header: &str) -> Option<String> {
    if header.contains("status") {
        return None;
    }
    TICKET_SUFFIXES
        .iter()
        .find_map(|suffix| header.strip_suffix(suffix))
        .map(|c| c.trim().to_string())
}

fn ticket_columns(header: &[String]) -> Vec<TicketColumn> {
    header
        .iter()
        .enumerate()
        .filter_map(|(index, name)| {
            ticket_category(name).map(|category| TicketColumn { index, category })
        })
        .collect()
}

/// The result of looking at the tickets of one named climber.
enum Registration {
    Found { category: String, session: String },
    MissingSession { category: String },
    NotFound,
}

/// The session of a ticket cell: its first number, or else its whole text.
fn session_token(value: &str) -> Option<&str> {
    let session = first_digit_run(value).unwrap_or(value).trim();
    if session.is_empty() {
        None
    } else {
        Some(session)
    }
}

fn find_registration(row: &[String], tickets: &[TicketColumn]) -> Registration {
    for ticket in tickets {
        let value = cell(row, Some(ticket.index));
        if value.is_empty() {
            continue;
        }
        // Only the first ticket counts, even if the climber has several.
        // Cells are trimmed, so a filled ticket always has a session: the
        // missing session case only guards the cells that reach this point.
        return match session_token(value) {
            Some(session) => Registration::Found {
                category: ticket.category.clone(),
                session: session.to_string(),
            },
            None => Registration::MissingSession {
                category: ticket.category.clone(),
            },
        };
    }
    Registration::NotFound
}

/// Parses the registration table.
///
/// The first row is the header. It must contain the `firstname`, `lastname`
/// and `bib` columns, and one column per category with a name ending with
/// ` boulder ticket`, ` lead ticket` or ` rope ticket`. Rows are either split
/// in cells or joined by `delimiter` in their first cell.
///
/// Malformed rows never fail the parsing: they are reported in the skipped list.
/// Rows without any name are ignored.
pub fn parse_registrations(rows: &[Vec<String>], delimiter: char) -> ParsedRegistrations {
    let mut res = ParsedRegistrations::default();
    let header: Vec<String> = match rows.first() {
        Some(h) => normalize_row(h, delimiter)
            .iter()
            .map(|s| s.trim().to_string())
            .collect(),
        None => return res,
    };
    debug!("parse_registrations: header: {:?}", header);

    let column = |name: &str| header.iter().position(|h| h == name);
    let first_idx = column("firstname");
    let last_idx = column("lastname");
    let bib_idx = column("bib");
    let tickets = ticket_columns(&header);
    debug!(
        "parse_registrations: firstname: {:?} lastname: {:?} bib: {:?} tickets: {:?}",
        first_idx, last_idx, bib_idx, tickets
    );

    for (idx, raw_row) in rows.iter().enumerate().skip(1) {
        let row = normalize_row(raw_row, delimiter);
        let first_name = cell(&row, first_idx);
        let last_name = cell(&row, last_idx);
        if first_name.is_empty() && last_name.is_empty() {
            continue;
        }
        let full_name = format!("{} {}", first_name, last_name).trim().to_string();

        match find_registration(&row, &tickets) {
            Registration::Found { category, session } => {
                let climber = ClimberRecord {
                    first_name: first_name.to_string(),
                    last_name: last_name.to_string(),
                    full_name,
                    bib: cell(&row, bib_idx).to_string(),
                    category,
                    session,
                };
                debug!("parse_registrations: row {}: {:?}", idx, climber);
                res.valid.push(climber);
            }
            Registration::MissingSession { category } => {
                info!(
                    "parse_registrations: row {}: {}: no session in ticket for {}",
                    idx, full_name, category
                );
                res.skipped.push(SkipReason {
                    name: full_name,
                    category: Some(category),
                    reason: NO_SESSION_REASON.to_string(),
                });
            }
            Registration::NotFound => {
                info!("parse_registrations: row {}: {}: no ticket", idx, full_name);
                res.skipped.push(SkipReason {
                    name: full_name,
                    category: None,
                    reason: NO_TICKET_REASON.to_string(),
                });
            }
        }
    }
    res
}
