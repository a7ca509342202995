/*!
Scorecards and check-in rosters for climbing competitions.

This crate takes the registration export of a competition and the climbs
assigned to each category, and produces one printable scorecard per climber
as well as one check-in roster per session. It does not score anything.

The pipeline is:
- [`read_settings`] reads the settings table
- [`parse_climb_assignments`] reads which climbs each category attempts
- [`parse_registrations`] turns the registration table into climbers
- [`sort_climbers`] puts them in competition order
- [`layout_cards`] writes the cards on a [`Sheet`]
- [`build_rosters`] groups the climbers by session

[`run_cards`] chains all of these. See the [`manual`] for the formats of
the input tables.
*/

mod assignments;
mod category;
mod config;
mod layout;
pub mod manual;
mod ordering;
pub mod parse;
mod registration;
mod roster;
mod settings;
pub mod sheet;

use log::{info, warn};

pub use crate::assignments::parse_climb_assignments;
pub use crate::category::{compare_categories, compare_names};
pub use crate::config::*;
pub use crate::layout::{
    layout_cards, CardLayout, LayoutResult, CARD_COLUMNS, FIRST_CARD_UNITS, NO_CLIMBS_REASON,
    SECOND_CARD_UNITS,
};
pub use crate::ordering::{compare_climbers, session_number, sort_climbers};
pub use crate::registration::{
    normalize_row, parse_registrations, NO_SESSION_REASON, NO_TICKET_REASON, ROW_DELIMITER,
};
pub use crate::roster::{build_rosters, Roster, ROSTER_HEADER};
pub use crate::settings::read_settings;
pub use crate::sheet::{GridSheet, Sheet, SheetError};

/// Everything produced by one run.
#[derive(PartialEq, Debug, Clone)]
pub struct CardRun {
    /// The valid climbers, in competition order.
    pub climbers: Vec<ClimberRecord>,
    pub cards: Vec<PlacedCard>,
    pub rosters: Vec<Roster>,
    pub summary: RunSummary,
}

/// Runs the whole pipeline on tables of cells.
///
/// Arguments:
/// * `settings` the settings of the event
/// * `climb_rows` the climb assignment table, header included
/// * `registration_rows` the registration table, header included
/// * `delimiter` the delimiter of the registration rows exported in a single cell
/// * `cards` the sheet receiving the scorecards
///
/// Fails without writing anything if no climber could be read. Otherwise, the
/// climbers that could not get a card are listed in the summary.
pub fn run_cards(
    settings: &CardSettings,
    climb_rows: &[Vec<String>],
    registration_rows: &[Vec<String>],
    delimiter: char,
    cards: &mut dyn Sheet,
) -> Result<CardRun, CardErrors> {
    let assignments = parse_climb_assignments(climb_rows);
    info!("run_cards: {} categories with climbs", assignments.len());

    let parsed = parse_registrations(registration_rows, delimiter);
    info!(
        "run_cards: {} climbers registered, {} rows skipped",
        parsed.valid.len(),
        parsed.skipped.len()
    );
    if parsed.valid.is_empty() {
        return Err(CardErrors::NoValidClimbers);
    }

    let climbers = sort_climbers(&parsed.valid);
    let layout = layout_cards(cards, &climbers, &assignments, settings);
    let rosters = build_rosters(&climbers);

    let mut skipped = parsed.skipped;
    skipped.extend(layout.skipped);
    if !skipped.is_empty() {
        warn!(
            "run_cards: {} climbers did not get a scorecard",
            skipped.len()
        );
    }
    let summary = RunSummary {
        cards_generated: layout.cards.len(),
        skipped,
    };
    Ok(CardRun {
        climbers,
        cards: layout.cards,
        rosters,
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    fn settings() -> CardSettings {
        CardSettings {
            event_name: "Youth Series".to_string(),
            climb_count: 5,
            attempt_count: 5,
            event_kind: EventKind::Boulder,
            scoring_notes: None,
        }
    }

    #[test]
    fn two_climbers_one_session() {
        let _ = env_logger::builder().is_test(true).try_init();
        let climbs = vec![
            row(&["Category", "Climbs"]),
            row(&["F10", "1, 2, 3"]),
            row(&["M10", "4, 5, 6"]),
        ];
        let registrations = vec![
            row(&["firstname", "lastname", "bib", "M10 boulder ticket", "F10 boulder ticket"]),
            row(&["Tom", "Sharp", "7", "Session 3", ""]),
            row(&["Ada", "Ondra", "12", "", "Session 3"]),
        ];
        let mut sheet = GridSheet::new("Scorecards");
        let run = run_cards(&settings(), &climbs, &registrations, ROW_DELIMITER, &mut sheet).unwrap();

        let order: Vec<&str> = run.climbers.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(order, vec!["F10", "M10"]);

        assert_eq!(run.rosters.len(), 1);
        assert_eq!(run.rosters[0].session, "3");
        let names: Vec<&str> = run.rosters[0].rows.iter().map(|r| r[0].as_str()).collect();
        assert_eq!(names, vec!["Ada Ondra", "Tom Sharp"]);

        assert_eq!(run.summary.cards_generated, 2);
        assert!(run.summary.skipped.is_empty());
        let units = 1 + 2 + 2 + 1 + 3 * 2;
        assert_eq!(run.cards[0].target_units, 33);
        assert_eq!(run.cards[1].target_units, 34);
        assert_eq!(run.cards[1].first_row, 7 + (33 - units) as usize + 1);
        // No gap after the last card: nothing is written past its content.
        assert_eq!(sheet.num_rows(), run.cards[1].first_row + 7);
        assert_eq!(sheet.value(run.cards[1].first_row + 4, 0), Some("Boulder 4"));
    }

    #[test]
    fn no_valid_climbers() {
        let registrations = vec![
            row(&["firstname", "lastname", "bib", "F10 boulder ticket"]),
            row(&["Ada", "Ondra", "12", ""]),
        ];
        let mut sheet = GridSheet::new("Scorecards");
        let res = run_cards(&settings(), &[], &registrations, ROW_DELIMITER, &mut sheet);
        assert_eq!(res, Err(CardErrors::NoValidClimbers));
        assert_eq!(sheet.num_rows(), 0);
    }

    #[test]
    fn skipped_climbers_are_collected() {
        let climbs = vec![row(&["Category", "Climbs"]), row(&["F10", "1"])];
        let registrations = vec![
            row(&["firstname", "lastname", "bib", "F10 boulder ticket", "M12 boulder ticket"]),
            row(&["Ada", "Ondra", "12", "1", ""]),
            row(&["Tom", "Sharp", "7", "", "1"]),
            row(&["Lee", "Kim", "8", "", ""]),
        ];
        let mut sheet = GridSheet::new("Scorecards");
        let run = run_cards(&settings(), &climbs, &registrations, ROW_DELIMITER, &mut sheet).unwrap();
        assert_eq!(run.summary.cards_generated, 1);
        let reasons: Vec<(&str, &str, &str)> = run
            .summary
            .skipped
            .iter()
            .map(|s| (s.name.as_str(), s.category_label(), s.reason.as_str()))
            .collect();
        assert_eq!(
            reasons,
            vec![
                ("Lee Kim", "Unknown", NO_TICKET_REASON),
                ("Tom Sharp", "M12", NO_CLIMBS_REASON),
            ]
        );
        // Both registered climbers are on the roster, with or without a card.
        assert_eq!(run.rosters[0].rows.len(), 2);
    }
}
