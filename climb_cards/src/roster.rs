use std::collections::BTreeMap;

use log::debug;

use crate::category::{compare_categories, compare_names};
use crate::config::ClimberRecord;
use crate::ordering::session_number;
use crate::sheet::{CellStyle, Sheet, SheetError};

pub const ROSTER_HEADER: [&str; 5] = ["Name", "Category", "Session", "Bib #", "Checked In"];

/// The check-in list of one session.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Roster {
    pub session: String,
    /// One row per climber, following the columns of `ROSTER_HEADER`.
    pub rows: Vec<[String; 5]>,
}

impl Roster {
    /// Writes the roster, header first, at the top left of the sheet.
    pub fn render(&self, sheet: &mut dyn Sheet) -> Result<(), SheetError> {
        let header_style = CellStyle::PLAIN.bold();
        for (col, title) in ROSTER_HEADER.iter().enumerate() {
            sheet.write_cell(0, col, title, header_style)?;
        }
        for (idx, row) in self.rows.iter().enumerate() {
            for (col, value) in row.iter().enumerate() {
                sheet.write_cell(idx + 1, col, value, CellStyle::PLAIN)?;
            }
        }
        Ok(())
    }
}

/// Builds one roster per session, by increasing session number.
///
/// Within a session, climbers are ordered by category, then by last name.
/// The check-in column is left empty.
pub fn build_rosters(climbers: &[ClimberRecord]) -> Vec<Roster> {
    let mut by_session: BTreeMap<(i64, String), Vec<&ClimberRecord>> = BTreeMap::new();
    for c in climbers {
        by_session
            .entry((session_number(&c.session), c.session.clone()))
            .or_default()
            .push(c);
    }

    by_session
        .into_iter()
        .map(|((_, session), mut members)| {
            members.sort_by(|a, b| {
                compare_categories(&a.category, &b.category)
                    .then_with(|| compare_names(&a.last_name, &b.last_name))
            });
            debug!("build_rosters: session {}: {} climbers", session, members.len());
            Roster {
                session,
                rows: members
                    .iter()
                    .map(|c| {
                        [
                            c.full_name.clone(),
                            c.category.clone(),
                            c.session.clone(),
                            c.bib.clone(),
                            String::new(),
                        ]
                    })
                    .collect(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::GridSheet;

    fn climber(first: &str, last: &str, category: &str, session: &str) -> ClimberRecord {
        ClimberRecord {
            first_name: first.to_string(),
            last_name: last.to_string(),
            full_name: format!("{} {}", first, last),
            bib: format!("{}{}", first.len(), last.len()),
            category: category.to_string(),
            session: session.to_string(),
        }
    }

    #[test]
    fn one_roster_per_session() {
        let climbers = vec![
            climber("Ada", "Ondra", "M10", "10"),
            climber("Tom", "Sharp", "F12", "2"),
            climber("Lee", "Kim", "F10", "2"),
            climber("Sam", "Adams", "M10", "10"),
        ];
        let rosters = build_rosters(&climbers);
        let sessions: Vec<&str> = rosters.iter().map(|r| r.session.as_str()).collect();
        assert_eq!(sessions, vec!["2", "10"]);
        let names: Vec<&str> = rosters[0].rows.iter().map(|r| r[0].as_str()).collect();
        assert_eq!(names, vec!["Lee Kim", "Tom Sharp"]);
        let names: Vec<&str> = rosters[1].rows.iter().map(|r| r[0].as_str()).collect();
        assert_eq!(names, vec!["Sam Adams", "Ada Ondra"]);
        let total: usize = rosters.iter().map(|r| r.rows.len()).sum();
        assert_eq!(total, climbers.len());
        assert!(rosters.iter().flat_map(|r| r.rows.iter()).all(|r| r[4].is_empty()));
    }

    #[test]
    fn sessions_with_same_number_stay_apart() {
        let climbers = vec![
            climber("Ada", "Ondra", "M10", "03"),
            climber("Tom", "Sharp", "F12", "3"),
            climber("Lee", "Kim", "F10", "evening"),
        ];
        let rosters = build_rosters(&climbers);
        let sessions: Vec<&str> = rosters.iter().map(|r| r.session.as_str()).collect();
        assert_eq!(sessions, vec!["evening", "03", "3"]);
    }

    #[test]
    fn renders_on_a_sheet() {
        let rosters = build_rosters(&[climber("Ada", "Ondra", "F10", "1")]);
        let mut sheet = GridSheet::new("Session 1");
        rosters[0].render(&mut sheet).unwrap();
        assert_eq!(
            sheet.to_rows(),
            vec![
                vec!["Name", "Category", "Session", "Bib #", "Checked In"],
                vec!["Ada Ondra", "F10", "1", "35", ""],
            ]
        );
        assert!(sheet.cell(0, 0).unwrap().style.bold);
    }
}
