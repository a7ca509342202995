use log::debug;

use crate::config::{CardErrors, CardSettings, EventKind};
use crate::parse::whole_int;
use crate::registration::cell;

pub const EVENT_NAME_KEY: &str = "Event Name";
pub const CLIMB_COUNT_KEY: &str = "Climb Count";
pub const ATTEMPT_COUNT_KEY: &str = "Attempt Count";
pub const EVENT_TYPE_KEY: &str = "Event Type";
pub const SCORING_NOTES_KEY: &str = "Scoring Notes";

fn lookup<'a>(rows: &'a [Vec<String>], key: &str) -> Option<&'a str> {
    rows.iter()
        .find(|row| cell(row, Some(0)).eq_ignore_ascii_case(key))
        .map(|row| cell(row, Some(1)))
        .filter(|v| !v.is_empty())
}

fn required<'a>(rows: &'a [Vec<String>], key: &str) -> Result<&'a str, CardErrors> {
    lookup(rows, key).ok_or_else(|| CardErrors::MissingSetting(key.to_string()))
}

fn positive_count(rows: &[Vec<String>], key: &str) -> Result<u32, CardErrors> {
    let raw = required(rows, key)?;
    let parsed = whole_int(raw);
    match u32::try_from(parsed.value) {
        Ok(x) if x > 0 && !parsed.defaulted => Ok(x),
        _ => Err(CardErrors::InvalidSetting(key.to_string(), raw.to_string())),
    }
}

/// Reads the settings table: rows of (name, value). Names are matched
/// without regard to case, and rows with unknown names (such as a header) are ignored.
pub fn read_settings(rows: &[Vec<String>]) -> Result<CardSettings, CardErrors> {
    let settings = CardSettings {
        event_name: required(rows, EVENT_NAME_KEY)?.to_string(),
        climb_count: positive_count(rows, CLIMB_COUNT_KEY)?,
        attempt_count: positive_count(rows, ATTEMPT_COUNT_KEY)?,
        event_kind: EventKind::parse(required(rows, EVENT_TYPE_KEY)?)?,
        scoring_notes: lookup(rows, SCORING_NOTES_KEY).map(|s| s.to_string()),
    };
    debug!("read_settings: {:?}", settings);
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[[&str; 2]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|r| r.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    fn complete() -> Vec<[&'static str; 2]> {
        vec![
            ["Setting", "Value"],
            ["Event Name", "Spring League"],
            ["climb count", "5"],
            ["Attempt Count", "6.0"],
            ["Event Type", " Boulder "],
        ]
    }

    #[test]
    fn reads_all_settings() {
        let mut rows = complete();
        rows.push(["Scoring Notes", "Top = 25 points"]);
        let s = read_settings(&table(&rows)).unwrap();
        assert_eq!(
            s,
            CardSettings {
                event_name: "Spring League".to_string(),
                climb_count: 5,
                attempt_count: 6,
                event_kind: EventKind::Boulder,
                scoring_notes: Some("Top = 25 points".to_string()),
            }
        );
    }

    #[test]
    fn notes_are_optional() {
        let s = read_settings(&table(&complete())).unwrap();
        assert_eq!(s.scoring_notes, None);
    }

    #[test]
    fn missing_setting() {
        let rows: Vec<[&str; 2]> = complete()
            .into_iter()
            .filter(|r| r[0] != "Event Name")
            .collect();
        assert_eq!(
            read_settings(&table(&rows)),
            Err(CardErrors::MissingSetting("Event Name".to_string()))
        );
    }

    #[test]
    fn invalid_counts() {
        for bad in ["0", "-1", "many", "2.5"] {
            let mut rows = complete();
            rows[2] = ["Climb Count", bad];
            assert_eq!(
                read_settings(&table(&rows)),
                Err(CardErrors::InvalidSetting(
                    "Climb Count".to_string(),
                    bad.to_string()
                ))
            );
        }
    }

    #[test]
    fn invalid_event_type() {
        let mut rows = complete();
        rows[4] = ["Event Type", "speed"];
        assert_eq!(
            read_settings(&table(&rows)),
            Err(CardErrors::InvalidEventKind("speed".to_string()))
        );
    }
}
