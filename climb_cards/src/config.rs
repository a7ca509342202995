// ********* Input data structures ***********

use std::collections::HashMap;
use std::error::Error;
use std::fmt::Display;

/// A climber that registered for exactly one category and one session.
///
/// Records are only built by the registration parser and are not modified
/// afterwards.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ClimberRecord {
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub bib: String,
    /// Competition category, for example `F12`, `M40` or `U`.
    pub category: String,
    /// Session token, usually a number.
    pub session: String,
}

/// The category of a climber to the list of climbs (in order) printed on the card.
pub type ClimbAssignments = HashMap<String, Vec<String>>;

/// The kind of event. It only controls the label of the climb rows.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum EventKind {
    Boulder,
    Rope,
}

impl EventKind {
    /// Parses the event kind as written in the settings table.
    /// The comparison is case-insensitive and ignores surrounding whitespace.
    pub fn parse(s: &str) -> Result<EventKind, CardErrors> {
        match s.trim().to_lowercase().as_str() {
            "boulder" => Ok(EventKind::Boulder),
            "rope" => Ok(EventKind::Rope),
            _ => Err(CardErrors::InvalidEventKind(s.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Boulder => "boulder",
            EventKind::Rope => "rope",
        }
    }

    pub fn climb_label(&self) -> &'static str {
        match self {
            EventKind::Boulder => "Boulder",
            EventKind::Rope => "Climb",
        }
    }
}

/// The maximum number of attempts that fit on a card.
pub const MAX_ATTEMPTS: u32 = 10;

/// The settings of one run, as read from the configuration table.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct CardSettings {
    pub event_name: String,
    /// How many climbs to print at most on each card.
    pub climb_count: u32,
    /// How many attempt boxes to print for each climb. Values above
    /// `MAX_ATTEMPTS` are clamped when laying out the cards.
    pub attempt_count: u32,
    pub event_kind: EventKind,
    /// Free text printed at the bottom of each card. Empty means no notes.
    pub scoring_notes: Option<String>,
}

impl CardSettings {
    pub fn effective_attempts(&self) -> u32 {
        self.attempt_count.min(MAX_ATTEMPTS)
    }

    pub fn notes(&self) -> Option<&str> {
        self.scoring_notes
            .as_deref()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
    }
}

// ******** Output data structures *********

/// Why a climber did not get a card.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct SkipReason {
    pub name: String,
    pub category: Option<String>,
    pub reason: String,
}

impl SkipReason {
    /// The category as displayed in the reports.
    pub fn category_label(&self) -> &str {
        self.category.as_deref().unwrap_or("Unknown")
    }
}

/// The outcome of parsing the registration table.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct ParsedRegistrations {
    pub valid: Vec<ClimberRecord>,
    pub skipped: Vec<SkipReason>,
}

/// A card that was written on the output grid.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct PlacedCard {
    pub name: String,
    /// First row of the card on the grid.
    pub first_row: usize,
    /// Number of grid rows written for the content of the card (without padding).
    pub rows_emitted: usize,
    /// Row units consumed by the content: double height rows count for 2.
    pub units_used: u32,
    /// The number of row units the card was padded to.
    pub target_units: u32,
    /// True if the content did not fit in the target.
    pub overflow: bool,
}

/// Statistics of a run.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RunSummary {
    pub cards_generated: usize,
    pub skipped: Vec<SkipReason>,
}

/// Errors that prevent a run from completing.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum CardErrors {
    /// A required entry of the settings table is absent or empty.
    MissingSetting(String),
    /// A settings entry is present but cannot be used (name, value).
    InvalidSetting(String, String),
    InvalidEventKind(String),
    /// The registration table did not produce a single valid climber.
    NoValidClimbers,
}

impl Error for CardErrors {}

impl Display for CardErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CardErrors::MissingSetting(name) => {
                write!(f, "Missing required setting '{}'", name)
            }
            CardErrors::InvalidSetting(name, value) => {
                write!(f, "Invalid value for setting '{}': {:?}", name, value)
            }
            CardErrors::InvalidEventKind(value) => write!(
                f,
                "Invalid event type {:?}: expected 'boulder' or 'rope'",
                value
            ),
            CardErrors::NoValidClimbers => {
                write!(f, "No valid climbers found in the registration data")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_kind_is_case_insensitive() {
        assert_eq!(EventKind::parse(" Boulder "), Ok(EventKind::Boulder));
        assert_eq!(EventKind::parse("ROPE"), Ok(EventKind::Rope));
        assert_eq!(
            EventKind::parse("lead"),
            Err(CardErrors::InvalidEventKind("lead".to_string()))
        );
    }

    #[test]
    fn attempts_are_capped() {
        let settings = CardSettings {
            event_name: "Open".to_string(),
            climb_count: 5,
            attempt_count: 12,
            event_kind: EventKind::Rope,
            scoring_notes: Some("   ".to_string()),
        };
        assert_eq!(settings.effective_attempts(), 10);
        assert_eq!(settings.notes(), None);
    }
}
