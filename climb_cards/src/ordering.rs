use std::cmp::Ordering;

use crate::category::{compare_categories, compare_names};
use crate::config::ClimberRecord;
use crate::parse::whole_int;

/// The numeric value of a session token. Sessions that are not numbers count as 0.
pub fn session_number(session: &str) -> i64 {
    whole_int(session).value
}

/// The competition order: session, then category, then last name.
pub fn compare_climbers(a: &ClimberRecord, b: &ClimberRecord) -> Ordering {
    session_number(&a.session)
        .cmp(&session_number(&b.session))
        .then_with(|| compare_categories(&a.category, &b.category))
        .then_with(|| compare_names(&a.last_name, &b.last_name))
}

/// Sorts the climbers in competition order. The sort is stable.
pub fn sort_climbers(climbers: &[ClimberRecord]) -> Vec<ClimberRecord> {
    let mut res = climbers.to_vec();
    res.sort_by(compare_climbers);
    res
}
