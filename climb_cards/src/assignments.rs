use log::debug;

use crate::config::ClimbAssignments;
use crate::registration::cell;

/// Reads the climb assignment table: a header row, then rows of
/// (category, comma-separated list of climbs).
///
/// Rows with an empty category or an empty list are not assigned yet and are
/// skipped. The climbs keep the order and the duplicates of the input; empty
/// items such as in `101,,103` are kept as well. The last row for a category
/// wins.
pub fn parse_climb_assignments(rows: &[Vec<String>]) -> ClimbAssignments {
    let mut res = ClimbAssignments::new();
    for (idx, row) in rows.iter().enumerate().skip(1) {
        let category = cell(row, Some(0));
        let climbs = cell(row, Some(1));
        if category.is_empty() || climbs.is_empty() {
            debug!(
                "parse_climb_assignments: row {}: no assignment: {:?}",
                idx, row
            );
            continue;
        }
        let climb_ids: Vec<String> = climbs.split(',').map(|s| s.trim().to_string()).collect();
        debug!(
            "parse_climb_assignments: category {:?}: {:?}",
            category, climb_ids
        );
        if let Some(previous) = res.insert(category.to_string(), climb_ids) {
            debug!(
                "parse_climb_assignments: category {:?} assigned again, dropping {:?}",
                category, previous
            );
        }
    }
    res
}
