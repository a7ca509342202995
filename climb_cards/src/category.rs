use std::cmp::Ordering;

use deunicode::deunicode;

use crate::parse::embedded_int;

// Rank for any gender code that is not F, M or U.
const OTHER_GENDER_RANK: u8 = 3;

fn gender_rank(category: &str) -> u8 {
    match category.chars().next() {
        Some('F') => 0,
        Some('M') => 1,
        Some('U') => 2,
        _ => OTHER_GENDER_RANK,
    }
}

fn age(category: &str) -> u32 {
    let mut chars = category.chars();
    chars.next();
    embedded_int(chars.as_str()).value
}

/// Orders competition categories: by gender first (F, M, U, then anything
/// else), then by age, youngest first.
///
/// This never fails: malformed categories get an age of 0.
pub fn compare_categories(a: &str, b: &str) -> Ordering {
    gender_rank(a)
        .cmp(&gender_rank(b))
        .then_with(|| age(a).cmp(&age(b)))
}

/// Compares last names the way a reader expects them in a list: accents and
/// case are ignored first (`Élodie` sits with the `E`s). Names that only
/// differ by accents, then by case, are ordered by their exact text so that
/// the order stays total.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    deunicode(a)
        .to_lowercase()
        .cmp(&deunicode(b).to_lowercase())
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| a.cmp(b))
}
