//! Parsing of loosely typed cell values.
//!
//! Cells coming from spreadsheets carry untyped text. Numeric values are
//! parsed explicitly here, and the caller can see whether the default was used.

/// A parsed value, along with a flag telling if the input could not be
/// understood and the default was used instead.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct Parsed<T> {
    pub value: T,
    pub defaulted: bool,
}

impl<T> Parsed<T> {
    fn found(value: T) -> Parsed<T> {
        Parsed {
            value,
            defaulted: false,
        }
    }

    fn default_to(value: T) -> Parsed<T> {
        Parsed {
            value,
            defaulted: true,
        }
    }
}

/// The first run of ASCII digits in the string, if any.
pub fn first_digit_run(s: &str) -> Option<&str> {
    let start = s.find(|c: char| c.is_ascii_digit())?;
    let rest = &s[start..];
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    Some(&rest[..end])
}

/// Parses the first integer found anywhere in the string (`"M40+"` -> 40).
/// Defaults to 0 when there are no digits or when the number is too large.
pub fn embedded_int(s: &str) -> Parsed<u32> {
    match first_digit_run(s).map(|d| d.parse::<u32>()) {
        Some(Ok(x)) => Parsed::found(x),
        _ => Parsed::default_to(0),
    }
}

/// Parses a whole cell as an integer. Spreadsheet exports may write integers
/// as `3.0`, which is accepted. Anything else defaults to 0.
pub fn whole_int(s: &str) -> Parsed<i64> {
    let t = s.trim();
    if let Ok(x) = t.parse::<i64>() {
        return Parsed::found(x);
    }
    match t.parse::<f64>() {
        Ok(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
            Parsed::found(f as i64)
        }
        _ => Parsed::default_to(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digit_runs() {
        assert_eq!(first_digit_run("Session 3 (9am)"), Some("3"));
        assert_eq!(first_digit_run("12b"), Some("12"));
        assert_eq!(first_digit_run("morning"), None);
    }

    #[test]
    fn embedded_defaults() {
        assert_eq!(embedded_int("40+").value, 40);
        assert!(!embedded_int("40+").defaulted);
        assert_eq!(embedded_int(""), Parsed::default_to(0));
        assert_eq!(embedded_int("99999999999999").value, 0);
    }

    #[test]
    fn whole_ints() {
        assert_eq!(whole_int(" 3 ").value, 3);
        assert_eq!(whole_int("3.0").value, 3);
        assert!(whole_int("3.5").defaulted);
        assert!(whole_int("evening").defaulted);
        assert_eq!(whole_int("-2").value, -2);
    }
}
