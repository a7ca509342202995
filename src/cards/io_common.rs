use calamine::Data;

/// The text of a spreadsheet cell.
///
/// Whole numbers are written without decimals: a bib typed as `101` is stored
/// as the float `101.0` in most workbooks.
pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        Data::Empty => String::new(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        x => x.to_string(),
    }
}

/// A session token turned into something safe to put in a file name.
pub fn file_safe(s: &str) -> String {
    let res: String = s
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if res.is_empty() {
        "_".to_string()
    } else {
        res
    }
}
