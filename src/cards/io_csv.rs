// Primitives for reading and writing CSV files.

use std::path::{Path, PathBuf};

use crate::cards::*;

fn table_path(dir: &str, name: &str) -> PathBuf {
    [dir, format!("{}.csv", name.to_lowercase()).as_str()]
        .iter()
        .collect()
}

/// Reads the three input tables from `<dir>/settings.csv`, `<dir>/climbs.csv`
/// and `<dir>/registration.csv` (or the lowercase names given).
pub fn read_tables(dir: &str, names: &TableNames) -> CardResult<InputTables> {
    Ok(InputTables {
        settings: read_table(dir, &names.settings)?,
        climbs: read_table(dir, &names.climbs)?,
        registration: read_table(dir, &names.registration)?,
    })
}

fn read_table(dir: &str, name: &str) -> CardResult<Vec<Vec<String>>> {
    let p = table_path(dir, name);
    let path = p.display().to_string();
    if !p.exists() {
        return MissingTableSnafu { name, path: dir }.fail();
    }
    info!("Attempting to read table file {:?}", path);
    // Rows do not all have the same length, and the header is a regular row here.
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(&p)
        .context(CsvReadSnafu { path: path.clone() })?;
    let mut res: Vec<Vec<String>> = Vec::new();
    for (idx, record_r) in rdr.into_records().enumerate() {
        let record = record_r.context(CsvReadSnafu { path: path.clone() })?;
        debug!("read_table: {:?} {:?}", idx + 1, record);
        res.push(record.iter().map(|s| s.to_string()).collect());
    }
    Ok(res)
}

/// Writes rows of values in a CSV file.
pub fn write_rows(path: &Path, rows: &[Vec<String>]) -> CardResult<()> {
    let path_s = path.display().to_string();
    let mut wtr = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(path)
        .context(CsvWriteSnafu {
            path: path_s.clone(),
        })?;
    for row in rows {
        wtr.write_record(row).context(CsvWriteSnafu {
            path: path_s.clone(),
        })?;
    }
    wtr.flush().context(WritingOutputSnafu { path: path_s })?;
    Ok(())
}
