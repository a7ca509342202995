use calamine::{open_workbook, Reader, Xlsx};
use std::fs::File;
use std::io::BufReader;

use crate::cards::{io_common::cell_to_string, *};

type Workbook = Xlsx<BufReader<File>>;

/// Reads the three input tables from the worksheets of an Excel workbook.
pub fn read_tables(path: &str, names: &TableNames) -> CardResult<InputTables> {
    debug!("io_excel::read_tables: path: {:?} names: {:?}", path, names);
    let mut workbook: Workbook = open_workbook(path).context(OpeningExcelSnafu { path })?;
    Ok(InputTables {
        settings: read_sheet(&mut workbook, path, &names.settings)?,
        climbs: read_sheet(&mut workbook, path, &names.climbs)?,
        registration: read_sheet(&mut workbook, path, &names.registration)?,
    })
}

fn read_sheet(workbook: &mut Workbook, path: &str, name: &str) -> CardResult<Vec<Vec<String>>> {
    if !workbook.sheet_names().iter().any(|n| n == name) {
        return MissingTableSnafu { name, path }.fail();
    }
    let wrange = workbook
        .worksheet_range(name)
        .context(OpeningExcelSnafu { path })?;
    let rows: Vec<Vec<String>> = wrange
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect();
    debug!(
        "io_excel::read_sheet: {}: {} rows, header: {:?}",
        name,
        rows.len(),
        rows.first()
    );
    Ok(rows)
}
