use log::{debug, info, warn};

use climb_cards::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::Path;

use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;

mod config_reader;
mod io_common;
mod io_csv;
mod io_excel;
mod io_output;

pub use crate::cards::config_reader::*;

#[derive(Debug, Snafu)]
pub enum CardError {
    #[snafu(display("Error opening workbook {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("Missing table '{name}' in {path}"))]
    MissingTable { name: String, path: String },
    #[snafu(display("Error reading CSV file {path}"))]
    CsvRead { source: csv::Error, path: String },
    #[snafu(display("Error writing CSV file {path}"))]
    CsvWrite { source: csv::Error, path: String },
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON in {path}"))]
    ParsingJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Error serializing {what} to JSON"))]
    SerializingJson {
        source: serde_json::Error,
        what: String,
    },
    #[snafu(display("Error writing {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error rendering {what}"))]
    Rendering { source: SheetError, what: String },
    #[snafu(display("{source}"))]
    Cards { source: CardErrors },
    #[snafu(display("Difference detected between the summary and the reference {path}"))]
    ReferenceMismatch { path: String },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type CardResult<T> = Result<T, CardError>;

/// The raw content of the three input tables.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct InputTables {
    pub settings: Vec<Vec<String>>,
    pub climbs: Vec<Vec<String>>,
    pub registration: Vec<Vec<String>>,
}

fn summary_to_json(settings: &CardSettings, summary: &RunSummary) -> JSValue {
    let skipped: Vec<JSValue> = summary
        .skipped
        .iter()
        .map(|s| {
            json!({
                "name": s.name,
                "category": s.category_label(),
                "reason": s.reason,
            })
        })
        .collect();
    json!({
        "config": {
            "event": settings.event_name,
            "eventType": settings.event_kind.as_str(),
            "climbCount": settings.climb_count,
            "attemptCount": settings.effective_attempts(),
        },
        "cardsGenerated": summary.cards_generated,
        "skipped": skipped,
    })
}

fn read_tables(config: &RunConfig) -> CardResult<InputTables> {
    let input = match config.input_file.clone() {
        Some(p) => p,
        None => whatever!("No input provided: use --input or the inputFile entry of --config"),
    };
    let names = config.table_names();
    match config.input_source()? {
        InputSource::Excel => io_excel::read_tables(&input, &names),
        InputSource::Csv => io_csv::read_tables(&input, &names),
    }
}

fn check_reference(summary_js: &JSValue, reference_path: &str) -> CardResult<()> {
    let contents = fs::read_to_string(reference_path).context(OpeningJsonSnafu {
        path: reference_path,
    })?;
    let reference: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {
        path: reference_path,
    })?;
    let pretty_ref =
        serde_json::to_string_pretty(&reference).context(SerializingJsonSnafu { what: reference_path })?;
    let pretty_summary =
        serde_json::to_string_pretty(summary_js).context(SerializingJsonSnafu { what: "summary" })?;
    if pretty_ref != pretty_summary {
        warn!("Found differences with the reference summary");
        print_diff(pretty_ref.as_str(), pretty_summary.as_str(), "\n");
        return ReferenceMismatchSnafu {
            path: reference_path,
        }
        .fail();
    }
    info!("check_reference: summary matches {}", reference_path);
    Ok(())
}

/// Runs the whole process with an already assembled configuration.
///
/// All the inputs are read and checked before anything is written.
pub fn run_cards_config(config: &RunConfig, reference: Option<&str>) -> CardResult<RunSummary> {
    info!("run_cards_config: {:?}", config);
    let tables = read_tables(config)?;
    debug!(
        "run_cards_config: {} settings rows, {} climbs rows, {} registration rows",
        tables.settings.len(),
        tables.climbs.len(),
        tables.registration.len()
    );

    let settings = read_settings(&tables.settings).context(CardsSnafu {})?;
    let mut cards_sheet = GridSheet::new("Scorecards");
    let run = run_cards(
        &settings,
        &tables.climbs,
        &tables.registration,
        ROW_DELIMITER,
        &mut cards_sheet,
    )
    .context(CardsSnafu {})?;

    let out_dir = config.output_dir();
    io_output::write_outputs(&out_dir, &cards_sheet, &run.rosters)?;

    let summary_js = summary_to_json(&settings, &run.summary);
    let pretty_summary =
        serde_json::to_string_pretty(&summary_js).context(SerializingJsonSnafu { what: "summary" })?;
    io_output::write_text(&out_dir.join(io_output::SUMMARY_FILE), &pretty_summary)?;
    println!("summary:{}", pretty_summary);

    for s in run.summary.skipped.iter() {
        warn!(
            "No scorecard for {} ({}): {}",
            s.name,
            s.category_label(),
            s.reason
        );
    }

    if let Some(reference_path) = reference {
        check_reference(&summary_js, reference_path)?;
    }
    Ok(run.summary)
}

/// Entry point of the command line: merges the configuration file with the arguments.
pub fn run_cli(args: &Args) -> CardResult<RunSummary> {
    let mut config = match args.config.as_deref() {
        Some(path) => read_config(Path::new(path))?,
        None => RunConfig::default(),
    };
    config.override_with(args);
    run_cards_config(&config, args.reference.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write_csv(dir: &Path, name: &str, rows: &[&[&str]]) {
        let mut wtr = csv::Writer::from_path(dir.join(name)).unwrap();
        for r in rows {
            wtr.write_record(*r).unwrap();
        }
        wtr.flush().unwrap();
    }

    fn write_inputs(dir: &Path, registration: &[&[&str]]) {
        write_csv(
            dir,
            "settings.csv",
            &[
                &["Setting", "Value"],
                &["Event Name", "Youth Series"],
                &["Climb Count", "3"],
                &["Attempt Count", "5"],
                &["Event Type", "boulder"],
            ],
        );
        write_csv(
            dir,
            "climbs.csv",
            &[&["Category", "Climbs"], &["F10", "1,2,3"], &["M10", "4,5,6"]],
        );
        write_csv(dir, "registration.csv", registration);
    }

    fn csv_config(input: &Path, out: &Path) -> RunConfig {
        RunConfig {
            input_file: Some(input.display().to_string()),
            input_type: Some("csv".to_string()),
            output_directory: Some(out.display().to_string()),
            ..RunConfig::default()
        }
    }

    #[test]
    fn csv_run_writes_everything() {
        let input = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        write_inputs(
            input.path(),
            &[
                &["firstname", "lastname", "bib", "M10 boulder ticket", "F10 boulder ticket"],
                &["Tom", "Sharp", "7", "Session 3", ""],
                &["Ada", "Ondra", "12", "", "Session 3"],
                &["Lee", "Kim", "9", "", ""],
            ],
        );
        let summary = run_cards_config(&csv_config(input.path(), out.path()), None).unwrap();
        assert_eq!(summary.cards_generated, 2);
        assert_eq!(summary.skipped.len(), 1);

        let out_file = |name: &str| -> PathBuf { out.path().join(name) };
        assert!(out_file("scorecards.json").exists());
        assert!(out_file("scorecards.csv").exists());
        let roster = fs::read_to_string(out_file("checkin_session_3.csv")).unwrap();
        assert_eq!(
            roster,
            "Name,Category,Session,Bib #,Checked In\nAda Ondra,F10,3,12,\nTom Sharp,M10,3,7,\n"
        );
        let summary_js: JSValue =
            serde_json::from_str(&fs::read_to_string(out_file("summary.json")).unwrap()).unwrap();
        assert_eq!(summary_js["cardsGenerated"], json!(2));
        assert_eq!(summary_js["skipped"][0]["category"], json!("Unknown"));
        assert_eq!(
            summary_js["skipped"][0]["reason"],
            json!("No registration/ticket information found")
        );
    }

    #[test]
    fn no_output_without_climbers() {
        let input = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let out_dir = out.path().join("cards");
        write_inputs(
            input.path(),
            &[
                &["firstname", "lastname", "bib", "F10 boulder ticket"],
                &["Lee", "Kim", "9", ""],
            ],
        );
        let res = run_cards_config(&csv_config(input.path(), &out_dir), None);
        assert!(matches!(
            res,
            Err(CardError::Cards {
                source: CardErrors::NoValidClimbers
            })
        ));
        assert!(!out_dir.exists());
    }

    #[test]
    fn missing_table() {
        let input = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        write_csv(input.path(), "settings.csv", &[&["Event Name", "x"]]);
        let res = run_cards_config(&csv_config(input.path(), out.path()), None);
        assert!(matches!(res, Err(CardError::MissingTable { .. })));
    }

    #[test]
    fn serialization_errors_name_the_document() {
        let source = match serde_json::from_str::<JSValue>("{") {
            Err(e) => e,
            Ok(_) => panic!("not an error"),
        };
        let e = CardError::SerializingJson {
            source,
            what: "summary".to_string(),
        };
        assert_eq!(e.to_string(), "Error serializing summary to JSON");
    }

    #[test]
    fn reference_check() {
        let input = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        write_inputs(
            input.path(),
            &[
                &["firstname", "lastname", "bib", "F10 boulder ticket"],
                &["Ada", "Ondra", "12", "1"],
            ],
        );
        let config = csv_config(input.path(), out.path());
        run_cards_config(&config, None).unwrap();

        let reference = out.path().join("summary.json").display().to_string();
        assert!(run_cards_config(&config, Some(&reference)).is_ok());

        let wrong = input.path().join("wrong.json");
        fs::write(&wrong, r#"{"cardsGenerated": 3}"#).unwrap();
        let res = run_cards_config(&config, Some(&wrong.display().to_string()));
        assert!(matches!(res, Err(CardError::ReferenceMismatch { .. })));
    }
}
