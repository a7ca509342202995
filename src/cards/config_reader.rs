use crate::args::Args;
use crate::cards::*;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The description of a run, as written in the JSON configuration file.
#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(rename = "inputFile")]
    pub input_file: Option<String>,
    #[serde(rename = "inputType")]
    pub input_type: Option<String>,
    #[serde(rename = "outputDirectory")]
    pub output_directory: Option<String>,
    #[serde(rename = "settingsSheet")]
    pub settings_sheet: Option<String>,
    #[serde(rename = "climbsSheet")]
    pub climbs_sheet: Option<String>,
    #[serde(rename = "registrationSheet")]
    pub registration_sheet: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum InputSource {
    Excel,
    Csv,
}

/// The names of the input tables (worksheets, or CSV files without extension).
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct TableNames {
    pub settings: String,
    pub climbs: String,
    pub registration: String,
}

impl RunConfig {
    pub fn input_source(&self) -> CardResult<InputSource> {
        match self.input_type.as_deref().map(|s| s.trim().to_lowercase()) {
            None => Ok(InputSource::Excel),
            Some(s) if s == "excel" || s == "xlsx" => Ok(InputSource::Excel),
            Some(s) if s == "csv" => Ok(InputSource::Csv),
            Some(s) => whatever!("Unknown input type {:?}: expected 'excel' or 'csv'", s),
        }
    }

    pub fn table_names(&self) -> TableNames {
        TableNames {
            settings: self
                .settings_sheet
                .clone()
                .unwrap_or_else(|| "Settings".to_string()),
            climbs: self
                .climbs_sheet
                .clone()
                .unwrap_or_else(|| "Climbs".to_string()),
            registration: self
                .registration_sheet
                .clone()
                .unwrap_or_else(|| "Registration".to_string()),
        }
    }

    pub fn output_dir(&self) -> PathBuf {
        PathBuf::from(self.output_directory.as_deref().unwrap_or("."))
    }

    /// The values given on the command line take precedence.
    pub fn override_with(&mut self, args: &Args) {
        let pairs = [
            (&mut self.input_file, &args.input),
            (&mut self.input_type, &args.input_type),
            (&mut self.output_directory, &args.out),
            (&mut self.settings_sheet, &args.settings_sheet),
            (&mut self.climbs_sheet, &args.climbs_sheet),
            (&mut self.registration_sheet, &args.registration_sheet),
        ];
        for (field, arg) in pairs {
            if arg.is_some() {
                *field = arg.clone();
            }
        }
    }
}

fn resolve(root: &Path, p: &Option<String>) -> Option<String> {
    p.as_ref().map(|s| {
        let path = Path::new(s);
        if path.is_relative() {
            root.join(path).display().to_string()
        } else {
            s.clone()
        }
    })
}

/// Reads the JSON configuration. The input and output paths are relative to
/// the directory of the configuration file.
pub fn read_config(path: &Path) -> CardResult<RunConfig> {
    let path_s = path.display().to_string();
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu {
        path: path_s.clone(),
    })?;
    let config: RunConfig =
        serde_json::from_str(&contents).context(ParsingJsonSnafu { path: path_s })?;
    let root = path.parent().unwrap_or_else(|| Path::new("."));
    debug!("read_config: {:?} relative to {:?}", config, root);
    Ok(RunConfig {
        input_file: resolve(root, &config.input_file),
        output_directory: resolve(root, &config.output_directory),
        ..config
    })
}
