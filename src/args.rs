use clap::Parser;

/// Prints the scorecards and the check-in rosters of a climbing competition.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON file describing the run: where the input tables are and where
    /// the outputs go. Relative paths in this file are relative to the file itself.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path) The Excel workbook holding the input tables, or the directory holding the CSV
    /// files with --input-type csv. Setting this option overrides what may be specified with the
    /// --config option.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (default excel) The type of the input: 'excel' or 'csv'.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (directory, default '.') Where the scorecards, the rosters and the summary are written.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference summary in JSON format. If provided, compcards will
    /// check that the summary of this run matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (default Settings) The name of the worksheet with the settings of the event.
    #[clap(long, value_parser)]
    pub settings_sheet: Option<String>,

    /// (default Climbs) The name of the worksheet with the climbs of each category.
    #[clap(long, value_parser)]
    pub climbs_sheet: Option<String>,

    /// (default Registration) The name of the worksheet with the registration export.
    #[clap(long, value_parser)]
    pub registration_sheet: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
