mod args;
mod cards;

use clap::Parser;
use log::{debug, warn};
use snafu::ErrorCompat;

fn main() {
    let args = args::Args::parse();

    if args.verbose {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::init();
    }
    debug!("main: args: {:?}", args);

    match cards::run_cli(&args) {
        Ok(summary) => {
            if !summary.skipped.is_empty() {
                eprintln!(
                    "{} scorecards generated, {} climbers skipped:",
                    summary.cards_generated,
                    summary.skipped.len()
                );
                for s in summary.skipped.iter() {
                    eprintln!("  {} ({}): {}", s.name, s.category_label(), s.reason);
                }
            }
        }
        Err(e) => {
            warn!("main: error occured {:?}", e);
            eprintln!("An error occured: {}", e);
            if let Some(bt) = ErrorCompat::backtrace(&e) {
                eprintln!("trace: {}", bt);
            }
            std::process::exit(1);
        }
    }
}
