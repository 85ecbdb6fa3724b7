pub mod aggregate;
pub mod cli;
pub mod dataset;
pub mod filter;
pub mod injuries;
pub mod io_utils;
pub mod layout;
pub mod options;
pub mod preview;
pub mod probe;
pub mod ratings;
pub mod report;
pub mod results;
pub mod seasons;
pub mod summary;
pub mod table;
pub mod trend;

use std::{env, sync::OnceLock};

use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, info};

use crate::{
    cli::{Cli, Commands, SelectArgs},
    dataset::Dataset,
    filter::Selection,
};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("injury_insights", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Probe(args) => probe::execute(&args),
        Commands::Preview(args) => preview::execute(&args),
        Commands::Options(args) => options::execute(&args),
        Commands::Summary(args) => summary::execute(&args),
        Commands::Injuries(args) => injuries::execute(&args),
        Commands::Ratings(args) => ratings::execute(&args),
        Commands::Trend(args) => trend::execute(&args),
        Commands::Results(args) => results::execute(&args),
        Commands::Seasons(args) => seasons::execute(&args),
        Commands::Report(args) => report::execute(&args),
    }
}

/// Loads the dataset and builds the selection the reporting commands share.
pub fn load_selection(select: &SelectArgs) -> Result<(Dataset, Selection)> {
    let delimiter = io_utils::resolve_input_delimiter(&select.input, select.delimiter);
    let encoding = io_utils::resolve_encoding(select.input_encoding.as_deref())?;
    let dataset = Dataset::load(&select.input, select.layout.as_deref(), delimiter, encoding)
        .with_context(|| format!("Loading dataset from {:?}", select.input))?;
    info!(
        "Loaded {} record(s) from '{}' (delimiter '{}')",
        dataset.len(),
        select.input.display(),
        printable_delimiter(delimiter)
    );
    let selection = Selection::from_flags(
        &select.teams,
        &select.positions,
        &select.seasons,
        &select.injuries,
    );
    Ok((dataset, selection))
}

pub(crate) fn printable_delimiter(delimiter: u8) -> String {
    match delimiter {
        b',' => ",".to_string(),
        b'\t' => "\\t".to_string(),
        b'\n' => "\\n".to_string(),
        other => (other as char).to_string(),
    }
}
