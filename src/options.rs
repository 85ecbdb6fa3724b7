use anyhow::{Context, Result};
use log::info;
use serde::Serialize;

use crate::{cli::OptionsArgs, dataset::Dataset, io_utils, table};

/// The selectable option sets for the four filter dimensions: the distinct
/// non-missing values observed in the loaded table, in first-observed order.
#[derive(Debug, Serialize)]
struct FilterOptions {
    teams: Vec<String>,
    positions: Vec<String>,
    seasons: Vec<String>,
    injuries: Vec<String>,
}

pub fn execute(args: &OptionsArgs) -> Result<()> {
    let delimiter = io_utils::resolve_input_delimiter(&args.input, args.delimiter);
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    let dataset = Dataset::load(&args.input, args.layout.as_deref(), delimiter, encoding)
        .with_context(|| format!("Loading dataset from {:?}", args.input))?;

    let options = FilterOptions {
        teams: dataset.teams(),
        positions: dataset.positions(),
        seasons: dataset.seasons(),
        injuries: dataset.injuries(),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&options)?);
        return Ok(());
    }

    let headers = vec!["dimension".to_string(), "option".to_string()];
    let mut rows = Vec::new();
    for (dimension, values) in [
        ("team", &options.teams),
        ("position", &options.positions),
        ("season", &options.seasons),
        ("injury", &options.injuries),
    ] {
        for value in values {
            rows.push(vec![dimension.to_string(), value.clone()]);
        }
    }
    table::print_table(&headers, &rows);
    info!(
        "Listed filter options over {} record(s): {} team(s), {} position(s), {} season(s), {} injury type(s)",
        dataset.len(),
        options.teams.len(),
        options.positions.len(),
        options.seasons.len(),
        options.injuries.len()
    );
    Ok(())
}
