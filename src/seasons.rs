use anyhow::Result;
use log::info;

use crate::{aggregate, cli::ReportArgs, table};

pub fn execute(args: &ReportArgs) -> Result<()> {
    let (dataset, selection) = crate::load_selection(&args.select)?;
    let rows = selection.apply(&dataset);
    let seasons = aggregate::season_frequency(&rows);

    if args.select.json {
        println!("{}", serde_json::to_string_pretty(&seasons)?);
        return Ok(());
    }

    let headers = vec!["season".to_string(), "count".to_string()];
    let table_rows = seasons
        .iter()
        .map(|entry| vec![entry.label.clone(), entry.count.to_string()])
        .collect::<Vec<_>>();
    table::print_table(&headers, &table_rows);
    info!(
        "Counted injuries across {} season(s) for {} record(s)",
        seasons.len(),
        rows.len()
    );
    Ok(())
}
