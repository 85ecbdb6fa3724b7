use anyhow::Result;
use log::info;

use crate::{aggregate, cli::ReportArgs, table};

pub fn execute(args: &ReportArgs) -> Result<()> {
    let (dataset, selection) = crate::load_selection(&args.select)?;
    let rows = selection.apply(&dataset);
    let pairs = aggregate::rating_pairs(&rows);

    if args.select.json {
        println!("{}", serde_json::to_string_pretty(&pairs)?);
        return Ok(());
    }

    let headers = vec!["before".to_string(), "after".to_string()];
    let table_rows = pairs
        .iter()
        .map(|pair| vec![format!("{:.2}", pair.before), format!("{:.2}", pair.after)])
        .collect::<Vec<_>>();
    table::print_table(&headers, &table_rows);
    info!(
        "Paired ratings for {} of {} record(s)",
        pairs.len(),
        rows.len()
    );
    Ok(())
}
