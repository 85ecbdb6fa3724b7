use anyhow::Result;
use log::info;

use crate::{aggregate, cli::InjuriesArgs, table};

pub fn execute(args: &InjuriesArgs) -> Result<()> {
    let (dataset, selection) = crate::load_selection(&args.select)?;
    let rows = selection.apply(&dataset);
    let ranked = aggregate::injury_frequency(&rows, args.top);

    if args.select.json {
        println!("{}", serde_json::to_string_pretty(&ranked)?);
        return Ok(());
    }

    let headers = vec!["injury".to_string(), "count".to_string()];
    let table_rows = ranked
        .iter()
        .map(|entry| vec![entry.label.clone(), entry.count.to_string()])
        .collect::<Vec<_>>();
    table::print_table(&headers, &table_rows);
    info!(
        "Ranked {} injury type(s) across {} record(s)",
        ranked.len(),
        rows.len()
    );
    Ok(())
}
