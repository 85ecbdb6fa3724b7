use anyhow::Result;
use log::info;

use crate::{aggregate, cli::ReportArgs, table};

pub fn execute(args: &ReportArgs) -> Result<()> {
    let (dataset, selection) = crate::load_selection(&args.select)?;
    let rows = selection.apply(&dataset);
    let snapshot = aggregate::summarize(&rows);

    if args.select.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    let headers = vec!["metric".to_string(), "value".to_string()];
    let table_rows = vec![
        vec!["injuries".to_string(), snapshot.injuries.to_string()],
        vec!["mean_age".to_string(), format_mean_age(snapshot.mean_age)],
    ];
    table::print_table(&headers, &table_rows);
    info!(
        "Summarized {} of {} record(s)",
        snapshot.injuries,
        dataset.len()
    );
    Ok(())
}

pub(crate) fn format_mean_age(mean_age: Option<f64>) -> String {
    mean_age
        .map(|age| format!("{age:.1}"))
        .unwrap_or_else(|| "no data".to_string())
}
