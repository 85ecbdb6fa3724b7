use anyhow::Result;
use log::info;

use crate::{cli::PreviewArgs, table};

pub fn execute(args: &PreviewArgs) -> Result<()> {
    let (dataset, selection) = crate::load_selection(&args.select)?;
    let rows = selection.apply(&dataset);
    let table_rows = rows
        .iter()
        .take(args.rows)
        .map(|record| dataset.display_row(record))
        .collect::<Vec<_>>();

    if args.select.json {
        let payload = serde_json::json!({
            "headers": dataset.display_headers(),
            "rows": table_rows,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    table::print_table(&dataset.display_headers(), &table_rows);
    info!(
        "Displayed {} of {} matching row(s) from '{}'",
        table_rows.len(),
        rows.len(),
        args.select.input.display()
    );
    Ok(())
}
