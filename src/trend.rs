use anyhow::Result;
use log::info;

use crate::{aggregate, cli::ReportArgs, dataset::format_number, table};

pub fn execute(args: &ReportArgs) -> Result<()> {
    let (dataset, selection) = crate::load_selection(&args.select)?;
    let rows = selection.apply(&dataset);
    let trend = aggregate::age_rating_trend(&rows);

    if args.select.json {
        println!("{}", serde_json::to_string_pretty(&trend)?);
        return Ok(());
    }

    let headers = vec!["age".to_string(), "rating".to_string()];
    let table_rows = trend
        .points
        .iter()
        .map(|point| vec![format_number(point.age), format!("{:.2}", point.rating)])
        .collect::<Vec<_>>();
    table::print_table(&headers, &table_rows);
    match trend.fit {
        Some(fit) => println!(
            "\ntrend: rating = {:.2} {} {:.3} x age",
            fit.intercept,
            if fit.slope < 0.0 { "-" } else { "+" },
            fit.slope.abs()
        ),
        None => println!("\ntrend: no fit (fewer than two points or no age spread)"),
    }
    info!(
        "Related age to post-injury rating for {} of {} record(s)",
        trend.points.len(),
        rows.len()
    );
    Ok(())
}
