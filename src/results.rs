use anyhow::Result;
use log::info;

use crate::{aggregate, cli::ReportArgs, dataset::MatchOutcome, table};

pub fn execute(args: &ReportArgs) -> Result<()> {
    let (dataset, selection) = crate::load_selection(&args.select)?;
    let rows = selection.apply(&dataset);
    let tally = aggregate::outcome_tally(dataset.result_columns(), &rows);

    if args.select.json {
        println!("{}", serde_json::to_string_pretty(&tally)?);
        return Ok(());
    }

    table::print_table(&tally_headers(&tally), &tally_rows(&tally));
    info!(
        "Tallied outcomes across {} result column(s) for {} record(s)",
        tally.slots.len(),
        rows.len()
    );
    Ok(())
}

pub(crate) fn tally_headers(tally: &aggregate::OutcomeTally) -> Vec<String> {
    let mut headers = vec!["result".to_string()];
    headers.extend(tally.slots.iter().cloned());
    headers
}

pub(crate) fn tally_rows(tally: &aggregate::OutcomeTally) -> Vec<Vec<String>> {
    MatchOutcome::ALL
        .iter()
        .map(|outcome| {
            let mut row = vec![outcome.label().to_string()];
            for slot in 0..tally.slots.len() {
                row.push(tally.count(*outcome, slot).to_string());
            }
            row
        })
        .collect()
}
