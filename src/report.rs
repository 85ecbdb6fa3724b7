//! The full dashboard: every aggregate section in one pass over the
//! filtered view, mirroring the recompute-everything model of the original
//! dashboard — no caching between sections, last selection wins.

use anyhow::Result;
use log::info;
use serde::Serialize;

use crate::{
    aggregate::{
        self, AgeRatingTrend, FrequencyEntry, OutcomeTally, RatingPair, SummarySnapshot,
    },
    cli::DashboardArgs,
    results, summary, table,
};

#[derive(Debug, Serialize)]
struct DashboardReport {
    summary: SummarySnapshot,
    injuries: Vec<FrequencyEntry>,
    ratings: Vec<RatingPair>,
    trend: AgeRatingTrend,
    results: OutcomeTally,
    seasons: Vec<FrequencyEntry>,
}

pub fn execute(args: &DashboardArgs) -> Result<()> {
    let (dataset, selection) = crate::load_selection(&args.select)?;
    let rows = selection.apply(&dataset);

    let dashboard = DashboardReport {
        summary: aggregate::summarize(&rows),
        injuries: aggregate::injury_frequency(&rows, args.top),
        ratings: aggregate::rating_pairs(&rows),
        trend: aggregate::age_rating_trend(&rows),
        results: aggregate::outcome_tally(dataset.result_columns(), &rows),
        seasons: aggregate::season_frequency(&rows),
    };

    if args.select.json {
        println!("{}", serde_json::to_string_pretty(&dashboard)?);
        return Ok(());
    }

    println!("== Summary ==");
    table::print_table(
        &["metric".to_string(), "value".to_string()],
        &[
            vec![
                "injuries".to_string(),
                dashboard.summary.injuries.to_string(),
            ],
            vec![
                "mean_age".to_string(),
                summary::format_mean_age(dashboard.summary.mean_age),
            ],
        ],
    );

    println!("\n== Top injuries ==");
    table::print_table(
        &["injury".to_string(), "count".to_string()],
        &dashboard
            .injuries
            .iter()
            .map(|entry| vec![entry.label.clone(), entry.count.to_string()])
            .collect::<Vec<_>>(),
    );

    println!("\n== Ratings before/after injury ==");
    table::print_table(
        &["before".to_string(), "after".to_string()],
        &dashboard
            .ratings
            .iter()
            .map(|pair| vec![format!("{:.2}", pair.before), format!("{:.2}", pair.after)])
            .collect::<Vec<_>>(),
    );

    println!("\n== Age vs post-injury rating ==");
    match dashboard.trend.fit {
        Some(fit) => println!(
            "{} point(s); rating = {:.2} {} {:.3} x age",
            dashboard.trend.points.len(),
            fit.intercept,
            if fit.slope < 0.0 { "-" } else { "+" },
            fit.slope.abs()
        ),
        None => println!(
            "{} point(s); no fit",
            dashboard.trend.points.len()
        ),
    }

    println!("\n== Missed-match results ==");
    table::print_table(
        &results::tally_headers(&dashboard.results),
        &results::tally_rows(&dashboard.results),
    );

    println!("\n== Injuries per season ==");
    table::print_table(
        &["season".to_string(), "count".to_string()],
        &dashboard
            .seasons
            .iter()
            .map(|entry| vec![entry.label.clone(), entry.count.to_string()])
            .collect::<Vec<_>>(),
    );

    info!(
        "Rendered dashboard for {} of {} record(s)",
        dashboard.summary.injuries,
        dataset.len()
    );
    Ok(())
}
