//! Descriptive aggregates over a filtered view of the dataset.
//!
//! Every function here is a pure, read-only computation over a slice of
//! record references. An empty view yields a well-formed empty or zero
//! result, never an error.

use std::collections::{BTreeMap, HashMap};

use itertools::Itertools;
use serde::Serialize;

use crate::dataset::{InjuryRecord, MatchOutcome};

/// Headline numbers for the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummarySnapshot {
    /// Number of injury records in the selection.
    pub injuries: usize,
    /// Mean player age, ignoring missing ages. `None` when the selection is
    /// empty or every age is missing.
    pub mean_age: Option<f64>,
}

pub fn summarize(rows: &[&InjuryRecord]) -> SummarySnapshot {
    SummarySnapshot {
        injuries: rows.len(),
        mean_age: mean_age(rows),
    }
}

pub fn mean_age(rows: &[&InjuryRecord]) -> Option<f64> {
    let ages = rows
        .iter()
        .filter_map(|record| record.age)
        .collect::<Vec<_>>();
    if ages.is_empty() {
        None
    } else {
        Some(ages.iter().sum::<f64>() / ages.len() as f64)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrequencyEntry {
    pub label: String,
    pub count: usize,
}

/// Non-missing injury-type counts, descending. Ties keep first-observed
/// order so repeated runs over the same data rank identically. `top` of 0
/// means unlimited.
pub fn injury_frequency(rows: &[&InjuryRecord], top: usize) -> Vec<FrequencyEntry> {
    labeled_frequency(rows.iter().filter_map(|record| record.injury.as_deref()), top)
}

fn labeled_frequency<'a, I>(labels: I, top: usize) -> Vec<FrequencyEntry>
where
    I: Iterator<Item = &'a str>,
{
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (order, label) in labels.enumerate() {
        counts.entry(label).or_insert((0, order)).0 += 1;
    }
    let mut entries = counts
        .into_iter()
        .sorted_by(|a, b| b.1.0.cmp(&a.1.0).then_with(|| a.1.1.cmp(&b.1.1)))
        .map(|(label, (count, _))| FrequencyEntry {
            label: label.to_string(),
            count,
        })
        .collect::<Vec<_>>();
    if top > 0 && entries.len() > top {
        entries.truncate(top);
    }
    entries
}

/// One record's averaged ratings either side of the injury. Only records
/// with both sides present appear (pairwise-complete, not column-wise).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatingPair {
    pub before: f64,
    pub after: f64,
}

pub fn rating_pairs(rows: &[&InjuryRecord]) -> Vec<RatingPair> {
    rows.iter()
        .filter_map(|record| {
            let before = record.before_mean()?;
            let after = record.after_mean()?;
            Some(RatingPair { before, after })
        })
        .collect()
}

/// Win/draw/lose counts per missed-match slot, zero-filled. Missing
/// outcomes contribute to no count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutcomeTally {
    /// Result-slot column names, in source order.
    pub slots: Vec<String>,
    pub wins: Vec<usize>,
    pub draws: Vec<usize>,
    pub losses: Vec<usize>,
}

impl OutcomeTally {
    pub fn count(&self, outcome: MatchOutcome, slot: usize) -> usize {
        match outcome {
            MatchOutcome::Win => self.wins[slot],
            MatchOutcome::Draw => self.draws[slot],
            MatchOutcome::Lose => self.losses[slot],
        }
    }
}

pub fn outcome_tally(slots: &[String], rows: &[&InjuryRecord]) -> OutcomeTally {
    let mut tally = OutcomeTally {
        slots: slots.to_vec(),
        wins: vec![0; slots.len()],
        draws: vec![0; slots.len()],
        losses: vec![0; slots.len()],
    };
    for record in rows {
        for (slot, outcome) in record.outcomes.iter().enumerate().take(slots.len()) {
            match outcome {
                Some(MatchOutcome::Win) => tally.wins[slot] += 1,
                Some(MatchOutcome::Draw) => tally.draws[slot] += 1,
                Some(MatchOutcome::Lose) => tally.losses[slot] += 1,
                None => {}
            }
        }
    }
    tally
}

/// Rows per season label, ascending by label rather than by count.
pub fn season_frequency(rows: &[&InjuryRecord]) -> Vec<FrequencyEntry> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for record in rows {
        if let Some(season) = record.season.as_deref() {
            *counts.entry(season).or_insert(0) += 1;
        }
    }
    counts
        .into_iter()
        .map(|(label, count)| FrequencyEntry {
            label: label.to_string(),
            count,
        })
        .collect()
}

/// Least-squares line of post-injury rating on age.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LineFit {
    pub slope: f64,
    pub intercept: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendPoint {
    pub age: f64,
    pub rating: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgeRatingTrend {
    pub points: Vec<TrendPoint>,
    /// `None` with fewer than two points or zero age variance.
    pub fit: Option<LineFit>,
}

/// Relates player age to the averaged post-injury rating for every record
/// carrying both, with an ordinary least-squares trend line.
pub fn age_rating_trend(rows: &[&InjuryRecord]) -> AgeRatingTrend {
    let points = rows
        .iter()
        .filter_map(|record| {
            let age = record.age?;
            let rating = record.after_mean()?;
            Some(TrendPoint { age, rating })
        })
        .collect::<Vec<_>>();
    let fit = fit_line(&points);
    AgeRatingTrend { points, fit }
}

fn fit_line(points: &[TrendPoint]) -> Option<LineFit> {
    if points.len() < 2 {
        return None;
    }
    let n = points.len() as f64;
    let mean_age = points.iter().map(|p| p.age).sum::<f64>() / n;
    let mean_rating = points.iter().map(|p| p.rating).sum::<f64>() / n;
    let variance = points
        .iter()
        .map(|p| (p.age - mean_age) * (p.age - mean_age))
        .sum::<f64>();
    if variance == 0.0 {
        return None;
    }
    let covariance = points
        .iter()
        .map(|p| (p.age - mean_age) * (p.rating - mean_rating))
        .sum::<f64>();
    let slope = covariance / variance;
    Some(LineFit {
        slope,
        intercept: mean_rating - slope * mean_age,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(
        season: Option<&str>,
        injury: Option<&str>,
        age: Option<f64>,
        before: &[Option<f64>],
        after: &[Option<f64>],
        outcomes: &[Option<MatchOutcome>],
    ) -> InjuryRecord {
        InjuryRecord {
            player: None,
            team: Some("Riverton FC".to_string()),
            position: Some("Forward".to_string()),
            season: season.map(str::to_string),
            injury: injury.map(str::to_string),
            age,
            injury_date: None,
            return_date: None,
            before_ratings: before.to_vec(),
            after_ratings: after.to_vec(),
            extra_ratings: Vec::new(),
            outcomes: outcomes.to_vec(),
        }
    }

    fn refs(records: &[InjuryRecord]) -> Vec<&InjuryRecord> {
        records.iter().collect()
    }

    #[test]
    fn summarize_empty_selection_reports_no_data() {
        let snapshot = summarize(&[]);
        assert_eq!(snapshot.injuries, 0);
        assert_eq!(snapshot.mean_age, None);
    }

    #[test]
    fn mean_age_ignores_missing_values() {
        let records = vec![
            record(None, None, Some(24.0), &[], &[], &[]),
            record(None, None, None, &[], &[], &[]),
            record(None, None, Some(30.0), &[], &[], &[]),
        ];
        assert_eq!(mean_age(&refs(&records)), Some(27.0));
    }

    #[test]
    fn mean_age_all_missing_reports_no_data() {
        let records = vec![record(None, None, None, &[], &[], &[])];
        assert_eq!(mean_age(&refs(&records)), None);
    }

    #[test]
    fn injury_frequency_breaks_ties_by_first_observed_order() {
        // A:5, B:5, C:3, D:1 with A observed before B.
        let mut records = Vec::new();
        for label in ["A", "B", "A", "B", "A", "B", "C", "A", "B", "A", "B", "C", "C", "D"] {
            records.push(record(None, Some(label), None, &[], &[], &[]));
        }
        let ranked = injury_frequency(&refs(&records), 10);
        let labels = ranked.iter().map(|e| e.label.as_str()).collect::<Vec<_>>();
        assert_eq!(labels, vec!["A", "B", "C", "D"]);
        assert_eq!(ranked[0].count, 5);
        assert_eq!(ranked[1].count, 5);
    }

    #[test]
    fn injury_frequency_truncates_and_skips_missing() {
        let mut records = vec![record(None, None, None, &[], &[], &[])];
        for idx in 0..12 {
            records.push(record(None, Some(&format!("type-{idx}")), None, &[], &[], &[]));
        }
        let ranked = injury_frequency(&refs(&records), 10);
        assert_eq!(ranked.len(), 10);
        assert!(ranked.iter().all(|entry| entry.count == 1));

        let unlimited = injury_frequency(&refs(&records), 0);
        assert_eq!(unlimited.len(), 12);
    }

    #[test]
    fn rating_pairs_are_pairwise_complete() {
        let records = vec![
            // Averages to before 8.0, after 6.5.
            record(None, None, None, &[Some(8.0), None], &[Some(6.0), Some(7.0)], &[]),
            // All before-values missing: dropped entirely.
            record(None, None, None, &[None, None], &[Some(6.0), Some(7.0)], &[]),
        ];
        let pairs = rating_pairs(&refs(&records));
        assert_eq!(
            pairs,
            vec![RatingPair {
                before: 8.0,
                after: 6.5
            }]
        );
    }

    #[test]
    fn outcome_tally_zero_fills_and_skips_missing() {
        let slots = vec![
            "Match1_missed_match_Result".to_string(),
            "Match2_missed_match_Result".to_string(),
            "Match3_missed_match_Result".to_string(),
        ];
        let records = vec![
            record(
                None,
                None,
                None,
                &[],
                &[],
                &[Some(MatchOutcome::Win), Some(MatchOutcome::Draw), None],
            ),
            record(
                None,
                None,
                None,
                &[],
                &[],
                &[
                    Some(MatchOutcome::Lose),
                    Some(MatchOutcome::Win),
                    Some(MatchOutcome::Win),
                ],
            ),
        ];
        let tally = outcome_tally(&slots, &refs(&records));
        assert_eq!(tally.wins, vec![1, 1, 1]);
        assert_eq!(tally.draws, vec![0, 1, 0]);
        assert_eq!(tally.losses, vec![1, 0, 0]);
        assert_eq!(tally.wins.iter().sum::<usize>(), 3);
        assert_eq!(tally.draws.iter().sum::<usize>(), 1);
        assert_eq!(tally.losses.iter().sum::<usize>(), 1);
    }

    #[test]
    fn outcome_tally_empty_selection_is_zero_filled() {
        let slots = vec!["Match1_missed_match_Result".to_string()];
        let tally = outcome_tally(&slots, &[]);
        assert_eq!(tally.wins, vec![0]);
        assert_eq!(tally.draws, vec![0]);
        assert_eq!(tally.losses, vec![0]);
    }

    #[test]
    fn season_frequency_orders_by_label_not_count() {
        let records = vec![
            record(Some("2021"), None, None, &[], &[], &[]),
            record(Some("2020"), None, None, &[], &[], &[]),
            record(Some("2021"), None, None, &[], &[], &[]),
        ];
        let seasons = season_frequency(&refs(&records));
        assert_eq!(
            seasons,
            vec![
                FrequencyEntry {
                    label: "2020".to_string(),
                    count: 1
                },
                FrequencyEntry {
                    label: "2021".to_string(),
                    count: 2
                },
            ]
        );
    }

    #[test]
    fn age_rating_trend_fits_a_line() {
        let records = vec![
            record(None, None, Some(20.0), &[], &[Some(7.0)], &[]),
            record(None, None, Some(30.0), &[], &[Some(6.0)], &[]),
        ];
        let trend = age_rating_trend(&refs(&records));
        assert_eq!(trend.points.len(), 2);
        let fit = trend.fit.expect("two distinct ages fit a line");
        assert!((fit.slope - (-0.1)).abs() < 1e-9);
        assert!((fit.intercept - 9.0).abs() < 1e-9);
    }

    #[test]
    fn age_rating_trend_declines_fit_without_variance() {
        let records = vec![
            record(None, None, Some(25.0), &[], &[Some(7.0)], &[]),
            record(None, None, Some(25.0), &[], &[Some(6.0)], &[]),
        ];
        let trend = age_rating_trend(&refs(&records));
        assert_eq!(trend.points.len(), 2);
        assert_eq!(trend.fit, None);

        assert_eq!(age_rating_trend(&[]).points.len(), 0);
        assert_eq!(age_rating_trend(&[]).fit, None);
    }
}
