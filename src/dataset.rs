//! Immutable in-memory table of injury records.
//!
//! The loader reads a delimited flat file once, canonicalizes the sentinel
//! missing-value token, parses the two date columns, and coerces every
//! rating column to numeric. Cell-level parse failures become missing
//! values; only an unreadable file or an absent required column is an
//! error. The resulting [`Dataset`] is never mutated — filtered views and
//! aggregates are recomputed from it on demand.

use std::{fmt, path::Path};

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use encoding_rs::Encoding;
use log::debug;

use crate::{
    io_utils,
    layout::{DatasetLayout, RatingPhase},
};

/// Outcome of a match the injured player sat out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    Win,
    Draw,
    Lose,
}

impl MatchOutcome {
    pub const ALL: [MatchOutcome; 3] = [MatchOutcome::Win, MatchOutcome::Draw, MatchOutcome::Lose];

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "win" => Some(MatchOutcome::Win),
            "draw" => Some(MatchOutcome::Draw),
            "lose" => Some(MatchOutcome::Lose),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MatchOutcome::Win => "win",
            MatchOutcome::Draw => "draw",
            MatchOutcome::Lose => "lose",
        }
    }
}

impl fmt::Display for MatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One cleaned row of the source table.
///
/// Rating vectors run parallel to the layout's phase-tagged rating columns;
/// `outcomes` runs parallel to the layout's result columns.
#[derive(Debug, Clone, PartialEq)]
pub struct InjuryRecord {
    pub player: Option<String>,
    pub team: Option<String>,
    pub position: Option<String>,
    pub season: Option<String>,
    pub injury: Option<String>,
    pub age: Option<f64>,
    pub injury_date: Option<NaiveDate>,
    pub return_date: Option<NaiveDate>,
    pub before_ratings: Vec<Option<f64>>,
    pub after_ratings: Vec<Option<f64>>,
    pub extra_ratings: Vec<Option<f64>>,
    pub outcomes: Vec<Option<MatchOutcome>>,
}

impl InjuryRecord {
    /// Mean of the present before-injury ratings, if any.
    pub fn before_mean(&self) -> Option<f64> {
        mean_present(&self.before_ratings)
    }

    /// Mean of the present after-injury ratings, if any.
    pub fn after_mean(&self) -> Option<f64> {
        mean_present(&self.after_ratings)
    }
}

fn mean_present(values: &[Option<f64>]) -> Option<f64> {
    let present = values.iter().flatten().copied().collect::<Vec<_>>();
    if present.is_empty() {
        None
    } else {
        Some(present.iter().sum::<f64>() / present.len() as f64)
    }
}

pub fn parse_naive_date(value: &str) -> Option<NaiveDate> {
    const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y", "%Y/%m/%d", "%d-%m-%Y"];
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
}

pub struct Dataset {
    layout: DatasetLayout,
    records: Vec<InjuryRecord>,
}

impl Dataset {
    /// Reads and cleans `input` in a single pass. `layout_path` overrides
    /// the header-derived layout.
    pub fn load(
        input: &Path,
        layout_path: Option<&Path>,
        delimiter: u8,
        encoding: &'static Encoding,
    ) -> Result<Self> {
        let mut reader = io_utils::open_csv_reader_from_path(input, delimiter)?;
        let headers = io_utils::reader_headers(&mut reader, encoding)
            .with_context(|| format!("Reading header row of {input:?}"))?;

        let layout = match layout_path {
            Some(path) => DatasetLayout::load(path)?.with_discovered(&headers),
            None => DatasetLayout::from_headers(&headers),
        };
        let columns = ColumnIndices::resolve(&layout, &headers)?;
        debug!(
            "Resolved {} rating column(s) and {} result column(s)",
            layout.ratings.len(),
            layout.results.len()
        );

        let mut records = Vec::new();
        for (row_idx, record) in reader.byte_records().enumerate() {
            let record = record.with_context(|| format!("Reading row {}", row_idx + 2))?;
            let decoded = io_utils::decode_record(&record, encoding)?;
            records.push(columns.build_record(&layout.missing_token, &decoded));
        }

        Ok(Self { layout, records })
    }

    pub fn layout(&self) -> &DatasetLayout {
        &self.layout
    }

    pub fn records(&self) -> &[InjuryRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Result-slot column names, in source order.
    pub fn result_columns(&self) -> &[String] {
        &self.layout.results
    }

    pub fn teams(&self) -> Vec<String> {
        distinct(self.records.iter().map(|r| r.team.as_deref()))
    }

    pub fn positions(&self) -> Vec<String> {
        distinct(self.records.iter().map(|r| r.position.as_deref()))
    }

    pub fn seasons(&self) -> Vec<String> {
        distinct(self.records.iter().map(|r| r.season.as_deref()))
    }

    pub fn injuries(&self) -> Vec<String> {
        distinct(self.records.iter().map(|r| r.injury.as_deref()))
    }

    /// Column captions for rendering cleaned rows.
    pub fn display_headers(&self) -> Vec<String> {
        let mut headers = vec![
            self.layout.player.clone(),
            self.layout.team.clone(),
            self.layout.position.clone(),
            self.layout.season.clone(),
            self.layout.injury.clone(),
            self.layout.age.clone(),
            self.layout.injury_date.clone(),
            self.layout.return_date.clone(),
        ];
        headers.extend(self.layout.ratings.iter().map(|r| r.column.clone()));
        headers.extend(self.layout.results.iter().cloned());
        headers
    }

    /// Renders one cleaned record in the same column order as
    /// [`Dataset::display_headers`]. Missing values render as empty cells.
    pub fn display_row(&self, record: &InjuryRecord) -> Vec<String> {
        let mut row = vec![
            record.player.clone().unwrap_or_default(),
            record.team.clone().unwrap_or_default(),
            record.position.clone().unwrap_or_default(),
            record.season.clone().unwrap_or_default(),
            record.injury.clone().unwrap_or_default(),
            record.age.map(format_number).unwrap_or_default(),
            format_date(record.injury_date),
            format_date(record.return_date),
        ];
        let mut before = record.before_ratings.iter();
        let mut after = record.after_ratings.iter();
        let mut extra = record.extra_ratings.iter();
        for column in &self.layout.ratings {
            let value = match column.phase {
                Some(RatingPhase::Before) => before.next(),
                Some(RatingPhase::After) => after.next(),
                None => extra.next(),
            };
            row.push(
                value
                    .copied()
                    .flatten()
                    .map(format_number)
                    .unwrap_or_default(),
            );
        }
        for outcome in &record.outcomes {
            row.push(outcome.map(|o| o.label().to_string()).unwrap_or_default());
        }
        row
    }
}

/// Column positions resolved once against the header row.
struct ColumnIndices {
    player: Option<usize>,
    team: usize,
    position: usize,
    season: usize,
    injury: usize,
    age: usize,
    injury_date: usize,
    return_date: usize,
    before_ratings: Vec<usize>,
    after_ratings: Vec<usize>,
    extra_ratings: Vec<usize>,
    results: Vec<usize>,
}

impl ColumnIndices {
    fn resolve(layout: &DatasetLayout, headers: &[String]) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|header| header == name);
        let require = |name: &str| {
            find(name).ok_or_else(|| anyhow!("Required column '{name}' not found in header row"))
        };

        let mut before_ratings = Vec::new();
        let mut after_ratings = Vec::new();
        let mut extra_ratings = Vec::new();
        for rating in &layout.ratings {
            let idx = require(&rating.column)?;
            match rating.phase {
                Some(RatingPhase::Before) => before_ratings.push(idx),
                Some(RatingPhase::After) => after_ratings.push(idx),
                None => extra_ratings.push(idx),
            }
        }
        let results = layout
            .results
            .iter()
            .map(|name| require(name))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            player: find(&layout.player),
            team: require(&layout.team)?,
            position: require(&layout.position)?,
            season: require(&layout.season)?,
            injury: require(&layout.injury)?,
            age: require(&layout.age)?,
            injury_date: require(&layout.injury_date)?,
            return_date: require(&layout.return_date)?,
            before_ratings,
            after_ratings,
            extra_ratings,
            results,
        })
    }

    fn build_record(&self, missing_token: &str, row: &[String]) -> InjuryRecord {
        let cell = |idx: usize| clean_cell(row.get(idx).map(String::as_str), missing_token);
        let text = |idx: usize| cell(idx).map(str::to_string);
        let number = |idx: usize| cell(idx).and_then(|value| value.parse::<f64>().ok());
        let date = |idx: usize| cell(idx).and_then(parse_naive_date);
        let ratings =
            |indices: &[usize]| indices.iter().map(|idx| number(*idx)).collect::<Vec<_>>();

        InjuryRecord {
            player: self.player.and_then(text),
            team: text(self.team),
            position: text(self.position),
            season: text(self.season),
            injury: text(self.injury),
            age: number(self.age),
            injury_date: date(self.injury_date),
            return_date: date(self.return_date),
            before_ratings: ratings(&self.before_ratings),
            after_ratings: ratings(&self.after_ratings),
            extra_ratings: ratings(&self.extra_ratings),
            outcomes: self
                .results
                .iter()
                .map(|idx| cell(*idx).and_then(MatchOutcome::parse))
                .collect(),
        }
    }
}

/// Canonicalizes one raw cell: trims whitespace, then maps the empty string
/// and the sentinel token to missing.
fn clean_cell<'a>(raw: Option<&'a str>, missing_token: &str) -> Option<&'a str> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() || trimmed == missing_token {
        None
    } else {
        Some(trimmed)
    }
}

fn distinct<'a, I>(values: I) -> Vec<String>
where
    I: Iterator<Item = Option<&'a str>>,
{
    let mut seen = Vec::new();
    for value in values.flatten() {
        if !seen.iter().any(|existing: &String| existing == value) {
            seen.push(value.to_string());
        }
    }
    seen
}

pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

fn format_date(value: Option<NaiveDate>) -> String {
    value
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}
