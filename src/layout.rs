//! Dataset layout: the enumerated description of an injury table's columns.
//!
//! A [`DatasetLayout`] names the four categorical dimensions, the age and
//! date columns, the rating columns with their before/after phase tags, the
//! missed-match result columns, and the sentinel token the source uses for
//! missing values. Layouts round-trip through YAML (`probe` writes one,
//! `--layout` loads one); when no file is supplied the layout is derived
//! from the observed header row, so the naming conventions are matched
//! exactly once and everything downstream works from the typed lookup.

use std::{fs::File, io::BufReader, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Sentinel literal the source data uses for a missing value.
pub const DEFAULT_MISSING_TOKEN: &str = "N.A.";

const RATING_MARKER: &str = "rating";
const BEFORE_PREFIX: &str = "before_injury";
const AFTER_PREFIX: &str = "after_injury";
const RESULT_MARKER: &str = "missed_match_Result";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RatingPhase {
    Before,
    After,
}

/// A rating column and its place in the before/after comparison.
/// Columns with no phase are still coerced to numeric but join no pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingColumn {
    pub column: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<RatingPhase>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetLayout {
    #[serde(default = "defaults::player")]
    pub player: String,
    #[serde(default = "defaults::team")]
    pub team: String,
    #[serde(default = "defaults::position")]
    pub position: String,
    #[serde(default = "defaults::season")]
    pub season: String,
    #[serde(default = "defaults::injury")]
    pub injury: String,
    #[serde(default = "defaults::age")]
    pub age: String,
    #[serde(default = "defaults::injury_date")]
    pub injury_date: String,
    #[serde(default = "defaults::return_date")]
    pub return_date: String,
    #[serde(default = "defaults::missing_token")]
    pub missing_token: String,
    #[serde(default)]
    pub ratings: Vec<RatingColumn>,
    #[serde(default)]
    pub results: Vec<String>,
}

mod defaults {
    pub fn player() -> String {
        "Player Name".to_string()
    }
    pub fn team() -> String {
        "Team Name".to_string()
    }
    pub fn position() -> String {
        "Position".to_string()
    }
    pub fn season() -> String {
        "Season".to_string()
    }
    pub fn injury() -> String {
        "Injury".to_string()
    }
    pub fn age() -> String {
        "Age".to_string()
    }
    pub fn injury_date() -> String {
        "Date of Injury".to_string()
    }
    pub fn return_date() -> String {
        "Date of return".to_string()
    }
    pub fn missing_token() -> String {
        super::DEFAULT_MISSING_TOKEN.to_string()
    }
}

impl Default for DatasetLayout {
    fn default() -> Self {
        Self {
            player: defaults::player(),
            team: defaults::team(),
            position: defaults::position(),
            season: defaults::season(),
            injury: defaults::injury(),
            age: defaults::age(),
            injury_date: defaults::injury_date(),
            return_date: defaults::return_date(),
            missing_token: defaults::missing_token(),
            ratings: Vec::new(),
            results: Vec::new(),
        }
    }
}

impl DatasetLayout {
    /// Derives a layout from an observed header row using the source's
    /// naming conventions for rating and result columns.
    pub fn from_headers(headers: &[String]) -> Self {
        Self {
            ratings: discover_ratings(headers),
            results: discover_results(headers),
            ..Self::default()
        }
    }

    /// Fills in any rating/result columns a hand-written layout left
    /// unspecified by falling back to header discovery.
    pub fn with_discovered(mut self, headers: &[String]) -> Self {
        if self.ratings.is_empty() {
            self.ratings = discover_ratings(headers);
        }
        if self.results.is_empty() {
            self.results = discover_results(headers);
        }
        self
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("Opening layout file {path:?}"))?;
        let layout: DatasetLayout = serde_yaml::from_reader(BufReader::new(file))
            .with_context(|| format!("Parsing layout file {path:?}"))?;
        Ok(layout)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path).with_context(|| format!("Creating layout file {path:?}"))?;
        serde_yaml::to_writer(file, self)
            .with_context(|| format!("Writing layout file {path:?}"))?;
        Ok(())
    }
}

pub fn rating_phase(header: &str) -> Option<RatingPhase> {
    if header.starts_with(BEFORE_PREFIX) {
        Some(RatingPhase::Before)
    } else if header.starts_with(AFTER_PREFIX) {
        Some(RatingPhase::After)
    } else {
        None
    }
}

// Substring match is case-sensitive, mirroring the source convention.
pub fn is_rating_header(header: &str) -> bool {
    header.contains(RATING_MARKER)
}

pub fn is_result_header(header: &str) -> bool {
    header.contains(RESULT_MARKER)
}

fn discover_ratings(headers: &[String]) -> Vec<RatingColumn> {
    headers
        .iter()
        .filter(|header| is_rating_header(header))
        .map(|header| RatingColumn {
            column: header.clone(),
            phase: rating_phase(header),
        })
        .collect()
}

fn discover_results(headers: &[String]) -> Vec<String> {
    headers
        .iter()
        .filter(|header| is_result_header(header))
        .cloned()
        .collect()
}
