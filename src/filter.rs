//! Conjunctive categorical filtering over the loaded dataset.
//!
//! A [`Selection`] carries one [`SelectionSet`] per dimension (team,
//! position, season, injury type). A record matches when every dimension
//! matches; within a dimension the set is a disjunction over its members.
//! Membership is exact-match: a missing cell matches only when the set
//! explicitly admits missing values, which the CLI spells with the
//! reserved token [`MISSING_LABEL`].

use std::collections::HashSet;

use crate::dataset::{Dataset, InjuryRecord};

/// Reserved selection token that admits rows whose cell has no value.
pub const MISSING_LABEL: &str = "(missing)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSet {
    values: HashSet<String>,
    include_missing: bool,
    match_any: bool,
}

impl SelectionSet {
    /// Matches every cell, including missing ones. This is the default for
    /// a dimension the user did not constrain, so an unconstrained run is
    /// the identity on the loaded table.
    pub fn any() -> Self {
        Self {
            values: HashSet::new(),
            include_missing: true,
            match_any: true,
        }
    }

    /// Matches nothing. An empty selection for one dimension empties the
    /// whole conjunctive filter.
    pub fn none() -> Self {
        Self {
            values: HashSet::new(),
            include_missing: false,
            match_any: false,
        }
    }

    /// Builds an explicit set from selected values. The reserved
    /// [`MISSING_LABEL`] token toggles missing-cell membership instead of
    /// entering the value set.
    pub fn from_values<I, S>(selected: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut values = HashSet::new();
        let mut include_missing = false;
        for value in selected {
            let value = value.into();
            if value == MISSING_LABEL {
                include_missing = true;
            } else {
                values.insert(value);
            }
        }
        Self {
            values,
            include_missing,
            match_any: false,
        }
    }

    /// Explicit set, or match-all when no values were selected. This is how
    /// absent CLI flags behave.
    pub fn from_flags(selected: &[String]) -> Self {
        if selected.is_empty() {
            Self::any()
        } else {
            Self::from_values(selected.iter().cloned())
        }
    }

    pub fn matches(&self, cell: Option<&str>) -> bool {
        if self.match_any {
            return true;
        }
        match cell {
            Some(value) => self.values.contains(value),
            None => self.include_missing,
        }
    }
}

impl Default for SelectionSet {
    fn default() -> Self {
        Self::any()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub teams: SelectionSet,
    pub positions: SelectionSet,
    pub seasons: SelectionSet,
    pub injuries: SelectionSet,
}

impl Selection {
    pub fn any() -> Self {
        Self::default()
    }

    /// Builds the selection from the four repeatable CLI flag lists.
    pub fn from_flags(
        teams: &[String],
        positions: &[String],
        seasons: &[String],
        injuries: &[String],
    ) -> Self {
        Self {
            teams: SelectionSet::from_flags(teams),
            positions: SelectionSet::from_flags(positions),
            seasons: SelectionSet::from_flags(seasons),
            injuries: SelectionSet::from_flags(injuries),
        }
    }

    pub fn matches(&self, record: &InjuryRecord) -> bool {
        self.teams.matches(record.team.as_deref())
            && self.positions.matches(record.position.as_deref())
            && self.seasons.matches(record.season.as_deref())
            && self.injuries.matches(record.injury.as_deref())
    }

    /// Returns the matching records in original row order. Never copies or
    /// mutates rows.
    pub fn apply<'a>(&self, dataset: &'a Dataset) -> Vec<&'a InjuryRecord> {
        dataset
            .records()
            .iter()
            .filter(|record| self.matches(record))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(team: Option<&str>, injury: Option<&str>) -> InjuryRecord {
        InjuryRecord {
            player: None,
            team: team.map(str::to_string),
            position: Some("Forward".to_string()),
            season: Some("2020/21".to_string()),
            injury: injury.map(str::to_string),
            age: None,
            injury_date: None,
            return_date: None,
            before_ratings: Vec::new(),
            after_ratings: Vec::new(),
            extra_ratings: Vec::new(),
            outcomes: Vec::new(),
        }
    }

    #[test]
    fn any_matches_values_and_missing() {
        let set = SelectionSet::any();
        assert!(set.matches(Some("Riverton FC")));
        assert!(set.matches(None));
    }

    #[test]
    fn explicit_set_is_exact_match() {
        let set = SelectionSet::from_values(["Hamstring"]);
        assert!(set.matches(Some("Hamstring")));
        assert!(!set.matches(Some("Hamstring Strain")));
        assert!(!set.matches(None));
    }

    #[test]
    fn missing_label_admits_missing_cells_only() {
        let set = SelectionSet::from_values([MISSING_LABEL]);
        assert!(set.matches(None));
        assert!(!set.matches(Some("Hamstring")));
        // The empty string is an ordinary value, distinct from missing.
        assert!(!set.matches(Some("")));
    }

    #[test]
    fn none_matches_nothing() {
        let set = SelectionSet::none();
        assert!(!set.matches(Some("Hamstring")));
        assert!(!set.matches(None));
    }

    #[test]
    fn selection_is_conjunctive_across_dimensions() {
        let mut selection = Selection::any();
        selection.teams = SelectionSet::from_values(["Riverton FC"]);
        selection.injuries = SelectionSet::from_values(["Hamstring"]);

        assert!(selection.matches(&record(Some("Riverton FC"), Some("Hamstring"))));
        assert!(!selection.matches(&record(Some("Riverton FC"), Some("ACL Tear"))));
        assert!(!selection.matches(&record(Some("Eastport United"), Some("Hamstring"))));
    }

    #[test]
    fn missing_injury_excluded_unless_selected() {
        let mut selection = Selection::any();
        selection.injuries = SelectionSet::from_values(["Hamstring"]);
        assert!(!selection.matches(&record(Some("Riverton FC"), None)));

        selection.injuries = SelectionSet::from_values(["Hamstring", MISSING_LABEL]);
        assert!(selection.matches(&record(Some("Riverton FC"), None)));
    }

    #[test]
    fn from_flags_defaults_to_match_all() {
        let selection = Selection::from_flags(&[], &[], &[], &[]);
        assert!(selection.matches(&record(None, None)));
    }
}
