mod common;

use std::fmt::Write as _;

use encoding_rs::UTF_8;
use proptest::prelude::*;

use injury_insights::{
    dataset::Dataset,
    filter::{Selection, SelectionSet},
};

use common::TestWorkspace;

const TEAMS: [&str; 4] = ["Riverton FC", "Eastport United", "Harbor City", "Westmoor Athletic"];
const INJURIES: [&str; 3] = ["Hamstring", "ACL Tear", "Concussion"];

/// Renders synthetic rows as CSV text; `None` injuries are written with the
/// source's sentinel token so the loader has something to clean.
fn render_csv(rows: &[(usize, Option<usize>)]) -> String {
    let mut text = String::from(
        "Player Name,Team Name,Position,Season,Injury,Age,Date of Injury,Date of return\n",
    );
    for (idx, (team, injury)) in rows.iter().enumerate() {
        let injury = injury.map(|i| INJURIES[i]).unwrap_or("N.A.");
        let _ = writeln!(
            text,
            "Player {idx},{},Forward,2021/22,{injury},{},2021-10-01,2021-10-20",
            TEAMS[*team],
            20 + (idx % 15)
        );
    }
    text
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn filtering_is_an_order_preserving_idempotent_subset(
        rows in proptest::collection::vec((0usize..4, proptest::option::of(0usize..3)), 1..40),
        selected_teams in proptest::collection::vec(0usize..4, 0..4),
    ) {
        let workspace = TestWorkspace::new();
        let path = workspace.write("synthetic.csv", &render_csv(&rows));
        let dataset = Dataset::load(&path, None, b',', UTF_8).expect("load synthetic csv");
        prop_assert_eq!(dataset.len(), rows.len());

        let mut selection = Selection::any();
        let team_names = selected_teams
            .iter()
            .map(|idx| TEAMS[*idx].to_string())
            .collect::<Vec<_>>();
        selection.teams = SelectionSet::from_values(team_names.clone());

        let filtered = selection.apply(&dataset);

        // Subset: every kept row carries a selected team.
        for record in &filtered {
            let team = record.team.as_deref().expect("team column present");
            prop_assert!(team_names.iter().any(|name| name == team));
        }

        // Order-preserving: kept rows appear in original order.
        let mut cursor = dataset.records().iter();
        for record in &filtered {
            prop_assert!(
                cursor.any(|original| std::ptr::eq(original, *record)),
                "filtered row out of source order"
            );
        }

        // Idempotent: re-filtering the filtered view changes nothing.
        let refiltered = filtered
            .iter()
            .copied()
            .filter(|record| selection.matches(record))
            .count();
        prop_assert_eq!(refiltered, filtered.len());

        // An empty selection set empties the result.
        if team_names.is_empty() {
            prop_assert!(filtered.is_empty());
        }
    }

    #[test]
    fn sentinel_token_never_survives_loading(
        rows in proptest::collection::vec((0usize..4, proptest::option::of(0usize..3)), 1..40),
    ) {
        let workspace = TestWorkspace::new();
        let path = workspace.write("synthetic.csv", &render_csv(&rows));
        let dataset = Dataset::load(&path, None, b',', UTF_8).expect("load synthetic csv");

        for record in dataset.records() {
            for cell in dataset.display_row(record) {
                prop_assert_ne!(cell, "N.A.".to_string());
            }
        }

        // Option sets carry distinct non-missing values only.
        let observed = dataset.injuries();
        let expected = rows
            .iter()
            .filter_map(|(_, injury)| *injury)
            .map(|idx| INJURIES[idx])
            .collect::<std::collections::HashSet<_>>();
        prop_assert_eq!(observed.len(), expected.len());
        for injury in observed {
            prop_assert!(expected.contains(injury.as_str()));
        }
    }
}
