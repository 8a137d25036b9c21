use league_browser::League;
use league_browser::filter::{FilterState, filter_leagues, results_summary, unique_sports};
use league_browser::testing_utils::{PropertyTesting, TestDataBuilder};

/// Search terms exercised against every catalog below
const SEARCHES: [&str; 8] = ["", "league", "LEAGUE", "nba", "f1", "national", "1", "zzz"];

fn catalogs() -> Vec<Vec<League>> {
    vec![
        Vec::new(),
        TestDataBuilder::sample_leagues(),
        TestDataBuilder::create_multiple_leagues(50),
    ]
}

#[test]
fn test_filter_result_is_ordered_subset_matching_both_predicates() {
    for leagues in catalogs() {
        let mut sports = unique_sports(&leagues);
        sports.insert(0, String::new());
        sports.push("Curling".to_string());

        for search in SEARCHES {
            for sport in &sports {
                let filtered = filter_leagues(&leagues, search, sport);
                PropertyTesting::validate_subsequence(&leagues, &filtered).unwrap();
                PropertyTesting::validate_matches(&filtered, search, sport).unwrap();
            }
        }
    }
}

#[test]
fn test_filter_is_idempotent() {
    let leagues = TestDataBuilder::sample_leagues();
    for search in SEARCHES {
        let once: Vec<League> = filter_leagues(&leagues, search, "Soccer")
            .into_iter()
            .cloned()
            .collect();
        let twice = filter_leagues(&once, search, "Soccer");
        assert_eq!(twice.len(), once.len(), "search '{search}'");
    }
}

#[test]
fn test_search_case_never_changes_result() {
    let leagues = TestDataBuilder::create_multiple_leagues(25);
    let lower = filter_leagues(&leagues, "test league 1", "");
    let upper = filter_leagues(&leagues, "TEST LEAGUE 1", "");
    assert_eq!(lower, upper);
    // "Test League 1" and "Test League 10" through "Test League 19"
    assert_eq!(lower.len(), 11);
}

#[test]
fn test_sport_partition_covers_catalog() {
    let leagues = TestDataBuilder::create_multiple_leagues(40);
    let total: usize = unique_sports(&leagues)
        .iter()
        .map(|sport| filter_leagues(&leagues, "", sport).len())
        .sum();
    assert_eq!(total, leagues.len());
}

#[test]
fn test_unique_sports_is_sorted_and_distinct() {
    let leagues = TestDataBuilder::sample_leagues();
    let sports = unique_sports(&leagues);
    let mut sorted = sports.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(sports, sorted);
    assert_eq!(sports.len(), 6);
}

#[test]
fn test_summary_matches_filter_state() {
    let leagues = TestDataBuilder::sample_leagues();
    let mut filter = FilterState::new("league", "");
    let shown = filter.apply(&leagues).len();
    assert_eq!(
        results_summary(shown, leagues.len()),
        format!("Showing {shown} of 8 leagues")
    );

    filter.clear();
    assert_eq!(
        results_summary(filter.apply(&leagues).len(), leagues.len()),
        "Showing all 8 leagues"
    );
}
