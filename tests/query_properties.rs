// HireScope - tests/query_properties.rs
//
// Property tests for the search predicate: it is total, deterministic, and
// honours the empty / short / blank-record rules for arbitrary input.

use hirescope::core::filter::{apply_filters, matches, FilterOptions, SearchQuery};
use hirescope::core::model::ApplicantRecord;
use proptest::prelude::*;

fn record_strategy() -> impl Strategy<Value = ApplicantRecord> {
    let field = || proptest::option::of("[A-Za-z @.\"()&|]{0,24}");
    (field(), field(), field(), field(), field(), field(), field(), field()).prop_map(
        |(name, edu, status, decision, r_name, r_email, r_pos, r_dept)| ApplicantRecord {
            id: None,
            full_name: name,
            education_level: edu,
            application_status: status,
            decision,
            referral_name: r_name,
            referral_email: r_email,
            referral_position: r_pos,
            referral_department: r_dept,
        },
    )
}

/// Queries built from the operator vocabulary so the boolean path is hit often.
fn query_strategy() -> impl Strategy<Value = String> {
    let piece = prop_oneof![
        Just("AND".to_string()),
        Just("OR".to_string()),
        Just("NOT".to_string()),
        Just("(".to_string()),
        Just(")".to_string()),
        Just("\"".to_string()),
        Just("&&".to_string()),
        Just("||".to_string()),
        "[a-z]{1,6}",
        "\"[a-z ]{0,6}\"",
    ];
    prop::collection::vec(piece, 0..16).prop_map(|parts| parts.join(" "))
}

proptest! {
    #[test]
    fn matches_never_panics_on_arbitrary_text(record in record_strategy(), query in ".*") {
        let _ = matches(&record, &query);
    }

    #[test]
    fn matches_never_panics_on_operator_soup(record in record_strategy(), query in query_strategy()) {
        let _ = matches(&record, &query);
    }

    #[test]
    fn matches_is_deterministic(record in record_strategy(), query in query_strategy()) {
        prop_assert_eq!(matches(&record, &query), matches(&record, &query));
    }

    #[test]
    fn whitespace_query_matches_every_record(record in record_strategy(), query in "[ \t\n]{0,8}") {
        prop_assert!(matches(&record, &query));
    }

    #[test]
    fn short_query_matches_nothing(record in record_strategy(), query in "[A-Za-z\"()]{1,2}") {
        prop_assert!(!matches(&record, &query));
    }

    #[test]
    fn blank_record_never_matches_non_empty_query(query in query_strategy()) {
        prop_assume!(!query.trim().is_empty());
        prop_assert!(!matches(&ApplicantRecord::default(), &query));
    }

    #[test]
    fn parallel_filter_agrees_with_sequential(
        records in prop::collection::vec(record_strategy(), 0..40),
        query in query_strategy(),
    ) {
        let compiled = SearchQuery::compile(&query);
        let sequential = apply_filters(&records, &compiled, &FilterOptions { parallel_threshold: usize::MAX });
        let parallel = apply_filters(&records, &compiled, &FilterOptions { parallel_threshold: 1 });
        prop_assert_eq!(sequential, parallel);
    }
}
