// HireScope - core/filter.rs
//
// Search-box filtering for applicant rows.
// A query is compiled once per keystroke and evaluated once per row.
// Core layer: pure logic, no I/O or UI dependencies.

use crate::core::model::ApplicantRecord;
use crate::core::query::{self, Expr};
use crate::util::constants::{BOOLEAN_MARKERS, DEFAULT_PARALLEL_THRESHOLD, MIN_QUERY_LENGTH};
use crate::util::error::QueryError;
use rayon::prelude::*;

/// How a query will be evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryMode {
    /// Empty or whitespace-only query: every row matches.
    MatchAll,
    /// Too short to search: no row matches.
    TooShort,
    /// Whole query as one case-insensitive substring.
    Plain,
    /// AND / OR / NOT expression.
    Boolean,
    /// Boolean query that failed to parse: no row matches.
    Invalid,
}

impl QueryMode {
    /// Human-readable label for status lines.
    pub fn label(&self) -> &'static str {
        match self {
            QueryMode::MatchAll => "match all",
            QueryMode::TooShort => "too short",
            QueryMode::Plain => "plain",
            QueryMode::Boolean => "boolean",
            QueryMode::Invalid => "invalid",
        }
    }
}

impl std::fmt::Display for QueryMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Compiled form of the text in the search box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchQuery {
    MatchAll,
    TooShort,
    /// Lower-cased, trimmed query text.
    Plain(String),
    Boolean(Expr),
    Invalid(QueryError),
}

/// True when the query should be parsed as an expression rather than
/// searched for verbatim.
///
/// Markers are looked for in the untrimmed text so `"A" AND ` (still being
/// typed) is caught. A query that starts or ends with an operator is an
/// unfinished expression, never literal text.
fn is_boolean_query(text: &str, trimmed: &str) -> bool {
    if BOOLEAN_MARKERS.iter().any(|m| text.contains(m)) {
        return true;
    }
    // Two or more complete quoted segments.
    if trimmed.matches('"').count() >= 4 {
        return true;
    }
    let first = trimmed.split_whitespace().next();
    let last = trimmed.split_whitespace().next_back();
    first.into_iter().chain(last).any(query::is_operator_word)
}

impl SearchQuery {
    /// Compile a query. Parse failures are kept as `Invalid`.
    pub fn compile(text: &str) -> Self {
        let trimmed = text.trim();

        if trimmed.is_empty() {
            return SearchQuery::MatchAll;
        }
        if trimmed.chars().count() < MIN_QUERY_LENGTH {
            return SearchQuery::TooShort;
        }
        if !is_boolean_query(text, trimmed) {
            return SearchQuery::Plain(trimmed.to_lowercase());
        }

        match query::parse(trimmed) {
            Ok(expr) => SearchQuery::Boolean(expr),
            Err(e) => {
                tracing::debug!(
                    query_len = trimmed.len(),
                    position = e.position(),
                    error = %e,
                    "Search query is malformed; matching nothing"
                );
                SearchQuery::Invalid(e)
            }
        }
    }

    /// Compile a query, surfacing parse failures as errors.
    pub fn try_compile(text: &str) -> Result<Self, QueryError> {
        match Self::compile(text) {
            SearchQuery::Invalid(e) => Err(e),
            compiled => Ok(compiled),
        }
    }

    pub fn mode(&self) -> QueryMode {
        match self {
            SearchQuery::MatchAll => QueryMode::MatchAll,
            SearchQuery::TooShort => QueryMode::TooShort,
            SearchQuery::Plain(_) => QueryMode::Plain,
            SearchQuery::Boolean(_) => QueryMode::Boolean,
            SearchQuery::Invalid(_) => QueryMode::Invalid,
        }
    }

    /// Parse failure, if any.
    pub fn error(&self) -> Option<&QueryError> {
        match self {
            SearchQuery::Invalid(e) => Some(e),
            _ => None,
        }
    }

    /// Decide whether a record is shown for this query.
    pub fn matches(&self, record: &ApplicantRecord) -> bool {
        match self {
            SearchQuery::MatchAll => true,
            SearchQuery::TooShort | SearchQuery::Invalid(_) => false,
            SearchQuery::Plain(needle) => {
                let haystack = lowered_values(record);
                haystack.iter().any(|v| v.contains(needle.as_str()))
            }
            SearchQuery::Boolean(expr) => {
                let haystack = lowered_values(record);
                // A record with nothing to search never matches, even `NOT x`.
                if haystack.is_empty() {
                    return false;
                }
                expr.evaluate(&|term: &str| haystack.iter().any(|v| v.contains(term)))
            }
        }
    }
}

/// Lower-cased, non-empty searchable values of a record.
fn lowered_values(record: &ApplicantRecord) -> Vec<String> {
    record.searchable_values().map(str::to_lowercase).collect()
}

/// Decide whether `record` matches the search-box `query`.
///
/// Total: malformed queries match nothing instead of failing.
pub fn matches(record: &ApplicantRecord, query: &str) -> bool {
    SearchQuery::compile(query).matches(record)
}

/// Like [`matches`], but reports a malformed boolean query.
pub fn try_matches(record: &ApplicantRecord, query: &str) -> Result<bool, QueryError> {
    Ok(SearchQuery::try_compile(query)?.matches(record))
}

/// Options for batch filtering.
#[derive(Debug, Clone, Copy)]
pub struct FilterOptions {
    /// Row count at or above which rows are evaluated in parallel.
    pub parallel_threshold: usize,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

/// Outcome of filtering a record set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSummary {
    pub total: usize,
    pub matched: usize,
    pub mode: QueryMode,
}

/// Apply a compiled query to a slice of records, returning indices of
/// matching records in input order.
///
/// Returns indices rather than copies so callers can keep one record set
/// and re-filter it on every keystroke.
pub fn apply_filters(
    records: &[ApplicantRecord],
    query: &SearchQuery,
    options: &FilterOptions,
) -> Vec<usize> {
    match query {
        SearchQuery::MatchAll => return (0..records.len()).collect(),
        SearchQuery::TooShort | SearchQuery::Invalid(_) => return Vec::new(),
        _ => {}
    }

    if records.len() >= options.parallel_threshold {
        records
            .par_iter()
            .enumerate()
            .filter(|(_, record)| query.matches(record))
            .map(|(idx, _)| idx)
            .collect()
    } else {
        records
            .iter()
            .enumerate()
            .filter(|(_, record)| query.matches(record))
            .map(|(idx, _)| idx)
            .collect()
    }
}

/// Filter and summarise in one step.
pub fn filter_with_summary(
    records: &[ApplicantRecord],
    query: &SearchQuery,
    options: &FilterOptions,
) -> (Vec<usize>, FilterSummary) {
    let indices = apply_filters(records, query, options);
    let summary = FilterSummary {
        total: records.len(),
        matched: indices.len(),
        mode: query.mode(),
    };
    tracing::debug!(
        total = summary.total,
        matched = summary.matched,
        mode = %summary.mode,
        "Filter applied"
    );
    (indices, summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> ApplicantRecord {
        ApplicantRecord {
            full_name: Some(name.to_string()),
            ..Default::default()
        }
    }

    fn blank() -> ApplicantRecord {
        ApplicantRecord::default()
    }

    #[test]
    fn test_empty_query_matches_everything() {
        assert!(matches(&named("Jane Doe"), ""));
        assert!(matches(&named("Jane Doe"), "   \t "));
        assert!(matches(&blank(), ""));
        assert!(matches(&blank(), "  "));
    }

    #[test]
    fn test_short_query_matches_nothing() {
        assert!(!matches(&named("Jo"), "Jo"));
        assert!(!matches(&named("Jane Doe"), "  j "));
        assert_eq!(SearchQuery::compile("ab").mode(), QueryMode::TooShort);
    }

    #[test]
    fn test_short_query_counts_characters_not_bytes() {
        // Two characters, four bytes.
        assert_eq!(SearchQuery::compile("éé").mode(), QueryMode::TooShort);
        assert!(matches(&named("Renée Léa"), "née"));
    }

    #[test]
    fn test_plain_substring_case_insensitive() {
        let record = named("Jane Doe");
        assert!(matches(&record, "jane"));
        assert!(matches(&record, "JANE"));
        assert!(matches(&record, "e do"));
        assert!(!matches(&record, "xyz"));
    }

    #[test]
    fn test_plain_query_is_trimmed() {
        assert!(matches(&named("Jane Doe"), "  jane  "));
    }

    #[test]
    fn test_plain_searches_every_field() {
        let record = ApplicantRecord {
            full_name: Some("Jane Doe".to_string()),
            referral_department: Some("Platform Engineering".to_string()),
            ..Default::default()
        };
        assert!(matches(&record, "engineering"));
    }

    #[test]
    fn test_plain_query_keeps_single_quoted_phrase_verbatim() {
        // One quoted segment without a marker is not boolean mode.
        assert_eq!(SearchQuery::compile("\"Jane\"").mode(), QueryMode::Plain);
        assert!(!matches(&named("Jane Doe"), "\"Jane\""));
        assert!(matches(&named("Nickname \"Jane\" Doe"), "\"Jane\""));
    }

    #[test]
    fn test_lowercase_keywords_stay_plain() {
        let record = named("Research and Development");
        assert_eq!(
            SearchQuery::compile("research and development").mode(),
            QueryMode::Plain
        );
        assert!(matches(&record, "research and development"));
    }

    #[test]
    fn test_quoted_and() {
        let record = named("John Smith Developer");
        assert!(matches(&record, r#""John" AND "Developer""#));
        assert!(!matches(&record, r#""John" AND "Manager""#));
    }

    #[test]
    fn test_not() {
        assert!(matches(&named("Senior Engineer"), r#""Senior" NOT "Junior""#));
        assert!(!matches(
            &named("Senior Junior Engineer"),
            r#""Senior" NOT "Junior""#
        ));
    }

    #[test]
    fn test_or_across_fields() {
        let query = r#""Bachelor" OR "Master""#;
        let bachelor = ApplicantRecord {
            full_name: Some("Ana".to_string()),
            education_level: Some("Bachelor of Science".to_string()),
            ..Default::default()
        };
        let master = ApplicantRecord {
            full_name: Some("Ben".to_string()),
            education_level: Some("Master".to_string()),
            ..Default::default()
        };
        let phd = ApplicantRecord {
            full_name: Some("Cy".to_string()),
            education_level: Some("PhD".to_string()),
            ..Default::default()
        };
        assert!(matches(&bachelor, query));
        assert!(matches(&master, query));
        assert!(!matches(&phd, query));
    }

    #[test]
    fn test_grouping() {
        let query = r#"("Frontend" OR "Backend") NOT "Intern""#;
        assert!(matches(&named("Frontend Developer"), query));
        assert!(matches(&named("Backend Developer"), query));
        assert!(!matches(&named("Frontend Intern"), query));
        assert!(!matches(&named("Designer"), query));
    }

    #[test]
    fn test_equal_precedence_left_to_right() {
        // ("a" OR "b") AND "c", not "a" OR ("b" AND "c").
        let query = r#""alpha" OR "beta" AND "gamma""#;
        assert!(!matches(&named("alpha"), query));
        assert!(matches(&named("alpha gamma"), query));
        assert!(matches(&named("beta gamma"), query));
    }

    #[test]
    fn test_bare_words_are_terms() {
        let record = ApplicantRecord {
            full_name: Some("John Smith".to_string()),
            referral_email: Some("mia@example.com".to_string()),
            ..Default::default()
        };
        assert!(matches(&record, r#"john AND mia@example.com"#));
        assert!(matches(&record, r#"smith john OR nobody"#));
        assert!(!matches(&record, r#"john AND nobody"#));
    }

    #[test]
    fn test_two_phrases_imply_and() {
        assert_eq!(
            SearchQuery::compile(r#""John" "Smith""#).mode(),
            QueryMode::Boolean
        );
        assert!(matches(&named("John Smith"), r#""John" "Smith""#));
        assert!(!matches(&named("John Doe"), r#""John" "Smith""#));
    }

    #[test]
    fn test_symbol_operators() {
        let record = named("Frontend Developer");
        assert!(matches(&record, r#""frontend" && "developer" AND "end""#));
        assert!(matches(&record, r#""backend" || "frontend" AND "dev""#));
    }

    #[test]
    fn test_trailing_operator_matches_nothing() {
        // The literal text must not rescue an unfinished expression.
        let record = named(r#"Nickname "A" AND more"#);
        for query in [r#""A" AND"#, r#""A" AND "#, r#""A" OR"#, r#""A" &&"#] {
            assert_eq!(
                SearchQuery::compile(query).mode(),
                QueryMode::Invalid,
                "expected invalid for {query:?}"
            );
            assert!(!matches(&record, query), "expected no match for {query:?}");
        }
        assert!(!matches(&named(r#"x "a" or y"#), r#""A" OR"#));
        assert!(matches!(
            try_matches(&record, r#""A" AND"#),
            Err(QueryError::ExpectedOperand { .. })
        ));
    }

    #[test]
    fn test_leading_or_trailing_keyword_is_boolean() {
        assert_eq!(SearchQuery::compile("OR jane").mode(), QueryMode::Invalid);
        assert_eq!(SearchQuery::compile("jane NOT").mode(), QueryMode::Invalid);
        assert_eq!(SearchQuery::compile("NOT jane").mode(), QueryMode::Boolean);
        assert!(matches(&named("John Doe"), "NOT jane"));
        // Keywords inside a word or in lower case stay plain.
        assert_eq!(SearchQuery::compile("ORLANDO").mode(), QueryMode::Plain);
        assert_eq!(SearchQuery::compile("jane or").mode(), QueryMode::Plain);
    }

    #[test]
    fn test_malformed_queries_match_nothing() {
        let record = named("A B C");
        for query in [
            r#""A" AND "B" AND"#,
            r#"AND "A" OR "B""#,
            r#""A" AND OR "B""#,
            r#"("A" OR "B" AND "C""#,
            r#""A" OR "B") AND "C""#,
            r#""A" AND "B"#,
            r#""A" AND ()"#,
        ] {
            assert!(!matches(&record, query), "expected no match for {query}");
            assert!(try_matches(&record, query).is_err(), "expected error for {query}");
        }
    }

    #[test]
    fn test_try_matches_ok_for_valid_queries() {
        assert_eq!(try_matches(&named("Jane Doe"), "jane"), Ok(true));
        assert_eq!(try_matches(&named("Jane Doe"), r#""jane" AND "x""#), Ok(false));
        assert_eq!(try_matches(&named("Jane Doe"), "ja"), Ok(false));
    }

    #[test]
    fn test_blank_record_never_matches_non_empty_query() {
        let record = blank();
        assert!(!matches(&record, "jane"));
        assert!(!matches(&record, r#"NOT "jane" AND NOT "doe""#));
        assert!(!matches(&record, r#""" AND """#));
    }

    #[test]
    fn test_empty_phrase_matches_any_non_blank_record() {
        assert!(matches(&named("x"), r#""" AND """#));
    }

    #[test]
    fn test_matches_is_idempotent() {
        let record = named("Frontend Developer");
        let query = r#"("Frontend" OR "Backend") NOT "Intern""#;
        let first = matches(&record, query);
        for _ in 0..5 {
            assert_eq!(matches(&record, query), first);
        }
    }

    #[test]
    fn test_apply_filters_returns_indices_in_order() {
        let records = vec![
            named("Frontend Developer"),
            named("Backend Intern"),
            named("Backend Developer"),
        ];
        let query = SearchQuery::compile(r#""developer" OR "nothing""#);
        let result = apply_filters(&records, &query, &FilterOptions::default());
        assert_eq!(result, vec![0, 2]);
    }

    #[test]
    fn test_apply_filters_parallel_matches_sequential() {
        let records: Vec<_> = (0..500)
            .map(|i| {
                let level = if i % 3 == 0 { "Senior" } else { "Junior" };
                named(&format!("Candidate {i} {level}"))
            })
            .collect();
        let query = SearchQuery::compile(r#""senior" NOT "candidate 9""#);

        let sequential = apply_filters(
            &records,
            &query,
            &FilterOptions {
                parallel_threshold: usize::MAX,
            },
        );
        let parallel = apply_filters(
            &records,
            &query,
            &FilterOptions {
                parallel_threshold: 1,
            },
        );
        assert_eq!(sequential, parallel);
        assert!(!sequential.is_empty());
    }

    #[test]
    fn test_filter_with_summary() {
        let records = vec![named("Jane Doe"), named("John Doe"), blank()];
        let (indices, summary) = filter_with_summary(
            &records,
            &SearchQuery::compile(""),
            &FilterOptions::default(),
        );
        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(
            summary,
            FilterSummary {
                total: 3,
                matched: 3,
                mode: QueryMode::MatchAll
            }
        );

        let (_, summary) = filter_with_summary(
            &records,
            &SearchQuery::compile(r#""doe" AND "x" OR"#),
            &FilterOptions::default(),
        );
        assert_eq!(summary.matched, 0);
        assert_eq!(summary.mode, QueryMode::Invalid);
    }
}
