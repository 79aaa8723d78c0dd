// HireScope - app/state.rs
//
// Search state for one applicant table: the loaded rows, the text in the
// search box, and the rows currently visible. `set_query` is the
// per-keystroke path.

use crate::core::filter::{filter_with_summary, FilterOptions, FilterSummary, SearchQuery};
use crate::core::model::ApplicantRecord;

/// Applicant table plus its current search.
#[derive(Debug)]
pub struct SearchState {
    /// All loaded applicant rows.
    pub records: Vec<ApplicantRecord>,

    /// Raw search-box text.
    pub query_text: String,

    /// Compiled form of `query_text`.
    pub query: SearchQuery,

    /// Indices of rows matching the current query (into `records`).
    pub filtered_indices: Vec<usize>,

    /// Summary of the most recent filter pass.
    pub summary: FilterSummary,

    /// Status message for display.
    pub status_message: String,

    options: FilterOptions,
}

impl SearchState {
    /// Create state with every row visible.
    pub fn new(records: Vec<ApplicantRecord>, options: FilterOptions) -> Self {
        let mut state = Self {
            records,
            query_text: String::new(),
            query: SearchQuery::MatchAll,
            filtered_indices: Vec::new(),
            summary: FilterSummary {
                total: 0,
                matched: 0,
                mode: SearchQuery::MatchAll.mode(),
            },
            status_message: String::new(),
            options,
        };
        state.refilter();
        state
    }

    /// Replace the search text and recompute the visible rows.
    pub fn set_query(&mut self, text: &str) {
        if text == self.query_text {
            return;
        }
        self.query_text = text.to_string();
        self.query = SearchQuery::compile(text);
        self.refilter();
    }

    /// Re-apply the current query to all rows.
    pub fn refilter(&mut self) {
        let (indices, summary) = filter_with_summary(&self.records, &self.query, &self.options);
        self.filtered_indices = indices;
        self.summary = summary;
        self.status_message = match self.query.error() {
            Some(e) => format!("Query not understood: {e}"),
            None => format!(
                "{} of {} applicants ({} search)",
                summary.matched, summary.total, summary.mode
            ),
        };
    }

    /// Rows matching the current query, in table order.
    pub fn matching_records(&self) -> impl Iterator<Item = &ApplicantRecord> + '_ {
        self.filtered_indices.iter().map(|&i| &self.records[i])
    }
}
