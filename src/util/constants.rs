// HireScope - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "HireScope";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "HireScope";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Query evaluation
// =============================================================================

/// Queries shorter than this (in characters, after trimming) match nothing.
/// Keeps one- and two-letter substring matches from flooding the table while
/// the user is still typing.
pub const MIN_QUERY_LENGTH: usize = 3;

/// Maximum nesting of groups and negations in a boolean query.
/// Anything deeper is reported as malformed instead of recursing further.
pub const MAX_GROUP_DEPTH: usize = 64;

/// Maximum number of terms and phrases in one boolean query.
/// Bounds the depth of the left-leaning expression tree.
pub const MAX_QUERY_TERMS: usize = 256;

/// Space-delimited keyword markers that switch a query into boolean mode.
pub const BOOLEAN_MARKERS: &[&str] = &[" AND ", " OR ", " NOT "];

// =============================================================================
// Batch filtering
// =============================================================================

/// Row count at or above which filtering runs on the rayon thread pool.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 2_000;

/// Minimum user-configurable parallel threshold.
pub const MIN_PARALLEL_THRESHOLD: usize = 1;

/// Maximum user-configurable parallel threshold.
pub const MAX_PARALLEL_THRESHOLD: usize = 10_000_000;

// =============================================================================
// Roster loading
// =============================================================================

/// Maximum size of an applicant roster file in bytes.
pub const MAX_ROSTER_FILE_SIZE: u64 = 512 * 1024 * 1024; // 512 MB

/// Maximum number of applicant records held in memory at once.
pub const MAX_RECORDS: usize = 2_000_000;

// =============================================================================
// Export
// =============================================================================

/// Widest cell rendered in the plain-text table before truncation.
pub const TABLE_MAX_CELL_WIDTH: usize = 32;

/// Default export format when neither the CLI nor config.toml chooses one.
pub const DEFAULT_EXPORT_FORMAT: &str = "table";

// =============================================================================
// Saved searches
// =============================================================================

/// Maximum number of saved searches kept in the store.
pub const MAX_SAVED_SEARCHES: usize = 200;

/// Maximum length of a saved search name (characters).
pub const MAX_SAVED_SEARCH_NAME_LENGTH: usize = 64;

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Saved searches file name (stored in the platform data directory).
pub const SAVED_SEARCHES_FILE_NAME: &str = "saved_searches.json";
