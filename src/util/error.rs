// HireScope - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation; every error keeps its causal chain
// for diagnostic logging.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all HireScope operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum HireScopeError {
    /// A search query could not be parsed.
    Query(QueryError),

    /// Applicant roster loading failed.
    Load(LoadError),

    /// Export operation failed.
    Export(ExportError),

    /// Configuration loading or validation failed.
    Config(ConfigError),

    /// Saved search store operation failed.
    SavedSearch(SavedSearchError),
}

impl fmt::Display for HireScopeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Query(e) => write!(f, "Query error: {e}"),
            Self::Load(e) => write!(f, "Load error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::SavedSearch(e) => write!(f, "Saved search error: {e}"),
        }
    }
}

impl std::error::Error for HireScopeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Query(e) => Some(e),
            Self::Load(e) => Some(e),
            Self::Export(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::SavedSearch(e) => Some(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Query errors
// ---------------------------------------------------------------------------

/// Structural problems in a boolean search query.
///
/// `position` is a byte offset into the trimmed query text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// A `"` was opened but never closed.
    UnterminatedQuote { position: usize },

    /// An operand (term, phrase, or group) was required but something else
    /// was found: a leading, trailing, or doubled operator, or an empty group.
    ExpectedOperand { found: &'static str, position: usize },

    /// A `)` with no matching `(`.
    UnmatchedCloseParen { position: usize },

    /// A `(` that is never closed.
    UnclosedGroup { position: usize },

    /// Groups and negations nested deeper than the allowed maximum.
    NestingTooDeep { max: usize, position: usize },

    /// More terms than a single query may hold.
    TooManyTerms { max: usize, position: usize },
}

impl QueryError {
    /// Byte offset in the trimmed query where the problem was detected.
    pub fn position(&self) -> usize {
        match self {
            Self::UnterminatedQuote { position }
            | Self::ExpectedOperand { position, .. }
            | Self::UnmatchedCloseParen { position }
            | Self::UnclosedGroup { position }
            | Self::NestingTooDeep { position, .. }
            | Self::TooManyTerms { position, .. } => *position,
        }
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnterminatedQuote { position } => {
                write!(f, "unterminated quoted phrase starting at offset {position}")
            }
            Self::ExpectedOperand { found, position } => {
                write!(f, "expected a term, phrase or group at offset {position}, found {found}")
            }
            Self::UnmatchedCloseParen { position } => {
                write!(f, "')' at offset {position} has no matching '('")
            }
            Self::UnclosedGroup { position } => {
                write!(f, "'(' at offset {position} is never closed")
            }
            Self::NestingTooDeep { max, position } => write!(
                f,
                "expression nested more than {max} levels deep at offset {position}"
            ),
            Self::TooManyTerms { max, position } => {
                write!(f, "more than {max} terms in one query (offset {position})")
            }
        }
    }
}

impl std::error::Error for QueryError {}

impl From<QueryError> for HireScopeError {
    fn from(e: QueryError) -> Self {
        Self::Query(e)
    }
}

// ---------------------------------------------------------------------------
// Load errors
// ---------------------------------------------------------------------------

/// Errors related to loading an applicant roster from disk.
#[derive(Debug)]
pub enum LoadError {
    /// The file extension is not one of the supported roster formats.
    UnsupportedFormat { path: PathBuf },

    /// Roster file exceeds the maximum allowed size.
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// Roster holds more records than the in-memory cap.
    TooManyRecords {
        path: PathBuf,
        count: usize,
        max: usize,
    },

    /// JSON roster could not be deserialised.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// A CSV row could not be deserialised.
    Csv { path: PathBuf, source: csv::Error },

    /// I/O error reading the roster file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedFormat { path } => write!(
                f,
                "'{}' is not a supported roster format (expected .json or .csv)",
                path.display()
            ),
            Self::FileTooLarge {
                path,
                size,
                max_size,
            } => write!(
                f,
                "Roster '{}' is {size} bytes, exceeds maximum of {max_size} bytes",
                path.display()
            ),
            Self::TooManyRecords { path, count, max } => write!(
                f,
                "Roster '{}' holds more than {max} records (stopped at {count})",
                path.display()
            ),
            Self::Json { path, source } => {
                write!(f, "Invalid JSON roster '{}': {source}", path.display())
            }
            Self::Csv { path, source } => {
                write!(f, "Invalid CSV roster '{}': {source}", path.display())
            }
            Self::Io { path, source } => {
                write!(f, "I/O error reading roster '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<LoadError> for HireScopeError {
    fn from(e: LoadError) -> Self {
        Self::Load(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to export operations.
///
/// `path` names the destination; `-` stands for standard output.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error writing the export.
    Io { path: PathBuf, source: io::Error },

    /// CSV serialisation error.
    Csv { path: PathBuf, source: csv::Error },

    /// JSON serialisation error.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Export I/O error '{}': {source}", path.display())
            }
            Self::Csv { path, source } => {
                write!(f, "CSV export error '{}': {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "JSON export error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

impl From<ExportError> for HireScopeError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Problems found while loading `config.toml`.
///
/// These are non-fatal: the loader reports them and falls back to defaults.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range or not recognised.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for HireScopeError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Saved search errors
// ---------------------------------------------------------------------------

/// Errors related to the saved search store.
#[derive(Debug)]
pub enum SavedSearchError {
    /// Name is empty or too long.
    InvalidName { name: String, reason: &'static str },

    /// Adding another search would exceed the store limit.
    TooMany { max: usize },

    /// No saved search with this name exists.
    NotFound { name: String },

    /// Store could not be serialised.
    Json { source: serde_json::Error },

    /// I/O error reading or writing the store file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for SavedSearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidName { name, reason } => {
                write!(f, "Invalid saved search name '{name}': {reason}")
            }
            Self::TooMany { max } => write!(
                f,
                "Cannot store more than {max} saved searches. Remove one first."
            ),
            Self::NotFound { name } => write!(f, "No saved search named '{name}'"),
            Self::Json { source } => write!(f, "Failed to serialise saved searches: {source}"),
            Self::Io { path, source } => {
                write!(f, "Saved search I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for SavedSearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json { source } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<SavedSearchError> for HireScopeError {
    fn from(e: SavedSearchError) -> Self {
        Self::SavedSearch(e)
    }
}

/// Convenience type alias for HireScope results.
pub type Result<T> = std::result::Result<T, HireScopeError>;
