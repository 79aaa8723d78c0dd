// HireScope - main.rs
//
// Command-line entry point. Handles:
// 1. CLI argument parsing
// 2. Config loading and logging initialisation
// 3. Saved search management
// 4. Roster loading, filtering, and export of matching rows

use clap::Parser;
use hirescope::app::{roster, saved_searches, state::SearchState};
use hirescope::core::export::{self, ExportFormat};
use hirescope::core::filter::{FilterOptions, SearchQuery};
use hirescope::platform::config::{self, AppConfig, PlatformPaths};
use hirescope::util::error::{ExportError, Result, SavedSearchError};
use hirescope::util::{constants, logging};
use std::io::Write;
use std::path::{Path, PathBuf};

/// HireScope - search an exported applicant table.
///
/// Plain text is matched as a case-insensitive substring of any field.
/// Use AND, OR, NOT, "quoted phrases" and (groups) for boolean searches;
/// AND and OR are applied strictly left to right.
#[derive(Parser, Debug)]
#[command(name = "hirescope", version, about)]
struct Cli {
    /// Applicant roster to search (.json or .csv).
    records: Option<PathBuf>,

    /// Search query. Empty matches every row.
    #[arg(short = 'q', long = "query", conflicts_with = "saved")]
    query: Option<String>,

    /// Run a saved search by name.
    #[arg(short = 's', long = "saved")]
    saved: Option<String>,

    /// Save --query under this name.
    #[arg(long = "save-as", requires = "query")]
    save_as: Option<String>,

    /// Remove a saved search.
    #[arg(long = "delete-saved")]
    delete_saved: Option<String>,

    /// List saved searches and exit.
    #[arg(long = "list-saved")]
    list_saved: bool,

    /// Output format: table, csv or json.
    #[arg(short = 'f', long = "format")]
    format: Option<String>,

    /// Write results to this file instead of stdout.
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Describe how the query is interpreted.
    #[arg(long = "explain")]
    explain: bool,

    /// Directory holding config.toml and saved searches.
    #[arg(short = 'c', long = "config-dir")]
    config_dir: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    // Initialise logging first; the configured level is applied once
    // config.toml has been read.
    let log_handle = logging::init(cli.debug);

    tracing::info!(
        version = constants::APP_VERSION,
        debug = cli.debug,
        "HireScope starting"
    );

    let paths = match cli.config_dir.as_deref() {
        Some(dir) => PlatformPaths::single(dir),
        None => PlatformPaths::resolve(),
    };

    let (app_config, config_problems) = config::load_config(&paths.config_dir);
    if let Some(handle) = &log_handle {
        handle.apply_config_level(app_config.log_level.as_deref());
    }
    for problem in &config_problems {
        tracing::warn!(error = %problem, "Configuration warning");
    }

    if let Err(e) = run(&cli, &paths, &app_config) {
        tracing::error!(error = %e, "HireScope failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli, paths: &PlatformPaths, app_config: &AppConfig) -> Result<()> {
    let store_path = saved_searches::store_path(&paths.data_dir);
    let mut store = saved_searches::load(&store_path);

    if let Some(name) = &cli.delete_saved {
        let removed = store.remove(name)?;
        saved_searches::save(&store, &store_path)?;
        println!("Removed saved search '{}'", removed.name);
    }

    if let (Some(name), Some(query)) = (&cli.save_as, &cli.query) {
        let saved_name = save_search(&mut store, &store_path, name, query)?;
        println!("Saved search '{saved_name}'");
    }

    if cli.list_saved {
        for search in &store.searches {
            println!(
                "{}\t{}\t{}",
                search.name,
                search.saved_at.format("%Y-%m-%d %H:%M"),
                search.query
            );
        }
        return Ok(());
    }

    let query_text = match (&cli.saved, &cli.query) {
        (Some(name), _) => store
            .get(name)
            .map(|s| s.query.clone())
            .ok_or_else(|| SavedSearchError::NotFound { name: name.clone() })?,
        (None, Some(q)) => q.clone(),
        (None, None) => String::new(),
    };

    if cli.explain {
        explain(&query_text);
    }

    let Some(records_path) = cli.records.as_deref() else {
        if !cli.explain && cli.save_as.is_none() && cli.delete_saved.is_none() {
            eprintln!("No roster given. Pass a .json or .csv file (see --help).");
        }
        return Ok(());
    };

    let records = roster::load_records(records_path)?;
    let mut state = SearchState::new(
        records,
        FilterOptions {
            parallel_threshold: app_config.parallel_threshold,
        },
    );
    state.set_query(&query_text);
    tracing::info!(
        total = state.summary.total,
        matched = state.summary.matched,
        mode = %state.summary.mode,
        "Search complete"
    );

    let format_name = cli.format.as_deref().unwrap_or(&app_config.default_format);
    let format = ExportFormat::from_name(format_name).unwrap_or_else(|| {
        tracing::warn!(format = format_name, "Unknown output format, using table");
        ExportFormat::Table
    });

    write_results(&state, format, cli.output.as_deref())?;
    eprintln!("{}", state.status_message);
    Ok(())
}

/// Print the query mode and, for boolean queries, the parsed expression.
fn explain(query_text: &str) {
    let compiled = SearchQuery::compile(query_text);
    println!("mode: {}", compiled.mode());
    match &compiled {
        SearchQuery::Plain(needle) => println!("substring: {needle}"),
        SearchQuery::Boolean(expr) => println!("expression: {expr}"),
        SearchQuery::Invalid(e) => println!("error: {e}"),
        SearchQuery::MatchAll | SearchQuery::TooShort => {}
    }
}

/// Add or replace a saved search and persist the store.
///
/// Returns the stored name only once the file has been written.
fn save_search(
    store: &mut saved_searches::SavedSearches,
    store_path: &Path,
    name: &str,
    query: &str,
) -> Result<String> {
    let saved_name = store.upsert(name, query)?.name.clone();
    saved_searches::save(store, store_path)?;
    Ok(saved_name)
}

fn write_results(state: &SearchState, format: ExportFormat, output: Option<&Path>) -> Result<()> {
    let count = match output {
        Some(path) => {
            let file = std::fs::File::create(path).map_err(|e| ExportError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;
            write_rows(state, format, std::io::BufWriter::new(file), path)?
        }
        None => {
            let stdout = std::io::stdout();
            write_rows(state, format, stdout.lock(), Path::new("-"))?
        }
    };

    tracing::debug!(rows = count, format = format.name(), "Results written");
    Ok(())
}

/// Export the matching rows and flush. JSON output gets a closing newline.
fn write_rows<W: Write>(
    state: &SearchState,
    format: ExportFormat,
    mut writer: W,
    path: &Path,
) -> Result<usize> {
    let io_error = |e: std::io::Error| ExportError::Io {
        path: path.to_path_buf(),
        source: e,
    };

    let count = export::export(state.matching_records(), format, &mut writer, path)?;
    if format == ExportFormat::Json {
        writeln!(writer).map_err(io_error)?;
    }
    writer.flush().map_err(io_error)?;
    Ok(count)
}
