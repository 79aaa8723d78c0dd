// HireScope - util/logging.rs
//
// Structured logging with runtime-selectable debug mode.
//
// Activation:
//   - Environment variable: RUST_LOG=debug (or trace)
//   - CLI flag: --debug
//   - Config file: [logging] level = "debug"
//
// The subscriber is installed before config.toml is read, so startup events
// are never lost. The configured level is applied afterwards through a
// reload handle.
//
// Output: stderr only, so stdout stays clean for exported rows.
// Never logs query text or applicant fields at any level (PII).

use tracing_subscriber::{fmt, prelude::*, reload, EnvFilter, Registry};

/// Choose the filter directive.
///
/// Priority: RUST_LOG env var > CLI --debug flag > config level > default "info".
/// `None` means RUST_LOG is set and should be used as-is.
fn select_directive(env_set: bool, debug_flag: bool, config_level: Option<&str>) -> Option<String> {
    if env_set {
        None
    } else if debug_flag {
        Some("debug".to_string())
    } else if let Some(level) = config_level {
        Some(level.to_string())
    } else {
        Some(super::constants::DEFAULT_LOG_LEVEL.to_string())
    }
}

/// Lets the level be changed once config.toml has been read.
pub struct LogLevelHandle {
    handle: reload::Handle<EnvFilter, Registry>,
    env_set: bool,
    debug_flag: bool,
}

impl LogLevelHandle {
    /// Apply the `[logging] level` from config.toml.
    ///
    /// No effect when RUST_LOG or --debug already chose the level.
    pub fn apply_config_level(&self, config_level: Option<&str>) {
        if self.env_set || self.debug_flag || config_level.is_none() {
            return;
        }
        let Some(directive) = select_directive(self.env_set, self.debug_flag, config_level) else {
            return;
        };
        match self.handle.reload(EnvFilter::new(&directive)) {
            Ok(()) => tracing::debug!(level = %directive, "Applied configured log level"),
            Err(e) => tracing::warn!(error = %e, "Could not apply configured log level"),
        }
    }
}

/// Initialise the logging subsystem.
///
/// `debug_flag` is true when the user passed --debug on the CLI.
///
/// Safe to call more than once; later calls are ignored and return `None`.
pub fn init(debug_flag: bool) -> Option<LogLevelHandle> {
    let env_set = std::env::var("RUST_LOG").is_ok();
    let filter = match select_directive(env_set, debug_flag, None) {
        Some(directive) => EnvFilter::new(directive),
        None => EnvFilter::from_default_env(),
    };
    let (filter_layer, handle) = reload::Layer::new(filter);

    let installed = tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .compact(),
        )
        .try_init()
        .is_ok();

    if !installed {
        return None;
    }

    tracing::debug!(
        app = super::constants::APP_NAME,
        version = super::constants::APP_VERSION,
        "Logging initialised"
    );

    Some(LogLevelHandle {
        handle,
        env_set,
        debug_flag,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    /// Handle over a filter layer that is never installed globally.
    fn detached(
        env_set: bool,
        debug_flag: bool,
    ) -> (reload::Layer<EnvFilter, Registry>, LogLevelHandle) {
        let (layer, handle) = reload::Layer::new(EnvFilter::new("info"));
        let level_handle = LogLevelHandle {
            handle,
            env_set,
            debug_flag,
        };
        (layer, level_handle)
    }

    fn current_level(level_handle: &LogLevelHandle) -> Option<LevelFilter> {
        level_handle
            .handle
            .with_current(|f| f.max_level_hint())
            .ok()
            .flatten()
    }

    #[test]
    fn test_env_var_takes_priority() {
        assert_eq!(select_directive(true, true, Some("warn")), None);
    }

    #[test]
    fn test_debug_flag_beats_config_level() {
        assert_eq!(
            select_directive(false, true, Some("warn")).as_deref(),
            Some("debug")
        );
    }

    #[test]
    fn test_config_level_used_without_flag() {
        assert_eq!(
            select_directive(false, false, Some("warn")).as_deref(),
            Some("warn")
        );
    }

    #[test]
    fn test_default_level() {
        assert_eq!(select_directive(false, false, None).as_deref(), Some("info"));
    }

    #[test]
    fn test_config_level_applied_after_init() {
        let (_layer, level_handle) = detached(false, false);
        level_handle.apply_config_level(Some("warn"));
        assert_eq!(current_level(&level_handle), Some(LevelFilter::WARN));
    }

    #[test]
    fn test_config_level_ignored_when_debug_flag_set() {
        let (_layer, level_handle) = detached(false, true);
        level_handle.apply_config_level(Some("warn"));
        assert_eq!(current_level(&level_handle), Some(LevelFilter::INFO));
    }

    #[test]
    fn test_config_level_ignored_when_rust_log_set() {
        let (_layer, level_handle) = detached(true, false);
        level_handle.apply_config_level(Some("error"));
        assert_eq!(current_level(&level_handle), Some(LevelFilter::INFO));
    }
}
