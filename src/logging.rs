// Logging setup and conditional logging macros

use std::env;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "wordle-tui";
const LOG_FILE_NAME: &str = "wordle-tui.log";

// Only active in debug builds

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        log::debug!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{}};
}

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        log::info!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {{}};
}

/// Where the TUI writes its log when no `--log-file` is given.
#[must_use]
pub fn default_log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join(APP_DIR).join(LOG_FILE_NAME))
}

/// Log path for the TUI: the cache dir, or the temp dir when there is none.
#[must_use]
pub fn tui_log_path() -> PathBuf {
    default_log_path().unwrap_or_else(|| env::temp_dir().join(APP_DIR).join(LOG_FILE_NAME))
}

/// Where log records should go for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
    /// No logger installed at all.
    Disabled,
}

/// True when `-v` was given or `RUST_LOG` is set.
#[must_use]
pub fn logging_requested(verbosity: u8) -> bool {
    verbosity > 0 || env::var_os(env_logger::DEFAULT_FILTER_ENV).is_some_and(|v| !v.is_empty())
}

/// Pick the log target. The full-screen interface owns the terminal, so it
/// never logs to stderr, and it only creates a log file when asked to log.
#[must_use]
pub fn log_target(explicit_file: Option<&Path>, tui: bool, requested: bool) -> LogTarget {
    match (explicit_file, tui, requested) {
        (Some(path), _, _) => LogTarget::File(path.to_path_buf()),
        (None, true, false) => LogTarget::Disabled,
        (None, true, true) => LogTarget::File(tui_log_path()),
        (None, false, _) => LogTarget::Stderr,
    }
}

/// Map `-v` occurrences to a level. Zero means "let `RUST_LOG` decide".
#[must_use]
pub fn level_for_verbosity(verbosity: u8) -> Option<log::LevelFilter> {
    match verbosity {
        0 => None,
        1 => Some(log::LevelFilter::Info),
        2 => Some(log::LevelFilter::Debug),
        _ => Some(log::LevelFilter::Trace),
    }
}

/// Install the global logger.
///
/// Without a file, records go to stderr. With a file they are appended there
/// instead, which keeps a full-screen terminal clean.
pub fn init_logging(verbosity: u8, log_file: Option<&Path>) -> io::Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(level) = level_for_verbosity(verbosity) {
        builder.filter_level(level);
    }

    if let Some(path) = log_file {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.format(|fmt, record| {
        writeln!(
            fmt,
            "{} [{}] {}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S"),
            record.level(),
            record.args()
        )
    });
    // a logger may already be installed (tests)
    let _ = builder.try_init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for_verbosity() {
        assert_eq!(level_for_verbosity(0), None);
        assert_eq!(level_for_verbosity(1), Some(log::LevelFilter::Info));
        assert_eq!(level_for_verbosity(2), Some(log::LevelFilter::Debug));
        assert_eq!(level_for_verbosity(9), Some(log::LevelFilter::Trace));
    }

    #[test]
    fn test_default_log_path_file_name() {
        if let Some(path) = default_log_path() {
            assert!(path.ends_with("wordle-tui/wordle-tui.log"));
        }
    }

    #[test]
    fn test_tui_log_path_file_name() {
        assert!(tui_log_path().ends_with("wordle-tui/wordle-tui.log"));
    }

    #[test]
    fn test_log_target_explicit_file_wins() {
        let path = Path::new("/tmp/game.log");
        for (tui, requested) in [(false, false), (true, false), (true, true)] {
            assert_eq!(
                log_target(Some(path), tui, requested),
                LogTarget::File(path.to_path_buf())
            );
        }
    }

    #[test]
    fn test_log_target_tui_never_uses_stderr() {
        assert_eq!(log_target(None, true, false), LogTarget::Disabled);
        assert_eq!(log_target(None, true, true), LogTarget::File(tui_log_path()));
    }

    #[test]
    fn test_log_target_line_mode_uses_stderr() {
        assert_eq!(log_target(None, false, false), LogTarget::Stderr);
        assert_eq!(log_target(None, false, true), LogTarget::Stderr);
    }

    #[test]
    fn test_verbosity_requests_logging() {
        assert!(logging_requested(1));
        assert!(logging_requested(3));
    }

    #[test]
    fn test_init_logging_creates_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("game.log");
        init_logging(1, Some(&path)).unwrap();
        assert!(path.exists());
    }
}
