//! Process-wide logging for the `jotter` binary.
//!
//! # Responsibility
//! - Start size-rotated file logging once per process, in the directory the
//!   CLI resolved from its config (`~/.jotter/logs` by default).
//! - Route panics into the log before the default hook prints them.
//!
//! # Invariants
//! - Repeating `init_logging` with the same level and directory is a no-op.
//! - Any other repeat call fails with `LoggingError::AlreadyActive`.
//! - Events carry metadata only; note titles and bodies are never logged.

use flexi_logger::{
    Cleanup, Criterion, FileSpec, FlexiLoggerError, Logger, LoggerHandle, Naming, WriteMode,
};
use log::{error, info, LevelFilter};
use once_cell::sync::OnceCell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

const LOG_FILE_BASENAME: &str = "jotter";
const ROTATE_AT_BYTES: u64 = 10 * 1024 * 1024;
const KEEP_ROTATED_FILES: usize = 5;
const PANIC_SUMMARY_CHARS: usize = 160;

static LOGGER: OnceCell<RunningLogger> = OnceCell::new();

struct RunningLogger {
    level: LevelFilter,
    dir: PathBuf,
    _handle: LoggerHandle,
}

/// Failure to start file logging.
#[derive(Debug)]
pub enum LoggingError {
    UnknownLevel(String),
    RelativeDir(PathBuf),
    CreateDir { dir: PathBuf, source: io::Error },
    Backend(FlexiLoggerError),
    /// Logging already runs with different settings.
    AlreadyActive { level: LevelFilter, dir: PathBuf },
}

impl Display for LoggingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownLevel(level) => write!(
                f,
                "unknown log level `{level}` (use off, error, warn, info, debug or trace)"
            ),
            Self::RelativeDir(dir) => {
                write!(f, "log directory must be absolute: `{}`", dir.display())
            }
            Self::CreateDir { dir, source } => {
                write!(f, "cannot create log directory `{}`: {source}", dir.display())
            }
            Self::Backend(err) => write!(f, "cannot start file logging: {err}"),
            Self::AlreadyActive { level, dir } => write!(
                f,
                "logging is already active at `{level}` in `{}`",
                dir.display()
            ),
        }
    }
}

impl Error for LoggingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::CreateDir { source, .. } => Some(source),
            Self::Backend(err) => Some(err),
            _ => None,
        }
    }
}

/// Starts file logging under `log_dir`.
///
/// `level` accepts any `log::LevelFilter` name, case-insensitive, plus the
/// alias `warning`.
pub fn init_logging(level: &str, log_dir: &Path) -> Result<(), LoggingError> {
    let level = parse_level(level)?;
    if !log_dir.is_absolute() {
        return Err(LoggingError::RelativeDir(log_dir.to_path_buf()));
    }

    let running = LOGGER.get_or_try_init(|| start(level, log_dir))?;
    if running.level != level || running.dir != log_dir {
        return Err(LoggingError::AlreadyActive {
            level: running.level,
            dir: running.dir.clone(),
        });
    }
    Ok(())
}

/// Level used when neither flags nor config pick one: `debug` for debug
/// builds, `info` otherwise.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn parse_level(level: &str) -> Result<LevelFilter, LoggingError> {
    let trimmed = level.trim();
    if trimmed.eq_ignore_ascii_case("warning") {
        return Ok(LevelFilter::Warn);
    }
    LevelFilter::from_str(trimmed).map_err(|_| LoggingError::UnknownLevel(trimmed.to_string()))
}

fn start(level: LevelFilter, dir: &Path) -> Result<RunningLogger, LoggingError> {
    std::fs::create_dir_all(dir).map_err(|source| LoggingError::CreateDir {
        dir: dir.to_path_buf(),
        source,
    })?;

    let handle = Logger::try_with_str(level.as_str().to_ascii_lowercase())
        .and_then(|logger| {
            logger
                .log_to_file(FileSpec::default().directory(dir).basename(LOG_FILE_BASENAME))
                .rotate(
                    Criterion::Size(ROTATE_AT_BYTES),
                    Naming::Numbers,
                    Cleanup::KeepLogFiles(KEEP_ROTATED_FILES),
                )
                .write_mode(WriteMode::BufferAndFlush)
                .append()
                .format_for_files(flexi_logger::detailed_format)
                .start()
        })
        .map_err(LoggingError::Backend)?;

    hook_panics();
    info!(
        "event=app_start module=logging status=ok os={} version={} level={level}",
        std::env::consts::OS,
        env!("CARGO_PKG_VERSION"),
    );

    Ok(RunningLogger {
        level,
        dir: dir.to_path_buf(),
        _handle: handle,
    })
}

/// Only called from `start`, which `LOGGER` runs at most once.
fn hook_panics() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        // The message may quote note text; keep only the head of it.
        error!(
            "event=panic module=logging status=error summary={}",
            summarize(&info.to_string(), PANIC_SUMMARY_CHARS)
        );
        log::logger().flush();
        default_hook(info);
    }));
}

fn summarize(text: &str, limit: usize) -> String {
    let mut words = text.split_whitespace();
    let mut summary = words.next().unwrap_or_default().to_string();
    for word in words {
        summary.push(' ');
        summary.push_str(word);
    }
    match summary.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}...", &summary[..cut]),
        None => summary,
    }
}

#[cfg(test)]
mod tests {
    use super::{init_logging, parse_level, summarize, LoggingError};
    use log::LevelFilter;
    use std::path::Path;

    #[test]
    fn levels_parse_case_insensitively_with_warning_alias() {
        assert_eq!(parse_level("TRACE").unwrap(), LevelFilter::Trace);
        assert_eq!(parse_level(" Warning ").unwrap(), LevelFilter::Warn);
        assert_eq!(parse_level("off").unwrap(), LevelFilter::Off);
        assert!(matches!(
            parse_level("loud"),
            Err(LoggingError::UnknownLevel(level)) if level == "loud"
        ));
    }

    #[test]
    fn summarize_joins_lines_and_caps_length() {
        assert_eq!(summarize("panicked at\n  src/x.rs:1", 100), "panicked at src/x.rs:1");
        assert_eq!(summarize("abcdef", 3), "abc...");
    }

    #[test]
    fn relative_directory_is_rejected_before_starting() {
        let err = init_logging("info", Path::new("logs")).unwrap_err();
        assert!(matches!(err, LoggingError::RelativeDir(_)));
    }

    #[test]
    fn second_init_must_repeat_the_same_settings() {
        let dir = tempfile::tempdir().unwrap();
        let other = tempfile::tempdir().unwrap();

        init_logging("info", dir.path()).unwrap();
        init_logging("INFO", dir.path()).unwrap();

        assert!(matches!(
            init_logging("debug", dir.path()),
            Err(LoggingError::AlreadyActive { level: LevelFilter::Info, .. })
        ));
        assert!(matches!(
            init_logging("info", other.path()),
            Err(LoggingError::AlreadyActive { .. })
        ));
        log::logger().flush();
        let has_log_file = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(Result::ok)
            .any(|entry| entry.file_name().to_string_lossy().starts_with("jotter"));
        assert!(has_log_file);
    }
}
