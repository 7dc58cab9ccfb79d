// Conditional logging macros - only active in debug builds

use env_logger::{Builder, Env, Target};
use std::fs::File;
use std::io;
use std::path::Path;

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

pub const DEFAULT_FILTER: &str = "warn";

/// Where log records go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogDestination<'a> {
    Stderr,
    File(&'a Path),
    /// Dropped while the full-screen form owns the terminal.
    Discard,
}

impl<'a> LogDestination<'a> {
    pub fn choose(log_file: Option<&'a Path>, full_screen: bool) -> Self {
        match log_file {
            Some(path) => Self::File(path),
            None if full_screen => Self::Discard,
            None => Self::Stderr,
        }
    }
}

/// Install the global logger. `RUST_LOG` overrides the default filter.
pub fn init_logging(destination: LogDestination) -> io::Result<()> {
    let mut builder = Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER));
    match destination {
        LogDestination::Stderr => {}
        LogDestination::File(path) => {
            let file = File::create(path)?;
            builder.target(Target::Pipe(Box::new(file)));
        }
        LogDestination::Discard => {
            builder.target(Target::Pipe(Box::new(io::sink())));
        }
    }
    // A second init (tests, embedding) keeps the first logger.
    let _ = builder.try_init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_twice_is_harmless() {
        assert!(init_logging(LogDestination::Stderr).is_ok());
        assert!(init_logging(LogDestination::Discard).is_ok());
    }

    #[test]
    fn test_full_screen_without_log_file_discards() {
        assert_eq!(LogDestination::choose(None, true), LogDestination::Discard);
        assert_eq!(LogDestination::choose(None, false), LogDestination::Stderr);
    }

    #[test]
    fn test_log_file_wins_in_every_mode() {
        let path = Path::new("game.log");
        assert_eq!(
            LogDestination::choose(Some(path), true),
            LogDestination::File(path)
        );
        assert_eq!(
            LogDestination::choose(Some(path), false),
            LogDestination::File(path)
        );
    }

    #[test]
    fn test_init_logging_creates_log_file() {
        let path = std::env::temp_dir().join("word_guess_logging_test.log");
        let _ = std::fs::remove_file(&path);
        assert!(init_logging(LogDestination::File(&path)).is_ok());
        assert!(path.exists());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_init_logging_bad_path() {
        let path = std::env::temp_dir()
            .join("word_guess_missing_dir")
            .join("nested")
            .join("out.log");
        assert!(init_logging(LogDestination::File(&path)).is_err());
    }
}
