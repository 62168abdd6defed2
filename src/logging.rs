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

/// Installs `env_logger`, filtered by `RUST_LOG` (default `warn`).
///
/// With a log file the output goes there instead of stderr, which would
/// otherwise scribble over the full-screen interface.
pub fn init_logging(log_file: Option<&Path>) -> io::Result<()> {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    if let Some(path) = log_file {
        let file = File::create(path)?;
        builder.target(Target::Pipe(Box::new(file)));
    }
    if let Err(e) = builder.try_init() {
        debug_log!("Logger already installed: {}", e);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_twice_is_harmless() {
        init_logging(None).unwrap();
        init_logging(None).unwrap();
    }

    #[test]
    fn test_init_logging_bad_path_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("game.log");
        assert!(init_logging(Some(&path)).is_err());
    }
}
