//! File-based tracing setup. The terminal belongs to the UI, so logs go to
//! a file that can be followed with `tail -f`.

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("failed to create log directory at {path:?}: {source}")]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid log file path: {0:?}")]
    InvalidPath(PathBuf),

    #[error("tracing subscriber already initialized")]
    SubscriberAlreadySet,
}

/// `<cache dir>/pokedex-tui/pokedex.log`, falling back to the working
/// directory when no cache dir is known.
pub fn default_log_path() -> PathBuf {
    dirs_next::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pokedex-tui")
        .join("pokedex.log")
}

/// Installs the global subscriber. Honors `RUST_LOG`, defaults to `info`.
pub fn init(log_path: &Path) -> Result<(), LoggingError> {
    use tracing_subscriber::EnvFilter;

    let file_name = log_path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| LoggingError::InvalidPath(log_path.to_path_buf()))?;
    let directory = match log_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    std::fs::create_dir_all(&directory).map_err(|source| LoggingError::DirectoryCreation {
        path: directory.clone(),
        source,
    })?;

    let file_appender = tracing_appender::rolling::never(&directory, file_name);
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(file_appender)
        .with_ansi(false)
        .try_init()
        .map_err(|_| LoggingError::SubscriberAlreadySet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;

    #[test]
    #[serial(tracing_init)]
    fn init_creates_missing_directory() {
        let test_dir = std::env::temp_dir().join("pokedex_test_logs_create");
        let log_file = test_dir.join("pokedex.log");
        let _ = fs::remove_dir_all(&test_dir);

        // Subscriber may already be set by another test; the directory is
        // created either way.
        let _ = init(&log_file);

        assert!(test_dir.exists(), "log directory should exist: {test_dir:?}");
        let _ = fs::remove_dir_all(&test_dir);
    }

    #[test]
    #[serial(tracing_init)]
    fn init_rejects_path_without_file_name() {
        let result = init(Path::new("/"));
        assert!(matches!(result, Err(LoggingError::InvalidPath(_))));
    }

    #[test]
    fn default_path_ends_with_log_file() {
        let path = default_log_path();
        assert!(path.ends_with("pokedex-tui/pokedex.log"));
    }
}
