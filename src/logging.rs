//! Console logs go to stderr so stdout carries only command output. File
//! logs are opt-in and roll daily.

use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_FILE_PREFIX: &str = "structures.log";

/// Flushes the file writer when dropped at the end of `main`.
pub struct FileLogGuard {
    _guard: WorkerGuard,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub level: String,
    /// `Some` only when file logging is switched on.
    pub file_dir: Option<PathBuf>,
}

impl LogSettings {
    pub fn from_env(level: &str) -> Self {
        Self::from_lookup(level, |key| std::env::var(key).ok())
    }

    pub fn from_lookup(level: &str, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let enabled = lookup("STRUCTURES_FILE_LOGS").is_some_and(|v| v == "true" || v == "1");
        let file_dir = enabled.then(|| {
            lookup("LOG_DIR")
                .filter(|dir| !dir.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(default_log_dir)
        });

        Self {
            level: level.to_string(),
            file_dir,
        }
    }
}

fn default_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("structures").join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

fn file_writer(dir: &Path) -> std::io::Result<(NonBlocking, WorkerGuard)> {
    std::fs::create_dir_all(dir)?;
    let appender = RollingFileAppender::new(Rotation::DAILY, dir, LOG_FILE_PREFIX);
    Ok(tracing_appender::non_blocking(appender))
}

pub fn init_tracing(settings: &LogSettings) -> Option<FileLogGuard> {
    let env_filter =
        EnvFilter::try_new(&settings.level).unwrap_or_else(|_| EnvFilter::new("info"));
    let console_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    let mut file_error = None;
    let (file_layer, guard) = match settings.file_dir.as_deref().map(|dir| (dir, file_writer(dir))) {
        Some((_, Ok((writer, guard)))) => (
            Some(fmt::layer().with_writer(writer).with_ansi(false).with_target(true)),
            Some(FileLogGuard { _guard: guard }),
        ),
        Some((dir, Err(err))) => {
            file_error = Some((dir.display().to_string(), err));
            (None, None)
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    if let Some((dir, err)) = file_error {
        tracing::warn!(dir = %dir, error = %err, "file logging disabled");
    }

    guard
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn settings(pairs: &[(&str, &str)]) -> LogSettings {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        LogSettings::from_lookup("debug", move |key: &str| vars.get(key).cloned())
    }

    #[test]
    fn test_file_logs_off_by_default() {
        let s = settings(&[("LOG_DIR", "/var/log/structures")]);
        assert_eq!(s.level, "debug");
        assert_eq!(s.file_dir, None);
    }

    #[test]
    fn test_file_logs_use_log_dir() {
        let s = settings(&[("STRUCTURES_FILE_LOGS", "1"), ("LOG_DIR", "/var/log/structures")]);
        assert_eq!(s.file_dir, Some(PathBuf::from("/var/log/structures")));

        let s = settings(&[("STRUCTURES_FILE_LOGS", "true")]);
        assert!(s.file_dir.is_some());
    }
}
