use crate::config::{LoggingConfig, Section};
use std::{
    io::{IsTerminal, Write},
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{filter::Targets, fmt};

use file_rotate::{
    compression::Compression,
    suffix::{AppendTimestamp, FileLimit},
    ContentLimit, FileRotate,
};

const DEFAULT_SECTION: &str = "default";

// -------- level helpers --------
fn parse_level_filter(s: &str) -> LevelFilter {
    match s.trim().to_ascii_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        "off" | "none" => LevelFilter::OFF,
        _ => LevelFilter::INFO,
    }
}

/// Build a per-target filter: the "default" section sets the fallback level,
/// every other section name is a target prefix (e.g. `feedback_mgt`, `sea_orm`).
fn build_targets(cfg: &LoggingConfig, level_of: impl Fn(&Section) -> &str) -> Targets {
    let fallback = cfg
        .get(DEFAULT_SECTION)
        .map(|s| parse_level_filter(level_of(s)))
        .unwrap_or(LevelFilter::INFO);

    cfg.iter()
        .filter(|(name, _)| name.as_str() != DEFAULT_SECTION)
        .fold(Targets::new().with_default(fallback), |targets, (name, s)| {
            targets.with_target(name.clone(), parse_level_filter(level_of(s)))
        })
}

fn file_level(section: &Section) -> &str {
    if section.file_level.trim().is_empty() {
        &section.console_level
    } else {
        &section.file_level
    }
}

// -------- rotating writer for files --------
#[derive(Clone)]
struct RotWriter(Arc<Mutex<FileRotate<AppendTimestamp>>>);

impl<'a> fmt::MakeWriter<'a> for RotWriter {
    type Writer = RotWriterHandle;
    fn make_writer(&'a self) -> Self::Writer {
        RotWriterHandle(self.0.clone())
    }
}

struct RotWriterHandle(Arc<Mutex<FileRotate<AppendTimestamp>>>);

impl Write for RotWriterHandle {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self.0.lock() {
            Ok(mut w) => w.write(buf),
            // a poisoned writer drops the record rather than taking the process down
            Err(_) => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self.0.lock() {
            Ok(mut w) => w.flush(),
            Err(_) => Ok(()),
        }
    }
}

/// Resolve a log file path against `base_dir` (home_dir).
fn resolve_log_path(file: &str, base_dir: &Path) -> PathBuf {
    let p = Path::new(file);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        base_dir.join(p)
    }
}

fn create_rotating_writer(section: &Section, base_dir: &Path) -> Option<RotWriter> {
    if section.file.trim().is_empty() {
        return None;
    }

    let log_path = resolve_log_path(&section.file, base_dir);
    if let Some(parent) = log_path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            eprintln!(
                "Failed to create log directory '{}': {e}",
                parent.to_string_lossy()
            );
            return None;
        }
    }

    let max_bytes = section.max_size_mb.unwrap_or(100) * 1024 * 1024;
    let max_files = section.max_backups.unwrap_or(3);
    let rot = FileRotate::new(
        &log_path,
        AppendTimestamp::default(FileLimit::MaxFiles(max_files)),
        ContentLimit::BytesSurpassed(max_bytes as usize),
        Compression::None,
        #[cfg(unix)]
        None,
    );
    Some(RotWriter(Arc::new(Mutex::new(rot))))
}

// -------- public init --------

/// Initialize logging from a configuration.
/// - `cfg`: LoggingConfig containing the logging sections
/// - `base_dir`: base directory used to resolve relative log file paths (usually server.home_dir)
///
/// Only the first call installs a subscriber; later calls are no-ops.
pub fn init_logging_from_config(cfg: &LoggingConfig, base_dir: &Path) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer, Registry};

    // Bridge `log` → `tracing` *before* installing the subscriber
    let _ = tracing_log::LogTracer::init();

    let console_layer = fmt::layer()
        .with_ansi(std::io::stdout().is_terminal())
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_filter(build_targets(cfg, |s| s.console_level.as_str()));

    let file_layer = cfg
        .get(DEFAULT_SECTION)
        .and_then(|s| create_rotating_writer(s, base_dir))
        .map(|writer| {
            fmt::layer()
                .json()
                .with_ansi(false)
                .with_target(true)
                .with_level(true)
                .with_timer(fmt::time::UtcTime::rfc_3339())
                .with_writer(writer)
                .with_filter(build_targets(cfg, file_level))
        });

    if Registry::default()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .is_err()
    {
        tracing::warn!("logging already initialized; keeping the existing subscriber");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn section(console: &str, file_level: &str) -> Section {
        Section {
            console_level: console.to_string(),
            file: String::new(),
            file_level: file_level.to_string(),
            max_backups: None,
            max_size_mb: None,
        }
    }

    #[test]
    fn level_strings_map_to_filters() {
        assert_eq!(parse_level_filter("TRACE"), LevelFilter::TRACE);
        assert_eq!(parse_level_filter("debug"), LevelFilter::DEBUG);
        assert_eq!(parse_level_filter("off"), LevelFilter::OFF);
        assert_eq!(parse_level_filter("bogus"), LevelFilter::INFO);
    }

    #[test]
    fn targets_use_default_section_as_fallback() {
        let mut cfg: LoggingConfig = HashMap::new();
        cfg.insert("default".into(), section("warn", ""));
        cfg.insert("feedback_mgt".into(), section("debug", "trace"));

        let console = build_targets(&cfg, |s| s.console_level.as_str());
        assert!(console.would_enable("feedback_mgt::domain::service", &tracing::Level::DEBUG));
        assert!(!console.would_enable("sea_orm::driver", &tracing::Level::INFO));
        assert!(console.would_enable("sea_orm::driver", &tracing::Level::WARN));

        let file = build_targets(&cfg, file_level);
        assert!(file.would_enable("feedback_mgt", &tracing::Level::TRACE));
        // empty file_level falls back to the console level
        assert!(!file.would_enable("hyper", &tracing::Level::INFO));
    }

    #[test]
    fn empty_file_disables_the_file_sink() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(create_rotating_writer(&section("info", "info"), tmp.path()).is_none());

        let mut with_file = section("info", "info");
        with_file.file = "logs/app.log".into();
        assert!(create_rotating_writer(&with_file, tmp.path()).is_some());
        assert!(tmp.path().join("logs").exists());
    }

    #[test]
    fn relative_log_paths_resolve_against_base_dir() {
        let base = Path::new("/srv/feedback");
        assert_eq!(
            resolve_log_path("logs/a.log", base),
            PathBuf::from("/srv/feedback/logs/a.log")
        );
        assert_eq!(resolve_log_path("/var/log/a.log", base), PathBuf::from("/var/log/a.log"));
    }
}
