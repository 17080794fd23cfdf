use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use time::format_description::well_known::Rfc3339;
use tracing_subscriber::fmt::time::OffsetTime;
use tracing_subscriber::EnvFilter;

use crate::time_utils::local_offset;

const LOG_FILTER_ENV: &str = "HARVEST_TUI_LOG";

/// Install the global subscriber, appending to `path`.
/// The terminal belongs to the UI, so nothing is written to stdout.
pub fn init(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter_from(std::env::var(LOG_FILTER_ENV).ok()))
        .with_writer(Mutex::new(file))
        .with_timer(OffsetTime::new(local_offset(), Rfc3339))
        .with_ansi(false)
        .with_target(true)
        .try_init();
    Ok(())
}

fn filter_from(directive: Option<String>) -> EnvFilter {
    directive
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_info() {
        assert_eq!(filter_from(None).to_string(), "info");
        assert_eq!(filter_from(Some("  ".to_string())).to_string(), "info");
    }

    #[test]
    fn honours_directive() {
        let filter = filter_from(Some("harvest_tui=debug".to_string()));
        assert_eq!(filter.to_string(), "harvest_tui=debug");
    }

    #[test]
    fn creates_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("harvest-tui.log");
        init(&path).unwrap();
        assert!(path.exists());
    }
}
