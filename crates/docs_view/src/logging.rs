use anyhow::{anyhow, Result};
use docs_view_core::config::LogConfig;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// `RUST_LOG` when set, otherwise the configured level and targets.
fn env_filter(config: &LogConfig) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    let mut filter = EnvFilter::try_new(&config.max_level)?;
    for directive in config.log_target.split(',').map(str::trim) {
        if !directive.is_empty() {
            filter = filter.add_directive(directive.parse()?);
        }
    }
    Ok(filter)
}

/// Installs the global subscriber, writing to `log_path` or stderr.
///
/// The returned guard flushes the file writer on drop and must be kept alive.
pub fn init(log_path: Option<PathBuf>, config: &LogConfig) -> Result<Option<WorkerGuard>> {
    let filter = env_filter(config)?;

    let Some(log_path) = log_path else {
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_ansi(std::io::stderr().is_terminal())
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
        return Ok(None);
    };

    let file_name = log_path
        .file_name()
        .ok_or_else(|| anyhow!("no file name in {log_path:?}"))?;

    let directory = log_path
        .parent()
        .ok_or_else(|| anyhow!("{log_path:?} has no parent"))?;

    let file_appender = tracing_appender::rolling::never(directory, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_line_number(true)
        .with_writer(non_blocking)
        .with_ansi(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    Ok(Some(guard))
}
