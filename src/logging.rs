use std::path::Path;

use tracing_appender::rolling::Rotation;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::EnvFilter;

use crate::error::{PayError, Result};

/// Log to a daily file under `logs_dir`, and to stderr as well when
/// `verbose`. `RUST_LOG` wins over `level`.
pub fn enable_logging(logs_dir: &Path, level: Option<&str>, verbose: bool) -> Result<()> {
    let appender = tracing_appender::rolling::Builder::new()
        .rotation(Rotation::DAILY)
        .max_log_files(5)
        .filename_prefix("paytrack")
        .filename_suffix("log")
        .build(logs_dir)
        .map_err(|e| PayError::Other(format!("log file: {e}")))?;

    let stderr = std::io::stderr.with_filter(move |_| verbose);

    let filter = match std::env::var("RUST_LOG") {
        Ok(directives) if !directives.is_empty() => EnvFilter::new(directives),
        _ => EnvFilter::new(format!(
            "{}={}",
            env!("CARGO_PKG_NAME").replace('-', "_"),
            level.unwrap_or("info")
        )),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(stderr.and(appender))
        .try_init()
        .map_err(|e| PayError::Other(format!("logger: {e}")))?;
    Ok(())
}
