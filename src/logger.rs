use crate::errors::PlaceClipError;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{fmt, EnvFilter};

pub enum LogTarget {
    Stderr,
    File(PathBuf),
    /// Nothing is logged. Used while the terminal screen owns the display.
    Disabled,
}

pub fn initialize_logger(target: LogTarget) -> Result<(), PlaceClipError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("placeclip=info"));

    let result = match target {
        LogTarget::Disabled => return Ok(()),
        LogTarget::Stderr => {
            let subscriber = fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)
        }
        LogTarget::File(path) => {
            let file = OpenOptions::new().create(true).append(true).open(&path)?;
            let subscriber = fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .finish();
            tracing::subscriber::set_global_default(subscriber)
        }
    };

    result.map_err(|e| PlaceClipError::ConfigError(format!("Failed to set global logger: {}", e)))
}
