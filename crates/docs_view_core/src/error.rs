use std::path::PathBuf;

/// Errors of the ambient layers around the core.
///
/// Rendering itself never fails; only reading files and configuration can.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),
    #[error("no project directory available for the default config file")]
    NoProjectDir,
}

pub type Result<T> = std::result::Result<T, Error>;
