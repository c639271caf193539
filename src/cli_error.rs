use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong at the CLI boundary itself — reading a
/// file, parsing `.egg.toml` — as distinct from a pipeline stage's own
/// diagnostics, which are reported through the [`Logger`](egg_errors::Logger)
/// instead of bubbling up as a Rust error.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("could not read '{path}': {source}")]
    Io { path: PathBuf, source: std::io::Error },

    #[error("could not parse config file '{path}': {source}")]
    Config { path: PathBuf, source: toml::de::Error },

    #[error("{0}")]
    Failed(String),
}
