//! CLI error types.

use tome_config::ConfigError;
use tome_files::FilesError;
use tome_nav::NavError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Files(#[from] FilesError),

    #[error("{0}")]
    Nav(#[from] NavError),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Aborted with {0} warning(s) in strict mode")]
    Strict(usize),
}
