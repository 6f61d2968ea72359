use thiserror::Error;

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{failed} of {total} requests failed")]
    JobsFailed { failed: usize, total: usize },

    #[error("Invalid arguments: {0}")]
    Input(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Era5(#[from] era5cli::Error),
}
