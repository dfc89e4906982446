//! Error types for the ln-app session layer.

/// Application error type that wraps errors from the backend crates
/// and gives the CLI a single error to report.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Codec error: {0}")]
    Codec(String),

    #[error("Network error: {0}")]
    Graph(String),

    #[error("Simulation error: {0}")]
    Simulation(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for ln-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<ln_io::CodecError> for AppError {
    fn from(err: ln_io::CodecError) -> Self {
        AppError::Codec(err.to_string())
    }
}

impl From<ln_graph::GraphError> for AppError {
    fn from(err: ln_graph::GraphError) -> Self {
        AppError::Graph(err.to_string())
    }
}

impl From<ln_sim::SimError> for AppError {
    fn from(err: ln_sim::SimError) -> Self {
        AppError::Simulation(err.to_string())
    }
}

impl From<ln_core::LnError> for AppError {
    fn from(err: ln_core::LnError) -> Self {
        AppError::Config(err.to_string())
    }
}
