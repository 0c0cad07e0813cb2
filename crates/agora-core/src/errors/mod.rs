mod factorization_error;
mod stats_error;

pub use factorization_error::FactorizationError;
pub use stats_error::StatsError;

/// Result alias used across the workspace.
pub type AgoraResult<T> = Result<T, AgoraError>;

/// Top-level error for every Agora subsystem.
#[derive(Debug, thiserror::Error)]
pub enum AgoraError {
    #[error("group information is required for calculating {metric}")]
    GroupDataRequired { metric: &'static str },

    #[error("opinion group not present in vote data: {group}")]
    UnknownGroup { group: String },

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("stats error: {0}")]
    StatsError(#[from] StatsError),

    #[error("factorization error: {0}")]
    FactorizationError(#[from] FactorizationError),
}
