use pocketbook_config::ConfigError;
use pocketbook_core::CoreError;
use pocketbook_domain::ValidationError;
use thiserror::Error;

/// Every failure the application surfaces to its callers.
#[derive(Debug, Error)]
pub enum PocketbookError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Invalid(#[from] ValidationError),
    #[error("Refusing to clear transactions without --yes")]
    ClearNotConfirmed,
}

pub type Result<T> = std::result::Result<T, PocketbookError>;
