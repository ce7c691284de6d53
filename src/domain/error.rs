use thiserror::Error;

use crate::extract::ExtractError;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Invalid video page URL")]
    InvalidInput,

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error("API error: {0}")]
    Api(String),

    #[error("Download error: {0}")]
    Download(String),

    #[error("I/O error: {0}")]
    Io(String),
}
