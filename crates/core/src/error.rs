//! Error types for the unlocker library.

use thiserror::Error;

/// Primary error type for opening locked documents and driving the prompt.
#[derive(Error, Debug)]
pub enum UnlockError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("no locked file configured")]
    NoLockedFile,

    #[error("frontend error: {0}")]
    Frontend(String),
}

/// Convenience Result type alias for UnlockError.
pub type Result<T> = std::result::Result<T, UnlockError>;
