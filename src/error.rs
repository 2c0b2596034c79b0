use thiserror::Error;

/// Crate-wide error type for the fingerprinting and retrieval pipeline.
#[derive(Debug, Error)]
pub enum FingerprintError {
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("track '{0}' has already been ingested")]
    DuplicateTrack(String),

    #[error("index is corrupt: {0}")]
    CorruptIndex(String),

    #[error("index unavailable: {0}")]
    IndexUnavailable(String),

    #[error("scorer received empty input")]
    EmptyInput,

    #[error("failed to decode audio: {0}")]
    Decode(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FingerprintError>;
