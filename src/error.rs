use thiserror::Error;

/// Error taxonomy for the analysis pipeline and its collaborators.
///
/// The HTTP layer maps these onto status codes: `Validation` and
/// `InvalidImageFormat` become 400, `NotFound` 404, everything else 500.
#[derive(Error, Debug)]
pub enum HotDogError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("invalid image format: {0}")]
    InvalidImageFormat(String),

    #[error("AI classification failed: {0}")]
    Ai(String),

    #[error("image upload failed: {0}")]
    Upload(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, HotDogError>;
