use thiserror::Error;

/// Fatal renderer errors. Problems inside a single block or element never
/// surface here; they degrade to a [`crate::RenderWarning`] instead.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("document must be an array of blocks or an object with a `blocks` array")]
    InvalidDocument,
    #[error("unknown renderer mode `{0}`")]
    UnknownMode(String),
    #[error("unsupported schema version: expected {expected}, got {got}")]
    UnsupportedSchemaVersion { expected: u32, got: u32 },
    #[error("invalid document json: {0}")]
    Json(#[from] serde_json::Error),
}
