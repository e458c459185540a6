use thiserror::Error;

#[derive(Debug, Error)]
pub enum MapError {
    #[error("Surface creation failed: {0}")]
    Create(String),

    #[error("Source already exists: {0}")]
    DuplicateSource(String),

    #[error("Layer already exists: {0}")]
    DuplicateLayer(String),

    #[error("Unknown source: {0}")]
    UnknownSource(String),

    #[error("Unknown layer: {0}")]
    UnknownLayer(String),
}
