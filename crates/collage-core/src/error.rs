use thiserror::Error;

#[derive(Debug, Error)]
pub enum CollageError {
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    /// Empty image list, zero-sized images or canvas, padding that leaves no room.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// Unrecognised option value (orientation, strategy) or out-of-range parameter.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, CollageError>;
