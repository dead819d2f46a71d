use thiserror::Error;

/// Panel and map image errors
#[derive(Debug, Error)]
pub enum DisplayError {
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
