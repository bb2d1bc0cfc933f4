/// Error types for collage rendering and export
///
/// Decode failures are deliberately absorbed by the renderer (the affected
/// half just stays blank), so most of these only surface on the save path.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CollageError {
    /// An input image could not be read or decoded
    #[error("failed to decode image {path:?}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The rendered surface could not be encoded as PNG
    #[error("failed to encode collage as PNG")]
    Encode(#[source] image::ImageError),

    /// Writing the exported file failed
    #[error("failed to write {path:?}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A background task panicked or was cancelled
    #[error("background task failed")]
    Join(#[from] tokio::task::JoinError),
}
