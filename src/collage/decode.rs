/// Background image decoding
///
/// Decoding is CPU-bound, so it runs on a blocking task and the caller
/// awaits the completion. Any raster format the `image` crate understands
/// is accepted.

use std::path::PathBuf;

use image::DynamicImage;
use tokio::task;

use crate::error::CollageError;

/// Decode an image file off the UI loop
pub async fn decode_image(path: PathBuf) -> Result<DynamicImage, CollageError> {
    task::spawn_blocking(move || {
        image::open(&path).map_err(|source| CollageError::Decode { path, source })
    })
    .await?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_decode_missing_file_fails() {
        let result = decode_image(PathBuf::from("/nonexistent/image.png")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_decode_reads_written_image() {
        let path = std::env::temp_dir().join(format!(
            "collage-maker-test-{}-decode.png",
            std::process::id()
        ));
        image::RgbaImage::from_pixel(20, 30, image::Rgba([0, 255, 0, 255]))
            .save(&path)
            .unwrap();

        let decoded = decode_image(path.clone()).await.unwrap();
        assert_eq!((decoded.width(), decoded.height()), (20, 30));

        let _ = std::fs::remove_file(path);
    }
}
