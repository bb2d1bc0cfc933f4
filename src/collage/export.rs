/// PNG export of the finished collage
///
/// Encoding runs on a blocking task; the file write uses tokio's async fs.
/// Export only ever happens on an explicit user action, never automatically
/// after a render.

use std::io::Cursor;
use std::path::PathBuf;

use image::ImageFormat;
use tokio::task;

use crate::collage::compositor::Surface;
use crate::error::CollageError;

/// Default filename offered by the save dialog
pub const DEFAULT_FILENAME: &str = "collage.png";

/// Encode the surface as PNG bytes (288x288 RGBA)
pub fn encode_png(surface: &Surface) -> Result<Vec<u8>, CollageError> {
    let mut bytes = Vec::new();
    surface
        .as_image()
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(CollageError::Encode)?;
    Ok(bytes)
}

/// Encode and write the collage to `path`.
///
/// The surface passed in is a snapshot: a re-render after the save was
/// triggered does not change what gets written.
pub async fn save_collage(surface: Surface, path: PathBuf) -> Result<PathBuf, CollageError> {
    let bytes = task::spawn_blocking(move || encode_png(&surface)).await??;

    tokio::fs::write(&path, bytes)
        .await
        .map_err(|source| CollageError::Write {
            path: path.clone(),
            source,
        })?;

    println!("💾 Saved collage to {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collage::compositor::SURFACE_SIZE;
    use image::{DynamicImage, Rgba, RgbaImage};

    fn rendered_surface() -> Surface {
        let mut surface = Surface::new();
        surface.draw_top(&DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            8,
            8,
            Rgba([255, 0, 0, 255]),
        )));
        surface.draw_bottom(&DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            8,
            8,
            Rgba([0, 0, 255, 255]),
        )));
        surface
    }

    #[test]
    fn test_png_round_trip_matches_surface() {
        let surface = rendered_surface();

        let bytes = encode_png(&surface).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();

        assert_eq!(decoded.dimensions(), (SURFACE_SIZE, SURFACE_SIZE));
        assert_eq!(&decoded, surface.as_image());
    }

    #[tokio::test]
    async fn test_save_collage_writes_file() {
        let path = std::env::temp_dir().join(format!(
            "collage-maker-test-{}-save.png",
            std::process::id()
        ));

        let saved = save_collage(rendered_surface(), path.clone()).await.unwrap();
        assert_eq!(saved, path);

        let decoded = image::open(&path).unwrap();
        assert_eq!(decoded.width(), SURFACE_SIZE);
        assert_eq!(decoded.height(), SURFACE_SIZE);

        let _ = std::fs::remove_file(path);
    }
}
