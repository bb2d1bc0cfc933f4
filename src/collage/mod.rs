/// Collage rendering module
///
/// This module handles:
/// - Background decoding of the two selected images (decode.rs)
/// - Compositing them onto the fixed 288x288 surface (compositor.rs)
/// - Encoding and saving the finished PNG (export.rs)

pub mod compositor;
pub mod decode;
pub mod export;

use std::path::PathBuf;

use self::compositor::{Surface, SURFACE_SIZE};

/// Render a collage from the two selected files.
///
/// Both decodes run concurrently on blocking tasks and are joined before
/// any drawing happens, so the output is identical no matter which decode
/// finishes first. Drawing is always issued in selection order: the first
/// image on top, the second on the bottom.
///
/// A file that fails to decode leaves its half cleared and unframed; the
/// render still completes.
pub async fn create_collage(first: PathBuf, second: PathBuf) -> Surface {
    let (top, bottom) = tokio::join!(decode::decode_image(first), decode::decode_image(second));

    let mut surface = Surface::new();

    match top {
        Ok(img) => surface.draw_top(&img),
        Err(e) => eprintln!("⚠️  Top image skipped: {}", e),
    }
    match bottom {
        Ok(img) => surface.draw_bottom(&img),
        Err(e) => eprintln!("⚠️  Bottom image skipped: {}", e),
    }

    println!("🖼️  Collage rendered ({}x{})", SURFACE_SIZE, SURFACE_SIZE);
    surface
}
