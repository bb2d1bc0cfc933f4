/// Preview thumbnail generation and lifetime tracking
///
/// Each selected image gets a small cached thumbnail for the selection
/// strip. The registry owns every outstanding preview file and deletes
/// them as soon as a new selection supersedes them, and on shutdown via
/// `Drop`, rather than leaving them for the OS cache cleaner.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use image::imageops::FilterType;
use tokio::task;

use crate::state::selection::ImageSource;

/// Size of the square selection previews
pub const PREVIEW_SIZE: u32 = 144;

/// Process-unique sequence for preview filenames
static PREVIEW_SEQ: AtomicU64 = AtomicU64::new(0);

/// Get the preview cache directory
/// Returns ~/.cache/collage-maker/previews on Linux
pub fn preview_cache_dir() -> PathBuf {
    let mut path = dirs_next::cache_dir()
        .or_else(dirs_next::home_dir)
        .unwrap_or_else(std::env::temp_dir);

    path.push("collage-maker");
    path.push("previews");

    if let Err(e) = fs::create_dir_all(&path) {
        eprintln!("⚠️  Could not create preview cache dir: {}", e);
    }

    path
}

/// Owns the preview files currently on disk
#[derive(Debug, Default)]
pub struct PreviewRegistry {
    outstanding: Vec<PathBuf>,
}

impl PreviewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of the preview files behind a fresh selection,
    /// releasing whatever the previous selection left behind.
    pub fn replace(&mut self, sources: &[ImageSource]) {
        self.release_all();
        self.outstanding = sources
            .iter()
            .filter_map(|s| s.preview_path.clone())
            .collect();
    }

    /// Delete all outstanding preview files
    pub fn release_all(&mut self) {
        let released = self.outstanding.len();
        for path in self.outstanding.drain(..) {
            if let Err(e) = fs::remove_file(&path) {
                eprintln!("⚠️  Could not release preview {}: {}", path.display(), e);
            }
        }
        if released > 0 {
            println!("🧹 Released {} preview file(s)", released);
        }
    }
}

impl Drop for PreviewRegistry {
    fn drop(&mut self) {
        self.release_all();
    }
}

/// Delete the preview files of a batch that was superseded by a newer
/// pick before it was ever adopted by the registry
pub fn discard_previews(sources: &[ImageSource]) {
    for path in sources.iter().filter_map(|s| s.preview_path.as_ref()) {
        if let Err(e) = fs::remove_file(path) {
            eprintln!("⚠️  Could not discard preview {}: {}", path.display(), e);
        }
    }
}

/// Generate preview thumbnails for a fresh selection on a blocking task.
/// A file that cannot be decoded keeps its spot in the selection with no
/// preview.
pub async fn generate_previews(paths: Vec<PathBuf>, cache_dir: PathBuf) -> Vec<ImageSource> {
    let result = task::spawn_blocking(move || {
        paths
            .into_iter()
            .map(|path| {
                let preview_path = generate_preview(&path, &cache_dir);
                ImageSource { path, preview_path }
            })
            .collect()
    })
    .await;

    match result {
        Ok(sources) => sources,
        Err(e) => {
            eprintln!("⚠️  Preview task failed: {}", e);
            Vec::new()
        }
    }
}

/// Downscale one image into the cache dir. None if decode or save fails.
fn generate_preview(path: &Path, cache_dir: &Path) -> Option<PathBuf> {
    let img = image::open(path).ok()?;

    // Center-crop to an exact square cell; JPEG output, so strip any
    // alpha channel too
    let preview = img
        .resize_to_fill(PREVIEW_SIZE, PREVIEW_SIZE, FilterType::Lanczos3)
        .to_rgb8();

    let seq = PREVIEW_SEQ.fetch_add(1, Ordering::Relaxed);
    let preview_path = cache_dir.join(format!("{}-{}.jpg", std::process::id(), seq));

    preview.save(&preview_path).ok()?;

    println!("📸 Generated preview: {}", preview_path.display());
    Some(preview_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "collage-maker-test-{}-{}",
            std::process::id(),
            name
        ))
    }

    fn source_with_preview(preview: PathBuf) -> ImageSource {
        ImageSource {
            path: PathBuf::from("picked.png"),
            preview_path: Some(preview),
        }
    }

    #[test]
    fn test_release_all_removes_outstanding_files() {
        let preview = temp_file("release.jpg");
        fs::write(&preview, b"preview bytes").unwrap();

        let mut registry = PreviewRegistry::new();
        registry.replace(&[source_with_preview(preview.clone())]);
        assert!(preview.exists());

        registry.release_all();
        assert!(!preview.exists());
    }

    #[test]
    fn test_replace_releases_previous_selection() {
        let old = temp_file("old.jpg");
        let new = temp_file("new.jpg");
        fs::write(&old, b"old").unwrap();
        fs::write(&new, b"new").unwrap();

        let mut registry = PreviewRegistry::new();
        registry.replace(&[source_with_preview(old.clone())]);
        registry.replace(&[source_with_preview(new.clone())]);

        assert!(!old.exists());
        assert!(new.exists());

        // Teardown releases the rest
        drop(registry);
        assert!(!new.exists());
    }

    #[tokio::test]
    async fn test_generate_previews_keeps_undecodable_sources() {
        let sources = generate_previews(
            vec![PathBuf::from("/nonexistent/a.png")],
            std::env::temp_dir(),
        )
        .await;

        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].path, PathBuf::from("/nonexistent/a.png"));
        assert!(sources[0].preview_path.is_none());
    }

    #[tokio::test]
    async fn test_generate_previews_crops_to_square_cell() {
        // Non-square source still yields an exact 144x144 preview
        let src = temp_file("preview-src.png");
        image::RgbaImage::from_pixel(400, 200, image::Rgba([0, 255, 0, 255]))
            .save(&src)
            .unwrap();

        let sources = generate_previews(vec![src.clone()], std::env::temp_dir()).await;
        let preview = sources[0].preview_path.clone().unwrap();

        let img = image::open(&preview).unwrap();
        assert_eq!((img.width(), img.height()), (PREVIEW_SIZE, PREVIEW_SIZE));

        let _ = fs::remove_file(src);
        let _ = fs::remove_file(preview);
    }

    #[test]
    fn test_discard_removes_unadopted_batch() {
        let preview = temp_file("discard.jpg");
        fs::write(&preview, b"stale batch").unwrap();

        discard_previews(&[source_with_preview(preview.clone())]);
        assert!(!preview.exists());
    }
}
