/// Selection state for the two collage inputs
///
/// Compositing is only ever attempted when exactly two images are selected
/// and the user has explicitly triggered it. The generation counter makes
/// re-triggering last-trigger-wins: a render result arriving for an older
/// generation is thrown away.

use std::path::PathBuf;

/// Number of images a collage needs
pub const REQUIRED_IMAGES: usize = 2;

/// One selected input: the original file plus its transient preview
/// thumbnail (a cache file owned by the `PreviewRegistry`). The preview is
/// a separate field, never an augmentation of the picked file itself.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageSource {
    /// Full path of the file the user picked
    pub path: PathBuf,
    /// Downscaled preview in the cache dir; None if generation failed
    pub preview_path: Option<PathBuf>,
}

/// Current selection and render trigger
#[derive(Debug, Default)]
pub struct CollageState {
    images: Vec<ImageSource>,
    render_triggered: bool,
    generation: u64,
    selection_generation: u64,
}

impl CollageState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamp a new pick before its previews are generated. Preview batches
    /// carrying an older stamp lost the race to a newer pick and must be
    /// dropped on arrival.
    pub fn begin_selection(&mut self) -> u64 {
        self.selection_generation += 1;
        self.selection_generation
    }

    /// Whether a finished preview batch belongs to the latest pick
    pub fn is_current_selection(&self, generation: u64) -> bool {
        generation == self.selection_generation
    }

    /// Replace the selection. Any previous collage stays hidden until the
    /// user triggers a new render.
    pub fn set_images(&mut self, images: Vec<ImageSource>) {
        self.images = images;
        self.render_triggered = false;
        self.generation += 1;
    }

    pub fn images(&self) -> &[ImageSource] {
        &self.images
    }

    /// True when the create action should be offered
    pub fn can_create(&self) -> bool {
        self.images.len() == REQUIRED_IMAGES
    }

    pub fn render_triggered(&self) -> bool {
        self.render_triggered
    }

    /// Mark the render as triggered and hand back the two input paths in
    /// selection order, stamped with the new generation. Returns None
    /// unless exactly two images are selected.
    pub fn trigger_render(&mut self) -> Option<(PathBuf, PathBuf, u64)> {
        if !self.can_create() {
            return None;
        }
        self.render_triggered = true;
        self.generation += 1;
        Some((
            self.images[0].path.clone(),
            self.images[1].path.clone(),
            self.generation,
        ))
    }

    /// Whether a completed render belongs to the latest trigger
    pub fn is_current(&self, generation: u64) -> bool {
        self.render_triggered && generation == self.generation
    }
}
