use iced::widget::{button, column, container, image as image_widget, text, Column, Row};
use iced::{Alignment, Element, Length, Task, Theme};
use rfd::FileDialog;
use std::path::PathBuf;

mod collage;
mod error;
mod state;

use collage::compositor::{Surface, SURFACE_SIZE};
use state::previews::{self, PreviewRegistry, PREVIEW_SIZE};
use state::selection::{CollageState, ImageSource, REQUIRED_IMAGES};

/// File extensions offered by the image picker
const IMAGE_EXTENSIONS: [&str; 7] = ["png", "jpg", "jpeg", "gif", "bmp", "webp", "tiff"];

/// Main application state
struct CollageMaker {
    /// Current selection and render trigger
    state: CollageState,
    /// Owns the preview thumbnails on disk
    previews: PreviewRegistry,
    /// Latest rendered collage, if any
    rendered: Option<Surface>,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// User clicked the "Select Images" button
    PickImages,
    /// Background preview generation completed for the stamped pick
    PreviewsReady(u64, Vec<ImageSource>),
    /// User clicked the "Create Collage" button
    CreateCollage,
    /// Background render completed for the stamped generation
    RenderComplete(u64, Surface),
    /// User clicked the "Save PNG" button
    SaveCollage,
    /// Background export finished
    SaveComplete(Result<PathBuf, String>),
}

impl CollageMaker {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        println!(
            "🖼️  Collage Maker ready. Preview cache: {}",
            previews::preview_cache_dir().display()
        );

        (
            CollageMaker {
                state: CollageState::new(),
                previews: PreviewRegistry::new(),
                rendered: None,
                status: format!("Select {} images to get started.", REQUIRED_IMAGES),
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PickImages => {
                // Show the native multi-file picker
                let files = FileDialog::new()
                    .set_title("Select Two Images")
                    .add_filter("Images", &IMAGE_EXTENSIONS)
                    .pick_files();

                if let Some(paths) = files {
                    let generation = self.state.begin_selection();
                    self.status = format!("Loading {} image(s)...", paths.len());

                    return Task::perform(
                        previews::generate_previews(paths, previews::preview_cache_dir()),
                        move |sources| Message::PreviewsReady(generation, sources),
                    );
                }

                Task::none()
            }
            Message::PreviewsReady(generation, sources) => {
                // Last pick wins: a batch from an older pick must not
                // clobber the current selection, and its files are never
                // adopted by the registry
                if !self.state.is_current_selection(generation) {
                    previews::discard_previews(&sources);
                    return Task::none();
                }

                // A new selection supersedes the old previews and hides any
                // previous collage until the user triggers a new render
                self.previews.replace(&sources);
                self.rendered = None;

                let count = sources.len();
                self.state.set_images(sources);

                self.status = if self.state.can_create() {
                    format!("{} images selected. Ready to create.", REQUIRED_IMAGES)
                } else {
                    format!("{} image(s) selected.", count)
                };

                Task::none()
            }
            Message::CreateCollage => {
                if let Some((first, second, generation)) = self.state.trigger_render() {
                    self.rendered = None;
                    self.status = "Creating collage...".to_string();

                    return Task::perform(
                        collage::create_collage(first, second),
                        move |surface| Message::RenderComplete(generation, surface),
                    );
                }

                Task::none()
            }
            Message::RenderComplete(generation, surface) => {
                // Last trigger wins: results from older triggers are dropped
                if !self.state.is_current(generation) {
                    return Task::none();
                }

                self.rendered = Some(surface);
                self.status = "✅ Collage ready.".to_string();

                Task::none()
            }
            Message::SaveCollage => {
                let Some(surface) = self.rendered.clone() else {
                    return Task::none();
                };

                let target = FileDialog::new()
                    .set_title("Save Collage")
                    .set_file_name(collage::export::DEFAULT_FILENAME)
                    .save_file();

                if let Some(path) = target {
                    self.status = format!("Saving to {}...", path.display());

                    return Task::perform(
                        async move {
                            collage::export::save_collage(surface, path)
                                .await
                                .map_err(|e| e.to_string())
                        },
                        Message::SaveComplete,
                    );
                }

                Task::none()
            }
            Message::SaveComplete(Ok(path)) => {
                self.status = format!("✅ Saved {}", path.display());
                Task::none()
            }
            Message::SaveComplete(Err(e)) => {
                eprintln!("⚠️  Save failed: {}", e);
                self.status = format!("Save failed: {}", e);
                Task::none()
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let mut content: Column<Message> = column![
            text("Photo Collage Maker").size(32),
            button("Select Images")
                .on_press(Message::PickImages)
                .padding(10),
        ]
        .spacing(20)
        .padding(40)
        .align_x(Alignment::Center);

        if !self.state.images().is_empty() {
            let mut strip = Row::new().spacing(10);
            for source in self.state.images() {
                strip = strip.push(preview_cell(source));
            }
            content = content.push(strip);
        }

        // No press handler unless exactly two images are selected
        content = content.push(
            button("Create Collage")
                .on_press_maybe(self.state.can_create().then_some(Message::CreateCollage))
                .padding(10),
        );

        if let Some(surface) = &self.rendered {
            let handle = image_widget::Handle::from_rgba(
                SURFACE_SIZE,
                SURFACE_SIZE,
                surface.clone().into_rgba(),
            );

            content = content.push(
                image_widget(handle)
                    .width(SURFACE_SIZE as f32)
                    .height(SURFACE_SIZE as f32),
            );
            content = content.push(
                button("Save PNG")
                    .on_press(Message::SaveCollage)
                    .padding(10),
            );
        }

        content = content.push(text(&self.status).size(16));

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

/// One cell in the selection strip: the thumbnail, or a placeholder when
/// the file could not be decoded for preview
fn preview_cell(source: &ImageSource) -> Element<'_, Message> {
    match &source.preview_path {
        Some(path) => image_widget(image_widget::Handle::from_path(path))
            .width(PREVIEW_SIZE as f32)
            .height(PREVIEW_SIZE as f32)
            .into(),
        None => text("no preview").size(14).into(),
    }
}

fn main() -> iced::Result {
    iced::application("Collage Maker", CollageMaker::update, CollageMaker::view)
        .theme(CollageMaker::theme)
        .centered()
        .run_with(CollageMaker::new)
}
