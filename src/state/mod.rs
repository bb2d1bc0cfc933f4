/// State management module
///
/// This module handles all application state, including:
/// - The current selection and render trigger (selection.rs)
/// - Preview thumbnail generation and cleanup (previews.rs)

pub mod previews;
pub mod selection;
