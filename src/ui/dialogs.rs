/// Native dialogs (file pickers and message boxes)
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};
use std::path::PathBuf;

use crate::selection::IMAGE_EXTENSIONS;

/// Multi-select image files
pub fn pick_images() -> Option<Vec<PathBuf>> {
    FileDialog::new()
        .set_title("Select Image(s)")
        .add_filter("Image files", &IMAGE_EXTENSIONS)
        .pick_files()
}

/// Pick the folder whose images should be processed
pub fn pick_input_folder() -> Option<PathBuf> {
    FileDialog::new()
        .set_title("Select Folder with Images")
        .pick_folder()
}

/// Pick the folder receiving the results
pub fn pick_output_folder() -> Option<PathBuf> {
    FileDialog::new()
        .set_title("Select Save Location")
        .pick_folder()
}

/// Ask whether the batch should be merged into one PDF
pub fn confirm_document_mode() -> bool {
    let answer = MessageDialog::new()
        .set_level(MessageLevel::Info)
        .set_title("Save as PDF")
        .set_description("Do you want to save the results as a PDF?")
        .set_buttons(MessageButtons::YesNo)
        .show();

    matches!(answer, MessageDialogResult::Yes)
}

pub fn show_info(title: &str, message: &str) {
    MessageDialog::new()
        .set_level(MessageLevel::Info)
        .set_title(title)
        .set_description(message)
        .set_buttons(MessageButtons::Ok)
        .show();
}

pub fn show_error(title: &str, message: &str) {
    MessageDialog::new()
        .set_level(MessageLevel::Error)
        .set_title(title)
        .set_description(message)
        .set_buttons(MessageButtons::Ok)
        .show();
}
