//! Native dialog seam
//!
//! The session only talks to [`Dialogs`]; the platform shell supplies a
//! real implementation ([`NativeDialogs`]) and tests supply a stub.

use std::path::PathBuf;

use crate::models::ACCEPTED_EXTENSIONS;

/// The two dialogs the session ever opens
pub trait Dialogs: Send + Sync {
    /// Show an image-filtered open dialog; `None` means the user canceled
    fn pick_image(&self) -> Option<PathBuf>;

    /// Show a blocking warning with an OK button
    fn warn(&self, message: &str, detail: &str);
}

/// OS-native dialogs via `rfd`
pub struct NativeDialogs;

impl Dialogs for NativeDialogs {
    fn pick_image(&self) -> Option<PathBuf> {
        rfd::FileDialog::new()
            .set_title("Select an Image")
            .add_filter("Images", &ACCEPTED_EXTENSIONS)
            .pick_file()
    }

    fn warn(&self, message: &str, detail: &str) {
        rfd::MessageDialog::new()
            .set_level(rfd::MessageLevel::Warning)
            .set_title("Warning")
            .set_description(format!("{message}\n{detail}"))
            .set_buttons(rfd::MessageButtons::Ok)
            .show();
    }
}
