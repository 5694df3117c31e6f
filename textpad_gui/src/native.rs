use std::path::PathBuf;

use rfd::{FileDialog, MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};
use textpad_core::{Clipboard, Dialogs, FileFilter};

/// Native dialogs through `rfd` and the system clipboard through `arboard`.
pub struct NativeHost {
    // Clipboard access can fail on headless or unusual sessions; the editor
    // then falls back to its internal clipboard.
    clipboard: Option<arboard::Clipboard>,
}

impl NativeHost {
    pub fn new() -> Self {
        let clipboard = match arboard::Clipboard::new() {
            Ok(clipboard) => Some(clipboard),
            Err(err) => {
                tracing::warn!(error = %err, "system clipboard unavailable");
                None
            }
        };
        Self { clipboard }
    }
}

fn file_dialog(filters: &[FileFilter]) -> FileDialog {
    filters
        .iter()
        .fold(FileDialog::new(), |dialog, filter| {
            dialog.add_filter(filter.name, filter.extensions)
        })
}

fn message(level: MessageLevel, title: &str, description: &str) -> MessageDialog {
    MessageDialog::new()
        .set_level(level)
        .set_title(title)
        .set_description(description)
}

impl Dialogs for NativeHost {
    fn confirm(&mut self, title: &str, message_text: &str) -> bool {
        let answer = message(MessageLevel::Info, title, message_text)
            .set_buttons(MessageButtons::YesNo)
            .show();
        matches!(answer, MessageDialogResult::Yes)
    }

    fn pick_open_path(&mut self, filters: &[FileFilter]) -> Option<PathBuf> {
        file_dialog(filters).pick_file()
    }

    fn pick_save_path(&mut self, filters: &[FileFilter]) -> Option<PathBuf> {
        file_dialog(filters).save_file()
    }

    fn show_info(&mut self, title: &str, message_text: &str) {
        message(MessageLevel::Info, title, message_text)
            .set_buttons(MessageButtons::Ok)
            .show();
    }

    fn show_error(&mut self, title: &str, message_text: &str) {
        message(MessageLevel::Error, title, message_text)
            .set_buttons(MessageButtons::Ok)
            .show();
    }
}

impl Clipboard for NativeHost {
    fn get_text(&mut self) -> Option<String> {
        self.clipboard.as_mut()?.get_text().ok()
    }

    fn set_text(&mut self, text: &str) {
        let Some(clipboard) = self.clipboard.as_mut() else {
            return;
        };
        if let Err(err) = clipboard.set_text(text) {
            tracing::warn!(error = %err, "failed to write system clipboard");
        }
    }
}
