//! Capabilities the session needs from whatever hosts it: native dialogs,
//! blocking input prompts, and the system clipboard. The GUI implements them
//! with `rfd` and `arboard`; tests use scripted stubs.

use std::ops::RangeInclusive;
use std::path::PathBuf;

/// 檔案對話框的篩選條件。 / File-type filter offered by open/save dialogs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileFilter {
    pub name: &'static str,
    pub extensions: &'static [&'static str],
}

pub const TEXT_FILE_FILTERS: &[FileFilter] = &[
    FileFilter {
        name: "Text Files",
        extensions: &["txt"],
    },
    FileFilter {
        name: "All Files",
        extensions: &["*"],
    },
];

/// Modal dialogs. Every picker returns `None` when the user cancels.
pub trait Dialogs {
    fn confirm(&mut self, title: &str, message: &str) -> bool;
    fn pick_open_path(&mut self, filters: &[FileFilter]) -> Option<PathBuf>;
    fn pick_save_path(&mut self, filters: &[FileFilter]) -> Option<PathBuf>;
    fn show_info(&mut self, title: &str, message: &str);
    fn show_error(&mut self, title: &str, message: &str);
}

/// Blocking single-value prompts.
pub trait Prompts {
    fn ask_text(&mut self, title: &str, prompt: &str) -> Option<String>;
    /// The prompt itself rejects values outside `range`.
    fn ask_integer(&mut self, title: &str, prompt: &str, range: RangeInclusive<i64>)
        -> Option<i64>;
}

pub trait Clipboard {
    fn get_text(&mut self) -> Option<String>;
    fn set_text(&mut self, text: &str);
}
