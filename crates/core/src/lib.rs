pub mod autosave;
pub mod buffer;
pub mod command;
pub mod document;
pub mod host;
pub mod session;
pub mod status;

pub use autosave::{AutoSaveTimer, AUTO_SAVE_INTERVAL};
pub use buffer::{EditBuffer, HISTORY_LIMIT};
pub use command::{Command, KeyChord, MenuEntry, MenuSection, MENU_BAR, SHORTCUTS};
pub use document::DocumentError;
pub use host::{Clipboard, Dialogs, FileFilter, Prompts, TEXT_FILE_FILTERS};
pub use session::{
    font_size_range, AutoSaveOutcome, CommandOutcome, FileOutcome, Session, SessionError,
    APP_NAME, UNTITLED,
};
pub use status::StatusCounts;
