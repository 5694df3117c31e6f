use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use textpad_search::{self as search, SearchError, SearchOptions};
use textpad_settings::{EditorConfig, FontError, FontSpec, ThemeKind, MAX_FONT_SIZE, MIN_FONT_SIZE};
use thiserror::Error;

use crate::buffer::EditBuffer;
use crate::command::Command;
use crate::document::{self, DocumentError};
use crate::host::{Clipboard, Dialogs, Prompts, TEXT_FILE_FILTERS};
use crate::status::StatusCounts;

pub const APP_NAME: &str = "Advanced Text Editor";
pub const UNTITLED: &str = "Untitled";

const SAVE_PROMPT_TITLE: &str = "New File";
const SAVE_PROMPT: &str = "Do you want to save changes before creating a new file?";
const SAVED_TITLE: &str = "Save";
const SAVED_MESSAGE: &str = "File saved successfully.";
const ERROR_TITLE: &str = "Error";

/// 編輯工作階段中處理常式可能遇到的錯誤。 / Errors a session handler can run into.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error(transparent)]
    Search(#[from] SearchError),
    #[error(transparent)]
    Font(#[from] FontError),
}

/// 檔案處理常式的結果。 / Result of a file handler that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Opened(PathBuf),
    Saved(PathBuf),
    Cleared,
    Cancelled,
}

/// 自動儲存單次觸發的結果。 / What one auto-save tick did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutoSaveOutcome {
    Disabled,
    NoPath,
    Saved(PathBuf),
}

/// 經由 [`Session::run`] 執行命令後，主機需要處理的後續動作。 / Follow-up the host must perform after [`Session::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Done,
    Cancelled,
    Failed,
    Quit,
    ShowFindReplace,
    ShowFontPicker,
}

/// 目前的編輯情境：檔案路徑、字型、主題、自動儲存旗標與緩衝內容。 / The current editing context.
#[derive(Debug, Clone)]
pub struct Session {
    file_path: Option<PathBuf>,
    font: FontSpec,
    theme: ThemeKind,
    auto_save_enabled: bool,
    buffer: EditBuffer,
    status: StatusCounts,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

impl Session {
    /// 以啟動設定建立未命名的空白工作階段。 / Creates an untitled, empty session from the start-up configuration.
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            file_path: None,
            font: config.font.clone(),
            theme: config.theme,
            auto_save_enabled: config.auto_save,
            buffer: EditBuffer::new(),
            status: StatusCounts::default(),
        }
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    pub fn font(&self) -> &FontSpec {
        &self.font
    }

    pub fn theme(&self) -> ThemeKind {
        self.theme
    }

    pub fn auto_save_enabled(&self) -> bool {
        self.auto_save_enabled
    }

    pub fn set_auto_save_enabled(&mut self, enabled: bool) {
        self.auto_save_enabled = enabled;
    }

    pub fn buffer(&self) -> &EditBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut EditBuffer {
        &mut self.buffer
    }

    pub fn text(&self) -> &str {
        self.buffer.text()
    }

    pub fn status(&self) -> StatusCounts {
        self.status
    }

    pub fn status_line(&self) -> String {
        self.status.to_string()
    }

    /// 視窗標題。 / Window title for the current file.
    pub fn title(&self) -> String {
        let name = self
            .file_path
            .as_deref()
            .map(document::display_name)
            .unwrap_or_else(|| UNTITLED.to_string());
        format!("{name} - {APP_NAME}")
    }

    /// 文字元件每次變更後呼叫：記錄復原步驟並更新狀態列。 / Called after every text-widget change.
    pub fn record_edit(&mut self) -> bool {
        let changed = self.buffer.commit();
        self.refresh_status();
        changed
    }

    pub fn refresh_status(&mut self) {
        self.status = StatusCounts::measure(self.buffer.text());
    }

    /// 開新檔案；使用者同意時先儲存。 / Starts a new document, saving first if the user agrees.
    ///
    /// The buffer and path are reset even when the preceding save fails or is
    /// cancelled; a save failure is still returned to the caller.
    pub fn new_file<D: Dialogs>(&mut self, dialogs: &mut D) -> Result<FileOutcome, SessionError> {
        let mut saved = Ok(FileOutcome::Cleared);
        if dialogs.confirm(SAVE_PROMPT_TITLE, SAVE_PROMPT) {
            if let Err(err) = self.save_file(dialogs) {
                saved = Err(err);
            }
        }
        self.buffer.reset(String::new());
        self.file_path = None;
        self.refresh_status();
        tracing::info!("started a new document");
        saved
    }

    /// 開啟使用者選擇的檔案。 / Opens the file the user picks.
    pub fn open_file<D: Dialogs>(&mut self, dialogs: &mut D) -> Result<FileOutcome, SessionError> {
        let Some(path) = dialogs.pick_open_path(TEXT_FILE_FILTERS) else {
            return Ok(FileOutcome::Cancelled);
        };
        self.load_path(path)
    }

    /// 直接載入指定路徑。 / Loads `path` into the buffer without prompting.
    pub fn load_path(&mut self, path: PathBuf) -> Result<FileOutcome, SessionError> {
        let contents = document::load(&path)?;
        self.buffer.reset(contents);
        self.refresh_status();
        tracing::info!(path = %path.display(), bytes = self.buffer.text().len(), "opened file");
        self.file_path = Some(path.clone());
        Ok(FileOutcome::Opened(path))
    }

    /// 儲存至目前路徑，沒有路徑時改為另存新檔。 / Saves to the current path, or falls back to save-as.
    pub fn save_file<D: Dialogs>(&mut self, dialogs: &mut D) -> Result<FileOutcome, SessionError> {
        let Some(path) = self.file_path.clone() else {
            return self.save_as(dialogs);
        };
        self.write_to(&path)?;
        dialogs.show_info(SAVED_TITLE, SAVED_MESSAGE);
        Ok(FileOutcome::Saved(path))
    }

    /// 詢問新路徑後儲存。 / Asks for a destination, adopts it, then saves.
    pub fn save_as<D: Dialogs>(&mut self, dialogs: &mut D) -> Result<FileOutcome, SessionError> {
        let Some(path) = dialogs.pick_save_path(TEXT_FILE_FILTERS) else {
            return Ok(FileOutcome::Cancelled);
        };
        self.file_path = Some(document::with_default_extension(path));
        self.save_file(dialogs)
    }

    /// 計時器觸發時靜默儲存。 / Silent save performed on every auto-save tick.
    pub fn auto_save_tick(&mut self) -> Result<AutoSaveOutcome, SessionError> {
        if !self.auto_save_enabled {
            return Ok(AutoSaveOutcome::Disabled);
        }
        let Some(path) = self.file_path.clone() else {
            tracing::debug!("auto-save skipped, no file path yet");
            return Ok(AutoSaveOutcome::NoPath);
        };
        self.write_to(&path)?;
        tracing::debug!(path = %path.display(), "auto-saved");
        Ok(AutoSaveOutcome::Saved(path))
    }

    fn write_to(&mut self, path: &Path) -> Result<(), SessionError> {
        self.buffer.commit();
        document::save(path, self.buffer.text())?;
        tracing::info!(path = %path.display(), bytes = self.buffer.text().len(), "saved file");
        Ok(())
    }

    /// 以字面比對取代全部出現處；搜尋字串為空時不做任何事。 / Literal replace-all; an empty search term is a no-op.
    pub fn replace_all(&mut self, find: &str, replacement: &str) -> Result<usize, SessionError> {
        self.replace_with(&SearchOptions::literal(find), replacement)
    }

    /// 以指定選項取代全部出現處。 / Replace-all with explicit search options.
    pub fn replace_with(
        &mut self,
        options: &SearchOptions,
        replacement: &str,
    ) -> Result<usize, SessionError> {
        if options.pattern.is_empty() {
            return Ok(0);
        }
        let outcome = search::replace_all(self.buffer.text(), replacement, options)?;
        if outcome.changed() {
            self.buffer.replace_text(outcome.text);
            self.refresh_status();
        }
        tracing::debug!(replacements = outcome.replacements, "replace all");
        Ok(outcome.replacements)
    }

    /// 以提示輸入搜尋與取代字串。 / Prompts for both terms, then replaces. `None` when either prompt is cancelled.
    pub fn find_replace<P: Prompts>(
        &mut self,
        prompts: &mut P,
    ) -> Result<Option<usize>, SessionError> {
        let Some(find) = prompts.ask_text("Find & Replace", "Find:") else {
            return Ok(None);
        };
        let Some(replacement) = prompts.ask_text("Find & Replace", "Replace:") else {
            return Ok(None);
        };
        self.replace_all(&find, &replacement).map(Some)
    }

    /// 以提示選擇字型；任一提示取消時不變。 / Prompts for family and size; either cancellation keeps the font.
    pub fn change_font<P: Prompts>(&mut self, prompts: &mut P) -> Result<bool, SessionError> {
        let family = prompts.ask_text("Font", "Enter Font Name (e.g., Arial):");
        let size = prompts.ask_integer("Size", "Enter Font Size:", font_size_range());
        let (Some(family), Some(size)) = (family, size) else {
            return Ok(false);
        };
        if family.trim().is_empty() {
            return Ok(false);
        }
        let size = u32::try_from(size).unwrap_or(0);
        self.apply_font(&family, size)?;
        Ok(true)
    }

    /// 直接套用字型。 / Applies a font without prompting.
    pub fn apply_font(&mut self, family: &str, size: u32) -> Result<(), FontError> {
        self.font = FontSpec::new(family, size)?;
        tracing::info!(font = %self.font, "font changed");
        Ok(())
    }

    pub fn set_theme(&mut self, theme: ThemeKind) {
        self.theme = theme;
    }

    pub fn undo(&mut self) -> bool {
        let changed = self.buffer.undo();
        self.refresh_status();
        changed
    }

    pub fn redo(&mut self) -> bool {
        let changed = self.buffer.redo();
        self.refresh_status();
        changed
    }

    /// 執行選單或快捷鍵命令，並將錯誤轉為錯誤對話框。 / Runs a menu or shortcut command, turning failures into error dialogs.
    pub fn run<H>(&mut self, command: Command, host: &mut H) -> CommandOutcome
    where
        H: Dialogs + Clipboard,
    {
        tracing::debug!(?command, "run command");
        match command {
            Command::NewFile => {
                let result = self.new_file(host);
                report_file(result, host)
            }
            Command::OpenFile => {
                let result = self.open_file(host);
                report_file(result, host)
            }
            Command::SaveFile => {
                let result = self.save_file(host);
                report_file(result, host)
            }
            Command::SaveAs => {
                let result = self.save_as(host);
                report_file(result, host)
            }
            Command::ToggleAutoSave => {
                self.auto_save_enabled = !self.auto_save_enabled;
                tracing::info!(enabled = self.auto_save_enabled, "auto-save toggled");
                CommandOutcome::Done
            }
            Command::Quit => CommandOutcome::Quit,
            Command::Cut => match self.buffer.cut() {
                Some(text) => {
                    host.set_text(&text);
                    self.refresh_status();
                    CommandOutcome::Done
                }
                None => CommandOutcome::Cancelled,
            },
            Command::Copy => match self.buffer.copy() {
                Some(text) => {
                    host.set_text(&text);
                    CommandOutcome::Done
                }
                None => CommandOutcome::Cancelled,
            },
            Command::Paste => {
                let external = host.get_text();
                if self.buffer.paste(external) {
                    self.refresh_status();
                    CommandOutcome::Done
                } else {
                    CommandOutcome::Cancelled
                }
            }
            Command::Undo => done_if(self.undo()),
            Command::Redo => done_if(self.redo()),
            Command::SelectAll => {
                self.buffer.select_all();
                CommandOutcome::Done
            }
            Command::FindReplace => CommandOutcome::ShowFindReplace,
            Command::ChangeFont => CommandOutcome::ShowFontPicker,
            Command::SetTheme(kind) => {
                self.set_theme(kind);
                CommandOutcome::Done
            }
        }
    }
}

pub fn font_size_range() -> RangeInclusive<i64> {
    i64::from(MIN_FONT_SIZE)..=i64::from(MAX_FONT_SIZE)
}

fn done_if(changed: bool) -> CommandOutcome {
    if changed {
        CommandOutcome::Done
    } else {
        CommandOutcome::Cancelled
    }
}

fn report_file<D: Dialogs>(
    result: Result<FileOutcome, SessionError>,
    dialogs: &mut D,
) -> CommandOutcome {
    match result {
        Ok(FileOutcome::Cancelled) => CommandOutcome::Cancelled,
        Ok(_) => CommandOutcome::Done,
        Err(err) => {
            tracing::error!(error = %err, "file command failed");
            dialogs.show_error(ERROR_TITLE, &err.to_string());
            CommandOutcome::Failed
        }
    }
}
