use std::collections::VecDeque;
use std::fs;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use tempfile::tempdir;
use textpad_core::{
    AutoSaveOutcome, Clipboard, Command, CommandOutcome, Dialogs, FileFilter, FileOutcome,
    KeyChord, Prompts, Session, SessionError,
};
use textpad_settings::{EditorConfig, FontSpec, ThemeKind};

/// Answers every dialog and prompt from a pre-recorded script.
#[derive(Default)]
struct ScriptedHost {
    confirms: VecDeque<bool>,
    open_paths: VecDeque<Option<PathBuf>>,
    save_paths: VecDeque<Option<PathBuf>>,
    texts: VecDeque<Option<String>>,
    integers: VecDeque<Option<i64>>,
    infos: Vec<String>,
    errors: Vec<String>,
    clipboard: Option<String>,
}

impl ScriptedHost {
    fn new() -> Self {
        Self::default()
    }

    fn confirm_with(mut self, answer: bool) -> Self {
        self.confirms.push_back(answer);
        self
    }

    fn open_with(mut self, path: Option<&Path>) -> Self {
        self.open_paths.push_back(path.map(Path::to_path_buf));
        self
    }

    fn save_with(mut self, path: Option<&Path>) -> Self {
        self.save_paths.push_back(path.map(Path::to_path_buf));
        self
    }

    fn answer_text(mut self, text: Option<&str>) -> Self {
        self.texts.push_back(text.map(str::to_string));
        self
    }

    fn answer_integer(mut self, value: Option<i64>) -> Self {
        self.integers.push_back(value);
        self
    }
}

impl Dialogs for ScriptedHost {
    fn confirm(&mut self, _title: &str, _message: &str) -> bool {
        self.confirms.pop_front().unwrap_or(false)
    }

    fn pick_open_path(&mut self, filters: &[FileFilter]) -> Option<PathBuf> {
        assert_eq!(filters[0].extensions, &["txt"]);
        self.open_paths.pop_front().flatten()
    }

    fn pick_save_path(&mut self, _filters: &[FileFilter]) -> Option<PathBuf> {
        self.save_paths.pop_front().flatten()
    }

    fn show_info(&mut self, _title: &str, message: &str) {
        self.infos.push(message.to_string());
    }

    fn show_error(&mut self, _title: &str, message: &str) {
        self.errors.push(message.to_string());
    }
}

impl Prompts for ScriptedHost {
    fn ask_text(&mut self, _title: &str, _prompt: &str) -> Option<String> {
        self.texts.pop_front().flatten()
    }

    fn ask_integer(
        &mut self,
        _title: &str,
        _prompt: &str,
        range: RangeInclusive<i64>,
    ) -> Option<i64> {
        // Mirrors a real integer prompt, which refuses out-of-range input.
        self.integers
            .pop_front()
            .flatten()
            .filter(|value| range.contains(value))
    }
}

impl Clipboard for ScriptedHost {
    fn get_text(&mut self) -> Option<String> {
        self.clipboard.clone()
    }

    fn set_text(&mut self, text: &str) {
        self.clipboard = Some(text.to_string());
    }
}

fn type_text(session: &mut Session, text: &str) {
    session.buffer_mut().text_mut().push_str(text);
    session.record_edit();
}

#[test]
fn replace_scenario_updates_buffer_and_status() {
    let mut session = Session::default();
    type_text(&mut session, "hello world");
    assert_eq!(session.status_line(), "Words: 2 | Characters: 11");

    let replaced = session.replace_all("world", "there").unwrap();
    assert_eq!(replaced, 1);
    assert_eq!(session.text(), "hello there");
    assert_eq!(session.status_line(), "Words: 2 | Characters: 11");

    assert!(session.undo());
    assert_eq!(session.text(), "hello world");
}

#[test]
fn empty_search_term_is_a_no_op() {
    let mut session = Session::default();
    type_text(&mut session, "abc");
    assert_eq!(session.replace_all("", "x").unwrap(), 0);
    assert_eq!(session.text(), "abc");
}

#[test]
fn find_replace_prompts_for_both_terms() {
    let mut session = Session::default();
    type_text(&mut session, "one two one");

    let mut host = ScriptedHost::new()
        .answer_text(Some("one"))
        .answer_text(Some("1"));
    assert_eq!(session.find_replace(&mut host).unwrap(), Some(2));
    assert_eq!(session.text(), "1 two 1");

    let mut cancelled = ScriptedHost::new().answer_text(Some("two")).answer_text(None);
    assert_eq!(session.find_replace(&mut cancelled).unwrap(), None);
    assert_eq!(session.text(), "1 two 1");
}

#[test]
fn save_then_open_round_trips_content() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    let content = "ASCII line\r\nπ ≈ 3.14159 ✓\nlast line without newline";

    let mut writer = Session::default();
    type_text(&mut writer, content);
    let mut host = ScriptedHost::new().save_with(Some(&path));
    assert_eq!(
        writer.save_file(&mut host).unwrap(),
        FileOutcome::Saved(path.clone())
    );
    assert_eq!(host.infos, vec!["File saved successfully.".to_string()]);
    assert_eq!(fs::read(&path).unwrap(), content.as_bytes());
    assert_eq!(writer.file_path(), Some(path.as_path()));

    let mut reader = Session::default();
    let mut host = ScriptedHost::new().open_with(Some(&path));
    assert_eq!(
        reader.open_file(&mut host).unwrap(),
        FileOutcome::Opened(path.clone())
    );
    assert_eq!(reader.text(), content);
    assert_eq!(reader.title(), "notes.txt - Advanced Text Editor");
    assert_eq!(reader.status().words, 10);
}

#[test]
fn plain_save_reuses_path_without_prompting() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("draft.txt");
    let mut session = Session::default();
    type_text(&mut session, "first");
    session
        .save_as(&mut ScriptedHost::new().save_with(Some(&path)))
        .unwrap();

    type_text(&mut session, " second");
    let mut host = ScriptedHost::new();
    session.save_file(&mut host).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "first second");
    assert_eq!(host.infos.len(), 1);
}

#[test]
fn save_as_appends_default_extension() {
    let dir = tempdir().unwrap();
    let chosen = dir.path().join("report");
    let mut session = Session::default();
    type_text(&mut session, "data");

    session
        .save_as(&mut ScriptedHost::new().save_with(Some(&chosen)))
        .unwrap();
    let expected = dir.path().join("report.txt");
    assert_eq!(session.file_path(), Some(expected.as_path()));
    assert_eq!(fs::read_to_string(expected).unwrap(), "data");
}

#[test]
fn cancelled_save_as_changes_nothing() {
    let mut session = Session::default();
    type_text(&mut session, "unsaved");
    let mut host = ScriptedHost::new().save_with(None);

    assert_eq!(session.save_file(&mut host).unwrap(), FileOutcome::Cancelled);
    assert!(session.file_path().is_none());
    assert!(host.infos.is_empty());
    assert_eq!(session.run(Command::SaveAs, &mut host), CommandOutcome::Cancelled);
}

#[test]
fn new_file_resets_whether_or_not_user_saves() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("existing.txt");
    fs::write(&path, "on disk").unwrap();

    // Declined: nothing written, state reset.
    let mut session = Session::default();
    session.load_path(path.clone()).unwrap();
    type_text(&mut session, " edited");
    let mut host = ScriptedHost::new().confirm_with(false);
    assert_eq!(session.new_file(&mut host).unwrap(), FileOutcome::Cleared);
    assert_eq!(session.text(), "");
    assert!(session.file_path().is_none());
    assert_eq!(session.title(), "Untitled - Advanced Text Editor");
    assert_eq!(fs::read_to_string(&path).unwrap(), "on disk");

    // Accepted: the edit is saved first, then state reset.
    session.load_path(path.clone()).unwrap();
    type_text(&mut session, " edited");
    let mut host = ScriptedHost::new().confirm_with(true);
    session.new_file(&mut host).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "on disk edited");
    assert_eq!(session.text(), "");
    assert!(session.file_path().is_none());
    assert!(!session.buffer().can_undo());

    // Accepted but the save-as dialog is cancelled: still reset.
    type_text(&mut session, "scratch");
    let mut host = ScriptedHost::new().confirm_with(true).save_with(None);
    session.new_file(&mut host).unwrap();
    assert_eq!(session.text(), "");
    assert_eq!(session.status_line(), "Words: 0 | Characters: 0");
}

#[test]
fn new_file_still_resets_when_save_fails() {
    let dir = tempdir().unwrap();
    let unwritable = dir.path().join("missing-dir").join("file.txt");
    let mut session = Session::default();
    type_text(&mut session, "content");

    let mut host = ScriptedHost::new()
        .confirm_with(true)
        .save_with(Some(&unwritable));
    assert_eq!(session.run(Command::NewFile, &mut host), CommandOutcome::Failed);
    assert_eq!(host.errors.len(), 1);
    assert!(session.file_path().is_none());
    assert_eq!(session.text(), "");
}

#[test]
fn open_failures_are_reported_and_leave_session_untouched() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing.txt");
    let binary = dir.path().join("binary.txt");
    fs::write(&binary, [0xFF, 0xFE, 0x00, 0xD8]).unwrap();

    let mut session = Session::default();
    type_text(&mut session, "keep me");
    let mut host = ScriptedHost::new()
        .open_with(Some(&missing))
        .open_with(Some(&binary));

    assert_eq!(session.run(Command::OpenFile, &mut host), CommandOutcome::Failed);
    assert_eq!(session.run(Command::OpenFile, &mut host), CommandOutcome::Failed);
    assert_eq!(host.errors.len(), 2);
    assert!(host.errors[0].contains("missing.txt"));
    assert!(host.errors[1].contains("not valid UTF-8"));
    assert_eq!(session.text(), "keep me");
    assert!(session.file_path().is_none());
}

#[test]
fn open_error_type_is_document_error() {
    let dir = tempdir().unwrap();
    let mut session = Session::default();
    let err = session.load_path(dir.path().join("nope.txt")).unwrap_err();
    assert!(matches!(err, SessionError::Document(_)));
}

#[test]
fn auto_save_writes_current_buffer_when_path_is_set() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("auto.txt");
    let mut session = Session::default();
    type_text(&mut session, "v1");
    session
        .save_as(&mut ScriptedHost::new().save_with(Some(&path)))
        .unwrap();

    type_text(&mut session, " v2");
    assert_eq!(
        session.auto_save_tick().unwrap(),
        AutoSaveOutcome::Saved(path.clone())
    );
    assert_eq!(fs::read_to_string(&path).unwrap(), "v1 v2");

    session.set_auto_save_enabled(false);
    type_text(&mut session, " v3");
    assert_eq!(session.auto_save_tick().unwrap(), AutoSaveOutcome::Disabled);
    assert_eq!(fs::read_to_string(&path).unwrap(), "v1 v2");
}

#[test]
fn auto_save_without_path_touches_nothing() {
    let dir = tempdir().unwrap();
    let mut session = Session::default();
    type_text(&mut session, "unsaved");
    assert_eq!(session.auto_save_tick().unwrap(), AutoSaveOutcome::NoPath);
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn auto_save_flag_comes_from_config_and_toggles() {
    let config = EditorConfig {
        auto_save: false,
        ..EditorConfig::default()
    };
    let mut session = Session::new(&config);
    assert!(!session.auto_save_enabled());
    session.run(Command::ToggleAutoSave, &mut ScriptedHost::new());
    assert!(session.auto_save_enabled());
}

#[test]
fn theme_switch_leaves_text_unchanged() {
    let mut session = Session::default();
    type_text(&mut session, "some text\n");
    let before = session.text().to_string();

    let mut host = ScriptedHost::new();
    session.run(Command::SetTheme(ThemeKind::Dark), &mut host);
    assert_eq!(session.theme(), ThemeKind::Dark);
    assert_eq!(session.text(), before);
    session.run(Command::SetTheme(ThemeKind::Light), &mut host);
    assert_eq!(session.theme(), ThemeKind::Light);
    assert_eq!(session.text(), before);
}

#[test]
fn change_font_requires_both_answers() {
    let mut session = Session::default();

    let mut host = ScriptedHost::new()
        .answer_text(Some("Courier New"))
        .answer_integer(Some(16));
    assert!(session.change_font(&mut host).unwrap());
    assert_eq!(session.font(), &FontSpec::new("Courier New", 16).unwrap());

    let mut host = ScriptedHost::new().answer_text(None).answer_integer(Some(20));
    assert!(!session.change_font(&mut host).unwrap());

    let mut host = ScriptedHost::new()
        .answer_text(Some("Verdana"))
        .answer_integer(None);
    assert!(!session.change_font(&mut host).unwrap());

    // The prompt refuses 99, which reads as a cancellation.
    let mut host = ScriptedHost::new()
        .answer_text(Some("Verdana"))
        .answer_integer(Some(99));
    assert!(!session.change_font(&mut host).unwrap());

    assert_eq!(session.font(), &FontSpec::new("Courier New", 16).unwrap());
}

#[test]
fn apply_font_rejects_out_of_range_size() {
    let mut session = Session::default();
    assert!(session.apply_font("Arial", 51).is_err());
    assert_eq!(session.font(), &FontSpec::default());
}

#[test]
fn clipboard_commands_round_trip_through_host() {
    let mut session = Session::default();
    type_text(&mut session, "alpha beta");
    let mut host = ScriptedHost::new();

    session.buffer_mut().set_selection(Some(0..6));
    assert_eq!(session.run(Command::Cut, &mut host), CommandOutcome::Done);
    assert_eq!(host.clipboard.as_deref(), Some("alpha "));
    assert_eq!(session.text(), "beta");
    assert_eq!(session.status_line(), "Words: 1 | Characters: 4");

    session.buffer_mut().set_selection(Some(4..4));
    host.clipboard = Some(" gamma".into());
    assert_eq!(session.run(Command::Paste, &mut host), CommandOutcome::Done);
    assert_eq!(session.text(), "beta gamma");

    assert_eq!(session.run(Command::Undo, &mut host), CommandOutcome::Done);
    assert_eq!(session.text(), "beta");
    assert_eq!(session.run(Command::Redo, &mut host), CommandOutcome::Done);
    assert_eq!(session.text(), "beta gamma");

    session.buffer_mut().set_selection(Some(1..1));
    assert_eq!(session.run(Command::Copy, &mut host), CommandOutcome::Cancelled);
}

#[test]
fn shortcuts_dispatch_like_menu_items() {
    let mut session = Session::default();
    let mut host = ScriptedHost::new();

    let quit = Command::for_chord(KeyChord::new(false, 'q')).unwrap();
    assert_eq!(session.run(quit, &mut host), CommandOutcome::Quit);

    let find = Command::for_chord(KeyChord::new(false, 'f')).unwrap();
    assert_eq!(session.run(find, &mut host), CommandOutcome::ShowFindReplace);
    assert_eq!(
        session.run(Command::ChangeFont, &mut host),
        CommandOutcome::ShowFontPicker
    );

    let open = Command::for_chord(KeyChord::new(false, 'o')).unwrap();
    assert_eq!(session.run(open, &mut host), CommandOutcome::Cancelled);
}
