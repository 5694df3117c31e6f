use std::fmt;

use textpad_settings::ThemeKind;

/// 每個選單項目或快捷鍵所觸發的動作。 / Every action a menu item or shortcut can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    NewFile,
    OpenFile,
    SaveFile,
    SaveAs,
    ToggleAutoSave,
    Quit,
    Cut,
    Copy,
    Paste,
    Undo,
    Redo,
    SelectAll,
    FindReplace,
    ChangeFont,
    SetTheme(ThemeKind),
}

impl Command {
    pub fn label(self) -> &'static str {
        match self {
            Command::NewFile => "New",
            Command::OpenFile => "Open",
            Command::SaveFile => "Save",
            Command::SaveAs => "Save As",
            Command::ToggleAutoSave => "Auto-save",
            Command::Quit => "Exit",
            Command::Cut => "Cut",
            Command::Copy => "Copy",
            Command::Paste => "Paste",
            Command::Undo => "Undo",
            Command::Redo => "Redo",
            Command::SelectAll => "Select All",
            Command::FindReplace => "Find & Replace",
            Command::ChangeFont => "Change Font",
            Command::SetTheme(kind) => kind.label(),
        }
    }

    /// 由應用程式攔截的快捷鍵。 / Chord the application itself intercepts for this command.
    pub fn shortcut(self) -> Option<KeyChord> {
        SHORTCUTS
            .iter()
            .find(|(_, command)| *command == self)
            .map(|(chord, _)| *chord)
    }

    /// 顯示在選單旁的快捷鍵文字，包含文字元件原生處理的按鍵。 / Accelerator text shown beside the menu item,
    /// including chords the text widget handles natively.
    pub fn accelerator(self) -> Option<String> {
        if let Some(chord) = self.shortcut() {
            return Some(chord.to_string());
        }
        let native = match self {
            Command::Cut => KeyChord::ctrl('X'),
            Command::Copy => KeyChord::ctrl('C'),
            Command::Paste => KeyChord::ctrl('V'),
            Command::Undo => KeyChord::ctrl('Z'),
            Command::Redo => KeyChord::ctrl('Y'),
            Command::SelectAll => KeyChord::ctrl('A'),
            _ => return None,
        };
        Some(native.to_string())
    }

    pub fn for_chord(chord: KeyChord) -> Option<Command> {
        SHORTCUTS
            .iter()
            .find(|(bound, _)| *bound == chord)
            .map(|(_, command)| *command)
    }
}

/// Ctrl（macOS 為 Cmd）加上可選 Shift 與一個字母鍵。 / Ctrl (Cmd on macOS), optional Shift, and one letter key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyChord {
    pub shift: bool,
    pub key: char,
}

impl KeyChord {
    pub const fn ctrl(key: char) -> Self {
        Self { shift: false, key }
    }

    pub const fn ctrl_shift(key: char) -> Self {
        Self { shift: true, key }
    }

    /// 字母一律正規化為大寫。 / Letters are normalised to upper case.
    pub fn new(shift: bool, key: char) -> Self {
        Self {
            shift,
            key: key.to_ascii_uppercase(),
        }
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Ctrl+")?;
        if self.shift {
            f.write_str("Shift+")?;
        }
        write!(f, "{}", self.key)
    }
}

/// Shift 組合列在前面，讓只比對邏輯修飾鍵的主機先匹配較具體的組合。 / Shifted chords come first so hosts
/// that match modifiers loosely try the more specific chord first.
pub const SHORTCUTS: &[(KeyChord, Command)] = &[
    (KeyChord::ctrl_shift('S'), Command::SaveAs),
    (KeyChord::ctrl('N'), Command::NewFile),
    (KeyChord::ctrl('O'), Command::OpenFile),
    (KeyChord::ctrl('S'), Command::SaveFile),
    (KeyChord::ctrl('Q'), Command::Quit),
    (KeyChord::ctrl('F'), Command::FindReplace),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEntry {
    Item(Command),
    Separator,
}

#[derive(Debug, Clone, Copy)]
pub struct MenuSection {
    pub title: &'static str,
    pub entries: &'static [MenuEntry],
}

pub const MENU_BAR: &[MenuSection] = &[
    MenuSection {
        title: "File",
        entries: &[
            MenuEntry::Item(Command::NewFile),
            MenuEntry::Item(Command::OpenFile),
            MenuEntry::Item(Command::SaveFile),
            MenuEntry::Item(Command::SaveAs),
            MenuEntry::Separator,
            MenuEntry::Item(Command::ToggleAutoSave),
            MenuEntry::Separator,
            MenuEntry::Item(Command::Quit),
        ],
    },
    MenuSection {
        title: "Edit",
        entries: &[
            MenuEntry::Item(Command::Cut),
            MenuEntry::Item(Command::Copy),
            MenuEntry::Item(Command::Paste),
            MenuEntry::Item(Command::Undo),
            MenuEntry::Item(Command::Redo),
            MenuEntry::Item(Command::SelectAll),
            MenuEntry::Separator,
            MenuEntry::Item(Command::FindReplace),
        ],
    },
    MenuSection {
        title: "Font",
        entries: &[MenuEntry::Item(Command::ChangeFont)],
    },
    MenuSection {
        title: "Theme",
        entries: &[
            MenuEntry::Item(Command::SetTheme(ThemeKind::Light)),
            MenuEntry::Item(Command::SetTheme(ThemeKind::Dark)),
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_shortcut_resolves_to_its_command() {
        for (chord, command) in SHORTCUTS {
            assert_eq!(Command::for_chord(*chord), Some(*command));
            assert_eq!(command.shortcut(), Some(*chord));
        }
    }

    #[test]
    fn shortcuts_are_unique() {
        let chords: HashSet<_> = SHORTCUTS.iter().map(|(chord, _)| *chord).collect();
        assert_eq!(chords.len(), SHORTCUTS.len());
    }

    #[test]
    fn shift_distinguishes_save_from_save_as() {
        assert_eq!(
            Command::for_chord(KeyChord::new(false, 's')),
            Some(Command::SaveFile)
        );
        assert_eq!(
            Command::for_chord(KeyChord::new(true, 's')),
            Some(Command::SaveAs)
        );
        assert_eq!(Command::for_chord(KeyChord::new(true, 'n')), None);
    }

    #[test]
    fn every_shortcut_command_has_a_menu_item() {
        let menu_commands: Vec<Command> = MENU_BAR
            .iter()
            .flat_map(|section| section.entries.iter())
            .filter_map(|entry| match entry {
                MenuEntry::Item(command) => Some(*command),
                MenuEntry::Separator => None,
            })
            .collect();
        for (_, command) in SHORTCUTS {
            assert!(menu_commands.contains(command), "{command:?} missing");
        }
    }

    #[test]
    fn accelerator_text() {
        assert_eq!(Command::SaveAs.accelerator().as_deref(), Some("Ctrl+Shift+S"));
        assert_eq!(Command::Undo.accelerator().as_deref(), Some("Ctrl+Z"));
        assert_eq!(Command::ChangeFont.accelerator(), None);
    }
}
