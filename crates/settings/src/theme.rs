use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xFF }
    }
}

/// Colours applied to the text buffer only; the rest of the chrome follows
/// the toolkit's own light or dark visuals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemePalette {
    pub background: Color,
    pub foreground: Color,
    pub cursor: Color,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeKind {
    #[default]
    Light,
    Dark,
}

impl ThemeKind {
    pub fn palette(self) -> ThemePalette {
        match self {
            ThemeKind::Light => ThemePalette {
                background: Color::WHITE,
                foreground: Color::BLACK,
                cursor: Color::BLACK,
            },
            ThemeKind::Dark => ThemePalette {
                background: Color::BLACK,
                foreground: Color::WHITE,
                cursor: Color::WHITE,
            },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ThemeKind::Light => "light",
            ThemeKind::Dark => "dark",
        }
    }

    /// Menu label for the theme.
    pub fn label(self) -> &'static str {
        match self {
            ThemeKind::Light => "Light Mode",
            ThemeKind::Dark => "Dark Mode",
        }
    }
}

impl fmt::Display for ThemeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
