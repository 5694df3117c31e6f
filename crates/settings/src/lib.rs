pub mod config;
pub mod font;
pub mod theme;

pub use config::{ConfigError, EditorConfig, CONFIG_ENV_VAR};
pub use font::{
    FontClass, FontError, FontSpec, DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE, MAX_FONT_SIZE,
    MIN_FONT_SIZE,
};
pub use theme::{Color, ThemeKind, ThemePalette};
