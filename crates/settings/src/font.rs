use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MIN_FONT_SIZE: u32 = 8;
pub const MAX_FONT_SIZE: u32 = 50;

pub const DEFAULT_FONT_FAMILY: &str = "Arial";
pub const DEFAULT_FONT_SIZE: u32 = 12;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FontError {
    #[error("font family cannot be empty")]
    EmptyFamily,
    #[error("font size {0} is outside the supported range 8..=50")]
    SizeOutOfRange(u32),
}

/// Rendering family the editor falls back to for a named font.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontClass {
    Proportional,
    Monospace,
}

/// The single font applied to the whole editor buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontSpec {
    #[serde(default = "default_family")]
    family: String,
    #[serde(default = "default_size")]
    size: u32,
}

fn default_family() -> String {
    DEFAULT_FONT_FAMILY.to_string()
}

fn default_size() -> u32 {
    DEFAULT_FONT_SIZE
}

impl FontSpec {
    pub fn new(family: impl Into<String>, size: u32) -> Result<Self, FontError> {
        let family = family.into().trim().to_string();
        if family.is_empty() {
            return Err(FontError::EmptyFamily);
        }
        if !(MIN_FONT_SIZE..=MAX_FONT_SIZE).contains(&size) {
            return Err(FontError::SizeOutOfRange(size));
        }
        Ok(Self { family, size })
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Guesses whether the family is fixed-width from its name.
    pub fn class(&self) -> FontClass {
        let lowered = self.family.to_ascii_lowercase();
        if ["mono", "courier", "consol"]
            .iter()
            .any(|needle| lowered.contains(needle))
        {
            FontClass::Monospace
        } else {
            FontClass::Proportional
        }
    }

    // Config files may carry values that never went through `new`.
    pub(crate) fn sanitize(&mut self) {
        self.family = self.family.trim().to_string();
        if self.family.is_empty() {
            self.family = DEFAULT_FONT_FAMILY.to_string();
        }
        if !(MIN_FONT_SIZE..=MAX_FONT_SIZE).contains(&self.size) {
            tracing::warn!(size = self.size, "font size out of range, using default");
            self.size = DEFAULT_FONT_SIZE;
        }
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: default_family(),
            size: default_size(),
        }
    }
}

impl fmt::Display for FontSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.family, self.size)
    }
}
