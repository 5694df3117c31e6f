use std::fmt;

/// Word and character counts shown in the status bar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub words: usize,
    pub characters: usize,
}

impl StatusCounts {
    /// Words are maximal runs of non-whitespace; characters are Unicode
    /// scalar values.
    pub fn measure(text: &str) -> Self {
        Self {
            words: text.split_whitespace().count(),
            characters: text.chars().count(),
        }
    }
}

impl fmt::Display for StatusCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Words: {} | Characters: {}",
            self.words, self.characters
        )
    }
}
