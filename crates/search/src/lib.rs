//! Replace-all engine behind the TextPad "Find & Replace" window.
//!
//! The default options reproduce a literal, case-sensitive, global replace of
//! every occurrence in the buffer. Case folding and regular expressions are
//! opt-in and go through the `regex` crate; the plain case-sensitive path
//! never compiles a pattern.

use regex::{Regex, RegexBuilder};
use thiserror::Error;

/// Error conditions raised by the replace engine.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("search pattern cannot be empty")]
    EmptyPattern,
    #[error("invalid pattern: {0}")]
    InvalidPattern(String),
}

/// Determines how the search pattern is interpreted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SearchMode {
    #[default]
    Plain,
    Regex,
}

/// Options supplied to [`replace_all`] and [`count_matches`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchOptions {
    pub pattern: String,
    pub mode: SearchMode,
    pub case_sensitive: bool,
}

impl SearchOptions {
    /// Literal, case-sensitive options for the given pattern.
    pub fn literal(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            mode: SearchMode::Plain,
            case_sensitive: true,
        }
    }

    pub fn with_mode(mut self, mode: SearchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    pub fn validate(&self) -> Result<(), SearchError> {
        if self.pattern.is_empty() {
            return Err(SearchError::EmptyPattern);
        }
        Ok(())
    }

    fn is_exact_literal(&self) -> bool {
        self.mode == SearchMode::Plain && self.case_sensitive
    }
}

/// Captures the outcome of a [`replace_all`] call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplaceOutcome {
    pub text: String,
    pub replacements: usize,
}

impl ReplaceOutcome {
    pub fn changed(&self) -> bool {
        self.replacements > 0
    }
}

/// Counts the non-overlapping occurrences of the pattern in `text`.
pub fn count_matches(text: &str, options: &SearchOptions) -> Result<usize, SearchError> {
    options.validate()?;
    if options.is_exact_literal() {
        return Ok(text.matches(options.pattern.as_str()).count());
    }
    let regex = build_regex(options)?;
    Ok(regex.find_iter(text).count())
}

/// Replaces every occurrence of the pattern in `text` with `replacement`.
///
/// In [`SearchMode::Regex`] the replacement may reference capture groups
/// (`$1`, `${name}`); in plain mode it is inserted verbatim.
pub fn replace_all(
    text: &str,
    replacement: &str,
    options: &SearchOptions,
) -> Result<ReplaceOutcome, SearchError> {
    options.validate()?;

    if options.is_exact_literal() {
        let replacements = text.matches(options.pattern.as_str()).count();
        let text = if replacements == 0 {
            text.to_string()
        } else {
            text.replace(options.pattern.as_str(), replacement)
        };
        return Ok(ReplaceOutcome { text, replacements });
    }

    let regex = build_regex(options)?;
    let mut replaced = String::with_capacity(text.len());
    let mut replacements = 0usize;
    let mut last = 0usize;

    for caps in regex.captures_iter(text) {
        let Some(m) = caps.get(0) else {
            continue;
        };
        replaced.push_str(&text[last..m.start()]);
        match options.mode {
            SearchMode::Regex => caps.expand(replacement, &mut replaced),
            SearchMode::Plain => replaced.push_str(replacement),
        }
        last = m.end();
        replacements += 1;
    }

    if replacements == 0 {
        return Ok(ReplaceOutcome {
            text: text.to_string(),
            replacements,
        });
    }
    replaced.push_str(&text[last..]);

    Ok(ReplaceOutcome {
        text: replaced,
        replacements,
    })
}

fn build_regex(options: &SearchOptions) -> Result<Regex, SearchError> {
    let pattern = match options.mode {
        SearchMode::Plain => regex::escape(&options.pattern),
        SearchMode::Regex => options.pattern.clone(),
    };
    RegexBuilder::new(&pattern)
        .case_insensitive(!options.case_sensitive)
        .multi_line(true)
        .build()
        .map_err(|err| SearchError::InvalidPattern(err.to_string()))
}
