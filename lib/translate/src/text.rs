use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

pub const MAX_LENGTH: usize = 1000;

// ascii word characters, any whitespace and basic punctuation
static ALLOWED_TEXT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"^[A-Za-z0-9_\s.,!?;:'"()-]+$"#).unwrap());
static DISALLOWED_CHARACTER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"[^A-Za-z0-9_\s.,!?;:'"()-]"#).unwrap());
static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TextError {
    #[error("Text cannot be empty")]
    Empty,
    #[error("Text cannot exceed {MAX_LENGTH} characters")]
    TooLong,
    #[error("Text contains unsupported characters")]
    UnsupportedCharacters,
}

pub fn validate_text(text: &str) -> Result<(), TextError> {
    if text.trim().is_empty() {
        return Err(TextError::Empty);
    }
    if text.chars().count() > MAX_LENGTH {
        return Err(TextError::TooLong);
    }
    if !ALLOWED_TEXT.is_match(text) {
        return Err(TextError::UnsupportedCharacters);
    }
    Ok(())
}

/// Cleans text before translation.
///
/// Unsupported characters are removed first so the whitespace they leave behind is collapsed
/// in the same pass, which keeps `prepare_text(prepare_text(s)) == prepare_text(s)`.
pub fn prepare_text(text: &str) -> String {
    let stripped = DISALLOWED_CHARACTER.replace_all(text, "");
    let collapsed = WHITESPACE_RUN.replace_all(&stripped, " ");
    collapsed.trim().to_string()
}
