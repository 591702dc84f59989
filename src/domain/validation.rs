use thiserror::Error;

/// Input rejected before any request is built.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required text field was empty or whitespace-only.
    #[error("{0} cannot be empty")]
    Empty(&'static str),
    /// A numeric field fell outside its allowed range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: String,
        max: String,
    },
    /// A locale list would contain the same language twice.
    #[error("locale '{0}' is already present")]
    DuplicateLanguage(String),
    /// A language is not in the supported list.
    #[error("unsupported language '{0}'")]
    UnsupportedLanguage(String),
    /// A locale expected to exist was not found.
    #[error("locale '{0}' not found")]
    MissingLanguage(String),
    /// Every supported language is already used.
    #[error("all supported languages are already present")]
    NoLanguageAvailable,
    /// The last remaining locale cannot be removed.
    #[error("at least one locale is required")]
    LastLocale,
    /// A `lang=value` pair could not be parsed.
    #[error("expected LANG=VALUE, got '{0}'")]
    MalformedLocale(String),
    #[error("invalid value: {0}")]
    Invalid(String),
}

/// Trim and reject empty input.
pub fn require_text(value: &str, field: &'static str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ValidationError::Empty(field))
    } else {
        Ok(trimmed.to_string())
    }
}
