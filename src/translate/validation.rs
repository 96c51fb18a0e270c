use serde::Serialize;
use thiserror::Error;

use super::interface::AUTO_DETECT;

/// Maximum number of characters accepted in one request
pub const MAX_TEXT_CHARS: usize = 5000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter text to translate")]
    EmptyText,

    #[error("Text is too long ({length} characters, maximum is {max})")]
    TextTooLong { length: usize, max: usize },

    #[error("Please select a target language")]
    InvalidTargetLanguage,

    #[error("Source and target languages are the same")]
    SameLanguage,
}

/// Live character counter shown next to the input box
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CharacterCount {
    pub count: usize,
    pub max: usize,
    pub exceeds_limit: bool,
}

pub fn character_count(text: &str) -> CharacterCount {
    let count = text.chars().count();
    CharacterCount {
        count,
        max: MAX_TEXT_CHARS,
        exceeds_limit: count > MAX_TEXT_CHARS,
    }
}

/// Check raw user input before anything touches the network
pub fn validate(text: &str, source_lang: &str, target_lang: &str) -> Result<(), ValidationError> {
    if text.trim().is_empty() {
        return Err(ValidationError::EmptyText);
    }

    let length = text.chars().count();
    if length > MAX_TEXT_CHARS {
        return Err(ValidationError::TextTooLong {
            length,
            max: MAX_TEXT_CHARS,
        });
    }

    if target_lang.is_empty() || target_lang == AUTO_DETECT {
        return Err(ValidationError::InvalidTargetLanguage);
    }

    if source_lang == target_lang {
        return Err(ValidationError::SameLanguage);
    }

    Ok(())
}
