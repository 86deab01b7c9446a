//! Input checks run by the facade before any request is made.

use crate::error::{ApixuError, Result};

/// Longest accepted query, in bytes after trimming.
pub const MAX_QUERY_LENGTH: usize = 256;

pub const DEFAULT_LANGUAGE: &str = "en";

/// Language codes accepted for the `lang` parameter.
pub const SUPPORTED_LANGUAGES: &[&str] = &[
    "en", "ar", "bn", "bg", "zh", "zh_tw", "cs", "da", "nl", "fi", "fr", "de", "el", "hi", "hu",
    "it", "ja", "jv", "ko", "zh_cmn", "mr", "pl", "pa", "ro", "ru", "sr", "si", "sk", "es", "sv",
    "ta", "te", "tr", "uk", "ur", "vi", "zh_wuu", "zh_hsn", "zh_yue", "zu",
];

pub fn validate_query(query: &str) -> Result<()> {
    let query = query.trim();

    if query.is_empty() {
        return Err(ApixuError::invalid_query("Query is missing"));
    }

    if query.len() > MAX_QUERY_LENGTH {
        return Err(ApixuError::invalid_query(format!(
            "Query exceeds maximum length ({MAX_QUERY_LENGTH})"
        )));
    }

    Ok(())
}

pub fn validate_language(lang: &str) -> Result<()> {
    if is_supported_language(lang) {
        Ok(())
    } else {
        Err(ApixuError::invalid_query("Language not supported"))
    }
}

/// Forecast hours are 0-23, in the location's local time.
pub fn validate_hour(hour: u8) -> Result<()> {
    if hour > 23 {
        return Err(ApixuError::invalid_query("Hour must be between 0 and 23"));
    }
    Ok(())
}

pub fn is_supported_language(lang: &str) -> bool {
    SUPPORTED_LANGUAGES.contains(&lang.trim())
}
