use serde::{Deserialize, Serialize};
use std::ops::Deref;

/// Reference list of every weather condition code the API can return.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Conditions(pub Vec<ConditionCode>);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionCode {
    pub code: u32,
    pub day: String,
    pub night: String,
    pub icon: u32,
    #[serde(default)]
    pub languages: Vec<ConditionTranslation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionTranslation {
    pub lang_name: String,
    pub lang_iso: String,
    pub day_text: String,
    pub night_text: String,
}

impl Conditions {
    pub fn find(&self, code: u32) -> Option<&ConditionCode> {
        self.0.iter().find(|c| c.code == code)
    }
}

impl ConditionCode {
    /// Localised day/night text, falling back to English.
    pub fn text(&self, lang: &str, is_day: bool) -> &str {
        let translation = self.languages.iter().find(|t| t.lang_iso == lang);
        match (translation, is_day) {
            (Some(t), true) => t.day_text.as_str(),
            (Some(t), false) => t.night_text.as_str(),
            (None, true) => self.day.as_str(),
            (None, false) => self.night.as_str(),
        }
    }
}

impl Deref for Conditions {
    type Target = [ConditionCode];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
