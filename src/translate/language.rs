use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Languages offered in both selectors, in display order.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Language {
    #[default]
    English,
    Spanish,
    French,
    German,
    Italian,
    Portuguese,
    Bengali,
    Gujarati,
    Chinese,
    Japanese,
    Arabic,
    Persian,
    Turkish,
}

impl Language {
    pub const ALL: [Language; 13] = [
        Language::English,
        Language::Spanish,
        Language::French,
        Language::German,
        Language::Italian,
        Language::Portuguese,
        Language::Bengali,
        Language::Gujarati,
        Language::Chinese,
        Language::Japanese,
        Language::Arabic,
        Language::Persian,
        Language::Turkish,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Spanish => "Spanish",
            Language::French => "French",
            Language::German => "German",
            Language::Italian => "Italian",
            Language::Portuguese => "Portuguese",
            Language::Bengali => "Bengali",
            Language::Gujarati => "Gujarati",
            Language::Chinese => "Chinese",
            Language::Japanese => "Japanese",
            Language::Arabic => "Arabic",
            Language::Persian => "Persian",
            Language::Turkish => "Turkish",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Language {
    type Err = ValidationError;

    /// Exact names only; anything outside the supported set is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .iter()
            .copied()
            .find(|lang| lang.name() == s)
            .ok_or_else(|| ValidationError::UnsupportedLanguage(s.to_string()))
    }
}

impl TryFrom<String> for Language {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Language> for String {
    fn from(lang: Language) -> Self {
        lang.name().to_string()
    }
}

/// Source and target of one translation. Identical languages are allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguagePair {
    pub input_language: Language,
    pub output_language: Language,
}

impl LanguagePair {
    pub fn new(input_language: Language, output_language: Language) -> Self {
        Self {
            input_language,
            output_language,
        }
    }

    pub fn parse(input_language: &str, output_language: &str) -> Result<Self, ValidationError> {
        Ok(Self::new(input_language.parse()?, output_language.parse()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_set_has_thirteen_distinct_names() {
        let mut names: Vec<&str> = Language::ALL.iter().map(|l| l.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 13);
    }

    #[test]
    fn test_every_name_parses_back() {
        for lang in Language::ALL {
            assert_eq!(lang.name().parse::<Language>(), Ok(lang));
        }
    }

    #[test]
    fn test_unknown_language_is_rejected() {
        assert_eq!(
            "Klingon".parse::<Language>(),
            Err(ValidationError::UnsupportedLanguage("Klingon".to_string()))
        );
        assert!("english".parse::<Language>().is_err());
        assert!("".parse::<Language>().is_err());
    }

    #[test]
    fn test_same_language_pair_is_allowed() {
        let pair = LanguagePair::parse("German", "German").unwrap();
        assert_eq!(pair.input_language, pair.output_language);
    }

    #[test]
    fn test_serde_uses_display_names() {
        let json = serde_json::to_string(&Language::Japanese).unwrap();
        assert_eq!(json, "\"Japanese\"");
        let back: Language = serde_json::from_str("\"Persian\"").unwrap();
        assert_eq!(back, Language::Persian);
        assert!(serde_json::from_str::<Language>("\"Latin\"").is_err());
    }
}
