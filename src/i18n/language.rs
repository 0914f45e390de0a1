//! Language type: the closed set of languages the site is published in.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A supported site language.
///
/// Every piece of content must exist in [`Language::DEFAULT`]; the other
/// variants are overlays that fall back to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Es,
}

impl Language {
    /// The language used when nothing else is known, and the fallback for
    /// missing overlays.
    pub const DEFAULT: Language = Language::En;

    /// All languages, default first.
    pub const ALL: [Language; 2] = [Language::En, Language::Es];

    /// Parse an ISO 639-1 code as it appears in URLs and content files.
    ///
    /// Returns `None` for anything that isn't a supported language; callers
    /// decide whether that means "fall back" or "not found".
    pub fn from_code(code: &str) -> Option<Language> {
        match code {
            "en" => Some(Language::En),
            "es" => Some(Language::Es),
            _ => None,
        }
    }

    /// The ISO 639-1 code (e.g. "en", "es").
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
        }
    }

    /// The language name in its own language, used by the language toggle.
    pub fn native_name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Es => "Español",
        }
    }

    /// The language the toggle switches to.
    pub fn other(&self) -> Language {
        match self {
            Language::En => Language::Es,
            Language::Es => Language::En,
        }
    }

    pub fn is_default(&self) -> bool {
        *self == Language::DEFAULT
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::DEFAULT
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code_supported() {
        assert_eq!(Language::from_code("en"), Some(Language::En));
        assert_eq!(Language::from_code("es"), Some(Language::Es));
    }

    #[test]
    fn test_from_code_unsupported() {
        assert_eq!(Language::from_code("fr"), None);
        assert_eq!(Language::from_code(""), None);
        assert_eq!(Language::from_code("EN"), None);
    }

    #[test]
    fn test_default_is_english() {
        assert_eq!(Language::default(), Language::En);
        assert!(Language::En.is_default());
        assert!(!Language::Es.is_default());
    }

    #[test]
    fn test_other_toggles() {
        assert_eq!(Language::En.other(), Language::Es);
        assert_eq!(Language::Es.other(), Language::En);
    }

    #[test]
    fn test_serde_uses_code() {
        assert_eq!(serde_json::to_string(&Language::Es).unwrap(), "\"es\"");
        let lang: Language = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(lang, Language::En);
    }

    #[test]
    fn test_codes_round_trip_through_from_code() {
        for lang in Language::ALL {
            assert_eq!(Language::from_code(lang.code()), Some(lang));
        }
    }
}
