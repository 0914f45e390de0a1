//! Internationalization: the supported languages and the localized UI strings.
//!
//! Content text (about, projects, ...) lives in the content store and is
//! resolved by [`crate::content::resolve`]; this module only covers the chrome
//! around it (navigation, headings, form labels, flash messages).

mod language;
mod strings;

pub use language::Language;
pub use strings::{UiStrings, ENGLISH_STRINGS, SPANISH_STRINGS};
