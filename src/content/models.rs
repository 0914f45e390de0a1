//! Typed records built from resolved content, as consumed by the templates.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::{resolve, ContentError, ContentStore, Record, Section};
use crate::i18n::Language;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Link {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct About {
    pub name: String,
    #[serde(default)]
    pub headline: Option<String>,
    /// Paragraphs of the biography
    #[serde(default)]
    pub summary: Vec<String>,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Education {
    pub institution: String,
    pub degree: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub start: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub end: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Experience {
    pub company: String,
    pub role: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub start: Option<String>,
    /// `None` means the position is current
    #[serde(default, deserialize_with = "text_or_number")]
    pub end: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Publication {
    pub title: String,
    #[serde(default)]
    pub authors: Option<String>,
    #[serde(default)]
    pub venue: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub year: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub repo: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub year: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Every section of the store, resolved for one language.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ResolvedContent {
    pub language: Language,
    pub about: Option<About>,
    pub education: Vec<Education>,
    pub experience: Vec<Experience>,
    pub publications: Vec<Publication>,
    pub projects: Vec<Project>,
}

impl ResolvedContent {
    pub fn build(store: &ContentStore, language: Language) -> Result<Self, ContentError> {
        Ok(Self {
            language,
            about: section::<About>(store, Section::About, language)?
                .into_iter()
                .next(),
            education: section(store, Section::Education, language)?,
            experience: section(store, Section::Experience, language)?,
            publications: section(store, Section::Publications, language)?,
            projects: section(store, Section::Projects, language)?,
        })
    }
}

fn section<T: serde::de::DeserializeOwned>(
    store: &ContentStore,
    section: Section,
    language: Language,
) -> Result<Vec<T>, ContentError> {
    resolve::resolve_items(store.items(section), language)
        .into_iter()
        .map(|record| typed(section, record))
        .collect()
}

fn typed<T: serde::de::DeserializeOwned>(section: Section, record: Record) -> Result<T, ContentError> {
    let id = record
        .get("id")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    serde_json::from_value(Value::Object(record))
        .map_err(|source| ContentError::InvalidRecord { section, id, source })
}

/// Years and dates show up both as `2021` and `"2021-03"` in hand-written files.
fn text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
