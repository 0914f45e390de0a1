//! Content Store
//!
//! Static biographical content (about, education, experience, publications,
//! projects) loaded once at startup from JSON files:
//!
//! ```text
//! content/
//!   shared.json   { "<section>": [ { "id": "...", <language-neutral fields> } ] }
//!   en.json       { "<section>": { "<id>": { <overlay fields> } } }
//!   es.json       ...
//! ```
//!
//! The store is immutable once loaded and shared between handlers through
//! [`crate::state::AppState`].

pub mod models;
pub mod resolve;

use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::i18n::Language;

pub use models::ResolvedContent;

pub type Record = Map<String, Value>;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{section} item '{id}' has no {language} overlay")]
    MissingDefaultOverlay {
        section: Section,
        id: String,
        language: Language,
    },

    #[error("{section} item '{id}' does not match the expected shape: {source}")]
    InvalidRecord {
        section: Section,
        id: String,
        #[source]
        source: serde_json::Error,
    },
}

/// The content lists a page can be built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    About,
    Education,
    Experience,
    Publications,
    Projects,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::About,
        Section::Education,
        Section::Experience,
        Section::Publications,
        Section::Projects,
    ];

    /// Key used for the section in the JSON files.
    pub fn key(&self) -> &'static str {
        match self {
            Section::About => "about",
            Section::Education => "education",
            Section::Experience => "experience",
            Section::Publications => "publications",
            Section::Projects => "projects",
        }
    }

    pub fn from_key(key: &str) -> Option<Section> {
        Section::ALL.into_iter().find(|s| s.key() == key)
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// One content record: language-neutral fields plus one overlay per language.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentItem {
    pub id: String,
    pub shared: Record,
    pub overlays: HashMap<Language, Record>,
}

impl ContentItem {
    pub fn new(id: impl Into<String>, shared: Record) -> Self {
        Self {
            id: id.into(),
            shared,
            overlays: HashMap::new(),
        }
    }

    pub fn with_overlay(mut self, language: Language, overlay: Record) -> Self {
        self.overlays.insert(language, overlay);
        self
    }
}

/// Shape of `shared.json`.
type SharedFile = HashMap<String, Vec<Record>>;

/// Shape of `<lang>.json`.
type OverlayFile = HashMap<String, HashMap<String, Record>>;

#[derive(Debug, Clone, Default)]
pub struct ContentStore {
    sections: HashMap<Section, Vec<ContentItem>>,
}

impl ContentStore {
    /// Load `shared.json` and every `<lang>.json` from `dir`.
    ///
    /// Missing files are tolerated (an absent `shared.json` is an empty store,
    /// an absent language file means that language has no overlays). Items
    /// without a default-language overlay are rejected.
    pub fn load(dir: &Path) -> Result<Self, ContentError> {
        let shared_path = dir.join("shared.json");
        let shared: SharedFile = match read_json(&shared_path)? {
            Some(value) => value,
            None => {
                tracing::warn!("{} not found, starting with no content", shared_path.display());
                return Ok(Self::default());
            }
        };

        let mut overlays = Vec::new();
        for language in Language::ALL {
            let path = dir.join(format!("{}.json", language.code()));
            match read_json::<OverlayFile>(&path)? {
                Some(file) => overlays.push((language, file)),
                None => tracing::warn!(
                    "{} not found, {} pages will fall back to {}",
                    path.display(),
                    language,
                    Language::DEFAULT
                ),
            }
        }

        let store = Self::from_parts(shared, overlays)?;
        tracing::info!(
            "Loaded content from {} ({} items)",
            dir.display(),
            store.sections.values().map(Vec::len).sum::<usize>()
        );
        Ok(store)
    }

    /// Join the shared lists with their overlays.
    ///
    /// Items are matched by their `id` field; items without one are matched
    /// by their position in the list.
    pub fn from_parts(
        shared: HashMap<String, Vec<Record>>,
        overlays: Vec<(Language, HashMap<String, HashMap<String, Record>>)>,
    ) -> Result<Self, ContentError> {
        let mut sections = HashMap::new();

        for (key, records) in shared {
            let Some(section) = Section::from_key(&key) else {
                tracing::warn!("Ignoring unknown content section '{}'", key);
                continue;
            };

            let mut items: Vec<ContentItem> = records
                .into_iter()
                .enumerate()
                .map(|(index, mut record)| {
                    let id = match record.remove("id") {
                        Some(Value::String(id)) => id,
                        Some(other) => other.to_string(),
                        None => index.to_string(),
                    };
                    ContentItem::new(id, record)
                })
                .collect();

            for (language, file) in &overlays {
                let Some(by_id) = file.get(section.key()) else {
                    continue;
                };
                for (id, overlay) in by_id {
                    match items.iter_mut().find(|item| &item.id == id) {
                        Some(item) => {
                            item.overlays.insert(*language, overlay.clone());
                        }
                        None => tracing::warn!(
                            "{} overlay for unknown {} item '{}'",
                            language,
                            section,
                            id
                        ),
                    }
                }
            }

            if let Some(item) = items
                .iter()
                .find(|item| !item.overlays.contains_key(&Language::DEFAULT))
            {
                return Err(ContentError::MissingDefaultOverlay {
                    section,
                    id: item.id.clone(),
                    language: Language::DEFAULT,
                });
            }

            sections.insert(section, items);
        }

        Ok(Self { sections })
    }

    /// Build a store directly from items; used by tests and tooling.
    pub fn from_items(items: impl IntoIterator<Item = (Section, Vec<ContentItem>)>) -> Self {
        Self {
            sections: items.into_iter().collect(),
        }
    }

    /// Items of a section, in file order. Empty when the section is absent.
    pub fn items(&self, section: Section) -> &[ContentItem] {
        self.sections
            .get(&section)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn has(&self, section: Section) -> bool {
        !self.items(section).is_empty()
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>, ContentError> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ContentError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| ContentError::Parse {
            path: path.to_path_buf(),
            source,
        })
}
