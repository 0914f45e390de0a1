//! Blog Loader
//!
//! Markdown posts live under the blog directory with the language as the
//! first path segment:
//!
//! ```text
//! posts/
//!   en/hello-world.md    -> path "en/hello-world"
//!   es/hola-mundo.md     -> path "es/hola-mundo"
//! ```
//!
//! Listings only include posts that carry a `date`; a date that doesn't parse
//! sorts last instead of failing the request.

pub mod frontmatter;
pub mod markdown;

use chrono::NaiveDateTime;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use walkdir::WalkDir;

use crate::i18n::Language;

pub use frontmatter::UNKNOWN_DATE;

/// Number of posts shown on the index page.
pub const LATEST_POSTS: usize = 3;

#[derive(Debug, Error)]
pub enum BlogError {
    #[error("post not found: {0}")]
    NotFound(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to scan blog directory: {0}")]
    Walk(#[from] walkdir::Error),
}

/// A blog post.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// Relative path without extension, e.g. `en/hello-world`
    pub path: String,
    /// Parsed from the first path segment
    pub language: Option<Language>,
    /// Path with the language prefix removed
    pub slug: String,
    pub title: String,
    /// `None` when the post has no `date` key; [`UNKNOWN_DATE`] when it has one
    /// that doesn't parse
    pub date: Option<NaiveDateTime>,
    pub summary: Option<String>,
    pub tags: Vec<String>,
    pub meta: BTreeMap<String, String>,
    pub body: String,
    pub html: String,
}

impl Page {
    pub fn parse(path: &str, raw: &str) -> Page {
        let (meta, body) = frontmatter::split(raw);

        let (language, slug) = match path.split_once('/') {
            Some((prefix, rest)) => (Language::from_code(prefix), rest.to_string()),
            None => (None, path.to_string()),
        };

        let date = meta
            .get("date")
            .map(|raw| frontmatter::date_or_sentinel(path, raw));

        let title = meta
            .get("title")
            .filter(|t| !t.is_empty())
            .cloned()
            .unwrap_or_else(|| slug.clone());

        let tags = meta
            .get("tags")
            .map(|t| {
                t.trim_matches(|c| c == '[' || c == ']')
                    .split(',')
                    .map(|tag| tag.trim().trim_matches(|c| c == '"' || c == '\'').to_string())
                    .filter(|tag| !tag.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Page {
            path: path.to_string(),
            language,
            slug,
            title,
            date,
            summary: meta.get("summary").cloned(),
            tags,
            html: markdown::to_html(body),
            body: body.to_string(),
            meta,
        }
    }

    /// The date to display, if the post has a real one.
    pub fn published(&self) -> Option<NaiveDateTime> {
        self.date.filter(|d| *d != UNKNOWN_DATE)
    }
}

/// Posts in `language` that carry a date, newest first.
pub fn dated_posts(pages: &[Page], language: Language) -> Vec<Page> {
    let mut posts: Vec<Page> = pages
        .iter()
        .filter(|p| p.language == Some(language) && p.date.is_some())
        .cloned()
        .collect();
    posts.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.path.cmp(&b.path)));
    posts
}

#[derive(Debug, Clone)]
pub struct BlogLoader {
    root: PathBuf,
    auto_reload: bool,
    snapshot: Arc<Vec<Page>>,
}

impl BlogLoader {
    /// Scan `root` once. With `auto_reload` every lookup rescans the
    /// directory instead of using that snapshot.
    pub fn new(root: impl Into<PathBuf>, auto_reload: bool) -> Result<Self, BlogError> {
        let root = root.into();
        let snapshot = Arc::new(scan(&root)?);
        tracing::info!("Loaded {} posts from {}", snapshot.len(), root.display());
        Ok(Self {
            root,
            auto_reload,
            snapshot,
        })
    }

    /// A loader over fixed pages that never touches the filesystem.
    pub fn from_pages(pages: Vec<Page>) -> Self {
        Self {
            root: PathBuf::new(),
            auto_reload: false,
            snapshot: Arc::new(pages),
        }
    }

    pub fn pages(&self) -> Result<Arc<Vec<Page>>, BlogError> {
        if self.auto_reload {
            Ok(Arc::new(scan(&self.root)?))
        } else {
            Ok(Arc::clone(&self.snapshot))
        }
    }

    /// Full list view for a language.
    pub fn posts(&self, language: Language) -> Result<Vec<Page>, BlogError> {
        Ok(dated_posts(&self.pages()?, language))
    }

    /// The `n` newest posts of a language.
    pub fn latest(&self, language: Language, n: usize) -> Result<Vec<Page>, BlogError> {
        let mut posts = self.posts(language)?;
        posts.truncate(n);
        Ok(posts)
    }

    /// Fetch one post by its slug within a language.
    pub fn get(&self, language: Language, slug: &str) -> Result<Page, BlogError> {
        let path = format!("{}/{}", language.code(), slug.trim_matches('/'));
        self.pages()?
            .iter()
            .find(|p| p.path == path)
            .cloned()
            .ok_or(BlogError::NotFound(path))
    }
}

/// Read every `*.md` file under `root`. A missing directory yields no posts.
fn scan(root: &Path) -> Result<Vec<Page>, BlogError> {
    if !root.exists() {
        tracing::warn!("Blog directory {} does not exist", root.display());
        return Ok(Vec::new());
    }

    let mut pages = Vec::new();
    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        let entry = entry?;
        let file = entry.path();
        if !entry.file_type().is_file() || file.extension().and_then(|e| e.to_str()) != Some("md") {
            continue;
        }

        let Some(path) = page_path(root, file) else {
            continue;
        };
        let raw = std::fs::read_to_string(file).map_err(|source| BlogError::Io {
            path: file.to_path_buf(),
            source,
        })?;
        pages.push(Page::parse(&path, &raw));
    }
    Ok(pages)
}

fn page_path(root: &Path, file: &Path) -> Option<String> {
    let relative = file.strip_prefix(root).ok()?.with_extension("");
    let parts: Vec<&str> = relative
        .components()
        .map(|c| c.as_os_str().to_str())
        .collect::<Option<_>>()?;
    Some(parts.join("/"))
}
