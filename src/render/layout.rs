use maud::{html, Markup, DOCTYPE};

use crate::i18n::{Language, UiStrings};
use crate::session::Flash;

/// Everything the shared layout needs besides the page body.
#[derive(Debug, Clone)]
pub struct Chrome {
    pub language: Language,
    pub site_title: String,
    pub flashes: Vec<Flash>,
}

impl Chrome {
    pub fn new(language: Language, site_title: impl Into<String>, flashes: Vec<Flash>) -> Self {
        Self {
            language,
            site_title: site_title.into(),
            flashes,
        }
    }

    /// Layout for error pages, rendered without access to app state.
    pub fn bare(language: Language) -> Self {
        Self::new(language, String::new(), Vec::new())
    }

    pub fn strings(&self) -> &'static UiStrings {
        UiStrings::for_language(self.language)
    }

    /// Root of the current language, e.g. `/es/`.
    pub fn home(&self) -> String {
        format!("/{}/", self.language.code())
    }

    pub fn link(&self, path: &str) -> String {
        format!("/{}/{}", self.language.code(), path.trim_start_matches('/'))
    }
}

pub fn page(chrome: &Chrome, title: &str, body: Markup) -> Markup {
    let strings = chrome.strings();
    let full_title = if chrome.site_title.is_empty() {
        title.to_string()
    } else if title.is_empty() {
        chrome.site_title.clone()
    } else {
        format!("{} | {}", title, chrome.site_title)
    };

    html! {
        (DOCTYPE)
        html lang=(chrome.language.code()) {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (full_title) }
                link rel="stylesheet" href="/static/css/site.css";
                link rel="stylesheet" href="/pygments.css";
                link rel="alternate" type="application/rss+xml" href=(chrome.link("blog/rss.xml"));
            }
            body {
                header.site-header {
                    a.brand href=(chrome.home()) {
                        @if chrome.site_title.is_empty() { (strings.nav_home) } @else { (chrome.site_title) }
                    }
                    nav {
                        a href=(chrome.home()) { (strings.nav_home) }
                        a href=(chrome.link("blog/")) { (strings.nav_blog) }
                        a href=(chrome.link("cv/pdf")) { (strings.nav_cv) }
                        a.lang-toggle
                            href=(format!("/set_language/{}", chrome.language.other().code()))
                            hreflang=(chrome.language.other().code()) {
                            (strings.switch_language)
                        }
                    }
                }
                @if !chrome.flashes.is_empty() {
                    div.flashes role="status" {
                        @for flash in &chrome.flashes {
                            p class=(flash.kind.css_class()) { (flash.message) }
                        }
                    }
                }
                main { (body) }
                footer.site-footer {
                    p { (chrome.language.native_name()) }
                }
            }
        }
    }
}
