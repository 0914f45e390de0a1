//! One function per template. Each takes fully resolved data and returns
//! markup; nothing here reads files or the session.

use maud::{html, Markup, PreEscaped, DOCTYPE};

use super::layout::{self, Chrome};
use crate::blog::Page;
use crate::contact::{ContactForm, FormErrors};
use crate::content::models::{About, Education, Experience, Project, Publication};
use crate::content::ResolvedContent;
use crate::i18n::{Language, UiStrings};

const DATE_FORMAT: &str = "%Y-%m-%d";

fn span(start: &Option<String>, end: &Option<String>, present: &str) -> String {
    match (start, end) {
        (Some(s), Some(e)) => format!("{s} – {e}"),
        (Some(s), None) => format!("{s} – {present}"),
        (None, Some(e)) => e.clone(),
        (None, None) => String::new(),
    }
}

fn about_section(about: &About) -> Markup {
    html! {
        section id="about" {
            @if let Some(photo) = &about.photo {
                img.portrait src=(photo) alt=(about.name);
            }
            h1 { (about.name) }
            @if let Some(headline) = &about.headline { p.headline { (headline) } }
            @for paragraph in &about.summary { p { (paragraph) } }
            @if !about.links.is_empty() {
                ul.links {
                    @for link in &about.links {
                        li { a href=(link.url) rel="me" { (link.label) } }
                    }
                }
            }
        }
    }
}

fn experience_list(items: &[Experience], strings: &UiStrings) -> Markup {
    html! {
        ol.timeline {
            @for job in items {
                li {
                    h3 {
                        (job.role) " · "
                        @if let Some(url) = &job.url { a href=(url) { (job.company) } } @else { (job.company) }
                    }
                    p.period { (span(&job.start, &job.end, strings.cv_present)) }
                    @if let Some(description) = &job.description { p { (description) } }
                    @if !job.highlights.is_empty() {
                        ul { @for h in &job.highlights { li { (h) } } }
                    }
                }
            }
        }
    }
}

fn education_list(items: &[Education], strings: &UiStrings) -> Markup {
    html! {
        ol.timeline {
            @for entry in items {
                li {
                    h3 { (entry.degree) }
                    p.institution {
                        @if let Some(url) = &entry.url { a href=(url) { (entry.institution) } } @else { (entry.institution) }
                    }
                    p.period { (span(&entry.start, &entry.end, strings.cv_present)) }
                    @if let Some(description) = &entry.description { p { (description) } }
                }
            }
        }
    }
}

fn publication_list(items: &[Publication]) -> Markup {
    html! {
        ul.publications {
            @for publication in items {
                li {
                    @if let Some(url) = &publication.url {
                        a href=(url) { (publication.title) }
                    } @else {
                        (publication.title)
                    }
                    @if let Some(authors) = &publication.authors { ". " span.authors { (authors) } }
                    @if let Some(venue) = &publication.venue { ". " em { (venue) } }
                    @if let Some(year) = &publication.year { " (" (year) ")" }
                }
            }
        }
    }
}

fn project_cards(items: &[Project], strings: &UiStrings) -> Markup {
    html! {
        div.projects {
            @for project in items {
                article.project {
                    @if let Some(image) = &project.image {
                        img src=(image) alt=(project.title) loading="lazy";
                    }
                    h3 {
                        @if let Some(url) = &project.url { a href=(url) { (project.title) } } @else { (project.title) }
                        @if let Some(year) = &project.year { " " small { (year) } }
                    }
                    @if let Some(description) = &project.description { p { (description) } }
                    @if !project.tags.is_empty() {
                        ul.tags { @for tag in &project.tags { li { (tag) } } }
                    }
                    @if let Some(repo) = &project.repo { a.repo href=(repo) { (strings.project_code) } }
                }
            }
        }
    }
}

fn post_list(chrome: &Chrome, posts: &[Page]) -> Markup {
    html! {
        ul.posts {
            @for post in posts {
                li {
                    a href=(chrome.link(&format!("blog/{}/", post.slug))) { (post.title) }
                    @if let Some(date) = post.published() {
                        " " time datetime=(date.format(DATE_FORMAT).to_string()) { (date.format(DATE_FORMAT).to_string()) }
                    }
                    @if let Some(summary) = &post.summary { p.summary { (summary) } }
                }
            }
        }
    }
}

fn contact_form(chrome: &Chrome, form: &ContactForm, errors: &FormErrors) -> Markup {
    let strings = chrome.strings();
    html! {
        section id="contact" {
            h2 { (strings.heading_contact) }
            p { (strings.contact_intro) }
            form method="post" action=(chrome.home()) novalidate {
                label for="name" { (strings.form_name) }
                input id="name" type="text" name="name" value=(form.name) maxlength="100" required;
                @if let Some(error) = errors.name { p.field-error { (error) } }

                label for="email" { (strings.form_email) }
                input id="email" type="email" name="email" value=(form.email) maxlength="254" required;
                @if let Some(error) = errors.email { p.field-error { (error) } }

                label for="message" { (strings.form_message) }
                textarea id="message" name="message" rows="6" maxlength="5000" required { (form.message) }
                @if let Some(error) = errors.message { p.field-error { (error) } }

                button type="submit" { (strings.form_submit) }
            }
        }
    }
}

/// The landing page: every content section, the latest posts, and the
/// contact form (pre-filled and annotated when validation failed).
pub fn index(
    chrome: &Chrome,
    content: &ResolvedContent,
    latest: &[Page],
    form: &ContactForm,
    errors: &FormErrors,
) -> Markup {
    let strings = chrome.strings();
    let body = html! {
        @if let Some(about) = &content.about { (about_section(about)) }
        @if !content.experience.is_empty() {
            section id="experience" {
                h2 { (strings.heading_experience) }
                (experience_list(&content.experience, strings))
            }
        }
        @if !content.education.is_empty() {
            section id="education" {
                h2 { (strings.heading_education) }
                (education_list(&content.education, strings))
            }
        }
        @if !content.publications.is_empty() {
            section id="publications" {
                h2 { (strings.heading_publications) }
                (publication_list(&content.publications))
            }
        }
        @if !content.projects.is_empty() {
            section id="projects" {
                h2 { (strings.heading_projects) }
                (project_cards(&content.projects, strings))
            }
        }
        section id="latest-posts" {
            h2 { (strings.heading_latest_posts) }
            @if latest.is_empty() {
                p { (strings.blog_empty) }
            } @else {
                (post_list(chrome, latest))
                a href=(chrome.link("blog/")) { (strings.blog_all_posts) }
            }
        }
        (contact_form(chrome, form, errors))
    };
    layout::page(chrome, "", body)
}

pub fn about_page(chrome: &Chrome, about: &About) -> Markup {
    layout::page(chrome, chrome.strings().nav_about, about_section(about))
}

pub fn projects_page(chrome: &Chrome, projects: &[Project]) -> Markup {
    let strings = chrome.strings();
    layout::page(
        chrome,
        strings.nav_projects,
        html! {
            h1 { (strings.heading_projects) }
            (project_cards(projects, strings))
        },
    )
}

pub fn education_page(chrome: &Chrome, education: &[Education]) -> Markup {
    let strings = chrome.strings();
    layout::page(
        chrome,
        strings.nav_education,
        html! {
            h1 { (strings.heading_education) }
            (education_list(education, strings))
        },
    )
}

/// Standalone print document for the PDF export; styles are inline because
/// the converter doesn't fetch stylesheets.
pub fn cv_document(content: &ResolvedContent) -> Markup {
    let strings = UiStrings::for_language(content.language);
    let name = content
        .about
        .as_ref()
        .map(|a| a.name.as_str())
        .unwrap_or_default();

    html! {
        (DOCTYPE)
        html lang=(content.language.code()) {
            head {
                meta charset="utf-8";
                title { (name) " – CV" }
                style {
                    "body{font-family:Helvetica,Arial,sans-serif;font-size:11pt;margin:0 1cm;color:#222}"
                    "h1{margin-bottom:0}h2{border-bottom:1px solid #999;margin-top:1.2em}"
                    "h3{margin:.6em 0 .1em;font-size:11.5pt}.period{color:#666;margin:0}"
                    "ol,ul{padding-left:1.2em}.timeline{list-style:none;padding:0}"
                }
            }
            body {
                @if let Some(about) = &content.about {
                    h1 { (about.name) }
                    @if let Some(headline) = &about.headline { p { (headline) } }
                    p.contact {
                        @if let Some(email) = &about.email { (email) }
                        @if let Some(location) = &about.location { " · " (location) }
                    }
                    @for paragraph in &about.summary { p { (paragraph) } }
                }
                @if !content.experience.is_empty() {
                    h2 { (strings.heading_experience) }
                    (experience_list(&content.experience, strings))
                }
                @if !content.education.is_empty() {
                    h2 { (strings.heading_education) }
                    (education_list(&content.education, strings))
                }
                @if !content.publications.is_empty() {
                    h2 { (strings.heading_publications) }
                    (publication_list(&content.publications))
                }
                @if !content.projects.is_empty() {
                    h2 { (strings.heading_projects) }
                    ul {
                        @for project in &content.projects {
                            li {
                                strong { (project.title) }
                                @if let Some(description) = &project.description { ": " (description) }
                            }
                        }
                    }
                }
            }
        }
    }
}

pub fn blog_list(chrome: &Chrome, posts: &[Page]) -> Markup {
    let strings = chrome.strings();
    layout::page(
        chrome,
        strings.blog_title,
        html! {
            h1 { (strings.blog_title) }
            @if posts.is_empty() {
                p { (strings.blog_empty) }
            } @else {
                (post_list(chrome, posts))
            }
        },
    )
}

pub fn blog_post(chrome: &Chrome, post: &Page) -> Markup {
    let strings = chrome.strings();
    layout::page(
        chrome,
        &post.title,
        html! {
            article.post {
                h1 { (post.title) }
                @if let Some(date) = post.published() {
                    p.meta { time datetime=(date.format(DATE_FORMAT).to_string()) { (date.format(DATE_FORMAT).to_string()) } }
                }
                @if !post.tags.is_empty() {
                    ul.tags { @for tag in &post.tags { li { (tag) } } }
                }
                div.content { (PreEscaped(&post.html)) }
            }
            a href=(chrome.link("blog/")) { (strings.blog_back) }
        },
    )
}

pub fn not_found(language: Language) -> Markup {
    let chrome = Chrome::bare(language);
    let strings = chrome.strings();
    layout::page(
        &chrome,
        strings.not_found_title,
        html! {
            h1 { (strings.not_found_title) }
            p { (strings.not_found_body) }
            a href=(chrome.home()) { (strings.back_home) }
        },
    )
}

pub fn server_error(language: Language) -> Markup {
    let chrome = Chrome::bare(language);
    let strings = chrome.strings();
    layout::page(
        &chrome,
        strings.server_error_title,
        html! {
            h1 { (strings.server_error_title) }
            p { (strings.server_error_body) }
            a href=(chrome.home()) { (strings.back_home) }
        },
    )
}
