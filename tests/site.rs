//! End-to-end checks against the content and posts shipped with the site.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceExt;

use portfolio_site::blog::{BlogLoader, LATEST_POSTS};
use portfolio_site::contact::{ContactNotifier, UnconfiguredMailer};
use portfolio_site::content::{ContentStore, ResolvedContent};
use portfolio_site::create_app;
use portfolio_site::i18n::Language;
use portfolio_site::render::{PdfError, PdfRenderer};
use portfolio_site::state::AppState;

struct EchoPdf;

#[async_trait]
impl PdfRenderer for EchoPdf {
    async fn render(&self, html: &str) -> Result<Vec<u8>, PdfError> {
        Ok(html.as_bytes().to_vec())
    }
}

fn repo_path(dir: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(dir)
}

fn shipped_state() -> AppState {
    let content = ContentStore::load(&repo_path("content")).unwrap();
    let blog = BlogLoader::new(repo_path("posts"), false).unwrap();
    let notifier = ContactNotifier::new(Arc::new(UnconfiguredMailer), "", "");
    let mut state = AppState::new(content, blog, notifier, Arc::new(EchoPdf));
    state.static_dir = repo_path("static");
    state
}

async fn fetch(uri: &str) -> (StatusCode, String) {
    let app = create_app(shipped_state(), "integration-secret", false);
    let res = app
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = res.status();
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8_lossy(&bytes).into_owned())
}

#[test]
fn shipped_content_resolves_in_every_language() {
    let store = ContentStore::load(&repo_path("content")).unwrap();
    for language in Language::ALL {
        let content = ResolvedContent::build(&store, language).unwrap();
        assert!(content.about.is_some());
        assert!(!content.experience.is_empty());
        assert!(!content.projects.is_empty());
    }

    let es = ResolvedContent::build(&store, Language::Es).unwrap();
    assert_eq!(es.experience[0].company, "Acme Robotics");
    assert_eq!(es.experience[0].role, "Ingeniero de software sénior");
    // Shared title with no Spanish override
    assert_eq!(es.projects[0].title, "tide");
}

#[test]
fn shipped_posts_are_listed_per_language() {
    let blog = BlogLoader::new(repo_path("posts"), false).unwrap();

    let en = blog.latest(Language::En, LATEST_POSTS).unwrap();
    assert_eq!(en.len(), 2);
    assert_eq!(en[0].slug, "parsing-notes");
    assert_eq!(en[1].slug, "hello-world");

    let es = blog.posts(Language::Es).unwrap();
    assert_eq!(es.len(), 1);
    assert_eq!(es[0].title, "Hola, mundo");
}

#[tokio::test]
async fn index_pages_render() {
    let (status, body) = fetch("/en/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Alex Romero"));
    assert!(body.contains("Notes on incremental parsing"));

    let (status, body) = fetch("/es/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Asistente de investigación"));
    assert!(body.contains("Hola, mundo"));
}

#[tokio::test]
async fn blog_post_renders_markdown_tables() {
    let (status, body) = fetch("/en/blog/parsing-notes/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<table>"));
    assert!(body.contains("<strong>stack</strong>"));

    let (status, _) = fetch("/en/blog/does-not-exist/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn cv_document_is_localized() {
    let (status, body) = fetch("/es/cv/pdf").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<html lang=\"es\">"));
    assert!(body.contains("Máster en Informática"));
}

#[tokio::test]
async fn static_files_are_served() {
    let app = create_app(shipped_state(), "integration-secret", false);
    let res = app
        .oneshot(Request::get("/static/css/site.css").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let content_type = res.headers().get(header::CONTENT_TYPE).unwrap().to_str().unwrap();
    assert!(content_type.starts_with("text/css"));
}

#[tokio::test]
async fn contact_without_mail_server_reports_failure() {
    let app = create_app(shipped_state(), "integration-secret", false);
    let req = Request::post("/en/")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("name=Ada&email=ada%40example.com&message=Hi"))
        .unwrap();
    let res = app.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);

    let cookie = res
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .unwrap()
        .to_string();

    let res = app
        .oneshot(
            Request::get("/en/")
                .header(header::COOKIE, cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let body = String::from_utf8_lossy(&bytes);
    assert!(body.contains("flash-error"));
}
