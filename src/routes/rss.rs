use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode},
    response::Response,
};
use chrono::NaiveDateTime;

use crate::blog::Page;
use crate::error::AppError;
use crate::i18n::Language;
use crate::session::PageContext;
use crate::state::AppState;

const FEED_LIMIT: usize = 50;

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

fn rfc822(dt: &NaiveDateTime) -> String {
    dt.and_utc().format("%a, %d %b %Y %H:%M:%S +0000").to_string()
}

/// Build the RSS 2.0 document for one language's posts (already sorted).
pub fn render_feed(base_url: &str, site_title: &str, language: Language, posts: &[Page]) -> String {
    let strings = crate::i18n::UiStrings::for_language(language);
    let blog_url = format!("{}/{}/blog/", base_url, language.code());

    let mut items = String::new();
    for post in posts.iter().take(FEED_LIMIT) {
        let post_url = format!("{}{}/", blog_url, post.slug);
        let desc = post.summary.as_deref().unwrap_or("");
        let pub_date = post.published().map(|d| rfc822(&d)).unwrap_or_default();
        items.push_str(&format!(
            "    <item>\n\
                   <title>{}</title>\n\
                   <link>{}</link>\n\
                   <description>{}</description>\n\
                   <pubDate>{}</pubDate>\n\
                   <guid isPermaLink=\"true\">{}</guid>\n\
                 </item>\n",
            escape_xml(&post.title),
            escape_xml(&post_url),
            escape_xml(desc),
            pub_date,
            escape_xml(&post_url),
        ));
    }

    let feed_url = format!("{}rss.xml", blog_url);

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:atom="http://www.w3.org/2005/Atom">
  <channel>
    <title>{}</title>
    <link>{}</link>
    <description>{}</description>
    <language>{}</language>
    <atom:link href="{}" rel="self" type="application/rss+xml"/>
    <lastBuildDate>{}</lastBuildDate>
{}  </channel>
</rss>"#,
        escape_xml(site_title),
        escape_xml(&blog_url),
        escape_xml(strings.blog_feed_description),
        language.code(),
        escape_xml(&feed_url),
        posts
            .first()
            .and_then(Page::published)
            .map(|dt| rfc822(&dt))
            .unwrap_or_default(),
        items,
    )
}

/// GET /{lang}/blog/rss.xml
pub async fn rss_feed(State(state): State<AppState>, ctx: PageContext) -> Result<Response, AppError> {
    let posts = state
        .blog
        .posts(ctx.language)
        .map_err(|e| AppError::blog(e, ctx.language))?;

    let xml = render_feed(&state.site_url, &state.site_title, ctx.language, &posts);

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/rss+xml; charset=utf-8")
        .header(
            header::CACHE_CONTROL,
            "public, max-age=3600, stale-while-revalidate=600",
        )
        .body(Body::from(xml))
        .map_err(|e| ctx.localize(anyhow::Error::from(e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a & b"), "a &amp; b");
        assert_eq!(escape_xml("<title>"), "&lt;title&gt;");
        assert_eq!(escape_xml("\"quote\""), "&quot;quote&quot;");
    }

    #[test]
    fn test_rfc822_format() {
        let dt = chrono::NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        assert_eq!(rfc822(&dt), "Mon, 15 Jan 2024 12:00:00 +0000");
    }

    #[test]
    fn test_render_feed_items() {
        let posts = vec![
            Page::parse("es/nuevo", "---\ntitle: Nuevo & mejor\ndate: 2024-02-01\n---\n"),
            Page::parse("es/roto", "---\ntitle: Roto\ndate: someday\n---\n"),
        ];
        let xml = render_feed("https://example.com", "Ada", Language::Es, &posts);
        assert!(xml.contains("<language>es</language>"));
        assert!(xml.contains("<title>Nuevo &amp; mejor</title>"));
        assert!(xml.contains("<link>https://example.com/es/blog/nuevo/</link>"));
        assert!(xml.contains("<pubDate></pubDate>"));
        assert!(xml.contains("https://example.com/es/blog/rss.xml"));
    }
}
