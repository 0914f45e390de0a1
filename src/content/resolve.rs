//! Translation Resolver
//!
//! Flattens [`ContentItem`]s into plain records for one language. Fields are
//! layered: shared fields first, then the default-language overlay, then the
//! requested-language overlay. A field missing from the requested overlay
//! therefore shows the default-language text instead of disappearing.

use serde_json::Value;

use super::{ContentItem, Record};
use crate::i18n::Language;

/// Resolve a single item for `language`.
pub fn resolve_item(item: &ContentItem, language: Language) -> Record {
    let mut record = item.shared.clone();
    record.insert("id".to_string(), Value::String(item.id.clone()));

    if let Some(default_overlay) = item.overlays.get(&Language::DEFAULT) {
        merge(&mut record, default_overlay);
    }
    if !language.is_default() {
        if let Some(overlay) = item.overlays.get(&language) {
            merge(&mut record, overlay);
        }
    }

    record
}

/// Resolve a whole list, preserving order.
pub fn resolve_items(items: &[ContentItem], language: Language) -> Vec<Record> {
    items
        .iter()
        .map(|item| resolve_item(item, language))
        .collect()
}

/// Resolve using a raw language code; unsupported codes resolve to the
/// default language.
pub fn resolve_items_for_code(items: &[ContentItem], code: &str) -> Vec<Record> {
    resolve_items(items, Language::from_code(code).unwrap_or_default())
}

fn merge(record: &mut Record, overlay: &Record) {
    for (key, value) in overlay {
        record.insert(key.clone(), value.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    fn project() -> ContentItem {
        ContentItem::new(
            "site",
            record(json!({ "image": "site.png", "url": "https://example.com", "year": 2023 })),
        )
        .with_overlay(
            Language::En,
            record(json!({ "title": "Portfolio", "description": "My site" })),
        )
    }

    #[test]
    fn test_requested_overlay_wins() {
        let item = project().with_overlay(
            Language::Es,
            record(json!({ "title": "Portafolio", "description": "Mi sitio" })),
        );

        let resolved = resolve_item(&item, Language::Es);
        assert_eq!(resolved["title"], json!("Portafolio"));
        assert_eq!(resolved["description"], json!("Mi sitio"));
    }

    #[test]
    fn test_missing_overlay_falls_back_to_default_and_keeps_shared_fields() {
        let item = project();

        let resolved = resolve_item(&item, Language::Es);
        assert_eq!(resolved["title"], json!("Portfolio"));
        assert_eq!(resolved["description"], json!("My site"));
        assert_eq!(resolved["image"], json!("site.png"));
        assert_eq!(resolved["url"], json!("https://example.com"));
        assert_eq!(resolved["year"], json!(2023));
        assert_eq!(resolved["id"], json!("site"));
    }

    #[test]
    fn test_partial_overlay_falls_back_per_field() {
        let item = project().with_overlay(Language::Es, record(json!({ "title": "Portafolio" })));

        let resolved = resolve_item(&item, Language::Es);
        assert_eq!(resolved["title"], json!("Portafolio"));
        assert_eq!(resolved["description"], json!("My site"));
    }

    #[test]
    fn test_every_language_sees_every_default_field() {
        let item = project().with_overlay(Language::Es, record(json!({ "title": "Portafolio" })));
        let default_keys: Vec<&String> = item.overlays[&Language::DEFAULT].keys().collect();

        for language in Language::ALL {
            let resolved = resolve_item(&item, language);
            for key in &default_keys {
                assert!(resolved.contains_key(*key), "{language} lost {key}");
            }
        }
    }

    #[test]
    fn test_default_language_ignores_other_overlays() {
        let item = project().with_overlay(Language::Es, record(json!({ "title": "Portafolio" })));
        let resolved = resolve_item(&item, Language::En);
        assert_eq!(resolved["title"], json!("Portfolio"));
    }

    #[test]
    fn test_unsupported_code_resolves_to_default() {
        let items = vec![project().with_overlay(Language::Es, record(json!({ "title": "Portafolio" })))];
        let resolved = resolve_items_for_code(&items, "de");
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0]["title"], json!("Portfolio"));
    }

    #[test]
    fn test_resolve_items_preserves_order() {
        let items = vec![
            ContentItem::new("b", Record::new()).with_overlay(Language::En, Record::new()),
            ContentItem::new("a", Record::new()).with_overlay(Language::En, Record::new()),
        ];
        let resolved = resolve_items(&items, Language::Es);
        assert_eq!(resolved[0]["id"], json!("b"));
        assert_eq!(resolved[1]["id"], json!("a"));
    }
}
