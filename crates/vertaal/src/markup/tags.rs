//! Static tag classification.
//!
//! Two fixed sets drive the markup pipeline: *opaque* tags, whose text
//! content must never be translated, and *void* tags, which never emit a
//! closing token in reconstructed output. Tag names are compared lower-cased
//! and trimmed.

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Tags whose text content is never translated.
static OPAQUE_TAGS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "script", "style", "head", "title", "meta", "link", "noscript", "template",
    ])
});

/// Tags with no closing counterpart in serialized output.
static VOID_TAGS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
        "source", "track", "wbr",
    ])
});

/// Normalize a tag name for classification: trimmed and lower-cased.
pub fn normalize_tag_name(name: &str) -> String {
    name.trim().to_ascii_lowercase()
}

/// Whether text inside this tag must be passed through untranslated.
pub fn is_opaque(name: &str) -> bool {
    OPAQUE_TAGS.contains(normalize_tag_name(name).as_str())
}

/// Whether this tag never receives a closing token.
pub fn is_void(name: &str) -> bool {
    VOID_TAGS.contains(normalize_tag_name(name).as_str())
}
