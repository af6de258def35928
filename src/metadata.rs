//! Embedded page metadata extraction.
//!
//! A page describes itself in an HTML comment that opens with the `META`
//! marker (any case) and closes at the first `-->`:
//!
//! ```html
//! <!-- META
//! title: Index funds vs ETFs
//! tags: investing, funds
//! date: 2024-05-01
//! -->
//! ```
//!
//! Each non-empty line of the form `key: value` becomes one entry. Keys are
//! trimmed and lowercased, values are trimmed, and only the first `:` splits,
//! so values may contain colons (`source: https://...`). Lines without a `:`
//! are ignored. When a key repeats, the last line wins.
//!
//! Only the first metadata block in a file is read. A file without one yields
//! an empty map; that is not an error.

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Key/value pairs from a page's metadata block.
pub type Metadata = BTreeMap<String, String>;

static META_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<!--\s*META(.*?)-->").expect("valid metadata regex"));

/// Extract the first metadata block from `text`.
pub fn extract(text: &str) -> Metadata {
    let mut meta = Metadata::new();
    let Some(caps) = META_BLOCK.captures(text) else {
        return meta;
    };

    for line in caps[1].lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        meta.insert(key.trim().to_lowercase(), value.trim().to_string());
    }
    meta
}
