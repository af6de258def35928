//! The normalized page record.
//!
//! A [`Page`] is built from three inputs: the file's location, its extracted
//! [`Metadata`], and its modification time. Each field is resolved on its own:
//!
//! | Field | Source | Fallback |
//! |-------|--------|----------|
//! | `title` | `title:` (non-empty) | filename stem |
//! | `description` | `description:` | `""` |
//! | `tags` | `tags:` split on commas, trimmed, empties dropped | `[]` |
//! | `category` | `category:` | `""` |
//! | `date` | `date:` verbatim | mtime as local `YYYY-MM-DD` |
//!
//! The URL is never read from metadata. It is always
//! `<content_dir>/<path relative to content root>` with forward slashes, so
//! the same file maps to the same URL on every platform. Characters that
//! would end or corrupt a URL path (space, `#`, `?`, `%`, ...) are
//! percent-encoded; the file on disk keeps its real name:
//!
//! ```text
//! pages/my notes.html   →  /pages/my%20notes.html
//! pages/c#-vs-f#.html   →  /pages/c%23-vs-f%23.html
//! ```

use crate::config::SiteConfig;
use crate::metadata::Metadata;
use chrono::{DateTime, Local};
use percent_encoding::percent_encode_byte;
use serde::Serialize;
use std::path::{Component, Path, PathBuf};
use std::time::SystemTime;

/// One content file and everything derived from it.
#[derive(Debug, Clone, Serialize)]
pub struct Page {
    /// File on disk this page was read from.
    pub source_path: PathBuf,
    /// Path relative to the content root, `/`-separated.
    pub rel_path: String,
    pub title: String,
    pub description: String,
    /// In metadata order. Duplicates are kept.
    pub tags: Vec<String>,
    pub category: String,
    /// `YYYY-MM-DD` by convention, compared as a plain string.
    pub date: String,
    url_path: String,
    url: String,
}

impl Page {
    /// Site-relative URL path without a leading slash, e.g. `pages/crypto/btc.html`.
    ///
    /// Percent-encoded; join [`SiteConfig::content_url_prefix`] and
    /// [`Page::rel_path`] for the on-disk location instead.
    pub fn url_path(&self) -> &str {
        &self.url_path
    }

    /// Absolute URL: base URL + `/` + [`Page::url_path`].
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Build a [`Page`] from a file location and its metadata.
///
/// `rel_path` is the file's path relative to the content root. `modified` is
/// only consulted when the metadata has no `date`; if it is also missing the
/// date is left empty and the page sorts after every dated one.
pub fn build_page(
    source_path: &Path,
    rel_path: &Path,
    meta: &Metadata,
    modified: Option<SystemTime>,
    config: &SiteConfig,
) -> Page {
    let rel = to_url_path(rel_path);
    let prefix = config.content_url_prefix();
    let site_path = if prefix.is_empty() {
        rel.clone()
    } else {
        format!("{prefix}/{rel}")
    };
    let url_path = encode_url_path(&site_path);
    let url = format!("{}/{}", config.base_url, url_path);

    let title = meta
        .get("title")
        .filter(|t| !t.is_empty())
        .cloned()
        .unwrap_or_else(|| file_stem(rel_path));

    let date = match meta.get("date") {
        Some(date) => date.clone(),
        None => modified.map(format_date).unwrap_or_default(),
    };

    Page {
        source_path: source_path.to_path_buf(),
        rel_path: rel,
        title,
        description: meta.get("description").cloned().unwrap_or_default(),
        tags: meta.get("tags").map(|t| split_tags(t)).unwrap_or_default(),
        category: meta.get("category").cloned().unwrap_or_default(),
        date,
        url_path,
        url,
    }
}

/// Split a `tags:` value on commas, trimming and dropping empty pieces.
pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Format a timestamp as a local calendar date.
pub fn format_date(time: SystemTime) -> String {
    DateTime::<Local>::from(time).format("%Y-%m-%d").to_string()
}

/// Join path components with `/`, whatever the host separator is.
///
/// `Path::components` already splits on `\` where that is a separator
/// (Windows). Elsewhere a backslash is an ordinary filename byte and stays
/// inside its segment.
pub fn to_url_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn unsafe_in_url(c: char) -> bool {
    c.is_ascii_control()
        || matches!(
            c,
            '%' | ' ' | '"' | '<' | '>' | '#' | '?' | '`' | '{' | '}' | '\\' | '^' | '|'
        )
}

/// Percent-encode the ASCII characters of `path` that are not allowed (or
/// not safe) in a URL path. `/` and non-ASCII text are kept.
pub fn encode_url_path(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    for c in path.chars() {
        if c.is_ascii() && unsafe_in_url(c) {
            out.push_str(percent_encode_byte(c as u8));
        } else {
            out.push(c);
        }
    }
    out
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
