//! Tag grouping and tag page naming.
//!
//! [`TagIndex`] maps every tag seen on any page to the pages carrying it,
//! newest first. It borrows from the page list and is rebuilt on every run.
//!
//! ## Tag filenames
//!
//! Tags become filename stems under the tags directory. Characters that are
//! unsafe in filenames on common platforms (`/ \ : * ? " < > | % #` and ASCII
//! controls) are percent-encoded; everything else, including non-ASCII text,
//! is kept as is:
//!
//! ```text
//! investing    → investing.html
//! c/c++        → c%2Fc++.html
//! 投資          → 投資.html
//! ```
//!
//! Encoding `%` itself keeps the mapping one-to-one. For links, the filename
//! is encoded once more so that a literal `%` in it survives URL decoding.

use crate::config::SiteConfig;
use crate::page::{Page, encode_url_path};
use percent_encoding::percent_encode_byte;
use std::collections::BTreeMap;

/// Tag → pages, tags in string order, pages newest first.
#[derive(Debug, Default)]
pub struct TagIndex<'a> {
    tags: BTreeMap<&'a str, Vec<&'a Page>>,
}

impl<'a> TagIndex<'a> {
    /// Group `pages` by tag.
    ///
    /// A page is listed once per tag even if its metadata repeats the tag.
    /// Each group is stable-sorted by date descending, so pages with equal
    /// dates keep their order from `pages`.
    pub fn build(pages: &'a [Page]) -> Self {
        let mut tags: BTreeMap<&'a str, Vec<&'a Page>> = BTreeMap::new();
        for page in pages {
            for (i, tag) in page.tags.iter().enumerate() {
                if page.tags[..i].contains(tag) {
                    continue;
                }
                tags.entry(tag.as_str()).or_default().push(page);
            }
        }
        for group in tags.values_mut() {
            group.sort_by(|a, b| b.date.cmp(&a.date));
        }
        Self { tags }
    }

    pub fn get(&self, tag: &str) -> Option<&[&'a Page]> {
        self.tags.get(tag).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &[&'a Page])> {
        self.tags.iter().map(|(tag, pages)| (*tag, pages.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

fn unsafe_in_filename(c: char) -> bool {
    c.is_ascii_control() || matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '%' | '#')
}

/// Filename (with `.html`) of a tag's page inside the tags directory.
pub fn tag_file_name(tag: &str) -> String {
    let mut stem = String::with_capacity(tag.len());
    for c in tag.chars() {
        if c.is_ascii() && unsafe_in_filename(c) {
            stem.push_str(percent_encode_byte(c as u8));
        } else {
            stem.push(c);
        }
    }
    format!("{stem}.html")
}

/// Site-relative URL path of a tag page, without a leading slash.
pub fn tag_url_path(config: &SiteConfig, tag: &str) -> String {
    encode_url_path(&format!("{}/{}", config.tags_url_prefix(), tag_file_name(tag)))
}

/// Root-relative link to a tag page, as used in `href`s.
pub fn tag_href(config: &SiteConfig, tag: &str) -> String {
    format!("/{}", tag_url_path(config, tag))
}

/// Absolute URL of a tag page.
pub fn tag_url(config: &SiteConfig, tag: &str) -> String {
    format!("{}/{}", config.base_url, tag_url_path(config, tag))
}
