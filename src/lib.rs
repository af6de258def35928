//! # Pagesmith
//!
//! A build-time aggregator for hand-written HTML pages. Each page may carry a
//! small metadata comment; from those comments Pagesmith regenerates a home
//! index, one listing page per tag, and a sitemap.
//!
//! # Architecture: Scan, Then Render
//!
//! ```text
//! 1. Scan      pages/     →  Vec<Page>        (files + metadata → sorted page model)
//! 2. Group     Vec<Page>  →  TagIndex         (tag → pages, newest first)
//! 3. Render    pages+tags →  documents        (index, tag pages, sitemap)
//! 4. Write     documents  →  output dir       (overwrite, create parents)
//! ```
//!
//! Every run rebuilds the whole model from scratch. Renderers are pure
//! functions over the page model, so the only non-deterministic byte in the
//! output is the "last updated" stamp in the index footer.
//!
//! A second, simpler path ([`table`]) turns a CSV file and a `{{key}}`
//! template into one document per row, plus its own index and sitemap.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `config.toml` loading, merging over stock defaults, validation |
//! | [`metadata`] | Extracts the `<!-- META ... -->` block into a key/value map |
//! | [`page`] | The [`page::Page`] record and its defaulting rules |
//! | [`scan`] | Walks the content root and produces the sorted page list |
//! | [`tags`] | Groups pages by tag; tag filename and URL encoding |
//! | [`generate`] | Index, tag and sitemap renderers plus the build pipeline |
//! | [`write`] | Overwrites output documents, creating parent directories |
//! | [`table`] | CSV + template mode |
//! | [`output`] | CLI output formatting |
//!
//! # Metadata Format
//!
//! ```html
//! <!-- META
//! title: Comparing index funds
//! description: Fees, tracking error and tax drag
//! tags: investing, funds
//! category: money
//! date: 2024-05-01
//! -->
//! ```
//!
//! Every field is optional. The title falls back to the filename stem and the
//! date to the file's modification day. Dates are compared as strings, so
//! anything other than `YYYY-MM-DD` still sorts, just lexicographically.

pub mod config;
pub mod generate;
pub mod metadata;
pub mod output;
pub mod page;
pub mod scan;
pub mod table;
pub mod tags;
pub mod write;

#[cfg(test)]
pub(crate) mod test_helpers;
