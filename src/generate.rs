//! Site generation.
//!
//! Takes the scanned page list and produces every derived document. The
//! renderers are pure functions of the page model; [`generate`] wires them
//! to the scanner and the writer.
//!
//! ## Generated Documents
//!
//! - **Page copies** (`/{content_dir}/...`): each source page at its URL path.
//!   Skipped when the output tree already contains the source file.
//! - **Index** (`/index.html`): every page, newest first, with date and tag links.
//! - **Tag pages** (`/tags/{tag}.html`): one per distinct tag.
//! - **Sitemap** (`/sitemap.xml`): root, then pages, then tag pages.
//!
//! ## Output Structure
//!
//! ```text
//! ./                          # output_dir (default: project root)
//! ├── index.html
//! ├── sitemap.xml
//! ├── pages/                  # content_dir, untouched when it is the source
//! │   └── crypto/btc.html
//! └── tags/
//!     ├── crypto.html
//!     └── investing.html
//! ```
//!
//! ## Determinism
//!
//! Running the build twice over unchanged input produces identical bytes in
//! every file except the `Last updated` stamp in the index footer. Tag pages
//! and sitemap tag entries follow tag string order, not directory listing
//! order, and only tags seen in the current run are listed.

use crate::config::SiteConfig;
use crate::page::Page;
use crate::scan::{self, ScanError};
use crate::tags::{self, TagIndex};
use crate::write;
use chrono::{DateTime, Utc};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

const CSS: &str = include_str!("../static/style.css");

pub const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// What a build produced, for the CLI summary.
#[derive(Debug)]
pub struct BuildReport {
    /// All pages, newest first.
    pub pages: Vec<Page>,
    /// Each generated tag page: tag, page count, file written.
    pub tag_pages: Vec<(String, usize, PathBuf)>,
    /// Source pages copied into the output tree.
    pub copied: usize,
    pub index_path: PathBuf,
    pub sitemap_path: PathBuf,
    pub sitemap_entries: usize,
}

/// Run the full build, stamping the index with the current time.
pub fn generate(config: &SiteConfig) -> Result<BuildReport, GenerateError> {
    generate_at(config, Utc::now())
}

/// Run the full build with an explicit index timestamp.
///
/// The scan runs first, so a missing content root aborts before any write.
pub fn generate_at(
    config: &SiteConfig,
    generated_at: DateTime<Utc>,
) -> Result<BuildReport, GenerateError> {
    let pages = scan::scan(config)?;
    let output_root = config.output_root();

    let mut copied = 0;
    let copy_root = output_root.join(config.content_url_prefix());
    for page in &pages {
        let dst = copy_root.join(&page.rel_path);
        if write::copy_document(&page.source_path, &dst).map_err(write_error(&dst))? {
            copied += 1;
        }
    }

    let index_path = output_root.join(&config.index_file);
    let index_html = render_index(&pages, config, generated_at);
    write::write_document(&index_path, &index_html.into_string())
        .map_err(write_error(&index_path))?;

    let tag_index = TagIndex::build(&pages);
    let tags_root = config.tags_root();
    std::fs::create_dir_all(&tags_root).map_err(write_error(&tags_root))?;

    let mut tag_pages = Vec::with_capacity(tag_index.len());
    for (tag, tagged) in tag_index.iter() {
        let path = tags_root.join(tags::tag_file_name(tag));
        let html = render_tag_page(tag, tagged, config);
        write::write_document(&path, &html.into_string()).map_err(write_error(&path))?;
        tag_pages.push((tag.to_string(), tagged.len(), path));
    }

    let sitemap_path = output_root.join(&config.sitemap_file);
    let locs = sitemap_locs(&pages, &tag_index, config);
    write::write_document(&sitemap_path, &render_sitemap(&locs))
        .map_err(write_error(&sitemap_path))?;

    Ok(BuildReport {
        pages,
        tag_pages,
        copied,
        index_path,
        sitemap_path,
        sitemap_entries: locs.len(),
    })
}

fn write_error(path: &Path) -> impl FnOnce(io::Error) -> GenerateError + '_ {
    move |source| GenerateError::Write {
        path: path.to_path_buf(),
        source,
    }
}

/// Human-readable UTC stamp used in the index footer.
pub fn format_timestamp(time: DateTime<Utc>) -> String {
    time.format("%Y-%m-%d %H:%M UTC").to_string()
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
pub(crate) fn base_document(title: &str, lang: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(lang) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                style { (PreEscaped(CSS)) }
            }
            body {
                (content)
            }
        }
    }
}

/// Tag links joined with ` / `, in the page's own tag order.
fn tag_links(tags: &[String], config: &SiteConfig) -> Markup {
    html! {
        @for (i, tag) in tags.iter().enumerate() {
            @if i > 0 { " / " }
            a href=(tags::tag_href(config, tag)) { (tag) }
        }
    }
}

// ============================================================================
// Renderers
// ============================================================================

/// Renders the home index: every page in the given order.
pub fn render_index(pages: &[Page], config: &SiteConfig, generated_at: DateTime<Utc>) -> Markup {
    let content = html! {
        h1 { (config.site_title) }
        @for page in pages {
            article.post {
                h2 { a href={ "/" (page.url_path()) } { (page.title) } }
                @if !page.description.is_empty() {
                    p.summary { (page.description) }
                }
                div.meta {
                    span.date { (page.date) }
                    @if !page.tags.is_empty() {
                        div.tags { (tag_links(&page.tags, config)) }
                    }
                }
            }
        }
        footer { "Last updated: " (format_timestamp(generated_at)) }
    };

    base_document(&config.site_title, &config.lang, content)
}

/// Renders the listing page for one tag. `pages` is expected newest first.
pub fn render_tag_page(tag: &str, pages: &[&Page], config: &SiteConfig) -> Markup {
    let heading = format!("Tag: {tag}");
    let content = html! {
        h1 { (heading) }
        ul.tag-list {
            @for page in pages {
                li {
                    a href={ "/" (page.url_path()) } { (page.title) }
                    " "
                    span.date { (page.date) }
                }
            }
        }
        p { a href="/" { "\u{2190} Back to index" } }
    };

    base_document(
        &format!("{heading} \u{2013} {}", config.site_title),
        &config.lang,
        content,
    )
}

/// Sitemap entries: site root, each page in order, each tag page.
pub fn sitemap_locs(pages: &[Page], tag_index: &TagIndex, config: &SiteConfig) -> Vec<String> {
    let mut locs = Vec::with_capacity(1 + pages.len() + tag_index.len());
    locs.push(format!("{}/", config.base_url));
    locs.extend(pages.iter().map(|p| p.url().to_string()));
    locs.extend(tag_index.iter().map(|(tag, _)| tags::tag_url(config, tag)));
    locs
}

/// Renders a `urlset` sitemap with one `<url><loc>` per entry.
pub fn render_sitemap(locs: &[String]) -> String {
    let xml = html! {
        (PreEscaped(r#"<?xml version="1.0" encoding="UTF-8"?>"#)) "\n"
        urlset xmlns=(SITEMAP_NS) {
            @for entry in locs {
                "\n  "
                url { loc { (entry) } }
            }
            "\n"
        }
        "\n"
    };
    xml.into_string()
}

// ============================================================================
// Tests
// ============================================================================
