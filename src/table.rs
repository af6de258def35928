//! Tabular mode: one document per CSV row.
//!
//! The rows file is CSV with a header line. Each row is rendered by replacing
//! every `{{column}}` placeholder in the template with that row's value and
//! written to `{output_dir}/{slug}.html`. An index linking every row and a
//! sitemap are written alongside.
//!
//! ```text
//! pages.csv                        template.html
//! slug,title,summary               <h1>{{title}}</h1><p>{{summary}}</p>
//! foo,Foo,First one
//! bar,Bar,                    →    foo.html, bar.html, index.html, sitemap.xml
//! ```
//!
//! ## Substitution
//!
//! Values are inserted verbatim. Nothing is HTML-escaped, so a value holding
//! markup ends up as markup; escape it in the CSV if that matters. A
//! placeholder naming a column the row does not have becomes an empty string.
//! Whitespace just inside the braces is ignored (`{{ title }}` works).

use crate::config::SiteConfig;
use crate::generate::{base_document, render_sitemap};
use crate::write;
use log::warn;
use maud::html;
use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TableError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("rows file has no `{0}` column")]
    MissingColumn(&'static str),
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// One CSV row keyed by column name.
pub type Row = BTreeMap<String, String>;

/// What a tabular build produced.
#[derive(Debug)]
pub struct TableReport {
    /// `(slug, title, file written)` per generated document, in row order.
    pub documents: Vec<(String, String, PathBuf)>,
    pub skipped_rows: usize,
    pub index_path: PathBuf,
    pub sitemap_path: PathBuf,
}

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*([^{}]*?)\s*\}\}").expect("valid placeholder regex"));

/// Replace every `{{key}}` in `template` with `row[key]`, or `""` when absent.
pub fn substitute(template: &str, row: &Row) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            row.get(&caps[1]).cloned().unwrap_or_default()
        })
        .into_owned()
}

/// Parse CSV text into rows. Requires a `slug` and a `title` column.
pub fn parse_rows(data: &str) -> Result<Vec<Row>, TableError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(data.as_bytes());
    let headers = reader.headers()?.clone();
    for required in ["slug", "title"] {
        if !headers.iter().any(|h| h == required) {
            return Err(TableError::MissingColumn(required));
        }
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row: Row = headers
            .iter()
            .zip(record.iter())
            .map(|(h, v)| (h.to_string(), v.to_string()))
            .collect();
        rows.push(row);
    }
    Ok(rows)
}

/// Run tabular mode with the rows and template named in `config.table`.
pub fn generate_table(config: &SiteConfig) -> Result<TableReport, TableError> {
    let rows_path = config.root.join(&config.table.rows);
    let template_path = config.root.join(&config.table.template);
    let data = read(&rows_path)?;
    let template = read(&template_path)?;
    let rows = parse_rows(&data)?;

    let output_root = config.output_root();
    let mut documents = Vec::with_capacity(rows.len());
    let mut skipped_rows = 0;

    for (i, row) in rows.iter().enumerate() {
        let slug = row.get("slug").map(|s| s.trim()).unwrap_or_default();
        if slug.is_empty() {
            // Header is line 1, so data row i sits on line i + 2.
            warn!("Skipping row on line {}: empty slug", i + 2);
            skipped_rows += 1;
            continue;
        }
        let path = output_root.join(format!("{slug}.html"));
        write::write_document(&path, &substitute(&template, row)).map_err(write_error(&path))?;
        let title = row.get("title").cloned().unwrap_or_default();
        documents.push((slug.to_string(), title, path));
    }

    let index_path = output_root.join(&config.index_file);
    let index = render_table_index(&documents, config);
    write::write_document(&index_path, &index).map_err(write_error(&index_path))?;

    let sitemap_path = output_root.join(&config.sitemap_file);
    let sitemap = render_sitemap(&table_sitemap_locs(&documents, config));
    write::write_document(&sitemap_path, &sitemap).map_err(write_error(&sitemap_path))?;

    Ok(TableReport {
        documents,
        skipped_rows,
        index_path,
        sitemap_path,
    })
}

fn read(path: &Path) -> Result<String, TableError> {
    fs::read_to_string(path).map_err(|source| TableError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn write_error(path: &Path) -> impl FnOnce(io::Error) -> TableError + '_ {
    move |source| TableError::Write {
        path: path.to_path_buf(),
        source,
    }
}

/// Index page linking every generated row document.
fn render_table_index(documents: &[(String, String, PathBuf)], config: &SiteConfig) -> String {
    let content = html! {
        h1 { (config.site_title) }
        ul {
            @for (slug, title, _) in documents {
                li { a href={ "/" (slug) ".html" } { (title) } }
            }
        }
    };
    base_document(&config.site_title, &config.lang, content).into_string()
}

/// Sitemap entries for tabular mode: `index.html`, then one per row.
fn table_sitemap_locs(documents: &[(String, String, PathBuf)], config: &SiteConfig) -> Vec<String> {
    let mut locs = vec![format!("{}/{}", config.base_url, config.index_file)];
    locs.extend(
        documents
            .iter()
            .map(|(slug, _, _)| format!("{}/{}.html", config.base_url, slug)),
    );
    locs
}
