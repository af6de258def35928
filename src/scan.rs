//! Content discovery.
//!
//! Stage 1 of the build. Walks the content root recursively, reads every file
//! ending in the configured extension, and turns each into a [`Page`].
//!
//! ## Directory Structure
//!
//! ```text
//! pages/                       # Content root (content_dir)
//! ├── index-funds.html         # → pages/index-funds.html
//! ├── crypto/
//! │   ├── btc.html             # → pages/crypto/btc.html
//! │   └── eth.HTML             # extension match is case-insensitive
//! └── notes.txt                # ignored
//! ```
//!
//! ## Ordering
//!
//! Files are visited in a fixed order (entries sorted by file name at every
//! level), then the list is stable-sorted by `date`, newest first. Pages with
//! equal dates stay in visit order.
//!
//! ## Generated Output
//!
//! The output tree may overlap the content root (`content_dir = "."` puts
//! `index.html` and `tags/` right next to the pages). Anything a build
//! writes is skipped by the walk, so a rebuild never picks up its own
//! output as content.
//!
//! Symlinks are followed; a link cycle is reported as a walk error and
//! skipped like any other unreadable entry.
//!
//! ## Failure Policy
//!
//! A missing content root is the only hard error, and it is raised before
//! anything is read. Past that point the scan is best-effort: an unreadable
//! file becomes a page with no metadata, invalid UTF-8 is replaced, and walk
//! errors on individual entries are logged and skipped.

use crate::config::SiteConfig;
use crate::metadata::{self, Metadata};
use crate::page::{Page, build_page};
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("content root not found or not a directory: {0}")]
    MissingContentRoot(PathBuf),
}

/// Scan the content root and return all pages, newest first.
pub fn scan(config: &SiteConfig) -> Result<Vec<Page>, ScanError> {
    let root = config.content_root();
    if !root.is_dir() {
        return Err(ScanError::MissingContentRoot(root));
    }

    let skip = generated_paths(config, &root);
    let mut pages: Vec<Page> = collect_files(&root, &config.extension_suffix(), &skip)
        .into_iter()
        .map(|path| read_page(&root, &path, config))
        .collect();

    sort_pages(&mut pages);
    Ok(pages)
}

/// Stable sort by date, newest first.
pub fn sort_pages(pages: &mut [Page]) {
    pages.sort_by(|a, b| b.date.cmp(&a.date));
}

/// Paths a build writes that fall inside the content root.
///
/// Page copies land in `output_root/<content_dir>`, which is the content
/// root itself in the default layout and is only skipped when it is not.
fn generated_paths(config: &SiteConfig, content_root: &Path) -> Vec<PathBuf> {
    let output_root = config.output_root();
    let mut paths = vec![
        output_root.join(&config.index_file),
        output_root.join(&config.sitemap_file),
        config.tags_root(),
    ];
    let copy_root = output_root.join(config.content_url_prefix());
    if copy_root != content_root {
        paths.push(copy_root);
    }
    paths.retain(|p| p.starts_with(content_root) && p != content_root);
    paths
}

/// All files under `root` whose name ends with `suffix` (case-insensitive),
/// in deterministic walk order, leaving out anything under `skip`.
fn collect_files(root: &Path, suffix: &str, skip: &[PathBuf]) -> Vec<PathBuf> {
    WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !skip.iter().any(|s| entry.path().starts_with(s)))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping unreadable entry: {e}");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .file_name()
                .to_string_lossy()
                .to_lowercase()
                .ends_with(suffix)
        })
        .map(|entry| entry.into_path())
        .collect()
}

fn read_page(root: &Path, path: &Path, config: &SiteConfig) -> Page {
    debug!("Reading {}", path.display());
    let meta = read_metadata(path);
    let modified = fs::metadata(path).and_then(|m| m.modified()).ok();
    if modified.is_none() && !meta.contains_key("date") {
        warn!("No date for {}: modification time unavailable", path.display());
    }
    // Walk entries always live under the root they were walked from.
    let rel = path.strip_prefix(root).unwrap_or(path);
    build_page(path, rel, &meta, modified, config)
}

fn read_metadata(path: &Path) -> Metadata {
    match fs::read(path) {
        Ok(bytes) => metadata::extract(&String::from_utf8_lossy(&bytes)),
        Err(e) => {
            warn!("Could not read {}: {e}", path.display());
            Metadata::new()
        }
    }
}
