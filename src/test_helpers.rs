//! Shared test utilities for the pagesmith test suite.
//!
//! Builds content trees in temp directories, pins file modification times,
//! and constructs in-memory pages for renderer tests.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! let path = write_page(tmp.path(), "crypto/btc.html", "<!-- META\ntags: x\n-->");
//! set_mtime_days_ago(&path, 3);
//!
//! let pages = scan(&config_for(tmp.path())).unwrap();
//! assert_eq!(rel_paths(&pages), vec!["crypto/btc.html"]);
//! ```

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

use crate::config::SiteConfig;
use crate::metadata::Metadata;
use crate::page::{Page, build_page};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/site/` to a temp directory and return it.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/site");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Stock config rooted at `root`.
pub fn config_for(root: &Path) -> SiteConfig {
    SiteConfig {
        root: root.to_path_buf(),
        ..SiteConfig::default()
    }
}

/// Write a content file under `root/pages/` and return its path.
pub fn write_page(root: &Path, rel: &str, content: &str) -> PathBuf {
    let path = root.join("pages").join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    path
}

/// Set a file's modification time to `days` days before now and return it.
pub fn set_mtime_days_ago(path: &Path, days: u64) -> SystemTime {
    let time = SystemTime::now() - Duration::from_secs(days * 24 * 60 * 60);
    File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(time)
        .unwrap();
    time
}

// =========================================================================
// In-memory pages
// =========================================================================

/// A page at `pages/<lowercased title>.html` with an explicit date and tags.
pub fn page(title: &str, date: &str, tags: &[&str]) -> Page {
    let mut meta = Metadata::new();
    meta.insert("title".to_string(), title.to_string());
    meta.insert("date".to_string(), date.to_string());
    if !tags.is_empty() {
        meta.insert("tags".to_string(), tags.join(","));
    }
    let rel = format!("{}.html", title.to_lowercase());
    let config = SiteConfig::default();
    build_page(
        &config.content_root().join(&rel),
        Path::new(&rel),
        &meta,
        None,
        &config,
    )
}

// =========================================================================
// Lookups and extractors
// =========================================================================

/// Relative paths in page order.
pub fn rel_paths(pages: &[Page]) -> Vec<&str> {
    pages.iter().map(|p| p.rel_path.as_str()).collect()
}

/// Find a page by title. Panics if not found.
pub fn find_page<'a>(pages: &'a [Page], title: &str) -> &'a Page {
    pages.iter().find(|p| p.title == title).unwrap_or_else(|| {
        let titles: Vec<&str> = pages.iter().map(|p| p.title.as_str()).collect();
        panic!("page '{title}' not found. Available: {titles:?}")
    })
}
