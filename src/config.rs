//! Site configuration module.
//!
//! Handles loading and validating `config.toml`. Stock defaults are the base
//! layer; a user file in the project root overrides any subset of keys.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! base_url = "https://example.com"  # Absolute, no trailing slash
//! site_title = "Articles"           # Index heading and <title>
//! lang = "en"                       # <html lang> attribute
//!
//! content_dir = "pages"             # Content root, also the URL prefix of every page
//! content_extension = "html"        # Files scanned (case-insensitive)
//!
//! output_dir = "."                  # Where generated documents go
//! index_file = "index.html"
//! sitemap_file = "sitemap.xml"
//! tags_dir = "tags"
//!
//! [table]
//! rows = "pages.csv"                # CSV with at least `slug` and `title`
//! template = "template.html"        # {{column}} placeholders
//! ```
//!
//! All paths are relative to the project root (the `--root` CLI flag).
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_FILE: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config.toml: {0}")]
    Io(#[from] io::Error),
    #[error("invalid config.toml: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("cannot encode stock settings: {0}")]
    Stock(#[from] toml::ser::Error),
    #[error("invalid setting: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// Built once per run and passed by reference into every stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Absolute site URL used for sitemap entries.
    pub base_url: String,
    pub site_title: String,
    pub lang: String,
    /// Content root, relative to the project root.
    pub content_dir: String,
    /// Extension (without the dot) of files treated as pages.
    pub content_extension: String,
    pub output_dir: String,
    pub index_file: String,
    pub sitemap_file: String,
    /// Tag pages directory, relative to `output_dir`. Also their URL prefix.
    pub tags_dir: String,
    /// Tabular mode inputs.
    pub table: TableConfig,
    /// Project root all relative paths resolve against. Set by [`load_config`].
    #[serde(skip)]
    pub root: PathBuf,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://example.com".to_string(),
            site_title: "Articles".to_string(),
            lang: "en".to_string(),
            content_dir: "pages".to_string(),
            content_extension: "html".to_string(),
            output_dir: ".".to_string(),
            index_file: "index.html".to_string(),
            sitemap_file: "sitemap.xml".to_string(),
            tags_dir: "tags".to_string(),
            table: TableConfig::default(),
            root: PathBuf::from("."),
        }
    }
}

/// Tabular mode settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TableConfig {
    pub rows: String,
    pub template: String,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            rows: "pages.csv".to_string(),
            template: "template.html".to_string(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::Validation(format!(
                "base_url must be an absolute http(s) URL, got {:?}",
                self.base_url
            )));
        }
        if self.base_url.ends_with('/') {
            return Err(ConfigError::Validation(
                "base_url must not end with a slash".into(),
            ));
        }
        if self.content_extension.trim_start_matches('.').is_empty() {
            return Err(ConfigError::Validation(
                "content_extension must not be empty".into(),
            ));
        }
        if url_segment(&self.tags_dir).is_empty() {
            return Err(ConfigError::Validation("tags_dir must not be empty".into()));
        }
        let content = url_segment(&self.content_dir);
        let tags = url_segment(&format!("{}/{}", self.output_dir, self.tags_dir));
        if content == tags || content.starts_with(&format!("{tags}/")) {
            return Err(ConfigError::Validation(format!(
                "content_dir {:?} must not be inside the tags directory {:?}",
                self.content_dir, tags
            )));
        }
        if self.index_file.is_empty() || self.sitemap_file.is_empty() {
            return Err(ConfigError::Validation(
                "index_file and sitemap_file must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Absolute-or-root-relative path of the content root.
    pub fn content_root(&self) -> PathBuf {
        self.root.join(&self.content_dir)
    }

    pub fn output_root(&self) -> PathBuf {
        self.root.join(&self.output_dir)
    }

    pub fn tags_root(&self) -> PathBuf {
        self.output_root().join(&self.tags_dir)
    }

    /// `content_dir` as it appears in URLs: forward slashes, no `./`, no
    /// leading or trailing slash. Empty when the content root is the project root.
    pub fn content_url_prefix(&self) -> String {
        url_segment(&self.content_dir)
    }

    /// `tags_dir` as it appears in URLs.
    pub fn tags_url_prefix(&self) -> String {
        url_segment(&self.tags_dir)
    }

    /// Lowercased extension suffix matched against file names, e.g. `.html`.
    pub fn extension_suffix(&self) -> String {
        format!(
            ".{}",
            self.content_extension.trim_start_matches('.').to_lowercase()
        )
    }
}

/// Normalize a configured directory into a URL path segment.
fn url_segment(dir: &str) -> String {
    dir.replace('\\', "/")
        .split('/')
        .filter(|part| !part.is_empty() && *part != ".")
        .collect::<Vec<_>>()
        .join("/")
}

// =============================================================================
// Layering: stock values first, then the project's config.toml
// =============================================================================

/// [`SiteConfig::default`] as a TOML table, the bottom layer of every load.
fn stock_layer() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(SiteConfig::default())?)
}

/// Lay `user` over `stock`.
///
/// Keys of a nested table (`[table]`) are taken one at a time, so setting
/// `[table] rows` keeps the stock `template`. Any other value the user gives
/// replaces the stock one outright.
pub fn overlay(stock: toml::Value, user: toml::Value) -> toml::Value {
    match (stock, user) {
        (toml::Value::Table(mut layered), toml::Value::Table(user)) => {
            for (key, value) in user {
                let value = match layered.remove(&key) {
                    Some(stock_value) => overlay(stock_value, value),
                    None => value,
                };
                layered.insert(key, value);
            }
            toml::Value::Table(layered)
        }
        (_, user) => user,
    }
}

/// Parse `root/config.toml`. `None` when the project has no config file.
fn read_user_layer(root: &Path) -> Result<Option<toml::Value>, ConfigError> {
    match fs::read_to_string(root.join(CONFIG_FILE)) {
        Ok(text) => Ok(Some(toml::from_str(&text)?)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// The validated config of the project at `root`.
///
/// Without a `config.toml` every stock value applies. `root` is recorded on
/// the result so later stages resolve paths against it.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let layered = match read_user_layer(root)? {
        Some(user) => overlay(stock_layer()?, user),
        None => stock_layer()?,
    };
    let mut config: SiteConfig = layered.try_into()?;
    config.validate()?;
    config.root = root.to_path_buf();
    Ok(config)
}

/// Documented stock `config.toml`, printed by `gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# Pagesmith Configuration
# =======================
# All options are optional. Values shown are the defaults.
# Paths are relative to the project root (--root).

# Absolute site URL. Used to build sitemap entries. No trailing slash.
base_url = "https://example.com"

# Heading and <title> of the generated index page.
site_title = "Articles"

# Value of the <html lang> attribute on generated pages.
lang = "en"

# Directory scanned (recursively) for pages. Its name is also the first
# segment of every page URL: pages/guide/intro.html → /pages/guide/intro.html
content_dir = "pages"

# Only files ending in this extension are scanned (case-insensitive).
content_extension = "html"

# Root directory for every generated document.
output_dir = "."

# Generated home index, relative to output_dir.
index_file = "index.html"

# Generated sitemap, relative to output_dir.
sitemap_file = "sitemap.xml"

# Directory (under output_dir) holding one page per tag.
tags_dir = "tags"

# ---------------------------------------------------------------------------
# Tabular mode (`pagesmith table`)
# ---------------------------------------------------------------------------
[table]
# CSV file with a header row. Needs at least `slug` and `title` columns.
rows = "pages.csv"

# Template document. Every {{column}} is replaced with the row's value;
# placeholders without a matching column become empty.
template = "template.html"
"##
}
