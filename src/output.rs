//! CLI output formatting.
//!
//! Every entity is shown by what it is (index + title) first, with the file it
//! came from or went to as indented context:
//!
//! ```text
//! Pages
//!     001 Comparing index funds (2024-05-01)
//!         Source: pages/index-funds.html
//!         Tags: investing / funds
//!     002 btc
//!         Source: pages/crypto/btc.html
//!
//! Tags
//!     001 funds (1 page) → tags/funds.html
//!     002 investing (1 page) → tags/investing.html
//!
//! Home → index.html
//! Sitemap → sitemap.xml (5 entries)
//!
//! Generated index, 2 tag pages, sitemap for 2 pages
//! ```
//!
//! Each `format_*` function is pure and returns lines for testability; the
//! `print_*` wrappers write them to stdout.

use crate::generate::BuildReport;
use crate::page::Page;
use crate::table::TableReport;
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

/// Show `path` relative to `base` when possible.
fn display_path(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .to_string_lossy()
        .into_owned()
}

// ============================================================================
// Page inventory
// ============================================================================

/// Format the scanned page list (shared by `check` and `build`).
pub fn format_pages(pages: &[Page], content_url_prefix: &str) -> Vec<String> {
    let mut lines = vec!["Pages".to_string()];
    for (i, page) in pages.iter().enumerate() {
        let header = if page.date.is_empty() {
            format!("    {} {}", format_index(i + 1), page.title)
        } else {
            format!("    {} {} ({})", format_index(i + 1), page.title, page.date)
        };
        lines.push(header);
        let source = if content_url_prefix.is_empty() {
            page.rel_path.clone()
        } else {
            format!("{}/{}", content_url_prefix, page.rel_path)
        };
        lines.push(format!("        Source: {}", source));
        if !page.tags.is_empty() {
            lines.push(format!("        Tags: {}", page.tags.join(" / ")));
        }
    }
    lines
}

pub fn print_pages(pages: &[Page], content_url_prefix: &str) {
    for line in format_pages(pages, content_url_prefix) {
        println!("{}", line);
    }
}

// ============================================================================
// Build
// ============================================================================

/// Format the result of a full build.
pub fn format_build_output(report: &BuildReport, output_root: &Path) -> Vec<String> {
    let mut lines = Vec::new();

    if !report.tag_pages.is_empty() {
        lines.push("Tags".to_string());
        for (i, (tag, count, path)) in report.tag_pages.iter().enumerate() {
            lines.push(format!(
                "    {} {} ({}) \u{2192} {}",
                format_index(i + 1),
                tag,
                plural(*count, "page"),
                display_path(path, output_root)
            ));
        }
        lines.push(String::new());
    }

    lines.push(format!(
        "Home \u{2192} {}",
        display_path(&report.index_path, output_root)
    ));
    let entries = match report.sitemap_entries {
        1 => "1 entry".to_string(),
        n => format!("{n} entries"),
    };
    lines.push(format!(
        "Sitemap \u{2192} {} ({})",
        display_path(&report.sitemap_path, output_root),
        entries
    ));
    if report.copied > 0 {
        lines.push(format!(
            "Copied {} into the output tree",
            plural(report.copied, "page")
        ));
    }
    lines.push(String::new());
    lines.push(format!(
        "Generated index, {}, sitemap for {}",
        plural(report.tag_pages.len(), "tag page"),
        plural(report.pages.len(), "page")
    ));
    lines
}

pub fn print_build_output(report: &BuildReport, output_root: &Path) {
    for line in format_build_output(report, output_root) {
        println!("{}", line);
    }
}

// ============================================================================
// Table mode
// ============================================================================

/// Format the result of a tabular build.
pub fn format_table_output(report: &TableReport, output_root: &Path) -> Vec<String> {
    let mut lines = vec!["Rows".to_string()];
    for (i, (_, title, path)) in report.documents.iter().enumerate() {
        lines.push(format!(
            "    {} {} \u{2192} {}",
            format_index(i + 1),
            title,
            display_path(path, output_root)
        ));
    }
    if report.skipped_rows > 0 {
        lines.push(format!(
            "    skipped {} without a slug",
            plural(report.skipped_rows, "row")
        ));
    }
    lines.push(String::new());
    lines.push(format!(
        "Home \u{2192} {}",
        display_path(&report.index_path, output_root)
    ));
    lines.push(format!(
        "Sitemap \u{2192} {}",
        display_path(&report.sitemap_path, output_root)
    ));
    lines.push(String::new());
    lines.push(format!("Generated {}", plural(report.documents.len(), "page")));
    lines
}

pub fn print_table_output(report: &TableReport, output_root: &Path) {
    for line in format_table_output(report, output_root) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::page;
    use std::path::PathBuf;

    #[test]
    fn format_index_is_zero_padded() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(1000), "1000");
    }

    #[test]
    fn plural_forms() {
        assert_eq!(plural(1, "page"), "1 page");
        assert_eq!(plural(0, "page"), "0 pages");
        assert_eq!(plural(3, "tag page"), "3 tag pages");
    }

    #[test]
    fn pages_show_title_date_source_and_tags() {
        let pages = vec![page("Alpha", "2024-01-01", &["x", "y"]), page("Beta", "", &[])];
        let lines = format_pages(&pages, "pages");

        assert_eq!(
            lines,
            vec![
                "Pages",
                "    001 Alpha (2024-01-01)",
                "        Source: pages/alpha.html",
                "        Tags: x / y",
                "    002 Beta",
                "        Source: pages/beta.html",
            ]
        );
    }

    fn build_report() -> BuildReport {
        BuildReport {
            pages: vec![page("Alpha", "2024-01-01", &["x"]), page("Beta", "2024-01-02", &[])],
            tag_pages: vec![("x".to_string(), 1, PathBuf::from("/out/tags/x.html"))],
            copied: 0,
            index_path: PathBuf::from("/out/index.html"),
            sitemap_path: PathBuf::from("/out/sitemap.xml"),
            sitemap_entries: 4,
        }
    }

    #[test]
    fn build_output_lists_tags_and_counts() {
        let lines = format_build_output(&build_report(), Path::new("/out"));

        assert_eq!(lines[0], "Tags");
        assert_eq!(lines[1], "    001 x (1 page) \u{2192} tags/x.html");
        assert!(lines.contains(&"Home \u{2192} index.html".to_string()));
        assert!(lines.contains(&"Sitemap \u{2192} sitemap.xml (4 entries)".to_string()));
        assert_eq!(
            lines.last().unwrap(),
            "Generated index, 1 tag page, sitemap for 2 pages"
        );
    }

    #[test]
    fn build_output_reports_copies() {
        let mut report = build_report();
        report.copied = 2;
        let lines = format_build_output(&report, Path::new("/out"));
        assert!(lines.contains(&"Copied 2 pages into the output tree".to_string()));
    }

    #[test]
    fn table_output_lists_rows() {
        let report = TableReport {
            documents: vec![(
                "foo".to_string(),
                "Foo".to_string(),
                PathBuf::from("/out/foo.html"),
            )],
            skipped_rows: 1,
            index_path: PathBuf::from("/out/index.html"),
            sitemap_path: PathBuf::from("/out/sitemap.xml"),
        };
        let lines = format_table_output(&report, Path::new("/out"));

        assert_eq!(lines[1], "    001 Foo \u{2192} foo.html");
        assert_eq!(lines[2], "    skipped 1 row without a slug");
        assert_eq!(lines.last().unwrap(), "Generated 1 page");
    }
}
