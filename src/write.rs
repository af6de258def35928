//! Output materialization.
//!
//! Every generated document is written with a plain overwrite: no merge, no
//! backup, no temp-file rename. Parent directories are created as needed. A
//! failure halfway through can leave a truncated file behind; rerunning the
//! build rewrites it.

use log::info;
use std::fs;
use std::io;
use std::path::Path;

/// Overwrite `path` with `content`, creating missing parent directories.
pub fn write_document(path: &Path, content: &str) -> io::Result<()> {
    ensure_parent(path)?;
    fs::write(path, content)?;
    info!("Updated {}", path.display());
    Ok(())
}

/// Copy a source document to `dst`, overwriting it.
///
/// Returns `false` without touching anything when `dst` already is `src`
/// (the usual layout, where content lives inside the output tree).
pub fn copy_document(src: &Path, dst: &Path) -> io::Result<bool> {
    if same_file(src, dst) {
        return Ok(false);
    }
    ensure_parent(dst)?;
    fs::copy(src, dst)?;
    info!("Copied {} → {}", src.display(), dst.display());
    Ok(true)
}

fn ensure_parent(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
