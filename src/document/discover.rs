//! Markdown file discovery.

use std::collections::BTreeSet;
use std::io;
use std::path::{Path, PathBuf};

/// Default documentation directory searched below the root.
pub const DEFAULT_DOCS_DIR: &str = "docs";

/// Collect `*.md` directly in `root` plus every `*.md` below `root/docs_dir`.
///
/// The result is sorted and free of duplicates. Hidden files and
/// directories are skipped, and a missing docs directory is not an error.
///
/// # Errors
/// Returns an error if `root` or an existing docs directory cannot be read.
pub fn discover_documents(root: &Path, docs_dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut found = BTreeSet::new();
    collect_markdown(root, false, &mut found)?;

    let docs = root.join(docs_dir);
    if docs.is_dir() {
        collect_markdown(&docs, true, &mut found)?;
    }
    Ok(found.into_iter().collect())
}

fn collect_markdown(dir: &Path, recursive: bool, found: &mut BTreeSet<PathBuf>) -> io::Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().to_string();
        if name.starts_with('.') {
            continue;
        }
        let path = entry.path();
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            if recursive {
                collect_markdown(&path, true, found)?;
            }
        } else if is_markdown(&path) {
            found.insert(path);
        }
    }
    Ok(())
}

fn is_markdown(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "md")
}
