//! Markdown documents: finding them, restyling their diagrams, writing them back.
//!
//! This module handles:
//! - Discovering markdown files under a project root
//! - Extracting mermaid fences and splicing restyled diagrams back in
//! - Per-file processing where one failing file never stops the run

mod blocks;
mod discover;

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use crate::rewrite::Rewriter;

pub use blocks::{
    DiagramBlock, DiagramReport, DocumentRewrite, find_diagram_blocks, restyle_document,
};
pub use discover::{DEFAULT_DOCS_DIR, discover_documents};

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Whether restyled documents are written back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    Write,
    DryRun,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    NoDiagrams,
    Unchanged,
    /// Written back, or would be in a dry run.
    Restyled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub path: PathBuf,
    pub outcome: FileOutcome,
    pub diagrams: Vec<DiagramReport>,
}

/// Restyle the mermaid diagrams of one markdown file.
///
/// The file is only written when its text changed and `mode` is
/// [`WriteMode::Write`].
///
/// # Errors
/// Returns an error if the file cannot be read or written.
pub fn restyle_file(
    path: &Path,
    rewriter: &Rewriter,
    mode: WriteMode,
) -> Result<FileReport, DocumentError> {
    let _scope = crate::perf::scope("document.restyle_file");
    let source = std::fs::read_to_string(path).map_err(|source| DocumentError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let rewritten = restyle_document(&source, rewriter);
    let outcome = if rewritten.diagrams.is_empty() {
        FileOutcome::NoDiagrams
    } else if rewritten.changed() {
        FileOutcome::Restyled
    } else {
        FileOutcome::Unchanged
    };

    if outcome == FileOutcome::Restyled && mode == WriteMode::Write {
        std::fs::write(path, &rewritten.text).map_err(|source| DocumentError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    }

    for report in &rewritten.diagrams {
        info!(
            path = %path.display(),
            diagram = report.index,
            theme = report.diagram.theme.name,
            classified = report.diagram.classified_nodes(),
            "diagram"
        );
    }

    Ok(FileReport {
        path: path.to_path_buf(),
        outcome,
        diagrams: rewritten.diagrams,
    })
}

/// Totals for a whole run.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub reports: Vec<FileReport>,
    pub failures: Vec<DocumentError>,
    pub dry_run: bool,
}

impl RunSummary {
    pub fn processed(&self) -> usize {
        self.reports.len() + self.failures.len()
    }

    pub fn count(&self, outcome: FileOutcome) -> usize {
        self.reports
            .iter()
            .filter(|report| report.outcome == outcome)
            .count()
    }

    pub fn restyled(&self) -> usize {
        self.count(FileOutcome::Restyled)
    }

    pub fn diagrams(&self) -> usize {
        self.reports.iter().map(|report| report.diagrams.len()).sum()
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let restyled = if self.dry_run {
            "Files to restyle"
        } else {
            "Files restyled"
        };
        writeln!(f, "Files processed: {}", self.processed())?;
        writeln!(f, "Diagrams found: {}", self.diagrams())?;
        writeln!(f, "{restyled}: {}", self.restyled())?;
        writeln!(f, "Files unchanged: {}", self.count(FileOutcome::Unchanged))?;
        writeln!(f, "Files without diagrams: {}", self.count(FileOutcome::NoDiagrams))?;
        write!(f, "Files failed: {}", self.failures.len())
    }
}

/// Restyle every file in `paths`, continuing past per-file failures.
pub fn restyle_all(paths: &[PathBuf], rewriter: &Rewriter, mode: WriteMode) -> RunSummary {
    let _scope = crate::perf::scope("document.restyle_all");
    let mut summary = RunSummary {
        dry_run: mode == WriteMode::DryRun,
        ..RunSummary::default()
    };
    for path in paths {
        match restyle_file(path, rewriter, mode) {
            Ok(report) => summary.reports.push(report),
            Err(err) => {
                warn!("{err}");
                summary.failures.push(err);
            }
        }
    }
    summary
}
