pub mod layout;
pub mod reader;
pub mod writer;
pub mod zip_utils;

use serde::Serialize;
use std::path::PathBuf;

/// Name of the mimetype file, both on disk and as the first archive entry.
pub const MIMETYPE: &str = "mimetype";

/// Extension of the package descriptor that `make` takes as input.
pub const DESCRIPTOR_EXTENSION: &str = "opf";

/// Extension given to packaged archives.
pub const EPUB_EXTENSION: &str = "epub";

/// Top-level directories every source tree must have, in packaging order.
pub const REQUIRED_DIRS: [&str; 2] = ["META-INF", "OEBPS"];

/// Result of packaging a source tree
#[derive(Debug, Clone, Serialize)]
pub struct PackageSummary {
    pub archive: PathBuf,
    pub base_dir: PathBuf,
    pub entries: Vec<PackagedEntry>,
    /// Hidden files left out of the archive
    pub skipped: usize,
}

/// One record written to a packaged archive
#[derive(Debug, Clone, Serialize)]
pub struct PackagedEntry {
    pub name: String,
    pub kind: EntryKind,
    pub size: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Directory,
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryKind::File => write!(f, "file"),
            EntryKind::Directory => write!(f, "dir"),
        }
    }
}

/// Result of unpacking an archive
#[derive(Debug, Clone, Serialize)]
pub struct ExtractSummary {
    pub archive: PathBuf,
    pub target: PathBuf,
    pub entries: usize,
}
