use crate::epub::{ExtractSummary, zip_utils};
use crate::error::{EpubToolError, Result};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Unpack every entry of `archive` into `target`.
///
/// Any zip file is accepted. `target` and missing subdirectories are created;
/// a `target` that exists but is not a directory is left alone and reported.
#[instrument(
    level = "info",
    skip_all,
    fields(archive = %archive.display(), target = %target.display())
)]
pub fn extract_archive(archive: &Path, target: &Path) -> Result<ExtractSummary> {
    if target.exists() && !target.is_dir() {
        return Err(EpubToolError::TargetNotDirectory(target.to_path_buf()));
    }

    let mut zip = zip_utils::open_archive(archive)?;
    for name in zip_utils::list_entries(&zip) {
        debug!(entry = %name, "extracting entry");
    }

    std::fs::create_dir_all(target)?;
    zip.extract(target)?;

    info!(entries = zip.len(), "archive extracted");
    Ok(ExtractSummary {
        archive: archive.to_path_buf(),
        target: target.to_path_buf(),
        entries: zip.len(),
    })
}
