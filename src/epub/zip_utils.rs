use crate::error::Result;
use std::fs::File;
use std::path::Path;
use zip::ZipArchive;

pub fn open_archive(path: &Path) -> Result<ZipArchive<File>> {
    let file = File::open(path)?;
    let archive = ZipArchive::new(file)?;
    Ok(archive)
}

pub fn list_entries(archive: &ZipArchive<File>) -> Vec<String> {
    (0..archive.len())
        .filter_map(|i| archive.name_for_index(i).map(|s| s.to_string()))
        .collect()
}
