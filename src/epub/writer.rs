use crate::epub::layout::SourceTree;
use crate::epub::{
    EPUB_EXTENSION, EntryKind, MIMETYPE, PackageSummary, PackagedEntry, REQUIRED_DIRS,
};
use crate::error::{EpubToolError, Result};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Package a validated source tree into `<base>/<name>.epub`.
///
/// The archive is built in a sibling `.epub.tmp` file and renamed into place
/// once complete. An existing archive at the destination is replaced; on
/// failure the temporary file is removed and the destination is untouched.
#[instrument(level = "info", skip_all, fields(base = %tree.base_dir.display(), name = %name))]
pub fn package_tree(tree: &SourceTree, name: &str) -> Result<PackageSummary> {
    check_target_name(name)?;
    let archive = archive_path(&tree.base_dir, name);
    let tmp_path = archive.with_extension("epub.tmp");

    let written = write_archive(tree, &tmp_path).and_then(|written| {
        std::fs::rename(&tmp_path, &archive)?;
        Ok(written)
    });
    let (entries, skipped) = match written {
        Ok(written) => written,
        Err(e) => {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(e);
        }
    };

    info!(
        archive = %archive.display(),
        entries = entries.len(),
        skipped,
        "epub written"
    );
    Ok(PackageSummary {
        archive,
        base_dir: tree.base_dir.clone(),
        entries,
        skipped,
    })
}

/// The archive name must be a plain file name so the archive (and its
/// temporary file) land in the tree root, outside the walked directories.
pub fn check_target_name(name: &str) -> Result<()> {
    let plain = !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
        && Path::new(name).components().count() == 1;
    if plain {
        Ok(())
    } else {
        Err(EpubToolError::InvalidTargetName(name.to_string()))
    }
}

/// Destination of a packaged archive
pub fn archive_path(base_dir: &Path, name: &str) -> PathBuf {
    base_dir.join(format!("{name}.{EPUB_EXTENSION}"))
}

struct Walk {
    zip: ZipWriter<File>,
    base: PathBuf,
    entries: Vec<PackagedEntry>,
    skipped: usize,
}

fn write_archive(tree: &SourceTree, path: &Path) -> Result<(Vec<PackagedEntry>, usize)> {
    let file = File::create(path)?;
    let mut walk = Walk {
        zip: ZipWriter::new(file),
        base: tree.base_dir.clone(),
        entries: Vec::new(),
        skipped: 0,
    };

    // mimetype (stored, no compression, first entry)
    let stored = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
    let mimetype = tree.mimetype_path();
    let size = walk.copy_file(&mimetype, MIMETYPE.to_string(), stored)?;
    walk.record(MIMETYPE.to_string(), EntryKind::File, size);

    for dir in REQUIRED_DIRS {
        let root = tree.base_dir.join(dir);
        walk.write_dir(&root)?;
    }

    walk.zip.finish()?;
    Ok((walk.entries, walk.skipped))
}

impl Walk {
    /// Write `dir` as a directory record, then its files, then its subdirectories.
    fn write_dir(&mut self, dir: &Path) -> Result<()> {
        let deflate =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        let name = format!("{}/", self.entry_name(dir));
        self.zip.add_directory(name.as_str(), deflate)?;
        self.record(name, EntryKind::Directory, 0);

        let (dirs, files): (Vec<PathBuf>, Vec<PathBuf>) =
            sorted_children(dir)?.into_iter().partition(|p| p.is_dir());

        for file in files {
            if is_hidden(&file) {
                debug!(path = %file.display(), "skipping hidden file");
                self.skipped += 1;
                continue;
            }
            let name = self.entry_name(&file);
            let size = self.copy_file(&file, name.clone(), deflate)?;
            self.record(name, EntryKind::File, size);
        }

        for sub in dirs {
            self.write_dir(&sub)?;
        }
        Ok(())
    }

    fn copy_file(&mut self, path: &Path, name: String, options: SimpleFileOptions) -> Result<u64> {
        let mut src = File::open(path).map_err(|source| EpubToolError::Walk {
            path: path.to_path_buf(),
            source,
        })?;
        self.zip.start_file(name.as_str(), options)?;
        let size = io::copy(&mut src, &mut self.zip).map_err(|source| EpubToolError::Walk {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(size)
    }

    fn record(&mut self, name: String, kind: EntryKind, size: u64) {
        debug!(entry = %name, %kind, size, "added entry");
        self.entries.push(PackagedEntry { name, kind, size });
    }

    /// `/`-separated path of `path` relative to the tree's base directory.
    fn entry_name(&self, path: &Path) -> String {
        let rel = path.strip_prefix(&self.base).unwrap_or(path);
        rel.components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }
}

fn sorted_children(dir: &Path) -> Result<Vec<PathBuf>> {
    let walk_err = |source| EpubToolError::Walk {
        path: dir.to_path_buf(),
        source,
    };
    let mut children = std::fs::read_dir(dir)
        .map_err(walk_err)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<io::Result<Vec<_>>>()
        .map_err(walk_err)?;
    children.sort();
    Ok(children)
}

/// Dotfiles (`.DS_Store` and friends) never go into the archive.
pub fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|n| n.to_string_lossy().starts_with('.'))
}
