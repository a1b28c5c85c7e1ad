use crate::epub::{DESCRIPTOR_EXTENSION, MIMETYPE, REQUIRED_DIRS};
use crate::error::{EpubToolError, Result};
use std::path::{Path, PathBuf};

/// A source tree that has passed the structural checks needed for packaging.
///
/// The descriptor lives at `<base>/OEBPS/<subdir>/<name>.opf`: for
/// `book/OEBPS/text/content.opf` the base is `book/`, which must hold a
/// `mimetype` file plus every directory in [`REQUIRED_DIRS`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceTree {
    pub descriptor: PathBuf,
    pub base_dir: PathBuf,
}

impl SourceTree {
    /// Validate the tree around `descriptor`, failing on the first missing piece.
    pub fn from_descriptor(descriptor: &Path) -> Result<Self> {
        let descriptor = expand_home(descriptor);
        let is_opf = descriptor
            .extension()
            .is_some_and(|ext| ext == DESCRIPTOR_EXTENSION);
        if !descriptor.exists() || !is_opf {
            return Err(EpubToolError::InvalidDescriptor(descriptor));
        }
        tracing::debug!(
            descriptor = %descriptor.display(),
            "descriptor found, checking structure"
        );

        let base_dir = base_dir_for(&descriptor);
        for name in REQUIRED_DIRS {
            if !base_dir.join(name).is_dir() {
                return Err(EpubToolError::MissingDirectory {
                    name,
                    base: base_dir,
                });
            }
        }
        if !base_dir.join(MIMETYPE).is_file() {
            return Err(EpubToolError::MissingMimetype(base_dir));
        }

        Ok(Self {
            descriptor,
            base_dir,
        })
    }

    pub fn mimetype_path(&self) -> PathBuf {
        self.base_dir.join(MIMETYPE)
    }
}

/// Number of directories between the tree root and the descriptor
/// (`OEBPS/<subdir>/`), plus the descriptor itself.
const DESCRIPTOR_DEPTH: usize = 3;

/// Root of the source tree that `descriptor` belongs to.
///
/// Relative paths that run out of components resolve to `.`; absolute ones
/// stop at the filesystem root.
pub fn base_dir_for(descriptor: &Path) -> PathBuf {
    (0..DESCRIPTOR_DEPTH).fold(descriptor.to_path_buf(), |path, _| non_empty_parent(&path))
}

fn non_empty_parent(path: &Path) -> PathBuf {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        None if path.has_root() => path.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Replace a leading `~` with the user's home directory, if one is known.
pub fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    let home = std::env::var_os("HOME").or_else(|| std::env::var_os("USERPROFILE"));
    match home {
        Some(home) => PathBuf::from(home).join(rest),
        None => path.to_path_buf(),
    }
}
