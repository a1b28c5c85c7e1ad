use std::path::PathBuf;

use thiserror::Error;

/// Broad category of a failure, used by the CLI to decide how to report it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad invocation, detected before any I/O.
    Usage,
    /// The input tree or target does not have the required shape.
    Precondition,
    /// Filesystem or archive failure while working.
    Io,
}

#[derive(Error, Debug)]
pub enum EpubToolError {
    #[error("you must provide a name for the .epub to package")]
    MissingTarget,

    #[error("invalid epub name {0:?}: give a plain name without path separators")]
    InvalidTargetName(String),

    #[error("please provide a valid path to an .opf file: {}", .0.display())]
    InvalidDescriptor(PathBuf),

    #[error("directory \"{name}\" not found in {}, aborting", base.display())]
    MissingDirectory { name: &'static str, base: PathBuf },

    #[error("\"mimetype\" file not found in {}, aborting", .0.display())]
    MissingMimetype(PathBuf),

    #[error("extraction target {} exists and is not a directory", .0.display())]
    TargetNotDirectory(PathBuf),

    #[error("reading {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl EpubToolError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingTarget | Self::InvalidTargetName(_) => ErrorKind::Usage,
            Self::InvalidDescriptor(_)
            | Self::MissingDirectory { .. }
            | Self::MissingMimetype(_)
            | Self::TargetNotDirectory(_) => ErrorKind::Precondition,
            Self::Walk { .. } | Self::Zip(_) | Self::Io(_) => ErrorKind::Io,
        }
    }
}

pub type Result<T> = std::result::Result<T, EpubToolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_directory_messages_differ() {
        let base = PathBuf::from("/x/book");
        let oebps = EpubToolError::MissingDirectory {
            name: "OEBPS",
            base: base.clone(),
        };
        let meta = EpubToolError::MissingDirectory {
            name: "META-INF",
            base,
        };
        assert_ne!(oebps.to_string(), meta.to_string());
        assert!(meta.to_string().contains("\"META-INF\""));
    }

    #[test]
    fn kinds() {
        assert_eq!(EpubToolError::MissingTarget.kind(), ErrorKind::Usage);
        assert_eq!(
            EpubToolError::InvalidTargetName("OEBPS/self".into()).kind(),
            ErrorKind::Usage
        );
        assert_eq!(
            EpubToolError::MissingMimetype(PathBuf::from(".")).kind(),
            ErrorKind::Precondition
        );
        let io = std::io::Error::other("boom");
        assert_eq!(EpubToolError::from(io).kind(), ErrorKind::Io);
    }
}
