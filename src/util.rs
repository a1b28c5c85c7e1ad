use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Format a byte count as a human-readable size string.
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * KB;
    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}

/// Pick the directory `extract` unpacks into.
///
/// The candidate is the explicit target, or the input archive itself. An
/// existing directory is used as-is; anything else is replaced by its parent
/// (`.` when the path has no parent component).
pub fn resolve_extract_target(target: Option<&Path>, input: &Path) -> PathBuf {
    let candidate = target.unwrap_or(input);
    if candidate.is_dir() {
        return candidate.to_path_buf();
    }
    match candidate.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Platform command that opens a path with its default application.
fn opener_program() -> &'static str {
    if cfg!(target_os = "macos") {
        "open"
    } else if cfg!(target_os = "windows") {
        "explorer"
    } else {
        "xdg-open"
    }
}

/// Launch the default viewer for `path` without waiting for it.
///
/// Failure to spawn only produces a warning.
pub fn open_with_default_app(path: &Path) {
    let program = opener_program();
    let spawned = Command::new(program)
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn();
    match spawned {
        Ok(child) => {
            tracing::debug!(program, pid = child.id(), path = %path.display(), "opener launched")
        }
        Err(e) => {
            tracing::warn!(program, path = %path.display(), error = %e, "could not launch opener")
        }
    }
}
