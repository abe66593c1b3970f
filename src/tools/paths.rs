//! Path normalization and bounded traversal helpers
//!
//! Language models hallucinate paths: generic placeholder homes, bare `~`,
//! relative fragments. Everything filesystem-facing funnels through
//! [`expand_path`] so tools always operate on a real location. Traversal is
//! depth-limited and skips noise directories to bound cost on large home
//! directories.

use std::fs::Metadata;
use std::path::{Path, PathBuf};

use tracing::debug;

/// Maximum entries a search or listing returns
pub const MAX_RESULTS: usize = 20;

/// Maximum traversal depth below the search root
pub const MAX_DEPTH: usize = 4;

/// Directory names skipped during recursive traversal: version-control
/// metadata, dependency caches, trash
pub const EXCLUDED_DIRS: &[&str] = &[
    ".git",
    ".venv",
    "venv",
    "node_modules",
    "__pycache__",
    ".cache",
    ".npm",
    ".cargo",
    "target",
    "Trash",
];

/// Placeholder home prefixes models commonly invent
const PLACEHOLDER_HOMES: &[&str] = &["/home/yourname/", "/home/username/", "/home/user/"];

/// Expand a path argument against the real home directory.
///
/// Handles `~` shorthand, the placeholder homes a model might hallucinate,
/// and relative paths (resolved against home). An empty path yields home
/// itself.
#[must_use]
pub fn expand_path(raw: &str, home: &Path) -> PathBuf {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return home.to_path_buf();
    }

    let mut path = trimmed.to_string();
    for placeholder in PLACEHOLDER_HOMES {
        if let Some(rest) = path.strip_prefix(placeholder) {
            path = format!("~/{rest}");
            break;
        }
    }

    if path == "~" {
        return home.to_path_buf();
    }
    if let Some(rest) = path.strip_prefix("~/") {
        return home.join(rest);
    }

    let path = PathBuf::from(path);
    if path.is_absolute() {
        path
    } else {
        home.join(path)
    }
}

/// Render a path with the home prefix collapsed back to `~` for speech
#[must_use]
pub fn display_path(path: &Path, home: &Path) -> String {
    match path.strip_prefix(home) {
        Ok(rest) if rest.as_os_str().is_empty() => "~".to_string(),
        Ok(rest) => format!("~/{}", rest.display()),
        Err(_) => path.display().to_string(),
    }
}

/// Whether a directory name is on the exclusion list
#[must_use]
pub fn is_excluded_dir(name: &str) -> bool {
    EXCLUDED_DIRS.contains(&name)
}

/// Human-readable size: whole bytes, then one decimal per unit step
#[must_use]
pub fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{bytes}B");
    }
    let mut size = bytes as f64;
    for unit in ["KB", "MB", "GB"] {
        size /= 1024.0;
        if size < 1024.0 {
            return format!("{size:.1}{unit}");
        }
    }
    format!("{:.1}TB", size / 1024.0)
}

/// Depth-limited recursive walk under `root`, skipping excluded directories
/// and hidden entries. The visitor receives every file (not directory)
/// found, and returns `false` to stop the walk early.
pub fn walk_files<F>(root: &Path, max_depth: usize, visit: &mut F)
where
    F: FnMut(&Path, &Metadata) -> bool,
{
    walk_inner(root, max_depth, visit);
}

fn walk_inner<F>(dir: &Path, depth_left: usize, visit: &mut F) -> bool
where
    F: FnMut(&Path, &Metadata) -> bool,
{
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            // Permission errors on individual subtrees are expected when
            // walking a home directory; skip and move on.
            debug!(dir = %dir.display(), error = %err, "skipping unreadable directory");
            return true;
        }
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().to_string();
        let Ok(file_type) = entry.file_type() else {
            continue;
        };

        if file_type.is_dir() {
            if depth_left == 0 || name.starts_with('.') || is_excluded_dir(&name) {
                continue;
            }
            if !walk_inner(&path, depth_left - 1, visit) {
                return false;
            }
        } else if file_type.is_file() {
            if name.starts_with('.') {
                continue;
            }
            let Ok(metadata) = entry.metadata() else {
                continue;
            };
            if !visit(&path, &metadata) {
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_tilde_and_placeholders() {
        let home = Path::new("/real/home");
        assert_eq!(expand_path("~", home), PathBuf::from("/real/home"));
        assert_eq!(
            expand_path("~/docs/a.txt", home),
            PathBuf::from("/real/home/docs/a.txt")
        );
        assert_eq!(
            expand_path("/home/yourname/docs", home),
            PathBuf::from("/real/home/docs")
        );
        assert_eq!(
            expand_path("/home/user/x.pdf", home),
            PathBuf::from("/real/home/x.pdf")
        );
    }

    #[test]
    fn relative_paths_resolve_against_home() {
        let home = Path::new("/real/home");
        assert_eq!(
            expand_path("Documents/notes.txt", home),
            PathBuf::from("/real/home/Documents/notes.txt")
        );
    }

    #[test]
    fn empty_path_is_home() {
        let home = Path::new("/real/home");
        assert_eq!(expand_path("", home), PathBuf::from("/real/home"));
        assert_eq!(expand_path("   ", home), PathBuf::from("/real/home"));
    }

    #[test]
    fn absolute_paths_pass_through() {
        let home = Path::new("/real/home");
        assert_eq!(expand_path("/etc/hosts", home), PathBuf::from("/etc/hosts"));
    }

    #[test]
    fn display_path_collapses_home() {
        let home = Path::new("/real/home");
        assert_eq!(display_path(Path::new("/real/home/docs"), home), "~/docs");
        assert_eq!(display_path(Path::new("/real/home"), home), "~");
        assert_eq!(display_path(Path::new("/etc/hosts"), home), "/etc/hosts");
    }

    #[test]
    fn size_formatting() {
        assert_eq!(format_size(0), "0B");
        assert_eq!(format_size(512), "512B");
        assert_eq!(format_size(2048), "2.0KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.0MB");
    }

    #[test]
    fn excluded_dirs() {
        assert!(is_excluded_dir(".git"));
        assert!(is_excluded_dir("node_modules"));
        assert!(!is_excluded_dir("Documents"));
    }

    #[test]
    fn walk_skips_excluded_and_respects_depth() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("docs")).unwrap();
        std::fs::create_dir_all(root.join("node_modules")).unwrap();
        std::fs::create_dir_all(root.join("a/b/c/d/e")).unwrap();
        std::fs::write(root.join("top.txt"), "x").unwrap();
        std::fs::write(root.join("docs/inner.txt"), "x").unwrap();
        std::fs::write(root.join("node_modules/skip.txt"), "x").unwrap();
        std::fs::write(root.join("a/b/c/d/e/deep.txt"), "x").unwrap();

        let mut seen = Vec::new();
        walk_files(root, MAX_DEPTH, &mut |path, _meta| {
            seen.push(path.file_name().unwrap().to_string_lossy().to_string());
            true
        });

        assert!(seen.contains(&"top.txt".to_string()));
        assert!(seen.contains(&"inner.txt".to_string()));
        assert!(!seen.contains(&"skip.txt".to_string()));
        // a/b/c/d/e is five levels down, past the depth limit
        assert!(!seen.contains(&"deep.txt".to_string()));
    }

    #[test]
    fn walk_stops_when_visitor_returns_false() {
        let dir = tempfile::tempdir().unwrap();
        for i in 0..5 {
            std::fs::write(dir.path().join(format!("f{i}.txt")), "x").unwrap();
        }
        let mut count = 0;
        walk_files(dir.path(), MAX_DEPTH, &mut |_path, _meta| {
            count += 1;
            count < 2
        });
        assert_eq!(count, 2);
    }
}
