//! File system tools: find, open, list, read, inspect
//!
//! Output is tuned for speech: short numbered lists, basenames with their
//! parent folder, explicit truncation notes. Reads are capped hard (50KB,
//! 200 lines) because the consumer is a text-to-speech pipeline, not a
//! pager.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use chrono::{DateTime, Local};
use tracing::info;

use crate::error::Result;

use super::apps::open_with_default_handler;
use super::args::ToolArgs;
use super::context::ToolContext;
use super::paths::{
    MAX_DEPTH, MAX_RESULTS, display_path, expand_path, format_size, is_excluded_dir, walk_files,
};
use super::registry::RegistryBuilder;
use super::schema::{ParamSpec, ToolSchema};

/// Maximum bytes `read_file` will touch
const MAX_FILE_SIZE: u64 = 50 * 1024;

/// Hard cap on `read_file` line counts
const MAX_LINES: i64 = 200;

/// Lookback cap for `get_recent_files`: one week
const MAX_LOOKBACK_HOURS: i64 = 168;

/// Register all file tools, in fixed order
pub fn register(builder: &mut RegistryBuilder) {
    builder.register(
        ToolSchema::new(
            "find_and_open_file",
            "Find files matching a pattern and open the Nth one. Use this when user says \
             'find and open' or 'open a PDF'. Example: find PDFs and open the 4th one.",
            vec![
                ParamSpec::string("pattern", "File pattern (e.g., '*.pdf', 'report', '*.txt')"),
                ParamSpec::integer("which", "Which file to open (1=first, 2=second, etc). Default: 1"),
                ParamSpec::string("directory", "Directory to search (default: home)"),
            ],
            &["pattern"],
        ),
        Box::new(|args, ctx| Box::pin(find_and_open_file(args, ctx))),
    );
    builder.register(
        ToolSchema::new(
            "find_files",
            "Search for files by name pattern. Use this to LIST files without opening. \
             For finding AND opening, use find_and_open_file instead.",
            vec![
                ParamSpec::string(
                    "pattern",
                    "File name pattern to search for (e.g., '*.pdf', 'report', 'notes.txt')",
                ),
                ParamSpec::string("directory", "Directory to search in (default: home directory)"),
                ParamSpec::string("file_type", "Filter by type: 'file' or 'directory'")
                    .one_of(&["file", "directory"]),
            ],
            &["pattern"],
        ),
        Box::new(|args, ctx| Box::pin(find_files(args, ctx))),
    );
    builder.register(
        ToolSchema::new(
            "list_directory",
            "List contents of a directory. Shows files and folders with sizes.",
            vec![
                ParamSpec::string("path", "Directory path to list (default: home directory)"),
                ParamSpec::boolean("show_hidden", "Include hidden files (default: false)"),
            ],
            &[],
        ),
        Box::new(|args, ctx| Box::pin(list_directory(args, ctx))),
    );
    builder.register(
        ToolSchema::new(
            "read_file",
            "Read the contents of a text file. Limited to small files for safety.",
            vec![
                ParamSpec::string("path", "Path to the file to read"),
                ParamSpec::integer("max_lines", "Maximum lines to read (default: 50, max: 200)"),
            ],
            &["path"],
        ),
        Box::new(|args, ctx| Box::pin(read_file(args, ctx))),
    );
    builder.register(
        ToolSchema::new(
            "get_file_info",
            "Get detailed information about a file including size, dates, and permissions.",
            vec![ParamSpec::string("path", "Path to the file or directory")],
            &["path"],
        ),
        Box::new(|args, ctx| Box::pin(get_file_info(args, ctx))),
    );
    builder.register(
        ToolSchema::new(
            "get_recent_files",
            "Find recently modified files. Good for 'what did I work on today' type questions.",
            vec![
                ParamSpec::string("directory", "Directory to search (default: home)"),
                ParamSpec::integer("hours", "Look back this many hours (default: 24, max: 168)"),
                ParamSpec::integer("limit", "Max files to return (default: 10, max: 50)"),
            ],
            &[],
        ),
        Box::new(|args, ctx| Box::pin(get_recent_files(args, ctx))),
    );
}

/// Resolve the search root: default home, and treat "." as home because
/// models often pass it meaning "wherever you usually look"
fn search_root(args: &ToolArgs, ctx: &ToolContext) -> PathBuf {
    match args.str("directory") {
        Some(dir) if dir != "." => expand_path(dir, &ctx.home),
        _ => ctx.home.clone(),
    }
}

/// Compile the user's pattern: explicit wildcards pass through, bare words
/// become substring matches
fn compile_pattern(pattern: &str) -> Option<glob::Pattern> {
    let full = if pattern.starts_with('*') {
        pattern.to_string()
    } else {
        format!("*{pattern}*")
    };
    glob::Pattern::new(&full).ok()
}

#[derive(Clone, Copy, PartialEq)]
enum MatchKind {
    Any,
    FilesOnly,
    DirsOnly,
}

/// Depth-limited recursive name search, skipping hidden and excluded
/// directories. Returns at most [`MAX_RESULTS`] matches.
fn search(root: &Path, pattern: &glob::Pattern, kind: MatchKind) -> Vec<PathBuf> {
    let mut results = Vec::new();
    search_inner(root, pattern, kind, MAX_DEPTH, &mut results);
    results
}

fn search_inner(
    dir: &Path,
    pattern: &glob::Pattern,
    kind: MatchKind,
    depth_left: usize,
    results: &mut Vec<PathBuf>,
) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    let mut entries: Vec<_> = entries.flatten().collect();
    entries.sort_by_key(std::fs::DirEntry::file_name);

    for entry in entries {
        if results.len() >= MAX_RESULTS {
            return;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        // Excluded names are invisible to search: not matched, not entered
        if name.starts_with('.') || is_excluded_dir(&name) {
            continue;
        }
        let Ok(file_type) = entry.file_type() else {
            continue;
        };

        let wanted = match kind {
            MatchKind::Any => true,
            MatchKind::FilesOnly => file_type.is_file(),
            MatchKind::DirsOnly => file_type.is_dir(),
        };
        if wanted && pattern.matches(&name) {
            results.push(entry.path());
        }

        if file_type.is_dir() && depth_left > 0 {
            search_inner(&entry.path(), pattern, kind, depth_left - 1, results);
        }
    }
}

/// Basename and parent-folder name, for "report.pdf in Documents" phrasing
fn name_and_folder(path: &Path) -> (String, String) {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let folder = path
        .parent()
        .and_then(Path::file_name)
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    (name, folder)
}

async fn find_files(args: ToolArgs, ctx: Arc<ToolContext>) -> Result<String> {
    let pattern_arg = args.str("pattern").unwrap_or_default();
    let root = search_root(&args, &ctx);

    if !root.is_dir() {
        return Ok(format!("Directory not found: {}", root.display()));
    }
    let Some(pattern) = compile_pattern(pattern_arg) else {
        return Ok(format!("Invalid search pattern: {pattern_arg}"));
    };

    let kind = match args.str("file_type") {
        Some("file") => MatchKind::FilesOnly,
        Some("directory") => MatchKind::DirsOnly,
        _ => MatchKind::Any,
    };

    let results = search(&root, &pattern, kind);
    if results.is_empty() {
        return Ok(format!("No files found matching '{pattern_arg}'."));
    }

    let mut out = format!("Found {} files:\n", results.len());
    for (i, path) in results.iter().enumerate() {
        let (name, folder) = name_and_folder(path);
        out.push_str(&format!("{}. {name} in {folder}\n", i + 1));
    }
    if results.len() >= MAX_RESULTS {
        out.push_str(&format!("Showing first {MAX_RESULTS} results.\n"));
    }
    out.push_str("Say 'open the first one' or use find_and_open_file tool.");
    Ok(out)
}

async fn find_and_open_file(args: ToolArgs, ctx: Arc<ToolContext>) -> Result<String> {
    let pattern_arg = args.str("pattern").unwrap_or_default();
    let root = search_root(&args, &ctx);

    if !root.is_dir() {
        return Ok(format!("Directory not found: {}", root.display()));
    }
    let Some(pattern) = compile_pattern(pattern_arg) else {
        return Ok(format!("Invalid search pattern: {pattern_arg}"));
    };

    let results = search(&root, &pattern, MatchKind::FilesOnly);
    if results.is_empty() {
        return Ok(format!("No files found matching '{pattern_arg}'."));
    }

    let which = args.int_or("which", 1);
    if which < 1 || which as usize > results.len() {
        return Ok(format!(
            "Found {} files, but you asked for #{which}. Please choose 1 to {}.",
            results.len(),
            results.len()
        ));
    }

    let target = &results[which as usize - 1];
    let (name, folder) = name_and_folder(target);
    match open_with_default_handler(target.as_os_str()) {
        Ok(()) => {
            info!(path = %target.display(), "opened file");
            Ok(format!("Opened {name} from {folder} folder."))
        }
        Err(message) => Ok(message),
    }
}

async fn list_directory(args: ToolArgs, ctx: Arc<ToolContext>) -> Result<String> {
    let target = match args.str("path") {
        Some(path) => expand_path(path, &ctx.home),
        None => ctx.home.clone(),
    };
    let show_hidden = args.bool_or("show_hidden", false);

    if !target.exists() {
        return Ok(format!("Path not found: {}", target.display()));
    }
    if !target.is_dir() {
        return Ok(format!(
            "Not a directory: {}. Use read_file for files.",
            target.display()
        ));
    }

    let entries = match std::fs::read_dir(&target) {
        Ok(entries) => entries,
        Err(err) if err.kind() == std::io::ErrorKind::PermissionDenied => {
            return Ok(format!("Permission denied: {}", target.display()));
        }
        Err(err) => {
            return Ok(format!("Could not list directory: {err}"));
        }
    };

    let mut names: Vec<String> = entries
        .flatten()
        .map(|e| e.file_name().to_string_lossy().to_string())
        .filter(|name| show_hidden || !name.starts_with('.'))
        .collect();
    names.sort_by_key(|name| name.to_lowercase());

    let mut dirs = Vec::new();
    let mut files = Vec::new();
    for name in names {
        let full = target.join(&name);
        if full.is_dir() {
            dirs.push(format!("📁 {name}/"));
        } else {
            match std::fs::metadata(&full) {
                Ok(meta) => files.push(format!("📄 {name} ({})", format_size(meta.len()))),
                Err(_) => files.push(format!("📄 {name}")),
            }
        }
    }

    let mut out = format!("Contents of {}:\n", display_path(&target, &ctx.home));
    let per_kind = MAX_RESULTS / 2;
    let shown = dirs.len().min(per_kind) + files.len().min(per_kind);
    for item in dirs.iter().take(per_kind) {
        out.push_str(&format!("  {item}\n"));
    }
    for item in files.iter().take(per_kind) {
        out.push_str(&format!("  {item}\n"));
    }

    let total = dirs.len() + files.len();
    if total > MAX_RESULTS {
        out.push_str(&format!("  ... and {} more items", total - shown));
    }
    Ok(out.trim_end().to_string())
}

async fn read_file(args: ToolArgs, ctx: Arc<ToolContext>) -> Result<String> {
    let raw_path = args.str("path").unwrap_or_default();
    let target = expand_path(raw_path, &ctx.home);

    if !target.exists() {
        return Ok(format!("File not found: {raw_path}"));
    }
    if target.is_dir() {
        return Ok(format!(
            "Path is a directory, not a file: {raw_path}. Use list_directory instead."
        ));
    }

    let max_lines = args.int_or("max_lines", 50).clamp(1, MAX_LINES) as usize;

    let size = match std::fs::metadata(&target) {
        Ok(meta) => meta.len(),
        Err(err) => return Ok(format!("Cannot access file: {err}")),
    };
    if size > MAX_FILE_SIZE {
        return Ok(format!(
            "File too large ({}). Max allowed: {}",
            format_size(size),
            format_size(MAX_FILE_SIZE)
        ));
    }

    let bytes = match std::fs::read(&target) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == std::io::ErrorKind::PermissionDenied => {
            return Ok(format!("Permission denied: {raw_path}"));
        }
        Err(err) => return Ok(format!("Could not read file: {err}")),
    };
    if bytes.contains(&0) {
        return Ok(format!(
            "Cannot read file: {raw_path} appears to be binary, not text."
        ));
    }

    let content = String::from_utf8_lossy(&bytes);
    let lines: Vec<&str> = content.lines().collect();
    let shown = display_path(&target, &ctx.home);

    if lines.len() > max_lines {
        let head = lines[..max_lines].join("\n");
        Ok(format!(
            "File: {shown} (showing first {max_lines} of {} lines)\n\n{head}",
            lines.len()
        ))
    } else {
        Ok(format!("File: {shown}\n\n{content}"))
    }
}

async fn get_file_info(args: ToolArgs, ctx: Arc<ToolContext>) -> Result<String> {
    let raw_path = args.str("path").unwrap_or_default();
    let target = expand_path(raw_path, &ctx.home);

    let metadata = match std::fs::metadata(&target) {
        Ok(meta) => meta,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(format!("Path not found: {raw_path}"));
        }
        Err(err) if err.kind() == std::io::ErrorKind::PermissionDenied => {
            return Ok(format!("Permission denied: {raw_path}"));
        }
        Err(err) => return Ok(format!("Could not get file info: {err}")),
    };

    let kind = if metadata.is_dir() { "Directory" } else { "File" };
    let mut out = format!("File Info: {}\n", display_path(&target, &ctx.home));
    out.push_str(&format!("Type: {kind}\n"));
    out.push_str(&format!("Size: {}\n", format_size(metadata.len())));
    out.push_str(&format!("Modified: {}\n", format_time(metadata.modified())));
    out.push_str(&format!("Created: {}\n", format_time(metadata.created())));
    out.push_str(&format!("Permissions: {}", permissions_string(&metadata)));
    Ok(out)
}

fn format_time(time: std::io::Result<SystemTime>) -> String {
    time.map_or_else(
        |_| "unknown".to_string(),
        |t| DateTime::<Local>::from(t).format("%Y-%m-%d %H:%M:%S").to_string(),
    )
}

#[cfg(unix)]
fn permissions_string(metadata: &std::fs::Metadata) -> String {
    use std::os::unix::fs::PermissionsExt;

    let mode = metadata.permissions().mode();
    let kind = if metadata.is_dir() { 'd' } else { '-' };
    let mut out = String::with_capacity(10);
    out.push(kind);
    for shift in [6u32, 3, 0] {
        let bits = (mode >> shift) & 0o7;
        out.push(if bits & 0o4 != 0 { 'r' } else { '-' });
        out.push(if bits & 0o2 != 0 { 'w' } else { '-' });
        out.push(if bits & 0o1 != 0 { 'x' } else { '-' });
    }
    out
}

#[cfg(not(unix))]
fn permissions_string(metadata: &std::fs::Metadata) -> String {
    if metadata.permissions().readonly() {
        "read-only".to_string()
    } else {
        "read-write".to_string()
    }
}

async fn get_recent_files(args: ToolArgs, ctx: Arc<ToolContext>) -> Result<String> {
    let root = match args.str("directory") {
        Some(dir) => expand_path(dir, &ctx.home),
        None => ctx.home.clone(),
    };
    if !root.is_dir() {
        return Ok(format!("Directory not found: {}", root.display()));
    }

    let hours = args.int_or("hours", 24).clamp(1, MAX_LOOKBACK_HOURS) as u64;
    let limit = args.int_or("limit", 10).clamp(1, 50) as usize;
    let cutoff = SystemTime::now() - Duration::from_secs(hours * 3600);

    let mut recent: Vec<(PathBuf, SystemTime)> = Vec::new();
    walk_files(&root, MAX_DEPTH, &mut |path, metadata| {
        if let Ok(mtime) = metadata.modified() {
            if mtime > cutoff {
                recent.push((path.to_path_buf(), mtime));
            }
        }
        true
    });

    if recent.is_empty() {
        return Ok(format!(
            "No files modified in the last {hours} hours in {}",
            display_path(&root, &ctx.home)
        ));
    }

    recent.sort_by(|a, b| b.1.cmp(&a.1));

    let mut out = format!("Files modified in the last {hours} hours:\n");
    for (path, mtime) in recent.iter().take(limit) {
        let time = DateTime::<Local>::from(*mtime).format("%H:%M");
        out.push_str(&format!("  {time} - {}\n", display_path(path, &ctx.home)));
    }
    if recent.len() > limit {
        out.push_str(&format!("  ... and {} more files", recent.len() - limit));
    }
    Ok(out.trim_end().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_compilation() {
        let explicit = compile_pattern("*.pdf").unwrap();
        assert!(explicit.matches("report.pdf"));
        assert!(!explicit.matches("report.txt"));

        let substring = compile_pattern("report").unwrap();
        assert!(substring.matches("report.pdf"));
        assert!(substring.matches("quarterly_report_final.txt"));
        assert!(!substring.matches("notes.txt"));
    }

    #[test]
    fn search_caps_and_skips_excluded() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("docs")).unwrap();
        std::fs::create_dir_all(root.join(".git")).unwrap();
        for i in 0..25 {
            std::fs::write(root.join(format!("docs/file{i:02}.txt")), "x").unwrap();
        }
        std::fs::write(root.join(".git/hidden.txt"), "x").unwrap();

        let pattern = compile_pattern("*.txt").unwrap();
        let results = search(root, &pattern, MatchKind::FilesOnly);
        assert_eq!(results.len(), MAX_RESULTS);
        assert!(results.iter().all(|p| !p.to_string_lossy().contains(".git")));
    }

    #[test]
    fn excluded_directories_are_never_matches() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("node_modules")).unwrap();
        std::fs::create_dir_all(root.join("target")).unwrap();
        std::fs::create_dir_all(root.join("node_modules_backup")).unwrap();

        let pattern = compile_pattern("node_modules").unwrap();
        let results = search(root, &pattern, MatchKind::DirsOnly);
        // The excluded name itself is not a hit; a near-miss name is
        assert_eq!(results.len(), 1);
        assert!(results[0].ends_with("node_modules_backup"));

        let pattern = compile_pattern("target").unwrap();
        assert!(search(root, &pattern, MatchKind::Any).is_empty());
    }

    #[test]
    fn search_directory_kind() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("projects")).unwrap();
        std::fs::write(root.join("projects.txt"), "x").unwrap();

        let pattern = compile_pattern("projects").unwrap();
        let dirs = search(root, &pattern, MatchKind::DirsOnly);
        assert_eq!(dirs.len(), 1);
        assert!(dirs[0].is_dir());
    }

    #[test]
    fn permissions_render() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("f.txt");
        std::fs::write(&file, "x").unwrap();
        let rendered = permissions_string(&std::fs::metadata(&file).unwrap());
        #[cfg(unix)]
        {
            assert_eq!(rendered.len(), 10);
            assert!(rendered.starts_with('-'));
        }
        #[cfg(not(unix))]
        assert!(!rendered.is_empty());
    }
}
