//! Application control tools: open apps, files, URLs
//!
//! Launching is the one place the assistant executes something, so it is
//! allow-listed twice over: spoken names go through a curated alias table,
//! resolved executables are checked against a denylist of destructive
//! commands, and URLs are rejected outright if they carry shell
//! metacharacters.

use std::ffi::OsStr;
use std::process::Stdio;
use std::sync::Arc;

use tracing::{debug, info};

use crate::error::Result;

use super::args::ToolArgs;
use super::context::ToolContext;
use super::paths::expand_path;
use super::registry::RegistryBuilder;
use super::schema::{ParamSpec, ToolSchema};

/// Commands the assistant must never launch, whatever the model asks for
const DENIED_COMMANDS: &[&str] = &[
    "rm", "dd", "mkfs", "shutdown", "reboot", "poweroff", "sudo", "su", "chmod", "chown",
    "passwd", "kill", "pkill", "killall", "init", "systemctl", "service", "mount", "umount",
    "fdisk", "parted", "wipefs", "shred",
];

/// Spoken-name aliases mapped to actual executable names
const APP_ALIASES: &[(&str, &str)] = &[
    ("google-chrome", "google-chrome-stable"),
    ("chrome", "google-chrome-stable"),
    ("vscode", "code"),
    ("vs-code", "code"),
    ("visual-studio-code", "code"),
    ("file-manager", "nautilus"),
    ("files", "nautilus"),
    ("terminal", "gnome-terminal"),
    ("calculator", "gnome-calculator"),
    ("calc", "gnome-calculator"),
    ("brave-browser", "brave"),
    ("text-editor", "gedit"),
    ("editor", "gedit"),
    ("music", "rhythmbox"),
    ("video-player", "vlc"),
    ("movies", "vlc"),
];

/// Register all application tools, in fixed order
pub fn register(builder: &mut RegistryBuilder) {
    builder.register(
        ToolSchema::new(
            "open_application",
            "Open an application by name. Examples: Firefox, VS Code, Terminal, Calculator, \
             File Manager.",
            vec![ParamSpec::string("app_name", "Name of the application to open")],
            &["app_name"],
        ),
        Box::new(|args, ctx| Box::pin(open_application(args, ctx))),
    );
    builder.register(
        ToolSchema::new(
            "open_file",
            "Open a file with its default application.",
            vec![ParamSpec::string("path", "Path to the file to open")],
            &["path"],
        ),
        Box::new(|args, ctx| Box::pin(open_file(args, ctx))),
    );
    builder.register(
        ToolSchema::new(
            "open_url",
            "Open a URL in the default web browser.",
            vec![ParamSpec::string("url", "URL to open (e.g., github.com, google.com)")],
            &["url"],
        ),
        Box::new(|args, ctx| Box::pin(open_url(args, ctx))),
    );
}

/// Whether a resolved command name is safe to launch
fn is_denied(name: &str) -> bool {
    DENIED_COMMANDS.contains(&name.to_lowercase().as_str())
}

/// Apply the alias table to a spoken app name
fn apply_alias(name: &str) -> String {
    APP_ALIASES
        .iter()
        .find(|(alias, _)| *alias == name)
        .map_or_else(|| name.to_string(), |(_, target)| (*target).to_string())
}

/// Resolve an app name to an executable path, trying the spoken-name
/// variations people (and models) produce
fn find_app_executable(app_name: &str) -> Option<std::path::PathBuf> {
    let normalized = app_name.to_lowercase().replace(' ', "-");
    let aliased = apply_alias(&normalized);

    let variants = [
        aliased.clone(),
        aliased.replace('-', "_"),
        aliased.replace('-', ""),
        aliased.replace('_', "-"),
    ];
    for variant in &variants {
        if is_denied(variant) {
            continue;
        }
        if let Ok(path) = which::which(variant) {
            return Some(path);
        }
    }
    None
}

/// Spawn a program detached: no inherited stdio, no waiting
fn spawn_detached(program: &OsStr, arg: Option<&OsStr>) -> std::io::Result<()> {
    let mut cmd = std::process::Command::new(program);
    if let Some(arg) = arg {
        cmd.arg(arg);
    }
    cmd.stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(drop)
}

/// Open a target (file path or URL) via the OS default-handler mechanism.
/// Returns a user-facing message on failure.
pub(crate) fn open_with_default_handler(target: &OsStr) -> std::result::Result<(), String> {
    match spawn_detached(OsStr::new("xdg-open"), Some(target)) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            Err("Could not open file: xdg-open not found. Are you on Linux?".to_string())
        }
        Err(err) => Err(format!("Failed to open file: {err}")),
    }
}

async fn open_application(args: ToolArgs, ctx: Arc<ToolContext>) -> Result<String> {
    let app_name = args.str("app_name").unwrap_or_default().trim().to_string();
    if app_name.is_empty() {
        return Ok("Please specify an application name.".to_string());
    }

    if let Some(path) = find_app_executable(&app_name) {
        return match spawn_detached(path.as_os_str(), None) {
            Ok(()) => {
                info!(app = %app_name, path = %path.display(), "opened application");
                Ok(format!("Opened {app_name}."))
            }
            Err(err) => Ok(format!("Failed to open {app_name}: {err}")),
        };
    }

    // Fall back to desktop launchers for apps that only ship a .desktop file
    let launcher_name = app_name.to_lowercase().replace(' ', "-");
    if !is_denied(&launcher_name) && gtk_launch(&launcher_name, &ctx).await {
        info!(app = %app_name, "opened application via gtk-launch");
        return Ok(format!("Opened {app_name}."));
    }

    Ok(format!(
        "Could not find application: {app_name}. Make sure it's installed."
    ))
}

/// Try `gtk-launch <name>`, bounded by the subprocess timeout
async fn gtk_launch(name: &str, ctx: &ToolContext) -> bool {
    let child = tokio::process::Command::new("gtk-launch")
        .arg(name)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn();
    let Ok(mut child) = child else {
        debug!("gtk-launch not found");
        return false;
    };
    match tokio::time::timeout(ctx.subprocess_timeout, child.wait()).await {
        Ok(Ok(status)) => status.success(),
        Ok(Err(err)) => {
            debug!(error = %err, "gtk-launch error");
            false
        }
        Err(_) => {
            debug!("gtk-launch timed out");
            false
        }
    }
}

async fn open_file(args: ToolArgs, ctx: Arc<ToolContext>) -> Result<String> {
    let raw_path = args.str("path").unwrap_or_default().trim().to_string();
    if raw_path.is_empty() {
        return Ok("Please specify a file path.".to_string());
    }

    let target = expand_path(&raw_path, &ctx.home);
    if !target.exists() {
        return Ok(format!(
            "File not found: {raw_path}. Hint: Use the exact path from find_files."
        ));
    }

    match open_with_default_handler(target.as_os_str()) {
        Ok(()) => {
            let name = target
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| raw_path.clone());
            info!(path = %target.display(), "opened file");
            Ok(format!("Successfully opened {name}."))
        }
        Err(message) => Ok(message),
    }
}

async fn open_url(args: ToolArgs, _ctx: Arc<ToolContext>) -> Result<String> {
    let raw = args.str("url").unwrap_or_default().trim().to_string();
    if raw.is_empty() {
        return Ok("Please specify a URL.".to_string());
    }

    let url = match normalize_url(&raw) {
        Ok(url) => url,
        Err(message) => return Ok(message),
    };

    match spawn_detached(OsStr::new("xdg-open"), Some(OsStr::new(&url))) {
        Ok(()) => {
            info!(url = %url, "opened URL");
            Ok(format!("Opened {url} in browser."))
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            Ok("Could not open URL: xdg-open not found. Are you on Linux?".to_string())
        }
        Err(err) => Ok(format!("Failed to open URL: {err}")),
    }
}

/// Fix up and validate a spoken URL. Rejects shell metacharacters before
/// anything else: the string ends up as a process argument and there is no
/// reason a legitimate web address carries them.
fn normalize_url(raw: &str) -> std::result::Result<String, String> {
    if raw
        .chars()
        .any(|c| matches!(c, ';' | '|' | '&' | '$' | '`' | '\n' | '\r' | ' '))
    {
        return Err("Invalid URL: contains unsafe characters.".to_string());
    }

    let with_scheme = if raw.starts_with("http://") || raw.starts_with("https://") {
        raw.to_string()
    } else if raw.starts_with("www.") || raw.contains('.') {
        format!("https://{raw}")
    } else {
        return Err(format!("Invalid URL: {raw}. Please provide a valid web address."));
    };

    match url::Url::parse(&with_scheme) {
        Ok(parsed) if parsed.host_str().is_some() => Ok(with_scheme),
        _ => Err(format!("Invalid URL: {raw}. Please provide a valid web address.")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn denylist_blocks_destructive_commands() {
        assert!(is_denied("rm"));
        assert!(is_denied("SUDO"));
        assert!(is_denied("shutdown"));
        assert!(!is_denied("firefox"));
        assert!(!is_denied("gnome-calculator"));
    }

    #[test]
    fn aliases_map_spoken_names() {
        assert_eq!(apply_alias("chrome"), "google-chrome-stable");
        assert_eq!(apply_alias("terminal"), "gnome-terminal");
        assert_eq!(apply_alias("vscode"), "code");
        assert_eq!(apply_alias("firefox"), "firefox");
    }

    #[test]
    fn denied_names_never_resolve() {
        // "rm" exists on every Unix PATH; resolution must still refuse it
        assert!(find_app_executable("rm").is_none());
        assert!(find_app_executable("sudo").is_none());
    }

    #[test]
    fn url_normalization() {
        assert_eq!(normalize_url("github.com").unwrap(), "https://github.com");
        assert_eq!(
            normalize_url("www.example.org").unwrap(),
            "https://www.example.org"
        );
        assert_eq!(
            normalize_url("https://example.org/a").unwrap(),
            "https://example.org/a"
        );
    }

    #[test]
    fn url_rejects_shell_metacharacters() {
        for bad in ["example.com;rm", "a.com|b", "a.com&b", "a.com`id`", "a.com$HOME"] {
            let err = normalize_url(bad).unwrap_err();
            assert!(err.contains("unsafe characters"), "{bad}");
        }
    }

    #[test]
    fn url_rejects_non_domains() {
        let err = normalize_url("not-a-url").unwrap_err();
        assert!(err.contains("valid web address"));
    }
}
