//! Bounded subprocess probes
//!
//! Telemetry tools shell out to whatever diagnostic binaries the host has
//! (`df`, `nmcli`, `nvidia-smi`, ...). Every probe is bounded by a timeout
//! and collapses to `None` on any failure; the calling tool decides what
//! "unavailable" sounds like.

use std::process::Stdio;
use std::time::Duration;

use tracing::debug;

/// Run a command and capture stdout. `None` on spawn failure, non-zero
/// exit, or timeout.
pub(crate) async fn run_probe(program: &str, args: &[&str], timeout: Duration) -> Option<String> {
    let child = tokio::process::Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        // A timed-out probe must not leave a wedged child behind
        .kill_on_drop(true)
        .spawn();

    let child = match child {
        Ok(child) => child,
        Err(err) => {
            debug!(program, error = %err, "probe spawn failed");
            return None;
        }
    };

    let output = match tokio::time::timeout(timeout, child.wait_with_output()).await {
        Ok(Ok(output)) => output,
        Ok(Err(err)) => {
            debug!(program, error = %err, "probe wait failed");
            return None;
        }
        Err(_) => {
            debug!(program, "probe timed out");
            return None;
        }
    };

    if !output.status.success() {
        debug!(program, status = %output.status, "probe exited non-zero");
        return None;
    }
    Some(String::from_utf8_lossy(&output.stdout).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_binary_is_none() {
        let out = run_probe("definitely-not-a-binary", &[], Duration::from_secs(1)).await;
        assert!(out.is_none());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn captures_stdout() {
        let out = run_probe("echo", &["hello"], Duration::from_secs(5)).await;
        assert_eq!(out.unwrap().trim(), "hello");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn non_zero_exit_is_none() {
        let out = run_probe("false", &[], Duration::from_secs(5)).await;
        assert!(out.is_none());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn timeout_is_none_and_returns_promptly() {
        let started = std::time::Instant::now();
        let out = run_probe("sleep", &["30"], Duration::from_millis(100)).await;
        assert!(out.is_none());
        // The probe gives up at the timeout instead of waiting the child out
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
