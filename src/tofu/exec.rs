/*!
Process execution for composed invocations.

One child process per call, awaited to completion. The child's output is
returned verbatim: a non-zero exit is data in `RunOutput`, not an error at
this layer. Only a failure to spawn (missing binary, unreadable working
directory) surfaces as `Err`.

No timeout or cancellation: a hung tofu process hangs the caller, matching
the tool's own interactive behavior (apply/destroy without -auto-approve
block on its confirmation prompt).
*/

use anyhow::{Context, Result};
use tokio::process::Command;

use super::{Invocation, Secrets, TOFU_BIN, TOFU_DIR};

/// Captured result of one tofu run, passed through unmodified.
#[derive(Debug)]
pub struct RunOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl RunOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    fn from_output(output: std::process::Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            // Signal-terminated children have no code; report -1 rather
            // than inventing a tofu exit status.
            exit_code: output.status.code().unwrap_or(-1),
        }
    }
}

/// Run one invocation in the fixed working directory, capturing output.
pub async fn run_async(inv: &Invocation, secrets: &Secrets) -> Result<RunOutput> {
    let output = Command::new(TOFU_BIN)
        .args(inv.args(secrets))
        .current_dir(TOFU_DIR)
        .output()
        .await
        .with_context(|| format!("failed to spawn '{TOFU_BIN} {}' in {TOFU_DIR}/", inv.action()))?;
    Ok(RunOutput::from_output(output))
}

/// Synchronous wrapper for the CLI path: builds a runtime per call, since
/// main stays sync.
pub fn run(inv: &Invocation, secrets: &Secrets) -> Result<RunOutput> {
    let rt = tokio::runtime::Runtime::new().context("failed to create Tokio runtime")?;
    rt.block_on(run_async(inv, secrets))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    fn status(raw: i32) -> std::process::ExitStatus {
        use std::os::unix::process::ExitStatusExt;
        std::process::ExitStatus::from_raw(raw)
    }

    #[cfg(unix)]
    #[test]
    fn output_conversion_preserves_streams_and_code() {
        let out = RunOutput::from_output(std::process::Output {
            status: status(0),
            stdout: b"Plan: 2 to add, 0 to change, 0 to destroy.\n".to_vec(),
            stderr: Vec::new(),
        });
        assert!(out.success());
        assert_eq!(out.exit_code, 0);
        assert!(out.stdout.contains("2 to add"));
        assert!(out.stderr.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn nonzero_exit_is_not_an_error() {
        // Raw wait status 256 == exit code 1 on unix.
        let out = RunOutput::from_output(std::process::Output {
            status: status(256),
            stdout: Vec::new(),
            stderr: b"Error: Missing required argument\n".to_vec(),
        });
        assert!(!out.success());
        assert_eq!(out.exit_code, 1);
        assert!(out.stderr.contains("Missing required argument"));
    }

    #[cfg(unix)]
    #[test]
    fn invalid_utf8_is_replaced_not_rejected() {
        let out = RunOutput::from_output(std::process::Output {
            status: status(0),
            stdout: vec![0x66, 0x6f, 0xff, 0x6f],
            stderr: Vec::new(),
        });
        assert!(out.stdout.contains('\u{FFFD}'));
    }
}
