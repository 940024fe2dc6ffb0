//! Child process invocation for git commands
//!
//! Two modes: captured (stdout buffered, stderr forwarded live) and
//! inherited (child shares the parent's terminal streams).

use color_eyre::eyre::{Context, Result};
use std::path::Path;
use std::process::{Command, Stdio};
use thiserror::Error;
use tracing::debug;

/// An invoked command that exited non-zero
#[derive(Debug, Error)]
#[error("{command} failed with exit code {code}")]
pub struct ProcessError {
    /// Program name plus its subcommand (e.g. "git checkout")
    pub command: String,
    /// Exit code reported by the child (-1 when killed by a signal)
    pub code: i32,
}

/// Run a command, buffering its stdout and forwarding its stderr live.
///
/// Resolves to the full stdout as a string once the child exits with code 0.
pub fn run_captured(dir: &Path, program: &str, args: &[&str]) -> Result<String> {
    debug!("Running (captured): {} {}", program, args.join(" "));

    let output = Command::new(program)
        .args(args)
        .current_dir(dir)
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .output()
        .with_context(|| format!("Failed to run {}", program))?;

    if !output.status.success() {
        return Err(ProcessError {
            command: command_name(program, args),
            code: output.status.code().unwrap_or(-1),
        }
        .into());
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

/// Run a command with the child sharing this process's stdin/stdout/stderr.
pub fn run_inherited(dir: &Path, program: &str, args: &[&str]) -> Result<()> {
    debug!("Running (inherited): {} {}", program, args.join(" "));

    let status = Command::new(program)
        .args(args)
        .current_dir(dir)
        .status()
        .with_context(|| format!("Failed to run {}", program))?;

    if !status.success() {
        return Err(ProcessError {
            command: command_name(program, args),
            code: status.code().unwrap_or(-1),
        }
        .into());
    }

    Ok(())
}

/// The command as reported in errors: program plus first argument
fn command_name(program: &str, args: &[&str]) -> String {
    match args.first() {
        Some(sub) => format!("{} {}", program, sub),
        None => program.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captured_returns_buffered_stdout() {
        let dir = std::env::temp_dir();
        let output = run_captured(&dir, "sh", &["-c", "printf 'line one\\nline two\\n'"]).unwrap();
        assert_eq!(output, "line one\nline two\n");
    }

    #[test]
    fn captured_failure_carries_command_and_exit_code() {
        let dir = std::env::temp_dir();
        let err = run_captured(&dir, "sh", &["-c", "exit 3"]).unwrap_err();
        let process_err = err.downcast_ref::<ProcessError>().unwrap();
        assert_eq!(process_err.command, "sh -c");
        assert_eq!(process_err.code, 3);
    }

    #[test]
    fn inherited_failure_carries_exit_code() {
        let dir = std::env::temp_dir();
        let err = run_inherited(&dir, "sh", &["-c", "exit 1"]).unwrap_err();
        let process_err = err.downcast_ref::<ProcessError>().unwrap();
        assert_eq!(process_err.code, 1);
    }

    #[test]
    fn inherited_succeeds_on_zero_exit() {
        let dir = std::env::temp_dir();
        assert!(run_inherited(&dir, "sh", &["-c", "exit 0"]).is_ok());
    }
}
