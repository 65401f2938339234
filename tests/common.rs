//! Shared helpers for command line integration tests.

use anyhow::{Result, bail};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

/// Returns path to the compiled codeexplain binary.
pub fn binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_codeexplain"))
}

/// Writes file into directory, creating parent directories as needed.
///
/// # Errors
///
/// Returns error if directory creation or file write fails
pub fn write_file(dir: &Path, name: &str, content: &str) -> Result<PathBuf> {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, content)?;
    Ok(path)
}

/// Runs the binary with arguments and optional standard input.
///
/// The debug environment variable is cleared so tests control debug mode
/// through arguments only.
///
/// # Errors
///
/// Returns error if the process cannot be spawned or exits unsuccessfully
pub fn run(args: &[&str], stdin: Option<&str>) -> Result<Output> {
    let mut child = Command::new(binary())
        .args(args)
        .env_remove("EXPLAINCODE_DEBUG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    {
        let mut pipe = child.stdin.take().expect("Child stdin should be piped");
        if let Some(input) = stdin {
            pipe.write_all(input.as_bytes())?;
        }
    }

    let output = child.wait_with_output()?;
    if !output.status.success() {
        bail!(
            "codeexplain failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
    }

    Ok(output)
}
