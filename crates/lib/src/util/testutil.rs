//! Test utilities for tcgpack-lib.
//!
//! Cross-platform helpers producing [`CommandSpec`]s for tests that drive real
//! subprocesses.

use crate::execute::CommandSpec;

/// Returns a command that runs `script` through the platform shell.
#[cfg(unix)]
pub fn shell_cmd(script: &str) -> CommandSpec {
  CommandSpec::new("/bin/sh").args(["-c", script])
}

#[cfg(windows)]
pub fn shell_cmd(script: &str) -> CommandSpec {
  CommandSpec::new("cmd.exe").args(["/C", script])
}

/// Returns a command that exits with `code`.
pub fn exit_with(code: i32) -> CommandSpec {
  shell_cmd(&format!("exit {}", code))
}

/// Returns a command that creates an empty marker file in the current directory.
#[cfg(unix)]
pub fn touch_file(filename: &str) -> CommandSpec {
  shell_cmd(&format!("touch '{}'", filename))
}

#[cfg(windows)]
pub fn touch_file(filename: &str) -> CommandSpec {
  CommandSpec::new("powershell.exe").args([
    "-NoProfile".to_string(),
    "-Command".to_string(),
    format!("New-Item -ItemType File -Path '{}' -Force | Out-Null", filename),
  ])
}

/// Returns a command whose program does not exist, so launching it fails.
pub fn missing_program() -> CommandSpec {
  CommandSpec::new("/nonexistent/tcgpack-missing-tool")
}
