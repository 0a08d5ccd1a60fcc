//! Command fallback runner.
//!
//! Runs an ordered list of alternative commands for one logical step and stops at
//! the first one that exits successfully.

use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, info, warn};

use super::env::EnvMap;
use super::types::{CandidateFailure, CommandSpec, ExecuteError};

/// Run `candidates` in order until one exits with status zero.
///
/// Each candidate runs in `cwd` with exactly `env` as its environment. Output is
/// inherited, so the operator sees the tool's own stdout/stderr. A candidate that
/// cannot be launched counts as failed and the next one is tried.
///
/// # Returns
///
/// The index of the candidate that succeeded. Later candidates are never run.
///
/// # Errors
///
/// [`ExecuteError::ToolFailed`] naming `step` once every candidate has been
/// attempted, or [`ExecuteError::NoCandidates`] for an empty list.
pub async fn run_fallback(
  step: &str,
  cwd: &Path,
  env: &EnvMap,
  candidates: &[CommandSpec],
) -> Result<usize, ExecuteError> {
  if candidates.is_empty() {
    return Err(ExecuteError::NoCandidates { step: step.to_string() });
  }

  let mut attempts = Vec::with_capacity(candidates.len());

  for (index, candidate) in candidates.iter().enumerate() {
    debug!(step, command = %candidate, cwd = %cwd.display(), "spawning candidate");

    let status = Command::new(candidate.program())
      .args(candidate.arguments())
      .current_dir(cwd)
      .env_clear()
      .envs(env)
      .stdin(Stdio::inherit())
      .stdout(Stdio::inherit())
      .stderr(Stdio::inherit())
      .status()
      .await;

    match status {
      Ok(status) if status.success() => {
        info!(step, command = %candidate, "candidate succeeded");
        return Ok(index);
      }
      Ok(status) => {
        warn!(step, command = %candidate, code = ?status.code(), "candidate failed");
        attempts.push(CandidateFailure::Exited {
          command: candidate.to_string(),
          code: status.code(),
        });
      }
      Err(e) => {
        warn!(step, command = %candidate, error = %e, "candidate unavailable");
        attempts.push(CandidateFailure::Unavailable {
          command: candidate.to_string(),
          source: e,
        });
      }
    }
  }

  Err(ExecuteError::ToolFailed {
    step: step.to_string(),
    attempts,
  })
}
