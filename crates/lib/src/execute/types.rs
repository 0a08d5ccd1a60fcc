//! Types for running external build tools.

use std::fmt;

use serde::Deserialize;
use thiserror::Error;

/// A single way to invoke an external tool: program followed by its arguments.
///
/// Deserialises from a non-empty array of strings, e.g. `["./build.sh"]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "Vec<String>")]
pub struct CommandSpec {
  program: String,
  args: Vec<String>,
}

impl CommandSpec {
  pub fn new(program: impl Into<String>) -> Self {
    Self {
      program: program.into(),
      args: Vec::new(),
    }
  }

  /// Append arguments.
  pub fn args<I, S>(mut self, args: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.args.extend(args.into_iter().map(Into::into));
    self
  }

  pub fn program(&self) -> &str {
    &self.program
  }

  pub fn arguments(&self) -> &[String] {
    &self.args
  }
}

impl TryFrom<Vec<String>> for CommandSpec {
  type Error = String;

  fn try_from(mut tokens: Vec<String>) -> Result<Self, Self::Error> {
    if tokens.is_empty() {
      return Err("command must name a program".to_string());
    }
    let program = tokens.remove(0);
    Ok(Self { program, args: tokens })
  }
}

impl fmt::Display for CommandSpec {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.program)?;
    for arg in &self.args {
      write!(f, " {}", arg)?;
    }
    Ok(())
  }
}

/// Why one candidate of a fallback list did not succeed.
#[derive(Debug, Error)]
pub enum CandidateFailure {
  /// The program could not be launched at all (e.g. not found, not executable).
  #[error("{command}: could not be launched: {source}")]
  Unavailable { command: String, source: std::io::Error },

  /// The program ran and exited non-zero, or was killed by a signal.
  #[error("{command}: exited with code {code:?}")]
  Exited { command: String, code: Option<i32> },
}

/// Errors from running external tools.
#[derive(Debug, Error)]
pub enum ExecuteError {
  /// Every candidate for a step failed or was unavailable.
  #[error("unable to {step} ({} candidate(s) failed)", attempts.len())]
  ToolFailed { step: String, attempts: Vec<CandidateFailure> },

  /// A step was configured without any command to run.
  #[error("no commands configured to {step}")]
  NoCandidates { step: String },
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn command_spec_from_tokens() {
    let spec = CommandSpec::try_from(vec!["make".to_string(), "-j4".to_string()]).unwrap();

    assert_eq!(spec.program(), "make");
    assert_eq!(spec.arguments(), &["-j4".to_string()]);
    assert_eq!(spec.to_string(), "make -j4");
  }

  #[test]
  fn empty_command_spec_is_rejected() {
    assert!(CommandSpec::try_from(Vec::new()).is_err());
  }

  #[test]
  fn tool_failed_names_the_step() {
    let err = ExecuteError::ToolFailed {
      step: "build libtcg".to_string(),
      attempts: vec![CandidateFailure::Exited {
        command: "./build.sh".to_string(),
        code: Some(2),
      }],
    };

    assert_eq!(err.to_string(), "unable to build libtcg (1 candidate(s) failed)");
  }
}
