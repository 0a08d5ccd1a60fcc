//! The standard packaging behaviour hooks delegate to.

use std::future::Future;
use std::path::PathBuf;

use thiserror::Error;
use tracing::info;

use super::Hook;
use crate::config::ProjectConfig;
use crate::execute::{CommandSpec, ExecuteError, inherited_env, run_fallback};

/// Errors raised by a packaging backend.
#[derive(Debug, Error)]
pub enum BackendError {
  #[error(transparent)]
  Command(#[from] ExecuteError),
}

/// Standard packaging behaviour for a hook (build, sdist, ...), run after the
/// hook's own stages have succeeded.
pub trait PackagingBackend {
  fn run(&self, hook: Hook, args: &[String]) -> impl Future<Output = Result<(), BackendError>>;
}

/// Backend that runs an external packaging command from the project root,
/// appending the hook name and any pass-through arguments.
#[derive(Debug, Clone)]
pub struct CommandBackend {
  pub cwd: PathBuf,
  pub command: CommandSpec,
}

impl CommandBackend {
  pub fn from_config(config: &ProjectConfig) -> Self {
    Self {
      cwd: config.root.clone(),
      command: config.file.backend.command.clone(),
    }
  }

  /// Full invocation for `hook`.
  pub fn invocation(&self, hook: Hook, args: &[String]) -> CommandSpec {
    self
      .command
      .clone()
      .args(std::iter::once(hook.as_str().to_string()).chain(args.iter().cloned()))
  }
}

impl PackagingBackend for CommandBackend {
  async fn run(&self, hook: Hook, args: &[String]) -> Result<(), BackendError> {
    let invocation = self.invocation(hook, args);
    info!(hook = %hook, command = %invocation, "delegating to packaging backend");
    run_fallback(
      &format!("run {}", hook),
      &self.cwd,
      &inherited_env(),
      std::slice::from_ref(&invocation),
    )
    .await?;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::TempDir;

  #[test]
  fn invocation_appends_hook_and_args() {
    let backend = CommandBackend {
      cwd: PathBuf::from("."),
      command: CommandSpec::new("python").args(["setup.py"]),
    };

    let invocation = backend.invocation(Hook::BdistWheel, &["--plat-name".to_string(), "x".to_string()]);

    assert_eq!(invocation.to_string(), "python setup.py bdist_wheel --plat-name x");
  }

  #[tokio::test]
  #[cfg(unix)]
  async fn failing_backend_names_the_hook() {
    let temp = TempDir::new().unwrap();
    let backend = CommandBackend {
      cwd: temp.path().to_path_buf(),
      command: crate::util::testutil::shell_cmd("exit 1"),
    };

    let err = backend.run(Hook::Sdist, &[]).await.unwrap_err();

    assert!(err.to_string().starts_with("unable to run sdist"));
  }

  #[tokio::test]
  #[cfg(unix)]
  async fn backend_receives_hook_name() {
    let temp = TempDir::new().unwrap();
    let backend = CommandBackend {
      cwd: temp.path().to_path_buf(),
      command: CommandSpec::new("/bin/sh").args(["-c", "echo \"$@\" > backend.log", "backend"]),
    };

    backend.run(Hook::Build, &["--force".to_string()]).await.unwrap();

    let log = std::fs::read_to_string(temp.path().join("backend.log")).unwrap();
    assert_eq!(log.trim(), "build --force");
  }
}
