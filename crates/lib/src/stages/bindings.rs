//! Binding generation stage.
//!
//! The generator is an opaque capability: a no-argument operation that writes the
//! binding definitions somewhere the packaging backend will pick them up, or fails.

use std::future::Future;
use std::path::PathBuf;

use thiserror::Error;
use tracing::{error, info};

use crate::config::ProjectConfig;
use crate::execute::{CommandSpec, ExecuteError, inherited_env, run_fallback};

/// Errors raised by a binding generator.
#[derive(Debug, Error)]
pub enum GenerateError {
  /// The generator reported a failure of its own.
  #[error("{0}")]
  Failed(String),

  /// The generator command could not be run or exited non-zero.
  #[error(transparent)]
  Command(#[from] ExecuteError),
}

/// Something that can produce the binding definitions.
pub trait BindingGenerator {
  fn generate(&self) -> impl Future<Output = Result<(), GenerateError>>;
}

/// Generator that runs an external command from the project root.
#[derive(Debug, Clone)]
pub struct CommandGenerator {
  pub cwd: PathBuf,
  pub command: CommandSpec,
}

impl CommandGenerator {
  pub fn from_config(config: &ProjectConfig) -> Self {
    Self {
      cwd: config.root.clone(),
      command: config.file.bindings.command.clone(),
    }
  }
}

impl BindingGenerator for CommandGenerator {
  async fn generate(&self) -> Result<(), GenerateError> {
    run_fallback(
      "generate binding definitions",
      &self.cwd,
      &inherited_env(),
      std::slice::from_ref(&self.command),
    )
    .await?;
    Ok(())
  }
}

/// Run the generator, reporting and returning any failure unchanged.
///
/// On failure the debug representation of the error is printed to stdout before
/// it is returned, so the operator sees it next to the generator's own output.
pub async fn generate_bindings<G: BindingGenerator>(generator: &G) -> Result<(), GenerateError> {
  match generator.generate().await {
    Ok(()) => {
      info!("binding definitions generated");
      Ok(())
    }
    Err(e) => {
      println!("{:?}", e);
      error!(error = %e, "binding generation failed");
      Err(e)
    }
  }
}
