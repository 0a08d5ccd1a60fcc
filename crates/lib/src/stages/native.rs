//! Native library build stage.

use tracing::info;

use crate::config::ProjectConfig;
use crate::execute::{ExecuteError, build_flags, inherited_env, overlay_env, run_fallback};

/// Compile the native library.
///
/// Runs the configured build candidates from the native source root with the
/// build-control flags forced on over a copy of the inherited environment.
///
/// # Errors
///
/// Propagates the runner's error unchanged, e.g. `unable to build libtcg`.
pub async fn build_native(config: &ProjectConfig) -> Result<(), ExecuteError> {
  let native = &config.file.native;
  let cwd = config.native_root();
  let env = overlay_env(&inherited_env(), &build_flags(native.env_flags.iter().cloned()));
  let step = format!("build {}", native.name);

  let index = run_fallback(&step, &cwd, &env, &native.build_commands).await?;
  info!(library = %native.name, command = %native.build_commands[index], "native build complete");

  Ok(())
}
