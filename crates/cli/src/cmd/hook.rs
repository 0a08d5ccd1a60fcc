//! Implementation of the lifecycle hook commands (`tcgpack build`, `sdist`, ...).

use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use tcgpack_lib::config::ProjectConfig;
use tcgpack_lib::lifecycle::{Capabilities, CommandBackend, Hook, Lifecycle};
use tcgpack_lib::stages::CommandGenerator;

use crate::output::{format_duration, print_stat, print_success, symbols};

/// Execute a lifecycle hook.
///
/// Loads the project configuration from `root`, runs the hook's stages in order
/// and hands over to the packaging backend. Stages run one at a time on a
/// single-threaded runtime; the first failure aborts the command.
///
/// Prints a summary of the stages run and the backend commands invoked.
pub fn cmd_hook(root: &Path, hook: Hook, args: &[String]) -> Result<()> {
  let config = ProjectConfig::load(root).context("Failed to load project configuration")?;
  debug!(root = %config.root.display(), "project configuration loaded");

  let capabilities = Capabilities::detect(&config);
  let generator = CommandGenerator::from_config(&config);
  let backend = CommandBackend::from_config(&config);
  let lifecycle = Lifecycle::new(config, generator, backend, capabilities);

  let rt = tokio::runtime::Builder::new_current_thread()
    .enable_all()
    .build()
    .context("Failed to create async runtime")?;
  let report = rt
    .block_on(lifecycle.run(hook, args))
    .with_context(|| format!("{} failed", hook))?;

  println!();
  print_success(&format!("{} complete in {}", hook, format_duration(report.elapsed)));
  if !report.stages.is_empty() {
    let separator = format!(" {} ", symbols::ARROW);
    let stages: Vec<_> = report.stages.iter().map(|s| s.as_str()).collect();
    print_stat("Stages", &stages.join(separator.as_str()));
  }
  for (delegated, delegated_args) in &report.delegated {
    let mut invocation = delegated.to_string();
    for arg in delegated_args {
      invocation.push(' ');
      invocation.push_str(arg);
    }
    print_stat("Backend", &invocation);
  }

  Ok(())
}
