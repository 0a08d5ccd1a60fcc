//! Artifact cleanup stage.

use tracing::info;

use crate::config::ProjectConfig;
use crate::util::fs::remove_tree_quiet;

/// Remove the generated library and header directories so a source distribution
/// never bundles build products.
///
/// Missing directories count as already clean; this stage never fails.
pub fn clean_artifacts(config: &ProjectConfig) {
  let removed = [config.lib_dir(), config.include_dir()]
    .iter()
    .filter(|dir| remove_tree_quiet(dir))
    .count();

  info!(removed, "artifact directories cleaned");
}
