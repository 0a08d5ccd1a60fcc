//! Pipeline stages.
//!
//! Each stage is one unit of work a lifecycle hook runs before delegating to the
//! packaging backend. A stage either completes or aborts the hook; there is no
//! retry and no rollback of partially completed work.
//!
//! - [`native`]: compile the native library with its own build tool
//! - [`bindings`]: generate the foreign-function binding definitions
//! - [`cleanup`]: remove generated libraries and headers
//! - [`curate`]: mirror an allow-listed subset of the native sources

pub mod bindings;
pub mod cleanup;
pub mod curate;
pub mod native;

use std::fmt;

pub use bindings::{BindingGenerator, CommandGenerator, GenerateError, generate_bindings};
pub use cleanup::clean_artifacts;
pub use curate::{CurateError, curate_sources};
pub use native::build_native;

/// A named unit of pipeline work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
  NativeBuild,
  GenerateBindings,
  CleanArtifacts,
  CurateSources,
}

impl Stage {
  /// Short identifier used in structured logs.
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::NativeBuild => "native-build",
      Self::GenerateBindings => "generate-bindings",
      Self::CleanArtifacts => "clean-artifacts",
      Self::CurateSources => "curate-sources",
    }
  }

  /// Progress message shown when the stage starts.
  pub fn message(&self) -> &'static str {
    match self {
      Self::NativeBuild => "Building native library",
      Self::GenerateBindings => "Creating binding definitions",
      Self::CleanArtifacts => "Removing binaries",
      Self::CurateSources => "Copying native sources",
    }
  }
}

impl fmt::Display for Stage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}
