//! Project configuration.
//!
//! The project is described by an optional `tcgpack.toml` at its root. Every field
//! defaults to the layout of the pytcg checkout, so a missing file is valid:
//!
//! ```toml
//! [native]
//! source_dir = "libtcg"
//! name = "libtcg"
//! build_commands = [["./build.sh"]]
//! env_flags = ["MULTIARCH", "DEBUG"]
//!
//! [bindings]
//! command = ["python", "-c", "import gen_cffi; gen_cffi.doit()"]
//!
//! [artifacts]
//! lib_dir = "pyvex/lib"
//! include_dir = "pyvex/include"
//!
//! [sdist]
//! mirror_dir = "vex"
//! sources = ["LICENSE.GPL", "pub/*.h", "priv/*.c"]
//!
//! [backend]
//! command = ["python", "setup.py"]
//! develop = true
//! ```
//!
//! Relative paths are joined onto the project root, which is resolved once at
//! startup and carried by [`ProjectConfig`].

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::consts::{CONFIG_FILE, PROJECT_ENV};
use crate::execute::CommandSpec;

/// Errors that can occur while locating or loading the project configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to resolve project root {}: {source}", path.display())]
  Root { path: PathBuf, source: std::io::Error },

  #[error("failed to read {}: {source}", path.display())]
  Read { path: PathBuf, source: std::io::Error },

  #[error("invalid configuration in {}: {source}", path.display())]
  Parse { path: PathBuf, source: toml::de::Error },
}

/// Settings for the native library build.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NativeSettings {
  /// Native library source root, relative to the project root.
  #[serde(default = "default_native_source_dir")]
  pub source_dir: PathBuf,
  /// Logical name of the library, used in failure messages.
  #[serde(default = "default_native_name")]
  pub name: String,
  /// Alternative ways to invoke the native build, tried in order.
  #[serde(default = "default_build_commands")]
  pub build_commands: Vec<CommandSpec>,
  /// Build-control flags forced on for the native build.
  #[serde(default = "default_env_flags")]
  pub env_flags: Vec<String>,
}

/// Settings for the binding generator.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BindingSettings {
  /// Command performing binding generation, run from the project root.
  #[serde(default = "default_bindings_command")]
  pub command: CommandSpec,
}

/// Generated output directories removed before a source distribution.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArtifactSettings {
  #[serde(default = "default_lib_dir")]
  pub lib_dir: PathBuf,
  #[serde(default = "default_include_dir")]
  pub include_dir: PathBuf,
}

/// Source curation for source distributions.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SdistSettings {
  /// Packaging-local mirror of the native sources, relative to the project root.
  #[serde(default = "default_mirror_dir")]
  pub mirror_dir: PathBuf,
  /// Allow-listed glob patterns, relative to the native source root.
  #[serde(default = "default_sources")]
  pub sources: Vec<String>,
}

/// The standard packaging behaviour hooks delegate to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BackendSettings {
  /// Backend invocation; the hook name and pass-through arguments are appended.
  #[serde(default = "default_backend_command")]
  pub command: CommandSpec,
  /// Whether the backend provides the developer-install extension point.
  #[serde(default = "default_develop")]
  pub develop: bool,
}

/// Contents of `tcgpack.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
  #[serde(default)]
  pub native: NativeSettings,
  #[serde(default)]
  pub bindings: BindingSettings,
  #[serde(default)]
  pub artifacts: ArtifactSettings,
  #[serde(default)]
  pub sdist: SdistSettings,
  #[serde(default)]
  pub backend: BackendSettings,
}

fn default_native_source_dir() -> PathBuf {
  PathBuf::from("libtcg")
}

fn default_native_name() -> String {
  "libtcg".to_string()
}

fn default_build_commands() -> Vec<CommandSpec> {
  vec![CommandSpec::new("./build.sh")]
}

fn default_env_flags() -> Vec<String> {
  vec!["MULTIARCH".to_string(), "DEBUG".to_string()]
}

fn default_bindings_command() -> CommandSpec {
  CommandSpec::new("python").args(["-c", "import gen_cffi; gen_cffi.doit()"])
}

fn default_lib_dir() -> PathBuf {
  PathBuf::from("pyvex").join("lib")
}

fn default_include_dir() -> PathBuf {
  PathBuf::from("pyvex").join("include")
}

fn default_mirror_dir() -> PathBuf {
  PathBuf::from("vex")
}

fn default_sources() -> Vec<String> {
  [
    "LICENSE.GPL",
    "LICENSE.README",
    "Makefile-gcc",
    "Makefile-msvc",
    "common.mk",
    "pub/*.h",
    "priv/*.c",
    "priv/*.h",
    "auxprogs/*.c",
  ]
  .iter()
  .map(|s| s.to_string())
  .collect()
}

fn default_backend_command() -> CommandSpec {
  CommandSpec::new("python").args(["setup.py"])
}

fn default_develop() -> bool {
  true
}

impl Default for NativeSettings {
  fn default() -> Self {
    Self {
      source_dir: default_native_source_dir(),
      name: default_native_name(),
      build_commands: default_build_commands(),
      env_flags: default_env_flags(),
    }
  }
}

impl Default for BindingSettings {
  fn default() -> Self {
    Self {
      command: default_bindings_command(),
    }
  }
}

impl Default for ArtifactSettings {
  fn default() -> Self {
    Self {
      lib_dir: default_lib_dir(),
      include_dir: default_include_dir(),
    }
  }
}

impl Default for SdistSettings {
  fn default() -> Self {
    Self {
      mirror_dir: default_mirror_dir(),
      sources: default_sources(),
    }
  }
}

impl Default for BackendSettings {
  fn default() -> Self {
    Self {
      command: default_backend_command(),
      develop: default_develop(),
    }
  }
}

/// Configuration bound to a resolved project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectConfig {
  /// Canonical project root. All other paths hang off this.
  pub root: PathBuf,
  pub file: ConfigFile,
}

impl ProjectConfig {
  /// Bind an in-memory configuration to a root without touching the filesystem.
  pub fn new(root: impl Into<PathBuf>, file: ConfigFile) -> Self {
    Self {
      root: root.into(),
      file,
    }
  }

  /// Resolve the project root and load `tcgpack.toml` if present.
  pub fn load(root: &Path) -> Result<Self, ConfigError> {
    let root = dunce::canonicalize(root).map_err(|e| ConfigError::Root {
      path: root.to_path_buf(),
      source: e,
    })?;

    let path = root.join(CONFIG_FILE);
    let file = if path.is_file() {
      let content = fs::read_to_string(&path).map_err(|e| ConfigError::Read {
        path: path.clone(),
        source: e,
      })?;
      toml::from_str(&content).map_err(|e| ConfigError::Parse { path, source: e })?
    } else {
      debug!(root = %root.display(), "no {} found, using defaults", CONFIG_FILE);
      ConfigFile::default()
    };

    Ok(Self { root, file })
  }

  /// Native library source root.
  pub fn native_root(&self) -> PathBuf {
    self.root.join(&self.file.native.source_dir)
  }

  /// Compiled-library output directory.
  pub fn lib_dir(&self) -> PathBuf {
    self.root.join(&self.file.artifacts.lib_dir)
  }

  /// Public-header output directory.
  pub fn include_dir(&self) -> PathBuf {
    self.root.join(&self.file.artifacts.include_dir)
  }

  /// Packaging-local mirror of the curated native sources.
  pub fn mirror_root(&self) -> PathBuf {
    self.root.join(&self.file.sdist.mirror_dir)
  }
}

/// Pick the project root: explicit argument, then `TCGPACK_PROJECT`, then the
/// current directory.
pub fn project_root(explicit: Option<&Path>) -> PathBuf {
  if let Some(path) = explicit {
    return path.to_path_buf();
  }
  std::env::var_os(PROJECT_ENV)
    .map(PathBuf::from)
    .unwrap_or_else(|| PathBuf::from("."))
}
