//! Source curation stage.
//!
//! Builds a packaging-local mirror of an allow-listed subset of the native
//! library's sources. The mirror is replaced wholesale on every run so nothing
//! from a previous curation survives.
//!
//! Each pattern is `dir/name-glob` or just `name-glob`. The directory part is
//! taken literally and selects both the source directory and the destination
//! subdirectory; the file-name part is matched with [`globset`]. Matched files are
//! copied by base name only, one directory level deep.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobMatcher};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::ProjectConfig;
use crate::util::fs::{ensure_dir, remove_tree_quiet, resolve_path};

/// Errors that can occur while curating sources.
#[derive(Debug, Error)]
pub enum CurateError {
  /// The mirror would overwrite the real source checkout or the project itself.
  /// This is a programming or configuration error, never retried.
  #[error(
    "contract violation: curation mirror {} overlaps the native sources or the project root",
    path.display()
  )]
  ContractViolation { path: PathBuf },

  #[error("invalid source pattern '{pattern}': {source}")]
  Pattern { pattern: String, source: globset::Error },

  #[error("failed to {action} {}: {source}", path.display())]
  Io {
    action: &'static str,
    path: PathBuf,
    source: io::Error,
  },
}

/// Copy the configured source patterns from the native source root into a fresh
/// mirror.
///
/// # Returns
///
/// The destination path of every copied file, in pattern order.
///
/// # Errors
///
/// Fails before touching anything when the mirror resolves to the native source
/// root, the project root, or an ancestor of either. Otherwise fails on a
/// malformed pattern or any filesystem fault, leaving a partially populated
/// mirror in place.
pub fn curate_sources(config: &ProjectConfig) -> Result<Vec<PathBuf>, CurateError> {
  let source_root = config.native_root();
  let mirror_root = config.mirror_root();

  let resolved_mirror = resolve_path(&mirror_root);
  if resolve_path(&source_root).starts_with(&resolved_mirror)
    || resolve_path(&config.root).starts_with(&resolved_mirror)
  {
    return Err(CurateError::ContractViolation { path: mirror_root });
  }

  remove_tree_quiet(&mirror_root);
  fs::create_dir_all(&mirror_root).map_err(|e| CurateError::Io {
    action: "create directory",
    path: mirror_root.clone(),
    source: e,
  })?;

  let mut copied = Vec::new();

  for pattern in &config.file.sdist.sources {
    let (dir, name) = split_pattern(pattern);
    let dest_dir = mirror_root.join(dir);
    ensure_dir(&dest_dir).map_err(|e| CurateError::Io {
      action: "create directory",
      path: dest_dir.clone(),
      source: e,
    })?;

    let matcher = Glob::new(name)
      .map_err(|e| CurateError::Pattern {
        pattern: pattern.clone(),
        source: e,
      })?
      .compile_matcher();

    for src in expand(&source_root.join(dir), name, &matcher)? {
      let Some(file_name) = src.file_name() else {
        continue;
      };
      let dest = dest_dir.join(file_name);
      fs::copy(&src, &dest).map_err(|e| CurateError::Io {
        action: "copy",
        path: src.clone(),
        source: e,
      })?;
      debug!(from = %src.display(), to = %dest.display(), "copied source");
      copied.push(dest);
    }
  }

  info!(files = copied.len(), mirror = %mirror_root.display(), "native sources curated");
  Ok(copied)
}

/// Split a pattern into its literal directory part and its file-name glob.
fn split_pattern(pattern: &str) -> (&str, &str) {
  pattern.rsplit_once('/').unwrap_or(("", pattern))
}

/// Regular files in `dir` whose name matches, sorted by name.
///
/// A missing directory yields no matches. Dot-files only match patterns that
/// themselves start with a dot.
fn expand(dir: &Path, name_pattern: &str, matcher: &GlobMatcher) -> Result<Vec<PathBuf>, CurateError> {
  let entries = match fs::read_dir(dir) {
    Ok(entries) => entries,
    Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
    Err(e) => {
      return Err(CurateError::Io {
        action: "read directory",
        path: dir.to_path_buf(),
        source: e,
      });
    }
  };

  let include_hidden = name_pattern.starts_with('.');
  let mut matches = Vec::new();

  for entry in entries {
    let entry = entry.map_err(|e| CurateError::Io {
      action: "read directory",
      path: dir.to_path_buf(),
      source: e,
    })?;
    let file_name = entry.file_name();
    let Some(name) = file_name.to_str() else {
      continue;
    };
    if name.starts_with('.') && !include_hidden {
      continue;
    }
    let path = entry.path();
    if matcher.is_match(name) && path.is_file() {
      matches.push(path);
    }
  }

  matches.sort();
  Ok(matches)
}
