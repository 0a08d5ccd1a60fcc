//! Filesystem helpers shared by the packaging stages.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use tracing::debug;

/// Recursively remove `path`, treating every failure (including absence) as
/// already removed.
///
/// Returns `true` if something was actually deleted.
pub fn remove_tree_quiet(path: &Path) -> bool {
  match fs::remove_dir_all(path) {
    Ok(()) => {
      debug!(path = %path.display(), "removed directory");
      true
    }
    Err(e) => {
      if e.kind() != io::ErrorKind::NotFound {
        debug!(path = %path.display(), error = %e, "ignoring removal failure");
      }
      false
    }
  }
}

/// Create `path` if it is not already a directory. Existing directories are left
/// untouched.
pub fn ensure_dir(path: &Path) -> io::Result<()> {
  if path.is_dir() {
    return Ok(());
  }
  fs::create_dir_all(path)
}

/// Resolve `path` for comparison with other resolved paths.
///
/// Existing paths are canonicalised. For a path that does not exist yet, `.` and
/// `..` are folded lexically and the deepest existing ancestor is canonicalised,
/// so `a/../b` and `b` resolve to the same place either way.
pub fn resolve_path(path: &Path) -> PathBuf {
  if let Ok(resolved) = dunce::canonicalize(path) {
    return resolved;
  }

  let normalized = normalize_lexically(path);
  let mut missing = Vec::new();
  let mut current = normalized.as_path();
  while let (Some(parent), Some(name)) = (current.parent(), current.file_name()) {
    missing.push(name);
    current = parent;
    if let Ok(resolved) = dunce::canonicalize(current) {
      return missing.iter().rev().fold(resolved, |acc, name| acc.join(name));
    }
  }
  normalized
}

/// Fold `.` and `..` components without touching the filesystem.
fn normalize_lexically(path: &Path) -> PathBuf {
  let mut out = PathBuf::new();
  for component in path.components() {
    match component {
      Component::CurDir => {}
      Component::ParentDir => match out.components().next_back() {
        Some(Component::Normal(_)) => {
          out.pop();
        }
        Some(Component::RootDir | Component::Prefix(_)) => {}
        _ => out.push(component),
      },
      other => out.push(other),
    }
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::TempDir;

  #[test]
  fn remove_tree_quiet_on_missing_path() {
    let temp = TempDir::new().unwrap();
    assert!(!remove_tree_quiet(&temp.path().join("missing")));
  }

  #[test]
  fn remove_tree_quiet_removes_nested_content() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("a");
    fs::create_dir_all(dir.join("b")).unwrap();
    fs::write(dir.join("b").join("f"), "x").unwrap();

    assert!(remove_tree_quiet(&dir));
    assert!(!dir.exists());
  }

  #[test]
  fn ensure_dir_keeps_existing_content() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("keep");
    fs::create_dir(&dir).unwrap();
    fs::write(dir.join("f"), "x").unwrap();

    ensure_dir(&dir).unwrap();

    assert_eq!(fs::read_to_string(dir.join("f")).unwrap(), "x");
  }

  #[test]
  fn lexical_normalization_folds_dots() {
    assert_eq!(normalize_lexically(Path::new("a/./b/../c")), PathBuf::from("a/c"));
    assert_eq!(normalize_lexically(Path::new("../a/..")), PathBuf::from(".."));
    assert_eq!(normalize_lexically(Path::new("a/../..")), PathBuf::from(".."));
  }

  #[test]
  fn resolve_path_agrees_for_existing_and_missing_paths() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("src")).unwrap();
    let root = resolve_path(temp.path());

    assert_eq!(resolve_path(&temp.path().join("src/../src")), root.join("src"));
    assert_eq!(resolve_path(&temp.path().join("src/../new")), root.join("new"));
    assert_eq!(resolve_path(&temp.path().join("missing/../src")), root.join("src"));
    assert_eq!(resolve_path(&temp.path().join("")), root);
  }
}
