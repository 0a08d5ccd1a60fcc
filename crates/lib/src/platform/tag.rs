//! Wheel platform tags.
//!
//! Linux wheels are always tagged against the `manylinux1` baseline instead of
//! the build host's own identity. Linux builds are expected to happen on a
//! baseline-compatible machine; nothing here checks that. Every other platform
//! uses its identifier with `.` and `-` normalised to `_`.

use crate::consts::{MANYLINUX_PREFIX, PLAT_NAME_FLAG};

/// Replace every `.` and `-` with `_`.
pub fn normalize_tag(identifier: &str) -> String {
  identifier.replace(['.', '-'], "_")
}

/// Resolve the wheel platform tag for a raw platform identifier.
///
/// `machine` is only consulted for Linux-family identifiers.
pub fn resolve_platform_tag(identifier: &str, machine: &str) -> String {
  if identifier.contains("linux") {
    format!("{}{}", MANYLINUX_PREFIX, machine)
  } else {
    normalize_tag(identifier)
  }
}

/// Whether `args` already select a platform tag explicitly.
pub fn has_plat_name(args: &[String]) -> bool {
  args.iter().any(|arg| {
    arg == PLAT_NAME_FLAG
      || arg
        .strip_prefix(PLAT_NAME_FLAG)
        .is_some_and(|rest| rest.starts_with('='))
  })
}

/// Append `--plat-name <tag>` to `args` unless the caller already chose one.
///
/// Returns `true` if arguments were appended.
pub fn inject_plat_name(args: &mut Vec<String>, identifier: &str, machine: &str) -> bool {
  if has_plat_name(args) {
    return false;
  }
  args.push(PLAT_NAME_FLAG.to_string());
  args.push(resolve_platform_tag(identifier, machine));
  true
}
