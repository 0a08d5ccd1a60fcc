//! Environment overlay for external builds.
//!
//! The inherited environment is snapshotted into an owned map and the overlay is
//! applied to a copy, so the process environment is never touched and no state
//! leaks from one stage to the next.

use std::collections::BTreeMap;
use std::ffi::OsString;

use crate::consts::FLAG_ENABLED;

/// Environment passed to a child process, in full.
pub type EnvMap = BTreeMap<OsString, OsString>;

/// Snapshot the current process environment.
pub fn inherited_env() -> EnvMap {
  std::env::vars_os().collect()
}

/// Build the flag overlay: every named flag forced to the enabled value.
pub fn build_flags<I, S>(names: I) -> BTreeMap<String, String>
where
  I: IntoIterator<Item = S>,
  S: Into<String>,
{
  names
    .into_iter()
    .map(|name| (name.into(), FLAG_ENABLED.to_string()))
    .collect()
}

/// Return a copy of `inherited` with `overlay` applied on top.
///
/// Overlay keys always win; every other key passes through unchanged.
pub fn overlay_env(inherited: &EnvMap, overlay: &BTreeMap<String, String>) -> EnvMap {
  let mut env = inherited.clone();
  env.extend(
    overlay
      .iter()
      .map(|(key, value)| (OsString::from(key), OsString::from(value))),
  );
  env
}
