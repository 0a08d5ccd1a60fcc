//! Running external tools.
//!
//! - [`env`]: environment overlay applied on top of a copy of the inherited environment
//! - [`fallback`]: ordered candidate commands, first success wins

pub mod env;
pub mod fallback;
mod types;

pub use env::{EnvMap, build_flags, inherited_env, overlay_env};
pub use fallback::run_fallback;
pub use types::*;
