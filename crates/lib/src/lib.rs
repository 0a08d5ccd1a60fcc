//! tcgpack-lib: build orchestration for the pytcg packaging pipeline
//!
//! This crate sequences the external steps that turn a pytcg checkout into an
//! installable artifact:
//! - `execute`: environment overlay and the command fallback runner
//! - `stages`: native build, binding generation, artifact cleanup, source curation
//! - `platform`: host detection and wheel platform-tag resolution
//! - `lifecycle`: packaging hooks composed from stages, delegating to a backend
//! - `config`: the optional `tcgpack.toml` project configuration

pub mod config;
pub mod consts;
pub mod execute;
pub mod lifecycle;
pub mod platform;
pub mod stages;
pub mod util;
