//! Geoscape (workspace facade crate).
//!
//! Re-exports the member crates so binaries, tests and benches can use
//! `geoscape::{core,term,types}` without naming each crate.

pub use geoscape_core as core;
pub use geoscape_term as term;
pub use geoscape_types as types;
