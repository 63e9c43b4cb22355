//! Nested artifact resolution.
//!
//! Reads an already-resolved dependency graph (a [`snapshot::ResolutionSnapshot`])
//! and decides which module jars get embedded, under which identity, at
//! which version and with which version range.

pub mod conflict;
pub mod nested;
pub mod snapshot;
pub mod version;
