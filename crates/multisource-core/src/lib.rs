//! Core data types for Multisource.
//!
//! A project is made of named units ("loader sets"), each bound to a
//! platform and declaring parent units. This crate holds the unit graph and
//! its closure resolution, the naming rules derived from unit names, the
//! configuration builder and its TOML manifest, and the per-unit build plan.
//!
//! This crate does no archive or network I/O.

/// Name of the project manifest file.
pub const MANIFEST_FILE: &str = "Multisource.toml";

pub mod closure;
pub mod loader_set;
pub mod manifest;
pub mod naming;
pub mod plan;
pub mod platform;
pub mod setup;
