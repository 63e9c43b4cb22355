//! Shared utilities for Multisource.
//!
//! Cross-cutting concerns used by the other crates in the workspace:
//! the error type, filesystem helpers, hashing, and terminal status lines.

pub mod errors;
pub mod fs;
pub mod hash;
pub mod progress;
