use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all Multisource operations.
#[derive(Debug, Error, Diagnostic)]
pub enum MultisourceError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or malformed project manifest (e.g. Multisource.toml).
    #[error("Manifest error: {message}")]
    #[diagnostic(help("Check your Multisource.toml for syntax errors"))]
    Manifest { message: String },

    /// A unit's ancestor chain loops back onto itself.
    #[error("Circular dependency detected: {chain}")]
    #[diagnostic(help("Remove one of the parent links in the chain"))]
    CircularDependency { chain: String },

    /// A unit name was referenced but never declared.
    #[error("Unknown unit: {name}")]
    #[diagnostic(help("Declare the unit before using it as a parent"))]
    UnknownUnit { name: String },

    /// Reading or writing a zip archive failed.
    #[error("Archive error: {message}")]
    Archive { message: String },

    /// A nested jar has no `META-INF/MANIFEST.MF`.
    #[error("Missing manifest in nested jar: {path}")]
    MissingManifest { path: String },

    /// The resolved dependency graph could not be turned into nested artifacts.
    #[error("Resolution error: {message}")]
    Resolution { message: String },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}

/// Convenience alias for `miette::Result<T>`.
pub type MultisourceResult<T> = miette::Result<T>;
