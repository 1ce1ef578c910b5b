//! Provisioning error taxonomy.
//!
//! Every failure mode of the provisioning pipeline is surfaced to the
//! immediate caller; only scratch-space *cleanup* failures are swallowed
//! (logged, never propagated). Variants carry `String` reasons rather than
//! source errors so outcomes stay cloneable for the once-per-name cache.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while provisioning a native capability.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProvisionError {
    /// The detected capability flavor is a deprecated tier; never
    /// recoverable, provisioning must abort before any filesystem work.
    #[error("architecture flavor '{flavor}' is unsupported as of 1.2.0")]
    UnsupportedArchitecture { flavor: String },

    /// No candidate resource path yielded bytes. Names the platform
    /// filename that was sought.
    #[error("couldn't find native library {filename} in the resource bundle")]
    LibraryNotFound { filename: String },

    /// Failed to create the scratch directory, write the copied bytes, or
    /// read the source stream. Fatal: no functioning artifact exists on disk.
    #[error("failed to extract native artifact at {path}: {reason}")]
    Extraction { path: PathBuf, reason: String },

    /// The platform dynamic loader rejected the extracted file. The loader
    /// diagnostic is preserved verbatim; it is often the only actionable
    /// information (architecture mismatch, missing transitive dependency).
    #[error("failed to load native library {filename}: {message}")]
    NativeLoad { filename: String, message: String },

    /// An entry point was not found in a loaded artifact.
    #[error("symbol '{symbol}' not found in {filename}")]
    SymbolNotFound { symbol: String, filename: String },

    /// An entry point was requested from an artifact that was never
    /// successfully provisioned in this process.
    #[error("native library '{base_name}' has not been provisioned")]
    NotProvisioned { base_name: String },
}

/// Result type alias for provisioning operations.
pub type ProvisionResult<T> = Result<T, ProvisionError>;
