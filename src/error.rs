//! Fatal errors. Anything reported here ends the run; per-schema degradations
//! go through [`crate::diagnostics::DiagnosticSink`] instead.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read OpenAPI document '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse OpenAPI document '{}' {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// Only OpenAPI 3.x documents are understood.
    #[error("unsupported OpenAPI version '{version}' in '{}' (expected 3.x)", path.display())]
    UnsupportedVersion { path: PathBuf, version: String },

    #[error("failed to create output directory '{}': {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write output file '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
