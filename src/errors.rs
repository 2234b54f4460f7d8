//! Error taxonomy for a manifest run.
//!
//! Every variant here is fatal to the run: temporaries are discarded and no
//! manifest is promoted. An unlistable subdirectory is only an error in
//! strict mode; the default walk records it and continues.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ManifestError {
    /// Bad root argument; reported before any filesystem scan.
    #[error("invalid target directory `{path}`: {reason}")]
    InvalidPath { path: String, reason: String },

    /// A required external hashing tool is not on PATH.
    #[error("required hashing tool `{tool}` not found on PATH")]
    PrerequisiteMissing { tool: String },

    /// A subdirectory could not be listed (strict mode only).
    #[error("cannot list directory `{}`: {source}", path.display())]
    EnumerationAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A hasher failed for one file. No partial manifest is acceptable, so
    /// this aborts the whole run; the offending relative path is carried
    /// for diagnosis.
    #[error("{tool} failed on `{path}`: {detail}")]
    HashTool {
        tool: String,
        path: String,
        detail: String,
    },

    /// Post-write line count does not match the expected file count.
    #[error("{algorithm} manifest has {actual} lines, expected {expected}")]
    ManifestIntegrity {
        algorithm: String,
        expected: usize,
        actual: usize,
    },
}
