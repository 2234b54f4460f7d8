//! Public and internal types for the twinsum API and pipeline.

use std::path::PathBuf;

use crate::utils::config::ManifestDefaults;

/// Sentinel extension for files without one.
pub const NO_EXTENSION: &str = "<none>";

/// One eligible file discovered during enumeration. Immutable once built,
/// discarded after the run.
#[derive(Clone, Debug)]
pub struct FileEntry {
    /// Absolute path on disk.
    pub abs_path: PathBuf,
    /// Path relative to the scan root, forward-slash normalized.
    pub rel_path: String,
    /// Lower-cased extension, or [`NO_EXTENSION`] when the name has none.
    pub ext: String,
    /// Case-insensitive ordering key (lower-cased full path).
    pub sort_key: String,
}

/// Terminal state of a run. `Empty` and `Aborted` are distinct non-error
/// outcomes: nothing was written, and the process still exits zero.
#[derive(Debug)]
pub enum RunOutcome {
    /// Both manifests verified and promoted.
    Written(RunSummary),
    /// Zero eligible files under the root; no manifests written.
    Empty { root: PathBuf },
    /// User declined the confirmation; no filesystem writes.
    Aborted,
}

/// Reported on success: resolved root, file count, scan mode, and the two
/// final manifest paths in algorithm order.
#[derive(Clone, Debug)]
pub struct RunSummary {
    pub root: PathBuf,
    pub file_count: usize,
    pub recursive: bool,
    pub manifest_paths: [PathBuf; 2],
}

/// Lib-only options for [`manifest_dir`](crate::manifest_dir). Only the
/// fields that apply when using the crate (no prompt, no config file).
#[derive(Clone, Debug, Default)]
pub struct ManifestOpts {
    /// Manifest base name. When None, uses the package default (`CHECKSUMS`).
    pub base: Option<String>,
    /// Recurse into subdirectories.
    pub recursive: bool,
    /// Hash in-process instead of invoking the external tools.
    pub builtin: bool,
    /// Fail on the first unlistable directory instead of skipping it.
    pub strict: bool,
}

impl From<&ManifestOpts> for Opts {
    fn from(o: &ManifestOpts) -> Self {
        Opts {
            base: o
                .base
                .clone()
                .unwrap_or_else(|| ManifestDefaults::BASE_NAME.to_string()),
            recursive: o.recursive,
            // Lib callers have no prompt to answer.
            force: true,
            verbose: false,
            builtin: o.builtin,
            strict: o.strict,
        }
    }
}

/// Full options (CLI). Use [`ManifestOpts`] for lib.
#[derive(Clone, Debug)]
pub struct Opts {
    /// Manifest base name; manifests land at `<root>/<base>.<ext>`.
    pub base: String,
    /// Recurse into subdirectories. Default off: immediate children only.
    pub recursive: bool,
    /// Skip the confirmation prompt.
    pub force: bool,
    /// Debug logging plus a progress counter over the hashing loop.
    pub verbose: bool,
    /// Hash in-process instead of invoking the external tools.
    pub builtin: bool,
    /// Strict mode: fail on the first unlistable directory instead of skipping.
    pub strict: bool,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            base: ManifestDefaults::BASE_NAME.to_string(),
            recursive: false,
            force: false,
            verbose: false,
            builtin: false,
            strict: false,
        }
    }
}
