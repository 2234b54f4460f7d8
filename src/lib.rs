//! Twinsum: dual-algorithm checksum manifest generator

pub mod engine;
pub mod errors;
pub mod pipeline;
pub mod types;
pub mod utils;

/// Re-export types for API
pub use errors::ManifestError;
pub use types::*;

use log::debug;
use std::path::Path;

/// Result alias used by public twinsum API
pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// Single entry point: hash `root` with `opts` and publish both manifests.
///
/// No confirmation prompt and no config-file merge here; the consuming
/// program injects everything via [`ManifestOpts`]. Returns the terminal
/// [`RunOutcome`]: `Written` with the summary, or `Empty` when the tree has
/// no eligible files (nothing is created in that case).
pub fn manifest_dir(root: &Path, opts: &ManifestOpts) -> Result<RunOutcome> {
    let opts = Opts::from(opts);
    debug!("{} CONFIG:{:#?}", env!("CARGO_PKG_NAME").to_uppercase(), opts);

    if !opts.builtin {
        engine::digest::ensure_tools_available()?;
    }
    let root = engine::tools::resolve_root(&root.to_string_lossy())?;

    let walk = pipeline::walk::enumerate(&root, &opts.base, opts.recursive, opts.strict)?;
    if walk.entries.is_empty() {
        return Ok(RunOutcome::Empty { root });
    }

    let digesters = engine::digest::digest_suite(opts.builtin);
    let finals = pipeline::orchestrator::manifest_paths(&root, &opts.base, &digesters);
    let summary = pipeline::orchestrator::run_manifest(
        &root,
        &walk.entries,
        &digesters,
        finals,
        opts.verbose,
        opts.recursive,
    )?;
    Ok(RunOutcome::Written(summary))
}
