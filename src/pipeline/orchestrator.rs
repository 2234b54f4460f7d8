//! Manifest run orchestration: sorted entries → dual digest → writer →
//! verify → publish, strictly one file at a time.

use anyhow::Result;
use kdam::BarExt;
use log::debug;
use std::path::{Path, PathBuf};

use crate::engine::digest::Digester;
use crate::pipeline::context::RunState;
use crate::pipeline::verify::{publish, verify_count};
use crate::pipeline::writer::ManifestWriter;
use crate::types::{FileEntry, RunSummary};

/// Final manifest paths for `base` under `root`, in algorithm order.
pub fn manifest_paths(root: &Path, base: &str, digesters: &[Box<dyn Digester>; 2]) -> [PathBuf; 2] {
    [
        root.join(format!("{base}.{}", digesters[0].extension())),
        root.join(format!("{base}.{}", digesters[1].extension())),
    ]
}

/// Run the dual-hash pipeline over `entries` (already sorted).
///
/// Each file is fully processed before the next: digester A's line is
/// written, then digester B's, so B's read of the same file lands while the
/// page cache is still warm. That interleaving is a heuristic for seek-bound
/// media, not something verification depends on. Any failure discards the
/// temporaries via [`RunState`] and leaves prior manifests untouched.
pub fn run_manifest(
    root: &Path,
    entries: &[FileEntry],
    digesters: &[Box<dyn Digester>; 2],
    final_paths: [PathBuf; 2],
    verbose: bool,
    recursive: bool,
) -> Result<RunSummary> {
    let mut state = RunState::new(root, final_paths, entries.len());
    let mut writer = ManifestWriter::open(state.temp_paths())?;
    let mut bar = verbose.then(|| kdam::tqdm!(total = entries.len(), desc = "Hashing"));

    for entry in entries {
        for (idx, digester) in digesters.iter().enumerate() {
            let line = digester.digest_line(root, &entry.rel_path)?;
            writer.append_line(idx, &line)?;
        }
        if let Some(b) = bar.as_mut() {
            let _ = b.update(1);
        }
    }

    writer.close()?;

    for (idx, digester) in digesters.iter().enumerate() {
        verify_count(digester.label(), &state.temp_paths()[idx], state.expected)?;
    }

    publish(state.temp_paths(), state.final_paths())?;
    state.mark_published();
    debug!(
        "published {} and {}",
        state.final_paths()[0].display(),
        state.final_paths()[1].display()
    );

    Ok(RunSummary {
        root: root.to_path_buf(),
        file_count: entries.len(),
        recursive,
        manifest_paths: state.final_paths().clone(),
    })
}
