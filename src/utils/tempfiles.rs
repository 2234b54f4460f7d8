use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::utils::config::ManifestDefaults;

/// Get the temporary path for a final manifest path.
pub fn temp_path_for(final_path: &Path) -> PathBuf {
    let name = final_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(ManifestDefaults::BASE_NAME);
    final_path
        .parent()
        .unwrap_or(Path::new("."))
        .join(format!("{name}.{}", ManifestDefaults::TEMP_SUFFIX))
}

/// Best-effort removal of a leftover temp from a prior aborted run.
/// Failure is non-fatal; the survivor is truncated when the stream opens.
pub fn remove_stale_temp(temp_path: &Path) {
    if temp_path.exists()
        && let Err(e) = fs::remove_file(temp_path)
    {
        log::warn!(
            "could not remove stale temp manifest {}: {}",
            temp_path.display(),
            e
        );
    }
}

/// Promote a verified temp manifest onto its final path. The rename is
/// atomic for concurrent readers: the destination is replaced, never absent.
pub fn rename_temp_to_final(temp_path: &Path, final_path: &Path) -> Result<()> {
    fs::rename(temp_path, final_path).with_context(|| {
        format!(
            "promote manifest ({} -> {})",
            temp_path.display(),
            final_path.display()
        )
    })
}
