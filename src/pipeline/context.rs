//! Run-scoped state: the two temporary manifests and their cleanup guarantee.

use std::path::{Path, PathBuf};

use crate::utils::tempfiles::{remove_stale_temp, temp_path_for};

/// Owns the temporary manifest files for one run.
///
/// Created at pipeline start; the temporaries are promoted on success or
/// deleted on every other exit, including unwinding, via Drop. No state
/// reachable after the run holds a half-written manifest.
pub struct RunState {
    pub root: PathBuf,
    /// Expected line count per manifest (the eligible file count).
    pub expected: usize,
    final_paths: [PathBuf; 2],
    temp_paths: [PathBuf; 2],
    published: bool,
}

impl RunState {
    /// Derive temp paths from the final manifest paths and clear stale
    /// leftovers from a prior aborted run.
    pub fn new(root: &Path, final_paths: [PathBuf; 2], expected: usize) -> Self {
        let temp_paths = [temp_path_for(&final_paths[0]), temp_path_for(&final_paths[1])];
        for t in &temp_paths {
            remove_stale_temp(t);
        }
        Self {
            root: root.to_path_buf(),
            expected,
            final_paths,
            temp_paths,
            published: false,
        }
    }

    pub fn temp_paths(&self) -> &[PathBuf; 2] {
        &self.temp_paths
    }

    pub fn final_paths(&self) -> &[PathBuf; 2] {
        &self.final_paths
    }

    /// Mark the run successful; Drop leaves the promoted files alone.
    pub fn mark_published(&mut self) {
        self.published = true;
    }
}

impl Drop for RunState {
    fn drop(&mut self) {
        if self.published {
            return;
        }
        for t in &self.temp_paths {
            if t.exists()
                && let Err(e) = std::fs::remove_file(t)
            {
                log::warn!("could not discard temp manifest {}: {}", t.display(), e);
            }
        }
    }
}
