//! Post-write verification and atomic promotion.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::errors::ManifestError;
use crate::utils::tempfiles::rename_temp_to_final;

/// Count lines by re-reading the closed temp file. The in-memory counter is
/// never trusted; this counts what actually reached disk.
pub fn count_lines(path: &Path) -> Result<usize> {
    let file =
        File::open(path).with_context(|| format!("reopen temp manifest {}", path.display()))?;
    let mut count = 0usize;
    for line in BufReader::new(file).lines() {
        line.with_context(|| format!("read temp manifest {}", path.display()))?;
        count += 1;
    }
    Ok(count)
}

/// Compare a temp manifest's actual line count to the expected file count.
pub fn verify_count(algorithm: &str, temp_path: &Path, expected: usize) -> Result<()> {
    let actual = count_lines(temp_path)?;
    if actual != expected {
        return Err(ManifestError::ManifestIntegrity {
            algorithm: algorithm.to_string(),
            expected,
            actual,
        }
        .into());
    }
    Ok(())
}

/// Promote both verified temporaries onto their final paths. Each rename
/// replaces any prior manifest atomically; a concurrent reader sees the old
/// file or the new one, never a truncated in-between.
pub fn publish(temp_paths: &[PathBuf; 2], final_paths: &[PathBuf; 2]) -> Result<()> {
    for (t, f) in temp_paths.iter().zip(final_paths) {
        rename_temp_to_final(t, f)?;
    }
    Ok(())
}
