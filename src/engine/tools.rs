//! Path resolution and manifest-name filtering.

use std::path::{Path, PathBuf};

use crate::errors::ManifestError;
use crate::types::NO_EXTENSION;

/// Characters that make the target read like a glob, not a directory.
const WILDCARD_CHARS: [char; 4] = ['*', '?', '[', ']'];

/// Validate and canonicalize the target root directory.
///
/// Rejects empty/whitespace input, wildcard metacharacters, and anything
/// that does not resolve to an existing directory. No side effects; every
/// relative path in the run is computed against the returned root.
pub fn resolve_root(raw: &str) -> Result<PathBuf, ManifestError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ManifestError::InvalidPath {
            path: raw.to_string(),
            reason: "empty or whitespace".to_string(),
        });
    }
    if trimmed.chars().any(|c| WILDCARD_CHARS.contains(&c)) {
        return Err(ManifestError::InvalidPath {
            path: raw.to_string(),
            reason: "wildcard characters are not allowed".to_string(),
        });
    }
    let canonical = Path::new(trimmed)
        .canonicalize()
        .map_err(|e| ManifestError::InvalidPath {
            path: raw.to_string(),
            reason: format!("cannot resolve: {e}"),
        })?;
    if !canonical.is_dir() {
        return Err(ManifestError::InvalidPath {
            path: raw.to_string(),
            reason: "not a directory".to_string(),
        });
    }
    Ok(canonical)
}

/// Convert absolute path to relative path from base
pub fn path_relative_to(path: &Path, base: &Path) -> Option<PathBuf> {
    path.strip_prefix(base).ok().map(|p| p.to_path_buf())
}

/// Relative path as a portable string: forward slashes on every platform,
/// so manifests stay comparable across machines and mount points.
pub fn rel_path_string(rel: &Path) -> String {
    rel.to_string_lossy().replace('\\', "/")
}

/// Lower-cased extension, or the sentinel for extensionless names.
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_else(|| NO_EXTENSION.to_string())
}

/// True when `name` is a manifest artifact for `base`: `<base>.<anything>`,
/// case-insensitive. Keeps manifests, and the temporaries of a crashed prior
/// run, out of their own hashed set.
pub fn is_manifest_artifact(name: &str, base: &str) -> bool {
    let name = name.to_lowercase();
    let prefix = format!("{}.", base.to_lowercase());
    name.starts_with(&prefix)
}

/// Case-insensitive ordering key for a full path. Load-bearing: manifest
/// line order and the verification count both assume this sort is stable
/// across runs for identical directory contents.
pub fn sort_key(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/").to_lowercase()
}
