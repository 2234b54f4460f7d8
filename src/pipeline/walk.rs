//! File enumeration: immediate children of the root, or an explicit-stack
//! depth-first walk over the whole tree.

use std::fs;
use std::path::{Path, PathBuf};

use crate::engine::tools::{
    extension_of, is_manifest_artifact, path_relative_to, rel_path_string, sort_key,
};
use crate::errors::ManifestError;
use crate::types::FileEntry;

/// One subtree the walk could not list: path plus the error that stopped it.
pub type SkippedDir = (PathBuf, String);

/// Outcome of enumeration: sorted entries plus any unlistable subtrees.
pub struct WalkReport {
    pub entries: Vec<FileEntry>,
    pub skipped: Vec<SkippedDir>,
}

/// Enumerate eligible files under `root`.
///
/// Non-recursive mode lists only the immediate children. Recursive mode runs
/// an explicit worklist DFS (no call recursion); subdirectories are pushed,
/// popped, listed. Symbolic-link children of either kind are dropped before
/// classification, so link cycles terminate and nothing is hashed twice.
/// Files whose name matches `<base>.<anything>` (any case) are excluded, so
/// a manifest never hashes itself or a prior run's leftovers.
///
/// A directory that cannot be listed is recorded in the report and skipped;
/// in `strict` mode it fails the run instead. Entries come back sorted
/// ascending by lower-cased full path, which downstream verification and
/// manifest diffing both rely on.
pub fn enumerate(
    root: &Path,
    base: &str,
    recursive: bool,
    strict: bool,
) -> Result<WalkReport, ManifestError> {
    let mut entries = Vec::new();
    let mut skipped: Vec<SkippedDir> = Vec::new();
    let mut pending: Vec<PathBuf> = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let listing = match fs::read_dir(&dir) {
            Ok(l) => l,
            Err(e) => {
                if strict {
                    return Err(ManifestError::EnumerationAccess {
                        path: dir,
                        source: e,
                    });
                }
                log::warn!("skipping unlistable directory {}: {}", dir.display(), e);
                skipped.push((dir, e.to_string()));
                continue;
            }
        };
        for child in listing {
            let child = match child {
                Ok(c) => c,
                Err(e) => {
                    if strict {
                        return Err(ManifestError::EnumerationAccess {
                            path: dir.clone(),
                            source: e,
                        });
                    }
                    log::warn!("skipping unreadable entry in {}: {}", dir.display(), e);
                    skipped.push((dir.clone(), e.to_string()));
                    continue;
                }
            };
            // DirEntry::file_type does not follow links, so a symlink or
            // junction surfaces as such here and is dropped entirely.
            let file_type = match child.file_type() {
                Ok(t) => t,
                Err(e) => {
                    if strict {
                        return Err(ManifestError::EnumerationAccess {
                            path: child.path(),
                            source: e,
                        });
                    }
                    log::warn!("skipping {}: {}", child.path().display(), e);
                    skipped.push((child.path(), e.to_string()));
                    continue;
                }
            };
            if file_type.is_symlink() {
                continue;
            }
            if file_type.is_dir() {
                if recursive {
                    pending.push(child.path());
                }
                continue;
            }
            if !file_type.is_file() {
                // sockets, fifos, devices
                continue;
            }
            if is_manifest_artifact(&child.file_name().to_string_lossy(), base) {
                continue;
            }
            entries.push(to_entry(child.path(), root));
        }
    }

    entries.sort_by(|a, b| {
        a.sort_key
            .cmp(&b.sort_key)
            .then_with(|| a.abs_path.cmp(&b.abs_path))
    });
    Ok(WalkReport { entries, skipped })
}

/// Build the FileEntry for an eligible file.
fn to_entry(abs: PathBuf, root: &Path) -> FileEntry {
    let rel = path_relative_to(&abs, root).unwrap_or_else(|| abs.clone());
    FileEntry {
        rel_path: rel_path_string(&rel),
        ext: extension_of(&abs),
        sort_key: sort_key(&abs),
        abs_path: abs,
    }
}
