//! The digest capability: given a file path, return one opaque manifest line.
//!
//! Two families behind the same trait. [`ToolDigester`] (the default) shells
//! out to an external checksum tool and captures its line verbatim. The
//! builtin digesters hash in-process with the same line shape. The
//! orchestrator decides invocation order; nothing here assumes it.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::process::Command;

use blake3::Hasher;
use memmap2::Mmap;
use xxhash_rust::xxh3::Xxh3;

use crate::errors::ManifestError;
use crate::utils::config::{AlgorithmSpec, HashingConsts, ManifestDefaults};

/// A component that, given a root-relative file path, deterministically
/// returns a content digest line.
pub trait Digester {
    /// Algorithm label used in diagnostics and integrity errors.
    fn label(&self) -> &str;
    /// Manifest file extension for this algorithm.
    fn extension(&self) -> &str;
    /// Produce the one-line digest for `rel`, resolved against `root`.
    fn digest_line(&self, root: &Path, rel: &str) -> Result<String, ManifestError>;
}

/// Verify both external tools exist on PATH. Runs before any filesystem
/// scan so a missing prerequisite never costs a walk.
pub fn ensure_tools_available() -> Result<(), ManifestError> {
    for spec in ManifestDefaults::ALGORITHMS {
        which::which(spec.tool).map_err(|_| ManifestError::PrerequisiteMissing {
            tool: spec.tool.to_string(),
        })?;
    }
    Ok(())
}

/// The digester pair in fixed algorithm order.
pub fn digest_suite(builtin: bool) -> [Box<dyn Digester>; 2] {
    let [a, b] = ManifestDefaults::ALGORITHMS;
    if builtin {
        [Box::new(Blake3Digester), Box::new(Xxh128Digester)]
    } else {
        [
            Box::new(ToolDigester::new(a)),
            Box::new(ToolDigester::new(b)),
        ]
    }
}

/// Shells out to an external checksum tool: `<tool> [flags] -- <rel>`, with
/// the child's working directory set to the root so relative paths resolve
/// and manifest lines stay portable. The captured line is opaque text; only
/// the trailing newline is removed.
pub struct ToolDigester {
    spec: AlgorithmSpec,
}

impl ToolDigester {
    pub fn new(spec: AlgorithmSpec) -> Self {
        Self { spec }
    }
}

impl Digester for ToolDigester {
    fn label(&self) -> &str {
        self.spec.label
    }

    fn extension(&self) -> &str {
        self.spec.extension
    }

    fn digest_line(&self, root: &Path, rel: &str) -> Result<String, ManifestError> {
        let output = Command::new(self.spec.tool)
            .args(self.spec.tool_flags)
            .arg("--")
            .arg(rel)
            .current_dir(root)
            .output()
            .map_err(|e| ManifestError::HashTool {
                tool: self.spec.tool.to_string(),
                path: rel.to_string(),
                detail: e.to_string(),
            })?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if let Some(line) = stderr.lines().next() {
                log::warn!("{}: {}", self.spec.tool, line);
            }
            return Err(ManifestError::HashTool {
                tool: self.spec.tool.to_string(),
                path: rel.to_string(),
                detail: output.status.to_string(),
            });
        }
        let line = String::from_utf8_lossy(&output.stdout)
            .trim_end_matches(['\r', '\n'])
            .to_string();
        Ok(line)
    }
}

/// Read `abs` through `update`: memory-mapped above the threshold, chunked
/// below it.
fn feed_file<F: FnMut(&[u8])>(abs: &Path, mut update: F) -> std::io::Result<()> {
    let file = File::open(abs)?;
    let size = file.metadata()?.len();
    if size > HashingConsts::HASH_MMAP_THRESHOLD {
        let mmap = unsafe { Mmap::map(&file)? };
        update(&mmap);
    } else {
        let mut reader = BufReader::with_capacity(HashingConsts::HASH_READ_CHUNK_SIZE, file);
        let mut buffer = vec![0u8; HashingConsts::HASH_READ_CHUNK_SIZE];
        loop {
            let n = reader.read(&mut buffer)?;
            if n == 0 {
                break;
            }
            update(&buffer[..n]);
        }
    }
    Ok(())
}

fn builtin_error(label: &str, rel: &str, e: std::io::Error) -> ManifestError {
    ManifestError::HashTool {
        tool: format!("{label} (builtin)"),
        path: rel.to_string(),
        detail: e.to_string(),
    }
}

/// In-process BLAKE3; emits `<hex>  <rel>` like the external tool.
pub struct Blake3Digester;

impl Digester for Blake3Digester {
    fn label(&self) -> &str {
        ManifestDefaults::ALGORITHMS[0].label
    }

    fn extension(&self) -> &str {
        ManifestDefaults::ALGORITHMS[0].extension
    }

    fn digest_line(&self, root: &Path, rel: &str) -> Result<String, ManifestError> {
        let abs = root.join(rel);
        let mut hasher = Hasher::new();
        feed_file(&abs, |chunk| {
            hasher.update(chunk);
        })
        .map_err(|e| builtin_error(self.label(), rel, e))?;
        Ok(format!("{}  {}", hasher.finalize().to_hex(), rel))
    }
}

/// In-process XXH128 (xxh3, 128-bit); same line shape.
pub struct Xxh128Digester;

impl Digester for Xxh128Digester {
    fn label(&self) -> &str {
        ManifestDefaults::ALGORITHMS[1].label
    }

    fn extension(&self) -> &str {
        ManifestDefaults::ALGORITHMS[1].extension
    }

    fn digest_line(&self, root: &Path, rel: &str) -> Result<String, ManifestError> {
        let abs = root.join(rel);
        let mut hasher = Xxh3::new();
        feed_file(&abs, |chunk| {
            hasher.update(chunk);
        })
        .map_err(|e| builtin_error(self.label(), rel, e))?;
        Ok(format!("{:032x}  {}", hasher.digest128(), rel))
    }
}
