//! Application configuration constants.
//! Manifest naming and the two hashing algorithms in one place.

use std::sync::OnceLock;

// ---- Package / paths (from CARGO_PKG_NAME, cached) ----

/// Package-derived paths: built once from `CARGO_PKG_NAME`, then cached.
pub struct PackagePaths {
    pkg_name: &'static str,
    config_filename: String,
}

static PACKAGE_PATHS: OnceLock<PackagePaths> = OnceLock::new();

impl PackagePaths {
    /// Build and cache paths from `CARGO_PKG_NAME`. Called once on first use.
    pub fn get() -> &'static PackagePaths {
        PACKAGE_PATHS.get_or_init(|| {
            let pkg = env!("CARGO_PKG_NAME");
            PackagePaths {
                pkg_name: pkg,
                config_filename: format!(".{pkg}.toml"),
            }
        })
    }

    pub fn pkg_name(&self) -> &str {
        self.pkg_name
    }

    /// Optional config file read from the target directory (CLI only).
    pub fn config_filename(&self) -> &str {
        &self.config_filename
    }
}

// ---- Manifest naming / algorithms ----

/// One manifest algorithm: diagnostic label, manifest extension, external
/// tool and the flags it needs to select the algorithm.
#[derive(Clone, Copy, Debug)]
pub struct AlgorithmSpec {
    pub label: &'static str,
    pub extension: &'static str,
    pub tool: &'static str,
    pub tool_flags: &'static [&'static str],
}

/// Manifest naming and the fixed algorithm pair.
pub struct ManifestDefaults;

impl ManifestDefaults {
    /// Default manifest base name; manifests land at `<root>/<BASE>.<ext>`.
    pub const BASE_NAME: &'static str = "CHECKSUMS";
    /// Suffix appended to a final manifest path for its temporary.
    pub const TEMP_SUFFIX: &'static str = "tmp";

    /// Invocation order is fixed: BLAKE3 first, then XXH128, per file. The
    /// second read of a file lands while the page cache is still warm.
    pub const ALGORITHMS: [AlgorithmSpec; 2] = [
        AlgorithmSpec {
            label: "BLAKE3",
            extension: "b3",
            tool: "b3sum",
            tool_flags: &[],
        },
        AlgorithmSpec {
            label: "XXH128",
            extension: "xxh128",
            tool: "xxhsum",
            tool_flags: &["-H128"],
        },
    ];
}

// ---- Hashing (builtin digesters) ----

/// Builtin-hashing I/O thresholds and buffer sizes.
pub struct HashingConsts;

impl HashingConsts {
    /// File size above which hashing uses memory-mapped I/O (bytes). 100 MB.
    pub const HASH_MMAP_THRESHOLD: u64 = 100 * 1024 * 1024;
    /// Chunk size for reading files below the mmap threshold (bytes). 1 MB.
    pub const HASH_READ_CHUNK_SIZE: usize = 1024 * 1024;
}
