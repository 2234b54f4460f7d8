//! Buffered manifest output: one stream per algorithm, writing to the temp
//! paths. Plain UTF-8, no byte-order mark; every line newline-terminated.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Two append-only text streams over the temporary manifest paths, in
/// algorithm order.
pub struct ManifestWriter {
    streams: [BufWriter<File>; 2],
}

impl ManifestWriter {
    /// Open both temp files for writing, truncating any survivor the
    /// best-effort stale cleanup could not delete.
    pub fn open(temp_paths: &[PathBuf; 2]) -> Result<Self> {
        let open_stream = |p: &Path| -> Result<BufWriter<File>> {
            let f =
                File::create(p).with_context(|| format!("open temp manifest {}", p.display()))?;
            Ok(BufWriter::new(f))
        };
        Ok(Self {
            streams: [open_stream(&temp_paths[0])?, open_stream(&temp_paths[1])?],
        })
    }

    /// Append one opaque digest line to the stream for algorithm `idx`.
    pub fn append_line(&mut self, idx: usize, line: &str) -> Result<()> {
        let s = &mut self.streams[idx];
        s.write_all(line.as_bytes())?;
        s.write_all(b"\n")?;
        Ok(())
    }

    /// Flush and release both streams. Must run before verification so no
    /// buffered line can vanish silently.
    pub fn close(mut self) -> Result<()> {
        for s in &mut self.streams {
            s.flush().context("flush temp manifest")?;
        }
        Ok(())
    }
}
