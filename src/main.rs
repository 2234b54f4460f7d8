//! Twinsum CLI: write BLAKE3 + XXH128 manifests for a directory tree.

use anyhow::Result;
use clap::Parser;
use std::time::Instant;
use twinsum::engine::Cli;
use twinsum::engine::handle_run;

fn main() -> Result<()> {
    let start_time = Instant::now();
    let cli = Cli::parse();
    handle_run(&cli)?;
    log::debug!("Total time: {:?}", start_time.elapsed());
    Ok(())
}
