//! Interactive confirmation before hashing begins.

use colored::Colorize;
use dialoguer::Confirm;
use std::collections::BTreeSet;
use std::io::IsTerminal;
use std::path::Path;

use anyhow::Result;

use crate::types::FileEntry;

/// Ask before hashing: show the resolved root, the eligible file count, and
/// how many distinct extensions are in the set. Returns false on decline.
///
/// With `force` the prompt is skipped. Without it, a non-interactive stdin
/// cannot answer, so the run aborts (neutral) rather than assuming consent.
pub fn confirm_run(root: &Path, entries: &[FileEntry], force: bool) -> Result<bool> {
    if force {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        log::warn!("stdin is not a terminal; re-run with --force to skip confirmation");
        return Ok(false);
    }
    let kinds: BTreeSet<&str> = entries.iter().map(|e| e.ext.as_str()).collect();
    let prompt = format!(
        "Hash {} files ({} extension kinds) under {}?",
        entries.len(),
        kinds.len(),
        root.display().to_string().cyan(),
    );
    let confirmed = Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()?;
    Ok(confirmed)
}
