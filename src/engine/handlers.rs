//! Command handler: config merge, resolve, enumerate, confirm, run.

use anyhow::Result;
use colored::Colorize;
use log::{debug, info, warn};
use std::path::Path;

use crate::engine::arg_parser::Cli;
use crate::engine::digest::{digest_suite, ensure_tools_available};
use crate::engine::tools::resolve_root;
use crate::pipeline::orchestrator::{manifest_paths, run_manifest};
use crate::pipeline::walk::{SkippedDir, WalkReport, enumerate};
use crate::types::{Opts, RunOutcome, RunSummary};
use crate::utils::confirm::confirm_run;
use crate::utils::setup_logging;
use crate::utils::toml_file::{apply_file_to_opts, load_config_toml};

/// Build Opts: defaults ← `.twinsum.toml` in the target dir ← CLI flags.
fn build_opts(cli: &Cli) -> Opts {
    let mut opts = Opts::default();
    if let Some(file) = load_config_toml(Path::new(&cli.dir)) {
        apply_file_to_opts(&file, &mut opts);
    }
    if let Some(ref b) = cli.base {
        opts.base = b.clone();
    }
    if let Some(v) = cli.recursive {
        opts.recursive = v;
    }
    if let Some(v) = cli.verbose {
        opts.verbose = v;
    }
    if let Some(v) = cli.builtin {
        opts.builtin = v;
    }
    if let Some(v) = cli.strict {
        opts.strict = v;
    }
    opts.force = cli.force;
    opts
}

/// Run one full manifest generation. Returns the terminal outcome; fatal
/// conditions surface as errors after temporaries are discarded.
pub fn handle_run(cli: &Cli) -> Result<RunOutcome> {
    let opts = build_opts(cli);
    setup_logging(opts.verbose);
    debug!("{} CONFIG:{:#?}", env!("CARGO_PKG_NAME").to_uppercase(), opts);

    if !opts.builtin {
        ensure_tools_available()?;
    }
    let root = resolve_root(&cli.dir)?;

    let WalkReport { entries, skipped } = enumerate(&root, &opts.base, opts.recursive, opts.strict)?;
    report_skipped(&skipped, opts.verbose);

    if entries.is_empty() {
        info!("no eligible files under {}; nothing to do", root.display());
        return Ok(RunOutcome::Empty { root });
    }

    if !confirm_run(&root, &entries, opts.force)? {
        info!("aborted; nothing was written");
        return Ok(RunOutcome::Aborted);
    }

    let digesters = digest_suite(opts.builtin);
    let finals = manifest_paths(&root, &opts.base, &digesters);
    let summary = run_manifest(
        &root,
        &entries,
        &digesters,
        finals,
        opts.verbose,
        opts.recursive,
    )?;
    report_summary(&summary);
    Ok(RunOutcome::Written(summary))
}

/// Post-walk summary of unlistable subtrees (recoverable; those subtrees are
/// simply absent from the manifest).
fn report_skipped(skipped: &[SkippedDir], verbose: bool) {
    if skipped.is_empty() {
        return;
    }
    warn!(
        "skipped {} unlistable path(s) during enumeration",
        skipped.len()
    );
    if verbose {
        for (path, msg) in skipped {
            eprintln!("  skipped: {} ({})", path.display(), msg);
        }
    }
}

fn report_summary(summary: &RunSummary) {
    info!(
        "hashed {} files under {}{}",
        summary.file_count,
        summary.root.display(),
        if summary.recursive { " (recursive)" } else { "" }
    );
    for path in &summary.manifest_paths {
        info!("wrote {}", path.display().to_string().green());
    }
}
