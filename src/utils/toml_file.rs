//! Load `.twinsum.toml` from the target directory (CLI only). Lib does not
//! use this; the consuming program injects config via ManifestOpts.

use serde::Deserialize;
use std::path::Path;

use crate::Opts;
use crate::utils::config::PackagePaths;

#[derive(Debug, Deserialize)]
pub(crate) struct TwinsumToml {
    #[serde(default)]
    settings: SettingsSection,
}

#[derive(Debug, Default, Deserialize)]
struct SettingsSection {
    base: Option<String>,
    recursive: Option<bool>,
    verbose: Option<bool>,
    builtin: Option<bool>,
    strict: Option<bool>,
}

/// Load the config file from `dir` if present. Returns None if the file is
/// missing or unreadable. CLI only.
pub(crate) fn load_config_toml(dir: &Path) -> Option<TwinsumToml> {
    let path = dir.join(PackagePaths::get().config_filename());
    let s = std::fs::read_to_string(&path).ok()?;
    toml::from_str(&s)
        .map_err(|e| log::warn!("{}: {}", path.display(), e))
        .ok()
}

/// Overwrite opts field from file when present.
macro_rules! apply_file_opt {
    ($sec:expr, $opts:expr, $field:ident) => {
        if let Some(v) = $sec.$field {
            $opts.$field = v;
        }
    };
}

/// Apply file config to opts (only set fields present in the file). Call
/// before applying CLI. `force` is never read from the file.
pub(crate) fn apply_file_to_opts(file: &TwinsumToml, opts: &mut Opts) {
    let sec = &file.settings;
    if let Some(ref b) = sec.base {
        opts.base = b.clone();
    }
    apply_file_opt!(sec, opts, recursive);
    apply_file_opt!(sec, opts, verbose);
    apply_file_opt!(sec, opts, builtin);
    apply_file_opt!(sec, opts, strict);
}
