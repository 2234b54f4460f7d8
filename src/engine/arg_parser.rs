use clap::Parser;

struct DefaultArgs;

impl DefaultArgs {
    pub const DIR: &'static str = ".";
}

/// Dual-algorithm checksum manifest generator.
#[derive(Clone, Parser)]
#[command(name = "twinsum")]
#[command(about = "Hash every file under a directory with BLAKE3 and XXH128 and publish verified manifests.")]
pub struct Cli {
    /// Directory to hash. Default: current directory.
    #[arg(value_name = "DIR", default_value = DefaultArgs::DIR)]
    pub dir: String,

    /// Manifest base name. Manifests are written as `<BASE>.b3` and `<BASE>.xxh128` in DIR.
    #[arg(long, short)]
    pub base: Option<String>,

    /// Recurse into subdirectories.
    #[arg(long, short, num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub recursive: Option<bool>,

    /// Skip the confirmation prompt.
    #[arg(long, short = 'y')]
    pub force: bool,

    /// Verbose output (debug logging plus a progress counter).
    #[arg(long, short = 'v', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub verbose: Option<bool>,

    /// Hash in-process instead of shelling out to b3sum/xxhsum.
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub builtin: Option<bool>,

    /// Strict mode: fail on the first unlistable directory instead of skipping it.
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub strict: Option<bool>,
}
