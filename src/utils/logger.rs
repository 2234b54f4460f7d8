use colored::Colorize;
use env_logger::Builder;
use log::{Level, LevelFilter};
use std::io::Write;

/// Wire up env_logger: our crate at info (debug with `verbose`), everything
/// else at warn. Warnings carry a colored level tag; the walk leans on them
/// for skipped-subtree reporting, so they have to stand out from info lines.
pub fn setup_logging(verbose: bool) {
    let level = match verbose {
        true => LevelFilter::Debug,
        false => LevelFilter::Info,
    };

    Builder::from_default_env()
        .filter_level(LevelFilter::Warn)
        .filter_module(env!("CARGO_PKG_NAME"), level)
        .format(|buf, record| {
            let tag = env!("CARGO_PKG_NAME").cyan();
            match record.level() {
                Level::Warn => writeln!(buf, "[{} {}] {}", tag, "WARN".yellow(), record.args()),
                Level::Error => writeln!(buf, "[{} {}] {}", tag, "ERROR".red(), record.args()),
                _ => writeln!(buf, "[{}] {}", tag, record.args()),
            }
        })
        .init();
}
