//! Logger set-up shared by the binaries and tests.

use std::io::Write;

use env_logger::Builder;
use log::LevelFilter;

/// Installs a global logger writing to stderr. Subsequent calls are ignored, so tests may
/// call this freely.
pub fn build_logger_for_level(level: LevelFilter) {
    let _ = Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{:>5} {:>8}ms] {}",
                record.level(),
                elapsed_millis(),
                record.args()
            )
        })
        .is_test(cfg!(test))
        .try_init();
}

/// Raises `base` by one level per occurrence of `-v`
pub fn build_logger_for_verbosity(base: LevelFilter, verbosity: usize) {
    let levels = [
        LevelFilter::Off,
        LevelFilter::Error,
        LevelFilter::Warn,
        LevelFilter::Info,
        LevelFilter::Debug,
        LevelFilter::Trace,
    ];

    let base_index = levels.iter().position(|&l| l == base).unwrap_or(0);
    let level = levels[(base_index + verbosity).min(levels.len() - 1)];

    build_logger_for_level(level);
}

fn elapsed_millis() -> u128 {
    use std::{sync::OnceLock, time::Instant};
    static START: OnceLock<Instant> = OnceLock::new();
    START.get_or_init(Instant::now).elapsed().as_millis()
}
