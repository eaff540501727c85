// Minimal stderr logger behind the `log` facade. Records are written as
// `[LEVEL] target: message`; the level is chosen once at startup.

use log::{LevelFilter, Log, Metadata, Record};

struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        eprintln!("[{:>5}] {}: {}", record.level(), record.target(), record.args());
    }

    fn flush(&self) {}
}

/// Install the logger. Later calls keep the first logger and only adjust the level.
pub fn init(level: LevelFilter) {
    if log::set_logger(&LOGGER).is_err() {
        log::debug!("logger already installed");
    }
    log::set_max_level(level);
}

/// Level from the number of `-v` flags, falling back to the configured level
/// and then to warnings only.
pub fn level_for(verbose: u8, configured: Option<LevelFilter>) -> LevelFilter {
    match verbose {
        0 => configured.unwrap_or(LevelFilter::Warn),
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for_verbosity() {
        assert_eq!(level_for(0, None), LevelFilter::Warn);
        assert_eq!(level_for(0, Some(LevelFilter::Error)), LevelFilter::Error);
        assert_eq!(level_for(1, Some(LevelFilter::Error)), LevelFilter::Info);
        assert_eq!(level_for(2, None), LevelFilter::Debug);
        assert_eq!(level_for(5, None), LevelFilter::Trace);
    }
}
