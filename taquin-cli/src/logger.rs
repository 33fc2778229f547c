use anyhow::{Result, anyhow};
use log::{LevelFilter, Log, Metadata, Record};

use std::io::{Write, stderr};

/// Writes `[LEVEL target] message` lines to stderr.
struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let mut handle = stderr().lock();
        let _ = writeln!(
            handle,
            "[{:<5} {}] {}",
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = stderr().flush();
    }
}

static LOGGER: StderrLogger = StderrLogger;

fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

pub fn init(verbosity: u8) -> Result<()> {
    log::set_logger(&LOGGER).map_err(|err| anyhow!("Failed to install logger; {err}"))?;
    log::set_max_level(level_for(verbosity));
    Ok(())
}
