use std::env;

use crate::prelude::*;
use console::Style;
use log::Log;
use simplelog::{CombinedLogger, SharedLogger};
use std::io::Write;

pub const LOG_LEVEL_ENV: &str = "LIFEWATCH_LOG";

/// Logger writing every record to stderr, leaving stdout to the screen
pub struct LocalLogger {
    log_level: log::LevelFilter,
}

impl LocalLogger {
    pub fn new() -> Self {
        let log_level = env::var(LOG_LEVEL_ENV)
            .ok()
            .and_then(|log_level| log_level.parse::<log::LevelFilter>().ok())
            .unwrap_or(log::LevelFilter::Info);

        LocalLogger { log_level }
    }
}

impl Default for LocalLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Log for LocalLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= self.log_level
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        eprintln!("{}", format_record(record));
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Style a log record according to its level
fn format_record(record: &log::Record) -> String {
    let error_style = Style::new().red();
    let info_style = Style::new().white();
    let warn_style = Style::new().yellow();
    let debug_style = Style::new().blue().dim();
    let trace_style = Style::new().black().dim();

    match record.level() {
        log::Level::Error => error_style.apply_to(record.args()).to_string(),
        log::Level::Warn => warn_style.apply_to(record.args()).to_string(),
        log::Level::Info => info_style.apply_to(record.args()).to_string(),
        log::Level::Debug => debug_style
            .apply_to(format!("[DEBUG::{}] {}", record.target(), record.args()))
            .to_string(),
        log::Level::Trace => trace_style
            .apply_to(format!("[TRACE::{}] {}", record.target(), record.args()))
            .to_string(),
    }
}

impl SharedLogger for LocalLogger {
    fn level(&self) -> log::LevelFilter {
        self.log_level
    }

    fn config(&self) -> Option<&simplelog::Config> {
        None
    }

    fn as_log(self: Box<Self>) -> Box<dyn Log> {
        Box::new(*self)
    }
}

pub fn get_local_logger() -> Box<dyn SharedLogger> {
    Box::new(LocalLogger::new())
}

pub fn init_local_logger() -> Result<()> {
    let logger = get_local_logger();
    CombinedLogger::init(vec![logger])?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_comes_from_env() {
        let logger = temp_env::with_var(LOG_LEVEL_ENV, Some("trace"), LocalLogger::new);
        assert_eq!(logger.log_level, log::LevelFilter::Trace);

        let logger = temp_env::with_var(LOG_LEVEL_ENV, Some("not-a-level"), LocalLogger::new);
        assert_eq!(logger.log_level, log::LevelFilter::Info);

        let logger = temp_env::with_var_unset(LOG_LEVEL_ENV, LocalLogger::new);
        assert_eq!(logger.log_level, log::LevelFilter::Info);
    }

    #[test]
    fn test_debug_records_carry_their_target() {
        let formatted = format_record(
            &log::Record::builder()
                .level(log::Level::Debug)
                .target("lifewatch::monitor")
                .args(format_args!("window holds {} snapshots", 6))
                .build(),
        );
        let line = console::strip_ansi_codes(&formatted).to_string();
        assert_eq!(line, "[DEBUG::lifewatch::monitor] window holds 6 snapshots");
    }
}
