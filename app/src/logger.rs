use std::str::FromStr;

use crossbeam::channel::{Receiver, Sender, unbounded};
use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};

/// The environment variable read for the log level.
pub const LOG_ENV: &str = "SIGNET_LOG";

#[derive(Debug)]
pub struct LogMessage {
    pub level: Level,
    pub target: String,
    pub message: String,
}

/// A logger that forwards every enabled record over a channel, to be drained by the main loop.
pub struct ChannelLogger {
    level: LevelFilter,
    sender: Sender<LogMessage>,
}

impl log::Log for ChannelLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let _ = self.sender.try_send(LogMessage {
                level: record.level(),
                target: record.target().to_string(),
                message: format!("{}", record.args()),
            });
        }
    }

    fn flush(&self) {}
}

impl ChannelLogger {
    pub fn new(level: LevelFilter, sender: Sender<LogMessage>) -> Self {
        Self { level, sender }
    }

    pub fn with_receiver(level: LevelFilter) -> (Self, Receiver<LogMessage>) {
        let (sender, receiver) = unbounded();
        (Self::new(level, sender), receiver)
    }
}

/// Parse a level name, falling back to `Info` for anything unrecognised.
pub fn parse_level(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|value| LevelFilter::from_str(value.trim()).ok())
        .unwrap_or(LevelFilter::Info)
}

/// Read the log level from `SIGNET_LOG`.
pub fn level_from_env() -> LevelFilter {
    parse_level(std::env::var(LOG_ENV).ok().as_deref())
}

/// Install a channel logger as the global logger and return the receiving end.
pub fn install(level: LevelFilter) -> Result<Receiver<LogMessage>, SetLoggerError> {
    let (logger, receiver) = ChannelLogger::with_receiver(level);
    log::set_logger(Box::leak(Box::new(logger)))?;
    log::set_max_level(level);
    Ok(receiver)
}

/// Print every pending message.
pub fn drain(receiver: &Receiver<LogMessage>) {
    for message in receiver.try_iter() {
        println!(
            "[{:<5} {}] {}",
            message.level, message.target, message.message
        );
    }
}
