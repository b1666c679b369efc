use std::fs::OpenOptions;
use std::io;
use log::LevelFilter;
use simplelog::{ColorChoice, Config as LogConfig, TermLogger, TerminalMode, WriteLogger};
use crate::config::Config;

/// Install the global logger. With `log_file` set, records are appended to
/// that file; otherwise they go to stderr. `Off` installs nothing.
pub fn init(config: &Config) -> io::Result<()> {
    if config.log_level == LevelFilter::Off {
        return Ok(());
    }

    let result = match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            WriteLogger::init(config.log_level, LogConfig::default(), file)
        }
        None => TermLogger::init(
            config.log_level,
            LogConfig::default(),
            TerminalMode::Stderr,
            ColorChoice::Never,
        ),
    };
    result.map_err(io::Error::other)
}
