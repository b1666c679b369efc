use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use log::LevelFilter;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub prompt: String,
    pub log_level: LevelFilter,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        ConfigLoader::default_config()
    }
}

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn default_config() -> Config {
        Config {
            prompt: ">> ".to_string(),
            log_level: LevelFilter::Off,
            log_file: None,
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let src = fs::read_to_string(path)?;
        Self::load_from_str(&src)
    }

    /// `key=value` per line; `#` comments and blank lines are skipped.
    pub fn load_from_str(src: &str) -> Result<Config, ConfigError> {
        let mut config = Self::default_config();

        for (lineno, line) in src.lines().enumerate() {
            let lineno = lineno + 1;
            if line.trim().is_empty() || line.trim_start().starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                return Err(ConfigError::Parse(format!("line {}: no '=' found: {}", lineno, line)));
            };

            match key.trim() {
                // the prompt keeps its surrounding whitespace
                "prompt" => config.prompt = value.to_string(),
                "log_level" => {
                    config.log_level = value.trim().parse().map_err(|_| {
                        ConfigError::Parse(format!("line {}: invalid log level: {}", lineno, value.trim()))
                    })?;
                }
                "log_file" => {
                    let value = value.trim();
                    config.log_file = (!value.is_empty()).then(|| PathBuf::from(value));
                }
                k => return Err(ConfigError::Parse(format!("line {}: unknown key: {}", lineno, k))),
            }
        }

        Ok(config)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("parse error: {0}")]
    Parse(String),
}
