// SHA3x Proxy - Free and Open Source Software Statement
//
// This project, sha3x-proxy, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/utils/logging.rs
// Version: 1.0.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// log4rs setup for the proxy binary. A YAML file (see log4rs_sample.yml)
// takes precedence; otherwise everything goes to the console.

use crate::Result;
use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::path::Path;
use std::str::FromStr;

const CONSOLE_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} {h({l:5})} [{t}] {m}{n}";

/// Install the global logger. Can only succeed once per process.
pub fn init_logging(log_config: Option<&Path>, level: &str) -> Result<()> {
    if let Some(path) = log_config {
        log4rs::init_file(path, Default::default())?;
        return Ok(());
    }
    log4rs::init_config(console_config(level)?)?;
    Ok(())
}

fn console_config(level: &str) -> Result<Config> {
    let level = LevelFilter::from_str(level)?;
    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(CONSOLE_PATTERN)))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(Root::builder().appender("stdout").build(level))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_config_levels() {
        assert!(console_config("debug").is_ok());
        assert!(console_config("WARN").is_ok());
        assert!(console_config("chatty").is_err());
    }
}

// Changelog:
// - v1.0.0 (2025-07-02): Console and file based log4rs initialisation.
