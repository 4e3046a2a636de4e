//! File logging through log4rs.
//!
//! The game owns the terminal, so log lines never go to stdout or stderr.
//! Without a configured path nothing is installed and the `log` macros are no-ops.

use std::path::Path;

use anyhow::{Context, Result};
use log::LevelFilter;
use log4rs::{
    append::file::FileAppender,
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Handle,
};

const PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} {l:<5} {t} {m}{n}";

/// Build the log4rs configuration for a single file appender.
pub fn file_config(path: &Path, level: LevelFilter) -> Result<Config> {
    let logfile = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(PATTERN)))
        .build(path)
        .with_context(|| format!("cannot open log file {}", path.display()))?;

    let config = Config::builder()
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(level)))
                .build("logfile", Box::new(logfile)),
        )
        .build(Root::builder().appender("logfile").build(level))
        .context("invalid log configuration")?;
    Ok(config)
}

/// Install the global logger when `path` is set.
pub fn init(path: Option<&Path>, level: LevelFilter) -> Result<Option<Handle>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let handle = log4rs::init_config(file_config(path, level)?)
        .context("a logger is already installed")?;
    Ok(Some(handle))
}
