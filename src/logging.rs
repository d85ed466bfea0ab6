use crate::error::{Error, Result};
use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::path::Path;

const PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {l} {t} - {m}{n}";

/// Reads `config_file` when it exists, otherwise logs to stderr at `level`.
pub fn init(config_file: &str, level: LevelFilter) -> Result<()> {
    if Path::new(config_file).exists() {
        return log4rs::init_file(config_file, Default::default()).map_err(|err| Error::Logging(err.to_string()));
    }
    let stderr = ConsoleAppender::builder()
        .target(log4rs::append::console::Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(PATTERN)))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level))
        .map_err(|err| Error::Logging(err.to_string()))?;
    log4rs::init_config(config).map_err(|err| Error::Logging(err.to_string()))?;
    Ok(())
}
