use std::fmt;

#[derive(Debug)]
pub enum Error {
    InvalidAmount(String),
    Config(config::ConfigError),
    Snapshot(serde_json::Error),
    Io(std::io::Error),
    Logging(String),
    Calculation(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::InvalidAmount(amount) => write!(f, "invalid amount {:?}", amount),
            Error::Config(err) => write!(f, "configuration: {}", err),
            Error::Snapshot(err) => write!(f, "snapshot: {}", err),
            Error::Io(err) => write!(f, "io: {}", err),
            Error::Logging(msg) => write!(f, "logging: {}", msg),
            Error::Calculation(msg) => write!(f, "balance calculation: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Config(err) => Some(err),
            Error::Snapshot(err) => Some(err),
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Error::Config(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Snapshot(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}
