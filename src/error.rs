use thiserror::Error;

use crate::network::InputFormat;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("unknown backend: {0}")]
    UnknownBackend(String),
    #[error("no backends registered")]
    NoBackends,
    #[error("backend expects input format {expected:?}, got {actual:?}")]
    IncompatibleInputFormat { expected: InputFormat, actual: InputFormat },
    #[error("invalid value for option '{key}': {reason}")]
    InvalidOption { key: String, reason: String },
    #[error("malformed backend options '{0}'")]
    MalformedOptions(String),
}
