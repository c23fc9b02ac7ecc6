use std::error;
use std::fmt;

/// All possible library errors.
/// Each variant stores a message for logging purposes.
#[derive(Clone, Debug)]
pub enum Error {
    /// No sender address resolvable, or a required config key is missing.
    Configuration(String),
    /// The message is not in a sendable shape (e.g. no body was set).
    Validation(String),
    /// The attachment source could not be read.
    Attachment(String),
    /// The provider rejected the supplied credentials.
    Auth(String),
    /// An operation was invoked out of order.
    State(String),
    /// Any other failure surfaced by the provider, passed through unmodified.
    Transport(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::Configuration(ref msg) => write!(f, "Configuration: {}", msg),
            Error::Validation(ref msg) => write!(f, "Validation: {}", msg),
            Error::Attachment(ref msg) => write!(f, "Attachment: {}", msg),
            Error::Auth(ref msg) => write!(f, "Auth: {}", msg),
            Error::State(ref msg) => write!(f, "State: {}", msg),
            Error::Transport(ref msg) => write!(f, "Transport: {}", msg),
        }
    }
}

impl error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Attachment(err.to_string())
    }
}
