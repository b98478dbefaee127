use std::convert::From;
use std::error;
use std::fmt;
use std::io;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub struct Error {
    pub kind: ErrorKind,
    pub message: Option<String>,
}

#[derive(Debug)]
pub enum ErrorKind {
    /// Transport-level failure talking to the count API.
    Network,
    /// The API rejected our credentials (401/403).
    Auth(u16),
    /// Any other non-success HTTP status.
    Status(u16),
    /// The response body was not the documented JSON shape.
    MalformedResponse,
    Config,
    IOError(io::Error),
}

impl Error {
    pub fn new(kind: ErrorKind, msg: &str) -> Self {
        Error {
            kind,
            message: Some(msg.to_owned()),
        }
    }

    pub fn with_msg(mut self, message: &str) -> Self {
        self.message = Some(message.to_owned());
        self
    }

    pub fn from_status(status: u16) -> Self {
        if status == 401 || status == 403 {
            Error::from(ErrorKind::Auth(status))
        } else {
            Error::from(ErrorKind::Status(status))
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            kind,
            message: None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Error {
        let kind = match error.status() {
            Some(status) if status.as_u16() == 401 || status.as_u16() == 403 => {
                ErrorKind::Auth(status.as_u16())
            }
            Some(status) => ErrorKind::Status(status.as_u16()),
            None if error.is_decode() => ErrorKind::MalformedResponse,
            None => ErrorKind::Network,
        };

        Error::new(kind, &error.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Error {
        Error::new(
            ErrorKind::MalformedResponse,
            &format!("could not decode count response: {}", error),
        )
    }
}

impl From<toml::de::Error> for Error {
    fn from(error: toml::de::Error) -> Error {
        Error::new(
            ErrorKind::Config,
            &format!("could not parse config file: {}", error),
        )
    }
}

impl From<io::Error> for Error {
    fn from(io_error: io::Error) -> Error {
        Error::from(ErrorKind::IOError(io_error))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(msg) => write!(f, "{}: {}", self.kind.as_str(), msg),
            None => write!(f, "{}", self.kind.as_str()),
        }
    }
}

impl error::Error for Error {}

impl ErrorKind {
    pub fn as_str(&self) -> String {
        match self {
            ErrorKind::Network => "count request failed".to_owned(),
            ErrorKind::Auth(status) => format!("count request unauthorized ({})", status),
            ErrorKind::Status(status) => format!("count request returned status {}", status),
            ErrorKind::MalformedResponse => "invalid count response".to_owned(),
            ErrorKind::Config => "invalid configuration".to_owned(),
            ErrorKind::IOError(err) => err.to_string(),
        }
    }
}
