// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types.
//!
//! Configuration-time problems ([`LogError`]) are returned to the caller. Problems while
//! writing a line ([`WriteFailure`]) are produced by writers but never escape a leveled
//! call; the logger drops them so the host application keeps running.

use std::error::Error;
use std::fmt::Display;
use std::io;
use std::path::PathBuf;

/// Failures surfaced while configuring a logger.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("invalid log level `{0}`")]
    InvalidLevel(String),
    #[error("target path {} is not a directory", .0.display())]
    NotADirectory(PathBuf),
    #[error("failed when trying to create directory {}", path.display())]
    DirectoryCreate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot bind log file {}", path.display())]
    FileBind {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot read {}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Why a single line could not be delivered.
#[derive(Debug, thiserror::Error)]
pub enum WriteFailure {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("stream writer is not connected")]
    Disconnected,
    #[error("stream queue is full")]
    QueueFull,
}

/// Problems reported by a [`FigletEngine`](crate::banner::FigletEngine).
#[derive(Debug, thiserror::Error)]
pub enum BannerError {
    #[error("font `{0}` is not available")]
    UnknownFont(String),
    #[error("could not install font {}", path.display())]
    Install {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not render banner: {0}")]
    Render(String),
}

/// The structured failure logged by [`Logger::err`](crate::Logger::err).
///
/// Whatever was handed to `err` is normalised into this type, so callers that re-raise
/// always get the same shape back.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct LoggedError {
    message: String,
    #[source]
    source: Option<Box<dyn Error + Send + Sync + 'static>>,
}

impl LoggedError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The original error, if `err` was given one rather than a bare value.
    pub fn inner(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        self.source.as_deref()
    }
}

/// Anything that can be passed to [`Logger::err`](crate::Logger::err).
///
/// Either a real error or an arbitrary value; both become a [`LoggedError`].
#[derive(Debug)]
pub enum Failure {
    Error(Box<dyn Error + Send + Sync + 'static>),
    Value(String),
}

impl Failure {
    pub fn error(error: impl Error + Send + Sync + 'static) -> Self {
        Failure::Error(Box::new(error))
    }

    pub fn value(value: impl Display) -> Self {
        Failure::Value(value.to_string())
    }

    /// Normalises into the structured form.
    pub fn into_logged(self) -> LoggedError {
        match self {
            Failure::Error(error) => match error.downcast::<LoggedError>() {
                Ok(logged) => *logged,
                Err(error) => LoggedError {
                    message: error.to_string(),
                    source: Some(error),
                },
            },
            Failure::Value(message) => LoggedError::new(message),
        }
    }
}

impl From<LoggedError> for Failure {
    fn from(error: LoggedError) -> Self {
        Failure::Error(Box::new(error))
    }
}

impl From<LogError> for Failure {
    fn from(error: LogError) -> Self {
        Failure::error(error)
    }
}

impl From<io::Error> for Failure {
    fn from(error: io::Error) -> Self {
        Failure::error(error)
    }
}

impl From<Box<dyn Error + Send + Sync + 'static>> for Failure {
    fn from(error: Box<dyn Error + Send + Sync + 'static>) -> Self {
        Failure::Error(error)
    }
}

impl From<String> for Failure {
    fn from(value: String) -> Self {
        Failure::Value(value)
    }
}

impl From<&str> for Failure {
    fn from(value: &str) -> Self {
        Failure::Value(value.to_string())
    }
}
