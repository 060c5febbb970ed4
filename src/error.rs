//! Error types for the outer surface of the splitter (files and options).
//!
//! The transform itself cannot fail: contract violations are assertions and a trailing
//! odd byte is simply dropped.

use thiserror::Error;

/// The three streams a splitting run touches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stream {
    Input,
    Low,
    High,
}

/// Error variants for a splitting run.
#[derive(Debug, Error)]
pub enum Error {
    /// Both outputs would go to the same file and interleave.
    #[error("low and high outputs are the same file: {0}")]
    SameOutput(String),

    /// Reading or writing one of the streams failed while splitting.
    #[error("io error on {stream:?} stream: {source}")]
    Stream {
        stream: Stream,
        #[source]
        source: std::io::Error,
    },

    /// Opening, reading or writing a file failed.
    #[error("io error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Wrap an I/O error with the path it happened on.
    pub fn io(path: &str, source: std::io::Error) -> Self {
        Error::Io {
            path: path.to_string(),
            source,
        }
    }
}

impl Stream {
    /// Attach this stream to an I/O error.
    pub fn err(self) -> impl FnOnce(std::io::Error) -> Error {
        move |source| Error::Stream {
            stream: self,
            source,
        }
    }
}

/// A specialized Result type for splitting runs.
pub type Result<T> = std::result::Result<T, Error>;
