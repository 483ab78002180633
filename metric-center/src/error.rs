use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while loading points or computing a center.
#[derive(Debug)]
pub enum Error {
    /// A line of the input is not made of exactly two floating point numbers.
    Parse {
        line: usize,
        content: String,
        reason: String,
    },
    EmptyInput,
    Dimensions { expected: usize, found: usize },
    IndexOutOfRange { index: usize, len: usize },
    /// Every worker came back without a candidate.
    NoCandidates,
    InvalidWorkers,
    UnknownStrategy(String),
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Parse {
                line,
                content,
                reason,
            } => write!(f, "line {}: {} (got {:?})", line, reason, content),
            Error::EmptyInput => write!(f, "the input contains no points"),
            Error::Dimensions { expected, found } => write!(
                f,
                "points must have {} coordinates, found {}",
                expected, found
            ),
            Error::IndexOutOfRange { index, len } => {
                write!(f, "point index {} out of range for {} points", index, len)
            }
            Error::NoCandidates => write!(f, "no worker evaluated any candidate"),
            Error::InvalidWorkers => write!(f, "the number of workers must be at least 1"),
            Error::UnknownStrategy(name) => write!(
                f,
                "unknown partition strategy {:?}, expected \"contiguous\" or \"strided\"",
                name
            ),
            Error::Io(e) => write!(f, "cannot read points: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

#[cfg(feature = "pyo3")]
impl From<Error> for pyo3::PyErr {
    fn from(value: Error) -> Self {
        use pyo3::exceptions::{PyOSError, PyValueError};
        match value {
            Error::Io(e) => PyOSError::new_err(e.to_string()),
            other => PyValueError::new_err(other.to_string()),
        }
    }
}
