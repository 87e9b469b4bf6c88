//! Error kinds surfaced at I/O and projection boundaries.
//!
//! Record-by-record query scans never return these; per-record failures are
//! logged and skipped inside the scan.

use std::fmt;

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    Json(serde_json::Error),
    Yaml(serde_yaml::Error),
    UnknownId(String),
    MismatchedProjection { sources: usize, displays: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "i/o failure: {}", e),
            Error::Json(e) => write!(f, "store serialization failure: {}", e),
            Error::Yaml(e) => write!(f, "config serialization failure: {}", e),
            Error::UnknownId(id) => write!(f, "identifier {:?} not in index", id),
            Error::MismatchedProjection { sources, displays } => {
                write!(f, "projection lists differ in length ({} sources, {} display names)", sources, displays)
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::Io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Error {
        Error::Json(e)
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(e: serde_yaml::Error) -> Error {
        Error::Yaml(e)
    }
}
