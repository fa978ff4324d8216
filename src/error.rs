//! All error types for the songcodec crate.
//!
//! These are returned from all fallible operations (parsing, serialization, file I/O, etc.).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("unknown manifest `{0}`")]
    UnknownManifest(String),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid data: {0}")]
    DataMismatch(String),
}
