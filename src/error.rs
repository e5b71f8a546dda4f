//! Error Types for Path Resolution and File Access

use std::io;

use derive_more::{Display, Error};

#[derive(Debug, PartialEq, Eq, Display)]
#[non_exhaustive]
pub enum UriSegmentError {
    /// Segment started with the wrapped invalid character.
    #[display("segment started with invalid character: ('{_0}')")]
    BadStart(char),

    /// Segment contained the wrapped invalid character.
    #[display("segment contained invalid character ('{_0}')")]
    BadChar(char),

    /// Segment ended with the wrapped invalid character.
    #[display("segment ended with invalid character: ('{_0}')")]
    BadEnd(char),

    /// Segment walks up to a parent directory.
    #[display("segment escapes its parent directory")]
    ParentDir,

    /// Path is not a valid UTF-8 string after percent-decoding.
    #[display("path is not a valid UTF-8 string after percent-decoding")]
    NotValidUtf8,
}

impl std::error::Error for UriSegmentError {}

/// Failure to open a file through a [`ServeFileSystem`](crate::ServeFileSystem).
#[derive(Debug, Display, Error)]
#[non_exhaustive]
pub enum OpenError {
    /// Path does not resolve to a readable file under the root.
    #[display("file not found")]
    NotFound,

    /// Path resolved but the file could not be opened for reading.
    #[display("file not readable: {_0}")]
    NotReadable(#[error(source)] io::Error),
}

impl From<UriSegmentError> for OpenError {
    #[inline]
    fn from(_: UriSegmentError) -> Self {
        Self::NotFound
    }
}

impl From<io::Error> for OpenError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound,
            _ => Self::NotReadable(err),
        }
    }
}
