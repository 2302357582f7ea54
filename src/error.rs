//! Error types for stream operations
//!
//! Only element accessors and operations that need a backing sequence can
//! fail. Panics raised by user closures are not represented here; they are
//! resumed on the consumer of the affected stream.

use std::fmt;

/// Main error type for stream operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StreamError {
    /// The stream handle is not backed by a sequence
    #[error("stream has no underlying sequence")]
    MissingSequence,
    /// The sequence yielded fewer elements than the operation requires
    #[error("no such element")]
    NoSuchElement,
    /// An argument was outside of its accepted range
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type for stream operations
pub type StreamResult<T> = Result<T, StreamError>;

/// Error returned by [`SequenceWriter::send`](crate::sequence::SequenceWriter::send)
/// when the reading side has gone away. The rejected item is handed back.
#[derive(PartialEq, Eq)]
pub enum SequenceError<T> {
    /// The reader was dropped before the item could be delivered
    Closed(T),
}

impl<T> SequenceError<T> {
    pub fn into_inner(self) -> T {
        match self {
            SequenceError::Closed(item) => item,
        }
    }
}

impl<T> fmt::Debug for SequenceError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SequenceError::Closed(_) => f.write_str("Closed(..)"),
        }
    }
}

impl<T> fmt::Display for SequenceError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SequenceError::Closed(_) => write!(f, "Sequence reader has been dropped"),
        }
    }
}

impl<T> std::error::Error for SequenceError<T> {}
