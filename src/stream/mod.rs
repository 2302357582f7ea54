//! The `Stream` handle and its operations
//!
//! A [`Stream`] pairs a [`Sequence`] with a concurrency level. Intermediate
//! operations consume the handle and return a new one whose sequence is
//! written by a background task; terminal operations drain the sequence and
//! resolve to a value.
//!
//! Every intermediate operation spawns onto the current tokio runtime, so it
//! must be called from within a runtime context.

pub mod constructors;
pub mod core;
pub mod parallel;
pub mod utility;

use std::future::Future;

use crate::error::{StreamError, StreamResult};
use crate::sequence::{self, Sequence, SequenceWriter};

/// A lazily evaluated, possibly unbounded sequence of elements
///
/// The handle may be *absent*, i.e. not backed by any sequence (see
/// [`Stream::absent`]). Operations treat that case either as an empty stream
/// or as [`StreamError::MissingSequence`], as documented on each of them.
pub struct Stream<T> {
    seq: Option<Sequence<T>>,
    concurrency: usize,
}

impl<T> Stream<T> {
    /// Wrap a sequence with concurrency 0.
    ///
    /// The stream never closes a sequence it was given; the producer must.
    pub fn new(seq: Sequence<T>) -> Self {
        Self::new_concurrent(seq, 0)
    }

    /// Wrap a sequence with the given concurrency level.
    pub fn new_concurrent(seq: Sequence<T>, concurrency: usize) -> Self {
        Self {
            seq: Some(seq),
            concurrency,
        }
    }

    /// Wrap a sequence handle that may be missing.
    pub fn try_from_sequence(seq: Option<Sequence<T>>) -> StreamResult<Self> {
        seq.map(Self::new).ok_or(StreamError::MissingSequence)
    }

    /// A handle with no underlying sequence.
    pub fn absent() -> Self {
        Self {
            seq: None,
            concurrency: 0,
        }
    }

    /// Whether the handle has no underlying sequence
    pub fn is_absent(&self) -> bool {
        self.seq.is_none()
    }

    /// The stream's concurrency level (0 = sequential)
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Set the concurrency level used by ordered transforms such as
    /// [`Stream::map`].
    ///
    /// The underlying sequence is reused as is; nothing is copied or restarted.
    ///
    /// With `n = 0` transforms run one at a time. With `n = 1` they still run
    /// one at a time, but on a worker, so the upstream writer does not wait on
    /// the transform. Larger values only pay off when the transform has real
    /// latency; for cheap transforms the synchronisation costs more than it
    /// saves.
    pub fn concurrent(self, n: usize) -> Self {
        Self {
            seq: self.seq,
            concurrency: n,
        }
    }

    /// Give up the handle and return the underlying sequence, if any.
    pub fn into_sequence(self) -> Option<Sequence<T>> {
        self.seq
    }

    fn capacity(&self) -> usize {
        self.seq.as_ref().map_or(0, Sequence::capacity)
    }

    fn require_sequence(self) -> StreamResult<(Sequence<T>, usize)> {
        match self.seq {
            Some(seq) => Ok((seq, self.concurrency)),
            None => Err(StreamError::MissingSequence),
        }
    }
}

impl<T> Stream<T>
where
    T: Send + 'static,
{
    /// Derive a new stream whose sequence is written by `body` on a background
    /// task. The output inherits the input's capacity and concurrency.
    ///
    /// An absent input produces an already closed, empty output without
    /// spawning anything.
    pub(crate) fn derive<R, F, Fut>(self, body: F) -> Stream<R>
    where
        R: Send + 'static,
        F: FnOnce(Sequence<T>, SequenceWriter<R>) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let capacity = self.capacity();
        let concurrency = self.concurrency;
        let (writer, output) = sequence::channel(capacity);

        let Some(input) = self.seq else {
            log::debug!("empty stream");
            writer.close();
            return Stream::new_concurrent(output, concurrency);
        };

        let handle = tokio::spawn(body(input, writer));
        Stream::new_concurrent(output.with_producer(handle), concurrency)
    }
}

impl<T> Default for Stream<T> {
    fn default() -> Self {
        Self::absent()
    }
}

impl<T> From<Sequence<T>> for Stream<T> {
    fn from(seq: Sequence<T>) -> Self {
        Self::new(seq)
    }
}

impl<T> std::fmt::Debug for Stream<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stream")
            .field("seq", &self.seq)
            .field("concurrency", &self.concurrency)
            .finish()
    }
}
