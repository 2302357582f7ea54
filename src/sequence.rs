//! Bounded, single-consumer sequences
//!
//! A [`Sequence`] is the channel every [`Stream`](crate::Stream) is built on:
//! an ordered queue with a fixed capacity, exactly one reader and a close-once
//! end-of-data signal. The writing side is a [`SequenceWriter`]; closing it (or
//! dropping it) is the only way a sequence ends.
//!
//! Sequences created by the engine also remember the task that writes them.
//! When the reader reaches the end it joins that task, so a panic raised while
//! producing is resumed on the reader instead of looking like a short sequence.

use futures_core::Stream as AsyncStream;
use std::fmt;
use std::future::{poll_fn, Future};
use std::pin::Pin;
use std::task::{ready, Context, Poll};
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinHandle};

use crate::error::SequenceError;

/// Create a new sequence with the given buffer capacity.
///
/// A capacity of 0 asks for an unbuffered sequence. Tokio channels need at
/// least one slot, so the writer may run one element ahead of the reader; the
/// requested value is still what [`Sequence::capacity`] reports.
pub fn channel<T>(capacity: usize) -> (SequenceWriter<T>, Sequence<T>) {
    let (sender, receiver) = mpsc::channel(capacity.max(1));
    (
        SequenceWriter { sender },
        Sequence {
            receiver,
            capacity,
            producer: None,
            exhausted: false,
        },
    )
}

/// Writing half of a [`Sequence`]
pub struct SequenceWriter<T> {
    sender: mpsc::Sender<T>,
}

impl<T> SequenceWriter<T> {
    /// Push an item, waiting while the sequence is full.
    ///
    /// Fails once the reader has been dropped; the item is returned inside the
    /// error.
    pub async fn send(&self, item: T) -> Result<(), SequenceError<T>> {
        self.sender
            .send(item)
            .await
            .map_err(|mpsc::error::SendError(item)| SequenceError::Closed(item))
    }

    /// Whether the reader has gone away
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    /// Signal end-of-sequence. Buffered items remain readable.
    pub fn close(self) {}
}

impl<T> fmt::Debug for SequenceWriter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SequenceWriter")
            .field("closed", &self.is_closed())
            .finish()
    }
}

/// Reading half of a sequence: ordered, possibly unbounded, single consumer
pub struct Sequence<T> {
    receiver: mpsc::Receiver<T>,
    capacity: usize,
    producer: Option<JoinHandle<()>>,
    exhausted: bool,
}

impl<T> Sequence<T> {
    /// Buffer capacity requested when the sequence was created
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether end-of-sequence has already been observed
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Attach the task writing this sequence so its outcome is checked at the end.
    pub(crate) fn with_producer(mut self, handle: JoinHandle<()>) -> Self {
        self.producer = Some(handle);
        self
    }

    /// Poll for the next item.
    ///
    /// # Panics
    ///
    /// Resumes the panic of the producing task, if it panicked.
    pub fn poll_recv(&mut self, cx: &mut Context<'_>) -> Poll<Option<T>> {
        if self.exhausted {
            return Poll::Ready(None);
        }

        if let Some(item) = ready!(self.receiver.poll_recv(cx)) {
            return Poll::Ready(Some(item));
        }

        if let Some(handle) = self.producer.as_mut() {
            let outcome = ready!(Pin::new(handle).poll(cx));
            self.producer = None;
            if let Err(err) = outcome {
                resume_if_panicked(err);
            }
        }

        self.exhausted = true;
        Poll::Ready(None)
    }

    /// Receive the next item, or `None` once the sequence is closed and drained.
    ///
    /// # Panics
    ///
    /// Resumes the panic of the producing task, if it panicked.
    pub async fn recv(&mut self) -> Option<T> {
        poll_fn(|cx| self.poll_recv(cx)).await
    }
}

impl<T> AsyncStream for Sequence<T> {
    type Item = T;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<T>> {
        self.get_mut().poll_recv(cx)
    }
}

impl<T> fmt::Debug for Sequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sequence")
            .field("capacity", &self.capacity)
            .field("exhausted", &self.exhausted)
            .finish()
    }
}

/// Re-raise a task panic on the current thread. Cancelled tasks are ignored.
pub(crate) fn resume_if_panicked(err: JoinError) {
    if err.is_panic() {
        std::panic::resume_unwind(err.into_panic());
    }
    log::debug!("producer task was cancelled");
}
