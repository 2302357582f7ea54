//! Sequential intermediate operations
//!
//! Each operation is a single read-transform-write loop running on its own
//! task. They preserve input order, copy the concurrency level forward, and
//! stop reading as soon as the output is dropped.

use std::collections::HashSet;
use std::hash::Hash;

use super::Stream;
use crate::error::StreamResult;

impl<T> Stream<T>
where
    T: Send + 'static,
{
    /// Keep only the elements matching `predicate`.
    ///
    /// An absent stream filters to an empty one.
    pub fn filter<P>(self, mut predicate: P) -> Self
    where
        P: FnMut(&T) -> bool + Send + 'static,
    {
        self.derive(|mut input, out| async move {
            while let Some(item) = input.recv().await {
                if predicate(&item) && out.send(item).await.is_err() {
                    return;
                }
            }
        })
    }

    /// Emit the first occurrence of every distinct element.
    ///
    /// Fails with [`MissingSequence`](crate::StreamError::MissingSequence) on
    /// an absent stream.
    pub fn distinct(self) -> StreamResult<Self>
    where
        T: Eq + Hash + Clone,
    {
        let (seq, concurrency) = self.require_sequence()?;
        Ok(Stream::new_concurrent(seq, concurrency).derive(|mut input, out| async move {
            let mut seen = HashSet::new();
            while let Some(item) = input.recv().await {
                if seen.insert(item.clone()) && out.send(item).await.is_err() {
                    return;
                }
            }
        }))
    }

    /// Emit elements while `predicate` holds; the first failing element and
    /// everything after it are discarded.
    ///
    /// Fails with [`MissingSequence`](crate::StreamError::MissingSequence) on
    /// an absent stream.
    pub fn take_while<P>(self, mut predicate: P) -> StreamResult<Self>
    where
        P: FnMut(&T) -> bool + Send + 'static,
    {
        let (seq, concurrency) = self.require_sequence()?;
        Ok(Stream::new_concurrent(seq, concurrency).derive(|mut input, out| async move {
            while let Some(item) = input.recv().await {
                if !predicate(&item) || out.send(item).await.is_err() {
                    return;
                }
            }
        }))
    }

    /// Emit elements until one satisfies `predicate`.
    ///
    /// Fails with [`MissingSequence`](crate::StreamError::MissingSequence) on
    /// an absent stream.
    pub fn take_until<P>(self, mut predicate: P) -> StreamResult<Self>
    where
        P: FnMut(&T) -> bool + Send + 'static,
    {
        self.take_while(move |item| !predicate(item))
    }

    /// Emit at most the first `n` elements.
    ///
    /// Fails with [`MissingSequence`](crate::StreamError::MissingSequence) on
    /// an absent stream.
    pub fn limit(self, n: usize) -> StreamResult<Self> {
        let (seq, concurrency) = self.require_sequence()?;
        Ok(Stream::new_concurrent(seq, concurrency).derive(move |mut input, out| async move {
            let mut remaining = n;
            while remaining > 0 {
                let Some(item) = input.recv().await else {
                    return;
                };
                if out.send(item).await.is_err() {
                    return;
                }
                remaining -= 1;
            }
        }))
    }

    /// Discard the leading run of elements matching `predicate`, then emit
    /// the rest unchanged.
    pub fn drop_while<P>(self, mut predicate: P) -> Self
    where
        P: FnMut(&T) -> bool + Send + 'static,
    {
        self.derive(|mut input, out| async move {
            let mut dropping = true;
            while let Some(item) = input.recv().await {
                if dropping && predicate(&item) {
                    continue;
                }
                dropping = false;
                if out.send(item).await.is_err() {
                    return;
                }
            }
        })
    }

    /// Discard elements until one satisfies `predicate`; that element and the
    /// rest are emitted.
    pub fn drop_until<P>(self, mut predicate: P) -> Self
    where
        P: FnMut(&T) -> bool + Send + 'static,
    {
        self.drop_while(move |item| !predicate(item))
    }

    /// Discard the first `n` elements.
    pub fn drop(self, n: usize) -> Self {
        self.derive(move |mut input, out| async move {
            let mut skipped = 0;
            while let Some(item) = input.recv().await {
                if skipped < n {
                    skipped += 1;
                    continue;
                }
                if out.send(item).await.is_err() {
                    return;
                }
            }
        })
    }

    /// Call `consumer` on every element as it passes through.
    pub fn peek<C>(self, mut consumer: C) -> Self
    where
        C: FnMut(&T) + Send + 'static,
    {
        self.derive(|mut input, out| async move {
            while let Some(item) = input.recv().await {
                consumer(&item);
                if out.send(item).await.is_err() {
                    return;
                }
            }
        })
    }

    /// Insert `separator` between every two consecutive elements.
    pub fn intersperse(self, separator: T) -> Self
    where
        T: Clone,
    {
        self.derive(|mut input, out| async move {
            let Some(first) = input.recv().await else {
                return;
            };
            if out.send(first).await.is_err() {
                return;
            }
            while let Some(item) = input.recv().await {
                if out.send(separator.clone()).await.is_err() || out.send(item).await.is_err() {
                    return;
                }
            }
        })
    }
}
