//! Ways to create a [`Stream`] from data that is not already in a sequence

use async_stream::stream;
use futures_core::Stream as AsyncStream;
use futures_util::{pin_mut, StreamExt};

use super::Stream;
use crate::sequence;
use crate::stream_configuration::StreamConfig;

impl<T> Stream<T>
where
    T: Send + 'static,
{
    /// Create a stream from a finite collection.
    ///
    /// The items are published by a background task into a new sequence of
    /// `buffer_size` capacity, which is closed after the last item. Returns
    /// immediately.
    pub fn from_collection<I>(items: I, buffer_size: usize) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: Send + 'static,
    {
        let items = items.into_iter();
        Self::from_async(stream! {
            for item in items {
                yield item;
            }
        }, buffer_size)
    }

    /// Create a stream by pumping an async stream into a new sequence.
    ///
    /// The sequence is closed when `source` ends. If the reader goes away first
    /// the remainder of `source` is not polled.
    pub fn from_async<S>(source: S, buffer_size: usize) -> Self
    where
        S: AsyncStream<Item = T> + Send + 'static,
    {
        let (writer, seq) = sequence::channel(buffer_size);
        let handle = tokio::spawn(async move {
            pin_mut!(source);
            while let Some(item) = source.next().await {
                log::trace!("publishing value");
                if writer.send(item).await.is_err() {
                    log::debug!("stream reader dropped; source abandoned");
                    return;
                }
            }
        });
        Self::new(seq.with_producer(handle))
    }

    /// Create a collection-backed stream using the buffer size and
    /// concurrency of `config`.
    pub fn from_collection_with<I>(items: I, config: &StreamConfig) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: Send + 'static,
    {
        Self::from_collection(items, config.buffer_size).concurrent(config.concurrency)
    }

    /// An empty stream whose sequence is already closed.
    pub fn empty() -> Self {
        let (writer, seq) = sequence::channel(0);
        writer.close();
        Self::new(seq)
    }
}

impl<T> Stream<T> {
    /// Wrap an existing sequence using the concurrency level of `config`.
    ///
    /// The buffer size of `config` does not apply; the sequence already has
    /// its own capacity.
    pub fn with_config(seq: sequence::Sequence<T>, config: &StreamConfig) -> Self {
        Self::new_concurrent(seq, config.concurrency)
    }
}
