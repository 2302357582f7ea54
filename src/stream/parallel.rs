//! Ordered concurrent transforms
//!
//! [`Stream::map`] and friends fan every element out to its own worker and fan
//! the results back in, in input order. A dispatcher reads the input one
//! element at a time; for each element it takes a permit, starts a worker and
//! enqueues the worker's handle (the element's *slot*) on an order-preserving
//! queue. The collector drains that queue strictly in enqueue order, waiting on
//! each slot before emitting its result, so workers may finish in any order
//! without reordering the output.
//!
//! A semaphore with `max(concurrency, 1)` permits bounds the pipeline. The
//! permit lives in the slot and is only released once the collector has
//! emitted the slot's result, so transforms in flight plus results waiting to
//! be emitted never exceed that bound.
//!
//! A panicking worker is fatal: the collector resumes the panic, which then
//! reaches whoever reads the output.

use std::future::Future;
use std::sync::Arc;

use futures_util::StreamExt;
use tokio::sync::{mpsc, OwnedSemaphorePermit, Semaphore};
use tokio::task::JoinHandle;

use super::Stream;
use crate::sequence::resume_if_panicked;

/// Pending result of one element's transform
struct Slot<R> {
    worker: JoinHandle<R>,
    permit: OwnedSemaphorePermit,
}

impl<R> Slot<R> {
    /// Wait for the worker. The permit is handed back so the caller can hold
    /// it until the result has been emitted.
    async fn resolve(self) -> (R, OwnedSemaphorePermit) {
        match self.worker.await {
            Ok(value) => (value, self.permit),
            Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
            Err(_) => panic!("pipeline worker was cancelled before producing a result"),
        }
    }
}

impl<T> Stream<T>
where
    T: Send + 'static,
{
    /// Run `spawn_worker` for every element with bounded concurrency and emit
    /// the workers' results in input order.
    fn ordered<R, W>(self, spawn_worker: W) -> Stream<R>
    where
        R: Send + 'static,
        W: Fn(T) -> JoinHandle<R> + Send + 'static,
    {
        let width = self.concurrency.max(1);

        self.derive(move |mut input, out| async move {
            let permits = Arc::new(Semaphore::new(width));
            let (slots, mut pending) = mpsc::channel::<Slot<R>>(width);

            let dispatcher = tokio::spawn(async move {
                while let Some(value) = input.recv().await {
                    log::trace!("processing value");
                    let Ok(permit) = Arc::clone(&permits).acquire_owned().await else {
                        return;
                    };
                    let slot = Slot {
                        worker: spawn_worker(value),
                        permit,
                    };
                    if slots.send(slot).await.is_err() {
                        return;
                    }
                }
            });

            while let Some(slot) = pending.recv().await {
                let (value, permit) = slot.resolve().await;
                if out.send(value).await.is_err() {
                    log::debug!("ordered pipeline output dropped; stopping dispatch");
                    dispatcher.abort();
                    return;
                }
                drop(permit);
            }

            // The queue only closes once the dispatcher is done; surface its panic, if any.
            if let Err(err) = dispatcher.await {
                resume_if_panicked(err);
            }
        })
    }

    /// Apply `mapper` to every element.
    ///
    /// Up to `max(concurrency, 1)` elements are transformed at once, each on a
    /// blocking-pool thread, and the output keeps the input order. An absent
    /// stream maps to an empty one.
    ///
    /// # Panics
    ///
    /// A panic in `mapper` is resumed on the reader of the returned stream.
    pub fn map<R, F>(self, mapper: F) -> Stream<R>
    where
        R: Send + 'static,
        F: Fn(T) -> R + Send + Sync + 'static,
    {
        let mapper = Arc::new(mapper);
        self.ordered(move |value| {
            let mapper = Arc::clone(&mapper);
            tokio::task::spawn_blocking(move || mapper(value))
        })
    }

    /// Apply an async `mapper` to every element, keeping the input order.
    ///
    /// Like [`Stream::map`] but each transform runs as its own tokio task,
    /// which suits I/O-bound work.
    pub fn eval_map<R, F, Fut>(self, mapper: F) -> Stream<R>
    where
        R: Send + 'static,
        F: Fn(T) -> Fut + Send + 'static,
        Fut: Future<Output = R> + Send + 'static,
    {
        self.ordered(move |value| tokio::spawn(mapper(value)))
    }

    /// Map every element to a stream and flatten the results.
    ///
    /// Groups appear in input order and each group keeps its own order. The
    /// mapping itself goes through the ordered pipeline, so sub-streams for
    /// later elements may already be filling while earlier ones are drained.
    pub fn flat_map<R, F>(self, mapper: F) -> Stream<R>
    where
        R: Send + 'static,
        F: Fn(T) -> Stream<R> + Send + Sync + 'static,
    {
        self.map(mapper).derive(|mut groups, out| async move {
            while let Some(group) = groups.recv().await {
                let Some(mut inner) = group.into_sequence() else {
                    continue;
                };
                while let Some(item) = inner.recv().await {
                    if out.send(item).await.is_err() {
                        return;
                    }
                }
            }
        })
    }

    /// Run `consumer` on every element using up to `max(concurrency, 1)`
    /// workers, without any ordering guarantee. Resolves once the sequence is
    /// closed and every call has returned.
    ///
    /// An absent stream is a no-op.
    ///
    /// # Panics
    ///
    /// Resumes the first panic raised by `consumer`.
    pub async fn for_each_concurrent<F>(self, consumer: F)
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        let width = self.concurrency.max(1);
        let Some(input) = self.seq else {
            log::debug!("empty stream");
            return;
        };

        let consumer = Arc::new(consumer);
        input
            .for_each_concurrent(Some(width), |value| {
                let consumer = Arc::clone(&consumer);
                async move {
                    let worker = tokio::task::spawn_blocking(move || consumer(value));
                    if let Err(err) = worker.await {
                        resume_if_panicked(err);
                    }
                }
            })
            .await;
    }
}
