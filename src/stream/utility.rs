//! Terminal operations
//!
//! These drain the stream, fully or partially, on the caller's task and
//! resolve to a concrete value. A sequence that is never closed makes the
//! full-drain operations wait forever.

use std::collections::{HashMap, VecDeque};
use std::hash::Hash;

use super::Stream;
use crate::collectors::Collector;
use crate::error::{StreamError, StreamResult};

impl<T> Stream<T> {
    /// Call `consumer` on every element until the sequence closes.
    ///
    /// An absent stream is a no-op.
    pub async fn for_each<C>(self, mut consumer: C)
    where
        C: FnMut(T),
    {
        let Some(mut seq) = self.seq else {
            log::debug!("empty stream");
            return;
        };
        while let Some(item) = seq.recv().await {
            log::trace!("calling consumer");
            consumer(item);
        }
    }

    /// Left fold without a seed: `None` for an empty or absent stream, the
    /// only element for a single-element stream, otherwise
    /// `op(op(e0, e1), e2)...` in order.
    pub async fn reduce<F>(self, mut op: F) -> Option<T>
    where
        F: FnMut(T, T) -> T,
    {
        let mut seq = self.seq?;
        let mut acc = seq.recv().await?;
        while let Some(item) = seq.recv().await {
            acc = op(acc, item);
        }
        Some(acc)
    }

    /// Fold the elements with `collector`.
    ///
    /// Fails with [`StreamError::MissingSequence`] on an absent stream.
    pub async fn collect<A, R>(self, collector: Collector<T, A, R>) -> StreamResult<R> {
        let (mut seq, _) = self.require_sequence()?;
        let mut acc = collector.supply();
        while let Some(item) = seq.recv().await {
            acc = collector.accumulate(acc, item);
        }
        Ok(collector.finish(acc))
    }

    /// Number of elements; 0 for an absent stream.
    pub async fn count(self) -> usize {
        let Some(mut seq) = self.seq else {
            return 0;
        };
        let mut count = 0;
        while seq.recv().await.is_some() {
            count += 1;
        }
        count
    }

    /// Whether any element satisfies `predicate`. Stops at the first match.
    ///
    /// `false` for an empty or absent stream.
    pub async fn any_match<P>(self, mut predicate: P) -> bool
    where
        P: FnMut(&T) -> bool,
    {
        let Some(mut seq) = self.seq else {
            return false;
        };
        while let Some(item) = seq.recv().await {
            if predicate(&item) {
                return true;
            }
        }
        false
    }

    /// Whether every element satisfies `predicate`. Stops at the first miss.
    ///
    /// Unlike the usual vacuous-truth convention this is `false` for an empty
    /// or absent stream.
    pub async fn all_match<P>(self, mut predicate: P) -> bool
    where
        P: FnMut(&T) -> bool,
    {
        let Some(mut seq) = self.seq else {
            return false;
        };
        let mut matched = false;
        while let Some(item) = seq.recv().await {
            if !predicate(&item) {
                return false;
            }
            matched = true;
        }
        matched
    }

    /// Whether no element satisfies `predicate`; `true` for an empty or
    /// absent stream.
    pub async fn none_match<P>(self, predicate: P) -> bool
    where
        P: FnMut(&T) -> bool,
    {
        !self.any_match(predicate).await
    }

    /// First element.
    ///
    /// Fails with [`StreamError::MissingSequence`] on an absent stream and
    /// [`StreamError::NoSuchElement`] on an empty one.
    pub async fn head(self) -> StreamResult<T> {
        let (mut seq, _) = self.require_sequence()?;
        seq.recv().await.ok_or(StreamError::NoSuchElement)
    }

    /// Up to the first `n` elements; reads nothing more than that.
    ///
    /// Fails with [`StreamError::MissingSequence`] on an absent stream.
    pub async fn head_n(self, n: usize) -> StreamResult<Vec<T>> {
        let (mut seq, _) = self.require_sequence()?;
        let mut items = Vec::new();
        while items.len() < n {
            match seq.recv().await {
                Some(item) => items.push(item),
                None => break,
            }
        }
        Ok(items)
    }

    /// Last element. Drains the whole stream.
    ///
    /// Fails with [`StreamError::MissingSequence`] on an absent stream and
    /// [`StreamError::NoSuchElement`] on an empty one.
    pub async fn last(self) -> StreamResult<T> {
        let mut tail = self.last_n(1).await?;
        tail.pop().ok_or(StreamError::NoSuchElement)
    }

    /// The last `n` elements, or all of them if the stream is shorter.
    /// Drains the whole stream.
    ///
    /// Fails with [`StreamError::MissingSequence`] on an absent stream,
    /// [`StreamError::InvalidArgument`] when `n` is 0 and
    /// [`StreamError::NoSuchElement`] on an empty stream.
    pub async fn last_n(self, n: usize) -> StreamResult<Vec<T>> {
        let (mut seq, _) = self.require_sequence()?;
        if n < 1 {
            return Err(StreamError::InvalidArgument(format!(
                "last_n needs at least one element, got n = {}",
                n
            )));
        }

        let mut window = VecDeque::new();
        while let Some(item) = seq.recv().await {
            if window.len() == n {
                window.pop_front();
            }
            window.push_back(item);
        }

        if window.is_empty() {
            return Err(StreamError::NoSuchElement);
        }
        Ok(window.into())
    }

    /// Whether the stream starts with `prefix`. Reads at most `prefix.len()`
    /// elements. An empty prefix never matches.
    ///
    /// Fails with [`StreamError::MissingSequence`] on an absent stream.
    pub async fn starts_with(self, prefix: &[T]) -> StreamResult<bool>
    where
        T: PartialEq,
    {
        let (mut seq, _) = self.require_sequence()?;
        if prefix.is_empty() {
            return Ok(false);
        }
        for expected in prefix {
            match seq.recv().await {
                Some(item) if item == *expected => {}
                _ => return Ok(false),
            }
        }
        Ok(true)
    }

    /// Whether the stream ends with `suffix`. Drains the whole stream. An
    /// empty suffix never matches; an absent stream never matches.
    pub async fn ends_with(self, suffix: &[T]) -> bool
    where
        T: PartialEq,
    {
        if self.is_absent() || suffix.is_empty() {
            return false;
        }
        match self.last_n(suffix.len()).await {
            Ok(tail) => tail.len() == suffix.len() && tail.as_slice() == suffix,
            Err(_) => false,
        }
    }

    /// Partition the elements by `classifier`, keeping encounter order within
    /// each group. Empty for an empty or absent stream.
    pub async fn group_by<K, F>(self, mut classifier: F) -> HashMap<K, Vec<T>>
    where
        K: Eq + Hash,
        F: FnMut(&T) -> K,
    {
        let mut groups: HashMap<K, Vec<T>> = HashMap::new();
        let Some(mut seq) = self.seq else {
            return groups;
        };
        while let Some(item) = seq.recv().await {
            groups.entry(classifier(&item)).or_default().push(item);
        }
        groups
    }

    /// All elements in order; empty for an empty or absent stream.
    pub async fn to_vec(self) -> Vec<T> {
        let mut items = Vec::new();
        self.for_each(|item| items.push(item)).await;
        items
    }
}
