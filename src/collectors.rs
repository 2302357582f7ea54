//! Reusable mutable reductions for [`Stream::collect`](crate::Stream::collect)

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

/// A mutable reduction: a supplier for the initial container, an accumulator
/// folding each element into it, and a finisher applied once at the end.
///
/// Used with [`Stream::collect`](crate::Stream::collect).
pub struct Collector<T, A, R> {
    supplier: Arc<dyn Fn() -> A + Send + Sync + 'static>,
    accumulator: Arc<dyn Fn(A, T) -> A + Send + Sync + 'static>,
    finisher: Arc<dyn Fn(A) -> R + Send + Sync + 'static>,
}

impl<T, A, R> Clone for Collector<T, A, R> {
    fn clone(&self) -> Self {
        Collector {
            supplier: Arc::clone(&self.supplier),
            accumulator: Arc::clone(&self.accumulator),
            finisher: Arc::clone(&self.finisher),
        }
    }
}

impl<T, A> Collector<T, A, A>
where
    T: 'static,
    A: 'static,
{
    /// Create a collector without a finisher
    pub fn new<S, F>(supplier: S, accumulator: F) -> Self
    where
        S: Fn() -> A + Send + Sync + 'static,
        F: Fn(A, T) -> A + Send + Sync + 'static,
    {
        Collector {
            supplier: Arc::new(supplier),
            accumulator: Arc::new(accumulator),
            finisher: Arc::new(|acc| acc),
        }
    }
}

impl<T, A, R> Collector<T, A, R>
where
    T: 'static,
    A: 'static,
    R: 'static,
{
    /// Apply `finisher` to the result of the current finisher
    pub fn with_finisher<U, F>(self, finisher: F) -> Collector<T, A, U>
    where
        F: Fn(R) -> U + Send + Sync + 'static,
    {
        let previous = self.finisher;
        Collector {
            supplier: self.supplier,
            accumulator: self.accumulator,
            finisher: Arc::new(move |acc| finisher(previous(acc))),
        }
    }
}

impl<T, A, R> Collector<T, A, R> {
    pub(crate) fn supply(&self) -> A {
        (self.supplier)()
    }

    pub(crate) fn accumulate(&self, acc: A, item: T) -> A {
        (self.accumulator)(acc, item)
    }

    pub(crate) fn finish(&self, acc: A) -> R {
        (self.finisher)(acc)
    }
}

/// Collect the elements into a `Vec`, in order
pub fn to_vec<T>() -> Collector<T, Vec<T>, Vec<T>>
where
    T: 'static,
{
    Collector::new(Vec::new, |mut items: Vec<T>, item| {
        items.push(item);
        items
    })
}

/// Count the elements
pub fn counting<T>() -> Collector<T, usize, usize>
where
    T: 'static,
{
    Collector::new(|| 0, |count, _| count + 1)
}

/// Left-fold the elements with `op`; `None` when there are none
pub fn reducing<T, F>(op: F) -> Collector<T, Option<T>, Option<T>>
where
    T: 'static,
    F: Fn(T, T) -> T + Send + Sync + 'static,
{
    Collector::new(
        || None,
        move |acc, item| match acc {
            Some(acc) => Some(op(acc, item)),
            None => Some(item),
        },
    )
}

/// Group the elements by `classifier`, keeping encounter order in each group
pub fn grouping_by<T, K, F>(classifier: F) -> Collector<T, HashMap<K, Vec<T>>, HashMap<K, Vec<T>>>
where
    T: 'static,
    K: Eq + Hash + 'static,
    F: Fn(&T) -> K + Send + Sync + 'static,
{
    Collector::new(HashMap::new, move |mut groups: HashMap<K, Vec<T>>, item| {
        groups.entry(classifier(&item)).or_default().push(item);
        groups
    })
}

/// Concatenate string-like elements with `separator` between them
pub fn joining<T>(separator: impl Into<String>) -> Collector<T, Option<String>, String>
where
    T: AsRef<str> + 'static,
{
    let separator = separator.into();
    Collector::new(
        || None,
        move |acc: Option<String>, item: T| match acc {
            Some(mut joined) => {
                joined.push_str(&separator);
                joined.push_str(item.as_ref());
                Some(joined)
            }
            None => Some(item.as_ref().to_owned()),
        },
    )
    .with_finisher(Option::unwrap_or_default)
}
