//! Lazy, channel-backed streams with order-preserving concurrent transforms.
//!
//! A [`Stream`] wraps a [`Sequence`] (a bounded, single-consumer, close-once
//! queue) together with a concurrency level. Intermediate operations such as
//! [`Stream::filter`] or [`Stream::map`] return new streams immediately and do
//! their work on background tokio tasks; terminal operations such as
//! [`Stream::to_vec`] drain the stream and resolve to a value.
//!
//! ```
//! use ordstream::Stream;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let doubled = Stream::from_collection(vec![1, 2, 3], 0)
//!     .concurrent(4)
//!     .map(|x| x * 2)
//!     .to_vec()
//!     .await;
//!
//! assert_eq!(doubled, vec![2, 4, 6]);
//! # }
//! ```

pub mod collectors;
pub mod error;
pub mod sequence;
pub mod stream;
pub mod stream_configuration;

pub use collectors::Collector;
pub use error::{SequenceError, StreamError, StreamResult};
pub use sequence::{channel, Sequence, SequenceWriter};
pub use stream::Stream;
pub use stream_configuration::StreamConfig;
