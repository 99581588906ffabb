// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 flowline contributors

//! The pull-stream abstraction threaded between pipeline steps
//!
//! Both orchestrators carry a single "current stream" value through the step
//! list. This module owns that abstraction and the one operation that crosses
//! the laziness boundary: draining a stream into a finite, ordered `Vec`.
//! The orchestrators drain at every non-terminal sink and nowhere else.

use futures::stream::{BoxStream, StreamExt};

/// A lazy, single-pass sequence of items for the synchronous pipeline.
pub type ItemStream<T> = Box<dyn Iterator<Item = T>>;

/// A lazy, single-pass sequence of items for the asynchronous pipeline.
/// Every item production is a suspension point.
pub type AsyncItemStream<T> = BoxStream<'static, T>;

/// Wrap an in-memory collection as a stream.
pub fn from_vec<T: 'static>(items: Vec<T>) -> ItemStream<T> {
    Box::new(items.into_iter())
}

/// Wrap an in-memory collection as an asynchronous stream.
pub fn from_vec_async<T: Send + 'static>(items: Vec<T>) -> AsyncItemStream<T> {
    futures::stream::iter(items).boxed()
}

/// A stream yielding nothing.
pub fn empty<T: 'static>() -> ItemStream<T> {
    Box::new(std::iter::empty())
}

/// An asynchronous stream yielding nothing.
pub fn empty_async<T: Send + 'static>() -> AsyncItemStream<T> {
    futures::stream::empty().boxed()
}

/// Eagerly realize a stream into an ordered collection.
///
/// This consumes the stream; replay it downstream with [`from_vec`].
pub fn drain<T>(stream: ItemStream<T>) -> Vec<T> {
    stream.collect()
}

/// Eagerly realize an asynchronous stream, awaiting every item in order.
pub async fn drain_async<T>(stream: AsyncItemStream<T>) -> Vec<T> {
    stream.collect::<Vec<_>>().await
}
