// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 flowline contributors

//! Transform capability
//!
//! A transform maps one stream of items to another. It may change the item
//! count freely (fan-out, fan-in, filtering); ownership of the output stream
//! passes to the caller. The function adapters let plain closures satisfy the
//! contract without a bespoke type.

use std::future::Future;

use futures::stream::StreamExt;

use crate::errors::FlowlineResult;
use crate::stream::{AsyncItemStream, ItemStream};

/// Capability mapping one stream of items to another.
pub trait Transform<T> {
    /// Map the input stream to a new stream.
    fn process(&mut self, input: ItemStream<T>) -> FlowlineResult<ItemStream<T>>;
}

/// Asynchronous counterpart of [`Transform`].
///
/// `process` itself is synchronous; the returned stream performs the actual
/// work, suspending at every item it produces.
pub trait AsyncTransform<T>: Send {
    /// Map the input stream to a new asynchronous stream.
    fn process(&mut self, input: AsyncItemStream<T>) -> FlowlineResult<AsyncItemStream<T>>;
}

/// A transform backed by a whole-stream closure.
pub struct FnTransform<T> {
    func: Box<dyn FnMut(ItemStream<T>) -> ItemStream<T>>,
}

impl<T: 'static> FnTransform<T> {
    /// Wrap a stream-to-stream closure.
    pub fn new<F>(func: F) -> Self
    where
        F: FnMut(ItemStream<T>) -> ItemStream<T> + 'static,
    {
        Self { func: Box::new(func) }
    }

    /// Wrap a per-item closure as a lazy one-to-one mapping.
    pub fn map<F>(f: F) -> Self
    where
        F: FnMut(T) -> T + Clone + 'static,
    {
        Self::new(move |input: ItemStream<T>| -> ItemStream<T> { Box::new(input.map(f.clone())) })
    }
}

impl<T: 'static> Transform<T> for FnTransform<T> {
    fn process(&mut self, input: ItemStream<T>) -> FlowlineResult<ItemStream<T>> {
        Ok((self.func)(input))
    }
}

/// An asynchronous transform backed by a whole-stream closure.
pub struct AsyncFnTransform<T> {
    func: Box<dyn FnMut(AsyncItemStream<T>) -> AsyncItemStream<T> + Send>,
}

impl<T: Send + 'static> AsyncFnTransform<T> {
    /// Wrap a stream-to-stream closure.
    pub fn new<F>(func: F) -> Self
    where
        F: FnMut(AsyncItemStream<T>) -> AsyncItemStream<T> + Send + 'static,
    {
        Self { func: Box::new(func) }
    }

    /// Wrap an async per-item closure as a lazy one-to-one mapping, one
    /// suspension per item.
    pub fn map<F, Fut>(f: F) -> Self
    where
        F: FnMut(T) -> Fut + Clone + Send + 'static,
        Fut: Future<Output = T> + Send + 'static,
    {
        Self::new(move |input: AsyncItemStream<T>| -> AsyncItemStream<T> {
            input.then(f.clone()).boxed()
        })
    }
}

impl<T: Send + 'static> AsyncTransform<T> for AsyncFnTransform<T> {
    fn process(&mut self, input: AsyncItemStream<T>) -> FlowlineResult<AsyncItemStream<T>> {
        Ok((self.func)(input))
    }
}
