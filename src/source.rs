// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 flowline contributors

//! Source capability
//!
//! A source produces one stream of items per pipeline run. It is invoked
//! exactly once by `run` and must not depend on the pipeline's step list.

use async_trait::async_trait;

use crate::errors::FlowlineResult;
use crate::stream::{self, AsyncItemStream, ItemStream};

/// Capability producing one lazy stream of items per run.
///
/// Failures during reading (e.g. a missing file) propagate unchanged
/// through the pipeline.
pub trait Source<T> {
    /// Produce a fresh stream of items.
    fn read(&mut self) -> FlowlineResult<ItemStream<T>>;
}

/// Asynchronous counterpart of [`Source`].
#[async_trait]
pub trait AsyncSource<T>: Send {
    /// Produce a fresh asynchronous stream of items.
    async fn read(&mut self) -> FlowlineResult<AsyncItemStream<T>>;
}

/// In-memory source backed by a `Vec`.
pub struct VecSource<T> {
    items: Vec<T>,
}

impl<T> VecSource<T> {
    /// Create a source over the given items.
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T: Clone + 'static> Source<T> for VecSource<T> {
    fn read(&mut self) -> FlowlineResult<ItemStream<T>> {
        Ok(stream::from_vec(self.items.clone()))
    }
}

/// In-memory asynchronous source backed by a `Vec`; yields one item per
/// suspension point.
pub struct AsyncVecSource<T> {
    items: Vec<T>,
}

impl<T> AsyncVecSource<T> {
    /// Create an asynchronous source over the given items.
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }
}

#[async_trait]
impl<T: Clone + Send + 'static> AsyncSource<T> for AsyncVecSource<T> {
    async fn read(&mut self) -> FlowlineResult<AsyncItemStream<T>> {
        Ok(stream::from_vec_async(self.items.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_source_yields_items_in_order() {
        let mut source = VecSource::new(vec!["a", "b", "c"]);
        let items = stream::drain(source.read().unwrap());
        assert_eq!(items, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_vec_source_read_is_repeatable() {
        let mut source = VecSource::new(vec![1, 2]);
        assert_eq!(stream::drain(source.read().unwrap()), vec![1, 2]);
        assert_eq!(stream::drain(source.read().unwrap()), vec![1, 2]);
    }

    #[test]
    fn test_async_vec_source_yields_items_in_order() {
        let mut source = AsyncVecSource::new(vec![1, 2, 3]);
        let items = tokio_test::block_on(async {
            stream::drain_async(source.read().await.unwrap()).await
        });
        assert_eq!(items, vec![1, 2, 3]);
    }
}
