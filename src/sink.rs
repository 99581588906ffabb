// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 flowline contributors

//! Sink capability
//!
//! A sink fully consumes a stream for a side effect: printing, writing a
//! file, or capturing items in memory. Side-effect resources are scoped to
//! the `write` call and released on all exit paths.

use std::fmt::Display;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futures::stream::StreamExt;
use tokio::io::AsyncWriteExt;

use crate::errors::FlowlineResult;
use crate::stream::{AsyncItemStream, ItemStream};

/// Capability consuming a stream fully for a side effect.
///
/// Implementations must consume every item, in the order received.
pub trait Sink<T> {
    /// Consume the stream, performing the side effect once per item.
    fn write(&mut self, input: ItemStream<T>) -> FlowlineResult<()>;
}

/// Asynchronous counterpart of [`Sink`]; each item consumption is a
/// suspension point.
#[async_trait]
pub trait AsyncSink<T>: Send {
    /// Consume the stream, performing the side effect once per item.
    async fn write(&mut self, input: AsyncItemStream<T>) -> FlowlineResult<()>;
}

/// Prints each item to stdout.
pub struct ConsoleSink;

impl<T: Display> Sink<T> for ConsoleSink {
    fn write(&mut self, input: ItemStream<T>) -> FlowlineResult<()> {
        for item in input {
            println!("{item}");
        }
        Ok(())
    }
}

/// Writes each item to a file, one item per line. The file is created (or
/// truncated) when `write` is called, not when the sink is constructed.
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    /// Create a sink writing to the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl<T: Display> Sink<T> for FileSink {
    fn write(&mut self, input: ItemStream<T>) -> FlowlineResult<()> {
        let mut out = BufWriter::new(File::create(&self.path)?);
        for item in input {
            writeln!(out, "{item}")?;
        }
        out.flush()?;
        Ok(())
    }
}

/// Captures items in memory behind a shared handle, so they remain
/// inspectable after the sink has been moved into a pipeline.
pub struct MemorySink<T> {
    items: Arc<Mutex<Vec<T>>>,
}

impl<T> MemorySink<T> {
    /// Create an empty capture sink.
    pub fn new() -> Self {
        Self {
            items: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Shared handle to the captured items.
    pub fn handle(&self) -> Arc<Mutex<Vec<T>>> {
        Arc::clone(&self.items)
    }
}

impl<T> Default for MemorySink<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Sink<T> for MemorySink<T> {
    fn write(&mut self, input: ItemStream<T>) -> FlowlineResult<()> {
        // A poisoned lock only means some other holder panicked; the
        // captured items are still usable.
        let mut items = self.items.lock().unwrap_or_else(|e| e.into_inner());
        items.extend(input);
        Ok(())
    }
}

/// Asynchronous variant of [`ConsoleSink`].
pub struct AsyncConsoleSink;

#[async_trait]
impl<T: Display + Send + 'static> AsyncSink<T> for AsyncConsoleSink {
    async fn write(&mut self, mut input: AsyncItemStream<T>) -> FlowlineResult<()> {
        while let Some(item) = input.next().await {
            println!("{item}");
        }
        Ok(())
    }
}

/// Asynchronous variant of [`FileSink`], one item per line via `tokio::fs`.
pub struct AsyncFileSink {
    path: PathBuf,
}

impl AsyncFileSink {
    /// Create a sink writing to the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl<T: Display + Send + 'static> AsyncSink<T> for AsyncFileSink {
    async fn write(&mut self, mut input: AsyncItemStream<T>) -> FlowlineResult<()> {
        let file = tokio::fs::File::create(&self.path).await?;
        let mut out = tokio::io::BufWriter::new(file);
        while let Some(item) = input.next().await {
            out.write_all(format!("{item}\n").as_bytes()).await?;
        }
        out.flush().await?;
        Ok(())
    }
}

/// Asynchronous variant of [`MemorySink`].
pub struct AsyncMemorySink<T> {
    items: Arc<Mutex<Vec<T>>>,
}

impl<T> AsyncMemorySink<T> {
    /// Create an empty capture sink.
    pub fn new() -> Self {
        Self {
            items: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Shared handle to the captured items.
    pub fn handle(&self) -> Arc<Mutex<Vec<T>>> {
        Arc::clone(&self.items)
    }
}

impl<T> Default for AsyncMemorySink<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Send> AsyncSink<T> for AsyncMemorySink<T> {
    async fn write(&mut self, mut input: AsyncItemStream<T>) -> FlowlineResult<()> {
        while let Some(item) = input.next().await {
            let mut items = self.items.lock().unwrap_or_else(|e| e.into_inner());
            items.push(item);
        }
        Ok(())
    }
}
