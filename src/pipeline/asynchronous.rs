// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 flowline contributors

//! Asynchronous pipeline orchestrator
//!
//! The same left fold as the synchronous pipeline, expressed over
//! asynchronous streams under single-threaded cooperative scheduling: one
//! step is logically running at a time, and every item production or
//! consumption is a suspension point. A branch point awaits every item of
//! the current stream before anything downstream starts, which preserves
//! the same ordering guarantee as the synchronous case.

use tracing::{debug, trace};

use crate::errors::{FlowlineError, FlowlineResult};
use crate::pipeline::step::{AsyncStep, PipelineState};
use crate::sink::AsyncSink;
use crate::source::AsyncSource;
use crate::stream;
use crate::transform::AsyncTransform;

/// A declarative pipeline over an asynchronous pull stream.
pub struct AsyncPipeline<T> {
    source: Box<dyn AsyncSource<T>>,
    steps: Vec<AsyncStep<T>>,
    state: PipelineState,
}

impl<T: Clone + Send + 'static> AsyncPipeline<T> {
    /// Create a pipeline reading from the given source.
    pub fn new(source: impl AsyncSource<T> + 'static) -> Self {
        Self {
            source: Box::new(source),
            steps: Vec::new(),
            state: PipelineState::Building,
        }
    }

    /// Append a transform step.
    pub fn add(mut self, transform: impl AsyncTransform<T> + 'static) -> Self {
        self.steps.push(AsyncStep::Transform(Box::new(transform)));
        self
    }

    /// Insert a transform step at `index`; all later steps shift right,
    /// keeping their relative order.
    pub fn add_at(mut self, index: usize, transform: impl AsyncTransform<T> + 'static) -> Self {
        self.steps.insert(index, AsyncStep::Transform(Box::new(transform)));
        self
    }

    /// Append a sink step.
    pub fn to(mut self, sink: impl AsyncSink<T> + 'static) -> Self {
        self.steps.push(AsyncStep::Sink(Box::new(sink)));
        self
    }

    /// Current lifecycle state.
    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Number of steps configured.
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Execute the pipeline.
    ///
    /// Same contract as [`Pipeline::run`](crate::Pipeline::run): no sink is
    /// a configuration error raised before any work, and a pipeline that
    /// has run rejects further runs.
    pub async fn run(&mut self) -> FlowlineResult<()> {
        if self.state != PipelineState::Building {
            return Err(FlowlineError::InvalidState {
                state: self.state.to_string(),
            });
        }
        if !self.steps.iter().any(AsyncStep::is_sink) {
            debug!("refusing to run: no sink step configured");
            return Err(FlowlineError::NoSink);
        }

        self.state = PipelineState::Running;
        debug!(steps = self.steps.len(), "async pipeline run started");

        let outcome = self.execute().await;

        self.state = match outcome {
            Ok(()) => PipelineState::Completed,
            Err(_) => PipelineState::Failed,
        };
        debug!(state = %self.state, "async pipeline run finished");

        outcome
    }

    async fn execute(&mut self) -> FlowlineResult<()> {
        let mut current = self.source.read().await?;
        let last = self.steps.len() - 1;

        for (i, step) in self.steps.iter_mut().enumerate() {
            let kind = step.kind();
            match step {
                AsyncStep::Transform(transform) => {
                    trace!(index = i, kind, "applying step");
                    current = transform.process(current)?;
                }
                AsyncStep::Sink(sink) => {
                    if i == last {
                        // Terminal sink: receives the live stream.
                        trace!(index = i, kind, "writing terminal sink");
                        sink.write(current).await?;
                        current = stream::empty_async();
                    } else {
                        // Branch point: await every item before continuing.
                        trace!(index = i, kind, "materializing at branch point");
                        let items = stream::drain_async(current).await;
                        sink.write(stream::from_vec_async(items.clone())).await?;
                        current = stream::from_vec_async(items);
                    }
                }
            }
        }

        Ok(())
    }
}
