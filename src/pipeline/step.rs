// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 flowline contributors

//! Step sum types and the pipeline state machine
//!
//! A step is either a transform or a sink, held at a specific position in a
//! pipeline's ordered list. The orchestrators dispatch on the variant by
//! pattern matching; a sink that is not the last step is a branch point.

use std::fmt;

use crate::sink::{AsyncSink, Sink};
use crate::transform::{AsyncTransform, Transform};

/// A single position in a synchronous pipeline's step list.
pub enum Step<T> {
    /// Maps the current stream to a new stream.
    Transform(Box<dyn Transform<T>>),
    /// Consumes the current stream for a side effect.
    Sink(Box<dyn Sink<T>>),
}

impl<T> Step<T> {
    /// Whether this step is a sink.
    pub fn is_sink(&self) -> bool {
        matches!(self, Step::Sink(_))
    }

    /// Step kind, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Step::Transform(_) => "transform",
            Step::Sink(_) => "sink",
        }
    }
}

impl<T> fmt::Debug for Step<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Step").field(&self.kind()).finish()
    }
}

/// A single position in an asynchronous pipeline's step list.
pub enum AsyncStep<T> {
    /// Maps the current stream to a new stream.
    Transform(Box<dyn AsyncTransform<T>>),
    /// Consumes the current stream for a side effect.
    Sink(Box<dyn AsyncSink<T>>),
}

impl<T> AsyncStep<T> {
    /// Whether this step is a sink.
    pub fn is_sink(&self) -> bool {
        matches!(self, AsyncStep::Sink(_))
    }

    /// Step kind, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            AsyncStep::Transform(_) => "transform",
            AsyncStep::Sink(_) => "sink",
        }
    }
}

impl<T> fmt::Debug for AsyncStep<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AsyncStep").field(&self.kind()).finish()
    }
}

/// Lifecycle of a pipeline.
///
/// Building → Running → Completed | Failed; there is no transition back to
/// Building, so a pipeline runs at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    /// Steps may still be added.
    Building,
    /// The fold is in progress; steps are frozen.
    Running,
    /// The fold finished without error.
    Completed,
    /// The fold was aborted by a propagated error.
    Failed,
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Building => write!(f, "building"),
            Self::Running => write!(f, "running"),
            Self::Completed => write!(f, "completed"),
            Self::Failed => write!(f, "failed"),
        }
    }
}
