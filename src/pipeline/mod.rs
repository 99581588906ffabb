// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 flowline contributors

//! Pipeline orchestrators
//!
//! This module owns the step model and the two orchestrators: the
//! synchronous [`Pipeline`] and its cooperative-scheduling counterpart
//! [`AsyncPipeline`]. Both fold the ordered step list over a single stream,
//! materializing it at every sink that is not the final step.

mod asynchronous;
mod blocking;
mod step;

pub use asynchronous::AsyncPipeline;
pub use blocking::Pipeline;
pub use step::{AsyncStep, PipelineState, Step};
