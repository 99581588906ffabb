// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 flowline contributors

//! Error types
//!
//! The orchestrator raises its own errors only for configuration and state
//! problems; anything raised inside a source, transform, or sink propagates
//! unchanged and aborts the run.

use miette::Diagnostic;
use thiserror::Error;

/// Result type for flowline operations
pub type FlowlineResult<T> = Result<T, FlowlineError>;

/// Main error type for flowline
#[derive(Error, Debug, Diagnostic)]
pub enum FlowlineError {
    // ─────────────────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("Pipeline has no sink step")]
    #[diagnostic(
        code(flowline::no_sink),
        help("Attach at least one sink with .to() before calling run()")
    )]
    NoSink,

    #[error("Pipeline cannot run in the '{state}' state")]
    #[diagnostic(
        code(flowline::invalid_state),
        help("A pipeline runs exactly once; build a new pipeline to run again")
    )]
    InvalidState { state: String },

    // ─────────────────────────────────────────────────────────────────────────
    // Execution Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("Step failed: {message}")]
    #[diagnostic(code(flowline::step_failed))]
    Failed {
        message: String,
        #[help]
        help: Option<String>,
    },

    // ─────────────────────────────────────────────────────────────────────────
    // IO/System Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("IO error: {message}")]
    #[diagnostic(code(flowline::io_error))]
    Io { message: String },
}

impl From<std::io::Error> for FlowlineError {
    fn from(e: std::io::Error) -> Self {
        Self::Io { message: e.to_string() }
    }
}

impl FlowlineError {
    /// Create a step failure from a plain message
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
            help: None,
        }
    }

    /// Create a step failure with a help hint
    pub fn failure_with_help(message: impl Into<String>, help: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
            help: Some(help.into()),
        }
    }
}
