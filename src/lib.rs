// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 flowline contributors

//! # flowline - Declarative Data Pipelines
//!
//! `flowline` composes a source, zero or more transforms, and one or more
//! sinks into a declaratively built, lazily executed pipeline.
//!
//! ## Features
//!
//! - **Fluent builder** - Chain `add` and `to` calls, then `run` once
//! - **Lazy streaming** - Work happens only as each step pulls items
//! - **Branch-safe** - Intermediate sinks materialize the stream once, so
//!   every consumer sees identical, complete data
//! - **Async counterpart** - The same fold over asynchronous streams under
//!   single-threaded cooperative scheduling
//!
//! ## Quick Start
//!
//! ```
//! use flowline::{FnTransform, MemorySink, Pipeline, VecSource};
//!
//! let sink = MemorySink::new();
//! let seen = sink.handle();
//!
//! let mut pipeline = Pipeline::new(VecSource::new(vec![
//!     "hello".to_string(),
//!     "world".to_string(),
//! ]))
//! .add(FnTransform::map(|s: String| s.to_uppercase()))
//! .to(sink);
//!
//! pipeline.run().unwrap();
//!
//! assert_eq!(*seen.lock().unwrap(), vec!["HELLO".to_string(), "WORLD".to_string()]);
//! ```

pub mod errors;
pub mod pipeline;
pub mod sink;
pub mod source;
pub mod stream;
pub mod transform;

// Re-export commonly used types
pub use errors::{FlowlineError, FlowlineResult};
pub use pipeline::{AsyncPipeline, AsyncStep, Pipeline, PipelineState, Step};
pub use sink::{
    AsyncConsoleSink, AsyncFileSink, AsyncMemorySink, AsyncSink, ConsoleSink, FileSink,
    MemorySink, Sink,
};
pub use source::{AsyncSource, AsyncVecSource, Source, VecSource};
pub use stream::{AsyncItemStream, ItemStream};
pub use transform::{AsyncFnTransform, AsyncTransform, FnTransform, Transform};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Install a tracing subscriber for the test suite, honoring `RUST_LOG`.
/// Safe to call from every test; repeat installs are ignored.
#[cfg(test)]
pub(crate) fn init_test_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "flowline=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .try_init();
}
