// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 flowline contributors

//! Synchronous pipeline orchestrator
//!
//! Folds the step list left-to-right, threading a single lazy stream from
//! the source through every step. A sink that is not the last step is a
//! branch point: the stream is drained there exactly once and the same
//! items are replayed to the sink and to everything downstream, so no
//! consumer can starve a later one.

use tracing::{debug, trace};

use crate::errors::{FlowlineError, FlowlineResult};
use crate::pipeline::step::{PipelineState, Step};
use crate::sink::Sink;
use crate::source::Source;
use crate::stream;
use crate::transform::Transform;

/// A declarative pipeline over a synchronous pull stream.
///
/// Built fluently, executed lazily: no source or transform work happens
/// until [`run`](Pipeline::run), and then only as each step pulls items —
/// except at branch points, where the stream is materialized.
pub struct Pipeline<T> {
    source: Box<dyn Source<T>>,
    steps: Vec<Step<T>>,
    state: PipelineState,
}

impl<T: Clone + 'static> Pipeline<T> {
    /// Create a pipeline reading from the given source.
    pub fn new(source: impl Source<T> + 'static) -> Self {
        Self {
            source: Box::new(source),
            steps: Vec::new(),
            state: PipelineState::Building,
        }
    }

    /// Append a transform step.
    pub fn add(mut self, transform: impl Transform<T> + 'static) -> Self {
        self.steps.push(Step::Transform(Box::new(transform)));
        self
    }

    /// Insert a transform step at `index`; all later steps shift right,
    /// keeping their relative order.
    pub fn add_at(mut self, index: usize, transform: impl Transform<T> + 'static) -> Self {
        self.steps.insert(index, Step::Transform(Box::new(transform)));
        self
    }

    /// Append a sink step.
    pub fn to(mut self, sink: impl Sink<T> + 'static) -> Self {
        self.steps.push(Step::Sink(Box::new(sink)));
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
    /// Fails with [`FlowlineError::NoSink`] before any source or transform
    /// work if no sink step is configured; in that case the pipeline stays
    /// in the building state. A pipeline that has run, successfully or not,
    /// rejects further runs with [`FlowlineError::InvalidState`].
    pub fn run(&mut self) -> FlowlineResult<()> {
        if self.state != PipelineState::Building {
            return Err(FlowlineError::InvalidState {
                state: self.state.to_string(),
            });
        }
        if !self.steps.iter().any(Step::is_sink) {
            debug!("refusing to run: no sink step configured");
            return Err(FlowlineError::NoSink);
        }

        self.state = PipelineState::Running;
        debug!(steps = self.steps.len(), "pipeline run started");

        let outcome = self.execute();

        self.state = match outcome {
            Ok(()) => PipelineState::Completed,
            Err(_) => PipelineState::Failed,
        };
        debug!(state = %self.state, "pipeline run finished");

        outcome
    }

    fn execute(&mut self) -> FlowlineResult<()> {
        let mut current = self.source.read()?;
        let last = self.steps.len() - 1;

        for (i, step) in self.steps.iter_mut().enumerate() {
            let kind = step.kind();
            match step {
                Step::Transform(transform) => {
                    trace!(index = i, kind, "applying step");
                    current = transform.process(current)?;
                }
                Step::Sink(sink) => {
                    if i == last {
                        // Terminal sink: single-pass streaming, no copy.
                        trace!(index = i, kind, "writing terminal sink");
                        sink.write(current)?;
                        current = stream::empty();
                    } else {
                        // Branch point: a single-pass stream would be
                        // exhausted here, starving every later step.
                        trace!(index = i, kind, "materializing at branch point");
                        let items = stream::drain(current);
                        sink.write(stream::from_vec(items.clone()))?;
                        current = stream::from_vec(items);
                    }
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;
    use crate::source::VecSource;
    use crate::stream::ItemStream;
    use crate::transform::FnTransform;
    use std::sync::{Arc, Mutex};

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn uppercase() -> FnTransform<String> {
        FnTransform::map(|s: String| s.to_uppercase())
    }

    fn exclaim() -> FnTransform<String> {
        FnTransform::map(|s: String| format!("{s}!"))
    }

    struct CountingSource {
        items: Vec<String>,
        reads: Arc<Mutex<usize>>,
    }

    impl Source<String> for CountingSource {
        fn read(&mut self) -> FlowlineResult<ItemStream<String>> {
            *self.reads.lock().unwrap() += 1;
            Ok(stream::from_vec(self.items.clone()))
        }
    }

    struct FailingSource;

    impl Source<String> for FailingSource {
        fn read(&mut self) -> FlowlineResult<ItemStream<String>> {
            Err(FlowlineError::Io {
                message: "no such file".into(),
            })
        }
    }

    struct FailingSink;

    impl<T> Sink<T> for FailingSink {
        fn write(&mut self, _input: ItemStream<T>) -> FlowlineResult<()> {
            Err(FlowlineError::failure("sink exploded"))
        }
    }

    #[test]
    fn test_no_sink_is_rejected_before_any_work() {
        let reads = Arc::new(Mutex::new(0));
        let source = CountingSource {
            items: strings(&["a"]),
            reads: Arc::clone(&reads),
        };

        let mut pipeline = Pipeline::new(source).add(uppercase());
        let err = pipeline.run().unwrap_err();

        assert!(matches!(err, FlowlineError::NoSink));
        assert_eq!(*reads.lock().unwrap(), 0);
        // Validation failed before the run started; still buildable.
        assert_eq!(pipeline.state(), PipelineState::Building);
    }

    #[test]
    fn test_multiple_sinks_each_see_their_position() {
        crate::init_test_tracing();

        let sink1 = MemorySink::new();
        let sink2 = MemorySink::new();
        let seen1 = sink1.handle();
        let seen2 = sink2.handle();

        let mut pipeline = Pipeline::new(VecSource::new(strings(&["hello", "world"])))
            .add(uppercase())
            .to(sink1)
            .add(exclaim())
            .to(sink2);

        pipeline.run().unwrap();

        assert_eq!(*seen1.lock().unwrap(), strings(&["HELLO", "WORLD"]));
        assert_eq!(*seen2.lock().unwrap(), strings(&["HELLO!", "WORLD!"]));
        assert_eq!(pipeline.state(), PipelineState::Completed);
    }

    #[test]
    fn test_lazy_stream_survives_branch_point() {
        // The transform output is a lazy iterator; a branch point must not
        // leave it exhausted for downstream steps.
        let lazy_upper = FnTransform::new(|input: ItemStream<String>| -> ItemStream<String> {
            Box::new(input.map(|s| s.to_uppercase()))
        });

        let sink1 = MemorySink::new();
        let sink2 = MemorySink::new();
        let seen1 = sink1.handle();
        let seen2 = sink2.handle();

        let mut pipeline = Pipeline::new(VecSource::new(strings(&["a", "b", "c"])))
            .add(lazy_upper)
            .to(sink1)
            .add(exclaim())
            .to(sink2);

        pipeline.run().unwrap();

        assert_eq!(*seen1.lock().unwrap(), strings(&["A", "B", "C"]));
        assert_eq!(*seen2.lock().unwrap(), strings(&["A!", "B!", "C!"]));
    }

    #[test]
    fn test_materialization_is_transparent() {
        // An intermediate sink observes exactly what a terminal sink at the
        // same position would: nothing added, dropped, or reordered.
        let doubler = FnTransform::new(|input: ItemStream<String>| -> ItemStream<String> {
            Box::new(input.map(|s| format!("{s}{s}")))
        });

        let intermediate = MemorySink::new();
        let terminal = MemorySink::new();
        let seen_mid = intermediate.handle();
        let seen_end = terminal.handle();

        let mut pipeline = Pipeline::new(VecSource::new(strings(&["x", "y"])))
            .add(doubler)
            .to(intermediate)
            .to(terminal);

        pipeline.run().unwrap();

        assert_eq!(*seen_mid.lock().unwrap(), *seen_end.lock().unwrap());
        assert_eq!(*seen_end.lock().unwrap(), strings(&["xx", "yy"]));
    }

    #[test]
    fn test_one_to_many_preserves_order_across_sentences() {
        let splitter = FnTransform::new(|input: ItemStream<String>| -> ItemStream<String> {
            Box::new(input.flat_map(|sentence| {
                sentence
                    .split_whitespace()
                    .map(String::from)
                    .collect::<Vec<_>>()
                    .into_iter()
            }))
        });
        let capitalize = FnTransform::map(|word: String| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => word,
            }
        });

        let sink = MemorySink::new();
        let seen = sink.handle();

        let mut pipeline = Pipeline::new(VecSource::new(strings(&[
            "this is a sentence",
            "and this is another one",
        ])))
        .add(splitter)
        .add(capitalize)
        .to(sink);

        pipeline.run().unwrap();

        assert_eq!(
            *seen.lock().unwrap(),
            strings(&["This", "Is", "A", "Sentence", "And", "This", "Is", "Another", "One"])
        );
    }

    #[test]
    fn test_add_at_inserts_at_logical_position() {
        let reverse = FnTransform::new(|input: ItemStream<String>| -> ItemStream<String> {
            let mut items: Vec<String> = input.collect();
            items.reverse();
            Box::new(items.into_iter())
        });

        let sink = MemorySink::new();
        let seen = sink.handle();

        // uppercase -> exclaim -> sink, then insert reverse between them.
        let mut pipeline = Pipeline::new(VecSource::new(strings(&["a", "b", "c"])))
            .add(uppercase())
            .add(exclaim())
            .to(sink)
            .add_at(1, reverse);

        pipeline.run().unwrap();

        assert_eq!(*seen.lock().unwrap(), strings(&["C!", "B!", "A!"]));
    }

    #[test]
    fn test_source_error_propagates_and_marks_failed() {
        let mut pipeline = Pipeline::new(FailingSource).to(MemorySink::new());

        let err = pipeline.run().unwrap_err();

        assert!(matches!(err, FlowlineError::Io { .. }));
        assert_eq!(pipeline.state(), PipelineState::Failed);
    }

    #[test]
    fn test_sink_error_aborts_fold_without_rollback() {
        let before = MemorySink::new();
        let after = MemorySink::new();
        let seen_before = before.handle();
        let seen_after = after.handle();

        let mut pipeline = Pipeline::new(VecSource::new(strings(&["a", "b"])))
            .to(before)
            .to(FailingSink)
            .to(after);

        let err = pipeline.run().unwrap_err();

        assert!(matches!(err, FlowlineError::Failed { .. }));
        assert_eq!(pipeline.state(), PipelineState::Failed);
        // The earlier sink's side effect stays in place; the later sink
        // never runs.
        assert_eq!(*seen_before.lock().unwrap(), strings(&["a", "b"]));
        assert!(seen_after.lock().unwrap().is_empty());
    }

    #[test]
    fn test_rerun_is_rejected() {
        let mut pipeline =
            Pipeline::new(VecSource::new(strings(&["a"]))).to(MemorySink::new());

        pipeline.run().unwrap();
        let err = pipeline.run().unwrap_err();

        assert!(matches!(err, FlowlineError::InvalidState { .. }));
        assert_eq!(pipeline.state(), PipelineState::Completed);
    }

    #[test]
    fn test_trailing_transform_runs_with_output_dropped() {
        let calls = Arc::new(Mutex::new(0));
        let calls_in = Arc::clone(&calls);
        let counting = FnTransform::new(move |input: ItemStream<String>| -> ItemStream<String> {
            *calls_in.lock().unwrap() += 1;
            input
        });

        let mut pipeline = Pipeline::new(VecSource::new(strings(&["a"])))
            .to(MemorySink::new())
            .add(counting);

        pipeline.run().unwrap();

        assert_eq!(*calls.lock().unwrap(), 1);
        assert_eq!(pipeline.state(), PipelineState::Completed);
        assert_eq!(pipeline.step_count(), 2);
    }
}
