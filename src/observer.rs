//! Synchronous observation of a running search.
//!
//! A [StepSink] receives every cell state transition in the exact order the search performs
//! them, from within the search's call stack. Rendering may happen directly in the sink, or
//! steps can be buffered with a [StepRecorder] and replayed later in the same order.
use crate::cell::CellState;
use grid_util::point::Point;

/// A single state transition of a cell during a search.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Step {
    pub point: Point,
    pub state: CellState,
}

/// Receives state transitions as they happen. Implemented for any `FnMut(Point, CellState)`.
pub trait StepSink {
    fn on_step(&mut self, point: Point, state: CellState);
}

impl<F> StepSink for F
where
    F: FnMut(Point, CellState),
{
    fn on_step(&mut self, point: Point, state: CellState) {
        self(point, state)
    }
}

/// Buffers steps in order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepRecorder {
    steps: Vec<Step>,
}

impl StepRecorder {
    pub fn new() -> StepRecorder {
        StepRecorder::default()
    }
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }
    pub fn len(&self) -> usize {
        self.steps.len()
    }
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
    /// Number of recorded transitions into `state`.
    pub fn count(&self, state: CellState) -> usize {
        self.steps.iter().filter(|s| s.state == state).count()
    }
    /// Forwards the buffered steps to another sink, oldest first, and empties the buffer.
    pub fn replay_into<S: StepSink + ?Sized>(&mut self, sink: &mut S) {
        for step in self.steps.drain(..) {
            sink.on_step(step.point, step.state);
        }
    }
}

impl StepSink for StepRecorder {
    fn on_step(&mut self, point: Point, state: CellState) {
        self.steps.push(Step { point, state });
    }
}

/// Debug hook reporting every cost assignment made by the search.
pub trait SearchTrace {
    fn on_score(&mut self, point: Point, g_score: f64, f_score: f64);
}

/// A [SearchTrace] that ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoTrace;

impl SearchTrace for NoTrace {
    #[inline]
    fn on_score(&mut self, _: Point, _: f64, _: f64) {}
}

impl<F> SearchTrace for F
where
    F: FnMut(Point, f64, f64),
{
    fn on_score(&mut self, point: Point, g_score: f64, f_score: f64) {
        self(point, g_score, f_score)
    }
}
