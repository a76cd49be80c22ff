//! The observable A* search.
//!
//! [PathSearch::run] expands cells in order of their estimated total cost, breaking ties by
//! insertion order, and reports every state transition to a [StepSink] as it happens. The
//! open set is a [BinaryHeap] of `(f_score, insertion_seq, cell)` entries alongside a
//! membership set. A cell whose cost improves while it is already queued keeps its original
//! entry, and a closed cell whose cost improves is queued again.
use crate::cancel::{Cancellation, NeverCancel};
use crate::cell::{CellState, N_NEIGHBOURS};
use crate::error::SearchError;
use crate::grid::Grid;
use crate::heuristic::euclidean;
use crate::observer::{NoTrace, SearchTrace, StepSink};
use crate::reconstruct::{reconstruct_path, FxIndexMap};
use crate::STEP_COST;
use fxhash::FxHashSet;
use grid_util::point::Point;
use log::{info, trace, warn};
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::iter;

struct OpenEntry {
    f_score: f64,
    seq: u64,
    ix: usize,
}

impl Eq for OpenEntry {}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so the max-heap pops the smallest estimate first, and among equal
        // estimates the earliest inserted entry
        match other.f_score.total_cmp(&self.f_score) {
            Ordering::Equal => other.seq.cmp(&self.seq),
            s => s,
        }
    }
}

/// Per-run bookkeeping, indexed by dense cell index.
struct SearchState {
    g_score: Vec<f64>,
    f_score: Vec<f64>,
    came_from: FxIndexMap<usize, usize>,
    open_set: BinaryHeap<OpenEntry>,
    open_members: FxHashSet<usize>,
    counter: u64,
}

impl SearchState {
    fn new(cells: usize) -> SearchState {
        SearchState {
            g_score: vec![f64::INFINITY; cells],
            f_score: vec![f64::INFINITY; cells],
            came_from: FxIndexMap::default(),
            open_set: BinaryHeap::new(),
            open_members: FxHashSet::default(),
            counter: 0,
        }
    }
    fn push(&mut self, ix: usize) {
        self.open_set.push(OpenEntry {
            f_score: self.f_score[ix],
            seq: self.counter,
            ix,
        });
        self.counter += 1;
        self.open_members.insert(ix);
    }
    fn pop(&mut self) -> Option<usize> {
        let OpenEntry { ix, .. } = self.open_set.pop()?;
        self.open_members.remove(&ix);
        Some(ix)
    }
}

/// A shortest path found by [PathSearch::run].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FoundPath {
    /// Cells from start to end, both included.
    pub path: Vec<Point>,
    /// Number of unit moves, one less than the number of cells in `path`.
    pub cost: usize,
    /// Number of cells popped from the open set, the end included.
    pub expanded: usize,
}

impl FoundPath {
    /// Length of the path in moves.
    pub fn len(&self) -> usize {
        self.cost
    }
    pub fn is_empty(&self) -> bool {
        self.cost == 0
    }
    /// The cells marked [CellState::Path], in start-to-end order.
    pub fn intermediate(&self) -> &[Point] {
        &self.path[1..self.path.len() - 1]
    }
}

/// How a run that satisfied its preconditions ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    PathFound(FoundPath),
    /// The open set ran dry without reaching the end.
    NoPathExists,
    /// The cancellation signal was raised before the end was reached.
    Cancelled,
}

impl SearchOutcome {
    pub fn path(&self) -> Option<&FoundPath> {
        match self {
            SearchOutcome::PathFound(found) => Some(found),
            _ => None,
        }
    }
    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::PathFound(_))
    }
}

/// The A* engine. Holds no state between runs, so one instance can serve any number of grids.
#[derive(Clone, Debug)]
pub struct PathSearch {
    /// Multiplies the Euclidean estimate. Values above 1.0 may expand fewer cells but no longer
    /// guarantee a shortest path.
    pub heuristic_factor: f64,
}

impl Default for PathSearch {
    fn default() -> PathSearch {
        PathSearch::new()
    }
}

impl PathSearch {
    pub fn new() -> PathSearch {
        PathSearch {
            heuristic_factor: 1.0,
        }
    }

    /// Estimated remaining cost from `p` to `goal`.
    pub fn heuristic(&self, p: &Point, goal: &Point) -> f64 {
        euclidean(p, goal) * self.heuristic_factor
    }

    /// Searches for a shortest path from `start` to `end` over the cached neighbours of `grid`.
    ///
    /// Every transition is written to the grid and then reported to `sink`: cells become
    /// [Open](CellState::Open) when queued and [Closed](CellState::Closed) once expanded. On
    /// success the cells strictly between end and start are marked
    /// [Path](CellState::Path) in goal-to-start order, followed by the end and the start being
    /// marked with their own tags. `cancel` is polled before each pop.
    ///
    /// Fails without emitting any step if `start == end`, either endpoint is out of bounds or a
    /// barrier, or the neighbours have not been refreshed since the last barrier edit.
    pub fn run<S, C>(
        &self,
        grid: &mut Grid,
        start: Point,
        end: Point,
        sink: &mut S,
        cancel: &C,
    ) -> Result<SearchOutcome, SearchError>
    where
        S: StepSink + ?Sized,
        C: Cancellation + ?Sized,
    {
        self.run_traced(grid, start, end, sink, cancel, &mut NoTrace)
    }

    /// [run](Self::run) with a signal that is never raised.
    pub fn run_uncancelled<S>(
        &self,
        grid: &mut Grid,
        start: Point,
        end: Point,
        sink: &mut S,
    ) -> Result<SearchOutcome, SearchError>
    where
        S: StepSink + ?Sized,
    {
        self.run(grid, start, end, sink, &NeverCancel)
    }

    /// [run](Self::run) that additionally reports every g/f assignment to `scores`.
    pub fn run_traced<S, C, T>(
        &self,
        grid: &mut Grid,
        start: Point,
        end: Point,
        sink: &mut S,
        cancel: &C,
        scores: &mut T,
    ) -> Result<SearchOutcome, SearchError>
    where
        S: StepSink + ?Sized,
        C: Cancellation + ?Sized,
        T: SearchTrace + ?Sized,
    {
        let start_ix = grid.check(start)?;
        let end_ix = grid.check(end)?;
        if start_ix == end_ix {
            return Err(SearchError::StartIsEnd(start));
        }
        if grid.neighbours_dirty() {
            return Err(SearchError::StaleNeighbours);
        }
        for endpoint in [start, end] {
            if grid.cell(endpoint).is_barrier() {
                return Err(SearchError::BlockedEndpoint(endpoint));
            }
        }

        info!("Searching for a path from {} to {}", start, end);
        let mut state = SearchState::new(grid.len());
        state.g_score[start_ix] = 0.0;
        state.f_score[start_ix] = self.heuristic(&start, &end);
        scores.on_score(start, 0.0, state.f_score[start_ix]);
        state.push(start_ix);

        let mut expanded = 0;
        while !state.open_set.is_empty() {
            if cancel.is_cancelled() {
                warn!(
                    "Search from {} to {} cancelled after expanding {} cells",
                    start, end, expanded
                );
                return Ok(SearchOutcome::Cancelled);
            }
            let Some(current) = state.pop() else {
                break;
            };
            expanded += 1;

            if current == end_ix {
                let trail = reconstruct_path(&state.came_from, end_ix, |ix| {
                    grid.mark(ix, CellState::Path);
                    sink.on_step(grid.point(ix), CellState::Path);
                });
                grid.mark(end_ix, CellState::End);
                sink.on_step(end, CellState::End);
                grid.mark(start_ix, CellState::Start);
                sink.on_step(start, CellState::Start);

                let path = iter::once(start)
                    .chain(trail.iter().rev().map(|&ix| grid.point(ix)))
                    .chain(iter::once(end))
                    .collect::<Vec<Point>>();
                let cost = path.len() - 1;
                info!(
                    "Found a path of {} moves from {} to {} after expanding {} cells",
                    cost, start, end, expanded
                );
                return Ok(SearchOutcome::PathFound(FoundPath {
                    path,
                    cost,
                    expanded,
                }));
            }

            let current_g = state.g_score[current];
            trace!("Expanding {} (g = {})", grid.point(current), current_g);
            let neighbours =
                SmallVec::<[Point; N_NEIGHBOURS]>::from_slice(grid.neighbours_ix(current));
            for neighbour in neighbours {
                let n_ix = grid.ix(neighbour);
                let tentative_g = current_g + STEP_COST;
                if tentative_g < state.g_score[n_ix] {
                    state.came_from.insert(n_ix, current);
                    state.g_score[n_ix] = tentative_g;
                    state.f_score[n_ix] = tentative_g + self.heuristic(&neighbour, &end);
                    scores.on_score(neighbour, tentative_g, state.f_score[n_ix]);
                    if !state.open_members.contains(&n_ix) {
                        state.push(n_ix);
                        grid.mark(n_ix, CellState::Open);
                        sink.on_step(neighbour, CellState::Open);
                    }
                }
            }

            if current != start_ix {
                grid.mark(current, CellState::Closed);
                sink.on_step(grid.point(current), CellState::Closed);
            }
        }
        info!(
            "No path from {} to {} after expanding {} cells",
            start, end, expanded
        );
        Ok(SearchOutcome::NoPathExists)
    }
}
