//! # astar_visualizer
//!
//! The engine behind an interactive grid pathfinding visualizer. A user paints a start, an end
//! and barriers on a square grid, then watches an
//! [A* search](https://en.wikipedia.org/wiki/A*_search_algorithm) unfold: every cell entering
//! the open set, every expanded cell and finally the shortest path are reported one transition
//! at a time to a [StepSink], synchronously and in order.
//!
//! Moves are 4-connected with unit cost and the heuristic is the Euclidean distance. Ties
//! between equal estimates are broken by insertion order, so a run over the same grid always
//! produces the same sequence of steps. Connected components are tracked with a union-find
//! structure so a UI can tell in advance whether the end is reachable.
//!
//! ```
//! use astar_visualizer::{CellState, Editor, PathSearch, StepRecorder, NeverCancel};
//! use grid_util::point::Point;
//!
//! let mut editor = Editor::new(5, 500);
//! editor.paint_start(Point::new(0, 0)).unwrap();
//! editor.paint_end(Point::new(4, 4)).unwrap();
//! editor.paint_barrier(Point::new(1, 1)).unwrap();
//!
//! let mut steps = StepRecorder::new();
//! let outcome = editor.run(&PathSearch::new(), &mut steps, &NeverCancel).unwrap();
//! assert_eq!(outcome.path().unwrap().len(), 8);
//! assert_eq!(steps.count(CellState::Path), 7);
//! ```
pub mod astar;
pub mod cancel;
pub mod cell;
pub mod editor;
pub mod error;
pub mod grid;
pub mod heuristic;
pub mod observer;
pub mod reconstruct;

pub use crate::astar::{FoundPath, PathSearch, SearchOutcome};
pub use crate::cancel::{Cancellation, CancellationSource, CancellationToken, NeverCancel};
pub use crate::cell::{Cell, CellState};
pub use crate::editor::Editor;
pub use crate::error::{EditError, GridError, SearchError};
pub use crate::grid::Grid;
pub use crate::observer::{SearchTrace, Step, StepRecorder, StepSink};

/// Number of rows (and columns) of the grid an [Editor] starts with.
pub const DEFAULT_ROWS: usize = 25;
/// Width and height in pixels of the area the grid is drawn in.
pub const DEFAULT_WIDTH: u32 = 800;
/// Cost of a single move between adjacent cells.
pub const STEP_COST: f64 = 1.0;
