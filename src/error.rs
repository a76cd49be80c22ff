//! Error types for grid lookups, search preconditions and editing.
//!
//! Only precondition violations are errors. A search that finds no path or is
//! cancelled returns `Ok` with the matching [SearchOutcome](crate::astar::SearchOutcome).
use grid_util::point::Point;
use thiserror::Error;

/// Errors from addressing cells on a [Grid](crate::grid::Grid).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("cell {point} is outside a {rows}x{rows} grid")]
    OutOfBounds { point: Point, rows: usize },
}

/// Violated preconditions of [PathSearch::run](crate::astar::PathSearch::run).
/// These indicate caller bugs; no step is ever emitted before one is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("start and end are the same cell {0}")]
    StartIsEnd(Point),
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error("neighbours are stale: call Grid::update_neighbours before searching")]
    StaleNeighbours,
    #[error("endpoint {0} is a barrier")]
    BlockedEndpoint(Point),
}

/// Errors from the [Editor](crate::editor::Editor) interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("cell {0} already holds the start or end marker")]
    Occupied(Point),
    #[error("both a start and an end cell must be painted before running")]
    MissingEndpoint,
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Search(#[from] SearchError),
}
