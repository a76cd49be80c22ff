use crate::astar::{PathSearch, SearchOutcome};
use crate::cancel::Cancellation;
use crate::cell::CellState;
use crate::error::EditError;
use crate::grid::Grid;
use crate::observer::StepSink;
use crate::{DEFAULT_ROWS, DEFAULT_WIDTH};
use grid_util::point::Point;
use log::{debug, info};

/// The editing surface a UI drives: painting endpoints and barriers, erasing, running a search
/// and resetting. Keeps at most one start and one end on the grid at any time, and never lets a
/// barrier cover either of them.
#[derive(Clone, Debug)]
pub struct Editor {
    grid: Grid,
    start: Option<Point>,
    end: Option<Point>,
}

impl Default for Editor {
    fn default() -> Editor {
        Editor::with_defaults()
    }
}

impl Editor {
    pub fn new(rows: usize, pixel_width: u32) -> Editor {
        Editor {
            grid: Grid::new(rows, pixel_width),
            start: None,
            end: None,
        }
    }
    /// A [DEFAULT_ROWS] x [DEFAULT_ROWS] grid drawn [DEFAULT_WIDTH] pixels wide.
    pub fn with_defaults() -> Editor {
        Editor::new(DEFAULT_ROWS, DEFAULT_WIDTH)
    }
    pub fn grid(&self) -> &Grid {
        &self.grid
    }
    pub fn start(&self) -> Option<Point> {
        self.start
    }
    pub fn end(&self) -> Option<Point> {
        self.end
    }
    pub fn cell_at_pixel(&self, x: u32, y: u32) -> Option<Point> {
        self.grid.cell_at_pixel(x, y)
    }

    /// Makes `point` the start, moving the marker if a start already exists. Rejected on the
    /// end cell.
    pub fn paint_start(&mut self, point: Point) -> Result<(), EditError> {
        self.grid.try_cell(point)?;
        if self.end == Some(point) {
            return Err(EditError::Occupied(point));
        }
        if let Some(old) = self.start.filter(|&old| old != point) {
            self.grid.set_state(old, CellState::Blank)?;
        }
        self.grid.set_state(point, CellState::Start)?;
        self.start = Some(point);
        Ok(())
    }
    /// Makes `point` the end, moving the marker if an end already exists. Rejected on the start
    /// cell.
    pub fn paint_end(&mut self, point: Point) -> Result<(), EditError> {
        self.grid.try_cell(point)?;
        if self.start == Some(point) {
            return Err(EditError::Occupied(point));
        }
        if let Some(old) = self.end.filter(|&old| old != point) {
            self.grid.set_state(old, CellState::Blank)?;
        }
        self.grid.set_state(point, CellState::End)?;
        self.end = Some(point);
        Ok(())
    }
    /// Rejected on the start and end cells.
    pub fn paint_barrier(&mut self, point: Point) -> Result<(), EditError> {
        self.grid.try_cell(point)?;
        if self.start == Some(point) || self.end == Some(point) {
            return Err(EditError::Occupied(point));
        }
        self.grid.set_state(point, CellState::Barrier)?;
        Ok(())
    }
    /// Blanks a cell, forgetting it as start or end.
    pub fn erase(&mut self, point: Point) -> Result<(), EditError> {
        self.grid.set_state(point, CellState::Blank)?;
        if self.start == Some(point) {
            self.start = None;
        }
        if self.end == Some(point) {
            self.end = None;
        }
        Ok(())
    }
    /// Primary-button policy: the first click places the start, the next the end, and later
    /// clicks place barriers. Clicking the start or end cell itself does nothing. Returns the
    /// resulting state of the cell.
    pub fn click(&mut self, point: Point) -> Result<CellState, EditError> {
        let target = Some(point);
        if self.start.is_none() && target != self.end {
            self.paint_start(point)?;
        } else if self.end.is_none() && target != self.start {
            self.paint_end(point)?;
        } else if target != self.start && target != self.end {
            self.paint_barrier(point)?;
        }
        Ok(self.grid.try_cell(point)?.state())
    }

    /// Clears the marks of any previous search, refreshes every neighbour list and runs
    /// `search` from the start to the end.
    pub fn run<S, C>(
        &mut self,
        search: &PathSearch,
        sink: &mut S,
        cancel: &C,
    ) -> Result<SearchOutcome, EditError>
    where
        S: StepSink + ?Sized,
        C: Cancellation + ?Sized,
    {
        let (Some(start), Some(end)) = (self.start, self.end) else {
            return Err(EditError::MissingEndpoint);
        };
        self.grid.clear_search_marks();
        // A cancelled run can leave the end marked open.
        self.grid.set_state(start, CellState::Start)?;
        self.grid.set_state(end, CellState::End)?;
        self.grid.update_neighbours();
        Ok(search.run(&mut self.grid, start, end, sink, cancel)?)
    }

    /// Whether the end can be reached from the start, answered from the connected components
    /// without searching. `None` until both are painted.
    pub fn reachable(&mut self) -> Option<bool> {
        let (start, end) = (self.start?, self.end?);
        self.grid.update();
        Some(self.grid.reachable(&start, &end))
    }

    /// Forgets start and end and replaces the grid by a blank one of the same size.
    pub fn reset(&mut self) {
        info!("Resetting {0}x{0} grid", self.grid.rows());
        self.start = None;
        self.end = None;
        self.grid = self.grid.reset();
        debug!("Grid replaced");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cancel::NeverCancel;
    use crate::observer::StepRecorder;

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn clicks_place_start_end_then_barriers() {
        let mut editor = Editor::new(3, 300);
        assert_eq!(editor.click(p(0, 0)).unwrap(), CellState::Start);
        // Clicking the start again is a no-op
        assert_eq!(editor.click(p(0, 0)).unwrap(), CellState::Start);
        assert_eq!(editor.click(p(2, 2)).unwrap(), CellState::End);
        assert_eq!(editor.click(p(1, 1)).unwrap(), CellState::Barrier);
        assert_eq!(editor.click(p(2, 2)).unwrap(), CellState::End);
        assert_eq!(editor.start(), Some(p(0, 0)));
        assert_eq!(editor.end(), Some(p(2, 2)));
    }

    #[test]
    fn only_one_start_and_end() {
        let mut editor = Editor::new(4, 400);
        editor.paint_start(p(0, 0)).unwrap();
        editor.paint_start(p(1, 0)).unwrap();
        editor.paint_end(p(3, 3)).unwrap();
        editor.paint_end(p(2, 3)).unwrap();
        let count = |editor: &Editor, state: CellState| {
            editor.grid().cells().filter(|c| c.state() == state).count()
        };
        assert_eq!(count(&editor, CellState::Start), 1);
        assert_eq!(count(&editor, CellState::End), 1);
        assert_eq!(editor.grid().state(p(0, 0)), CellState::Blank);
        assert_eq!(editor.grid().state(p(3, 3)), CellState::Blank);
    }

    #[test]
    fn endpoints_cannot_be_covered() {
        let mut editor = Editor::new(3, 300);
        editor.paint_start(p(0, 0)).unwrap();
        editor.paint_end(p(1, 1)).unwrap();
        assert_eq!(editor.paint_barrier(p(0, 0)), Err(EditError::Occupied(p(0, 0))));
        assert_eq!(editor.paint_end(p(0, 0)), Err(EditError::Occupied(p(0, 0))));
        assert_eq!(editor.paint_start(p(1, 1)), Err(EditError::Occupied(p(1, 1))));
        assert!(matches!(
            editor.paint_barrier(p(5, 0)),
            Err(EditError::Grid(_))
        ));
    }

    #[test]
    fn painting_start_over_barrier_replaces_it() {
        let mut editor = Editor::new(3, 300);
        editor.paint_barrier(p(1, 1)).unwrap();
        editor.paint_start(p(1, 1)).unwrap();
        assert!(!editor.grid().cell(p(1, 1)).is_barrier());
    }

    #[test]
    fn erasing_forgets_endpoints() {
        let mut editor = Editor::new(3, 300);
        editor.click(p(0, 0)).unwrap();
        editor.click(p(2, 2)).unwrap();
        editor.erase(p(0, 0)).unwrap();
        assert_eq!(editor.start(), None);
        assert_eq!(
            editor.run(&PathSearch::new(), &mut StepRecorder::new(), &NeverCancel),
            Err(EditError::MissingEndpoint)
        );
        // The next click places the start again.
        assert_eq!(editor.click(p(1, 0)).unwrap(), CellState::Start);
    }

    #[test]
    fn rerun_after_edit_uses_fresh_neighbours() {
        let mut editor = Editor::new(3, 300);
        editor.paint_start(p(0, 0)).unwrap();
        editor.paint_end(p(2, 2)).unwrap();
        let search = PathSearch::new();
        let outcome = editor
            .run(&search, &mut StepRecorder::new(), &NeverCancel)
            .unwrap();
        assert_eq!(outcome.path().unwrap().len(), 4);

        for column in 0..3 {
            editor.paint_barrier(p(1, column)).unwrap();
        }
        assert_eq!(editor.reachable(), Some(false));
        let outcome = editor
            .run(&search, &mut StepRecorder::new(), &NeverCancel)
            .unwrap();
        assert_eq!(outcome, SearchOutcome::NoPathExists);
        assert!(!editor
            .grid()
            .cells()
            .any(|c| c.state() == CellState::Path));
    }

    #[test]
    fn cancelled_run_leaves_endpoints_restorable() {
        let mut editor = Editor::new(4, 400);
        editor.paint_start(p(0, 0)).unwrap();
        editor.paint_end(p(0, 1)).unwrap();
        let search = PathSearch::new();
        let polls = std::cell::Cell::new(0);
        // Stop right after the end has been queued.
        let cancel = || {
            polls.set(polls.get() + 1);
            polls.get() > 1
        };
        let outcome = editor
            .run(&search, &mut StepRecorder::new(), &cancel)
            .unwrap();
        assert_eq!(outcome, SearchOutcome::Cancelled);
        assert_eq!(editor.grid().state(p(0, 1)), CellState::Open);

        let outcome = editor
            .run(&search, &mut StepRecorder::new(), &NeverCancel)
            .unwrap();
        assert_eq!(outcome.path().unwrap().len(), 1);
        assert_eq!(editor.grid().state(p(0, 1)), CellState::End);
    }

    #[test]
    fn open_mark_on_end_does_not_unprotect_it() {
        let mut editor = Editor::new(4, 400);
        editor.paint_start(p(0, 0)).unwrap();
        editor.paint_end(p(0, 1)).unwrap();
        let polls = std::cell::Cell::new(0);
        let cancel = || {
            polls.set(polls.get() + 1);
            polls.get() > 1
        };
        let outcome = editor
            .run(&PathSearch::new(), &mut StepRecorder::new(), &cancel)
            .unwrap();
        assert_eq!(outcome, SearchOutcome::Cancelled);
        assert_eq!(editor.grid().state(p(0, 1)), CellState::Open);

        assert_eq!(editor.paint_barrier(p(0, 1)), Err(EditError::Occupied(p(0, 1))));
        assert_eq!(editor.paint_start(p(0, 1)), Err(EditError::Occupied(p(0, 1))));
        assert_eq!(editor.paint_end(p(0, 0)), Err(EditError::Occupied(p(0, 0))));
        assert_eq!(editor.paint_barrier(p(0, 0)), Err(EditError::Occupied(p(0, 0))));
        assert_eq!(editor.start(), Some(p(0, 0)));
        assert_eq!(editor.end(), Some(p(0, 1)));
        assert!(!editor.grid().cell(p(0, 1)).is_barrier());

        let outcome = editor
            .run(&PathSearch::new(), &mut StepRecorder::new(), &NeverCancel)
            .unwrap();
        assert_eq!(outcome.path().unwrap().len(), 1);
    }

    #[test]
    fn reset_clears_everything() {
        let mut editor = Editor::with_defaults();
        editor.click(p(3, 4)).unwrap();
        editor.click(p(10, 10)).unwrap();
        editor.click(p(5, 5)).unwrap();
        editor.reset();
        assert_eq!(editor.start(), None);
        assert_eq!(editor.end(), None);
        assert_eq!(editor.grid().rows(), DEFAULT_ROWS);
        assert!(editor
            .grid()
            .cells()
            .all(|c| c.state() == CellState::Blank));
    }
}
