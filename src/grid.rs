use crate::cell::{Cell, CellState, N_NEIGHBOURS};
use crate::error::GridError;
use core::fmt;
use grid_util::point::Point;
use itertools::{iproduct, Itertools};
use log::debug;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;
use std::ops::Index;

/// [Grid] is a square array of [Cell]s addressed by (row, column), stored densely in row-major
/// order. Besides the cell states it keeps the neighbour snapshot the search reads, and a
/// [UnionFind] structure over 4-connected free cells to answer reachability queries without
/// searching.
#[derive(Clone, Debug)]
pub struct Grid {
    rows: usize,
    pixel_width: u32,
    cells: Vec<Cell>,
    neighbours_dirty: bool,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
}

impl Grid {
    /// Allocates a `rows` x `rows` grid of blank cells drawn `pixel_width` pixels wide.
    pub fn new(rows: usize, pixel_width: u32) -> Grid {
        let cells = iproduct!(0..rows, 0..rows)
            .map(|(row, column)| Cell::blank(row, column))
            .collect();
        Grid {
            rows,
            pixel_width,
            cells,
            neighbours_dirty: true,
            components: UnionFind::new(rows * rows),
            components_dirty: true,
        }
    }
    /// A new all-blank grid with the same dimensions. The old grid is meant to be dropped.
    pub fn reset(&self) -> Grid {
        Grid::new(self.rows, self.pixel_width)
    }
    pub fn rows(&self) -> usize {
        self.rows
    }
    pub fn len(&self) -> usize {
        self.cells.len()
    }
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
    pub fn pixel_width(&self) -> u32 {
        self.pixel_width
    }
    /// Side length of a cell in pixels.
    pub fn cell_size(&self) -> u32 {
        if self.rows == 0 {
            0
        } else {
            self.pixel_width / self.rows as u32
        }
    }
    /// Maps a pixel position to the cell drawn there. The first pixel coordinate selects the row.
    pub fn cell_at_pixel(&self, x: u32, y: u32) -> Option<Point> {
        let gap = self.cell_size();
        if gap == 0 {
            return None;
        }
        let point = Point::new((x / gap) as i32, (y / gap) as i32);
        self.in_bounds(point).then_some(point)
    }
    pub fn in_bounds(&self, point: Point) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.x as usize) < self.rows
            && (point.y as usize) < self.rows
    }
    pub(crate) fn check(&self, point: Point) -> Result<usize, GridError> {
        if self.in_bounds(point) {
            Ok(self.ix(point))
        } else {
            Err(GridError::OutOfBounds {
                point,
                rows: self.rows,
            })
        }
    }
    /// Dense index of an in-bounds point.
    pub(crate) fn ix(&self, point: Point) -> usize {
        debug_assert!(self.in_bounds(point));
        point.x as usize * self.rows + point.y as usize
    }
    pub(crate) fn point(&self, ix: usize) -> Point {
        self.cells[ix].position
    }
    pub fn try_cell(&self, point: Point) -> Result<&Cell, GridError> {
        self.check(point).map(|ix| &self.cells[ix])
    }
    /// Bounds-checked lookup. Addressing a cell outside the grid is a programming error and
    /// panics; use [try_cell](Self::try_cell) for untrusted input.
    pub fn cell(&self, point: Point) -> &Cell {
        match self.try_cell(point) {
            Ok(cell) => cell,
            Err(e) => panic!("{e}"),
        }
    }
    pub fn state(&self, point: Point) -> CellState {
        self.cell(point).state
    }
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }
    /// Sets the state of a cell and returns the previous one. Changing whether a cell is a
    /// barrier invalidates the neighbour snapshot; freeing a cell joins it with the components
    /// of its free neighbours while blocking one flags the components as dirty, since a
    /// component may have been split.
    ///
    /// This does not enforce the single start / single end rule, see
    /// [Editor](crate::editor::Editor) for that.
    pub fn set_state(&mut self, point: Point, state: CellState) -> Result<CellState, GridError> {
        let ix = self.check(point)?;
        let previous = self.cells[ix].state;
        let was_barrier = previous == CellState::Barrier;
        let is_barrier = state == CellState::Barrier;
        if was_barrier != is_barrier {
            self.neighbours_dirty = true;
            if is_barrier {
                self.components_dirty = true;
            }
        }
        self.cells[ix].state = state;
        if was_barrier && !is_barrier {
            for n in self.compute_neighbours(point) {
                let n_ix = self.ix(n);
                self.components.union(ix, n_ix);
            }
        }
        Ok(previous)
    }
    /// Writes a search tag; search tags never change barrier status.
    pub(crate) fn mark(&mut self, ix: usize, state: CellState) {
        debug_assert!(state != CellState::Barrier);
        self.cells[ix].state = state;
    }
    /// Turns every Open, Closed and Path cell back to Blank.
    pub fn clear_search_marks(&mut self) {
        self.cells
            .iter_mut()
            .filter(|c| c.state.is_search_mark())
            .for_each(|c| c.state = CellState::Blank);
    }

    /// Computes the current up/down/right/left neighbours of a cell that are in bounds and not
    /// barriers, independent of the cached snapshot.
    pub fn compute_neighbours(&self, point: Point) -> SmallVec<[Point; N_NEIGHBOURS]> {
        [
            Point::new(point.x + 1, point.y),
            Point::new(point.x - 1, point.y),
            Point::new(point.x, point.y + 1),
            Point::new(point.x, point.y - 1),
        ]
        .into_iter()
        .filter(|&p| self.in_bounds(p) && !self.cells[self.ix(p)].is_barrier())
        .collect()
    }
    /// Recomputes the neighbour snapshot of every cell. Must be called after the last edit and
    /// before a search.
    pub fn update_neighbours(&mut self) {
        debug!("Refreshing neighbours of {} cells", self.cells.len());
        for ix in 0..self.cells.len() {
            let neighbours = self.compute_neighbours(self.cells[ix].position);
            self.cells[ix].neighbours = neighbours;
        }
        self.neighbours_dirty = false;
    }
    /// The cached neighbours of a cell.
    pub fn neighbours_of(&self, point: Point) -> &[Point] {
        &self.cell(point).neighbours
    }
    pub(crate) fn neighbours_ix(&self, ix: usize) -> &[Point] {
        &self.cells[ix].neighbours
    }
    /// Whether a barrier changed since the last [update_neighbours](Self::update_neighbours).
    pub fn neighbours_dirty(&self) -> bool {
        self.neighbours_dirty
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            self.generate_components();
        }
    }
    /// Generates a new [UnionFind] structure and links up free 4-neighbours to the same
    /// components.
    pub fn generate_components(&mut self) {
        debug!("Generating connected components");
        self.components = UnionFind::new(self.cells.len());
        self.components_dirty = false;
        for (row, column) in iproduct!(0..self.rows, 0..self.rows) {
            let point = Point::new(row as i32, column as i32);
            let parent_ix = self.ix(point);
            if self.cells[parent_ix].is_barrier() {
                continue;
            }
            [
                Point::new(point.x + 1, point.y),
                Point::new(point.x, point.y + 1),
            ]
            .into_iter()
            .filter(|&p| self.in_bounds(p) && !self.cells[self.ix(p)].is_barrier())
            .map(|p| self.ix(p))
            .collect::<SmallVec<[usize; 2]>>()
            .into_iter()
            .for_each(|ix| {
                self.components.union(parent_ix, ix);
            });
        }
    }
    /// Retrieves the component id a given [Point] belongs to.
    pub fn get_component(&self, point: &Point) -> Result<usize, GridError> {
        self.check(*point).map(|ix| self.components.find(ix))
    }
    /// Checks if start and goal are free cells on the same component. Only meaningful after
    /// [update](Self::update) when barriers were added.
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        !self.unreachable(start, goal)
    }
    /// Checks if start and goal are not on the same component.
    pub fn unreachable(&self, start: &Point, goal: &Point) -> bool {
        if self.in_bounds(*start) && self.in_bounds(*goal) {
            let start_ix = self.ix(*start);
            let goal_ix = self.ix(*goal);
            self.cells[start_ix].is_barrier()
                || self.cells[goal_ix].is_barrier()
                || !self.components.equiv(start_ix, goal_ix)
        } else {
            true
        }
    }
}

impl Index<Point> for Grid {
    type Output = Cell;

    fn index(&self, point: Point) -> &Cell {
        self.cell(point)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.cells.chunks(self.rows.max(1)) {
            writeln!(f, "{}", row.iter().map(|c| c.state.symbol()).join(""))?;
        }
        Ok(())
    }
}
