use core::fmt;
use grid_util::point::Point;
use smallvec::SmallVec;

/// Maximum number of neighbours of a cell on a 4-connected grid.
pub const N_NEIGHBOURS: usize = 4;

/// The visual state of a single cell. The renderer maps each tag to a colour.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CellState {
    #[default]
    Blank,
    /// In the open set of a running or finished search.
    Open,
    /// Expanded by a search.
    Closed,
    Barrier,
    Start,
    End,
    /// Part of the reconstructed shortest path.
    Path,
}

impl CellState {
    /// Tags written by a search run, as opposed to ones painted by the user.
    pub fn is_search_mark(self) -> bool {
        matches!(self, CellState::Open | CellState::Closed | CellState::Path)
    }

    /// Single character used by the textual [Display](core::fmt::Display) of a grid.
    pub fn symbol(self) -> char {
        match self {
            CellState::Blank => '.',
            CellState::Open => 'o',
            CellState::Closed => 'x',
            CellState::Barrier => '#',
            CellState::Start => 'S',
            CellState::End => 'E',
            CellState::Path => '*',
        }
    }
}

impl fmt::Display for CellState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A grid position with its state tag and its cached neighbour snapshot. The
/// neighbour list is only as fresh as the last
/// [update_neighbours](crate::grid::Grid::update_neighbours) call.
#[derive(Clone, Debug)]
pub struct Cell {
    pub(crate) position: Point,
    pub(crate) state: CellState,
    pub(crate) neighbours: SmallVec<[Point; N_NEIGHBOURS]>,
}

impl Cell {
    pub(crate) fn blank(row: usize, column: usize) -> Cell {
        Cell {
            position: Point::new(row as i32, column as i32),
            state: CellState::Blank,
            neighbours: SmallVec::new(),
        }
    }
    /// Position as a [Point] with `x` the row and `y` the column.
    pub fn position(&self) -> Point {
        self.position
    }
    pub fn row(&self) -> usize {
        self.position.x as usize
    }
    pub fn column(&self) -> usize {
        self.position.y as usize
    }
    pub fn state(&self) -> CellState {
        self.state
    }
    pub fn is_barrier(&self) -> bool {
        self.state == CellState::Barrier
    }
    pub fn neighbours(&self) -> &[Point] {
        &self.neighbours
    }
}
