use grid_util::point::Point;

/// [Euclidean distance](https://en.wikipedia.org/wiki/Euclidean_distance) between two cells,
/// treating (row, column) as Cartesian coordinates. Never exceeds the number of 4-connected
/// unit moves between them, so it is admissible, though looser than the Manhattan distance.
pub fn euclidean(a: &Point, b: &Point) -> f64 {
    let dx = (a.x - b.x) as f64;
    let dy = (a.y - b.y) as f64;
    (dx * dx + dy * dy).sqrt()
}

/// Number of unit moves between two cells on an open 4-connected grid.
pub fn manhattan(a: &Point, b: &Point) -> usize {
    a.manhattan_distance(b) as usize
}
