use astar_visualizer::heuristic::manhattan;
use astar_visualizer::{
    CellState, Grid, NeverCancel, PathSearch, SearchOutcome, StepRecorder,
};
use grid_util::point::Point;
use proptest::prelude::*;
use std::collections::HashMap;

fn arb_pair(max_rows: usize) -> impl Strategy<Value = (usize, Point, Point)> {
    (2..=max_rows).prop_flat_map(|rows| {
        let n = rows as i32;
        (Just(rows), 0..n, 0..n, 0..n, 0..n)
            .prop_map(|(rows, ax, ay, bx, by)| (rows, Point::new(ax, ay), Point::new(bx, by)))
            .prop_filter("distinct endpoints", |(_, a, b)| a != b)
    })
}

fn arb_walls(rows: usize) -> impl Strategy<Value = Vec<bool>> {
    proptest::collection::vec(proptest::bool::weighted(0.35), rows * rows)
}

fn grid_with_walls(rows: usize, walls: &[bool], keep_free: [Point; 2]) -> Grid {
    let mut grid = Grid::new(rows, 10 * rows as u32);
    for (ix, &wall) in walls.iter().enumerate() {
        let p = Point::new((ix / rows) as i32, (ix % rows) as i32);
        if wall && !keep_free.contains(&p) {
            grid.set_state(p, CellState::Barrier).unwrap();
        }
    }
    grid.update_neighbours();
    grid
}

proptest! {
    #[test]
    fn open_grid_paths_are_manhattan((rows, start, end) in arb_pair(12)) {
        let mut grid = Grid::new(rows, 800);
        grid.update_neighbours();
        let outcome = PathSearch::new()
            .run_uncancelled(&mut grid, start, end, &mut StepRecorder::new())
            .unwrap();
        prop_assert_eq!(outcome.path().map(|f| f.len()), Some(manhattan(&start, &end)));
    }

    #[test]
    fn barred_end_is_unreachable(
        (rows, start, end) in arb_pair(10),
        walls in arb_walls(10),
    ) {
        let mut grid = grid_with_walls(rows, &walls[..rows * rows], [start, end]);
        for n in grid.compute_neighbours(end) {
            if n != start {
                grid.set_state(n, CellState::Barrier).unwrap();
            }
        }
        grid.update_neighbours();
        // Start may itself be the only neighbour of the end.
        prop_assume!(!grid.compute_neighbours(end).contains(&start));
        let outcome = PathSearch::new()
            .run_uncancelled(&mut grid, start, end, &mut StepRecorder::new())
            .unwrap();
        prop_assert_eq!(outcome, SearchOutcome::NoPathExists);
    }

    #[test]
    fn runs_with_fresh_state_are_identical(
        (rows, start, end) in arb_pair(10),
        walls in arb_walls(10),
    ) {
        let grid = grid_with_walls(rows, &walls[..rows * rows], [start, end]);
        let search = PathSearch::new();
        let mut first_grid = grid.clone();
        let mut second_grid = grid;
        let mut first = StepRecorder::new();
        let mut second = StepRecorder::new();
        let a = search.run_uncancelled(&mut first_grid, start, end, &mut first).unwrap();
        let b = search.run_uncancelled(&mut second_grid, start, end, &mut second).unwrap();
        prop_assert_eq!(a, b);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn g_scores_only_decrease(
        (rows, start, end) in arb_pair(10),
        walls in arb_walls(10),
    ) {
        let mut grid = grid_with_walls(rows, &walls[..rows * rows], [start, end]);
        let search = PathSearch::new();
        let mut best: HashMap<Point, f64> = HashMap::new();
        let mut violations = Vec::new();
        let mut scores = |p: Point, g: f64, f: f64| {
            if let Some(&previous) = best.get(&p) {
                if g >= previous {
                    violations.push(p);
                }
            }
            best.insert(p, g);
            if f != g + search.heuristic(&p, &end) {
                violations.push(p);
            }
        };
        search
            .run_traced(&mut grid, start, end, &mut StepRecorder::new(), &NeverCancel, &mut scores)
            .unwrap();
        prop_assert!(violations.is_empty(), "violations at {:?}", violations);
    }

    #[test]
    fn path_steps_follow_search_steps(
        (rows, start, end) in arb_pair(10),
        walls in arb_walls(10),
    ) {
        let mut grid = grid_with_walls(rows, &walls[..rows * rows], [start, end]);
        let mut recorder = StepRecorder::new();
        let outcome = PathSearch::new()
            .run_uncancelled(&mut grid, start, end, &mut recorder)
            .unwrap();
        let steps = recorder.steps();
        match outcome {
            SearchOutcome::PathFound(found) => {
                let tail = &steps[steps.len() - (found.len() + 1)..];
                let marked = tail[..found.len() - 1].iter().map(|s| s.point).collect::<Vec<_>>();
                let mut expected = found.intermediate().to_vec();
                expected.reverse();
                prop_assert_eq!(marked, expected);
                prop_assert_eq!(tail[found.len() - 1].state, CellState::End);
                prop_assert_eq!(tail[found.len()].state, CellState::Start);
            }
            SearchOutcome::NoPathExists => {
                prop_assert!(steps.iter().all(|s| s.state != CellState::Path));
            }
            SearchOutcome::Cancelled => prop_assert!(false, "never cancelled"),
        }
    }
}
