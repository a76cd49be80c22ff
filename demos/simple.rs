use astar_visualizer::{Editor, NeverCancel, PathSearch, StepRecorder};
use grid_util::point::Point;

// In this example a path is found on a 5x5 grid with shape
// S....
// .#...
// .#...
// .#...
// ....E
// where
// - # marks a barrier
// - S marks the start
// - E marks the end

fn main() {
    let mut editor = Editor::new(5, 500);
    editor.click(Point::new(0, 0)).unwrap();
    editor.click(Point::new(4, 4)).unwrap();
    for row in 1..4 {
        editor.click(Point::new(row, 1)).unwrap();
    }
    let mut steps = StepRecorder::new();
    let outcome = editor
        .run(&PathSearch::new(), &mut steps, &NeverCancel)
        .unwrap();
    println!("{}", editor.grid());
    println!("{} steps", steps.len());
    if let Some(found) = outcome.path() {
        println!("Path of {} moves:", found.len());
        for p in &found.path {
            println!("{:?}", p);
        }
    }
}
