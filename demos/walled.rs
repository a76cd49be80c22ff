use astar_visualizer::{CellState, Editor, NeverCancel, PathSearch};
use grid_util::point::Point;

// The end is enclosed by barriers, so the search exhausts every reachable cell. Each step is
// printed as it happens, the way a renderer would receive it.
fn main() {
    let mut editor = Editor::new(7, 700);
    editor.paint_start(Point::new(0, 0)).unwrap();
    editor.paint_end(Point::new(5, 5)).unwrap();
    for p in [
        Point::new(4, 5),
        Point::new(6, 5),
        Point::new(5, 4),
        Point::new(5, 6),
    ] {
        editor.paint_barrier(p).unwrap();
    }
    println!("Reachable: {:?}", editor.reachable());
    let mut on_step = |p: Point, state: CellState| println!("{p} -> {state:?}");
    let outcome = editor
        .run(&PathSearch::new(), &mut on_step, &NeverCancel)
        .unwrap();
    println!("{:?}", outcome);
    println!("{}", editor.grid());
}
