use astar_visualizer::{CancellationSource, CellState, Editor, PathSearch};
use grid_util::point::Point;

// Simulates a user quitting while the search is still being drawn: the sink raises the
// cancellation signal after a fixed number of frames.
fn main() {
    let mut editor = Editor::with_defaults();
    editor.paint_start(Point::new(2, 2)).unwrap();
    editor.paint_end(Point::new(22, 20)).unwrap();
    for column in 0..20 {
        editor.paint_barrier(Point::new(12, column)).unwrap();
    }
    let source = CancellationSource::new();
    let mut frames = 0;
    let mut on_step = |_: Point, _: CellState| {
        frames += 1;
        if frames == 100 {
            source.cancel();
        }
    };
    let outcome = editor
        .run(&PathSearch::new(), &mut on_step, &source.token())
        .unwrap();
    println!("{:?} after {} frames", outcome, frames);
    println!("{}", editor.grid());
}
