use fxhash::FxBuildHasher;
use indexmap::IndexMap;
use std::hash::Hash;

pub type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Walks the predecessor map back from `end`: `came_from[end]`, then its predecessor, and so
/// on until a node without an entry, which is the start. Every node strictly between end and
/// start is passed to `on_path` and collected, in goal-to-start order.
///
/// `came_from` must form a tree rooted at the start. The walk is bounded by the size of the
/// map regardless.
pub fn reconstruct_path<N, F>(came_from: &FxIndexMap<N, N>, end: N, mut on_path: F) -> Vec<N>
where
    N: Eq + Hash + Copy,
    F: FnMut(N),
{
    std::iter::successors(came_from.get(&end).copied(), |node| {
        came_from.get(node).copied()
    })
    .take(came_from.len())
    .filter(|node| came_from.contains_key(node))
    .inspect(|&node| on_path(node))
    .collect()
}
