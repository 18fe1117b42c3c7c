//! Rebuilding a tree with minimal height.

use compare::Compare;
use super::node::Graph;

/// Rebuilds `graph` as a perfectly balanced tree holding the same entries.
///
/// The entries are drained in order and reinserted median first: the middle entry of a sorted
/// range becomes the root of that range's subtree, and the halves on either side are handled the
/// same way. A tree of `n` entries ends up with height `⌈log2(n + 1)⌉`.
pub fn rebuild<K, V, C>(graph: &mut Graph<K, V>, cmp: &C) where C: Compare<K> {
    let mut entries: Vec<Option<(K, V)>> = graph.drain_in_order().into_iter().map(Some).collect();
    log::debug!("rebuilding tree of {} entries", entries.len());
    insert_median(graph, cmp, &mut entries);
}

fn insert_median<K, V, C>(graph: &mut Graph<K, V>, cmp: &C, entries: &mut [Option<(K, V)>])
    where C: Compare<K> {

    if entries.is_empty() { return; }

    let mid = (entries.len() - 1) / 2;

    if let Some((key, value)) = entries[mid].take() {
        let (_, created) = graph.insert(cmp, key, value);
        debug_assert!(created);
    }

    let (left, right) = entries.split_at_mut(mid);
    insert_median(graph, cmp, left);
    insert_median(graph, cmp, &mut right[1..]);
}

#[cfg(test)]
mod test {
    use crate::Tree;

    fn keys_by_level(tree: &Tree<u32, ()>) -> Vec<Vec<u32>> {
        let mut levels = vec![];
        let mut level = vec![tree.root()];

        while !level.is_empty() {
            levels.push(level.iter().filter_map(|c| c.key().cloned()).collect());
            level = level.iter()
                .flat_map(|c| vec![c.left(), c.right()])
                .filter(|c| !c.is_end())
                .collect();
        }

        levels
    }

    #[test]
    fn picks_medians() {
        let mut tree: Tree<u32, ()> = [1, 3, 4, 5, 6, 7, 8].iter().map(|&k| (k, ())).collect();
        tree.balance();

        assert_eq!(keys_by_level(&tree), [vec![5], vec![3, 7], vec![1, 4, 6, 8]]);
        assert_eq!(tree.height(), 3);
    }

    #[test]
    fn lower_median_for_even_ranges() {
        let mut tree: Tree<u32, ()> = (1..5).map(|k| (k, ())).collect();
        tree.balance();

        assert_eq!(keys_by_level(&tree), [vec![2], vec![1, 3], vec![4]]);
    }

    #[test]
    fn minimal_height() {
        for n in 0..200u32 {
            let mut tree: Tree<u32, ()> = (0..n).map(|k| (k, ())).collect();
            tree.balance();

            let expected = (32 - n.leading_zeros()) as usize; // ⌈log2(n + 1)⌉
            assert_eq!(tree.height(), expected, "n = {}", n);
            assert!(tree.iter().map(|e| *e.0).eq(0..n));
        }
    }

    #[test]
    fn empty_tree() {
        let mut tree: Tree<u32, ()> = Tree::new();
        tree.balance();
        assert!(tree.is_empty());
        assert_eq!(tree.height(), 0);
    }
}
