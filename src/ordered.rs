use ordered_iter::OrderedMapIterator;
use super::tree::{IntoIter, Iter, IterMut};

impl<K, V> OrderedMapIterator for IntoIter<K, V> where K: Ord {
    type Key = K;
    type Val = V;
}

impl<'a, K, V> OrderedMapIterator for Iter<'a, K, V> where K: Ord {
    type Key = &'a K;
    type Val = &'a V;
}

impl<'a, K, V> OrderedMapIterator for IterMut<'a, K, V> where K: Ord {
    type Key = &'a K;
    type Val = &'a mut V;
}

#[cfg(test)]
mod test {
    use ordered_iter::OrderedMapIterator;
    use crate::Tree;

    #[test]
    fn inner_join() {
        let a: Tree<u32, char> = vec![(1, 'a'), (2, 'b'), (4, 'd')].into_iter().collect();
        let b: Tree<u32, u8> = vec![(2, 20), (3, 30), (4, 40)].into_iter().collect();

        let joined: Vec<_> = a.iter().inner_join_map(b.iter()).collect();
        assert_eq!(joined, [(&2, (&'b', &20)), (&4, (&'d', &40))]);
    }
}
