//! An ordered map based on a binary search tree.

use compare::{Compare, Natural};
use std::fmt::{self, Debug, Display};
use std::iter::FromIterator;
use std::mem;
use std::ops;
use super::balance;
use super::error::Error;
use super::node::{Cursor, CursorMut, Graph, Search};

pub use super::node::{IntoIter, Iter, IterMut, OccupiedEntry, VacantEntry};

/// An ordered map based on a binary search tree.
///
/// Every node keeps a link to its parent, so cursors step through the tree in order without any
/// auxiliary stack. The tree is never rebalanced implicitly; call [`balance`](#method.balance)
/// to rebuild it with minimal height.
///
/// The behavior of this tree is undefined if a key's ordering relative to any other key changes
/// while the key is in the tree. This is normally only possible through `Cell`, `RefCell`, or
/// unsafe code.
pub struct Tree<K, V, C = Natural<K>> where C: Compare<K> {
    graph: Graph<K, V>,
    cmp: C,
}

impl<K, V> Tree<K, V> where K: Ord {
    /// Creates an empty tree ordered according to the natural order of its keys.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut tree = bst::Tree::new();
    ///
    /// tree.insert(2, "b");
    /// tree.insert(1, "a");
    /// tree.insert(3, "c");
    ///
    /// let mut it = tree.iter();
    /// assert_eq!(it.next(), Some((&1, &"a")));
    /// assert_eq!(it.next(), Some((&2, &"b")));
    /// assert_eq!(it.next(), Some((&3, &"c")));
    /// assert_eq!(it.next(), None);
    /// ```
    pub fn new() -> Self { Tree::with_cmp(compare::natural()) }
}

impl<K, V, C> Tree<K, V, C> where C: Compare<K> {
    /// Creates an empty tree ordered according to the given comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// use compare::{Compare, natural};
    ///
    /// let mut tree = bst::Tree::with_cmp(natural().rev());
    ///
    /// tree.insert(2, "b");
    /// tree.insert(1, "a");
    /// tree.insert(3, "c");
    ///
    /// let mut it = tree.iter();
    /// assert_eq!(it.next(), Some((&3, &"c")));
    /// assert_eq!(it.next(), Some((&2, &"b")));
    /// assert_eq!(it.next(), Some((&1, &"a")));
    /// assert_eq!(it.next(), None);
    /// ```
    pub fn with_cmp(cmp: C) -> Self { Tree { graph: Graph::new(), cmp } }

    /// Checks if the tree is empty.
    pub fn is_empty(&self) -> bool { self.graph.root().is_none() }

    /// Returns the number of entries in the tree.
    pub fn len(&self) -> usize { self.graph.len() }

    /// Returns the number of nodes on the longest path from the root to a leaf.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut tree = bst::Tree::new();
    /// assert_eq!(tree.height(), 0);
    ///
    /// tree.extend((1..8).map(|k| (k, ())));
    /// assert_eq!(tree.height(), 7);
    ///
    /// tree.balance();
    /// assert_eq!(tree.height(), 3);
    /// ```
    pub fn height(&self) -> usize { self.graph.height() }

    /// Returns a reference to the tree's comparator.
    pub fn cmp(&self) -> &C { &self.cmp }

    /// Removes all entries from the tree.
    pub fn clear(&mut self) { self.graph.clear(); }

    /// Inserts an entry into the tree unless its key is already present.
    ///
    /// Returns a cursor to the entry with the given key and `true` if a new entry was created.
    /// If the key was already present, the existing entry is left untouched, the given key and
    /// value are dropped and `false` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut tree = bst::Tree::new();
    ///
    /// let (cursor, created) = tree.insert(1, "a");
    /// assert_eq!(cursor.value(), Some(&"a"));
    /// assert!(created);
    ///
    /// let (cursor, created) = tree.insert(1, "b");
    /// assert_eq!(cursor.value(), Some(&"a"));
    /// assert!(!created);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> (Cursor<K, V>, bool) {
        let (handle, created) = self.graph.insert(&self.cmp, key, value);
        (Cursor::new(&self.graph, Some(handle)), created)
    }

    /// Inserts an entry built from the given pair.
    ///
    /// This behaves exactly like [`insert`](#method.insert).
    ///
    /// # Examples
    ///
    /// ```
    /// let mut tree = bst::Tree::new();
    /// let (cursor, created) = tree.emplace((String::from("one"), 1));
    /// assert_eq!(cursor.key().map(String::as_str), Some("one"));
    /// assert!(created);
    /// ```
    pub fn emplace<P>(&mut self, pair: P) -> (Cursor<K, V>, bool) where P: Into<(K, V)> {
        let (key, value) = pair.into();
        self.insert(key, value)
    }

    /// Returns a cursor to the entry with the given key, or the end cursor if the tree does not
    /// contain the key.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut tree = bst::Tree::new();
    /// tree.insert(1, "a");
    ///
    /// assert_eq!(tree.find(&1).value(), Some(&"a"));
    /// assert_eq!(tree.find(&2), tree.end());
    /// ```
    pub fn find<Q: ?Sized>(&self, key: &Q) -> Cursor<K, V> where C: Compare<Q, K> {
        Cursor::new(&self.graph, self.graph.find(&self.cmp, key))
    }

    /// Returns a mutable cursor to the entry with the given key, or the end cursor if the tree
    /// does not contain the key.
    pub fn find_mut<Q: ?Sized>(&mut self, key: &Q) -> CursorMut<K, V> where C: Compare<Q, K> {
        let link = self.graph.find(&self.cmp, key);
        CursorMut::new(&mut self.graph, link)
    }

    /// Checks if the tree contains the given key.
    pub fn contains_key<Q: ?Sized>(&self, key: &Q) -> bool where C: Compare<Q, K> {
        self.graph.find(&self.cmp, key).is_some()
    }

    /// Returns a reference to the value associated with the given key, or `None` if the tree
    /// does not contain the key.
    pub fn get<Q: ?Sized>(&self, key: &Q) -> Option<&V> where C: Compare<Q, K> {
        self.find(key).value()
    }

    /// Returns a mutable reference to the value associated with the given key, or `None` if the
    /// tree does not contain the key.
    pub fn get_mut<Q: ?Sized>(&mut self, key: &Q) -> Option<&mut V> where C: Compare<Q, K> {
        self.find_mut(key).into_value_mut()
    }

    /// Returns a mutable reference to the value associated with the given key, inserting the
    /// default value first if the tree does not contain the key.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut tree: bst::Tree<u32, u32> = bst::Tree::new();
    ///
    /// *tree.access(8) += 1;
    /// *tree.access(8) += 1;
    /// assert_eq!(tree.get(&8), Some(&2));
    ///
    /// assert_eq!(*tree.access(9), 0);
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn access(&mut self, key: K) -> &mut V where V: Default { self.entry(key).or_default() }

    /// Returns the entry for the given key.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst::tree::Entry;
    ///
    /// let mut tree = bst::Tree::new();
    ///
    /// match tree.entry(1) {
    ///     Entry::Occupied(_) => unreachable!(),
    ///     Entry::Vacant(e) => { e.insert("a"); }
    /// }
    ///
    /// match tree.entry(1) {
    ///     Entry::Occupied(mut e) => assert_eq!(e.insert("b"), "a"),
    ///     Entry::Vacant(_) => unreachable!(),
    /// }
    ///
    /// assert_eq!(tree.get(&1), Some(&"b"));
    /// ```
    pub fn entry(&mut self, key: K) -> Entry<K, V> {
        match self.graph.search(&self.cmp, &key) {
            Search::Found(handle) => Entry::Occupied(OccupiedEntry::new(&mut self.graph, handle)),
            Search::Vacant(slot) => Entry::Vacant(VacantEntry::new(&mut self.graph, slot, key)),
        }
    }

    /// Removes the entry with the given key and returns it.
    ///
    /// A missing key is reported as [`Error::KeyNotFound`](../enum.Error.html) and leaves the
    /// tree unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut tree = bst::Tree::new();
    ///
    /// tree.insert(2, "b");
    /// tree.insert(1, "a");
    /// tree.insert(3, "c");
    ///
    /// assert_eq!(tree.erase(&2), Ok((2, "b")));
    /// assert_eq!(tree.erase(&2), Err(bst::Error::KeyNotFound));
    /// assert_eq!(tree.iter().collect::<Vec<_>>(), [(&1, &"a"), (&3, &"c")]);
    /// ```
    pub fn erase<Q: ?Sized>(&mut self, key: &Q) -> Result<(K, V), Error>
        where C: Compare<Q, K> {

        match self.graph.find(&self.cmp, key) {
            Some(handle) => Ok(self.graph.remove(handle)),
            None => {
                log::info!("cannot erase: {}", Error::KeyNotFound);
                Err(Error::KeyNotFound)
            }
        }
    }

    /// Rebuilds the tree with the minimum possible height.
    ///
    /// The entries and their order are preserved, but every node is recreated, so no cursor
    /// survives a call to this method.
    pub fn balance(&mut self) { balance::rebuild(&mut self.graph, &self.cmp); }

    /// Moves the tree's entries into a new tree, leaving this one empty.
    ///
    /// Both trees use the same comparator afterwards.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut tree = bst::Tree::new();
    /// tree.insert(1, "a");
    ///
    /// let moved = tree.take();
    /// assert!(tree.is_empty());
    /// assert_eq!(moved.get(&1), Some(&"a"));
    /// ```
    pub fn take(&mut self) -> Self where C: Clone {
        let empty = Tree::with_cmp(self.cmp.clone());
        mem::replace(self, empty)
    }

    /// Returns a cursor to the entry with the smallest key, or the end cursor if the tree is
    /// empty.
    pub fn begin(&self) -> Cursor<K, V> { Cursor::new(&self.graph, self.graph.first()) }

    /// Returns the end cursor.
    pub fn end(&self) -> Cursor<K, V> { Cursor::new(&self.graph, None) }

    /// Returns a cursor to the root of the tree, or the end cursor if the tree is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut tree = bst::Tree::new();
    /// tree.extend(vec![(2, "b"), (1, "a"), (3, "c")]);
    ///
    /// let root = tree.root();
    /// assert_eq!(root.key(), Some(&2));
    /// assert_eq!(root.left().key(), Some(&1));
    /// assert_eq!(root.right().key(), Some(&3));
    /// assert_eq!(root.left().parent(), root);
    /// ```
    pub fn root(&self) -> Cursor<K, V> { Cursor::new(&self.graph, self.graph.root()) }

    /// Returns the entry with the smallest key, or `None` if the tree is empty.
    pub fn min(&self) -> Option<(&K, &V)> { self.begin().key_value() }

    /// Returns the entry with the greatest key, or `None` if the tree is empty.
    pub fn max(&self) -> Option<(&K, &V)> { Cursor::new(&self.graph, self.graph.last()).key_value() }

    /// Returns an iterator over the tree's entries in order.
    pub fn iter(&self) -> Iter<K, V> { Iter::new(&self.graph) }

    /// Returns an iterator over the tree's entries in order, with mutable references to the
    /// values.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut tree = bst::Tree::new();
    /// tree.extend(vec![(2, 20), (1, 10), (3, 30)]);
    ///
    /// for (_, value) in tree.iter_mut() { *value += 1; }
    ///
    /// assert_eq!(tree.iter().collect::<Vec<_>>(), [(&1, &11), (&2, &21), (&3, &31)]);
    /// ```
    pub fn iter_mut(&mut self) -> IterMut<K, V> { IterMut::new(&mut self.graph) }

    /// Renders the tree as one `<key,value>` line per entry, in order.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut tree = bst::Tree::new();
    /// assert_eq!(tree.dump(), Err(bst::Error::EmptyTree));
    ///
    /// tree.insert(2, 'b');
    /// tree.insert(1, 'a');
    /// assert_eq!(tree.dump().unwrap(), "<1,a>\n<2,b>\n");
    /// ```
    pub fn dump(&self) -> Result<String, Error> where K: Display, V: Display {
        if self.is_empty() { return Err(Error::EmptyTree); }
        Ok(self.to_string())
    }

    #[cfg(test)]
    pub(crate) fn graph(&self) -> &Graph<K, V> { &self.graph }
}

/// A view into a single entry of a tree, which may be either occupied or vacant.
pub enum Entry<'a, K: 'a, V: 'a> {
    /// An occupied entry.
    Occupied(OccupiedEntry<'a, K, V>),
    /// A vacant entry.
    Vacant(VacantEntry<'a, K, V>),
}

impl<'a, K, V> Entry<'a, K, V> {
    /// Returns a reference to the entry's key.
    pub fn key(&self) -> &K {
        match *self {
            Entry::Occupied(ref e) => e.key(),
            Entry::Vacant(ref e) => e.key(),
        }
    }

    /// Returns a mutable reference to the entry's value, inserting the given value first if the
    /// entry is vacant.
    pub fn or_insert(self, default: V) -> &'a mut V { self.or_insert_with(|| default) }

    /// Returns a mutable reference to the entry's value, inserting the value computed by `f`
    /// first if the entry is vacant.
    pub fn or_insert_with<F>(self, f: F) -> &'a mut V where F: FnOnce() -> V {
        match self {
            Entry::Occupied(e) => e.into_mut(),
            Entry::Vacant(e) => e.insert(f()),
        }
    }

    /// Returns a mutable reference to the entry's value, inserting the default value first if the
    /// entry is vacant.
    pub fn or_default(self) -> &'a mut V where V: Default { self.or_insert_with(V::default) }
}

impl<K, V, C> Clone for Tree<K, V, C> where K: Clone, V: Clone, C: Clone + Compare<K> {
    /// Returns a deep copy of the tree with the same shape.
    ///
    /// The entries are reinserted in pre-order, which puts every key back at the same position.
    fn clone(&self) -> Self {
        let mut tree = Tree { graph: Graph::with_capacity(self.len()), cmp: self.cmp.clone() };

        for (key, value) in self.graph.preorder() {
            tree.graph.insert(&tree.cmp, key.clone(), value.clone());
        }

        tree
    }
}

impl<K, V, C> Debug for Tree<K, V, C> where K: Debug, V: Debug, C: Compare<K> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, C> Display for Tree<K, V, C> where K: Display, V: Display, C: Compare<K> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_empty() {
            log::warn!("cannot render: {}", Error::EmptyTree);
            return writeln!(f, " ");
        }

        for (key, value) in self.iter() { writeln!(f, "<{},{}>", key, value)?; }
        Ok(())
    }
}

impl<K, V, C> Default for Tree<K, V, C> where C: Compare<K> + Default {
    fn default() -> Self { Tree::with_cmp(Default::default()) }
}

impl<K, V, C> Extend<(K, V)> for Tree<K, V, C> where C: Compare<K> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, it: I) {
        for (k, v) in it { self.insert(k, v); }
    }
}

impl<K, V, C> FromIterator<(K, V)> for Tree<K, V, C> where C: Compare<K> + Default {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(it: I) -> Self {
        let mut tree: Tree<K, V, C> = Default::default();
        tree.extend(it);
        tree
    }
}

impl<'a, K, V, C, Q: ?Sized> ops::Index<&'a Q> for Tree<K, V, C>
    where C: Compare<K> + Compare<Q, K> {

    type Output = V;
    fn index(&self, key: &'a Q) -> &V { self.get(key).expect("key not found") }
}

impl<'a, K, V, C> IntoIterator for &'a Tree<K, V, C> where C: Compare<K> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;
    fn into_iter(self) -> Iter<'a, K, V> { self.iter() }
}

impl<'a, K, V, C> IntoIterator for &'a mut Tree<K, V, C> where C: Compare<K> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;
    fn into_iter(self) -> IterMut<'a, K, V> { self.iter_mut() }
}

impl<K, V, C> IntoIterator for Tree<K, V, C> where C: Compare<K> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;
    fn into_iter(self) -> IntoIter<K, V> { IntoIter::new(self.graph) }
}

impl<K, V, C> PartialEq for Tree<K, V, C> where K: PartialEq, V: PartialEq, C: Compare<K> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K, V, C> Eq for Tree<K, V, C> where K: Eq, V: Eq, C: Compare<K> {}
