use std::fmt::{self, Debug};
use std::ptr;
use std::vec;
use super::{Dir, Graph, Left, Link, Right};

/// A read-only position in a tree.
///
/// A cursor either points at an entry or is the end cursor, which points past the greatest entry.
/// Stepping walks the parent links of the tree, so a cursor is just a reference to the tree plus a
/// node handle.
pub struct Cursor<'a, K: 'a, V: 'a> {
    graph: &'a Graph<K, V>,
    link: Link,
}

impl<'a, K, V> Cursor<'a, K, V> {
    pub(crate) fn new(graph: &'a Graph<K, V>, link: Link) -> Self { Cursor { graph, link } }

    /// Checks if this is the end cursor.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut tree = bst::Tree::new();
    /// assert!(tree.begin().is_end());
    ///
    /// tree.insert(1, "a");
    /// assert!(!tree.begin().is_end());
    /// assert!(tree.end().is_end());
    /// ```
    pub fn is_end(&self) -> bool { self.link.is_none() }

    /// Returns the key and value the cursor points at, or `None` for the end cursor.
    pub fn key_value(&self) -> Option<(&'a K, &'a V)> {
        let graph = self.graph;
        self.link.map(|handle| graph.key_value(handle))
    }

    /// Returns the key the cursor points at, or `None` for the end cursor.
    pub fn key(&self) -> Option<&'a K> { self.key_value().map(|e| e.0) }

    /// Returns the value the cursor points at, or `None` for the end cursor.
    pub fn value(&self) -> Option<&'a V> { self.key_value().map(|e| e.1) }

    /// Moves the cursor to the entry with the next greater key.
    ///
    /// Moving past the greatest entry yields the end cursor. The end cursor stays put.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut tree = bst::Tree::new();
    /// tree.insert(2, "b");
    /// tree.insert(1, "a");
    ///
    /// let mut cursor = tree.begin();
    /// assert_eq!(cursor.key(), Some(&1));
    /// cursor.move_next();
    /// assert_eq!(cursor.key(), Some(&2));
    /// cursor.move_next();
    /// assert!(cursor.is_end());
    /// ```
    pub fn move_next(&mut self) {
        if let Some(handle) = self.link { self.link = Right::step(self.graph, handle); }
    }

    /// Moves the cursor to the entry with the next smaller key.
    ///
    /// Moving before the smallest entry yields the end cursor, and moving back from the end cursor
    /// yields the greatest entry.
    pub fn move_prev(&mut self) {
        self.link = match self.link {
            Some(handle) => Left::step(self.graph, handle),
            None => self.graph.last(),
        };
    }

    /// Returns a cursor to the left child of this cursor's node.
    ///
    /// Returns the end cursor if there is no such child or if this is the end cursor.
    pub fn left(&self) -> Self {
        Cursor::new(self.graph, self.link.and_then(|h| self.graph.node(h).left))
    }

    /// Returns a cursor to the right child of this cursor's node.
    ///
    /// Returns the end cursor if there is no such child or if this is the end cursor.
    pub fn right(&self) -> Self {
        Cursor::new(self.graph, self.link.and_then(|h| self.graph.node(h).right))
    }

    /// Returns a cursor to the parent of this cursor's node.
    ///
    /// Returns the end cursor for the root and for the end cursor.
    pub fn parent(&self) -> Self {
        Cursor::new(self.graph, self.link.and_then(|h| self.graph.node(h).parent))
    }
}

impl<'a, K, V> Clone for Cursor<'a, K, V> {
    fn clone(&self) -> Self { *self }
}

impl<'a, K, V> Copy for Cursor<'a, K, V> {}

impl<'a, K, V> PartialEq for Cursor<'a, K, V> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.graph, other.graph) && self.link == other.link
    }
}

impl<'a, K, V> Eq for Cursor<'a, K, V> {}

impl<'a, K, V> Debug for Cursor<'a, K, V> where K: Debug, V: Debug {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Cursor").field(&self.key_value()).finish()
    }
}

/// A position in a tree that allows mutating values.
pub struct CursorMut<'a, K: 'a, V: 'a> {
    graph: &'a mut Graph<K, V>,
    link: Link,
}

impl<'a, K, V> CursorMut<'a, K, V> {
    pub(crate) fn new(graph: &'a mut Graph<K, V>, link: Link) -> Self {
        CursorMut { graph, link }
    }

    /// Checks if this is the end cursor.
    pub fn is_end(&self) -> bool { self.link.is_none() }

    /// Returns the key the cursor points at, or `None` for the end cursor.
    pub fn key(&self) -> Option<&K> { self.as_cursor().key() }

    /// Returns the value the cursor points at, or `None` for the end cursor.
    pub fn value(&self) -> Option<&V> { self.as_cursor().value() }

    /// Returns a mutable reference to the value the cursor points at, or `None` for the end
    /// cursor.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut tree = bst::Tree::new();
    /// tree.insert(1, "a");
    ///
    /// if let Some(value) = tree.find_mut(&1).value_mut() { *value = "b"; }
    /// assert_eq!(tree.get(&1), Some(&"b"));
    /// ```
    pub fn value_mut(&mut self) -> Option<&mut V> { self.key_value_mut().map(|e| e.1) }

    /// Returns the key and a mutable reference to the value the cursor points at, or `None` for
    /// the end cursor.
    pub fn key_value_mut(&mut self) -> Option<(&K, &mut V)> {
        let graph = &mut *self.graph;
        self.link.map(move |handle| graph.key_value_mut(handle))
    }

    /// Converts the cursor into a mutable reference to its value with the same lifetime as the
    /// tree, or `None` for the end cursor.
    pub fn into_value_mut(self) -> Option<&'a mut V> {
        let graph = self.graph;
        self.link.map(move |handle| graph.into_value_mut(handle))
    }

    /// Moves the cursor to the entry with the next greater key.
    ///
    /// See [`Cursor::move_next`](struct.Cursor.html#method.move_next).
    pub fn move_next(&mut self) {
        if let Some(handle) = self.link { self.link = Right::step(self.graph, handle); }
    }

    /// Moves the cursor to the entry with the next smaller key.
    ///
    /// See [`Cursor::move_prev`](struct.Cursor.html#method.move_prev).
    pub fn move_prev(&mut self) {
        self.link = match self.link {
            Some(handle) => Left::step(self.graph, handle),
            None => self.graph.last(),
        };
    }

    /// Returns a read-only cursor at the same position.
    pub fn as_cursor(&self) -> Cursor<K, V> { Cursor::new(self.graph, self.link) }
}

impl<'a, K, V> Debug for CursorMut<'a, K, V> where K: Debug, V: Debug {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("CursorMut").field(&self.as_cursor().key_value()).finish()
    }
}

/// An in-order iterator over a tree's entries, driven by two cursors meeting in the middle.
pub struct Iter<'a, K: 'a, V: 'a> {
    front: Cursor<'a, K, V>,
    back: Cursor<'a, K, V>,
    len: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(graph: &'a Graph<K, V>) -> Self {
        Iter {
            front: Cursor::new(graph, graph.first()),
            back: Cursor::new(graph, graph.last()),
            len: graph.len(),
        }
    }
}

impl<'a, K, V> Clone for Iter<'a, K, V> {
    fn clone(&self) -> Self { Iter { front: self.front, back: self.back, len: self.len } }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<(&'a K, &'a V)> {
        if self.len == 0 { return None; }
        self.len -= 1;
        let item = self.front.key_value();
        self.front.move_next();
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) { (self.len, Some(self.len)) }
}

impl<'a, K, V> DoubleEndedIterator for Iter<'a, K, V> {
    fn next_back(&mut self) -> Option<(&'a K, &'a V)> {
        if self.len == 0 { return None; }
        self.len -= 1;
        let item = self.back.key_value();
        self.back.move_prev();
        item
    }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {}

/// An in-order iterator over a tree's entries with mutable access to the values.
pub struct IterMut<'a, K: 'a, V: 'a>(vec::IntoIter<(&'a K, &'a mut V)>);

impl<'a, K, V> IterMut<'a, K, V> {
    pub(crate) fn new(graph: &'a mut Graph<K, V>) -> Self {
        IterMut(graph.entries_mut().into_iter())
    }
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);
    fn next(&mut self) -> Option<(&'a K, &'a mut V)> { self.0.next() }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<'a, K, V> DoubleEndedIterator for IterMut<'a, K, V> {
    fn next_back(&mut self) -> Option<(&'a K, &'a mut V)> { self.0.next_back() }
}

impl<'a, K, V> ExactSizeIterator for IterMut<'a, K, V> {}

/// An owning in-order iterator over a tree's entries.
pub struct IntoIter<K, V>(vec::IntoIter<(K, V)>);

impl<K, V> IntoIter<K, V> {
    pub(crate) fn new(mut graph: Graph<K, V>) -> Self { IntoIter(graph.drain_in_order().into_iter()) }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);
    fn next(&mut self) -> Option<(K, V)> { self.0.next() }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<(K, V)> { self.0.next_back() }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}
