mod arena;
mod cursor;


use compare::Compare;
use std::cmp::Ordering::*;
use std::mem::replace;
use self::arena::{Arena, Handle};

pub use self::cursor::{Cursor, CursorMut, IntoIter, Iter, IterMut};

pub type Link = Option<Handle>;

#[derive(Clone, Debug)]
pub struct Node<K, V> {
    key: K,
    value: V,
    left: Link,
    right: Link,
    parent: Link,
}

/// The place a new node gets linked into.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Slot {
    Root,
    Left(Handle),
    Right(Handle),
}

/// The outcome of descending from the root towards a key.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Search {
    Found(Handle),
    Vacant(Slot),
}

/// How many children a node has, for the purposes of unlinking it.
#[derive(Debug)]
enum Shape {
    Leaf,
    OneChild(Handle),
    TwoChildren { right: Handle },
}

/// Where a node hangs off its parent.
#[derive(Debug)]
enum Position {
    Root,
    Left,
    Right,
}

/// The owned node graph of a tree.
///
/// Every node lives in the arena. `left` and `right` are owning links in the sense that a node is
/// reachable from the root through exactly one of them, while `parent` is a plain back-reference
/// used for upward stepping and for splicing during removal.
pub struct Graph<K, V> {
    nodes: Arena<Node<K, V>>,
    root: Link,
}

impl<K, V> Graph<K, V> {
    pub fn new() -> Self { Graph { nodes: Arena::new(), root: None } }

    pub fn with_capacity(capacity: usize) -> Self {
        Graph { nodes: Arena::with_capacity(capacity), root: None }
    }

    pub fn len(&self) -> usize { self.nodes.len() }

    pub fn root(&self) -> Link { self.root }

    pub fn key_value(&self, handle: Handle) -> (&K, &V) {
        let node = self.node(handle);
        (&node.key, &node.value)
    }

    pub fn key_value_mut(&mut self, handle: Handle) -> (&K, &mut V) {
        let node = self.node_mut(handle);
        (&node.key, &mut node.value)
    }

    pub fn into_value_mut(&mut self, handle: Handle) -> &mut V { &mut self.node_mut(handle).value }

    fn node(&self, handle: Handle) -> &Node<K, V> { self.nodes.get(handle) }

    fn node_mut(&mut self, handle: Handle) -> &mut Node<K, V> { self.nodes.get_mut(handle) }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    pub fn search<C, Q: ?Sized>(&self, cmp: &C, key: &Q) -> Search where C: Compare<Q, K> {
        let mut handle = match self.root {
            None => return Search::Vacant(Slot::Root),
            Some(root) => root,
        };

        loop {
            let node = self.node(handle);

            let (child, slot) = match cmp.compare(key, &node.key) {
                Equal => return Search::Found(handle),
                Less => (node.left, Slot::Left(handle)),
                Greater => (node.right, Slot::Right(handle)),
            };

            match child {
                None => return Search::Vacant(slot),
                Some(child) => handle = child,
            }
        }
    }

    pub fn find<C, Q: ?Sized>(&self, cmp: &C, key: &Q) -> Link where C: Compare<Q, K> {
        match self.search(cmp, key) {
            Search::Found(handle) => Some(handle),
            Search::Vacant(_) => None,
        }
    }

    /// Creates a node in the given empty slot.
    pub fn attach(&mut self, slot: Slot, key: K, value: V) -> Handle {
        let parent = match slot {
            Slot::Root => None,
            Slot::Left(parent) | Slot::Right(parent) => Some(parent),
        };

        let handle = self.nodes.alloc(Node { key, value, left: None, right: None, parent });

        match slot {
            Slot::Root => {
                debug_assert!(self.root.is_none());
                self.root = Some(handle);
            }
            Slot::Left(parent) => self.node_mut(parent).left = Some(handle),
            Slot::Right(parent) => self.node_mut(parent).right = Some(handle),
        }

        handle
    }

    /// Inserts an entry unless its key is already present, returning the entry's node and
    /// whether it was created.
    pub fn insert<C>(&mut self, cmp: &C, key: K, value: V) -> (Handle, bool) where C: Compare<K> {
        match self.search(cmp, &key) {
            Search::Found(handle) => (handle, false),
            Search::Vacant(slot) => (self.attach(slot, key, value), true),
        }
    }

    pub fn first(&self) -> Link { self.root.map(|root| Left::extremum(self, root)) }

    pub fn last(&self) -> Link { self.root.map(|root| Right::extremum(self, root)) }

    fn shape(&self, handle: Handle) -> Shape {
        let node = self.node(handle);

        match (node.left, node.right) {
            (None, None) => Shape::Leaf,
            (Some(child), None) | (None, Some(child)) => Shape::OneChild(child),
            (Some(_), Some(right)) => Shape::TwoChildren { right },
        }
    }

    fn position(&self, handle: Handle) -> Position {
        match self.node(handle).parent {
            None => Position::Root,
            Some(parent) if self.node(parent).left == Some(handle) => Position::Left,
            Some(_) => Position::Right,
        }
    }

    /// Removes the node at `handle` from the graph and returns its entry.
    ///
    /// A node with two children takes over the entry of its in-order successor, which is then
    /// unlinked from its own position instead. The successor has no left child, so that second
    /// unlinking never needs the two-children case.
    pub fn remove(&mut self, handle: Handle) -> (K, V) {
        let shape = self.shape(handle);
        log::debug!("removing {:?} node with shape {:?}", self.position(handle), shape);

        match shape {
            Shape::Leaf | Shape::OneChild(_) => self.unlink(handle),
            Shape::TwoChildren { right } => {
                let successor = Left::extremum(self, right);
                let (key, value) = self.unlink(successor);
                let node = self.node_mut(handle);
                (replace(&mut node.key, key), replace(&mut node.value, value))
            }
        }
    }

    // Splice the node's only child (if any) into the node's slot.
    fn unlink(&mut self, handle: Handle) -> (K, V) {
        let position = self.position(handle);
        let node = self.nodes.take(handle);
        debug_assert!(node.left.is_none() || node.right.is_none());

        let child = node.left.or(node.right);
        if let Some(child) = child { self.node_mut(child).parent = node.parent; }

        match (position, node.parent) {
            (Position::Left, Some(parent)) => self.node_mut(parent).left = child,
            (Position::Right, Some(parent)) => self.node_mut(parent).right = child,
            _ => self.root = child,
        }

        (node.key, node.value)
    }

    /// Returns the graph's entries in pre-order (node, left subtree, right subtree).
    pub fn preorder(&self) -> impl Iterator<Item = (&K, &V)> {
        let mut stack: Vec<Handle> = self.root.into_iter().collect();

        std::iter::from_fn(move || {
            let handle = stack.pop()?;
            let node = self.node(handle);
            stack.extend(node.right);
            stack.extend(node.left);
            Some((&node.key, &node.value))
        })
    }

    /// Returns the number of nodes on the longest root-to-leaf path.
    pub fn height(&self) -> usize {
        let mut stack: Vec<(Handle, usize)> = self.root.map(|root| (root, 1)).into_iter().collect();
        let mut height = 0;

        while let Some((handle, depth)) = stack.pop() {
            height = height.max(depth);
            let node = self.node(handle);
            stack.extend(node.left.map(|child| (child, depth + 1)));
            stack.extend(node.right.map(|child| (child, depth + 1)));
        }

        height
    }

    fn in_order(&self) -> Vec<Handle> {
        let mut handles = Vec::with_capacity(self.len());
        let mut link = self.first();

        while let Some(handle) = link {
            handles.push(handle);
            link = Right::step(self, handle);
        }

        handles
    }

    /// Empties the graph, returning its entries in order.
    pub fn drain_in_order(&mut self) -> Vec<(K, V)> {
        let entries = self.in_order().into_iter()
            .map(|handle| { let node = self.nodes.take(handle); (node.key, node.value) })
            .collect();

        self.clear();
        entries
    }

    /// Returns every entry in order, with mutable access to the values.
    pub fn entries_mut(&mut self) -> Vec<(&K, &mut V)> {
        let mut rank = vec![0; self.nodes.slot_count()];
        for (i, handle) in self.in_order().into_iter().enumerate() { rank[handle.index()] = i; }

        let mut entries: Vec<Option<(&K, &mut V)>> = (0..self.len()).map(|_| None).collect();

        for (handle, node) in self.nodes.iter_mut() {
            entries[rank[handle.index()]] = Some((&node.key, &mut node.value));
        }

        entries.into_iter().flatten().collect()
    }
}

/// A direction in the tree.
///
/// Walking `Right` visits keys in ascending order and walking `Left` in descending order.
pub trait Dir: Sized {
    type Opposite: Dir<Opposite = Self>;

    fn forward<K, V>(node: &Node<K, V>) -> Link;

    /// Follows links in this direction from `handle` for as long as they exist.
    fn extremum<K, V>(graph: &Graph<K, V>, mut handle: Handle) -> Handle {
        while let Some(child) = Self::forward(graph.node(handle)) { handle = child; }
        handle
    }

    /// Returns the in-order neighbor of `handle` in this direction, if any.
    ///
    /// If the node has a subtree in this direction, the neighbor is that subtree's extremum in the
    /// opposite direction. Otherwise it is the first ancestor reached from the opposite side.
    fn step<K, V>(graph: &Graph<K, V>, handle: Handle) -> Link {
        if let Some(child) = Self::forward(graph.node(handle)) {
            return Some(Self::Opposite::extremum(graph, child));
        }

        let mut current = handle;
        let mut parent = graph.node(current).parent;

        while let Some(ancestor) = parent {
            if Self::forward(graph.node(ancestor)) != Some(current) { break; }
            current = ancestor;
            parent = graph.node(ancestor).parent;
        }

        parent
    }
}

pub enum Left {}

impl Dir for Left {
    type Opposite = Right;
    fn forward<K, V>(node: &Node<K, V>) -> Link { node.left }
}

pub enum Right {}

impl Dir for Right {
    type Opposite = Left;
    fn forward<K, V>(node: &Node<K, V>) -> Link { node.right }
}

/// An occupied entry.
///
/// See [`Tree::entry`](../struct.Tree.html#method.entry) for an example.
pub struct OccupiedEntry<'a, K: 'a, V: 'a> {
    graph: &'a mut Graph<K, V>,
    handle: Handle,
}

impl<'a, K, V> OccupiedEntry<'a, K, V> {
    pub(crate) fn new(graph: &'a mut Graph<K, V>, handle: Handle) -> Self {
        OccupiedEntry { graph, handle }
    }

    /// Returns a reference to the entry's key.
    pub fn key(&self) -> &K { self.graph.key_value(self.handle).0 }

    /// Returns a reference to the entry's value.
    pub fn get(&self) -> &V { self.graph.key_value(self.handle).1 }

    /// Returns a mutable reference to the entry's value.
    pub fn get_mut(&mut self) -> &mut V { self.graph.key_value_mut(self.handle).1 }

    /// Returns a mutable reference to the entry's value with the same lifetime as the tree.
    pub fn into_mut(self) -> &'a mut V { self.graph.into_value_mut(self.handle) }

    /// Replaces the entry's value with the given value, returning the old one.
    pub fn insert(&mut self, value: V) -> V { replace(self.get_mut(), value) }

    /// Removes the entry from the tree and returns its key and value.
    pub fn remove(self) -> (K, V) { self.graph.remove(self.handle) }
}

/// A vacant entry.
///
/// See [`Tree::entry`](../struct.Tree.html#method.entry) for an example.
pub struct VacantEntry<'a, K: 'a, V: 'a> {
    graph: &'a mut Graph<K, V>,
    slot: Slot,
    key: K,
}

impl<'a, K, V> VacantEntry<'a, K, V> {
    pub(crate) fn new(graph: &'a mut Graph<K, V>, slot: Slot, key: K) -> Self {
        VacantEntry { graph, slot, key }
    }

    /// Returns a reference to the key that would be inserted.
    pub fn key(&self) -> &K { &self.key }

    /// Inserts the entry into the tree with its key and the given value, returning a mutable
    /// reference to the value with the same lifetime as the tree.
    pub fn insert(self, value: V) -> &'a mut V {
        let handle = self.graph.attach(self.slot, self.key, value);
        self.graph.into_value_mut(handle)
    }
}
