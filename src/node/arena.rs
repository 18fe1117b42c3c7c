use std::num::NonZeroUsize;

/// An index into an `Arena`.
///
/// Handles are only meaningful for the arena that issued them, and only until the slot they name
/// is taken.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Handle(NonZeroUsize);

impl Handle {
    fn from_index(index: usize) -> Self {
        Handle(NonZeroUsize::new(index + 1).expect("arena index overflow"))
    }

    pub fn index(self) -> usize { self.0.get() - 1 }
}

/// A slot table that owns every node of a tree.
///
/// Freed slots are recycled before the table grows.
#[derive(Clone)]
pub struct Arena<T> {
    slots: Vec<Option<T>>,
    free: Vec<Handle>,
}

impl<T> Arena<T> {
    pub fn new() -> Self { Arena { slots: Vec::new(), free: Vec::new() } }

    pub fn with_capacity(capacity: usize) -> Self {
        Arena { slots: Vec::with_capacity(capacity), free: Vec::new() }
    }

    pub fn len(&self) -> usize { self.slots.len() - self.free.len() }

    /// Returns the number of slots, occupied or not.
    pub fn slot_count(&self) -> usize { self.slots.len() }

    pub fn alloc(&mut self, element: T) -> Handle {
        match self.free.pop() {
            Some(handle) => {
                self.slots[handle.index()] = Some(element);
                handle
            }
            None => {
                self.slots.push(Some(element));
                Handle::from_index(self.slots.len() - 1)
            }
        }
    }

    pub fn get(&self, handle: Handle) -> &T {
        self.slots[handle.index()].as_ref().expect("stale arena handle")
    }

    pub fn get_mut(&mut self, handle: Handle) -> &mut T {
        self.slots[handle.index()].as_mut().expect("stale arena handle")
    }

    pub fn take(&mut self, handle: Handle) -> T {
        let element = self.slots[handle.index()].take().expect("stale arena handle");
        self.free.push(handle);
        element
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }

    /// Returns an iterator over the occupied slots and their handles, in slot order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Handle, &mut T)> {
        self.slots.iter_mut().enumerate()
            .filter_map(|(index, slot)| slot.as_mut().map(|e| (Handle::from_index(index), e)))
    }
}
