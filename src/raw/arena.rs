use alloc::vec::Vec;

use super::handle::Handle;

/// Slot storage for tree nodes with handle reuse.
///
/// Freed slots go on a free list and are handed out again before the slot vector grows,
/// so handles stay stable for as long as their node is alive.
#[derive(Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<Option<T>>,
    free: Vec<Handle>,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Number of live elements.
    pub(crate) const fn len(&self) -> usize {
        self.slots.len().saturating_sub(self.free.len())
    }

    pub(crate) fn alloc(&mut self, element: T) -> Handle {
        if let Some(handle) = self.free.pop() {
            self.slots[handle.index()] = Some(element);
            return handle;
        }

        let Some(handle) = Handle::new(self.slots.len()) else {
            panic!("`Arena::alloc()` - arena is at maximum capacity ({})", Handle::LIMIT);
        };
        self.slots.push(Some(element));
        handle
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        self.slots[handle.index()].as_ref().expect("`Arena::get()` - `handle` is invalid!")
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        self.slots[handle.index()].as_mut().expect("`Arena::get_mut()` - `handle` is invalid!")
    }

    /// Removes the element behind `handle` and recycles the slot.
    pub(crate) fn take(&mut self, handle: Handle) -> T {
        let element = self.slots[handle.index()].take().expect("`Arena::take()` - `handle` is invalid!");
        self.free.push(handle);
        element
    }

    pub(crate) fn free(&mut self, handle: Handle) {
        drop(self.take(handle));
    }

    /// Drops every element while keeping the allocation.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn reserved_capacity_is_reported() {
        let arena: Arena<u8> = Arena::with_capacity(12);
        assert!(arena.capacity() >= 12);
        assert_eq!(arena.len(), 0);
    }

    #[test]
    fn freed_slot_is_reused() {
        let mut arena = Arena::new();
        let a = arena.alloc('a');
        let b = arena.alloc('b');
        arena.free(a);
        assert_eq!(arena.len(), 1);

        let c = arena.alloc('c');
        assert_eq!(c, a);
        assert_eq!(*arena.get(b), 'b');
        assert_eq!(*arena.get(c), 'c');
    }

    #[test]
    #[should_panic(expected = "`Arena::get()` - `handle` is invalid!")]
    fn stale_handle_panics() {
        let mut arena = Arena::new();
        let handle = arena.alloc(7u32);
        arena.free(handle);
        let _ = arena.get(handle);
    }

    #[test]
    fn every_addressable_slot_can_be_filled() {
        let mut arena = Arena::with_capacity(Handle::LIMIT);
        let last = (0..Handle::LIMIT).map(|_| arena.alloc(())).last();
        assert_eq!(last.map(Handle::index), Some(Handle::LIMIT - 1));
        assert_eq!(arena.len(), Handle::LIMIT);
    }

    #[test]
    #[should_panic(expected = "arena is at maximum capacity")]
    fn exhausted_arena_panics() {
        let mut arena = Arena::new();
        for _ in 0..=Handle::LIMIT {
            arena.alloc(());
        }
    }

    proptest! {
        #[test]
        fn arena_tracks_live_elements(operations in prop::collection::vec(operation_strategy(), 0..256)) {
            let mut live: Vec<(Handle, u32)> = Vec::new();
            let mut arena: Arena<u32> = Arena::new();

            for operation in operations {
                match operation {
                    Operation::Alloc(value) => {
                        let handle = arena.alloc(value);
                        prop_assert!(live.iter().all(|&(h, _)| h != handle), "handle handed out twice");
                        live.push((handle, value));
                    }
                    Operation::Update(which, value) if !live.is_empty() => {
                        let index = which % live.len();
                        *arena.get_mut(live[index].0) = value;
                        live[index].1 = value;
                    }
                    Operation::Take(which) if !live.is_empty() => {
                        let (handle, value) = live.swap_remove(which % live.len());
                        prop_assert_eq!(arena.take(handle), value);
                    }
                    Operation::Clear => {
                        arena.clear();
                        live.clear();
                    }
                    _ => {}
                }

                prop_assert_eq!(arena.len(), live.len());
                for &(handle, value) in &live {
                    prop_assert_eq!(*arena.get(handle), value);
                }
            }
        }
    }

    #[derive(Clone, Debug)]
    enum Operation {
        Alloc(u32),
        Update(usize, u32),
        Take(usize),
        Clear,
    }

    fn operation_strategy() -> impl Strategy<Value = Operation> {
        prop_oneof![
            20 => any::<u32>().prop_map(Operation::Alloc),
            5 => (any::<usize>(), any::<u32>()).prop_map(|(which, value)| Operation::Update(which, value)),
            8 => any::<usize>().prop_map(Operation::Take),
            1 => Just(Operation::Clear),
        ]
    }
}
