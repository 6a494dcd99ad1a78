use alloc::vec::Vec;

use super::handle::Handle;

/// Slot storage for tree nodes.
///
/// Released slots are pushed onto `free` and handed out again before the slot
/// vector grows, so a tree that churns through inserts and removes keeps a
/// stable footprint.
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

    /// Number of occupied slots.
    pub(crate) const fn len(&self) -> usize {
        self.slots.len().saturating_sub(self.free.len())
    }

    pub(crate) fn alloc(&mut self, element: T) -> Handle {
        if let Some(handle) = self.free.pop() {
            let slot = &mut self.slots[handle.to_index()];
            debug_assert!(slot.is_none(), "`Arena::alloc()` - free list holds an occupied slot!");
            *slot = Some(element);
            handle
        } else {
            assert!(
                self.slots.len() <= Handle::MAX,
                "`Arena::alloc()` - arena is at maximum capacity ({})",
                Handle::MAX + 1
            );
            self.slots.push(Some(element));
            Handle::from_index(self.slots.len() - 1)
        }
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        self.slots[handle.to_index()].as_ref().expect("`Arena::get()` - `handle` is invalid!")
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        self.slots[handle.to_index()].as_mut().expect("`Arena::get_mut()` - `handle` is invalid!")
    }

    /// Moves the element out of its slot and puts the slot on the free list.
    pub(crate) fn take(&mut self, handle: Handle) -> T {
        let element = self.slots[handle.to_index()].take().expect("`Arena::take()` - `handle` is invalid!");
        self.free.push(handle);
        element
    }

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
    fn with_capacity_reserves_slots() {
        let arena: Arena<u32> = Arena::with_capacity(10);
        assert!(arena.capacity() >= 10);
        assert_eq!(arena.len(), 0);
    }

    #[test]
    fn released_slot_is_reused() {
        let mut arena = Arena::new();
        let a = arena.alloc('a');
        let b = arena.alloc('b');
        assert_eq!(arena.take(a), 'a');
        assert_eq!(arena.len(), 1);

        let c = arena.alloc('c');
        assert_eq!(c, a);
        assert_eq!(*arena.get(b), 'b');
        assert_eq!(*arena.get(c), 'c');
        assert_eq!(arena.len(), 2);
    }

    #[test]
    #[should_panic(expected = "`Arena::get()` - `handle` is invalid!")]
    fn get_after_take_panics() {
        let mut arena = Arena::new();
        let handle = arena.alloc(1u8);
        arena.take(handle);
        let _ = arena.get(handle);
    }

    #[test]
    #[should_panic(expected = "`Arena::alloc()` - arena is at maximum capacity")]
    fn alloc_past_max_panics() {
        let mut arena = Arena::new();
        for _ in 0..=Handle::MAX + 1 {
            arena.alloc(());
        }
    }

    proptest! {
        #[test]
        fn arena_tracks_model(operations in prop::collection::vec(strategy(), 0..256)) {
            let mut model: Vec<(Handle, u32)> = Vec::new();
            let mut arena: Arena<u32> = Arena::new();

            for operation in operations {
                match operation {
                    Operation::Alloc(value) => {
                        let handle = arena.alloc(value);
                        prop_assert!(model.iter().all(|&(h, _)| h != handle));
                        model.push((handle, value));
                    }
                    Operation::Set(which, value) => {
                        if model.is_empty() {
                            continue;
                        }

                        let index = which % model.len();
                        *arena.get_mut(model[index].0) = value;
                        model[index].1 = value;
                    }
                    Operation::Take(which) => {
                        if model.is_empty() {
                            continue;
                        }

                        let index = which % model.len();
                        let (handle, expected) = model.swap_remove(index);
                        prop_assert_eq!(arena.take(handle), expected);
                    }
                    Operation::Clear => {
                        arena.clear();
                        model.clear();
                    }
                }

                prop_assert_eq!(arena.len(), model.len());
                for &(handle, value) in &model {
                    prop_assert_eq!(*arena.get(handle), value);
                }
            }
        }
    }

    #[derive(Clone, Debug)]
    enum Operation {
        Alloc(u32),
        Set(usize, u32),
        Take(usize),
        Clear,
    }

    fn strategy() -> impl Strategy<Value = Operation> {
        prop_oneof![
            20 => any::<u32>().prop_map(Operation::Alloc),
            5 => (any::<usize>(), any::<u32>()).prop_map(|(which, value)| Operation::Set(which, value)),
            8 => any::<usize>().prop_map(Operation::Take),
            1 => Just(Operation::Clear),
        ]
    }
}
