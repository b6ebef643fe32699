//! Slot storage for tree nodes.
//!
//! Nodes never move once allocated and are addressed by a [`Handle`]. Each slot carries a
//! generation that is bumped when its occupant is taken, so a handle kept around after a
//! removal no longer resolves even if the slot has been reused.

use std::collections::TryReserveError;

/// A stable reference to an occupied arena slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct Handle {
    index: u32,
    generation: u32,
}

impl Handle {
    /// The largest number of slots an arena can hand out.
    pub(crate) const MAX: usize = u32::MAX as usize;

    fn to_index(self) -> usize {
        self.index as usize
    }
}

/// Why an allocation was refused.
#[derive(Debug)]
pub(crate) enum AllocError {
    /// Every index representable by a [`Handle`] is in use.
    Full,
    /// The backing storage could not grow.
    Reserve(TryReserveError),
}

impl From<TryReserveError> for AllocError {
    fn from(err: TryReserveError) -> Self {
        AllocError::Reserve(err)
    }
}

#[derive(Clone, Debug)]
struct Slot<T> {
    generation: u32,
    element: Option<T>,
}

#[derive(Clone, Debug)]
pub(crate) struct Arena<T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    len: usize,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            len: 0,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::with_capacity(capacity),
            len: 0,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn reserve(&mut self, additional: usize) {
        self.slots.reserve(additional);
        let wanted = self.slots.capacity();
        self.free.reserve(wanted.saturating_sub(self.free.len()));
    }

    /// Stores `element` and returns its handle. Nothing is stored when this fails.
    pub(crate) fn try_alloc(&mut self, element: T) -> Result<Handle, AllocError> {
        if let Some(index) = self.free.pop() {
            // Reuse a free slot; its generation was bumped when it was vacated.
            let slot = &mut self.slots[index as usize];
            slot.element = Some(element);
            self.len += 1;
            return Ok(Handle {
                index,
                generation: slot.generation,
            });
        }

        if self.slots.len() >= Handle::MAX {
            return Err(AllocError::Full);
        }
        self.slots.try_reserve(1)?;
        // `take` pushes onto the free list, so keep room for every slot there up front.
        let needed = (self.slots.len() + 1).saturating_sub(self.free.len());
        self.free.try_reserve(needed)?;

        #[allow(clippy::cast_possible_truncation)]
        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            element: Some(element),
        });
        self.len += 1;
        Ok(Handle {
            index,
            generation: 0,
        })
    }

    /// Returns `true` if `handle` still names a live element.
    pub(crate) fn contains(&self, handle: Handle) -> bool {
        self.try_get(handle).is_some()
    }

    pub(crate) fn try_get(&self, handle: Handle) -> Option<&T> {
        self.slots
            .get(handle.to_index())
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.element.as_ref())
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        self.try_get(handle)
            .expect("`Arena::get()` - `handle` is invalid!")
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        self.slots
            .get_mut(handle.to_index())
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.element.as_mut())
            .expect("`Arena::get_mut()` - `handle` is invalid!")
    }

    /// Removes the element behind `handle`, retiring the handle.
    pub(crate) fn take(&mut self, handle: Handle) -> T {
        let slot = self
            .slots
            .get_mut(handle.to_index())
            .filter(|slot| slot.generation == handle.generation)
            .expect("`Arena::take()` - `handle` is invalid!");
        let element = slot
            .element
            .take()
            .expect("`Arena::take()` - `handle` is invalid!");
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        self.len -= 1;
        element
    }

    pub(crate) fn free(&mut self, handle: Handle) {
        drop(self.take(handle));
    }
}
