//! Slot arena addressed by generation-checked handles.

use core::marker::PhantomData;
use core::num::NonZeroU32;

use crate::ids::Handle;

#[derive(Debug, Clone)]
struct Slot<T> {
    generation: NonZeroU32,
    value: Option<T>,
}

/// Owning storage for elements of one kind.
///
/// Removal vacates the slot and bumps its generation, so stale handles
/// resolve to `None` instead of aliasing whatever is stored there next.
/// Iteration is in slot order, which keeps traversal deterministic.
#[derive(Debug, Clone)]
pub struct Arena<K, T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    len: usize,
    _kind: PhantomData<fn() -> K>,
}

impl<K, T> Default for Arena<K, T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            len: 0,
            _kind: PhantomData,
        }
    }
}

impl<K, T> Arena<K, T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Store a value and return its handle.
    pub fn insert(&mut self, value: T) -> Handle<K> {
        self.len += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.value = Some(value);
            return Handle::new(index, slot.generation);
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: NonZeroU32::MIN,
            value: Some(value),
        });
        Handle::new(index, NonZeroU32::MIN)
    }

    /// Remove the value behind `handle`, if it is still live.
    pub fn remove(&mut self, handle: Handle<K>) -> Option<T> {
        let slot = self.slots.get_mut(handle.index() as usize)?;
        if slot.generation.get() != handle.generation() {
            return None;
        }
        let value = slot.value.take()?;
        self.len -= 1;
        // A slot whose generation would wrap is retired rather than reused.
        if let Some(next) = slot.generation.checked_add(1) {
            slot.generation = next;
            self.free.push(handle.index());
        }
        Some(value)
    }

    pub fn get(&self, handle: Handle<K>) -> Option<&T> {
        let slot = self.slots.get(handle.index() as usize)?;
        if slot.generation.get() != handle.generation() {
            return None;
        }
        slot.value.as_ref()
    }

    pub fn get_mut(&mut self, handle: Handle<K>) -> Option<&mut T> {
        let slot = self.slots.get_mut(handle.index() as usize)?;
        if slot.generation.get() != handle.generation() {
            return None;
        }
        slot.value.as_mut()
    }

    pub fn contains(&self, handle: Handle<K>) -> bool {
        self.get(handle).is_some()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Live elements with their handles, in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (Handle<K>, &T)> {
        self.slots.iter().enumerate().filter_map(|(i, slot)| {
            slot.value
                .as_ref()
                .map(|v| (Handle::new(i as u32, slot.generation), v))
        })
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Handle<K>, &mut T)> {
        self.slots.iter_mut().enumerate().filter_map(|(i, slot)| {
            let generation = slot.generation;
            slot.value
                .as_mut()
                .map(move |v| (Handle::new(i as u32, generation), v))
        })
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.slots.iter().filter_map(|slot| slot.value.as_ref())
    }

    /// Snapshot of all live handles, in slot order.
    pub fn handles(&self) -> Vec<Handle<K>> {
        self.iter().map(|(h, _)| h).collect()
    }
}
