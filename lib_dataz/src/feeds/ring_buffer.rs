//! # Ring Buffer
//!
//! A fixed-capacity circular store holding the most recently appended items.
//! Once full, every append overwrites the logically oldest entry. One writer
//! appends while any number of readers scan concurrently; both sides go
//! through an `RwLock`, so a reader sees an append either completely or not
//! at all.
//!
//! Reads always walk the whole capacity. The cost of a read is therefore
//! bounded by the capacity and independent of how many items qualify.

use std::sync::{PoisonError, RwLock};

/// Anything stored in a `RingBuffer` must expose its sequence number.
pub trait Sequenced {
    /// The strictly increasing position of this value in its producer's output.
    fn sequence(&self) -> u64;
}

impl Sequenced for super::Item {
    fn sequence(&self) -> u64 {
        self.sequence
    }
}

/// State guarded by the lock. `oldest` and `write_count` only change together
/// with the slot they describe.
#[derive(Debug)]
struct Slots<T> {
    data: Vec<Option<T>>,
    /// Slot index of the logically oldest retained item.
    oldest: usize,
    /// Total number of appends since construction.
    write_count: u64,
}

/// # Ring Buffer
///
/// Retains at most `capacity` items: the last ones appended.
#[derive(Debug)]
pub struct RingBuffer<T> {
    capacity: usize,
    slots: RwLock<Slots<T>>,
}

impl<T: Sequenced + Clone> RingBuffer<T> {
    /// Creates an empty buffer with room for `capacity` items.
    ///
    /// A capacity of zero is bumped to one; a buffer always retains at least
    /// the latest item.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let mut data = Vec::with_capacity(capacity);
        data.resize_with(capacity, || None);
        Self {
            capacity,
            slots: RwLock::new(Slots {
                data,
                oldest: 0,
                write_count: 0,
            }),
        }
    }

    /// Number of slots.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Total number of items ever appended.
    pub fn write_count(&self) -> u64 {
        self.read_slots(|slots| slots.write_count)
    }

    /// Number of items currently retained, `min(write_count, capacity)`.
    pub fn len(&self) -> usize {
        self.read_slots(|slots| slots.write_count.min(self.capacity as u64) as usize)
    }

    /// True until the first append.
    pub fn is_empty(&self) -> bool {
        self.write_count() == 0
    }

    /// Appends `item`, evicting the oldest retained item when the buffer is full.
    ///
    /// Callers must keep to a single writer per buffer and append in
    /// increasing sequence order.
    pub fn append(&self, item: T) {
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        let slot = (slots.write_count % self.capacity as u64) as usize;
        if slots.write_count > 0 && slot == slots.oldest {
            slots.oldest = (slots.oldest + 1) % self.capacity;
        }
        slots.data[slot] = Some(item);
        slots.write_count += 1;
    }

    /// Returns every retained item whose sequence number is strictly greater
    /// than `cursor`, in ascending sequence order.
    ///
    /// A cursor older than the oldest retained item simply yields fewer items;
    /// whatever was evicted in between is gone.
    pub fn read_from(&self, cursor: u64) -> Vec<T> {
        self.read_slots(|slots| {
            (0..self.capacity)
                .filter_map(|i| slots.data[(slots.oldest + i) % self.capacity].as_ref())
                .filter(|item| item.sequence() > cursor)
                .cloned()
                .collect()
        })
    }

    fn read_slots<R>(&self, f: impl FnOnce(&Slots<T>) -> R) -> R {
        let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
        f(&slots)
    }
}
