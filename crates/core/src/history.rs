use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Fixed-capacity ring of recent samples, oldest overwritten first.
///
/// Meant for one writer (the sampler) and any number of readers (renderers)
/// on other threads. [`add`](Self::add) takes the write lock; every read takes
/// the shared lock, so a reader never sees a slot mid-write.
#[derive(Debug)]
pub struct HistoryBuffer {
    capacity: usize,
    ring:     RwLock<Ring>,
}

#[derive(Debug)]
struct Ring {
    slots:  Box<[f64]>,
    /// Next slot to overwrite.
    cursor: usize,
    /// Set once the cursor has wrapped at least once.
    filled: bool,
}

impl HistoryBuffer {
    /// Allocate a buffer holding at most `capacity` samples.
    ///
    /// A capacity of `0` is clamped to `1`.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            ring: RwLock::new(Ring {
                slots:  vec![0.0; capacity].into_boxed_slice(),
                cursor: 0,
                filled: false,
            }),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Record a sample, overwriting the oldest one once the buffer is full.
    pub fn add(&self, value: f64) {
        let mut ring = self.write();
        let cursor = ring.cursor;
        ring.slots[cursor] = value;
        ring.cursor = (cursor + 1) % self.capacity;
        if ring.cursor == 0 {
            ring.filled = true;
        }
    }

    /// Visit every held sample exactly once, oldest to newest.
    pub fn for_each(&self, visit: impl FnMut(f64)) {
        let ring = self.read();
        let (older, newer) = ring.chronological();
        older.iter().chain(newer).copied().for_each(visit);
    }

    /// Replace the contents of `out` with the held samples, oldest first.
    ///
    /// Reuses `out`'s allocation, so renderers can keep one scratch vector.
    pub fn copy_into(&self, out: &mut Vec<f64>) {
        out.clear();
        let ring = self.read();
        let (older, newer) = ring.chronological();
        out.reserve(older.len() + newer.len());
        out.extend_from_slice(older);
        out.extend_from_slice(newer);
    }

    pub fn to_vec(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.capacity);
        self.copy_into(&mut out);
        out
    }

    /// Number of samples currently held: `min(capacity, adds so far)`.
    pub fn count(&self) -> usize {
        let ring = self.read();
        if ring.filled {
            self.capacity
        } else {
            ring.cursor
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Most recent sample, if any.
    pub fn latest(&self) -> Option<f64> {
        let ring = self.read();
        if !ring.filled && ring.cursor == 0 {
            return None;
        }
        let idx = (ring.cursor + self.capacity - 1) % self.capacity;
        Some(ring.slots[idx])
    }

    // A panic while holding the lock cannot leave a slot half-written (f64
    // stores are whole), so a poisoned lock is still safe to use.
    fn read(&self) -> RwLockReadGuard<'_, Ring> {
        self.ring.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Ring> {
        self.ring.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Ring {
    /// The two physical runs that make up chronological order.
    fn chronological(&self) -> (&[f64], &[f64]) {
        if self.filled {
            (&self.slots[self.cursor..], &self.slots[..self.cursor])
        } else {
            (&self.slots[..self.cursor], &self.slots[..0])
        }
    }
}
