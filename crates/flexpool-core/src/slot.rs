//! Worker slot arena
//!
//! Fixed-capacity table of `index -> Option<T>`. Vacated indices go on a
//! LIFO free stack so the most recently freed slot is reused first; fresh
//! indices are handed out only when the stack is empty.
//!
//! Not synchronized. The pool keeps its table under the coordination lock.

/// Slot table for worker handles
pub struct SlotTable<T> {
    /// Slot contents, `None` when vacant or reserved
    slots: Vec<Option<T>>,

    /// LIFO stack of vacated slot indices
    free_stack: Vec<usize>,

    /// Next never-used slot index
    next_fresh: usize,

    /// Number of filled slots
    occupied: usize,
}

impl<T> SlotTable<T> {
    /// Create a table with `capacity` empty slots
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: (0..capacity).map(|_| None).collect(),
            free_stack: Vec::with_capacity(capacity),
            next_fresh: 0,
            occupied: 0,
        }
    }

    /// Reserve an empty slot, returning its index
    ///
    /// The slot stays empty until `fill`; give it back with `release` if
    /// whatever was meant to occupy it could not be created.
    pub fn reserve(&mut self) -> Option<usize> {
        if let Some(idx) = self.free_stack.pop() {
            return Some(idx);
        }
        if self.next_fresh < self.slots.len() {
            let idx = self.next_fresh;
            self.next_fresh += 1;
            return Some(idx);
        }
        None
    }

    /// Store `value` in a reserved slot
    pub fn fill(&mut self, idx: usize, value: T) {
        debug_assert!(self.slots[idx].is_none(), "slot {} already filled", idx);
        self.slots[idx] = Some(value);
        self.occupied += 1;
    }

    /// Return a reserved-but-unfilled slot to the free stack
    pub fn release(&mut self, idx: usize) {
        debug_assert!(self.slots[idx].is_none(), "slot {} still filled", idx);
        self.free_stack.push(idx);
    }

    /// Vacate a slot, returning its contents
    pub fn take(&mut self, idx: usize) -> Option<T> {
        let value = self.slots.get_mut(idx)?.take()?;
        self.occupied -= 1;
        self.free_stack.push(idx);
        Some(value)
    }

    /// Vacate every slot, returning contents in index order
    pub fn drain(&mut self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.occupied);
        for idx in 0..self.slots.len() {
            if let Some(v) = self.take(idx) {
                out.push(v);
            }
        }
        out
    }

    /// Whether `idx` currently holds a value
    #[inline]
    pub fn is_occupied(&self, idx: usize) -> bool {
        matches!(self.slots.get(idx), Some(Some(_)))
    }

    /// Number of filled slots
    #[inline]
    pub fn occupied(&self) -> usize {
        self.occupied
    }

    /// Total number of slots
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserve_sequential() {
        let mut table: SlotTable<&str> = SlotTable::new(4);
        assert_eq!(table.reserve(), Some(0));
        assert_eq!(table.reserve(), Some(1));
        assert_eq!(table.reserve(), Some(2));
        assert_eq!(table.occupied(), 0);
    }

    #[test]
    fn test_take_then_reuse_lifo() {
        let mut table = SlotTable::new(4);
        for name in ["a", "b", "c"] {
            let idx = table.reserve().unwrap();
            table.fill(idx, name);
        }
        assert_eq!(table.occupied(), 3);

        assert_eq!(table.take(0), Some("a"));
        assert_eq!(table.take(2), Some("c"));
        assert!(!table.is_occupied(2));

        // Most recently vacated first
        assert_eq!(table.reserve(), Some(2));
        assert_eq!(table.reserve(), Some(0));
        assert_eq!(table.reserve(), Some(3));
        assert_eq!(table.reserve(), None);
    }

    #[test]
    fn test_exhaustion_and_release() {
        let mut table: SlotTable<u8> = SlotTable::new(2);
        let a = table.reserve().unwrap();
        let _b = table.reserve().unwrap();
        assert_eq!(table.reserve(), None);

        table.release(a);
        assert_eq!(table.reserve(), Some(a));
    }

    #[test]
    fn test_take_empty_slot() {
        let mut table: SlotTable<u8> = SlotTable::new(2);
        assert_eq!(table.take(1), None);
        assert_eq!(table.take(99), None);
        // Vacant take must not push onto the free stack
        assert_eq!(table.reserve(), Some(0));
    }

    #[test]
    fn test_drain() {
        let mut table = SlotTable::new(3);
        for v in [10, 20, 30] {
            let idx = table.reserve().unwrap();
            table.fill(idx, v);
        }
        table.take(1);
        assert_eq!(table.drain(), vec![10, 30]);
        assert_eq!(table.occupied(), 0);
        assert_eq!(table.capacity(), 3);
    }
}
