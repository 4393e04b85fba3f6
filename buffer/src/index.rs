//! Wrap-around index arithmetic.

/// A position inside a ring of fixed capacity.
///
/// All arithmetic wraps modulo the capacity the index was created with.
/// A zero-capacity index is inert: every operation leaves it at position 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RingIndex {
    pos: usize,
    capacity: usize,
}

impl RingIndex {
    /// Creates an index at position 0 of a ring with `capacity` slots.
    pub fn new(capacity: usize) -> Self {
        RingIndex { pos: 0, capacity }
    }

    /// Returns the slot this index points at.
    pub fn get(self) -> usize {
        self.pos
    }

    /// Returns the ring size this index wraps at.
    pub fn capacity(self) -> usize {
        self.capacity
    }

    /// Moves one slot forward.
    pub fn increment(self) -> Self {
        self.advance(1)
    }

    /// Moves `n` slots forward.
    pub fn advance(self, n: usize) -> Self {
        if self.capacity == 0 {
            return self;
        }
        // pos < capacity, so only n needs reducing before the add.
        let step = n % self.capacity;
        let pos = if self.pos >= self.capacity - step {
            self.pos - (self.capacity - step)
        } else {
            self.pos + step
        };
        RingIndex { pos, ..self }
    }

    /// Moves one slot backward.
    pub fn decrement(self) -> Self {
        if self.capacity == 0 {
            return self;
        }
        let pos = if self.pos == 0 {
            self.capacity - 1
        } else {
            self.pos - 1
        };
        RingIndex { pos, ..self }
    }

    /// Number of forward steps needed to go from `self` to `other`.
    pub fn distance_to(self, other: RingIndex) -> usize {
        if self.capacity == 0 {
            return 0;
        }
        if other.pos >= self.pos {
            other.pos - self.pos
        } else {
            self.capacity - self.pos + other.pos
        }
    }
}
