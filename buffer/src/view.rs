//! Unsynchronized view of buffer storage.

use std::ops::Deref;

/// Borrowed view of every storage slot of a [`RingBuffer`](crate::RingBuffer).
///
/// The slice covers all `capacity` slots in storage order, not the logical
/// contents: slots outside the head..tail range hold stale or default values.
/// Any operation on the buffer (through any clone) invalidates the view; see
/// [`RingBuffer::raw_view`](crate::RingBuffer::raw_view).
#[derive(Debug)]
pub struct RawView<'a, T> {
    slots: &'a [T],
}

impl<'a, T> RawView<'a, T> {
    pub(crate) fn new(slots: &'a [T]) -> Self {
        RawView { slots }
    }

    pub fn as_slice(&self) -> &'a [T] {
        self.slots
    }
}

impl<T> Deref for RawView<'_, T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.slots
    }
}
