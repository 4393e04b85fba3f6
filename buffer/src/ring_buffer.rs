//! Overwriting ring buffer implementation.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use tracing::debug;

use crate::config::RingBufferConfig;
use crate::diagnostic::{Diagnostic, DiagnosticSink, Operation, TracingSink};
use crate::error::{BufferError, Result};
use crate::index::RingIndex;
use crate::view::RawView;

/// A thread-safe, fixed-capacity ring buffer for streaming samples.
///
/// `RingBuffer<T>` stages samples between producer and consumer threads.
/// Storage is allocated once (or on an explicit [`resize`](Self::resize)) and
/// never grows. When a write does not fit, the oldest elements are
/// overwritten.
///
/// # Semantics
///
/// - **Write**: Never blocks on data, overwrites oldest data when full
/// - **Read**: Never waits for data; returns `None` or an error immediately
///   when not enough is stored
/// - **Windowed read**: [`dequeue_batch`](Self::dequeue_batch) can leave the
///   tail of the window in place so the next read overlaps it
///
/// A buffer with capacity 0 is unallocated: every transfer fails until it is
/// resized. Handles are cheap to clone and all clones share one buffer.
///
/// # Example
///
/// ```
/// use streamring_buffer::RingBuffer;
///
/// let buf = RingBuffer::<i32>::new(4);
/// for i in 1..=5 {
///     buf.enqueue(i).unwrap(); // 5 overwrites 1
/// }
///
/// // Read windows of 2, stepping by 1.
/// let mut window = [0; 2];
/// buf.dequeue_batch(&mut window, 1).unwrap();
/// assert_eq!(window, [2, 3]);
/// buf.dequeue_batch(&mut window, 1).unwrap();
/// assert_eq!(window, [3, 4]);
/// assert_eq!(buf.to_vec(), vec![4, 5]);
/// ```
pub struct RingBuffer<T> {
    inner: Arc<RingBufferInner<T>>,
}

struct RingBufferInner<T> {
    state: Mutex<RingBufferState<T>>,
    warnings: AtomicBool,
    sink: Arc<dyn DiagnosticSink>,
}

struct RingBufferState<T> {
    storage: Vec<T>,
    head: RingIndex, // oldest element
    tail: RingIndex, // next write slot
    count: usize,
}

impl<T> RingBufferState<T> {
    fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Checks that `length` elements can be read with `overlap` of them kept.
    fn check_read(&self, length: usize, overlap: usize) -> Result<()> {
        let capacity = self.capacity();
        if capacity == 0 {
            return Err(BufferError::Unallocated);
        }
        if length > capacity {
            return Err(BufferError::BatchTooLarge { length, capacity });
        }
        if overlap > length {
            return Err(BufferError::InvalidOverlap { overlap, length });
        }
        if length > self.count {
            return Err(BufferError::Underflow {
                requested: length,
                available: self.count,
            });
        }
        Ok(())
    }

    fn evict(&mut self, n: usize) {
        debug_assert!(n <= self.count, "evicting {} of {} elements", n, self.count);
        self.head = self.head.advance(n);
        self.count -= n;
    }

    fn push(&mut self, item: T) {
        self.write_tail(item);
        self.count += 1;
    }

    // Writes at the tail without touching count.
    fn write_tail(&mut self, item: T) {
        self.storage[self.tail.get()] = item;
        self.tail = self.tail.increment();
    }
}

impl<T: Clone + Default> RingBufferState<T> {
    fn allocate(capacity: usize) -> Self {
        let mut storage = Vec::with_capacity(capacity);
        storage.resize_with(capacity, T::default);
        RingBufferState {
            storage,
            head: RingIndex::new(capacity),
            tail: RingIndex::new(capacity),
            count: 0,
        }
    }

    fn reset(&mut self) {
        for slot in &mut self.storage {
            *slot = T::default();
        }
        let capacity = self.capacity();
        self.head = RingIndex::new(capacity);
        self.tail = RingIndex::new(capacity);
        self.count = 0;
    }

    /// Copies `out.len()` elements from the head, removing the first
    /// `consume` of them. Bounds must already be checked.
    fn read_front(&mut self, out: &mut [T], consume: usize) {
        let mut pos = self.head;
        for (i, slot) in out.iter_mut().enumerate() {
            let cell = &mut self.storage[pos.get()];
            *slot = if i < consume {
                std::mem::take(cell)
            } else {
                cell.clone()
            };
            pos = pos.increment();
        }
        self.evict(consume);
    }

    fn peek_front(&self, out: &mut [T]) {
        let mut pos = self.head;
        for slot in out.iter_mut() {
            *slot = self.storage[pos.get()].clone();
            pos = pos.increment();
        }
    }
}

impl<T> Clone for RingBuffer<T> {
    fn clone(&self) -> Self {
        RingBuffer {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone + Default> Default for RingBuffer<T> {
    fn default() -> Self {
        Self::new(0)
    }
}

impl<T> RingBuffer<T> {
    /// Enables or disables advisory diagnostics.
    ///
    /// This never changes the outcome of an operation.
    pub fn set_warnings(&self, enabled: bool) {
        self.inner.warnings.store(enabled, Ordering::Relaxed);
    }

    /// Returns whether advisory diagnostics are enabled.
    pub fn warnings_enabled(&self) -> bool {
        self.inner.warnings.load(Ordering::Relaxed)
    }

    /// Returns the number of elements currently in the buffer.
    pub fn len(&self) -> usize {
        self.inner.state.lock().count
    }

    /// Returns the buffer capacity. Zero means unallocated.
    pub fn capacity(&self) -> usize {
        self.inner.state.lock().capacity()
    }

    /// Returns true if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.state.lock().count == 0
    }

    /// Returns true if the buffer holds `capacity` elements.
    ///
    /// An unallocated buffer reports full.
    pub fn is_full(&self) -> bool {
        let state = self.inner.state.lock();
        state.count >= state.capacity()
    }

    /// Returns a view of the raw storage, or `None` when unallocated.
    ///
    /// The view is not synchronized and confers no ownership. It exposes all
    /// slots in storage order, including stale ones outside the logical
    /// contents.
    ///
    /// # Safety
    ///
    /// No other operation may run on this buffer, through this handle or any
    /// clone of it, on any thread, while the returned view is alive.
    pub unsafe fn raw_view(&self) -> Option<RawView<'_, T>> {
        // SAFETY: the caller guarantees nothing locks or mutates the state
        // for the lifetime of the view.
        let state = unsafe { &*self.inner.state.data_ptr() };
        if state.storage.is_empty() {
            None
        } else {
            Some(RawView::new(&state.storage))
        }
    }

    fn report(&self, diagnostic: Diagnostic) {
        if self.warnings_enabled() {
            self.inner.sink.report(&diagnostic);
        }
    }

    /// Reports the outcome of a write or batch read. `Ok(n)` carries the
    /// number of overwritten elements.
    fn settle(&self, op: Operation, outcome: Result<usize>) -> Result<()> {
        match outcome {
            Ok(0) => Ok(()),
            Ok(evicted) => {
                self.report(Diagnostic::Overwrite { op, evicted });
                Ok(())
            }
            Err(error) => {
                self.report(Diagnostic::Rejected { op, error });
                Err(error)
            }
        }
    }

    fn settle_item(&self, op: Operation, outcome: Result<T>) -> Option<T> {
        match outcome {
            Ok(item) => Some(item),
            Err(error) => {
                self.report(Diagnostic::Rejected { op, error });
                None
            }
        }
    }
}

impl<T: Clone + Default> RingBuffer<T> {
    /// Creates a new RingBuffer with the specified capacity.
    ///
    /// A capacity of 0 creates an unallocated buffer that rejects every
    /// transfer until [`resize`](Self::resize) is called.
    pub fn new(capacity: usize) -> Self {
        Self::from_config(&RingBufferConfig::new(capacity))
    }

    /// Creates a buffer from `config`, reporting diagnostics via `tracing`.
    pub fn from_config(config: &RingBufferConfig) -> Self {
        Self::with_sink(config, TracingSink)
    }

    /// Creates a buffer from `config` that reports diagnostics to `sink`.
    pub fn with_sink<S>(config: &RingBufferConfig, sink: S) -> Self
    where
        S: DiagnosticSink + 'static,
    {
        RingBuffer {
            inner: Arc::new(RingBufferInner {
                state: Mutex::new(RingBufferState::allocate(config.capacity)),
                warnings: AtomicBool::new(config.warnings),
                sink: Arc::new(sink),
            }),
        }
    }

    /// Reallocates storage to `capacity` slots and empties the buffer.
    ///
    /// All stored data is discarded. Resizing to 0 leaves the buffer
    /// unallocated.
    pub fn resize(&self, capacity: usize) {
        let mut state = self.inner.state.lock();
        let previous = state.capacity();
        *state = RingBufferState::allocate(capacity);
        debug!(previous, capacity, "ring buffer resized");
    }

    /// Empties the buffer and resets every slot to `T::default()`.
    pub fn clear(&self) {
        self.inner.state.lock().reset();
    }

    /// Adds a single element to the buffer.
    ///
    /// If the buffer is full, the oldest element is overwritten. Fails only
    /// when the buffer is unallocated.
    pub fn enqueue(&self, item: T) -> Result<()> {
        let outcome = {
            let mut state = self.inner.state.lock();
            let capacity = state.capacity();
            if capacity == 0 {
                Err(BufferError::Unallocated)
            } else {
                let evicted = if state.count >= capacity { 1 } else { 0 };
                state.evict(evicted);
                state.push(item);
                Ok(evicted)
            }
        };
        self.settle(Operation::Enqueue, outcome)
    }

    /// Writes all of `items` in one atomic step.
    ///
    /// The batch may not be larger than the capacity. If `len() + items.len()`
    /// reaches the capacity, the head first skips `items.len()` slots, then
    /// the batch is written at the tail. The element count is unchanged by
    /// such a write: the batch replaces the oldest `items.len()` elements.
    /// When fewer than `items.len()` elements were stored, the skip also
    /// passes over part of the new batch, so only the newest `len()` of its
    /// items remain. A full-capacity batch into an empty buffer leaves it
    /// empty.
    pub fn enqueue_batch(&self, items: &[T]) -> Result<()> {
        let length = items.len();
        let outcome = {
            let mut state = self.inner.state.lock();
            let capacity = state.capacity();
            if capacity == 0 {
                Err(BufferError::Unallocated)
            } else if length > capacity {
                Err(BufferError::BatchTooLarge { length, capacity })
            } else if state.count + length >= capacity {
                state.head = state.head.advance(length);
                for item in items {
                    state.write_tail(item.clone());
                }
                Ok(length)
            } else {
                for item in items {
                    state.push(item.clone());
                }
                Ok(0)
            }
        };
        self.settle(Operation::EnqueueBatch, outcome)
    }

    /// Removes and returns the oldest element.
    ///
    /// Returns `None` immediately if the buffer is empty or unallocated.
    pub fn dequeue(&self) -> Option<T> {
        let outcome = {
            let mut state = self.inner.state.lock();
            state.check_read(1, 0).map(|()| {
                let head = state.head.get();
                let item = std::mem::take(&mut state.storage[head]);
                state.evict(1);
                item
            })
        };
        self.settle_item(Operation::Dequeue, outcome)
    }

    /// Reads a window of `out.len()` elements from the head.
    ///
    /// Only the first `out.len() - overlap` elements are removed; the last
    /// `overlap` stay in the buffer and start the next window. With
    /// `overlap == 0` this is equivalent to `out.len()` calls to
    /// [`dequeue`](Self::dequeue).
    ///
    /// Fails without touching the buffer if it is unallocated, if the window
    /// is larger than the capacity, if `overlap > out.len()`, or if fewer
    /// than `out.len()` elements are stored.
    pub fn dequeue_batch(&self, out: &mut [T], overlap: usize) -> Result<()> {
        let length = out.len();
        let outcome = {
            let mut state = self.inner.state.lock();
            state.check_read(length, overlap).map(|()| {
                state.read_front(out, length - overlap);
                0
            })
        };
        self.settle(Operation::DequeueBatch, outcome)
    }

    /// Returns a copy of the oldest element without removing it.
    pub fn front(&self) -> Option<T> {
        let outcome = {
            let state = self.inner.state.lock();
            state.check_read(1, 0).map(|()| {
                let head = state.head.get();
                state.storage[head].clone()
            })
        };
        self.settle_item(Operation::Front, outcome)
    }

    /// Copies the `out.len()` oldest elements without removing any.
    ///
    /// Fails under the same conditions as [`dequeue_batch`](Self::dequeue_batch).
    pub fn peek_batch(&self, out: &mut [T]) -> Result<()> {
        let outcome = {
            let state = self.inner.state.lock();
            state.check_read(out.len(), 0).map(|()| {
                state.peek_front(out);
                0
            })
        };
        self.settle(Operation::PeekBatch, outcome)
    }

    /// Returns a copy of all stored elements, oldest first.
    pub fn to_vec(&self) -> Vec<T> {
        let state = self.inner.state.lock();
        let mut result = vec![T::default(); state.count];
        state.peek_front(&mut result);
        result
    }
}
