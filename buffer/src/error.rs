//! Error types for buffer operations.

/// Result type alias for buffer operations.
pub type Result<T> = std::result::Result<T, BufferError>;

/// Reason a transfer request was rejected.
///
/// A rejected call never mutates the buffer. Overwriting old data when the
/// buffer is full is not an error and has no variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BufferError {
    /// The buffer has zero capacity.
    #[error("buffer: no storage allocated")]
    Unallocated,

    /// A batch larger than the whole buffer was requested.
    #[error("buffer: batch of {length} exceeds capacity {capacity}")]
    BatchTooLarge { length: usize, capacity: usize },

    /// The overlap of a windowed read is larger than the window.
    #[error("buffer: overlap {overlap} exceeds batch length {length}")]
    InvalidOverlap { overlap: usize, length: usize },

    /// Fewer elements are stored than were requested.
    #[error("buffer: requested {requested} elements, only {available} available")]
    Underflow { requested: usize, available: usize },
}
