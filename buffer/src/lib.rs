//! Thread-safe fixed-capacity ring buffer for streaming samples.
//!
//! This crate provides [`RingBuffer<T>`], a circular buffer used to stage
//! sensor or signal samples between producer and consumer threads without
//! ever growing. It keeps the most recent data by overwriting the oldest
//! elements when full, and supports windowed consumption where consecutive
//! reads overlap.
//!
//! # Transfers
//!
//! ```
//! use streamring_buffer::{BufferError, RingBuffer};
//!
//! let buf = RingBuffer::<i16>::new(4);
//! buf.enqueue(1).unwrap();
//! buf.enqueue_batch(&[2, 3]).unwrap();
//!
//! assert_eq!(buf.front(), Some(1));
//! assert_eq!(buf.dequeue(), Some(1));
//!
//! // Reads never wait for data.
//! let mut out = [0; 3];
//! assert_eq!(
//!     buf.dequeue_batch(&mut out, 0),
//!     Err(BufferError::Underflow { requested: 3, available: 2 })
//! );
//! ```
//!
//! # Windowed Reads
//!
//! [`RingBuffer::dequeue_batch`] takes an `overlap`: the last `overlap`
//! elements of each window stay in the buffer and open the next one, so the
//! step between windows is `window - overlap`.
//!
//! ```
//! use streamring_buffer::RingBuffer;
//!
//! let buf = RingBuffer::<f32>::new(256);
//! let samples: Vec<f32> = (0..160).map(|i| i as f32).collect();
//! buf.enqueue_batch(&samples).unwrap();
//!
//! let mut window = vec![0.0; 64];
//! let mut starts = Vec::new();
//! while buf.dequeue_batch(&mut window, 32).is_ok() {
//!     starts.push(window[0]);
//! }
//! assert_eq!(starts, vec![0.0, 32.0, 64.0, 96.0]);
//! ```
//!
//! # Diagnostics
//!
//! Overwrites and rejected requests can be reported to a [`DiagnosticSink`].
//! Reporting is off by default; enable it with
//! [`RingBuffer::set_warnings`] or [`RingBufferConfig::warnings`]. The
//! default sink logs through `tracing`.
//!
//! # Thread Safety
//!
//! `RingBuffer<T>` is `Send + Sync` and can be shared between threads using
//! `Clone` (which shares the underlying buffer via `Arc`). Every operation
//! except [`RingBuffer::raw_view`] runs under a single lock.

mod config;
mod diagnostic;
mod error;
mod index;
mod ring_buffer;
mod view;

pub use config::RingBufferConfig;
pub use diagnostic::{Diagnostic, DiagnosticSink, Operation, TracingSink};
pub use error::{BufferError, Result};
pub use index::RingIndex;
pub use ring_buffer::RingBuffer;
pub use view::RawView;
