//! Advisory diagnostics.
//!
//! A buffer reports overwrites and rejected requests to a [`DiagnosticSink`]
//! when warnings are enabled. Diagnostics are observational only: the result
//! of the call that produced one is the same whether or not it was reported.

use std::fmt;

use tracing::warn;

use crate::error::BufferError;

/// The public call a diagnostic originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Enqueue,
    EnqueueBatch,
    Dequeue,
    DequeueBatch,
    Front,
    PeekBatch,
}

impl Operation {
    /// Returns the method name, as used in log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Enqueue => "enqueue",
            Operation::EnqueueBatch => "enqueue_batch",
            Operation::Dequeue => "dequeue",
            Operation::DequeueBatch => "dequeue_batch",
            Operation::Front => "front",
            Operation::PeekBatch => "peek_batch",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An advisory event raised by a buffer operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// The oldest `evicted` elements were overwritten to make room.
    Overwrite { op: Operation, evicted: usize },
    /// The request was rejected without touching the buffer.
    Rejected { op: Operation, error: BufferError },
}

impl Diagnostic {
    /// Returns the call that raised this diagnostic.
    pub fn operation(&self) -> Operation {
        match self {
            Diagnostic::Overwrite { op, .. } | Diagnostic::Rejected { op, .. } => *op,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Overwrite { op, evicted } => {
                write!(f, "[diagnostic] {}: overflow, overwrote {} oldest", op, evicted)
            }
            Diagnostic::Rejected { op, error } => write!(f, "[diagnostic] {}: {}", op, error),
        }
    }
}

/// Destination for advisory diagnostics.
///
/// `report` is always called after the buffer lock has been released, so an
/// implementation may call back into the buffer.
pub trait DiagnosticSink: Send + Sync {
    /// Delivers one diagnostic.
    fn report(&self, diagnostic: &Diagnostic);
}

impl<F> DiagnosticSink for F
where
    F: Fn(&Diagnostic) + Send + Sync,
{
    fn report(&self, diagnostic: &Diagnostic) {
        self(diagnostic)
    }
}

/// Default sink: emits every diagnostic as a `tracing` warning.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, diagnostic: &Diagnostic) {
        warn!(target: "streamring::buffer", op = diagnostic.operation().as_str(), "{}", diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_diagnostic_display_is_tagged() {
        let overwrite = Diagnostic::Overwrite {
            op: Operation::Enqueue,
            evicted: 1,
        };
        assert_eq!(
            overwrite.to_string(),
            "[diagnostic] enqueue: overflow, overwrote 1 oldest"
        );

        let rejected = Diagnostic::Rejected {
            op: Operation::DequeueBatch,
            error: BufferError::Unallocated,
        };
        assert_eq!(
            rejected.to_string(),
            "[diagnostic] dequeue_batch: buffer: no storage allocated"
        );
        assert_eq!(rejected.operation(), Operation::DequeueBatch);
    }

    #[test]
    fn test_closure_sink() {
        let seen = Mutex::new(Vec::new());
        let sink = |d: &Diagnostic| seen.lock().unwrap().push(d.clone());
        sink.report(&Diagnostic::Overwrite {
            op: Operation::EnqueueBatch,
            evicted: 3,
        });
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_tracing_sink_does_not_panic_without_subscriber() {
        TracingSink.report(&Diagnostic::Rejected {
            op: Operation::Front,
            error: BufferError::Underflow {
                requested: 1,
                available: 0,
            },
        });
    }
}
