//! Error types for a delta emit.
//!
//! Only conditions that mean this crate's own invariants broke land here —
//! anything the host can reasonably act on (a reference to an added member,
//! say) goes through [`crate::diagnostics`] instead.

use thiserror::Error;

/// A failure that aborts the whole delta. None of these are meant to be
/// recovered from mid-emit; they indicate either a caller-supplied oracle
/// disagreeing with itself, or a bug in this crate.
#[derive(Debug, Error)]
pub enum DeltaError {
    /// A capability returned data inconsistent with something it, or another
    /// capability, reported earlier (e.g. a `ChangeKind` that does not match
    /// what the definition map says about the same symbol).
    #[error("internal invariant violated: {0}")]
    InvariantViolation(String),

    /// The emit was cancelled cooperatively via [`crate::cancellation::CancellationToken`].
    #[error("delta emit cancelled")]
    Cancelled,
}

impl DeltaError {
    pub fn invariant(message: impl Into<String>) -> Self {
        DeltaError::InvariantViolation(message.into())
    }
}

pub type Result<T> = std::result::Result<T, DeltaError>;
