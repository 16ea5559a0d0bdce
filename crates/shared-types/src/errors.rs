//! # Error Types
//!
//! Errors raised by the services a contract consumes: the transactional
//! key-value ledger, the identity service and the envelope codec.

use thiserror::Error;

/// Errors from the transactional key-value ledger.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// A key read by the transaction changed before commit.
    #[error("MVCC read conflict on key {key}")]
    MvccReadConflict { key: String },

    /// The stored revision no longer matches the one the writer observed.
    #[error("Revision mismatch on key {key}: observed {observed}, current {current}")]
    RevisionMismatch {
        key: String,
        observed: u64,
        current: u64,
    },

    /// The host did not provide a transaction timestamp.
    #[error("Transaction timestamp unavailable")]
    TimestampUnavailable,

    /// Storage backend failure.
    #[error("Backend error: {0}")]
    Backend(String),
}

/// Errors from the invoker identity service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    /// The invoker's organization could not be determined.
    #[error("Unable to resolve invoker organization: {0}")]
    Unresolvable(String),
}

/// Errors from encoding or decoding a `StateEnvelope`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvelopeError {
    /// Bytes are not a valid envelope.
    #[error("Malformed envelope: {0}")]
    Malformed(String),

    /// The stored value belongs to another entity kind.
    #[error("Kind mismatch: expected {expected}, found {found}")]
    KindMismatch {
        expected: &'static str,
        found: String,
    },
}
