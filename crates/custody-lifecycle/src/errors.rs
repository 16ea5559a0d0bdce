//! # Error Types
//!
//! All failures an invocation of the custody contract can end with. Every
//! error is terminal for the invocation: nothing is retried here and nothing
//! is written when one is returned.

use crate::domain::value_objects::{AssetStatus, Role};
use shared_types::{EnvelopeError, IdentityError, LedgerError};
use std::fmt;
use thiserror::Error;

// =============================================================================
// CUSTODY ERRORS
// =============================================================================

/// Errors returned by the custody contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CustodyError {
    /// Wrong number of positional arguments.
    #[error("incorrect number of arguments for {operation}: expected {expected}, got {actual}")]
    ArgumentCount {
        operation: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Role claim or invoker organization not allowed for the operation.
    #[error("not authorised to {operation}: {reason}")]
    Unauthorized {
        operation: &'static str,
        reason: String,
    },

    /// An argument is present but unusable, e.g. an empty party name.
    #[error("invalid argument for {operation}: {reason}")]
    InvalidArgument {
        operation: &'static str,
        reason: String,
    },

    /// No record stored under the id.
    #[error("asset not found: {0}")]
    NotFound(String),

    /// A record already exists under the derived id.
    #[error("asset already exists: {0}")]
    Conflict(String),

    /// The record's status does not allow the requested transition.
    #[error("cannot {operation} asset {id} in status {from}")]
    InvalidTransition {
        id: String,
        from: AssetStatus,
        operation: &'static str,
    },

    /// The invoked function name is not part of the contract.
    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    /// The ledger failed or rejected the access.
    #[error("ledger error: {0}")]
    Store(#[from] LedgerError),

    /// Stored bytes could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl CustodyError {
    /// Discriminator for the error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ArgumentCount { .. } => ErrorKind::ArgumentCount,
            Self::Unauthorized { .. } => ErrorKind::Authorization,
            Self::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Conflict(_) => ErrorKind::Conflict,
            Self::InvalidTransition { .. } => ErrorKind::InvalidTransition,
            Self::UnknownOperation(_) => ErrorKind::UnknownOperation,
            Self::Store(_) => ErrorKind::Store,
            Self::Serialization(_) => ErrorKind::Serialization,
        }
    }

    /// Role claim mismatch.
    pub(crate) fn role_mismatch(operation: &'static str, required: Role, claim: &str) -> Self {
        Self::Unauthorized {
            operation,
            reason: format!("role claim {claim:?} is not {required}"),
        }
    }

    /// Invoker organization mismatch.
    pub(crate) fn org_mismatch(operation: &'static str, expected: &str, actual: &str) -> Self {
        Self::Unauthorized {
            operation,
            reason: format!("invoker organization {actual:?} is not {expected:?}"),
        }
    }
}

impl From<EnvelopeError> for CustodyError {
    fn from(err: EnvelopeError) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<IdentityError> for CustodyError {
    fn from(err: IdentityError) -> Self {
        Self::Unauthorized {
            operation: "resolve invoker",
            reason: err.to_string(),
        }
    }
}

// =============================================================================
// ERROR KIND
// =============================================================================

/// Kind discriminator carried by failed invocation responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Wrong arity.
    ArgumentCount,
    /// Role claim or organization mismatch.
    Authorization,
    /// Unusable argument value.
    InvalidArgument,
    /// Operation on a nonexistent id.
    NotFound,
    /// Duplicate id on create.
    Conflict,
    /// Status precondition violated.
    InvalidTransition,
    /// Unknown function name.
    UnknownOperation,
    /// Underlying ledger failure.
    Store,
    /// Encoding failure.
    Serialization,
}

impl ErrorKind {
    /// Stable name used on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ArgumentCount => "ArgumentCountError",
            Self::Authorization => "AuthorizationError",
            Self::InvalidArgument => "InvalidArgumentError",
            Self::NotFound => "NotFoundError",
            Self::Conflict => "ConflictError",
            Self::InvalidTransition => "InvalidTransitionError",
            Self::UnknownOperation => "UnknownOperationError",
            Self::Store => "StoreError",
            Self::Serialization => "SerializationError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// TESTS
// =============================================================================
