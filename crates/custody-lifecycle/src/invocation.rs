//! # Invocation Surface
//!
//! Function names, arities and the structured response returned to hosts.
//!
//! | Function | Arguments |
//! |----------|-----------|
//! | `createCar` | chassisNumber, manufacturer, address, roleClaim |
//! | `deliverToDealer` | id, dealer, address, roleClaim |
//! | `saleToCustomer` | id, customer, address, roleClaim |
//! | `queryRecord` | id |
//! | `del` | id |

use crate::errors::{CustodyError, ErrorKind};
use serde::{Deserialize, Serialize};

// =============================================================================
// OPERATION
// =============================================================================

/// A function of the custody contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `createCar`
    CreateCar,
    /// `deliverToDealer`
    DeliverToDealer,
    /// `saleToCustomer`
    SaleToCustomer,
    /// `queryRecord`
    QueryRecord,
    /// `del`
    Delete,
}

impl Operation {
    /// Every operation, in surface order.
    pub const ALL: [Self; 5] = [
        Self::CreateCar,
        Self::DeliverToDealer,
        Self::SaleToCustomer,
        Self::QueryRecord,
        Self::Delete,
    ];

    /// Resolves a function name.
    pub fn parse(name: &str) -> Result<Self, CustodyError> {
        Self::ALL
            .into_iter()
            .find(|op| op.name() == name)
            .ok_or_else(|| CustodyError::UnknownOperation(name.to_string()))
    }

    /// Function name on the invocation surface.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::CreateCar => "createCar",
            Self::DeliverToDealer => "deliverToDealer",
            Self::SaleToCustomer => "saleToCustomer",
            Self::QueryRecord => "queryRecord",
            Self::Delete => "del",
        }
    }

    /// Number of positional arguments.
    #[must_use]
    pub const fn arity(self) -> usize {
        match self {
            Self::CreateCar | Self::DeliverToDealer | Self::SaleToCustomer => 4,
            Self::QueryRecord | Self::Delete => 1,
        }
    }

    /// Fails with `ArgumentCount` unless `args` has exactly `arity()` entries.
    pub fn check_arity<T>(self, args: &[T]) -> Result<(), CustodyError> {
        if args.len() == self.arity() {
            Ok(())
        } else {
            Err(CustodyError::ArgumentCount {
                operation: self.name(),
                expected: self.arity(),
                actual: args.len(),
            })
        }
    }
}

// =============================================================================
// RESPONSE
// =============================================================================

/// Outcome of an invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponseStatus {
    /// The invocation succeeded.
    Ok,
    /// The invocation failed and wrote nothing.
    Error,
}

/// Structured result handed back to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationResponse {
    /// Success or failure.
    pub status: ResponseStatus,
    /// Stored record text on success (empty for `del`).
    #[serde(default)]
    pub payload: String,
    /// Human-readable error message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Error discriminator, e.g. `NotFoundError`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<String>,
}

impl InvocationResponse {
    /// Successful response carrying `payload`.
    #[must_use]
    pub fn success(payload: &[u8]) -> Self {
        Self {
            status: ResponseStatus::Ok,
            payload: String::from_utf8_lossy(payload).into_owned(),
            message: None,
            error_kind: None,
        }
    }

    /// Failed response for `err`.
    #[must_use]
    pub fn failure(err: &CustodyError) -> Self {
        Self::failure_with(err.kind(), err.to_string())
    }

    /// Failed response with an explicit kind, for failures raised by the host.
    #[must_use]
    pub fn failure_with(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Error,
            payload: String::new(),
            message: Some(message.into()),
            error_kind: Some(kind.as_str().to_string()),
        }
    }

    /// True on success.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == ResponseStatus::Ok
    }
}

impl From<Result<Vec<u8>, CustodyError>> for InvocationResponse {
    fn from(result: Result<Vec<u8>, CustodyError>) -> Self {
        match result {
            Ok(payload) => Self::success(&payload),
            Err(err) => Self::failure(&err),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
