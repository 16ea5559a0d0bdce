//! # Value Objects
//!
//! Closed vocabularies of the custody domain. Roles and statuses are enums
//! with fixed wire names, so an unknown role or status can never reach the
//! state machine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// ASSET ID
// =============================================================================

/// Primary key of an asset record (62 lowercase hex characters when derived).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(String);

impl AssetId {
    /// Wraps an id received from a caller. No format check: lookups of
    /// malformed ids simply find nothing.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as the ledger key.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AssetId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

// =============================================================================
// ROLE
// =============================================================================

/// Organizational role asserted by the caller.
///
/// Role claims are caller-asserted strings and not cryptographically bound to
/// the invoker. The organization check in `CustodyConfig` is the second layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Builds and registers vehicles.
    Manufacturer,
    /// Receives vehicles and sells them.
    Dealer,
    /// Final owner.
    Customer,
}

impl Role {
    /// Wire name of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Manufacturer => "MANUFACTURER",
            Self::Dealer => "DEALER",
            Self::Customer => "CUSTOMER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognised role claim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MANUFACTURER" => Ok(Self::Manufacturer),
            "DEALER" => Ok(Self::Dealer),
            "CUSTOMER" => Ok(Self::Customer),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

// =============================================================================
// ASSET STATUS
// =============================================================================

/// Lifecycle stage of an asset. Only ever advances in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetStatus {
    /// Registered by the manufacturer.
    Created,
    /// Delivered to a dealer.
    ReadyForSale,
    /// Sold to a customer. Terminal.
    Sold,
}

impl AssetStatus {
    /// Wire name of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "CREATED",
            Self::ReadyForSale => "READY_FOR_SALE",
            Self::Sold => "SOLD",
        }
    }

    /// True when no transition leaves this status.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Sold)
    }
}

impl fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// TESTS
// =============================================================================
