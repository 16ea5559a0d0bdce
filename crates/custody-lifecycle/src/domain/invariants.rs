//! # Domain Invariants
//!
//! Invariants every stored car record must satisfy. Checked on every record
//! read from the ledger and on every record about to be written, so a value
//! planted by another writer is refused rather than advanced.
//!
//! - INVARIANT-1: `dealer` is empty iff status is CREATED
//! - INVARIANT-2: `customer` is empty unless status is SOLD
//! - INVARIANT-3: status never moves backwards between two revisions
//! - INVARIANT-4: `id`, `chassisNumber`, `manufacturer`, `recordedAt` never change

use crate::domain::entities::CarAsset;
use crate::domain::value_objects::AssetStatus;

// =============================================================================
// INVARIANT CHECKS
// =============================================================================

/// INVARIANT-1: Dealer Presence
#[must_use]
pub fn check_dealer_invariant(asset: &CarAsset) -> bool {
    asset.dealer.is_empty() == (asset.status == AssetStatus::Created)
}

/// INVARIANT-2: Customer Presence
#[must_use]
pub fn check_customer_invariant(asset: &CarAsset) -> bool {
    asset.status == AssetStatus::Sold || asset.customer.is_empty()
}

/// INVARIANT-3: Forward-Only Status
#[must_use]
pub fn check_forward_only_invariant(before: &CarAsset, after: &CarAsset) -> bool {
    after.status >= before.status
}

/// INVARIANT-4: Immutable Creation Facts
#[must_use]
pub fn check_immutable_fields_invariant(before: &CarAsset, after: &CarAsset) -> bool {
    before.id == after.id
        && before.chassis_number == after.chassis_number
        && before.manufacturer == after.manufacturer
        && before.recorded_at == after.recorded_at
}

/// Checks the single-record invariants (1 and 2).
#[must_use]
pub fn check_record_invariants(asset: &CarAsset) -> InvariantCheckResult {
    let mut violations = Vec::new();

    if !check_dealer_invariant(asset) {
        violations.push(InvariantViolation::DealerPresence {
            status: asset.status,
        });
    }

    if !check_customer_invariant(asset) {
        violations.push(InvariantViolation::CustomerPresence {
            status: asset.status,
        });
    }

    InvariantCheckResult { violations }
}

/// Checks every invariant for a replacement of `before` by `after`.
#[must_use]
pub fn check_update_invariants(before: &CarAsset, after: &CarAsset) -> InvariantCheckResult {
    let mut result = check_record_invariants(after);

    if !check_forward_only_invariant(before, after) {
        result.violations.push(InvariantViolation::StatusRegressed {
            from: before.status,
            to: after.status,
        });
    }

    if !check_immutable_fields_invariant(before, after) {
        result.violations.push(InvariantViolation::CreationFactsChanged);
    }

    result
}

// =============================================================================
// RESULT TYPES
// =============================================================================

/// Result of an invariant check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvariantCheckResult {
    /// Violated invariants, empty when all hold.
    pub violations: Vec<InvariantViolation>,
}

impl InvariantCheckResult {
    /// True when no invariant is violated.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.violations.is_empty()
    }

    /// Converts into a `Result`, keeping the first violation.
    pub fn into_result(self) -> Result<(), InvariantViolation> {
        match self.violations.into_iter().next() {
            None => Ok(()),
            Some(violation) => Err(violation),
        }
    }
}

/// A violated invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// INVARIANT-1.
    DealerPresence { status: AssetStatus },
    /// INVARIANT-2.
    CustomerPresence { status: AssetStatus },
    /// INVARIANT-3.
    StatusRegressed { from: AssetStatus, to: AssetStatus },
    /// INVARIANT-4.
    CreationFactsChanged,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DealerPresence { status } => {
                write!(f, "dealer presence does not match status {status}")
            }
            Self::CustomerPresence { status } => {
                write!(f, "customer set while status is {status}")
            }
            Self::StatusRegressed { from, to } => write!(f, "status regressed from {from} to {to}"),
            Self::CreationFactsChanged => write!(f, "immutable creation fields changed"),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
