//! # Custody Lifecycle - Vehicle Custody Contract
//!
//! Tracks a vehicle from manufacture through dealer delivery to final sale as
//! one record in a transactional key-value ledger.
//!
//! ## Lifecycle
//!
//! ```text
//! createCar ──→ CREATED ──deliverToDealer──→ READY_FOR_SALE ──saleToCustomer──→ SOLD
//! ```
//!
//! Transitions are forward-only. `del` removes a record from any state.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Dealer set iff status is past CREATED | `domain/invariants.rs` - `check_dealer_invariant()` |
//! | Customer set iff status is SOLD | `domain/invariants.rs` - `check_customer_invariant()` |
//! | Status never moves backward | `domain/invariants.rs` - `check_forward_only_invariant()` |
//! | Creation facts never change | `domain/invariants.rs` - `check_immutable_fields_invariant()` |
//! | Id is the 62-char SHA-256 prefix | `domain/identity.rs` - `derive_id()` |
//!
//! ## Authorization
//!
//! | Function | Required Role Claim | Org (when enforced) |
//! |----------|--------------------|---------------------|
//! | `createCar` | `MANUFACTURER` | `CustodyConfig::manufacturer_org` |
//! | `deliverToDealer` | `DEALER` | `CustodyConfig::dealer_org` |
//! | `saleToCustomer` | `DEALER` | `CustodyConfig::dealer_org` |
//! | `queryRecord`, `del` | none | none |
//!
//! Role claims are asserted by the caller and are not bound to credentials.
//! Enable `CustodyConfig::enforce_org_identity` to tie them to the invoker's
//! organization.
//!
//! ## Outbound Dependencies
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | `LedgerStub` | Read/write/delete state, transaction timestamp and id |
//! | `IdentityResolver` | Invoker organization id |
//!
//! ## Usage Example
//!
//! ```ignore
//! use custody_lifecycle::prelude::*;
//!
//! let ledger = InMemoryLedger::new();
//! let identity = StaticIdentity::new("mfg-instance");
//! let contract = CustodyContract::new(CustodyConfig::default());
//!
//! let mut tx = ledger.begin("tx-1", TxTimestamp::now());
//! let mut ctx = InvocationContext::new(&mut tx, &identity);
//! let response = contract.handle(&mut ctx, "createCar", &args);
//! tx.commit()?;
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod domain;
pub mod errors;
pub mod invocation;
pub mod ports;
pub mod service;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Domain
    pub use crate::domain::entities::{CarAsset, CarEnvelope, StoredAsset, CAR_KIND};
    pub use crate::domain::identity::{derive_id, derive_id_from_text, ASSET_ID_LEN};
    pub use crate::domain::invariants::{
        check_record_invariants, check_update_invariants, InvariantCheckResult,
        InvariantViolation,
    };
    pub use crate::domain::lifecycle::Transition;
    pub use crate::domain::value_objects::{AssetId, AssetStatus, Role};

    // Ports
    pub use crate::ports::inbound::{
        CreateCarRequest, CustodyApi, InvocationContext, TransferRequest,
    };
    pub use crate::ports::outbound::{IdentityResolver, LedgerStub};

    // Adapters
    pub use crate::adapters::{
        CommitSummary, InMemoryLedger, LedgerGateway, LedgerTransaction, StaticIdentity,
    };

    // Invocation surface
    pub use crate::invocation::{InvocationResponse, Operation, ResponseStatus};

    // Errors
    pub use crate::errors::{CustodyError, ErrorKind};

    // Service
    pub use crate::service::{CustodyConfig, CustodyContract};

    // Shared ledger types
    pub use shared_types::{IdentityError, LedgerError, TxTimestamp};
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Contract name reported by hosts.
pub const CONTRACT_NAME: &str = "car-custody";

// =============================================================================
// TESTS
// =============================================================================
