//! # Driving Ports (API - Inbound)
//!
//! The typed API of the custody contract. The positional-string dispatcher in
//! `service.rs` parses invocations into these requests.

use crate::domain::entities::StoredAsset;
use crate::domain::value_objects::AssetId;
use crate::errors::CustodyError;
use crate::ports::outbound::{IdentityResolver, LedgerStub};

// =============================================================================
// INVOCATION CONTEXT
// =============================================================================

/// Host-provided services for one invocation.
pub struct InvocationContext<'a> {
    /// Ledger view of the enclosing transaction.
    pub stub: &'a mut dyn LedgerStub,
    /// Invoker identity.
    pub identity: &'a dyn IdentityResolver,
}

impl<'a> InvocationContext<'a> {
    /// Bundles the host services of one invocation.
    pub fn new(stub: &'a mut dyn LedgerStub, identity: &'a dyn IdentityResolver) -> Self {
        Self { stub, identity }
    }

    /// Host transaction id.
    #[must_use]
    pub fn tx_id(&self) -> &str {
        self.stub.tx_id()
    }
}

// =============================================================================
// REQUESTS
// =============================================================================

/// `createCar(chassisNumber, manufacturer, address, roleClaim)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCarRequest {
    /// Manufacturing serial.
    pub chassis_number: String,
    /// Manufacturer name.
    pub manufacturer: String,
    /// Initial custody location.
    pub address: String,
    /// Role asserted by the caller.
    pub role_claim: String,
}

/// `deliverToDealer(id, dealer, address, roleClaim)` and
/// `saleToCustomer(id, customer, address, roleClaim)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    /// Asset to move.
    pub id: AssetId,
    /// Receiving dealer or customer.
    pub party: String,
    /// New custody location.
    pub address: String,
    /// Role asserted by the caller.
    pub role_claim: String,
}

// =============================================================================
// CUSTODY API
// =============================================================================

/// Operations of the custody contract.
///
/// Mutating operations write at most once. A returned error means nothing was
/// written by the operation.
pub trait CustodyApi {
    /// Registers a new vehicle. Requires role MANUFACTURER.
    fn create_car(
        &self,
        ctx: &mut InvocationContext<'_>,
        request: &CreateCarRequest,
    ) -> Result<StoredAsset, CustodyError>;

    /// CREATED → READY_FOR_SALE. Requires role DEALER.
    fn deliver_to_dealer(
        &self,
        ctx: &mut InvocationContext<'_>,
        request: &TransferRequest,
    ) -> Result<StoredAsset, CustodyError>;

    /// READY_FOR_SALE → SOLD. Requires role DEALER.
    fn sale_to_customer(
        &self,
        ctx: &mut InvocationContext<'_>,
        request: &TransferRequest,
    ) -> Result<StoredAsset, CustodyError>;

    /// Returns the stored bytes of a record, unmodified.
    fn query_record(
        &self,
        ctx: &mut InvocationContext<'_>,
        id: &AssetId,
    ) -> Result<Vec<u8>, CustodyError>;

    /// Administrative removal. No existence or lifecycle check.
    fn delete_record(
        &self,
        ctx: &mut InvocationContext<'_>,
        id: &AssetId,
    ) -> Result<(), CustodyError>;
}
