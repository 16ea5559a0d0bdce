//! # Custody Contract Service
//!
//! Dispatches named invocations with positional string arguments to the
//! lifecycle operations, and implements those operations over the ledger
//! gateway.
//!
//! ## Authorization
//!
//! Two layers, checked in order before any ledger read:
//! 1. The caller's role claim must be the role the operation requires. Role
//!    claims are caller-asserted and not bound to the invoker's credentials.
//! 2. The invoker's organization is always resolved and logged. When
//!    `CustodyConfig::enforce_org_identity` is set it must also match the org
//!    configured for the required role.

use crate::adapters::gateway::LedgerGateway;
use crate::domain::entities::{CarAsset, StoredAsset};
use crate::domain::identity::derive_id_from_text;
use crate::domain::lifecycle::Transition;
use crate::domain::value_objects::{AssetId, Role};
use crate::errors::CustodyError;
use crate::invocation::{InvocationResponse, Operation};
use crate::ports::inbound::{CreateCarRequest, CustodyApi, InvocationContext, TransferRequest};
use tracing::{debug, info, info_span, warn};

/// Default organization id of manufacturer invokers.
pub const DEFAULT_MANUFACTURER_ORG: &str = "mfg-instance";

/// Default organization id of dealer invokers.
pub const DEFAULT_DEALER_ORG: &str = "dealer-instance";

/// Custody contract configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustodyConfig {
    /// Require the invoker's organization to match the role's organization.
    pub enforce_org_identity: bool,
    /// Organization allowed to act as MANUFACTURER.
    pub manufacturer_org: String,
    /// Organization allowed to act as DEALER.
    pub dealer_org: String,
}

impl Default for CustodyConfig {
    fn default() -> Self {
        Self {
            enforce_org_identity: false,
            manufacturer_org: DEFAULT_MANUFACTURER_ORG.to_string(),
            dealer_org: DEFAULT_DEALER_ORG.to_string(),
        }
    }
}

impl CustodyConfig {
    /// Organization expected for `role`, if any.
    #[must_use]
    pub fn expected_org(&self, role: Role) -> Option<&str> {
        match role {
            Role::Manufacturer => Some(&self.manufacturer_org),
            Role::Dealer => Some(&self.dealer_org),
            Role::Customer => None,
        }
    }
}

/// The custody contract.
#[derive(Debug, Clone, Default)]
pub struct CustodyContract {
    config: CustodyConfig,
}

impl CustodyContract {
    /// Create a contract with the given configuration.
    #[must_use]
    pub fn new(config: CustodyConfig) -> Self {
        Self { config }
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> &CustodyConfig {
        &self.config
    }

    /// Instantiation hook. Writes nothing.
    pub fn init(&self) -> Result<Vec<u8>, CustodyError> {
        info!(
            enforce_org_identity = self.config.enforce_org_identity,
            "Custody contract initialized"
        );
        Ok(Vec::new())
    }

    /// Entry point for hosts: runs `function` with positional `args`.
    ///
    /// Returns the stored record bytes for create, deliver, sale and query,
    /// and an empty payload for `del`.
    pub fn invoke(
        &self,
        ctx: &mut InvocationContext<'_>,
        function: &str,
        args: &[String],
    ) -> Result<Vec<u8>, CustodyError> {
        let span = info_span!("invoke", function, tx_id = %ctx.tx_id());
        let _entered = span.enter();
        debug!(args = args.len(), "Invoke is running");

        let operation = Operation::parse(function).map_err(|err| {
            warn!("Invoke did not find function");
            err
        })?;
        operation.check_arity(args)?;

        match operation {
            Operation::CreateCar => {
                let request = CreateCarRequest {
                    chassis_number: args[0].clone(),
                    manufacturer: args[1].clone(),
                    address: args[2].clone(),
                    role_claim: args[3].clone(),
                };
                self.create_car(ctx, &request).map(StoredAsset::into_bytes)
            }
            Operation::DeliverToDealer => self
                .deliver_to_dealer(ctx, &transfer_request(args))
                .map(StoredAsset::into_bytes),
            Operation::SaleToCustomer => self
                .sale_to_customer(ctx, &transfer_request(args))
                .map(StoredAsset::into_bytes),
            Operation::QueryRecord => self.query_record(ctx, &AssetId::new(args[0].as_str())),
            Operation::Delete => self
                .delete_record(ctx, &AssetId::new(args[0].as_str()))
                .map(|()| Vec::new()),
        }
    }

    /// Same as [`invoke`](Self::invoke), folded into a structured response.
    pub fn handle(
        &self,
        ctx: &mut InvocationContext<'_>,
        function: &str,
        args: &[String],
    ) -> InvocationResponse {
        self.invoke(ctx, function, args).into()
    }

    /// Checks the role claim, resolves the invoker and, if configured, its
    /// organization. Returns the resolved organization.
    fn authorize(
        &self,
        ctx: &InvocationContext<'_>,
        operation: &'static str,
        required: Role,
        claim: &str,
    ) -> Result<String, CustodyError> {
        if claim.parse::<Role>().ok() != Some(required) {
            warn!(operation, claim, required = %required, "Role claim rejected");
            return Err(CustodyError::role_mismatch(operation, required, claim));
        }

        let org = ctx.identity.resolve_invoker_org().map_err(|err| {
            warn!(operation, error = %err, "Invoker identity unavailable");
            CustodyError::from(err)
        })?;
        debug!(%org, "Resolved invoker organization");

        if self.config.enforce_org_identity {
            if let Some(expected) = self.config.expected_org(required) {
                if org != expected {
                    warn!(operation, %org, expected, "Invoker organization rejected");
                    return Err(CustodyError::org_mismatch(operation, expected, &org));
                }
            }
        }

        Ok(org)
    }

    fn transfer(
        &self,
        ctx: &mut InvocationContext<'_>,
        transition: Transition,
        request: &TransferRequest,
    ) -> Result<StoredAsset, CustodyError> {
        let org = self.authorize(
            ctx,
            transition.operation(),
            transition.required_role(),
            &request.role_claim,
        )?;

        let mut gateway = LedgerGateway::new(&mut *ctx.stub);
        let stored = gateway.load(&request.id)?;

        let mut asset = stored.asset().clone();
        if let Err(err) = transition.apply(&mut asset, &request.party, &request.address) {
            warn!(id = %request.id, from = %stored.asset().status, error = %err, "Transition rejected");
            return Err(err);
        }

        let updated = gateway.replace(&stored, asset)?;
        info!(
            id = %request.id,
            status = %updated.asset().status,
            revision = updated.revision(),
            %org,
            "Car asset updated"
        );
        Ok(updated)
    }
}

fn transfer_request(args: &[String]) -> TransferRequest {
    TransferRequest {
        id: AssetId::new(args[0].as_str()),
        party: args[1].clone(),
        address: args[2].clone(),
        role_claim: args[3].clone(),
    }
}

impl CustodyApi for CustodyContract {
    fn create_car(
        &self,
        ctx: &mut InvocationContext<'_>,
        request: &CreateCarRequest,
    ) -> Result<StoredAsset, CustodyError> {
        let org = self.authorize(
            ctx,
            Operation::CreateCar.name(),
            Role::Manufacturer,
            &request.role_claim,
        )?;

        let mut gateway = LedgerGateway::new(&mut *ctx.stub);
        let recorded_at = gateway.timestamp()?.to_ledger_string();
        let id = derive_id_from_text(&request.chassis_number, &request.manufacturer, &recorded_at);

        let asset = CarAsset::created(
            id,
            request.chassis_number.as_str(),
            request.manufacturer.as_str(),
            request.address.as_str(),
            recorded_at,
        );
        let stored = gateway.insert(asset).map_err(|err| {
            if let CustodyError::Conflict(id) = &err {
                warn!(%id, "Derived id already in use");
            }
            err
        })?;

        info!(
            id = %stored.asset().id,
            chassis_number = %request.chassis_number,
            %org,
            "Car asset created"
        );
        Ok(stored)
    }

    fn deliver_to_dealer(
        &self,
        ctx: &mut InvocationContext<'_>,
        request: &TransferRequest,
    ) -> Result<StoredAsset, CustodyError> {
        self.transfer(ctx, Transition::DeliverToDealer, request)
    }

    fn sale_to_customer(
        &self,
        ctx: &mut InvocationContext<'_>,
        request: &TransferRequest,
    ) -> Result<StoredAsset, CustodyError> {
        self.transfer(ctx, Transition::SaleToCustomer, request)
    }

    fn query_record(
        &self,
        ctx: &mut InvocationContext<'_>,
        id: &AssetId,
    ) -> Result<Vec<u8>, CustodyError> {
        let bytes = LedgerGateway::new(&mut *ctx.stub).load_raw(id)?;
        debug!(%id, bytes = bytes.len(), "Record queried");
        Ok(bytes)
    }

    fn delete_record(
        &self,
        ctx: &mut InvocationContext<'_>,
        id: &AssetId,
    ) -> Result<(), CustodyError> {
        LedgerGateway::new(&mut *ctx.stub).remove(id)?;
        info!(%id, "Record deleted");
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
