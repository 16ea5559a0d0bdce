//! # Lifecycle State Machine
//!
//! ```text
//! CREATED --deliverToDealer--> READY_FOR_SALE --saleToCustomer--> SOLD
//! ```
//!
//! No transition leaves SOLD. Administrative deletion is out of band and not
//! modelled here.

use crate::domain::entities::CarAsset;
use crate::domain::invariants::check_update_invariants;
use crate::domain::value_objects::{AssetStatus, Role};
use crate::errors::CustodyError;

/// A mutation of an existing asset record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    /// Manufacturer hands the vehicle to a dealer.
    DeliverToDealer,
    /// Dealer sells the vehicle to a customer.
    SaleToCustomer,
}

impl Transition {
    /// Function name of the transition on the invocation surface.
    #[must_use]
    pub const fn operation(self) -> &'static str {
        match self {
            Self::DeliverToDealer => "deliverToDealer",
            Self::SaleToCustomer => "saleToCustomer",
        }
    }

    /// Role claim the caller must present.
    #[must_use]
    pub const fn required_role(self) -> Role {
        match self {
            Self::DeliverToDealer | Self::SaleToCustomer => Role::Dealer,
        }
    }

    /// Status after the transition.
    #[must_use]
    pub const fn target(self) -> AssetStatus {
        match self {
            Self::DeliverToDealer => AssetStatus::ReadyForSale,
            Self::SaleToCustomer => AssetStatus::Sold,
        }
    }

    /// Record field the transition's party is written to.
    #[must_use]
    pub const fn party_field(self) -> &'static str {
        match self {
            Self::DeliverToDealer => "dealer",
            Self::SaleToCustomer => "customer",
        }
    }

    /// Returns true if the transition may start from `from`.
    #[must_use]
    pub const fn allowed_from(self, from: AssetStatus) -> bool {
        match (self, from) {
            (Self::DeliverToDealer, AssetStatus::Created)
            | (Self::SaleToCustomer, AssetStatus::ReadyForSale) => true,
            (Self::DeliverToDealer, AssetStatus::ReadyForSale | AssetStatus::Sold)
            | (Self::SaleToCustomer, AssetStatus::Created | AssetStatus::Sold) => false,
        }
    }

    /// Applies the transition to `asset`.
    ///
    /// `party` becomes the dealer or the customer and must not be blank;
    /// `address` replaces the custody location and may be empty. The record
    /// is left untouched on error.
    pub fn apply(self, asset: &mut CarAsset, party: &str, address: &str) -> Result<(), CustodyError> {
        if !self.allowed_from(asset.status) {
            return Err(CustodyError::InvalidTransition {
                id: asset.id.to_string(),
                from: asset.status,
                operation: self.operation(),
            });
        }
        if party.trim().is_empty() {
            return Err(CustodyError::InvalidArgument {
                operation: self.operation(),
                reason: format!("{} must not be empty", self.party_field()),
            });
        }

        let mut next = asset.clone();
        match self {
            Self::DeliverToDealer => next.dealer = party.to_string(),
            Self::SaleToCustomer => next.customer = party.to_string(),
        }
        next.address = address.to_string();
        next.status = self.target();

        check_update_invariants(asset, &next)
            .into_result()
            .map_err(|violation| CustodyError::InvalidArgument {
                operation: self.operation(),
                reason: violation.to_string(),
            })?;

        *asset = next;
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
