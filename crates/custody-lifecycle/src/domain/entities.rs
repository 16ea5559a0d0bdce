//! # Core Domain Entities
//!
//! The asset record tracked by the custody contract.

use crate::domain::value_objects::{AssetId, AssetStatus};
use serde::{Deserialize, Serialize};
use shared_types::{EntityKind, StateEnvelope};

/// Kind tag of car records in the shared ledger.
pub const CAR_KIND: &str = "CAR";

/// A tracked vehicle.
///
/// `id`, `chassis_number`, `manufacturer` and `recorded_at` never change after
/// creation. `dealer`, `customer`, `address` and `status` are rewritten by the
/// lifecycle transitions only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarAsset {
    /// Derived primary key.
    pub id: AssetId,
    /// Manufacturing serial.
    pub chassis_number: String,
    /// Manufacturer name.
    pub manufacturer: String,
    /// Dealer holding the vehicle; empty until delivery.
    pub dealer: String,
    /// Buyer; empty until sale.
    pub customer: String,
    /// Current custody location.
    pub address: String,
    /// Lifecycle stage.
    pub status: AssetStatus,
    /// Ledger timestamp of creation, in text form.
    pub recorded_at: String,
}

impl CarAsset {
    /// Builds a freshly created record.
    #[must_use]
    pub fn created(
        id: AssetId,
        chassis_number: impl Into<String>,
        manufacturer: impl Into<String>,
        address: impl Into<String>,
        recorded_at: impl Into<String>,
    ) -> Self {
        Self {
            id,
            chassis_number: chassis_number.into(),
            manufacturer: manufacturer.into(),
            dealer: String::new(),
            customer: String::new(),
            address: address.into(),
            status: AssetStatus::Created,
            recorded_at: recorded_at.into(),
        }
    }
}

impl EntityKind for CarAsset {
    const KIND: &'static str = CAR_KIND;
}

/// A car record as stored, with its revision.
pub type CarEnvelope = StateEnvelope<CarAsset>;

/// A car record together with the exact bytes held by the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAsset {
    /// Decoded envelope.
    pub envelope: CarEnvelope,
    /// Stored bytes, byte-for-byte.
    pub bytes: Vec<u8>,
}

impl StoredAsset {
    /// The asset record.
    #[must_use]
    pub fn asset(&self) -> &CarAsset {
        &self.envelope.payload
    }

    /// Revision of the stored value.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.envelope.revision
    }

    /// Consumes the value, returning the stored bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

// =============================================================================
// TESTS
// =============================================================================
