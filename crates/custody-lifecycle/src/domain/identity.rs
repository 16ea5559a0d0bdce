//! # Asset Identity
//!
//! Deterministic asset key derivation. Pure function, no ledger access.

use crate::domain::value_objects::AssetId;
use sha2::{Digest, Sha256};
use shared_types::TxTimestamp;

/// Length of a derived asset id in hex characters. Protocol constant.
pub const ASSET_ID_LEN: usize = 62;

/// Derives the asset id from the creation facts.
///
/// id = hex(sha256(chassis_number ‖ manufacturer ‖ timestamp_text))\[..62\]
///
/// Retries of the same creation inside the same transaction produce the same
/// id; creations at different ledger instants produce different ids.
#[must_use]
pub fn derive_id(chassis_number: &str, manufacturer: &str, timestamp: &TxTimestamp) -> AssetId {
    derive_id_from_text(chassis_number, manufacturer, &timestamp.to_ledger_string())
}

/// Same as [`derive_id`] with the timestamp already rendered as text.
#[must_use]
pub fn derive_id_from_text(chassis_number: &str, manufacturer: &str, timestamp: &str) -> AssetId {
    let mut hasher = Sha256::new();
    hasher.update(chassis_number.as_bytes());
    hasher.update(manufacturer.as_bytes());
    hasher.update(timestamp.as_bytes());
    let mut encoded = hex::encode(hasher.finalize());
    encoded.truncate(ASSET_ID_LEN);
    AssetId::new(encoded)
}

// =============================================================================
// TESTS
// =============================================================================
