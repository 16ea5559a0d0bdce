//! # Driven Ports (SPI - Outbound)
//!
//! Services the custody contract consumes from its host:
//! - the transactional key-value ledger (`LedgerStub`)
//! - invoker identity attestation (`IdentityResolver`)
//!
//! Hosts hand the contract one consistent view per invocation. Reads observe
//! the invocation's own writes, and the host commits or discards all writes
//! of the invocation together.

use shared_types::{IdentityError, LedgerError, TxTimestamp};

// =============================================================================
// LEDGER STUB
// =============================================================================

/// Per-invocation view of the key-value ledger.
pub trait LedgerStub {
    /// Reads a value. `None` if the key is absent.
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError>;

    /// Writes a value as part of the enclosing transaction.
    fn put_state(&mut self, key: &str, value: Vec<u8>) -> Result<(), LedgerError>;

    /// Deletes a key as part of the enclosing transaction. Absent keys are fine.
    fn delete_state(&mut self, key: &str) -> Result<(), LedgerError>;

    /// Ledger-agreed instant of the enclosing transaction.
    fn tx_timestamp(&self) -> Result<TxTimestamp, LedgerError>;

    /// Host transaction id, for log correlation only.
    fn tx_id(&self) -> &str;
}

// =============================================================================
// IDENTITY RESOLVER
// =============================================================================

/// Resolves the organization of the invoking client.
///
/// Authentication happens upstream; the result is an opaque org id
/// (e.g. `"mfg-instance"`).
pub trait IdentityResolver {
    /// Organization id of the invoker.
    fn resolve_invoker_org(&self) -> Result<String, IdentityError>;
}
