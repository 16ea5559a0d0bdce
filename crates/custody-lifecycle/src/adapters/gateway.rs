//! # Ledger Gateway
//!
//! The only path from the state machine to the ledger. Wraps the host's
//! `LedgerStub` and adds:
//! - envelope encoding and kind checking of car records
//! - insert-only creation (an existing key is a conflict, never overwritten)
//! - the optimistic revision check on replacement
//! - record invariant checks on every decoded value and every replacement
//! - the empty id, which no record can be stored under, is never looked up

use crate::domain::entities::{CarAsset, CarEnvelope, StoredAsset};
use crate::domain::invariants::{check_record_invariants, check_update_invariants};
use crate::domain::value_objects::AssetId;
use crate::errors::CustodyError;
use crate::ports::outbound::LedgerStub;
use shared_types::{EnvelopeHeader, LedgerError, TxTimestamp};
use tracing::debug;

/// Car-record view over a ledger stub.
pub struct LedgerGateway<'g, S: LedgerStub + ?Sized> {
    stub: &'g mut S,
}

impl<'g, S: LedgerStub + ?Sized> LedgerGateway<'g, S> {
    /// Wraps the stub of the current invocation.
    pub fn new(stub: &'g mut S) -> Self {
        Self { stub }
    }

    /// Ledger timestamp of the current transaction.
    pub fn timestamp(&self) -> Result<TxTimestamp, CustodyError> {
        Ok(self.stub.tx_timestamp()?)
    }

    /// Stored bytes of a record, without decoding.
    pub fn load_raw(&self, id: &AssetId) -> Result<Vec<u8>, CustodyError> {
        if id.as_str().is_empty() {
            return Err(CustodyError::NotFound(String::new()));
        }
        self.stub
            .get_state(id.as_str())?
            .ok_or_else(|| CustodyError::NotFound(id.to_string()))
    }

    /// Loads and decodes a car record.
    ///
    /// Values of another kind, values stored under a key other than their id,
    /// and values breaking a record invariant are refused.
    pub fn load(&self, id: &AssetId) -> Result<StoredAsset, CustodyError> {
        let bytes = self.load_raw(id)?;
        let envelope = CarEnvelope::decode(&bytes)?;

        if envelope.payload.id != *id {
            return Err(CustodyError::Serialization(format!(
                "record stored under {id} carries id {}",
                envelope.payload.id
            )));
        }
        check_record_invariants(&envelope.payload)
            .into_result()
            .map_err(|violation| {
                CustodyError::Serialization(format!("stored asset {id} is corrupt: {violation}"))
            })?;

        debug!(%id, revision = envelope.revision, status = %envelope.payload.status, "Loaded asset");
        Ok(StoredAsset { envelope, bytes })
    }

    /// Writes a new record at the initial revision.
    ///
    /// Fails with `Conflict` if anything is stored under the id.
    pub fn insert(&mut self, asset: CarAsset) -> Result<StoredAsset, CustodyError> {
        if self.stub.get_state(asset.id.as_str())?.is_some() {
            return Err(CustodyError::Conflict(asset.id.to_string()));
        }
        self.write(CarEnvelope::new(asset))
    }

    /// Replaces `previous` with `updated` at the next revision.
    ///
    /// Fails with `InvalidArgument` if the replacement breaks an invariant,
    /// and with `LedgerError::RevisionMismatch` if the stored revision is no
    /// longer the one `previous` was read at. Nothing is written on failure.
    pub fn replace(
        &mut self,
        previous: &StoredAsset,
        updated: CarAsset,
    ) -> Result<StoredAsset, CustodyError> {
        check_update_invariants(previous.asset(), &updated)
            .into_result()
            .map_err(|violation| CustodyError::InvalidArgument {
                operation: "replace asset",
                reason: format!("{}: {violation}", previous.asset().id),
            })?;

        let key = previous.asset().id.as_str();
        let observed = previous.revision();
        let current = match self.stub.get_state(key)? {
            Some(bytes) => EnvelopeHeader::peek(&bytes)?.revision,
            None => 0,
        };
        if current != observed {
            return Err(LedgerError::RevisionMismatch {
                key: key.to_string(),
                observed,
                current,
            }
            .into());
        }

        self.write(CarEnvelope::at_revision(updated, observed).next_revision())
    }

    /// Deletes a key unconditionally. The empty id holds nothing to delete.
    pub fn remove(&mut self, id: &AssetId) -> Result<(), CustodyError> {
        if id.as_str().is_empty() {
            return Ok(());
        }
        self.stub.delete_state(id.as_str())?;
        debug!(%id, "Deleted key");
        Ok(())
    }

    fn write(&mut self, envelope: CarEnvelope) -> Result<StoredAsset, CustodyError> {
        let bytes = envelope.encode()?;
        self.stub
            .put_state(envelope.payload.id.as_str(), bytes.clone())?;
        debug!(
            id = %envelope.payload.id,
            revision = envelope.revision,
            bytes = bytes.len(),
            "Wrote asset"
        );
        Ok(StoredAsset { envelope, bytes })
    }
}

// =============================================================================
// TESTS
// =============================================================================
