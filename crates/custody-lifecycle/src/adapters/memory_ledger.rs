//! # In-Memory Ledger
//!
//! Transactional key-value ledger for tests and the development node.
//! Production hosts provide their own `LedgerStub`.
//!
//! Each invocation runs in a `LedgerTransaction`:
//! - reads see the transaction's own buffered writes first
//! - every key read records the version it observed (absent keys: version 0)
//! - writes and deletes are buffered until `commit`
//! - `commit` fails with `MvccReadConflict` if any observed version moved,
//!   otherwise applies all writes at once
//!
//! Dropping a transaction without committing discards it.

use crate::ports::outbound::{IdentityResolver, LedgerStub};
use parking_lot::RwLock;
use shared_types::{IdentityError, LedgerError, TxTimestamp};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// A versioned slot. Deletion keeps the slot so its version keeps counting.
#[derive(Debug, Clone, Default)]
struct Slot {
    version: u64,
    value: Option<Vec<u8>>,
}

/// Shared in-memory ledger. Clones share the same state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedger {
    slots: Arc<RwLock<HashMap<String, Slot>>>,
}

impl InMemoryLedger {
    /// Create a new empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a transaction with the given host id and timestamp.
    #[must_use]
    pub fn begin(&self, tx_id: impl Into<String>, timestamp: TxTimestamp) -> LedgerTransaction {
        LedgerTransaction {
            ledger: self.clone(),
            tx_id: tx_id.into(),
            timestamp: Some(timestamp),
            read_set: RwLock::new(BTreeMap::new()),
            write_set: BTreeMap::new(),
        }
    }

    /// Committed value of a key.
    #[must_use]
    pub fn snapshot(&self, key: &str) -> Option<Vec<u8>> {
        self.slots.read().get(key).and_then(|slot| slot.value.clone())
    }

    /// Committed version of a key (0 if never written).
    #[must_use]
    pub fn version(&self, key: &str) -> u64 {
        self.slots.read().get(key).map_or(0, |slot| slot.version)
    }

    /// Number of live keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots
            .read()
            .values()
            .filter(|slot| slot.value.is_some())
            .count()
    }

    /// True when no key holds a value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Summary of a committed transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitSummary {
    /// Host transaction id.
    pub tx_id: String,
    /// Keys written or deleted.
    pub writes: usize,
}

/// One invocation's view of an `InMemoryLedger`.
#[derive(Debug)]
pub struct LedgerTransaction {
    ledger: InMemoryLedger,
    tx_id: String,
    timestamp: Option<TxTimestamp>,
    // Interior mutability: reads go through `&self` on the stub.
    read_set: RwLock<BTreeMap<String, u64>>,
    write_set: BTreeMap<String, Option<Vec<u8>>>,
}

impl LedgerTransaction {
    /// Simulates a host that cannot provide a timestamp.
    #[must_use]
    pub fn without_timestamp(mut self) -> Self {
        self.timestamp = None;
        self
    }

    /// True when the transaction buffered no writes.
    #[must_use]
    pub fn is_read_only(&self) -> bool {
        self.write_set.is_empty()
    }

    /// Validates the read set and applies the write set atomically.
    pub fn commit(self) -> Result<CommitSummary, LedgerError> {
        let mut slots = self.ledger.slots.write();

        for (key, observed) in self.read_set.read().iter() {
            let current = slots.get(key).map_or(0, |slot| slot.version);
            if current != *observed {
                return Err(LedgerError::MvccReadConflict { key: key.clone() });
            }
        }

        let writes = self.write_set.len();
        for (key, value) in self.write_set {
            let slot = slots.entry(key).or_default();
            slot.version += 1;
            slot.value = value;
        }

        Ok(CommitSummary {
            tx_id: self.tx_id,
            writes,
        })
    }
}

impl LedgerStub for LedgerTransaction {
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        if let Some(buffered) = self.write_set.get(key) {
            return Ok(buffered.clone());
        }

        let (version, value) = {
            let slots = self.ledger.slots.read();
            slots
                .get(key)
                .map_or((0, None), |slot| (slot.version, slot.value.clone()))
        };
        self.read_set
            .write()
            .entry(key.to_string())
            .or_insert(version);
        Ok(value)
    }

    fn put_state(&mut self, key: &str, value: Vec<u8>) -> Result<(), LedgerError> {
        if key.is_empty() {
            return Err(LedgerError::Backend("empty key".to_string()));
        }
        self.write_set.insert(key.to_string(), Some(value));
        Ok(())
    }

    fn delete_state(&mut self, key: &str) -> Result<(), LedgerError> {
        if key.is_empty() {
            return Err(LedgerError::Backend("empty key".to_string()));
        }
        self.write_set.insert(key.to_string(), None);
        Ok(())
    }

    fn tx_timestamp(&self) -> Result<TxTimestamp, LedgerError> {
        self.timestamp.ok_or(LedgerError::TimestampUnavailable)
    }

    fn tx_id(&self) -> &str {
        &self.tx_id
    }
}

// =============================================================================
// STATIC IDENTITY
// =============================================================================

/// Identity resolver returning a fixed organization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticIdentity {
    org: Option<String>,
}

impl StaticIdentity {
    /// Resolves every invoker to `org`.
    #[must_use]
    pub fn new(org: impl Into<String>) -> Self {
        Self {
            org: Some(org.into()),
        }
    }

    /// Fails every resolution.
    #[must_use]
    pub fn unresolvable() -> Self {
        Self { org: None }
    }
}

impl IdentityResolver for StaticIdentity {
    fn resolve_invoker_org(&self) -> Result<String, IdentityError> {
        self.org
            .clone()
            .ok_or_else(|| IdentityError::Unresolvable("no client certificate".to_string()))
    }
}

// =============================================================================
// TESTS
// =============================================================================
