//! # Development Host
//!
//! Runs each request in its own transaction over a shared `InMemoryLedger`:
//! a fresh transaction id, the current wall-clock timestamp and a fixed
//! invoker organization. Successful invocations are committed; failed ones
//! are dropped, so a failure never writes.

use custody_lifecycle::prelude::*;
use parking_lot::RwLock;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

/// One invocation as read from the wire.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HostRequest {
    /// Function name.
    pub function: String,
    /// Positional arguments.
    #[serde(default)]
    pub args: Vec<String>,
    /// Invoker organization. Defaults to the manufacturer org.
    #[serde(default)]
    pub org: Option<String>,
}

/// Host counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostStats {
    /// Requests received, including malformed ones.
    pub requests: u64,
    /// Transactions committed.
    pub committed: u64,
    /// Requests that failed.
    pub failed: u64,
    /// Commits refused by the ledger.
    pub commit_conflicts: u64,
}

/// In-process host for the custody contract.
#[derive(Debug, Clone)]
pub struct DevHost {
    ledger: InMemoryLedger,
    contract: CustodyContract,
    stats: Arc<RwLock<HostStats>>,
}

impl DevHost {
    /// Creates a host over an empty ledger and runs the contract's init hook.
    pub fn new(config: CustodyConfig) -> Result<Self, CustodyError> {
        Self::with_ledger(InMemoryLedger::new(), config)
    }

    /// Creates a host over an existing ledger.
    pub fn with_ledger(ledger: InMemoryLedger, config: CustodyConfig) -> Result<Self, CustodyError> {
        let contract = CustodyContract::new(config);
        contract.init()?;
        Ok(Self {
            ledger,
            contract,
            stats: Arc::new(RwLock::new(HostStats::default())),
        })
    }

    /// The backing ledger.
    #[must_use]
    pub fn ledger(&self) -> &InMemoryLedger {
        &self.ledger
    }

    /// Current counters.
    #[must_use]
    pub fn stats(&self) -> HostStats {
        self.stats.read().clone()
    }

    /// Parses and executes one JSON request line.
    pub fn execute_line(&self, line: &str) -> InvocationResponse {
        match serde_json::from_str::<HostRequest>(line) {
            Ok(request) => self.execute(&request),
            Err(err) => {
                warn!(error = %err, "Malformed request line");
                let mut stats = self.stats.write();
                stats.requests += 1;
                stats.failed += 1;
                InvocationResponse::failure_with(
                    ErrorKind::Serialization,
                    format!("malformed request: {err}"),
                )
            }
        }
    }

    /// Executes one request in a fresh transaction.
    pub fn execute(&self, request: &HostRequest) -> InvocationResponse {
        self.execute_at(request, TxTimestamp::now())
    }

    /// Executes one request with an explicit ledger timestamp.
    pub fn execute_at(&self, request: &HostRequest, timestamp: TxTimestamp) -> InvocationResponse {
        let org = request
            .org
            .clone()
            .unwrap_or_else(|| self.contract.config().manufacturer_org.clone());
        let identity = StaticIdentity::new(org);
        let mut tx = self.ledger.begin(Uuid::new_v4().to_string(), timestamp);

        let response = {
            let mut ctx = InvocationContext::new(&mut tx, &identity);
            self.contract
                .handle(&mut ctx, &request.function, &request.args)
        };

        let mut stats = self.stats.write();
        stats.requests += 1;
        if !response.is_ok() {
            stats.failed += 1;
            return response;
        }

        match tx.commit() {
            Ok(summary) => {
                stats.committed += 1;
                debug!(tx_id = %summary.tx_id, writes = summary.writes, "Transaction committed");
                response
            }
            Err(err) => {
                stats.failed += 1;
                stats.commit_conflicts += 1;
                warn!(function = %request.function, error = %err, "Commit rejected");
                InvocationResponse::failure(&CustodyError::Store(err))
            }
        }
    }
}
