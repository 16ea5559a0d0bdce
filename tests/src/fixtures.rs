//! # Test Fixtures
//!
//! A contract over a shared in-memory ledger with a controllable clock and
//! invoker organization.

use custody_lifecycle::prelude::*;

/// Default manufacturer organization.
pub const MFG_ORG: &str = "mfg-instance";
/// Default dealer organization.
pub const DEALER_ORG: &str = "dealer-instance";
/// 2024-01-02 03:04:05 UTC.
pub const BASE_SECONDS: i64 = 1_704_164_645;

/// Owned positional arguments.
pub fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

/// Decodes stored record bytes.
pub fn decode(bytes: &[u8]) -> CarEnvelope {
    CarEnvelope::decode(bytes).expect("stored bytes decode as a car record")
}

/// Contract, ledger and invoker for one test.
pub struct Fixture {
    pub ledger: InMemoryLedger,
    pub contract: CustodyContract,
    pub identity: StaticIdentity,
    clock: i64,
}

impl Default for Fixture {
    fn default() -> Self {
        Self::with_config(CustodyConfig::default())
    }
}

impl Fixture {
    pub fn with_config(config: CustodyConfig) -> Self {
        Self {
            ledger: InMemoryLedger::new(),
            contract: CustodyContract::new(config),
            identity: StaticIdentity::new(MFG_ORG),
            clock: 0,
        }
    }

    /// Subsequent invocations resolve to `org`.
    pub fn act_as(&mut self, org: &str) {
        self.identity = StaticIdentity::new(org);
    }

    /// Starts a transaction one second after the previous one.
    pub fn begin(&mut self) -> LedgerTransaction {
        self.clock += 1;
        self.ledger.begin(
            format!("tx-{}", self.clock),
            TxTimestamp::new(BASE_SECONDS + self.clock, 0),
        )
    }

    /// Runs an invocation inside `tx` without committing.
    pub fn invoke_in(
        &self,
        tx: &mut LedgerTransaction,
        function: &str,
        values: &[&str],
    ) -> Result<Vec<u8>, CustodyError> {
        let mut ctx = InvocationContext::new(tx, &self.identity);
        self.contract.invoke(&mut ctx, function, &args(values))
    }

    /// Runs an invocation in its own transaction, committing on success.
    pub fn invoke(&mut self, function: &str, values: &[&str]) -> Result<Vec<u8>, CustodyError> {
        let mut tx = self.begin();
        let payload = self.invoke_in(&mut tx, function, values)?;
        tx.commit()?;
        Ok(payload)
    }

    /// Creates a car as the manufacturer and returns its id.
    pub fn create_car(&mut self, chassis_number: &str) -> String {
        let bytes = self
            .invoke(
                "createCar",
                &[chassis_number, "ACME", "Springfield", "MANUFACTURER"],
            )
            .expect("createCar succeeds");
        decode(&bytes).payload.id.to_string()
    }
}
