//! # Ledger Entities
//!
//! Host-provided values consumed by contracts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The ledger-agreed instant of the enclosing transaction.
///
/// Every peer executing the same transaction sees the same value, so it is
/// safe to feed into deterministic key derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TxTimestamp {
    /// Seconds since the Unix epoch.
    pub seconds: i64,
    /// Sub-second nanoseconds (0..1_000_000_000).
    pub nanos: u32,
}

impl TxTimestamp {
    /// Creates a timestamp from its raw parts.
    #[must_use]
    pub const fn new(seconds: i64, nanos: u32) -> Self {
        Self { seconds, nanos }
    }

    /// Current wall-clock time. Only hosts should call this.
    #[must_use]
    pub fn now() -> Self {
        let now = Utc::now();
        Self {
            seconds: now.timestamp(),
            nanos: now.timestamp_subsec_nanos(),
        }
    }

    /// Text form stored in records and fed into id derivation.
    #[must_use]
    pub fn to_ledger_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TxTimestamp {
    /// `YYYY-MM-DD HH:MM:SS[.fraction] +0000 UTC`. The fraction is the
    /// nanoseconds with trailing zeros trimmed, omitted when zero.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match DateTime::<Utc>::from_timestamp(self.seconds, self.nanos) {
            Some(instant) => write!(f, "{}", instant.format("%Y-%m-%d %H:%M:%S"))?,
            // Out of chrono's range; still deterministic.
            None => write!(f, "{}", self.seconds)?,
        }
        if self.nanos != 0 {
            let digits = format!("{:09}", self.nanos);
            write!(f, ".{}", digits.trim_end_matches('0'))?;
        }
        f.write_str(" +0000 UTC")
    }
}

// =============================================================================
// TESTS
// =============================================================================
