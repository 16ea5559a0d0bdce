//! # Adapters Layer (Outer Hexagon)
//!
//! - `gateway`: car-record gateway over any `LedgerStub`
//! - `memory_ledger`: in-memory transactional ledger and a fixed identity
//!   resolver, for tests and the development node

pub mod gateway;
pub mod memory_ledger;

pub use gateway::*;
pub use memory_ledger::*;
