//! # Shared Types Crate
//!
//! Types shared between the custody contract, the ledger hosts that run it
//! and the integration suite.
//!
//! ## Design Principles
//!
//! - **Typed Envelope**: Every value written to the shared ledger is a
//!   `StateEnvelope<T>`, a kind tag and a revision next to the flattened
//!   entity fields. Several entity kinds can share one key space while each
//!   reader only decodes its own kind.
//! - **Opaque Host Inputs**: The transaction timestamp and the invoker's
//!   organization are produced by the host and only consumed here.

pub mod entities;
pub mod envelope;
pub mod errors;

pub use entities::*;
pub use envelope::{EntityKind, EnvelopeHeader, StateEnvelope};
pub use errors::*;
