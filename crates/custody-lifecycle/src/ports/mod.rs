//! # Ports Layer (Middle Hexagon)
//!
//! - **Driving Ports (Inbound)**: `CustodyApi`
//! - **Driven Ports (Outbound)**: `LedgerStub`, `IdentityResolver`

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
