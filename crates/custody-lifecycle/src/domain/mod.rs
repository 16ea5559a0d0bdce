//! # Domain Layer (Inner Hexagon)
//!
//! Pure custody logic: identity derivation, the asset record, the lifecycle
//! transitions and the record invariants. No ledger access, no logging.

pub mod entities;
pub mod identity;
pub mod invariants;
pub mod lifecycle;
pub mod value_objects;

pub use entities::*;
pub use identity::*;
pub use invariants::*;
pub use lifecycle::*;
pub use value_objects::*;
