//! # `StateEnvelope` - Stored Value Wrapper
//!
//! The universal wrapper for every value a contract writes to the ledger.
//!
//! ## Properties
//!
//! - **Kind Tag**: `kind` discriminates entity types sharing one key space.
//!   Readers check the tag before touching the payload.
//! - **Revision**: starts at 1 on insert and increases by one per write. Writers
//!   compare the revision they observed against the stored one before
//!   replacing a value.
//! - **Flat Encoding**: the payload is flattened, so the stored JSON is a single
//!   self-describing object that external tooling can read without a schema.

use crate::errors::EnvelopeError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// An entity type that can live inside a [`StateEnvelope`].
pub trait EntityKind {
    /// The tag written to the `kind` field.
    const KIND: &'static str;
}

/// Header fields of a stored envelope, decodable without knowing the payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopeHeader {
    /// Entity kind tag.
    pub kind: String,
    /// Revision of the stored value.
    pub revision: u64,
}

impl EnvelopeHeader {
    /// Reads only the header of a stored value.
    pub fn peek(bytes: &[u8]) -> Result<Self, EnvelopeError> {
        serde_json::from_slice(bytes).map_err(|e| EnvelopeError::Malformed(e.to_string()))
    }
}

/// A typed, revisioned value as stored in the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateEnvelope<T> {
    /// Entity kind tag (`T::KIND`).
    pub kind: String,
    /// Revision of this value.
    pub revision: u64,
    /// The entity itself, flattened next to the header.
    #[serde(flatten)]
    pub payload: T,
}

impl<T: EntityKind> StateEnvelope<T> {
    /// Revision assigned to a freshly inserted value.
    pub const INITIAL_REVISION: u64 = 1;

    /// Wraps a new entity at the initial revision.
    #[must_use]
    pub fn new(payload: T) -> Self {
        Self::at_revision(payload, Self::INITIAL_REVISION)
    }

    /// Wraps an entity at an explicit revision.
    #[must_use]
    pub fn at_revision(payload: T, revision: u64) -> Self {
        Self {
            kind: T::KIND.to_string(),
            revision,
            payload,
        }
    }

    /// Returns the envelope for the next write of the same entity.
    #[must_use]
    pub fn next_revision(self) -> Self {
        let revision = self.revision + 1;
        Self { revision, ..self }
    }
}

impl<T: EntityKind + Serialize> StateEnvelope<T> {
    /// Encodes the envelope as flat JSON bytes.
    pub fn encode(&self) -> Result<Vec<u8>, EnvelopeError> {
        serde_json::to_vec(self).map_err(|e| EnvelopeError::Malformed(e.to_string()))
    }
}

impl<T: EntityKind + DeserializeOwned> StateEnvelope<T> {
    /// Decodes stored bytes, refusing values of another kind.
    pub fn decode(bytes: &[u8]) -> Result<Self, EnvelopeError> {
        let header = EnvelopeHeader::peek(bytes)?;
        if header.kind != T::KIND {
            return Err(EnvelopeError::KindMismatch {
                expected: T::KIND,
                found: header.kind,
            });
        }
        serde_json::from_slice(bytes).map_err(|e| EnvelopeError::Malformed(e.to_string()))
    }
}

// =============================================================================
// TESTS
// =============================================================================
