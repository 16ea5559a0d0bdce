//! # Custody Test Suite
//!
//! Cross-crate tests for the custody contract.
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/
//! │   └── custody_benchmarks.rs  # id derivation, full lifecycle
//! └── src/
//!     ├── fixtures.rs            # shared ledger/contract harness
//!     └── integration/
//!         ├── flows.rs           # end-to-end lifecycle through contract and host
//!         └── concurrency.rs     # competing transactions on one record
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p custody-tests
//! cargo test -p custody-tests integration::concurrency
//!
//! # Benchmarks
//! cargo bench -p custody-tests
//! ```

#![allow(dead_code)]

pub mod fixtures;
pub mod integration;
