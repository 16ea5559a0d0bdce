//! # Integration Tests
//!
//! - `flows`: lifecycle scenarios through the contract and the development host
//! - `concurrency`: optimistic concurrency between transactions

mod concurrency;
mod flows;
