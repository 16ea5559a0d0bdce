//! # Custody Node Library
//!
//! Exposes the development host and its configuration for testing.
//! The main entry point is the `main.rs` binary.
//!
//! ## Wire Format
//!
//! One JSON request per stdin line:
//!
//! ```text
//! {"function":"createCar","args":["CH001","ACME","Springfield","MANUFACTURER"],"org":"mfg-instance"}
//! ```
//!
//! One `InvocationResponse` JSON per stdout line:
//!
//! ```text
//! {"status":"OK","payload":"{\"kind\":\"CAR\",\"revision\":1,...}"}
//! {"status":"ERROR","payload":"","message":"asset not found: x","errorKind":"NotFoundError"}
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod host;

pub use config::{ConfigError, IgnoredOverride, NodeConfig};
pub use host::{DevHost, HostRequest, HostStats};
