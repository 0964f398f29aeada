//! scandock HTTP gateway
//!
//! Exposes manual scans and the auto-scan toggle over HTTP. The binary in
//! `main.rs` wires configuration, telemetry, the supervisor and the server.

pub mod error;
pub mod handlers;
pub mod setup;
pub mod state;
