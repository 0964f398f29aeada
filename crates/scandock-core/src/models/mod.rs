//! Data models for scandock
//!
//! `scan` holds everything one scan job needs; `autoscan` holds the process-wide
//! auto-scan toggle shared between the gateway and the supervisor.

mod autoscan;
mod scan;

pub use autoscan::*;
pub use scan::*;
