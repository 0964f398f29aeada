//! Background workers for scandock.
//!
//! Shutdown: [`AutoScanHandle::shutdown`] signals the supervisor and waits for its
//! task to end. A scan that is already running finishes first.

pub mod autoscan;

pub use autoscan::{AutoScanHandle, AutoScanSupervisor, Debouncer, TickOutcome};
