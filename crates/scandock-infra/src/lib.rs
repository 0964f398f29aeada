//! Scandock Infrastructure Library
//!
//! Shared infrastructure used by the scandock gateway:
//! - Middleware (request ID)
//! - Telemetry initialization
//! - Error response body

pub mod error;
pub mod middleware;
pub mod telemetry;

// Re-export commonly used types
pub use error::ErrorResponse;
pub use middleware::{get_request_id, request_id_middleware, RequestId};
pub use telemetry::{init_telemetry, shutdown_telemetry};
