//! HTTP client layer for the user-management API.
//!
//! This module handles:
//! - The shared, explicitly constructed HTTP client
//! - Error interception and the observers it reports to
//! - Response envelope and payload types

pub mod http;
pub mod observer;
pub mod types;

pub use http::{default_headers, ApiClient};
pub use observer::{ErrorObserver, ObservedFailure, RecordingObserver, TracingObserver};
pub use types::{ApiResponse, HealthStatus, NewUser};
