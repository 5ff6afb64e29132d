//! Client facade for the user-management REST API.
//!
//! A single [`ApiClient`] is built from [`Config`] and passed explicitly to
//! whatever issues requests. Every request carries a JSON content type and
//! the client's fixed timeout. Failures pass through one interception point
//! that reports them to an injected [`ErrorObserver`] and then returns them
//! to the caller unchanged.
//!
//! ```no_run
//! use user_api_client::{ApiClient, Config, NewUser, UserService};
//!
//! # async fn run() -> user_api_client::Result<()> {
//! let config = Config::load()?;
//! let users = UserService::new(ApiClient::new(&config)?);
//!
//! let created = users.create_user(&NewUser::new("ada", "ada@example.com")).await?;
//! println!("{}", created.data);
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`client`]: Shared HTTP client, interceptor and observers
//! - [`users`]: The user-management operations

pub mod client;
pub mod config;
pub mod error;
pub mod users;

pub use client::{
    ApiClient, ApiResponse, ErrorObserver, HealthStatus, NewUser, RecordingObserver,
    TracingObserver,
};
pub use config::Config;
pub use error::{ApiError, Result};
pub use users::UserService;
