//! User-management operations.

use std::fmt::Display;

use serde::Serialize;
use tracing::instrument;

use crate::client::{ApiClient, ApiResponse};
use crate::error::Result;

/// Path of the user collection.
pub const USERS_PATH: &str = "/api/users";

/// Path of the health endpoint.
pub const HEALTH_PATH: &str = "/api/health";

/// Named operations against the user API.
///
/// Each call is independent: one request, no retries, no shared state
/// beyond the client it was built with.
#[derive(Debug, Clone)]
pub struct UserService {
    client: ApiClient,
}

impl UserService {
    /// Wrap an existing client.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Get the underlying client.
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// List every user.
    #[instrument(skip(self))]
    pub async fn get_users(&self) -> Result<ApiResponse> {
        self.client.get(USERS_PATH).await
    }

    /// Create a user; the payload is sent as-is.
    #[instrument(skip_all)]
    pub async fn create_user<B: Serialize + ?Sized>(&self, payload: &B) -> Result<ApiResponse> {
        self.client.post(USERS_PATH, payload).await
    }

    /// Delete the user with the given id.
    #[instrument(skip_all, fields(user_id = %user_id))]
    pub async fn delete_user(&self, user_id: impl Display) -> Result<ApiResponse> {
        self.client.delete(&user_path(&user_id)).await
    }

    /// Query service health.
    #[instrument(skip(self))]
    pub async fn health_check(&self) -> Result<ApiResponse> {
        self.client.get(HEALTH_PATH).await
    }
}

fn user_path(user_id: &dyn Display) -> String {
    format!("{USERS_PATH}/{user_id}")
}
