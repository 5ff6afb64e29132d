//! Response envelope and convenience payloads for the user API.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A successful response: status code plus the body exactly as the remote sent it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse {
    /// HTTP status code (always 2xx).
    pub status: u16,
    /// Response body; `Null` when the remote sent no body.
    pub data: Value,
}

impl ApiResponse {
    /// Decode the body into a typed view.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(&self.data)
    }

    /// Consume the response, keeping only the body.
    pub fn into_data(self) -> Value {
        self.data
    }
}

/// Payload accepted by `POST /api/users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    /// Unique username.
    pub username: String,
    /// Unique email address.
    pub email: String,
}

impl NewUser {
    /// Build a payload from a username and email.
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
        }
    }
}

/// Body returned by `GET /api/health`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    /// "healthy" when the service is up.
    pub status: String,
    /// Database connectivity as reported by the service.
    #[serde(default)]
    pub database: Option<String>,
}

impl HealthStatus {
    /// True when the service reports itself healthy.
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn health_status_decodes_from_response() {
        let response = ApiResponse {
            status: 200,
            data: json!({"status": "healthy", "database": "connected"}),
        };

        let health: HealthStatus = response.json().unwrap();
        assert!(health.is_healthy());
        assert_eq!(health.database.as_deref(), Some("connected"));
    }

    #[test]
    fn health_status_tolerates_missing_database() {
        let response = ApiResponse {
            status: 200,
            data: json!({"status": "degraded"}),
        };

        let health: HealthStatus = response.json().unwrap();
        assert!(!health.is_healthy());
        assert!(health.database.is_none());
    }

    #[test]
    fn new_user_serializes_to_expected_shape() {
        let body = serde_json::to_value(NewUser::new("ada", "ada@example.com")).unwrap();
        assert_eq!(body, json!({"username": "ada", "email": "ada@example.com"}));
    }
}
