//! # Auth Client
//!
//! Login and signup against `/api/auth`, plus token installation.
//!
//! Login and signup go out unauthenticated; every other client attaches
//! the bearer token this module installs.

use serde::{Deserialize, Serialize};
use tracing::info;

use ecostore_core::validation::validate_email;

use crate::error::ApiResult;
use crate::token::AuthSession;
use crate::EcoApi;

// =============================================================================
// Wire Types
// =============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Payload for `POST /api/auth/signup`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub age: u32,
    pub phone_number: String,

    /// ISO date, e.g. "1998-04-23".
    pub date_of_birth: String,
}

/// Plain acknowledgement body, e.g. from signup.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

// =============================================================================
// Auth API
// =============================================================================

/// Client for the auth endpoints.
#[derive(Debug, Clone)]
pub struct AuthApi {
    api: EcoApi,
}

impl AuthApi {
    pub(crate) fn new(api: EcoApi) -> Self {
        AuthApi { api }
    }

    /// Logs in and installs the returned identity into the shared token
    /// store, so subsequent requests are authenticated.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<AuthSession> {
        validate_email(email)?;

        let session: AuthSession = self
            .api
            .post_json("/api/auth/login", &LoginRequest { email, password })
            .await?;

        info!(username = %session.username, role = %session.role, "logged in");
        self.api.token_store().set(session.clone());
        Ok(session)
    }

    /// Registers a new account. Does not log in; callers follow up with
    /// [`AuthApi::login`].
    pub async fn signup(&self, request: &SignupRequest) -> ApiResult<MessageResponse> {
        validate_email(&request.email)?;
        self.api.post_json("/api/auth/signup", request).await
    }

    /// Drops the in-process identity. Purely local; the backend keeps no
    /// session state beyond the token itself.
    pub fn logout(&self) {
        info!("logged out");
        self.api.token_store().clear();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_rejects_malformed_email_before_network() {
        // No server is running; a validation failure proves we never
        // attempted the request.
        let api = EcoApi::new(crate::EcoApiConfig::new("http://localhost:9")).unwrap();

        let err = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
            .block_on(api.auth().login("not-an-email", "pw"))
            .unwrap_err();

        assert!(matches!(err, crate::ApiError::Validation(_)));
        assert!(!api.token_store().is_authenticated());
    }

    #[test]
    fn test_signup_request_wire_shape() {
        let request = SignupRequest {
            username: "asha".to_string(),
            email: "asha@example.com".to_string(),
            password: "secret".to_string(),
            age: 27,
            phone_number: "9876543210".to_string(),
            date_of_birth: "1998-04-23".to_string(),
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["phoneNumber"], "9876543210");
        assert_eq!(json["dateOfBirth"], "1998-04-23");
    }
}
