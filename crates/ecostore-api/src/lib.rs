//! # ecostore-api: REST Client for the EcoStore Backend
//!
//! Typed JSON-over-HTTP client for every backend contract the storefront
//! consumes.
//!
//! ## Module Organization
//! ```text
//! ecostore_api/
//! ├── lib.rs          ◄─── You are here (EcoApi facade & request plumbing)
//! ├── config.rs       ◄─── Base URL, timeout, retry window
//! ├── token.rs        ◄─── Bearer token store
//! ├── auth.rs         ◄─── /api/auth (login, signup)
//! ├── catalog.rs      ◄─── /api/products (list, search, get)
//! ├── orders.rs       ◄─── /api/orders (+ OrderGateway impl)
//! ├── ecocoins.rs     ◄─── /api/ecocoins (balance, redeem, calculate)
//! ├── dashboard.rs    ◄─── /api/dashboard/stats
//! ├── ratings.rs      ◄─── /api/ratings
//! ├── admin.rs        ◄─── admin product CRUD & order mutations
//! └── error.rs        ◄─── ApiError taxonomy
//! ```
//!
//! ## Client Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Client Pattern                                    │
//! │                                                                         │
//! │  let api = EcoApi::from_env()?;                                         │
//! │                                                                         │
//! │  api.auth().login("a@example.com", "secret").await?;                    │
//! │  let products = api.catalog().list(Some("Home")).await?;                │
//! │  let balance  = api.ecocoins().balance().await?;                        │
//! │                                                                         │
//! │  EcoApi is cheap to clone: all sub-clients share the same               │
//! │  connection pool, configuration, and token store.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Retry Policy
//! Idempotent GETs retry with bounded exponential backoff (transport
//! errors, timeouts, and 5xx only). POST/PUT/DELETE are sent exactly once:
//! order creation and coin redemption are not idempotent, and a blind
//! retry could double-spend.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod admin;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod dashboard;
pub mod ecocoins;
pub mod error;
pub mod orders;
pub mod ratings;
pub mod token;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::EcoApiConfig;
pub use error::{ApiError, ApiResult};
pub use token::{AuthSession, TokenStore};

use backoff::ExponentialBackoff;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use admin::AdminApi;
use auth::AuthApi;
use catalog::CatalogApi;
use dashboard::DashboardApi;
use ecocoins::EcoCoinsApi;
use orders::OrdersApi;
use ratings::RatingsApi;

// =============================================================================
// EcoApi Facade
// =============================================================================

/// The REST client facade.
///
/// Sub-clients (`auth()`, `catalog()`, ...) borrow nothing: they hold a
/// clone of this handle, and all clones share one connection pool, one
/// configuration, and one token store.
#[derive(Debug, Clone)]
pub struct EcoApi {
    http: reqwest::Client,
    config: EcoApiConfig,
    token: TokenStore,
}

impl EcoApi {
    /// Builds a client from the given configuration.
    pub fn new(config: EcoApiConfig) -> ApiResult<Self> {
        config.validate()?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::InvalidConfig(e.to_string()))?;

        Ok(EcoApi {
            http,
            config,
            token: TokenStore::new(),
        })
    }

    /// Builds a client from `ECOSTORE_*` environment variables.
    pub fn from_env() -> ApiResult<Self> {
        EcoApi::new(EcoApiConfig::from_env())
    }

    /// The shared token store (for persisting/restoring the bearer token).
    pub fn token_store(&self) -> &TokenStore {
        &self.token
    }

    pub fn config(&self) -> &EcoApiConfig {
        &self.config
    }

    // =========================================================================
    // Sub-Clients
    // =========================================================================

    pub fn auth(&self) -> AuthApi {
        AuthApi::new(self.clone())
    }

    pub fn catalog(&self) -> CatalogApi {
        CatalogApi::new(self.clone())
    }

    pub fn orders(&self) -> OrdersApi {
        OrdersApi::new(self.clone())
    }

    pub fn ecocoins(&self) -> EcoCoinsApi {
        EcoCoinsApi::new(self.clone())
    }

    pub fn dashboard(&self) -> DashboardApi {
        DashboardApi::new(self.clone())
    }

    pub fn ratings(&self) -> RatingsApi {
        RatingsApi::new(self.clone())
    }

    pub fn admin(&self) -> AdminApi {
        AdminApi::new(self.clone())
    }

    // =========================================================================
    // Request Plumbing
    // =========================================================================

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    fn apply_auth(&self, request: RequestBuilder) -> RequestBuilder {
        match self.token.bearer() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// GET with bounded exponential backoff on transient failures.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ApiResult<T> {
        let url = self.url(path);
        let policy = ExponentialBackoff {
            max_elapsed_time: Some(self.config.retry_max_elapsed),
            ..ExponentialBackoff::default()
        };

        backoff::future::retry(policy, || {
            debug!(%url, "GET");
            let request = self.apply_auth(self.http.get(&url).query(&query));
            async move {
                match Self::dispatch::<T>(request).await {
                    Ok(value) => Ok(value),
                    Err(err) if err.is_transient() => {
                        warn!(error = %err, "transient GET failure; will retry");
                        Err(backoff::Error::transient(err))
                    }
                    Err(err) => Err(backoff::Error::permanent(err)),
                }
            }
        })
        .await
    }

    /// POST without retry (writes are submitted exactly once).
    pub(crate) async fn post_json<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!(url = %self.url(path), "POST");
        let request = self.apply_auth(self.http.post(self.url(path)).json(body));
        Self::dispatch(request).await
    }

    /// PUT without retry.
    pub(crate) async fn put_json<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!(url = %self.url(path), "PUT");
        let request = self.apply_auth(self.http.put(self.url(path)).json(body));
        Self::dispatch(request).await
    }

    /// DELETE without retry; the response body is discarded.
    pub(crate) async fn delete(&self, path: &str) -> ApiResult<()> {
        debug!(url = %self.url(path), "DELETE");
        let request = self.apply_auth(self.http.delete(self.url(path)));

        let response = request.send().await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::error_for(response).await)
        }
    }

    /// Sends a built request and decodes the JSON response.
    async fn dispatch<T: DeserializeOwned>(request: RequestBuilder) -> ApiResult<T> {
        let response = request.send().await?;

        if response.status().is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|e| ApiError::InvalidResponse(e.to_string()));
        }

        Err(Self::error_for(response).await)
    }

    /// Maps a non-success response to the error taxonomy.
    async fn error_for(response: Response) -> ApiError {
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            return ApiError::Unauthorized;
        }

        if status.is_client_error() {
            return ApiError::ServiceRejected {
                status: status.as_u16(),
                message: Self::extract_message(response).await,
            };
        }

        ApiError::ServiceError {
            status: status.as_u16(),
        }
    }

    /// Pulls the human message out of a backend error body.
    ///
    /// The backend is inconsistent: some endpoints use `{"message": ...}`,
    /// others `{"error": ...}`. Accept both.
    async fn extract_message(response: Response) -> String {
        #[derive(Deserialize)]
        struct ErrorBody {
            message: Option<String>,
            error: Option<String>,
        }

        match response.json::<ErrorBody>().await {
            Ok(body) => body
                .message
                .or(body.error)
                .unwrap_or_else(|| "Request rejected".to_string()),
            Err(_) => "Request rejected".to_string(),
        }
    }
}
