//! # Orders Client
//!
//! Order creation and history against `/api/orders`, and the
//! [`OrderGateway`] implementation the checkout engine submits through.
//!
//! ## Idempotency
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  POST /api/orders is NOT idempotent: a retry after an ambiguous        │
//! │  failure could place the order twice. Creation is therefore sent       │
//! │  exactly once; the checkout state machine (Failed → retry) puts the    │
//! │  user, not the transport, in charge of trying again.                   │
//! │                                                                         │
//! │  History reads are idempotent GETs and retry normally.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use tracing::{error, info};

use ecostore_core::types::Order;
use ecostore_session::{GatewayError, OrderGateway, OrderRequest};

use crate::error::ApiResult;
use crate::EcoApi;

/// Client for the order endpoints.
#[derive(Debug, Clone)]
pub struct OrdersApi {
    api: EcoApi,
}

impl OrdersApi {
    pub(crate) fn new(api: EcoApi) -> Self {
        OrdersApi { api }
    }

    /// Creates an order. Sent exactly once; see the module notes.
    pub async fn create(&self, request: &OrderRequest) -> ApiResult<Order> {
        let order: Order = self.api.post_json("/api/orders", request).await?;
        info!(order_id = order.id, "order created");
        Ok(order)
    }

    /// The logged-in user's order history.
    pub async fn history(&self) -> ApiResult<Vec<Order>> {
        self.api.get_json("/api/orders/user", &[]).await
    }

    /// Fetches one order by id.
    pub async fn get(&self, id: i64) -> ApiResult<Order> {
        self.api.get_json(&format!("/api/orders/{}", id), &[]).await
    }
}

// =============================================================================
// Order Gateway Implementation
// =============================================================================

/// Lets a [`SessionStore`](ecostore_session::SessionStore) complete
/// purchases through this client.
///
/// The raw error is logged here; the checkout session surfaces only the
/// degraded user-facing message.
#[async_trait]
impl OrderGateway for OrdersApi {
    async fn submit_order(&self, request: &OrderRequest) -> Result<Order, GatewayError> {
        self.create(request).await.map_err(|err| {
            error!(error = %err, "order submission failed");
            GatewayError::new(err.user_message())
        })
    }
}
