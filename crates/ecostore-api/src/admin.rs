//! # Admin Console Client
//!
//! Product CRUD and order mutations for the admin console.
//!
//! All endpoints here require an ADMIN-role token; the backend enforces
//! it, and [`AuthSession::is_admin`](crate::AuthSession::is_admin) gates
//! the console client-side.

use serde::{Deserialize, Serialize};
use tracing::info;

use ecostore_core::money::{self, Money};
use ecostore_core::types::{Order, OrderStatus, PaymentStatus, Product};

use crate::error::ApiResult;
use crate::EcoApi;

// =============================================================================
// Wire Types
// =============================================================================

/// Payload for creating or replacing a catalog product.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: String,
    pub category: String,
    pub description: String,

    #[serde(with = "money::rupee_decimal")]
    pub price: Money,

    pub quantity: i64,
    pub image_url: String,
    pub carbon_saved: f64,
    pub water_reduced: f64,
    pub plastic_items_avoided: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct OrderStatusRequest {
    order_status: OrderStatus,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct PaymentStatusRequest {
    payment_status: PaymentStatus,
}

/// Acknowledgement for admin order mutations.
#[derive(Debug, Clone, Deserialize)]
pub struct MutationAck {
    pub success: bool,
    pub message: String,
}

// =============================================================================
// Admin API
// =============================================================================

/// Client for the admin console endpoints.
#[derive(Debug, Clone)]
pub struct AdminApi {
    api: EcoApi,
}

impl AdminApi {
    pub(crate) fn new(api: EcoApi) -> Self {
        AdminApi { api }
    }

    // -------------------------------------------------------------------------
    // Product Management
    // -------------------------------------------------------------------------

    /// Adds a product to the catalog.
    pub async fn create_product(&self, draft: &ProductDraft) -> ApiResult<Product> {
        let product: Product = self.api.post_json("/api/products", draft).await?;
        info!(product_id = product.id, name = %product.name, "product created");
        Ok(product)
    }

    /// Replaces a product's catalog entry.
    pub async fn update_product(&self, id: i64, draft: &ProductDraft) -> ApiResult<Product> {
        self.api
            .put_json(&format!("/api/products/{}", id), draft)
            .await
    }

    /// Deletes a product from the catalog.
    pub async fn delete_product(&self, id: i64) -> ApiResult<()> {
        info!(product_id = id, "deleting product");
        self.api.delete(&format!("/api/products/{}", id)).await
    }

    // -------------------------------------------------------------------------
    // Order Management
    // -------------------------------------------------------------------------

    /// Every order in the system, for the console's order table.
    pub async fn list_orders(&self) -> ApiResult<Vec<Order>> {
        self.api.get_json("/api/orders/admin", &[]).await
    }

    /// Moves an order to a new fulfilment status.
    pub async fn update_order_status(
        &self,
        order_id: i64,
        status: OrderStatus,
    ) -> ApiResult<MutationAck> {
        info!(order_id, ?status, "updating order status");
        self.api
            .put_json(
                &format!("/api/admin/orders/{}/status", order_id),
                &OrderStatusRequest {
                    order_status: status,
                },
            )
            .await
    }

    /// Moves an order's payment to a new settlement status
    /// (e.g. COD marked paid on delivery).
    pub async fn update_payment_status(
        &self,
        order_id: i64,
        status: PaymentStatus,
    ) -> ApiResult<MutationAck> {
        info!(order_id, ?status, "updating payment status");
        self.api
            .put_json(
                &format!("/api/admin/orders/{}/payment-status", order_id),
                &PaymentStatusRequest {
                    payment_status: status,
                },
            )
            .await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
