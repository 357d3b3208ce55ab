//! # EcoCoins Client
//!
//! Balance reads and server-side redemption against `/api/ecocoins`.
//!
//! ## Degradation
//! A missing bearer token degrades the balance read to 0 instead of
//! failing hard: the header badge renders "0 🌿" for anonymous visitors
//! rather than an error state.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use ecostore_core::money::{self, Money};

use crate::error::ApiResult;
use crate::EcoApi;

// =============================================================================
// Wire Types
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
struct BalanceResponse {
    balance: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct RedeemRequest {
    eco_coins: i64,
}

/// Result of a server-side redemption.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedeemResponse {
    pub new_balance: i64,

    #[serde(with = "money::rupee_decimal")]
    pub discount_amount: Money,

    /// Minted coupon code, e.g. `ECO150-7GQ2ZK`.
    pub coupon_code: String,

    /// Confirmation message embedding the code.
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
struct CalculateRequest {
    #[serde(with = "money::rupee_decimal")]
    amount: Money,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CalculateResponse {
    eco_coins_earned: i64,
}

// =============================================================================
// EcoCoins API
// =============================================================================

/// Client for the EcoCoin endpoints.
#[derive(Debug, Clone)]
pub struct EcoCoinsApi {
    api: EcoApi,
}

impl EcoCoinsApi {
    pub(crate) fn new(api: EcoApi) -> Self {
        EcoCoinsApi { api }
    }

    /// The logged-in user's coin balance.
    ///
    /// Without a token this returns 0 without touching the network.
    pub async fn balance(&self) -> ApiResult<i64> {
        if !self.api.token_store().is_authenticated() {
            debug!("no auth token; defaulting EcoCoin balance to 0");
            return Ok(0);
        }

        let response: BalanceResponse = self.api.get_json("/api/ecocoins/balance", &[]).await?;
        Ok(response.balance)
    }

    /// Redeems coins server-side for a discount coupon.
    ///
    /// Not idempotent; sent exactly once. The UI disables the redeem
    /// button while a call is in flight.
    pub async fn redeem(&self, eco_coins: i64) -> ApiResult<RedeemResponse> {
        let response: RedeemResponse = self
            .api
            .post_json("/api/ecocoins/redeem", &RedeemRequest { eco_coins })
            .await?;

        info!(
            coins = eco_coins,
            new_balance = response.new_balance,
            "EcoCoins redeemed server-side"
        );
        Ok(response)
    }

    /// Previews the coins an order amount would earn.
    pub async fn calculate(&self, amount: Money) -> ApiResult<i64> {
        let response: CalculateResponse = self
            .api
            .post_json("/api/ecocoins/calculate", &CalculateRequest { amount })
            .await?;
        Ok(response.eco_coins_earned)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EcoApiConfig;

    /// The degradation rule: no token ⇒ balance 0, no network involved.
    /// (The configured port has nothing listening; a network attempt
    /// would error.)
    #[tokio::test]
    async fn test_balance_defaults_to_zero_without_token() {
        let api = EcoApi::new(EcoApiConfig::new("http://localhost:9")).unwrap();

        let balance = api.ecocoins().balance().await.unwrap();
        assert_eq!(balance, 0);
    }

    #[test]
    fn test_redeem_response_parses_backend_shape() {
        let json = r#"{
            "success": true,
            "ecoCoinsRedeemed": 200,
            "discountAmount": 150.0,
            "couponCode": "ECO150-7GQ2ZK",
            "newBalance": 50,
            "message": "EcoCoins redeemed successfully! Your coupon code is: ECO150-7GQ2ZK"
        }"#;

        let response: RedeemResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.new_balance, 50);
        assert_eq!(response.discount_amount, Money::from_rupees(150));
        assert_eq!(response.coupon_code, "ECO150-7GQ2ZK");
    }
}
