//! # Dashboard Client
//!
//! The logged-in user's aggregate figures from `/api/dashboard/stats`.

use serde::Deserialize;

use ecostore_core::money::{self, Money};

use crate::error::ApiResult;
use crate::EcoApi;

/// Aggregate dashboard figures computed by the backend.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[serde(with = "money::rupee_decimal")]
    pub total_spent: Money,

    /// Total discount value the user has captured.
    #[serde(with = "money::rupee_decimal")]
    pub total_saved: Money,

    pub eco_coins_earned: i64,

    /// Lifetime kilograms of CO₂ avoided.
    pub carbon_saved: f64,

    pub total_orders: i64,
}

/// Client for the dashboard endpoints.
#[derive(Debug, Clone)]
pub struct DashboardApi {
    api: EcoApi,
}

impl DashboardApi {
    pub(crate) fn new(api: EcoApi) -> Self {
        DashboardApi { api }
    }

    /// Fetches the user's aggregate stats. Idempotent; retries.
    pub async fn stats(&self) -> ApiResult<DashboardStats> {
        self.api.get_json("/api/dashboard/stats", &[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_parse_backend_shape() {
        let json = r#"{
            "totalSpent": 1447.0,
            "totalSaved": 150.0,
            "ecoCoinsEarned": 138,
            "carbonSaved": 12.5,
            "totalOrders": 3
        }"#;

        let stats: DashboardStats = serde_json::from_str(json).unwrap();
        assert_eq!(stats.total_spent, Money::from_paise(144700));
        assert_eq!(stats.eco_coins_earned, 138);
        assert_eq!(stats.total_orders, 3);
    }
}
