//! # Ratings Client
//!
//! Product star ratings against `/api/ratings`.
//!
//! Posting a rating upserts: the backend keeps at most one rating per
//! (user, product) pair.

use serde::{Deserialize, Serialize};

use crate::error::ApiResult;
use crate::EcoApi;

/// A stored rating.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    pub rating_id: i64,
    pub user_id: i64,
    pub product_id: String,

    /// Stars, 1.0 to 5.0.
    pub rating: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct RatingRequest<'a> {
    product_id: &'a str,
    rating: f64,
}

/// Client for the rating endpoints.
#[derive(Debug, Clone)]
pub struct RatingsApi {
    api: EcoApi,
}

impl RatingsApi {
    pub(crate) fn new(api: EcoApi) -> Self {
        RatingsApi { api }
    }

    /// Adds or updates the logged-in user's rating for a product.
    pub async fn rate(&self, product_id: &str, rating: f64) -> ApiResult<Rating> {
        self.api
            .post_json("/api/ratings", &RatingRequest { product_id, rating })
            .await
    }

    /// All ratings for a product.
    pub async fn for_product(&self, product_id: &str) -> ApiResult<Vec<Rating>> {
        self.api
            .get_json(&format!("/api/ratings/product/{}", product_id), &[])
            .await
    }
}
