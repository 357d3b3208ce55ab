//! # Catalog Client
//!
//! Product listing, search, and detail reads against `/api/products`.
//!
//! All three are idempotent GETs and retry under the configured backoff
//! window.

use ecostore_core::types::Product;
use ecostore_core::validation::validate_search_query;

use crate::error::ApiResult;
use crate::EcoApi;

/// Client for the product catalog.
#[derive(Debug, Clone)]
pub struct CatalogApi {
    api: EcoApi,
}

impl CatalogApi {
    pub(crate) fn new(api: EcoApi) -> Self {
        CatalogApi { api }
    }

    /// Lists products, optionally filtered by category.
    ///
    /// "All" (the frontend's default tab) means no filter, matching what
    /// the storefront sends.
    pub async fn list(&self, category: Option<&str>) -> ApiResult<Vec<Product>> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(category) = category.filter(|c| !c.is_empty() && *c != "All") {
            query.push(("category", category.to_string()));
        }

        self.api.get_json("/api/products", &query).await
    }

    /// Full-text product search.
    pub async fn search(&self, query: &str) -> ApiResult<Vec<Product>> {
        let query = validate_search_query(query)?;
        self.api
            .get_json("/api/products/search", &[("query", query)])
            .await
    }

    /// Fetches one product by id.
    pub async fn get(&self, id: i64) -> ApiResult<Product> {
        self.api
            .get_json(&format!("/api/products/{}", id), &[])
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ApiError, EcoApiConfig};

    #[test]
    fn test_search_validates_before_network() {
        let api = EcoApi::new(EcoApiConfig::new("http://localhost:9")).unwrap();
        let long_query = "x".repeat(200);

        let err = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
            .block_on(api.catalog().search(&long_query))
            .unwrap_err();

        assert!(matches!(err, ApiError::Validation(_)));
    }
}
