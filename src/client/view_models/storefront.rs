//! # Storefront Queries
//!
//! Read paths backing the public pages: featured cars on the home page,
//! category browsing, and the car detail view. Parameterized reads are
//! gated — an empty slug or id issues no request at all.

use std::sync::Arc;

use crate::client::cache::{QueryCache, QueryKey, QueryResult};
use crate::client::models::{Car, Category};
use crate::client::services::catalog::CatalogApi;

#[derive(Clone)]
pub struct Storefront {
    cache: Arc<QueryCache>,
    api: CatalogApi,
}

impl Storefront {
    pub fn new(cache: Arc<QueryCache>, api: CatalogApi) -> Self {
        Self { cache, api }
    }

    pub async fn featured(&self) -> QueryResult<Vec<Car>> {
        let api = self.api.clone();
        self.cache
            .fetch(QueryKey::Featured, || async move {
                api.fetch_featured().await
            })
            .await
    }

    pub async fn categories(&self) -> QueryResult<Vec<Category>> {
        let api = self.api.clone();
        self.cache
            .fetch(QueryKey::Categories, || async move {
                api.fetch_categories().await
            })
            .await
    }

    /// Cars in one category; an empty slug is idle, not an error.
    pub async fn cars_by_category(&self, slug: &str) -> QueryResult<Vec<Car>> {
        let api = self.api.clone();
        let category = slug.to_string();
        self.cache
            .fetch_if(
                !slug.trim().is_empty(),
                QueryKey::CarsByCategory(slug.to_string()),
                || async move { api.fetch_cars(Some(&category)).await },
            )
            .await
    }

    /// One car's detail; an empty id is idle, not an error.
    pub async fn car_detail(&self, id: &str) -> QueryResult<Car> {
        let api = self.api.clone();
        let car_id = id.to_string();
        self.cache
            .fetch_if(!id.trim().is_empty(), QueryKey::Car(id.to_string()), || {
                async move { api.fetch_car(&car_id).await }
            })
            .await
    }
}
