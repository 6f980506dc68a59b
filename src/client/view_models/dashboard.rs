//! # Admin Dashboard Board
//!
//! The dashboard reads the car and category collections through the
//! cache, derives the headline stats, and drives the searchable,
//! paginated listing with per-row delete. Deleting invalidates the car
//! collection; the page index re-clamps the next time the list renders.

use std::sync::Arc;

use crate::client::cache::{MutationExecutor, QueryCache, QueryKey, QueryResult};
use crate::client::error::ApiError;
use crate::client::models::{Car, Category};
use crate::client::services::catalog::CatalogApi;
use crate::client::view_models::list_state::{CategoryFilter, ListState, ListView, Listed};

/// Cars per dashboard page.
const PAGE_SIZE: usize = 6;

impl Listed for Car {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.title, &self.brand_name]
    }

    fn category(&self) -> Option<&str> {
        Some(&self.category)
    }
}

/// Headline numbers over the whole car collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardStats {
    pub total_cars: usize,
    pub total_brands: usize,
    pub total_categories: usize,
    pub average_price: i64,
}

pub fn stats(cars: &[Car], categories: &[Category]) -> DashboardStats {
    let mut brands: Vec<&str> = cars.iter().map(|car| car.brand_name.as_str()).collect();
    brands.sort_unstable();
    brands.dedup();

    let average_price = if cars.is_empty() {
        0
    } else {
        let total: i64 = cars.iter().map(|car| car.price).sum();
        (total as f64 / cars.len() as f64).round() as i64
    };

    DashboardStats {
        total_cars: cars.len(),
        total_brands: brands.len(),
        total_categories: categories.len(),
        average_price,
    }
}

pub struct DashboardBoard {
    cache: Arc<QueryCache>,
    api: CatalogApi,
    delete: MutationExecutor,
    list: ListState,
    deleting_id: Option<String>,
}

impl DashboardBoard {
    pub fn new(cache: Arc<QueryCache>, api: CatalogApi) -> Self {
        Self {
            delete: MutationExecutor::new(Arc::clone(&cache)),
            cache,
            api,
            list: ListState::new(PAGE_SIZE),
            deleting_id: None,
        }
    }

    pub async fn cars(&self) -> QueryResult<Vec<Car>> {
        let api = self.api.clone();
        self.cache
            .fetch(QueryKey::Cars, || async move { api.fetch_cars(None).await })
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

    pub fn list(&self) -> &ListState {
        &self.list
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.list.set_search(term);
    }

    pub fn set_filter(&mut self, filter: CategoryFilter) {
        self.list.set_filter(filter);
    }

    pub fn go_to_page(&mut self, page: usize) -> bool {
        self.list.go_to_page(page)
    }

    /// Current page over the given car snapshot.
    pub fn view<'a>(&mut self, cars: &'a [Car]) -> ListView<'a, Car> {
        self.list.view(cars)
    }

    /// Pending indicator scoped to one row: only the row whose delete is
    /// actually running shows it.
    pub fn is_deleting(&self, id: &str) -> bool {
        self.deleting_id.as_deref() == Some(id)
    }

    #[cfg(test)]
    fn mark_deleting(&mut self, id: &str) {
        self.deleting_id = Some(id.to_string());
    }

    /// A failed read is retried by invalidating and re-fetching.
    pub fn retry_cars(&self) {
        self.cache.invalidate(&QueryKey::Cars);
    }

    /// Delete one listing. A missing id comes back as a handled error;
    /// the rest of the board keeps working either way.
    pub async fn delete_car(&mut self, id: &str) -> Result<(), ApiError> {
        self.deleting_id = Some(id.to_string());
        let api = self.api.clone();
        let result = self
            .delete
            .run(&[QueryKey::Cars], || {
                let id = id.to_string();
                async move { api.delete_car(&id).await }
            })
            .await;
        self.deleting_id = None;
        result.map(|_| ())
    }
}
