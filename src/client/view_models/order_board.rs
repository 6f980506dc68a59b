//! # Order Review Boards
//!
//! Read-only admin boards over the public forms' submissions. Both use
//! the incremental reveal instead of numbered pages; the sell-order
//! board adds asking-price stats and a wrap-around photo carousel.

use std::sync::Arc;

use crate::client::cache::{QueryCache, QueryKey, QueryResult};
use crate::client::models::{CustomOrder, SellOrder};
use crate::client::services::catalog::CatalogApi;
use crate::client::view_models::list_state::{Listed, LoadMore};

/// Orders revealed initially and added per "load more".
const REVEAL_WINDOW: usize = 10;

impl Listed for SellOrder {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            &self.fullname,
            &self.make,
            &self.model,
            &self.email,
            &self.location,
        ]
    }
}

impl Listed for CustomOrder {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.fullname, &self.make, &self.model, &self.email]
    }
}

/// Headline numbers for the sell-order board. Only parseable asking
/// prices feed the average.
#[derive(Debug, Clone, PartialEq)]
pub struct SellOrderStats {
    pub total_listings: usize,
    pub average_price: Option<f64>,
    pub unique_makes: usize,
    pub unique_locations: usize,
}

pub fn sell_order_stats(orders: &[SellOrder]) -> SellOrderStats {
    let mut makes: Vec<&str> = orders.iter().map(|order| order.make.as_str()).collect();
    makes.sort_unstable();
    makes.dedup();

    let mut locations: Vec<&str> = orders.iter().map(|order| order.location.as_str()).collect();
    locations.sort_unstable();
    locations.dedup();

    let prices: Vec<f64> = orders.iter().filter_map(SellOrder::parsed_price).collect();
    let average_price = if prices.is_empty() {
        None
    } else {
        Some(prices.iter().sum::<f64>() / prices.len() as f64)
    };

    SellOrderStats {
        total_listings: orders.len(),
        average_price,
        unique_makes: makes.len(),
        unique_locations: locations.len(),
    }
}

/// Wrap-around viewer over one order's photos.
#[derive(Debug, Clone)]
pub struct Carousel {
    images: Vec<String>,
    index: usize,
}

impl Carousel {
    /// Opens at the first photo; orders without photos have no carousel.
    pub fn open(images: Vec<String>) -> Option<Self> {
        if images.is_empty() {
            return None;
        }
        Some(Self { images, index: 0 })
    }

    pub fn current(&self) -> &str {
        &self.images[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn next(&mut self) {
        self.index = (self.index + 1) % self.images.len();
    }

    pub fn previous(&mut self) {
        self.index = self.index.checked_sub(1).unwrap_or(self.images.len() - 1);
    }
}

pub struct SellOrderBoard {
    cache: Arc<QueryCache>,
    api: CatalogApi,
    search: String,
    window: LoadMore,
    carousel: Option<Carousel>,
}

impl SellOrderBoard {
    pub fn new(cache: Arc<QueryCache>, api: CatalogApi) -> Self {
        Self {
            cache,
            api,
            search: String::new(),
            window: LoadMore::new(REVEAL_WINDOW, REVEAL_WINDOW),
            carousel: None,
        }
    }

    pub async fn orders(&self) -> QueryResult<Vec<SellOrder>> {
        let api = self.api.clone();
        self.cache
            .fetch(QueryKey::SellOrders, || async move {
                api.fetch_sell_orders().await
            })
            .await
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// A new search is a new collection identity: the reveal window
    /// snaps back to its initial size.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
        self.window.reset();
    }

    fn filtered<'a>(&self, orders: &'a [SellOrder]) -> Vec<&'a SellOrder> {
        let needle = self.search.to_lowercase();
        orders
            .iter()
            .filter(|order| {
                needle.is_empty()
                    || order
                        .search_fields()
                        .iter()
                        .any(|field| field.to_lowercase().contains(&needle))
            })
            .collect()
    }

    /// Currently revealed slice of the filtered orders.
    pub fn visible<'a>(&self, orders: &'a [SellOrder]) -> Vec<&'a SellOrder> {
        let filtered = self.filtered(orders);
        let count = self.window.visible_count(filtered.len());
        filtered.into_iter().take(count).collect()
    }

    pub fn has_more(&self, orders: &[SellOrder]) -> bool {
        self.window.has_more(self.filtered(orders).len())
    }

    pub fn load_more(&mut self, orders: &[SellOrder]) {
        let len = self.filtered(orders).len();
        self.window.load_more(len);
    }

    pub fn retry(&self) {
        self.cache.invalidate(&QueryKey::SellOrders);
    }

    /// Open the photo viewer for one order; orders without photos keep
    /// the viewer closed.
    pub fn open_carousel(&mut self, order: &SellOrder) -> bool {
        self.carousel = Carousel::open(order.images.clone());
        self.carousel.is_some()
    }

    pub fn carousel(&self) -> Option<&Carousel> {
        self.carousel.as_ref()
    }

    pub fn carousel_mut(&mut self) -> Option<&mut Carousel> {
        self.carousel.as_mut()
    }

    pub fn close_carousel(&mut self) {
        self.carousel = None;
    }
}

pub struct CustomOrderBoard {
    cache: Arc<QueryCache>,
    api: CatalogApi,
    search: String,
    window: LoadMore,
}

impl CustomOrderBoard {
    pub fn new(cache: Arc<QueryCache>, api: CatalogApi) -> Self {
        Self {
            cache,
            api,
            search: String::new(),
            window: LoadMore::new(REVEAL_WINDOW, REVEAL_WINDOW),
        }
    }

    pub async fn orders(&self) -> QueryResult<Vec<CustomOrder>> {
        let api = self.api.clone();
        self.cache
            .fetch(QueryKey::CustomOrders, || async move {
                api.fetch_custom_orders().await
            })
            .await
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
        self.window.reset();
    }

    fn filtered<'a>(&self, orders: &'a [CustomOrder]) -> Vec<&'a CustomOrder> {
        let needle = self.search.to_lowercase();
        orders
            .iter()
            .filter(|order| {
                needle.is_empty()
                    || order
                        .search_fields()
                        .iter()
                        .any(|field| field.to_lowercase().contains(&needle))
            })
            .collect()
    }

    pub fn visible<'a>(&self, orders: &'a [CustomOrder]) -> Vec<&'a CustomOrder> {
        let filtered = self.filtered(orders);
        let count = self.window.visible_count(filtered.len());
        filtered.into_iter().take(count).collect()
    }

    pub fn has_more(&self, orders: &[CustomOrder]) -> bool {
        self.window.has_more(self.filtered(orders).len())
    }

    pub fn load_more(&mut self, orders: &[CustomOrder]) {
        let len = self.filtered(orders).len();
        self.window.load_more(len);
    }

    pub fn retry(&self) {
        self.cache.invalidate(&QueryKey::CustomOrders);
    }
}
