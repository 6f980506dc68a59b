//! # Catalog API
//!
//! Typed wrappers over the REST surface. Each function owns its
//! endpoint's envelope so callers never see `{cars: ...}` wrappers. The
//! car-detail endpoint is the single-resource `GET /car?id=`; the
//! backend's other spellings of the same read are not used.

use crate::client::error::ApiError;
use crate::client::models::{
    Car, CarPayload, Category, CategoryPayload, ContactMessage, Credentials, CustomOrder,
    CustomOrderPayload, LoginResponse, NewAdmin, SellOrder, SellOrderPayload,
};
use crate::client::services::http::ApiClient;

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct CarsEnvelope {
    cars: Vec<Car>,
}

#[derive(Debug, Deserialize)]
struct CarEnvelope {
    car: Car,
}

#[derive(Debug, Deserialize)]
struct CategoriesEnvelope {
    category: Vec<Category>,
}

// Both order reads reuse the backend's `cars` envelope key.
#[derive(Debug, Deserialize)]
struct SellOrdersEnvelope {
    cars: Vec<SellOrder>,
}

#[derive(Debug, Deserialize)]
struct CustomOrdersEnvelope {
    cars: Vec<CustomOrder>,
}

/// High-level API over [`ApiClient`].
#[derive(Debug, Clone)]
pub struct CatalogApi {
    client: ApiClient,
}

impl CatalogApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// `GET /cars`, optionally filtered by category name.
    pub async fn fetch_cars(&self, category: Option<&str>) -> Result<Vec<Car>, ApiError> {
        let envelope: CarsEnvelope = match category {
            Some(cat) => {
                self.client
                    .get_with_query("/cars", &[("cat", cat)])
                    .await?
            }
            None => self.client.get("/cars").await?,
        };
        Ok(envelope.cars)
    }

    /// Canonical single-resource read: `GET /car?id=`.
    pub async fn fetch_car(&self, id: &str) -> Result<Car, ApiError> {
        let envelope: CarEnvelope = self.client.get_with_query("/car", &[("id", id)]).await?;
        Ok(envelope.car)
    }

    /// Featured cars for the home page: `GET /carlisting`.
    pub async fn fetch_featured(&self) -> Result<Vec<Car>, ApiError> {
        let envelope: CarsEnvelope = self.client.get("/carlisting").await?;
        Ok(envelope.cars)
    }

    pub async fn create_listing(&self, payload: &CarPayload) -> Result<Value, ApiError> {
        self.client.post_json("/createListing", payload).await
    }

    pub async fn delete_car(&self, id: &str) -> Result<Value, ApiError> {
        self.client.delete("/deleteCar", &[("id", id)]).await
    }

    /// `GET /getCategory`; the backend keys the list as `category`.
    pub async fn fetch_categories(&self) -> Result<Vec<Category>, ApiError> {
        let envelope: CategoriesEnvelope = self.client.get("/getCategory").await?;
        Ok(envelope.category)
    }

    pub async fn create_category(&self, payload: &CategoryPayload) -> Result<Value, ApiError> {
        self.client.post_json("/createCategory", payload).await
    }

    pub async fn delete_category(&self, name: &str) -> Result<Value, ApiError> {
        self.client.delete("/deleteCategory", &[("name", name)]).await
    }

    pub async fn fetch_sell_orders(&self) -> Result<Vec<SellOrder>, ApiError> {
        let envelope: SellOrdersEnvelope = self.client.get("/getSell").await?;
        Ok(envelope.cars)
    }

    pub async fn submit_sell_order(&self, payload: &SellOrderPayload) -> Result<Value, ApiError> {
        self.client.post_json("/sell", payload).await
    }

    pub async fn fetch_custom_orders(&self) -> Result<Vec<CustomOrder>, ApiError> {
        let envelope: CustomOrdersEnvelope = self.client.get("/getCustom").await?;
        Ok(envelope.cars)
    }

    pub async fn submit_custom_order(
        &self,
        payload: &CustomOrderPayload,
    ) -> Result<Value, ApiError> {
        self.client.post_json("/customOrder", payload).await
    }

    pub async fn submit_contact(&self, payload: &ContactMessage) -> Result<Value, ApiError> {
        self.client.post_json("/contact", payload).await
    }

    /// `POST /login`; the returned token is opaque and goes straight to
    /// the session store.
    pub async fn login(&self, credentials: &Credentials) -> Result<String, ApiError> {
        let response: LoginResponse = self.client.post_json("/login", credentials).await?;
        Ok(response.token)
    }

    pub async fn create_admin(&self, payload: &NewAdmin) -> Result<Value, ApiError> {
        self.client.post_json("/createAdmin", payload).await
    }
}
