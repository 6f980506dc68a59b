//! # Car Model
//!
//! A listed vehicle as the backend reports it, plus the payload shape
//! the create/update mutations send back.

use serde::{Deserialize, Serialize};

use super::images;

/// Fuel options offered by the listing form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FuelType {
    Petrol,
    Diesel,
    Electric,
    Hybrid,
}

/// Transmission options offered by the listing form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GearType {
    Manual,
    Automatic,
    Cvt,
    Hybrid,
}

/// A vehicle listing. `car_gallery` is normalized at the boundary: no
/// matter how the backend encodes it, here it is always an ordered list
/// of URLs.
#[derive(Debug, Clone, Deserialize)]
pub struct Car {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Asking price in naira.
    pub price: i64,
    pub image_url: String,
    #[serde(default, deserialize_with = "images::deserialize")]
    pub car_gallery: Vec<String>,
    /// Category name, matching `Category::name`.
    pub category: String,
    pub brand_name: String,
    pub model: String,
    pub year: i32,
    pub fuel_type: FuelType,
    pub color: String,
    pub seat: u32,
    pub type_of_gear: GearType,
    /// Promotional marker; listings carrying it appear on the home page.
    #[serde(default)]
    pub featured: Option<String>,
}

/// Payload for `POST /createListing`, both create and update. The form
/// layer guarantees `image_url` is non-empty and `car_gallery` is in
/// selection order before this is ever built.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CarPayload {
    pub title: String,
    pub description: String,
    pub price: i64,
    pub image_url: String,
    pub car_gallery: Vec<String>,
    pub category: String,
    pub brand_name: String,
    pub model: String,
    pub year: i32,
    pub fuel_type: FuelType,
    pub color: String,
    pub seat: u32,
    pub type_of_gear: GearType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn car_should_deserialize_with_string_gallery() {
        let car: Car = serde_json::from_value(json!({
            "id": "42",
            "title": "Toyota Corolla 2019",
            "description": "Clean title",
            "price": 8_500_000,
            "image_url": "https://img/main.jpg",
            "car_gallery": "[\"https://img/1.jpg\",\"https://img/2.jpg\"]",
            "category": "Sedan",
            "brand_name": "Toyota",
            "model": "Corolla",
            "year": 2019,
            "fuel_type": "petrol",
            "color": "silver",
            "seat": 5,
            "type_of_gear": "automatic"
        }))
        .unwrap();

        assert_eq!(car.car_gallery, vec!["https://img/1.jpg", "https://img/2.jpg"]);
        assert_eq!(car.fuel_type, FuelType::Petrol);
        assert_eq!(car.type_of_gear, GearType::Automatic);
        assert!(car.featured.is_none());
    }

    #[test]
    fn car_should_reject_unknown_fuel_type() {
        let result: Result<Car, _> = serde_json::from_value(json!({
            "id": "42",
            "title": "t",
            "description": "d",
            "price": 1,
            "image_url": "u",
            "car_gallery": [],
            "category": "Sedan",
            "brand_name": "b",
            "model": "m",
            "year": 2020,
            "fuel_type": "steam",
            "color": "red",
            "seat": 4,
            "type_of_gear": "manual"
        }));

        assert!(result.is_err());
    }

    #[test]
    fn payload_should_omit_featured_when_absent() {
        let payload = CarPayload {
            title: "t".into(),
            description: "d".into(),
            price: 1,
            image_url: "u".into(),
            car_gallery: vec![],
            category: "Sedan".into(),
            brand_name: "b".into(),
            model: "m".into(),
            year: 2020,
            fuel_type: FuelType::Diesel,
            color: "red".into(),
            seat: 4,
            type_of_gear: GearType::Manual,
            featured: None,
        };

        let value = serde_json::to_value(&payload).unwrap();
        assert!(value.get("featured").is_none());
        assert_eq!(value["fuel_type"], "diesel");
    }
}
