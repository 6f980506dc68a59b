//! # Order Models
//!
//! Public-form submissions the admin area reviews: sell orders (a
//! customer offering a vehicle, with photos) and custom orders (a
//! customer describing a wish). Both are read-only on the admin side.

use std::fmt;

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use super::images;

/// Reported condition of a vehicle offered for sale. Closed set with a
/// catch-all so arbitrary form input still classifies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    BrandNew,
    Excellent,
    Good,
    Fair,
    Other(String),
}

/// Badge tone for rendering a condition. Total mapping; there is no
/// unstyled combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionTone {
    Purple,
    Green,
    Blue,
    Yellow,
    Neutral,
}

impl Condition {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "brand new" => Condition::BrandNew,
            "excellent" => Condition::Excellent,
            "good" => Condition::Good,
            "fair" => Condition::Fair,
            _ => Condition::Other(raw.trim().to_string()),
        }
    }

    pub fn tone(&self) -> ConditionTone {
        match self {
            Condition::BrandNew => ConditionTone::Purple,
            Condition::Excellent => ConditionTone::Green,
            Condition::Good => ConditionTone::Blue,
            Condition::Fair => ConditionTone::Yellow,
            Condition::Other(_) => ConditionTone::Neutral,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Condition::BrandNew => "brand new",
            Condition::Excellent => "excellent",
            Condition::Good => "good",
            Condition::Fair => "fair",
            Condition::Other(raw) => raw,
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Condition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Condition {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Condition::parse(&raw))
    }
}

fn de_opt_condition<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Condition>, D::Error> {
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().map(Condition::parse))
}

/// A vehicle a customer is offering to sell. `images` shares the gallery
/// normalization: the backend has been seen sending it as an
/// escaped-JSON string.
#[derive(Debug, Clone, Deserialize)]
pub struct SellOrder {
    #[serde(default)]
    pub id: Option<String>,
    pub fullname: String,
    pub phone: String,
    pub email: String,
    pub make: String,
    pub model: String,
    pub year: String,
    #[serde(default)]
    pub transmission: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default, deserialize_with = "de_opt_condition")]
    pub condition: Option<Condition>,
    #[serde(default)]
    pub description: Option<String>,
    pub location: String,
    /// Asking price as the form captured it; not always numeric.
    pub price: String,
    #[serde(default, deserialize_with = "images::deserialize")]
    pub images: Vec<String>,
}

impl SellOrder {
    /// Asking price as a number, when the free-text field parses.
    pub fn parsed_price(&self) -> Option<f64> {
        self.price.trim().replace(',', "").parse().ok()
    }
}

/// A customer describing the vehicle they want sourced.
#[derive(Debug, Clone, Deserialize)]
pub struct CustomOrder {
    #[serde(default)]
    pub id: Option<String>,
    pub fullname: String,
    pub phone: String,
    pub email: String,
    pub make: String,
    pub model: String,
    pub year: String,
    #[serde(default)]
    pub transmission: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
}

/// Payload of the public contact form.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

/// Payload for `POST /sell`. `images` is always an ordered URL array in
/// upload order; the backend's string re-encoding is its own business.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SellOrderPayload {
    pub fullname: String,
    pub phone: String,
    pub email: String,
    pub make: String,
    pub model: String,
    pub year: String,
    pub transmission: String,
    pub color: String,
    pub condition: Condition,
    pub description: String,
    pub location: String,
    pub price: String,
    pub images: Vec<String>,
}

/// Payload for `POST /customOrder`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CustomOrderPayload {
    pub fullname: String,
    pub phone: String,
    pub email: String,
    pub make: String,
    pub model: String,
    pub year: String,
    pub transmission: String,
    pub color: String,
    pub details: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn condition_should_classify_known_values() {
        assert_eq!(Condition::parse("Brand New"), Condition::BrandNew);
        assert_eq!(Condition::parse("excellent"), Condition::Excellent);
        assert_eq!(Condition::parse("  Good "), Condition::Good);
        assert_eq!(
            Condition::parse("needs work"),
            Condition::Other("needs work".into())
        );
    }

    #[test]
    fn condition_tone_should_be_total() {
        assert_eq!(Condition::BrandNew.tone(), ConditionTone::Purple);
        assert_eq!(Condition::Excellent.tone(), ConditionTone::Green);
        assert_eq!(Condition::Good.tone(), ConditionTone::Blue);
        assert_eq!(Condition::Fair.tone(), ConditionTone::Yellow);
        assert_eq!(
            Condition::Other("anything".into()).tone(),
            ConditionTone::Neutral
        );
    }

    #[test]
    fn sell_order_should_normalize_escaped_images() {
        let order: SellOrder = serde_json::from_value(json!({
            "fullname": "Ada Obi",
            "phone": "0800",
            "email": "ada@example.com",
            "make": "Honda",
            "model": "Accord",
            "year": "2018",
            "condition": "excellent",
            "location": "Lagos",
            "price": "4,200,000",
            "images": "[\"https:\\/\\/img\\/1.jpg\",\"https:\\/\\/img\\/2.jpg\"]"
        }))
        .unwrap();

        assert_eq!(order.images, vec!["https://img/1.jpg", "https://img/2.jpg"]);
        assert_eq!(order.condition, Some(Condition::Excellent));
        assert_eq!(order.parsed_price(), Some(4_200_000.0));
    }

    #[test]
    fn sell_order_price_should_tolerate_free_text() {
        let order: SellOrder = serde_json::from_value(json!({
            "fullname": "Ada Obi",
            "phone": "0800",
            "email": "ada@example.com",
            "make": "Honda",
            "model": "Accord",
            "year": "2018",
            "location": "Lagos",
            "price": "negotiable",
            "images": []
        }))
        .unwrap();

        assert_eq!(order.parsed_price(), None);
    }
}
