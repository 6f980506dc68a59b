//! # Category Model
//!
//! Vehicle categories are keyed by their human-readable name, which is
//! also the lookup parameter for category-filtered listings. The glyph
//! mapping is a closed enum so every category renders with a known
//! symbol, including ones added after this build.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct Category {
    pub name: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Payload for `POST /createCategory`. `thumbnail` is an empty string
/// when no image was attached, matching what the backend expects.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryPayload {
    #[serde(rename = "categoryName")]
    pub category_name: String,
    pub thumbnail: String,
}

/// Display glyph for a category tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryGlyph {
    Sedan,
    Suv,
    Electric,
    Motorcycle,
    Bus,
    Bicycle,
    Van,
    /// Fallback for categories without a dedicated glyph.
    Generic,
}

impl CategoryGlyph {
    /// Total mapping from category name to glyph; unknown names get the
    /// generic car symbol instead of an unstyled tile.
    pub fn for_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "sedan" => CategoryGlyph::Sedan,
            "suv" => CategoryGlyph::Suv,
            "electric" => CategoryGlyph::Electric,
            "motorcycle" => CategoryGlyph::Motorcycle,
            "bus" => CategoryGlyph::Bus,
            "bicycle" => CategoryGlyph::Bicycle,
            "van" => CategoryGlyph::Van,
            _ => CategoryGlyph::Generic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn category_should_deserialize_without_optional_fields() {
        let category: Category = serde_json::from_value(json!({ "name": "SUV" })).unwrap();
        assert_eq!(category.name, "SUV");
        assert!(category.thumbnail.is_none());
        assert!(category.description.is_none());
    }

    #[test]
    fn payload_should_use_backend_field_names() {
        let payload = CategoryPayload {
            category_name: "SUV".into(),
            thumbnail: String::new(),
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["categoryName"], "SUV");
        assert_eq!(value["thumbnail"], "");
    }

    #[test]
    fn glyph_mapping_should_be_case_insensitive_and_total() {
        assert_eq!(CategoryGlyph::for_name("SUV"), CategoryGlyph::Suv);
        assert_eq!(CategoryGlyph::for_name("sedan"), CategoryGlyph::Sedan);
        assert_eq!(CategoryGlyph::for_name("Hovercraft"), CategoryGlyph::Generic);
    }
}
