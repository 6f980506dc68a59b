//! # Car Listing Form
//!
//! State machine behind the add-vehicle and edit-vehicle screens. The
//! two modes are explicit variants sharing one validation pass; the
//! submit pipeline is validate → upload → mutate, and every failure
//! drops back to editing with the entered values intact.

use std::sync::Arc;

use crate::client::cache::{MutationExecutor, QueryKey};
use crate::client::error::{FieldErrors, FormError};
use crate::client::models::{Car, CarPayload, FuelType, GearType};
use crate::client::services::catalog::CatalogApi;
use crate::client::services::image_store::{ImageStore, LocalImage};
use crate::client::view_models::gallery::{GalleryDraft, MainImageSlot};
use crate::client::view_models::validate;

/// Which screen this form is backing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CarFormMode {
    Create,
    Update { id: String },
}

/// Where one submission currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormPhase {
    #[default]
    Editing,
    Uploading,
    Mutating,
    Succeeded,
}

/// Editable field values; numbers stay optional until the user picks
/// them so "not filled in" is distinguishable from zero.
#[derive(Debug, Clone, Default)]
pub struct CarFields {
    pub title: String,
    pub description: String,
    pub price: i64,
    pub category: String,
    pub brand_name: String,
    pub model: String,
    pub year: Option<i32>,
    pub fuel_type: Option<FuelType>,
    pub color: String,
    pub seat: i64,
    pub type_of_gear: Option<GearType>,
    pub featured: Option<String>,
}

pub struct CarForm {
    mode: CarFormMode,
    fields: CarFields,
    main_image: MainImageSlot,
    gallery: GalleryDraft,
    phase: FormPhase,
    last_error: Option<String>,
}

impl CarForm {
    pub fn create() -> Self {
        Self {
            mode: CarFormMode::Create,
            fields: CarFields::default(),
            main_image: MainImageSlot::new(),
            gallery: GalleryDraft::new(),
            phase: FormPhase::Editing,
            last_error: None,
        }
    }

    /// Edit mode, prefilled from the fetched car. The persisted gallery
    /// seeds the draft; the persisted main image stays unless replaced.
    pub fn update(car: &Car) -> Self {
        Self {
            mode: CarFormMode::Update { id: car.id.clone() },
            fields: CarFields {
                title: car.title.clone(),
                description: car.description.clone(),
                price: car.price,
                category: car.category.clone(),
                brand_name: car.brand_name.clone(),
                model: car.model.clone(),
                year: Some(car.year),
                fuel_type: Some(car.fuel_type),
                color: car.color.clone(),
                seat: i64::from(car.seat),
                type_of_gear: Some(car.type_of_gear),
                featured: car.featured.clone(),
            },
            main_image: MainImageSlot::with_persisted(car.image_url.clone()),
            gallery: GalleryDraft::with_persisted(car.car_gallery.clone()),
            phase: FormPhase::Editing,
            last_error: None,
        }
    }

    pub fn mode(&self) -> &CarFormMode {
        &self.mode
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn fields(&self) -> &CarFields {
        &self.fields
    }

    /// Any edit drops a previous success/failure back to editing.
    pub fn fields_mut(&mut self) -> &mut CarFields {
        self.phase = FormPhase::Editing;
        &mut self.fields
    }

    pub fn set_main_image(&mut self, image: LocalImage) {
        self.phase = FormPhase::Editing;
        self.main_image.set_file(image);
    }

    pub fn clear_main_image(&mut self) {
        self.phase = FormPhase::Editing;
        self.main_image.clear();
    }

    pub fn add_gallery_file(&mut self, image: LocalImage) {
        self.phase = FormPhase::Editing;
        self.gallery.add_file(image);
    }

    pub fn remove_gallery_image(&mut self, index: usize) -> bool {
        self.phase = FormPhase::Editing;
        self.gallery.remove(index)
    }

    pub fn gallery(&self) -> &GalleryDraft {
        &self.gallery
    }

    pub fn main_image(&self) -> &MainImageSlot {
        &self.main_image
    }

    /// Submission stays disabled while an upload or mutation is in
    /// flight, or while validation fails.
    pub fn can_submit(&self) -> bool {
        matches!(self.phase, FormPhase::Editing | FormPhase::Succeeded)
            && self.validate().is_empty()
    }

    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        let fields = &self.fields;
        validate::required(&mut errors, "title", &fields.title, "Title");
        validate::required(&mut errors, "brand_name", &fields.brand_name, "Brand name");
        validate::required(&mut errors, "description", &fields.description, "Description");
        validate::positive(&mut errors, "price", fields.price, "Price");
        validate::required(&mut errors, "category", &fields.category, "Category");
        validate::required(&mut errors, "model", &fields.model, "Model");
        validate::year_in_range(&mut errors, "year", fields.year);
        validate::required_choice(&mut errors, "fuel_type", &fields.fuel_type, "Fuel type");
        validate::required(&mut errors, "color", &fields.color, "Color");
        validate::positive(&mut errors, "seat", fields.seat, "Seats");
        validate::required_choice(&mut errors, "type_of_gear", &fields.type_of_gear, "Gear type");
        if self.mode == CarFormMode::Create && self.main_image.is_empty() {
            errors.push("image", "Main image is required");
        }
        errors
    }

    /// Run one submission to completion. On success a create form
    /// resets; an update form keeps its values.
    pub async fn submit(
        &mut self,
        api: &CatalogApi,
        executor: &MutationExecutor,
        store: &Arc<dyn ImageStore>,
    ) -> Result<(), FormError> {
        self.last_error = None;

        let errors = self.validate();
        if !errors.is_empty() {
            self.phase = FormPhase::Editing;
            return Err(FormError::Invalid(errors));
        }

        self.phase = FormPhase::Uploading;
        let image_url = match self.main_image.resolve(store).await {
            Ok(url) => url.unwrap_or_default(),
            Err(err) => return Err(self.fail(err.into())),
        };
        let car_gallery = match self.gallery.resolve(store).await {
            Ok(urls) => urls,
            Err(err) => return Err(self.fail(err.into())),
        };

        self.phase = FormPhase::Mutating;
        let payload = CarPayload {
            title: self.fields.title.clone(),
            description: self.fields.description.clone(),
            price: self.fields.price,
            image_url,
            car_gallery,
            category: self.fields.category.clone(),
            brand_name: self.fields.brand_name.clone(),
            model: self.fields.model.clone(),
            year: self.fields.year.unwrap_or_default(),
            fuel_type: self.fields.fuel_type.unwrap_or(FuelType::Petrol),
            color: self.fields.color.clone(),
            seat: u32::try_from(self.fields.seat).unwrap_or_default(),
            type_of_gear: self.fields.type_of_gear.unwrap_or(GearType::Manual),
            featured: self.fields.featured.clone(),
        };

        let invalidates = match &self.mode {
            CarFormMode::Create => vec![QueryKey::Cars],
            CarFormMode::Update { id } => vec![QueryKey::Cars, QueryKey::Car(id.clone())],
        };

        match executor
            .run(&invalidates, || api.create_listing(&payload))
            .await
        {
            Ok(_) => {
                self.phase = FormPhase::Succeeded;
                if self.mode == CarFormMode::Create {
                    self.reset();
                }
                Ok(())
            }
            Err(err) => Err(self.fail(err.into())),
        }
    }

    fn fail(&mut self, error: FormError) -> FormError {
        self.phase = FormPhase::Editing;
        self.last_error = Some(error.to_string());
        error
    }

    /// Back to a blank create form, previews released.
    fn reset(&mut self) {
        self.fields = CarFields::default();
        self.main_image.clear();
        self.gallery.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_fields() -> CarFields {
        CarFields {
            title: "Toyota Corolla 2019".into(),
            description: "Clean title, one owner".into(),
            price: 8_500_000,
            category: "Sedan".into(),
            brand_name: "Toyota".into(),
            model: "Corolla".into(),
            year: Some(2019),
            fuel_type: Some(FuelType::Petrol),
            color: "silver".into(),
            seat: 5,
            type_of_gear: Some(GearType::Automatic),
            featured: None,
        }
    }

    #[test]
    fn missing_color_should_block_submission() {
        let mut form = CarForm::create();
        *form.fields_mut() = CarFields {
            color: String::new(),
            ..filled_fields()
        };
        form.set_main_image(LocalImage::new("main.jpg", vec![1u8]));

        let errors = form.validate();
        assert_eq!(errors.get("color"), Some("Color is required"));
        assert!(!form.can_submit());
    }

    #[test]
    fn create_mode_should_require_a_main_image() {
        let mut form = CarForm::create();
        *form.fields_mut() = filled_fields();

        let errors = form.validate();
        assert_eq!(errors.get("image"), Some("Main image is required"));

        form.set_main_image(LocalImage::new("main.jpg", vec![1u8]));
        assert!(form.validate().is_empty());
        assert!(form.can_submit());
    }

    #[test]
    fn update_mode_should_not_require_a_new_image() {
        let car = sample_car();
        let form = CarForm::update(&car);

        assert!(form.validate().is_empty());
        assert_eq!(
            form.mode(),
            &CarFormMode::Update { id: "42".to_string() }
        );
        assert_eq!(form.fields().title, "Corolla");
        assert_eq!(form.gallery().persisted().len(), 2);
    }

    #[test]
    fn nonpositive_numbers_should_be_flagged() {
        let mut form = CarForm::create();
        *form.fields_mut() = CarFields {
            price: 0,
            seat: 0,
            ..filled_fields()
        };

        let errors = form.validate();
        assert_eq!(errors.get("price"), Some("Price must be greater than 0"));
        assert_eq!(errors.get("seat"), Some("Seats must be greater than 0"));
    }

    fn sample_car() -> Car {
        serde_json::from_value(serde_json::json!({
            "id": "42",
            "title": "Corolla",
            "description": "d",
            "price": 1_000_000,
            "image_url": "https://cdn/main.jpg",
            "car_gallery": ["https://cdn/1.jpg", "https://cdn/2.jpg"],
            "category": "Sedan",
            "brand_name": "Toyota",
            "model": "Corolla",
            "year": 2019,
            "fuel_type": "petrol",
            "color": "silver",
            "seat": 5,
            "type_of_gear": "automatic"
        }))
        .unwrap_or_else(|err| panic!("sample car should deserialize: {err}"))
    }
}
