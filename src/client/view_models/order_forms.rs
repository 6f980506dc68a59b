//! # Public Forms
//!
//! The storefront's sell-your-car, custom-order, and contact forms.
//! They share the listing forms' submit pipeline but carry no edit
//! mode: a successful submission always resets everything, including
//! any selected files.

use std::sync::Arc;

use crate::client::cache::{MutationExecutor, QueryKey};
use crate::client::error::{FieldErrors, FormError};
use crate::client::models::{Condition, ContactMessage, CustomOrderPayload, SellOrderPayload};
use crate::client::services::catalog::CatalogApi;
use crate::client::services::image_store::{ImageStore, LocalImage};
use crate::client::view_models::car_form::FormPhase;
use crate::client::view_models::gallery::GalleryDraft;
use crate::client::view_models::validate;

/// Contact and vehicle details shared by the two order forms.
#[derive(Debug, Clone, Default)]
pub struct OrderFields {
    pub fullname: String,
    pub phone: String,
    pub email: String,
    pub make: String,
    pub model: String,
    pub year: String,
    pub transmission: String,
    pub color: String,
}

fn validate_order_fields(errors: &mut FieldErrors, fields: &OrderFields) {
    validate::required(errors, "fullname", &fields.fullname, "Full name");
    validate::required(errors, "phone", &fields.phone, "Phone number");
    validate::email(errors, "email", &fields.email);
    validate::required(errors, "make", &fields.make, "Make");
    validate::required(errors, "model", &fields.model, "Model");
    validate::required(errors, "year", &fields.year, "Year");
}

/// Sell-your-car form: order fields plus location, asking price,
/// condition, and photos.
#[derive(Default)]
pub struct SellForm {
    pub fields: OrderFields,
    pub location: String,
    pub price: String,
    pub condition: Option<Condition>,
    pub description: String,
    images: GalleryDraft,
    phase: FormPhase,
    last_error: Option<String>,
}

impl SellForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn add_image(&mut self, image: LocalImage) {
        self.phase = FormPhase::Editing;
        self.images.add_file(image);
    }

    pub fn remove_image(&mut self, index: usize) -> bool {
        self.phase = FormPhase::Editing;
        self.images.remove(index)
    }

    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        validate_order_fields(&mut errors, &self.fields);
        validate::required(&mut errors, "location", &self.location, "Location");
        validate::required(&mut errors, "price", &self.price, "Asking price");
        validate::required_choice(&mut errors, "condition", &self.condition, "Condition");
        errors
    }

    pub fn can_submit(&self) -> bool {
        matches!(self.phase, FormPhase::Editing | FormPhase::Succeeded)
            && self.validate().is_empty()
    }

    /// Upload every photo (in selection order), then submit. Success
    /// resets the whole form, files included.
    pub async fn submit(
        &mut self,
        api: &CatalogApi,
        executor: &MutationExecutor,
        store: &Arc<dyn ImageStore>,
    ) -> Result<(), FormError> {
        self.last_error = None;

        let errors = self.validate();
        if !errors.is_empty() {
            return Err(FormError::Invalid(errors));
        }

        self.phase = FormPhase::Uploading;
        let images = match self.images.resolve(store).await {
            Ok(urls) => urls,
            Err(err) => return Err(self.fail(err.into())),
        };

        self.phase = FormPhase::Mutating;
        let payload = SellOrderPayload {
            fullname: self.fields.fullname.clone(),
            phone: self.fields.phone.clone(),
            email: self.fields.email.clone(),
            make: self.fields.make.clone(),
            model: self.fields.model.clone(),
            year: self.fields.year.clone(),
            transmission: self.fields.transmission.clone(),
            color: self.fields.color.clone(),
            condition: self
                .condition
                .clone()
                .unwrap_or_else(|| Condition::Other(String::new())),
            description: self.description.clone(),
            location: self.location.clone(),
            price: self.price.clone(),
            images,
        };

        match executor
            .run(&[QueryKey::SellOrders], || api.submit_sell_order(&payload))
            .await
        {
            Ok(_) => {
                self.phase = FormPhase::Succeeded;
                self.reset();
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

    fn reset(&mut self) {
        self.fields = OrderFields::default();
        self.location.clear();
        self.price.clear();
        self.condition = None;
        self.description.clear();
        self.images.clear();
    }
}

/// Custom-order form: order fields plus free-text wish details.
#[derive(Default)]
pub struct CustomOrderForm {
    pub fields: OrderFields,
    pub details: String,
    phase: FormPhase,
    last_error: Option<String>,
}

impl CustomOrderForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        validate_order_fields(&mut errors, &self.fields);
        errors
    }

    pub async fn submit(
        &mut self,
        api: &CatalogApi,
        executor: &MutationExecutor,
    ) -> Result<(), FormError> {
        self.last_error = None;

        let errors = self.validate();
        if !errors.is_empty() {
            return Err(FormError::Invalid(errors));
        }

        self.phase = FormPhase::Mutating;
        let payload = CustomOrderPayload {
            fullname: self.fields.fullname.clone(),
            phone: self.fields.phone.clone(),
            email: self.fields.email.clone(),
            make: self.fields.make.clone(),
            model: self.fields.model.clone(),
            year: self.fields.year.clone(),
            transmission: self.fields.transmission.clone(),
            color: self.fields.color.clone(),
            details: self.details.clone(),
        };

        match executor
            .run(&[QueryKey::CustomOrders], || {
                api.submit_custom_order(&payload)
            })
            .await
        {
            Ok(_) => {
                self.phase = FormPhase::Succeeded;
                self.fields = OrderFields::default();
                self.details.clear();
                Ok(())
            }
            Err(err) => {
                self.phase = FormPhase::Editing;
                self.last_error = Some(err.to_string());
                Err(err.into())
            }
        }
    }
}

/// Contact-us form.
#[derive(Default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    phase: FormPhase,
    last_error: Option<String>,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        validate::required(&mut errors, "name", &self.name, "Name");
        validate::email(&mut errors, "email", &self.email);
        validate::required(&mut errors, "message", &self.message, "Message");
        errors
    }

    pub async fn submit(&mut self, api: &CatalogApi) -> Result<(), FormError> {
        self.last_error = None;

        let errors = self.validate();
        if !errors.is_empty() {
            return Err(FormError::Invalid(errors));
        }

        self.phase = FormPhase::Mutating;
        let payload = ContactMessage {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            message: self.message.clone(),
        };

        match api.submit_contact(&payload).await {
            Ok(_) => {
                self.phase = FormPhase::Succeeded;
                self.name.clear();
                self.email.clear();
                self.phone.clear();
                self.message.clear();
                Ok(())
            }
            Err(err) => {
                self.phase = FormPhase::Editing;
                self.last_error = Some(err.to_string());
                Err(err.into())
            }
        }
    }
}
