//! # Category Form
//!
//! Create-category screen plus the confirm-then-delete flow. The
//! thumbnail is optional, but while its upload is in flight the create
//! button stays disabled; an absent thumbnail submits as an empty
//! string, which is what the backend expects.

use std::sync::Arc;

use crate::client::cache::{MutationExecutor, QueryKey};
use crate::client::error::{ApiError, FieldErrors, FormError};
use crate::client::models::CategoryPayload;
use crate::client::services::catalog::CatalogApi;
use crate::client::services::image_store::{ImageStore, LocalImage};
use crate::client::view_models::car_form::FormPhase;
use crate::client::view_models::gallery::MainImageSlot;
use crate::client::view_models::validate;

pub struct CategoryForm {
    name: String,
    thumbnail: MainImageSlot,
    phase: FormPhase,
    last_error: Option<String>,
}

impl Default for CategoryForm {
    fn default() -> Self {
        Self::new()
    }
}

impl CategoryForm {
    pub fn new() -> Self {
        Self {
            name: String::new(),
            thumbnail: MainImageSlot::new(),
            phase: FormPhase::Editing,
            last_error: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.phase = FormPhase::Editing;
        self.last_error = None;
        self.name = name.into();
    }

    pub fn set_thumbnail(&mut self, image: LocalImage) {
        self.phase = FormPhase::Editing;
        self.thumbnail.set_file(image);
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        validate::required(&mut errors, "name", &self.name, "Category name");
        validate::min_length(&mut errors, "name", &self.name, 2, "Category name");
        errors
    }

    pub fn can_submit(&self) -> bool {
        matches!(self.phase, FormPhase::Editing | FormPhase::Succeeded)
            && self.validate().is_empty()
    }

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
        let thumbnail = match self.thumbnail.resolve(store).await {
            Ok(url) => url.unwrap_or_default(),
            Err(err) => return Err(self.fail(err.into())),
        };

        self.phase = FormPhase::Mutating;
        let payload = CategoryPayload {
            category_name: self.name.trim().to_string(),
            thumbnail,
        };

        match executor
            .run(&[QueryKey::Categories], || api.create_category(&payload))
            .await
        {
            Ok(_) => {
                self.phase = FormPhase::Succeeded;
                self.name.clear();
                self.thumbnail.clear();
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
}

/// Deleting a category is destructive, so it is armed first and only a
/// confirmation for the same name actually deletes.
#[derive(Debug, Default)]
pub struct CategoryDelete {
    armed: Option<String>,
}

impl CategoryDelete {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&mut self, name: impl Into<String>) {
        self.armed = Some(name.into());
    }

    pub fn armed(&self) -> Option<&str> {
        self.armed.as_deref()
    }

    pub fn cancel(&mut self) {
        self.armed = None;
    }

    /// Run the armed delete. Without a prior [`request`](Self::request)
    /// this is a no-op.
    pub async fn confirm(
        &mut self,
        api: &CatalogApi,
        executor: &MutationExecutor,
    ) -> Result<bool, ApiError> {
        let Some(name) = self.armed.take() else {
            return Ok(false);
        };
        executor
            .run(&[QueryKey::Categories], || api.delete_category(&name))
            .await?;
        Ok(true)
    }
}
