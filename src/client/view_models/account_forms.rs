//! # Login and Create-Admin Forms
//!
//! Login exchanges credentials for the opaque session token and hands
//! it to the session store; "remember me" only changes how long that
//! token is kept. Create-admin is a thin form with a password
//! confirmation check.

use crate::client::error::{FieldErrors, FormError};
use crate::client::models::{Credentials, NewAdmin};
use crate::client::services::catalog::CatalogApi;
use crate::client::services::session::SessionStore;
use crate::client::view_models::car_form::FormPhase;
use crate::client::view_models::validate;

#[derive(Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub remember: bool,
    phase: FormPhase,
    last_error: Option<String>,
}

impl LoginForm {
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
        validate::email(&mut errors, "email", &self.email);
        validate::required(&mut errors, "password", &self.password, "Password");
        errors
    }

    /// Log in and establish the session. Failure keeps the entered
    /// credentials so the user can correct and retry.
    pub async fn submit(
        &mut self,
        api: &CatalogApi,
        session: &SessionStore,
    ) -> Result<(), FormError> {
        self.last_error = None;

        let errors = self.validate();
        if !errors.is_empty() {
            return Err(FormError::Invalid(errors));
        }

        self.phase = FormPhase::Mutating;
        let credentials = Credentials {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        };

        match api.login(&credentials).await {
            Ok(token) => {
                session.establish(token, self.remember);
                self.phase = FormPhase::Succeeded;
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

#[derive(Default)]
pub struct CreateAdminForm {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    phase: FormPhase,
    last_error: Option<String>,
}

impl CreateAdminForm {
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
        validate::email(&mut errors, "email", &self.email);
        validate::required(&mut errors, "password", &self.password, "Password");
        validate::min_length(&mut errors, "password", &self.password, 8, "Password");
        if self.password != self.confirm_password {
            errors.push("confirm_password", "Passwords do not match");
        }
        errors
    }

    pub async fn submit(&mut self, api: &CatalogApi) -> Result<(), FormError> {
        self.last_error = None;

        let errors = self.validate();
        if !errors.is_empty() {
            return Err(FormError::Invalid(errors));
        }

        self.phase = FormPhase::Mutating;
        let payload = NewAdmin {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        };

        match api.create_admin(&payload).await {
            Ok(_) => {
                self.phase = FormPhase::Succeeded;
                self.email.clear();
                self.password.clear();
                self.confirm_password.clear();
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_form_should_validate_email_shape() {
        let mut form = LoginForm::new();
        form.email = "nope".into();
        form.password = "secret".into();

        let errors = form.validate();
        assert_eq!(errors.get("email"), Some("Please enter a valid email address"));
    }

    #[test]
    fn login_form_should_pass_with_plausible_credentials() {
        let mut form = LoginForm::new();
        form.email = "admin@forecourt.example".into();
        form.password = "secret".into();
        assert!(form.validate().is_empty());
    }

    #[test]
    fn create_admin_should_require_matching_passwords() {
        let mut form = CreateAdminForm::new();
        form.email = "admin@forecourt.example".into();
        form.password = "longenough".into();
        form.confirm_password = "different".into();

        let errors = form.validate();
        assert_eq!(errors.get("confirm_password"), Some("Passwords do not match"));
    }

    #[test]
    fn create_admin_should_require_a_long_password() {
        let mut form = CreateAdminForm::new();
        form.email = "admin@forecourt.example".into();
        form.password = "short".into();
        form.confirm_password = "short".into();

        let errors = form.validate();
        assert!(errors.get("password").is_some());
    }
}
