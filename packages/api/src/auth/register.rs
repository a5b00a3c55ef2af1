//! Account creation.

use serde::Serialize;

use crate::client::ApiClient;
use crate::error::ApiError;

pub const REGISTRATION_FAILED: &str = "Registration failed";

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    /// Present only for admin sign-ups, which go to `/auth/register/admin`.
    #[serde(rename = "adminCode", skip_serializing_if = "Option::is_none")]
    pub admin_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RegistrationError {
    #[error("Invalid admin code")]
    InvalidAdminCode,
    #[error(transparent)]
    Request(#[from] ApiError),
}

impl RegistrationError {
    pub fn user_message(&self) -> String {
        match self {
            RegistrationError::InvalidAdminCode => self.to_string(),
            RegistrationError::Request(e) => e.user_message(REGISTRATION_FAILED),
        }
    }
}

impl Registration {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            phone: phone.into(),
            admin_code: None,
        }
    }

    /// Turn this into an admin sign-up. The entered code must match the one
    /// the client was built with; with no configured code nobody can sign up
    /// as admin.
    pub fn as_admin(
        mut self,
        entered: &str,
        configured: Option<&str>,
    ) -> Result<Self, RegistrationError> {
        match configured {
            Some(code) if code == entered => {
                self.admin_code = Some(entered.to_string());
                Ok(self)
            }
            _ => Err(RegistrationError::InvalidAdminCode),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.admin_code.is_some()
    }
}

/// Validate and submit a registration form. The admin code is checked
/// before anything is sent.
pub async fn submit_registration(
    client: &ApiClient,
    form: Registration,
    admin: Option<(&str, Option<&str>)>,
) -> Result<(), RegistrationError> {
    let registration = match admin {
        Some((entered, configured)) => form.as_admin(entered, configured)?,
        None => form,
    };
    client.register(&registration).await?;
    tracing::info!(admin = registration.is_admin(), "account registered");
    Ok(())
}
