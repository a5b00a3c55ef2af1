//! # Authentication and session lifecycle
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`check`] | Validate a stored token against `/api/auth/check` |
//! | [`guard`] | Decide what a guarded route shows for a given auth state |
//! | [`login`] | Credential login with the 7-day recency rule |
//! | [`otp`] | One-time-code challenge: method choice, digit entry, countdown, resend |
//! | [`register`] | Account creation and the admin-code gate |
//! | [`watchdog`] | Client-side 24-hour session timeout |
//!
//! Everything that talks to the network goes through [`AuthBackend`], which
//! [`ApiClient`](crate::ApiClient) implements. The flows take the backend as
//! a generic parameter so the tests can drive them with an in-memory fake.

pub mod check;
pub mod guard;
pub mod login;
pub mod otp;
pub mod register;
pub mod watchdog;

#[cfg(test)]
pub(crate) mod fake;

use serde::Serialize;
use store::Session;

use crate::error::ApiError;

pub use check::verify_session;
pub use guard::{GuardDecision, GuardKind, GuardState, HOME_ROUTE, LOGIN_ROUTE};
pub use login::{is_recently_verified, submit_login, verified_days, LoginState};
pub use otp::{OtpChallenge, OtpMethod, OtpStage};
pub use register::{Registration, RegistrationError};
pub use watchdog::{SessionWatchdog, WatchdogSlot};

/// The authentication endpoints the session flows depend on.
pub trait AuthBackend {
    /// Succeeds when the server still accepts `token`.
    fn check_token(&self, token: &str) -> impl std::future::Future<Output = Result<(), ApiError>>;
    fn login(
        &self,
        credentials: &Credentials,
    ) -> impl std::future::Future<Output = Result<Session, ApiError>>;
    /// Issue a one-time code to an email address or phone number.
    fn send_otp(&self, contact: &str) -> impl std::future::Future<Output = Result<(), ApiError>>;
    fn verify_otp(
        &self,
        contact: &str,
        otp: &str,
    ) -> impl std::future::Future<Output = Result<Session, ApiError>>;
}

/// Login form body.
#[derive(Clone, Debug, Serialize)]
pub struct Credentials {
    #[serde(rename = "emailOrPhone")]
    pub email_or_phone: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email_or_phone: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email_or_phone: email_or_phone.into().trim().to_string(),
            password: password.into(),
        }
    }
}
