//! # REST client for the CRM backend
//!
//! [`ApiClient`] is a thin, cloneable wrapper around a `reqwest::Client` and the
//! configured base URL. It knows how to build `/api/...` URLs, how to attach
//! the session token, and how to turn a response into either a decoded body
//! or an [`ApiError`]. The endpoint methods themselves live next to the
//! features that use them ([`crate::auth`], [`crate::customers`],
//! [`crate::users`]).
//!
//! The token travels as the raw value of the `authorization` header, with no
//! `Bearer` prefix, which is what the backend expects.

use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use store::config::ApiConfig;

use crate::auth::{AuthBackend, Credentials, Registration};
use crate::error::{ApiError, ErrorBody};
use store::Session;

pub const AUTHORIZATION_HEADER: &str = "authorization";

/// Cloneable handle to the backend.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub(crate) fn get(&self, path: &str) -> RequestBuilder {
        self.http.get(self.config.endpoint(path))
    }

    pub(crate) fn post(&self, path: &str) -> RequestBuilder {
        self.http.post(self.config.endpoint(path))
    }

    pub(crate) fn put(&self, path: &str) -> RequestBuilder {
        self.http.put(self.config.endpoint(path))
    }

    pub(crate) fn delete(&self, path: &str) -> RequestBuilder {
        self.http.delete(self.config.endpoint(path))
    }

    /// Send and decode a JSON body.
    pub(crate) async fn send_json<T: DeserializeOwned>(req: RequestBuilder) -> Result<T, ApiError> {
        let resp = Self::send(req).await?;
        Ok(resp.json::<T>().await?)
    }

    /// Send and ignore whatever body comes back.
    pub(crate) async fn send_unit(req: RequestBuilder) -> Result<(), ApiError> {
        Self::send(req).await.map(|_| ())
    }

    async fn send(req: RequestBuilder) -> Result<Response, ApiError> {
        let resp = req.send().await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let message = resp
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message);
        tracing::debug!(status = status.as_u16(), ?message, "request rejected");
        Err(ApiError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

/// Attach the session token to a request.
pub(crate) fn authorized(req: RequestBuilder, token: &str) -> RequestBuilder {
    req.header(AUTHORIZATION_HEADER, token)
}

#[derive(Serialize)]
struct ContactBody<'a> {
    contact: &'a str,
}

#[derive(Serialize)]
struct VerifyOtpBody<'a> {
    contact: &'a str,
    otp: &'a str,
}

#[derive(Serialize)]
struct ResetPasswordBody<'a> {
    contact: &'a str,
    otp: &'a str,
    #[serde(rename = "newPassword")]
    new_password: &'a str,
}

impl AuthBackend for ApiClient {
    async fn check_token(&self, token: &str) -> Result<(), ApiError> {
        Self::send_unit(authorized(self.get("/auth/check"), token)).await
    }

    async fn login(&self, credentials: &Credentials) -> Result<Session, ApiError> {
        Self::send_json(self.post("/auth/login").json(credentials)).await
    }

    async fn send_otp(&self, contact: &str) -> Result<(), ApiError> {
        Self::send_unit(self.post("/auth/otp").json(&ContactBody { contact })).await
    }

    async fn verify_otp(&self, contact: &str, otp: &str) -> Result<Session, ApiError> {
        Self::send_json(
            self.post("/auth/verify-otp")
                .json(&VerifyOtpBody { contact, otp }),
        )
        .await
    }
}

impl ApiClient {
    /// Create an account. Admin registrations go to their own endpoint.
    pub async fn register(&self, registration: &Registration) -> Result<(), ApiError> {
        let path = if registration.admin_code.is_some() {
            "/auth/register/admin"
        } else {
            "/auth/register"
        };
        Self::send_unit(self.post(path).json(registration)).await
    }

    /// Ask the backend to send a password-reset code to an email or phone.
    pub async fn send_password_reset(&self, contact: &str) -> Result<(), ApiError> {
        Self::send_unit(
            self.post("/auth/send-password-reset")
                .json(&ContactBody { contact }),
        )
        .await
    }

    /// Set a new password using the code from [`send_password_reset`](Self::send_password_reset).
    pub async fn reset_password(
        &self,
        contact: &str,
        otp: &str,
        new_password: &str,
    ) -> Result<(), ApiError> {
        Self::send_unit(self.post("/auth/reset-password").json(&ResetPasswordBody {
            contact,
            otp,
            new_password,
        }))
        .await
    }
}
