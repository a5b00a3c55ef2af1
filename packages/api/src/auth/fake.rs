//! In-memory [`AuthBackend`] for the flow tests.

use std::cell::{Cell, RefCell};

use chrono::{DateTime, Utc};
use store::{Role, ServerTimestamp, Session, UserProfile};

use super::{AuthBackend, Credentials};
use crate::error::ApiError;

pub const VALID_TOKEN: &str = "tok-valid";
pub const VALID_OTP: &str = "123456";

pub struct FakeBackend {
    pub check_calls: Cell<usize>,
    pub otp_sent_to: RefCell<Vec<String>>,
    pub login_reply: RefCell<Result<Session, ApiError>>,
    pub otp_reply: RefCell<Result<(), ApiError>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            check_calls: Cell::new(0),
            otp_sent_to: RefCell::new(Vec::new()),
            login_reply: RefCell::new(Err(ApiError::rejected(401, "Invalid credentials"))),
            otp_reply: RefCell::new(Ok(())),
        }
    }

    pub fn with_login(self, reply: Result<Session, ApiError>) -> Self {
        *self.login_reply.borrow_mut() = reply;
        self
    }
}

pub fn user(is_verified: bool, verified_at: Option<DateTime<Utc>>) -> UserProfile {
    UserProfile {
        id: Some("u-1".into()),
        name: "Dewi".into(),
        email: "dewi@example.com".into(),
        phone: Some("+628123456789".into()),
        role: Role::User,
        is_verified,
        verified_date: verified_at.map(ServerTimestamp::from_datetime),
    }
}

pub fn session(user: UserProfile) -> Session {
    Session {
        token: VALID_TOKEN.into(),
        refresh_token: "refresh".into(),
        user,
    }
}

impl AuthBackend for FakeBackend {
    async fn check_token(&self, token: &str) -> Result<(), ApiError> {
        self.check_calls.set(self.check_calls.get() + 1);
        if token == VALID_TOKEN {
            Ok(())
        } else {
            Err(ApiError::rejected(401, "Unauthorized"))
        }
    }

    async fn login(&self, _credentials: &Credentials) -> Result<Session, ApiError> {
        self.login_reply.borrow().clone()
    }

    async fn send_otp(&self, contact: &str) -> Result<(), ApiError> {
        self.otp_sent_to.borrow_mut().push(contact.to_string());
        self.otp_reply.borrow().clone()
    }

    async fn verify_otp(&self, _contact: &str, otp: &str) -> Result<Session, ApiError> {
        if otp == VALID_OTP {
            Ok(session(user(true, Some(Utc::now()))))
        } else {
            Err(ApiError::rejected(400, "Invalid OTP"))
        }
    }
}
