//! # One-time-code challenge
//!
//! Shown when a login needs step-up verification. The user picks a delivery
//! method, receives a six-digit code and types it into six single-digit
//! fields. A resend is offered once the 60-second countdown runs out, at most
//! [`MAX_RESENDS`] times; when the countdown runs out with no resends left
//! the challenge is [`OtpStage::Exhausted`] and the client signs out after
//! [`EXHAUSTED_LOGOUT_DELAY`].
//!
//! [`OtpChallenge`] is plain synchronous state so the view can keep it in a
//! signal and mutate it from event handlers and the one-second ticker. The
//! network half lives in [`send_code`] and [`verify_code`], which never hold
//! on to the challenge across an await.

use std::time::Duration;

use store::{KeyValueStore, Session, TokenStore, UserProfile};

use super::AuthBackend;
use crate::error::ApiError;

pub const OTP_LENGTH: usize = 6;
pub const RESEND_COOLDOWN_SECS: u32 = 60;
pub const MAX_RESENDS: u32 = 3;
pub const EXHAUSTED_LOGOUT_DELAY: Duration = Duration::from_secs(3);

pub const INVALID_OTP: &str = "Invalid OTP. Please try again.";
pub const RESENDS_EXHAUSTED: &str =
    "Maximum OTP resend attempts reached. Redirecting to login page.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OtpMethod {
    Email,
    WhatsApp,
}

impl OtpMethod {
    pub fn label(self) -> &'static str {
        match self {
            OtpMethod::Email => "Email",
            OtpMethod::WhatsApp => "WhatsApp",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OtpStage {
    #[default]
    ChoosingMethod,
    EnteringCode,
    /// No resends left. Terminal.
    Exhausted,
}

impl OtpStage {
    /// Whether the user may close the challenge and go back to the login
    /// form. An exhausted challenge ends in a forced sign-out instead.
    pub fn is_dismissable(self) -> bool {
        !matches!(self, OtpStage::Exhausted)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OtpError {
    #[error("No phone number is registered for this account.")]
    MissingPhone,
    #[error("Please enter all 6 digits.")]
    IncompleteCode,
    #[error("Invalid OTP. Please try again.")]
    InvalidCode,
    #[error(transparent)]
    Request(#[from] ApiError),
}

impl OtpError {
    pub fn user_message(&self) -> String {
        match self {
            OtpError::Request(e) => e.user_message("Failed to send OTP"),
            other => other.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct OtpChallenge {
    user: UserProfile,
    stage: OtpStage,
    method: Option<OtpMethod>,
    contact: String,
    digits: [Option<char>; OTP_LENGTH],
    countdown: u32,
    resend_count: u32,
}

impl OtpChallenge {
    /// A fresh challenge for `user`, addressed to their email until a method
    /// is chosen.
    pub fn new(user: UserProfile) -> Self {
        let contact = user.email.clone();
        Self {
            user,
            stage: OtpStage::ChoosingMethod,
            method: None,
            contact,
            digits: [None; OTP_LENGTH],
            countdown: 0,
            resend_count: 0,
        }
    }

    pub fn user(&self) -> &UserProfile {
        &self.user
    }

    pub fn stage(&self) -> OtpStage {
        self.stage
    }

    pub fn method(&self) -> Option<OtpMethod> {
        self.method
    }

    pub fn contact(&self) -> &str {
        &self.contact
    }

    pub fn countdown(&self) -> u32 {
        self.countdown
    }

    pub fn resend_count(&self) -> u32 {
        self.resend_count
    }

    /// Where a code sent by `method` goes.
    pub fn contact_for(&self, method: OtpMethod) -> Result<String, OtpError> {
        match method {
            OtpMethod::Email => Ok(self.user.email.clone()),
            OtpMethod::WhatsApp => self
                .user
                .phone
                .as_deref()
                .map(str::trim)
                .filter(|phone| !phone.is_empty())
                .map(str::to_string)
                .ok_or(OtpError::MissingPhone),
        }
    }

    /// A code went out: open code entry and restart the countdown.
    pub fn begin(&mut self, method: OtpMethod, contact: String) {
        if self.stage == OtpStage::Exhausted {
            return;
        }
        self.method = Some(method);
        self.contact = contact;
        self.stage = OtpStage::EnteringCode;
        self.countdown = RESEND_COOLDOWN_SECS;
        self.digits = [None; OTP_LENGTH];
    }

    /// Value shown in field `index`.
    pub fn digit(&self, index: usize) -> String {
        self.digits
            .get(index)
            .copied()
            .flatten()
            .map(String::from)
            .unwrap_or_default()
    }

    /// Apply an input event on field `index`. Returns the field that should
    /// take focus next, if any.
    ///
    /// Only a single digit or an empty value is accepted; anything else is
    /// ignored. When the browser hands us more than one character (typing
    /// over an existing digit) the last one wins.
    pub fn set_digit(&mut self, index: usize, input: &str) -> Option<usize> {
        if index >= OTP_LENGTH {
            return None;
        }
        match input.chars().last() {
            None => {
                self.digits[index] = None;
                index.checked_sub(1)
            }
            Some(c) if c.is_ascii_digit() => {
                self.digits[index] = Some(c);
                (index + 1 < OTP_LENGTH).then_some(index + 1)
            }
            Some(_) => None,
        }
    }

    /// Backspace on field `index`. Moves back only when the field is already
    /// empty; otherwise the input event does the clearing.
    pub fn on_backspace(&self, index: usize) -> Option<usize> {
        match self.digits.get(index) {
            Some(None) => index.checked_sub(1),
            _ => None,
        }
    }

    /// The entered code, once every field holds a digit.
    pub fn code(&self) -> Option<String> {
        self.digits.iter().copied().collect()
    }

    /// One second passed. Returns `true` on the tick that exhausts the
    /// challenge, and only that one.
    pub fn tick(&mut self) -> bool {
        if self.stage != OtpStage::EnteringCode {
            return false;
        }
        self.countdown = self.countdown.saturating_sub(1);
        if self.countdown == 0 && self.resend_count >= MAX_RESENDS {
            self.stage = OtpStage::Exhausted;
            return true;
        }
        false
    }

    pub fn can_resend(&self) -> bool {
        self.stage == OtpStage::EnteringCode
            && self.countdown == 0
            && self.resend_count < MAX_RESENDS
    }

    /// Count a resend and restart the countdown. The caller sends the code
    /// again only when this returns `true`.
    pub fn register_resend(&mut self) -> bool {
        if !self.can_resend() {
            return false;
        }
        self.resend_count += 1;
        self.countdown = RESEND_COOLDOWN_SECS;
        true
    }
}

/// Send a code for `method`. Returns the contact it went to, for
/// [`OtpChallenge::begin`].
pub async fn send_code<B: AuthBackend>(
    backend: &B,
    challenge: &OtpChallenge,
    method: OtpMethod,
) -> Result<String, OtpError> {
    let contact = challenge.contact_for(method)?;
    backend.send_otp(&contact).await?;
    tracing::info!(method = method.label(), "otp sent");
    Ok(contact)
}

/// Check the entered code and persist the session it unlocks.
pub async fn verify_code<B, K>(
    backend: &B,
    store: &TokenStore<K>,
    contact: &str,
    code: Option<String>,
) -> Result<Session, OtpError>
where
    B: AuthBackend,
    K: KeyValueStore,
{
    let code = code.ok_or(OtpError::IncompleteCode)?;
    match backend.verify_otp(contact, &code).await {
        Ok(session) => {
            store.set(&session);
            Ok(session)
        }
        Err(ApiError::Rejected { status, .. }) => {
            tracing::info!(status, "otp rejected");
            Err(OtpError::InvalidCode)
        }
        Err(e) => Err(e.into()),
    }
}
