//! Login page: credentials first, then the OTP challenge when the account
//! needs re-verification.

use std::time::Duration;

use api::auth::otp::{
    send_code, verify_code, OtpChallenge, OtpMethod, OtpStage, EXHAUSTED_LOGOUT_DELAY,
    RESENDS_EXHAUSTED,
};
use api::auth::{submit_login, Credentials, LoginState};
use chrono::Utc;
use dioxus::prelude::*;
use ui::icons::{FaEye, FaEyeSlash};
use ui::timer::{sleep, use_interval};
use ui::views::{ModalOverlay, OtpInput};
use ui::{use_session, Icon};

use crate::Route;

#[component]
pub fn Login() -> Element {
    let session = use_session();
    let nav = use_navigator();
    let mut email_or_phone = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut show_password = use_signal(|| false);
    let mut submitting = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);
    let mut challenge = use_signal(|| Option::<OtpChallenge>::None);

    // OTP countdown, one tick per second while a code is being entered
    let ticker_session = session.clone();
    use_interval(Duration::from_secs(1), move || {
        let entering = challenge
            .read()
            .as_ref()
            .is_some_and(|c| c.stage() == OtpStage::EnteringCode);
        if !entering {
            return;
        }
        let exhausted = challenge.write().as_mut().is_some_and(|c| c.tick());
        if exhausted {
            tracing::warn!("otp resends exhausted, signing out");
            error.set(Some(RESENDS_EXHAUSTED.to_string()));
            let session = ticker_session.clone();
            spawn(async move {
                sleep(EXHAUSTED_LOGOUT_DELAY).await;
                session.sign_out();
            });
        }
    });

    let login_session = session.clone();
    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        let session = login_session.clone();
        spawn(async move {
            error.set(None);
            submitting.set(true);
            let credentials = Credentials::new(email_or_phone(), password());
            let state =
                submit_login(&session.client, &session.tokens, &credentials, Utc::now()).await;
            submitting.set(false);
            match state {
                LoginState::Authenticated => {
                    nav.push(Route::Home {});
                }
                LoginState::OtpRequired(otp) => challenge.set(Some(otp)),
                LoginState::Failed(message) => error.set(Some(message)),
                LoginState::Idle | LoginState::Submitting => {}
            }
        });
    };

    let otp_session = session.clone();
    let send_otp = use_callback(move |method: OtpMethod| {
        let session = otp_session.clone();
        spawn(async move {
            let Some(current) = challenge() else {
                return;
            };
            match send_code(&session.client, &current, method).await {
                Ok(contact) => {
                    error.set(None);
                    if let Some(c) = challenge.write().as_mut() {
                        c.begin(method, contact);
                    }
                }
                Err(e) => error.set(Some(e.user_message())),
            }
        });
    });

    let resend = move |_| {
        let method = challenge.read().as_ref().and_then(|c| c.method());
        let allowed = challenge
            .write()
            .as_mut()
            .is_some_and(|c| c.register_resend());
        if let (true, Some(method)) = (allowed, method) {
            send_otp.call(method);
        }
    };

    let verify_session = session.clone();
    let verify = move |_| {
        let session = verify_session.clone();
        spawn(async move {
            let Some(current) = challenge() else {
                return;
            };
            match verify_code(&session.client, &session.tokens, current.contact(), current.code())
                .await
            {
                Ok(_) => {
                    challenge.set(None);
                    nav.push(Route::Home {});
                }
                Err(e) => error.set(Some(e.user_message())),
            }
        });
    };

    // Back to the login form. The stored session was never written.
    let mut dismiss = move || {
        challenge.set(None);
        error.set(None);
    };

    let close_otp = EventHandler::new(move |_: ()| dismiss());

    let current = challenge();
    let otp_stage = current.as_ref().map(|c| c.stage());
    let otp_contact = current
        .as_ref()
        .map(|c| c.contact().to_string())
        .unwrap_or_default();
    let countdown = current.as_ref().map_or(0, |c| c.countdown());
    let can_resend = current.as_ref().is_some_and(|c| c.can_resend());
    let code_ready = current.as_ref().is_some_and(|c| c.code().is_some());

    rsx! {
        div {
            class: "auth-page",
            div {
                class: "auth-card",
                h2 { "Log in to your account" }

                if let (Some(err), None) = (error(), otp_stage) {
                    div { class: "alert error", "{err}" }
                }

                form {
                    onsubmit: handle_login,
                    div {
                        class: "field",
                        label { r#for: "emailOrPhone", "Email / phone number" }
                        input {
                            id: "emailOrPhone",
                            r#type: "text",
                            required: true,
                            value: email_or_phone(),
                            oninput: move |evt: FormEvent| email_or_phone.set(evt.value()),
                        }
                    }
                    div {
                        class: "field",
                        label { r#for: "password", "Password" }
                        div {
                            class: "password",
                            input {
                                id: "password",
                                r#type: if show_password() { "text" } else { "password" },
                                required: true,
                                value: password(),
                                oninput: move |evt: FormEvent| password.set(evt.value()),
                            }
                            button {
                                r#type: "button",
                                class: "reveal",
                                onclick: move |_| show_password.toggle(),
                                if show_password() {
                                    Icon { width: 16, height: 16, icon: FaEyeSlash }
                                } else {
                                    Icon { width: 16, height: 16, icon: FaEye }
                                }
                            }
                        }
                    }
                    div {
                        class: "form-links",
                        Link { to: Route::Reset {}, "Forgot password?" }
                    }
                    button {
                        r#type: "submit",
                        class: "btn primary wide",
                        disabled: submitting(),
                        if submitting() { "Signing in..." } else { "Sign in" }
                    }
                }

                p {
                    class: "form-footer",
                    "Don't have an account? "
                    Link { to: Route::Register {}, "Register" }
                }
            }
        }

        if let Some(stage) = otp_stage {
            ModalOverlay {
                on_close: stage.is_dismissable().then_some(close_otp),
                div {
                    class: "modal-body",
                    {match stage {
                        OtpStage::ChoosingMethod => rsx! {
                            h3 { "Verify your account" }
                            p { "Choose where we should send your verification code." }
                            if let Some(err) = error() {
                                div { class: "alert error", "{err}" }
                            }
                            div {
                                class: "modal-actions",
                                button {
                                    class: "btn primary",
                                    onclick: move |_| send_otp.call(OtpMethod::Email),
                                    "Email"
                                }
                                button {
                                    class: "btn secondary",
                                    onclick: move |_| send_otp.call(OtpMethod::WhatsApp),
                                    "WhatsApp"
                                }
                                button {
                                    class: "btn secondary",
                                    onclick: move |_| dismiss(),
                                    "Cancel"
                                }
                            }
                        },
                        OtpStage::EnteringCode => rsx! {
                            h3 { "Enter verification code" }
                            p { "We sent a 6-digit code to {otp_contact}." }
                            if let Some(err) = error() {
                                div { class: "alert error", "{err}" }
                            }
                            OtpInput { challenge }
                            div {
                                class: "otp-resend",
                                if can_resend {
                                    button { class: "link", onclick: resend, "Resend code" }
                                } else if countdown > 0 {
                                    span { "Resend code in {countdown}s" }
                                }
                            }
                            button {
                                class: "btn primary wide",
                                disabled: !code_ready,
                                onclick: verify,
                                "Verify"
                            }
                        },
                        OtpStage::Exhausted => rsx! {
                            h3 { "Verification failed" }
                            div { class: "alert error", "{RESENDS_EXHAUSTED}" }
                        },
                    }}
                }
            }
        }
    }
}
