//! Password reset: request a code, then set a new password with it.

use dioxus::prelude::*;
use ui::use_session;

use crate::Route;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Step {
    RequestCode,
    SetPassword,
}

#[component]
pub fn Reset() -> Element {
    let session = use_session();
    let nav = use_navigator();
    let mut step = use_signal(|| Step::RequestCode);
    let mut contact = use_signal(String::new);
    let mut otp = use_signal(String::new);
    let mut new_password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut busy = use_signal(|| false);

    let send_session = session.clone();
    let send_code = move |evt: FormEvent| {
        evt.prevent_default();
        let session = send_session.clone();
        spawn(async move {
            error.set(None);
            busy.set(true);
            match session.client.send_password_reset(contact().trim()).await {
                Ok(()) => step.set(Step::SetPassword),
                Err(e) => {
                    tracing::warn!("password reset request failed: {e}");
                    error.set(Some(e.user_message("Failed to send reset code")));
                }
            }
            busy.set(false);
        });
    };

    let reset_password = move |evt: FormEvent| {
        evt.prevent_default();
        let session = session.clone();
        spawn(async move {
            error.set(None);
            busy.set(true);
            let result = session
                .client
                .reset_password(contact().trim(), otp().trim(), &new_password())
                .await;
            busy.set(false);
            match result {
                Ok(()) => {
                    nav.push(Route::Login {});
                }
                Err(e) => {
                    tracing::warn!("password reset failed: {e}");
                    error.set(Some(e.user_message("Failed to reset password")));
                }
            }
        });
    };

    rsx! {
        div {
            class: "auth-page",
            div {
                class: "auth-card",
                h2 { "Reset your password" }

                if let Some(err) = error() {
                    div { class: "alert error", "{err}" }
                }

                if step() == Step::RequestCode {
                    form {
                        onsubmit: send_code,
                        div {
                            class: "field",
                            label { r#for: "contact", "Email / phone number" }
                            input {
                                id: "contact",
                                r#type: "text",
                                required: true,
                                value: contact(),
                                oninput: move |evt: FormEvent| contact.set(evt.value()),
                            }
                        }
                        button {
                            r#type: "submit",
                            class: "btn primary wide",
                            disabled: busy(),
                            "Send code"
                        }
                    }
                } else {
                    form {
                        onsubmit: reset_password,
                        p { "Enter the code we sent to {contact} and choose a new password." }
                        div {
                            class: "field",
                            label { r#for: "otp", "Code" }
                            input {
                                id: "otp",
                                r#type: "text",
                                inputmode: "numeric",
                                required: true,
                                value: otp(),
                                oninput: move |evt: FormEvent| otp.set(evt.value()),
                            }
                        }
                        div {
                            class: "field",
                            label { r#for: "newPassword", "New password" }
                            input {
                                id: "newPassword",
                                r#type: "password",
                                required: true,
                                value: new_password(),
                                oninput: move |evt: FormEvent| new_password.set(evt.value()),
                            }
                        }
                        button {
                            r#type: "submit",
                            class: "btn primary wide",
                            disabled: busy(),
                            "Reset password"
                        }
                    }
                }

                p {
                    class: "form-footer",
                    Link { to: Route::Login {}, "Back to login" }
                }
            }
        }
    }
}
