//! Registration page view with an optional admin sign-up.

use api::auth::register::{submit_registration, Registration};
use dioxus::prelude::*;
use ui::icons::{FaCheck, FaEye, FaEyeSlash};
use ui::views::ModalOverlay;
use ui::{use_session, Icon};

use crate::Route;

#[component]
pub fn Register() -> Element {
    let session = use_session();
    let mut name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut phone = use_signal(String::new);
    let mut is_admin = use_signal(|| false);
    let mut admin_code = use_signal(String::new);
    let mut show_password = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);
    let mut registered = use_signal(|| false);

    let handle_register = move |evt: FormEvent| {
        evt.prevent_default();
        let session = session.clone();
        spawn(async move {
            error.set(None);
            loading.set(true);

            let form = Registration::new(
                name().trim(),
                email().trim(),
                password(),
                phone().trim(),
            );
            let entered = admin_code();
            let configured = session.config.admin.registration_code.clone();
            let admin = is_admin().then_some((entered.as_str(), configured.as_deref()));

            match submit_registration(&session.client, form, admin).await {
                Ok(()) => registered.set(true),
                Err(e) => error.set(Some(e.user_message())),
            }
            loading.set(false);
        });
    };

    rsx! {
        div {
            class: "auth-page",
            div {
                class: "auth-card",
                h2 { "Create your account" }

                if let Some(err) = error() {
                    div { class: "alert error", "{err}" }
                }

                form {
                    onsubmit: handle_register,
                    div {
                        class: "field",
                        label { r#for: "name", "Name" }
                        input {
                            id: "name",
                            r#type: "text",
                            required: true,
                            value: name(),
                            oninput: move |evt: FormEvent| name.set(evt.value()),
                        }
                    }
                    div {
                        class: "field",
                        label { r#for: "email", "Email" }
                        input {
                            id: "email",
                            r#type: "email",
                            required: true,
                            value: email(),
                            oninput: move |evt: FormEvent| email.set(evt.value()),
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
                        class: "field",
                        label { r#for: "phone", "Phone" }
                        input {
                            id: "phone",
                            r#type: "tel",
                            required: true,
                            value: phone(),
                            oninput: move |evt: FormEvent| phone.set(evt.value()),
                        }
                    }
                    div {
                        class: "field checkbox",
                        input {
                            id: "isAdmin",
                            r#type: "checkbox",
                            checked: is_admin(),
                            onchange: move |evt: FormEvent| is_admin.set(evt.checked()),
                        }
                        label { r#for: "isAdmin", "Register as admin" }
                    }
                    if is_admin() {
                        div {
                            class: "field",
                            label { r#for: "adminCode", "Admin code" }
                            input {
                                id: "adminCode",
                                r#type: "password",
                                required: true,
                                value: admin_code(),
                                oninput: move |evt: FormEvent| admin_code.set(evt.value()),
                            }
                        }
                    }
                    button {
                        r#type: "submit",
                        class: "btn primary wide",
                        disabled: loading(),
                        if loading() { "Creating account..." } else { "Register" }
                    }
                }

                p {
                    class: "form-footer",
                    "Already have an account? "
                    Link { to: Route::Login {}, "Sign in" }
                }
            }
        }

        if registered() {
            ModalOverlay {
                div {
                    class: "modal-body center",
                    div {
                        class: "success-icon",
                        Icon { width: 24, height: 24, icon: FaCheck }
                    }
                    h3 { "Registration successful" }
                    p { "Your account has been created. You can now log in." }
                    Link { class: "btn primary wide", to: Route::Login {}, "Go to login" }
                }
            }
        }
    }
}
