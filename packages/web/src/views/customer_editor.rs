//! Add and edit customer pages. Both share [`CustomerForm`].

use dioxus::prelude::*;
use store::Customer;
use ui::use_session;
use ui::views::{CustomerForm, Loading};

use crate::Route;

#[component]
pub fn AddCustomer() -> Element {
    let session = use_session();
    let mut customer = use_signal(Customer::default);
    let mut saving = use_signal(|| false);
    let mut notice = use_signal(|| Option::<Result<String, String>>::None);

    let save = move |_| {
        let session = session.clone();
        spawn(async move {
            saving.set(true);
            let draft = customer();
            match session.client.create_customer(&session.token(), &draft).await {
                Ok(()) => {
                    tracing::info!("customer created");
                    customer.set(Customer::default());
                    notice.set(Some(Ok(format!("{} has been added.", draft.name))));
                }
                Err(e) => notice.set(Some(Err(e.user_message("Failed to add customer")))),
            }
            saving.set(false);
        });
    };

    rsx! {
        div {
            class: "editor",
            h2 { "Add Customer" }
            match notice() {
                Some(Ok(message)) => rsx! { div { class: "alert success", "{message}" } },
                Some(Err(message)) => rsx! { div { class: "alert error", "{message}" } },
                None => rsx! {},
            }
            CustomerForm {
                customer,
                submit_label: "Add customer".to_string(),
                busy: saving(),
                on_submit: save,
            }
        }
    }
}

#[component]
pub fn EditCustomer(id: String) -> Element {
    let session = use_session();
    let nav = use_navigator();
    let mut customer = use_signal(Customer::default);
    let mut loaded = use_signal(|| false);
    let mut saving = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);

    let load_session = session.clone();
    let load_id = id.clone();
    use_hook(move || {
        let session = load_session;
        spawn(async move {
            match session.client.get_customer(&session.token(), &load_id).await {
                Ok(found) => {
                    customer.set(found);
                    loaded.set(true);
                }
                Err(e) => error.set(Some(e.user_message("Failed to load customer"))),
            }
        })
    });

    let save = move |_| {
        let session = session.clone();
        let id = id.clone();
        spawn(async move {
            saving.set(true);
            let result = session
                .client
                .update_customer(&session.token(), &id, &customer())
                .await;
            saving.set(false);
            match result {
                Ok(()) => {
                    nav.push(Route::ManageCustomer {});
                }
                Err(e) => error.set(Some(e.user_message("Failed to update customer"))),
            }
        });
    };

    rsx! {
        div {
            class: "editor",
            div {
                class: "toolbar",
                h2 { "Edit Customer" }
                Link { class: "btn secondary", to: Route::ManageCustomer {}, "Cancel" }
            }
            if let Some(err) = error() {
                div { class: "alert error", "{err}" }
            }
            if loaded() {
                CustomerForm {
                    customer,
                    submit_label: "Save changes".to_string(),
                    busy: saving(),
                    on_submit: save,
                }
            } else if error().is_none() {
                Loading {}
            }
        }
    }
}
