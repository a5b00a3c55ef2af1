use dioxus::prelude::*;
use store::{Coordinates, Customer};

use super::LocationPicker;
use crate::geolocation::current_position;
use crate::session::use_session;

type Getter = fn(&Customer) -> String;
type Setter = fn(&mut Customer, String);

/// Text fields of the form, in the order they are shown.
const TEXT_FIELDS: [(&str, &str, Getter, Setter); 13] = [
    ("name", "Customer name", |c| c.name.clone(), |c, v| c.name = v),
    ("agreement", "Agreement", |c| c.agreement.clone(), |c, v| c.agreement = v),
    ("phone", "Phone", |c| c.phone.clone(), |c, v| c.phone = v),
    ("city", "City", |c| c.city.clone(), |c, v| c.city = v),
    ("district", "District", |c| c.district.clone(), |c, v| c.district = v),
    ("address", "Address", |c| c.address.clone(), |c, v| c.address = v),
    ("brand", "Brand", |c| c.brand.clone(), |c, v| c.brand = v),
    ("vehicle_type", "Type", |c| c.vehicle_type.clone(), |c, v| c.vehicle_type = v),
    ("color", "Color", |c| c.color.clone(), |c, v| c.color = v),
    ("vehicle_year", "Year", |c| c.vehicle_year.clone(), |c, v| c.vehicle_year = v),
    ("sales_name", "Sales", |c| c.sales_name.clone(), |c, v| c.sales_name = v),
    ("max_overdue", "Max overdue", |c| c.max_overdue.clone(), |c, v| c.max_overdue = v),
    ("valid_until", "Valid until", |c| c.valid_until.clone(), |c, v| c.valid_until = v),
];

/// Form for creating or editing a customer, including a location picker.
#[component]
pub fn CustomerForm(
    customer: Signal<Customer>,
    submit_label: String,
    busy: bool,
    on_submit: EventHandler<()>,
) -> Element {
    let mut customer = customer;
    let mut locating = use_signal(|| false);

    let use_my_location = move |_| {
        spawn(async move {
            locating.set(true);
            if let Some(at) = current_position().await {
                customer.write().set_coordinates(at);
            }
            locating.set(false);
        });
    };

    let tenor = customer.read().tenor.map(|t| t.to_string()).unwrap_or_default();
    let lat = customer.read().lat.map(|v| v.to_string()).unwrap_or_default();
    let lng = customer.read().lng.map(|v| v.to_string()).unwrap_or_default();
    // Without a position yet the map opens on the configured center
    let default_center = use_session().config.maps.default_center;
    let picked = customer.read().coordinates().filter(Coordinates::is_valid);
    let map_center = picked.unwrap_or(default_center);

    rsx! {
        form {
            class: "customer-form",
            onsubmit: move |evt: FormEvent| {
                evt.prevent_default();
                on_submit.call(());
            },

            div {
                class: "form-grid",
                for (id, label, get, set) in TEXT_FIELDS {
                    div {
                        key: "{id}",
                        class: "field",
                        label { r#for: "{id}", "{label}" }
                        input {
                            id: "{id}",
                            r#type: "text",
                            value: get(&customer.read()),
                            oninput: move |evt: FormEvent| set(&mut customer.write(), evt.value()),
                        }
                    }
                }
                div {
                    class: "field",
                    label { r#for: "tenor", "Tenor" }
                    input {
                        id: "tenor",
                        r#type: "number",
                        min: "0",
                        value: "{tenor}",
                        oninput: move |evt: FormEvent| {
                            customer.write().tenor = evt.value().trim().parse().ok();
                        },
                    }
                }
            }

            fieldset {
                class: "location",
                legend { "Location" }
                div {
                    class: "form-grid",
                    div {
                        class: "field",
                        label { r#for: "lat", "Latitude" }
                        input {
                            id: "lat",
                            r#type: "number",
                            step: "any",
                            value: "{lat}",
                            oninput: move |evt: FormEvent| {
                                customer.write().lat = evt.value().trim().parse().ok();
                            },
                        }
                    }
                    div {
                        class: "field",
                        label { r#for: "lng", "Longitude" }
                        input {
                            id: "lng",
                            r#type: "number",
                            step: "any",
                            value: "{lng}",
                            oninput: move |evt: FormEvent| {
                                customer.write().lng = evt.value().trim().parse().ok();
                            },
                        }
                    }
                }
                button {
                    r#type: "button",
                    class: "btn secondary",
                    disabled: locating(),
                    onclick: use_my_location,
                    if locating() { "Locating..." } else { "Use my location" }
                }
                p {
                    class: "muted",
                    if picked.is_some() { "Click the map to move the marker." } else { "Click the map to place the customer." }
                }
                LocationPicker {
                    at: map_center,
                    on_pick: move |at: Coordinates| customer.write().set_coordinates(at),
                }
            }

            button {
                r#type: "submit",
                class: "btn primary",
                disabled: busy,
                if busy { "Saving..." } else { "{submit_label}" }
            }
        }
    }
}
