//! Dashboard: customers near the user's position, narrowed by region.

use api::ApiError;
use dioxus::prelude::*;
use store::listing::{RegionFilter, Regions};
use store::{Coordinates, Customer};
use ui::geolocation::current_position;
use ui::views::{Loading, MapPreview, ModalOverlay, RegionSelect};
use ui::{use_session, SessionContext};

/// Where the map starts and which region filter is preselected.
struct Start {
    center: Coordinates,
    located: bool,
    address: Option<String>,
    filter: RegionFilter,
}

/// Work out the starting point from the browser position. Without a
/// geocoding key the position is used unfiltered; when geocoding fails we
/// fall back to the configured center.
async fn locate(session: &SessionContext, regions: &Regions) -> Start {
    let fallback = Start {
        center: session.config.maps.default_center,
        located: false,
        address: None,
        filter: RegionFilter::default(),
    };

    let Some(at) = current_position().await else {
        return fallback;
    };
    let Some(key) = session.config.maps.google_api_key.as_deref() else {
        return Start {
            center: at,
            located: true,
            ..fallback
        };
    };

    match session.client.reverse_geocode(key, at).await {
        Ok(place) => {
            let city = place
                .city
                .filter(|city| regions.has_city(city))
                .unwrap_or_default();
            let district = place.district.unwrap_or_default();
            Start {
                center: at,
                located: true,
                address: place.formatted_address,
                filter: RegionFilter::from_labels(&city, &district),
            }
        }
        Err(e) => {
            tracing::warn!("reverse geocoding failed: {e}");
            fallback
        }
    }
}

async fn nearby(
    session: &SessionContext,
    at: Coordinates,
    filter: &RegionFilter,
) -> Result<Vec<Customer>, ApiError> {
    session
        .client
        .nearby_customers(&session.token(), at, session.config.maps.nearby_radius_m, filter)
        .await
}

#[component]
pub fn Home() -> Element {
    let session = use_session();
    let mut regions = use_signal(Regions::default);
    let mut filter = use_signal(RegionFilter::default);
    let mut center = use_signal(|| session.config.maps.default_center);
    let mut located = use_signal(|| false);
    let mut address = use_signal(|| Option::<String>::None);
    let mut customers = use_signal(Vec::<Customer>::new);
    let mut selected = use_signal(|| Option::<Customer>::None);
    let mut loading = use_signal(|| true);
    let mut error = use_signal(|| Option::<String>::None);

    let mount_session = session.clone();
    use_hook(move || {
        let session = mount_session;
        spawn(async move {
            let all = match session
                .client
                .list_customers(&session.token(), &RegionFilter::default())
                .await
            {
                Ok(all) => all,
                Err(e) => {
                    tracing::error!("failed to load customers: {e}");
                    error.set(Some(e.user_message("Failed to load customers")));
                    loading.set(false);
                    return;
                }
            };
            let known = Regions::from_customers(&all);
            let start = locate(&session, &known).await;
            regions.set(known);
            center.set(start.center);
            located.set(start.located);
            address.set(start.address);
            filter.set(start.filter.clone());

            match nearby(&session, start.center, &start.filter).await {
                Ok(list) => customers.set(list),
                Err(e) => error.set(Some(e.user_message("Failed to load customers"))),
            }
            loading.set(false);
        })
    });

    let refresh_session = session.clone();
    let change_region = move |next: RegionFilter| {
        filter.set(next.clone());
        let session = refresh_session.clone();
        spawn(async move {
            loading.set(true);
            match nearby(&session, center(), &next).await {
                Ok(list) => {
                    error.set(None);
                    customers.set(list);
                }
                Err(e) => error.set(Some(e.user_message("Failed to load customers"))),
            }
            loading.set(false);
        });
    };

    let detail_session = session.clone();
    let show_details = use_callback(move |id: String| {
        let session = detail_session.clone();
        spawn(async move {
            match session.client.get_customer(&session.token(), &id).await {
                Ok(customer) => selected.set(Some(customer)),
                Err(e) => tracing::error!("failed to load customer {id}: {e}"),
            }
        });
    });

    let here = center();

    rsx! {
        div {
            class: "dashboard",
            section {
                class: "dashboard-map",
                RegionSelect {
                    regions: regions(),
                    filter: filter(),
                    on_change: change_region,
                }
                MapPreview { at: here, height: 360 }
                if located() {
                    div {
                        class: "current-location",
                        h4 { "Your Current Location" }
                        if let Some(address) = address() {
                            p { "{address}" }
                        }
                        p { class: "muted", "Coordinates: {here.lat}, {here.lng}" }
                    }
                }
            }

            section {
                class: "dashboard-list",
                if let Some(err) = error() {
                    div { class: "alert error", "{err}" }
                }
                if loading() {
                    Loading {}
                } else if customers.read().is_empty() {
                    p { class: "muted", "No customers nearby." }
                } else {
                    ul {
                        class: "customer-list",
                        for customer in customers() {
                            li {
                                key: "{customer.id.clone().unwrap_or_default()}",
                                div {
                                    p { class: "name", "{customer.name}" }
                                    p { class: "muted", "{customer.address}" }
                                }
                                if let Some(id) = customer.id.clone() {
                                    button {
                                        class: "btn secondary",
                                        onclick: move |_| show_details.call(id.clone()),
                                        "View details"
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }

        if let Some(customer) = selected() {
            ModalOverlay {
                on_close: move |_| selected.set(None),
                CustomerDetails { customer }
            }
        }
    }
}

#[component]
fn CustomerDetails(customer: Customer) -> Element {
    let tenor = customer
        .tenor
        .map(|t| format!("{t} months"))
        .unwrap_or_else(|| "-".to_string());
    let rows = [
        ("Agreement", customer.agreement.clone()),
        ("Phone", customer.phone.clone()),
        ("Address", customer.address.clone()),
        ("District", customer.district.clone()),
        ("City", customer.city.clone()),
        ("Vehicle", format!("{} {} ({})", customer.brand, customer.vehicle_type, customer.vehicle_year)),
        ("Color", customer.color.clone()),
        ("Tenor", tenor),
        ("Sales", customer.sales_name.clone()),
        ("Max overdue", customer.max_overdue.clone()),
        ("Valid until", customer.valid_until.clone()),
    ];

    rsx! {
        div {
            class: "modal-body",
            h3 { "{customer.name}" }
            dl {
                class: "details",
                for (label, value) in rows {
                    dt { key: "{label}", "{label}" }
                    dd { "{value}" }
                }
            }
            if let Some(at) = customer.coordinates() {
                MapPreview { at, height: 220 }
            }
        }
    }
}
