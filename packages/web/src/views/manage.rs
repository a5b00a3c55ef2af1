//! Customer table with search, region filters, pagination and deletion.

use dioxus::prelude::*;
use store::listing::{page, search_customers, total_pages, RegionFilter, Regions, CUSTOMERS_PER_PAGE};
use store::Customer;
use ui::icons::{FaPen, FaTrash};
use ui::views::{Loading, ModalOverlay, Pagination, RegionSelect};
use ui::{use_session, Icon};

use crate::Route;

#[component]
pub fn ManageCustomer() -> Element {
    let session = use_session();
    let nav = use_navigator();
    let mut regions = use_signal(Regions::default);
    let mut filter = use_signal(RegionFilter::default);
    let mut customers = use_signal(Vec::<Customer>::new);
    let mut search = use_signal(String::new);
    let mut current_page = use_signal(|| 1usize);
    let mut loading = use_signal(|| true);
    let mut error = use_signal(|| Option::<String>::None);
    let mut confirm_delete_all = use_signal(|| false);

    // Filter options come from the unfiltered list
    let regions_session = session.clone();
    use_hook(move || {
        let session = regions_session;
        spawn(async move {
            match session
                .client
                .list_customers(&session.token(), &RegionFilter::default())
                .await
            {
                Ok(all) => regions.set(Regions::from_customers(&all)),
                Err(e) => tracing::error!("failed to load regions: {e}"),
            }
        })
    });

    // Re-runs whenever the region filter changes
    let list_session = session.clone();
    let _list = use_resource(move || {
        let session = list_session.clone();
        let region = filter();
        async move {
            loading.set(true);
            match session.client.list_customers(&session.token(), &region).await {
                Ok(list) => {
                    error.set(None);
                    customers.set(list);
                }
                Err(e) => error.set(Some(e.user_message("Failed to load customers"))),
            }
            current_page.set(1);
            loading.set(false);
        }
    });

    let delete_session = session.clone();
    let delete_one = use_callback(move |id: String| {
        let session = delete_session.clone();
        spawn(async move {
            match session.client.delete_customer(&session.token(), &id).await {
                Ok(()) => customers.write().retain(|c| c.id.as_deref() != Some(id.as_str())),
                Err(e) => error.set(Some(e.user_message("Failed to delete customer"))),
            }
        });
    });

    let delete_all = move |_| {
        let session = session.clone();
        spawn(async move {
            confirm_delete_all.set(false);
            loading.set(true);
            match session.client.delete_all_customers(&session.token()).await {
                Ok(()) => {
                    customers.write().clear();
                    regions.set(Regions::default());
                }
                Err(e) => error.set(Some(e.user_message("Failed to delete customers"))),
            }
            loading.set(false);
        });
    };

    let all = customers.read();
    let matches = search_customers(&all, &search());
    let pages = total_pages(matches.len(), CUSTOMERS_PER_PAGE);
    let rows: Vec<Customer> = page(&matches, current_page(), CUSTOMERS_PER_PAGE)
        .iter()
        .map(|c| (*c).clone())
        .collect();
    drop(all);

    rsx! {
        div {
            class: "manage",
            div {
                class: "toolbar",
                h2 { "Manage Customer" }
                button {
                    class: "btn danger",
                    disabled: customers.read().is_empty(),
                    onclick: move |_| confirm_delete_all.set(true),
                    "Delete all"
                }
            }

            div {
                class: "filters",
                input {
                    class: "search",
                    r#type: "search",
                    placeholder: "Search name, city, district or address",
                    value: search(),
                    oninput: move |evt: FormEvent| {
                        search.set(evt.value());
                        current_page.set(1);
                    },
                }
                RegionSelect {
                    regions: regions(),
                    filter: filter(),
                    on_change: move |next| filter.set(next),
                }
            }

            if let Some(err) = error() {
                div { class: "alert error", "{err}" }
            }

            if loading() {
                Loading {}
            } else {
                table {
                    class: "data-table",
                    thead {
                        tr {
                            th { "Name" }
                            th { "Agreement" }
                            th { "City" }
                            th { "District" }
                            th { "Address" }
                            th { "Phone" }
                            th { "" }
                        }
                    }
                    tbody {
                        for customer in rows {
                            tr {
                                key: "{customer.id.clone().unwrap_or_default()}",
                                td { "{customer.name}" }
                                td { "{customer.agreement}" }
                                td { "{customer.city}" }
                                td { "{customer.district}" }
                                td { "{customer.address}" }
                                td { "{customer.phone}" }
                                td {
                                    class: "actions",
                                    if let Some(id) = customer.id.clone() {
                                        button {
                                            class: "icon-btn",
                                            title: "Edit",
                                            onclick: {
                                                let id = id.clone();
                                                move |_| {
                                                    nav.push(Route::EditCustomer { id: id.clone() });
                                                }
                                            },
                                            Icon { width: 14, height: 14, icon: FaPen }
                                        }
                                        button {
                                            class: "icon-btn danger",
                                            title: "Delete",
                                            onclick: move |_| delete_one.call(id.clone()),
                                            Icon { width: 14, height: 14, icon: FaTrash }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
                Pagination {
                    current: current_page(),
                    total: pages,
                    on_change: move |p| current_page.set(p),
                }
            }
        }

        if confirm_delete_all() {
            ModalOverlay {
                on_close: move |_| confirm_delete_all.set(false),
                div {
                    class: "modal-body",
                    h3 { "Delete all customers" }
                    p { "Are you sure you want to delete all customers? This action cannot be undone." }
                    div {
                        class: "modal-actions",
                        button {
                            class: "btn secondary",
                            onclick: move |_| confirm_delete_all.set(false),
                            "Cancel"
                        }
                        button { class: "btn danger", onclick: delete_all, "Delete all" }
                    }
                }
            }
        }
    }
}
