//! Admin user list: search, status filter, pagination and deletion.

use chrono::Utc;
use dioxus::prelude::*;
use store::listing::{
    filter_users, page, total_pages, StatusFilter, UserStatus, USERS_PER_PAGE,
};
use store::UserProfile;
use ui::icons::FaTrash;
use ui::views::{Loading, Pagination};
use ui::{use_session, Icon};

#[component]
pub fn ManageUsers() -> Element {
    let session = use_session();
    let mut users = use_signal(Vec::<UserProfile>::new);
    let mut search = use_signal(String::new);
    let mut status = use_signal(StatusFilter::default);
    let mut current_page = use_signal(|| 1usize);
    let mut loading = use_signal(|| true);
    let mut error = use_signal(|| Option::<String>::None);

    let load_session = session.clone();
    use_hook(move || {
        let session = load_session;
        spawn(async move {
            match session.client.list_users(&session.token()).await {
                Ok(list) => users.set(list),
                Err(e) => {
                    tracing::error!("failed to load users: {e}");
                    error.set(Some(e.user_message("Failed to load users")));
                }
            }
            loading.set(false);
        })
    });

    let delete_user = use_callback(move |id: String| {
        let session = session.clone();
        spawn(async move {
            match session.client.delete_user(&session.token(), &id).await {
                Ok(()) => users.write().retain(|u| u.id.as_deref() != Some(id.as_str())),
                Err(e) => error.set(Some(e.user_message("Failed to delete user"))),
            }
        });
    });

    let now = Utc::now();
    let all = users.read();
    let matches = filter_users(&all, &search(), status(), now);
    let pages = total_pages(matches.len(), USERS_PER_PAGE);
    let rows: Vec<UserProfile> = page(&matches, current_page(), USERS_PER_PAGE)
        .iter()
        .map(|u| (*u).clone())
        .collect();
    drop(all);

    rsx! {
        div {
            class: "manage",
            div {
                class: "toolbar",
                h2 { "Manage User" }
            }
            div {
                class: "filters",
                input {
                    class: "search",
                    r#type: "search",
                    placeholder: "Search name or email",
                    value: search(),
                    oninput: move |evt: FormEvent| {
                        search.set(evt.value());
                        current_page.set(1);
                    },
                }
                select {
                    value: status().label(),
                    onchange: move |evt: FormEvent| {
                        status.set(StatusFilter::from_label(&evt.value()));
                        current_page.set(1);
                    },
                    for choice in StatusFilter::OPTIONS {
                        option {
                            key: "{choice.label()}",
                            value: choice.label(),
                            selected: choice == status(),
                            "{choice.label()}"
                        }
                    }
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
                            th { "Email" }
                            th { "Phone" }
                            th { "Role" }
                            th { "Status" }
                            th { "" }
                        }
                    }
                    tbody {
                        for user in rows {
                            UserRow {
                                key: "{user.id.clone().unwrap_or_default()}",
                                status: UserStatus::of(user.verified_at(), now),
                                user,
                                on_delete: move |id| delete_user.call(id),
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
    }
}

#[component]
fn UserRow(user: UserProfile, status: UserStatus, on_delete: EventHandler<String>) -> Element {
    let role = if user.is_admin() { "Admin" } else { "User" };
    let phone = user.phone.clone().unwrap_or_default();
    let badge = match status {
        UserStatus::Active => "badge active",
        UserStatus::Inactive => "badge inactive",
    };

    rsx! {
        tr {
            td { "{user.name}" }
            td { "{user.email}" }
            td { "{phone}" }
            td { "{role}" }
            td { span { class: badge, "{status.label()}" } }
            td {
                class: "actions",
                if let Some(id) = user.id.clone() {
                    button {
                        class: "icon-btn danger",
                        title: "Delete",
                        onclick: move |_| on_delete.call(id.clone()),
                        Icon { width: 14, height: 14, icon: FaTrash }
                    }
                }
            }
        }
    }
}
