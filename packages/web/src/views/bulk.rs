//! CSV import: pick a file, preview the parsed rows, then save them in one go.

use dioxus::prelude::*;
use store::{parse_customers_csv, Customer};
use ui::use_session;

const SAVED: &str = "Data saved successfully!";
const SAVE_FAILED: &str = "An error occurred while saving the data.";

#[component]
pub fn BulkAddCustomer() -> Element {
    let session = use_session();
    let mut rows = use_signal(Vec::<Customer>::new);
    let mut file_name = use_signal(|| Option::<String>::None);
    let mut saving = use_signal(|| false);
    let mut notice = use_signal(|| Option::<Result<String, String>>::None);

    let pick_file = move |evt: FormEvent| async move {
        notice.set(None);
        let Some(engine) = evt.files() else {
            return;
        };
        let Some(name) = engine.files().into_iter().next() else {
            return;
        };
        let Some(text) = engine.read_file_to_string(&name).await else {
            notice.set(Some(Err(format!("Could not read {name}"))));
            return;
        };
        match parse_customers_csv(&text) {
            Ok(parsed) => {
                tracing::info!(rows = parsed.len(), file = %name, "parsed import file");
                rows.set(parsed);
                file_name.set(Some(name));
            }
            Err(e) => {
                tracing::warn!("import parse failed: {e}");
                rows.set(Vec::new());
                file_name.set(None);
                notice.set(Some(Err(e.to_string())));
            }
        }
    };

    let mut clear = move || {
        rows.set(Vec::new());
        file_name.set(None);
    };

    let save = move |_| {
        let session = session.clone();
        spawn(async move {
            saving.set(true);
            let batch = rows();
            let result = session
                .client
                .bulk_create_customers(&session.token(), &batch)
                .await;
            saving.set(false);
            match result {
                Ok(()) => {
                    clear();
                    notice.set(Some(Ok(SAVED.to_string())));
                }
                Err(e) => {
                    tracing::error!("bulk import failed: {e}");
                    notice.set(Some(Err(SAVE_FAILED.to_string())));
                }
            }
        });
    };

    let count = rows.read().len();

    rsx! {
        div {
            class: "manage",
            div {
                class: "toolbar",
                h2 { "Bulk Add Customer" }
            }
            p {
                class: "muted",
                "Columns: kota, kecamatan, alamat, agreement, namaCustomer, merk, type, warna, tahunMobil, tenor, handphone, namaSales, maxOvd, tanggalValid"
            }
            div {
                class: "filters",
                input {
                    r#type: "file",
                    accept: ".csv",
                    onchange: pick_file,
                }
                if count > 0 {
                    button {
                        class: "btn secondary",
                        r#type: "button",
                        onclick: move |_| clear(),
                        "Clear"
                    }
                    button {
                        class: "btn primary",
                        r#type: "button",
                        disabled: saving(),
                        onclick: save,
                        if saving() { "Saving..." } else { "Save {count} customers" }
                    }
                }
            }

            match notice() {
                Some(Ok(message)) => rsx! { div { class: "alert success", "{message}" } },
                Some(Err(message)) => rsx! { div { class: "alert error", "{message}" } },
                None => rsx! {},
            }

            if let Some(name) = file_name() {
                p { class: "muted", "{name}: {count} rows" }
                div {
                    class: "table-scroll",
                    table {
                        class: "data-table",
                        thead {
                            tr {
                                th { "City" }
                                th { "District" }
                                th { "Address" }
                                th { "Agreement" }
                                th { "Name" }
                                th { "Brand" }
                                th { "Type" }
                                th { "Color" }
                                th { "Year" }
                                th { "Tenor" }
                                th { "Phone" }
                                th { "Sales" }
                                th { "Max overdue" }
                                th { "Valid until" }
                            }
                        }
                        tbody {
                            for (i, c) in rows.read().iter().enumerate() {
                                tr {
                                    key: "{i}",
                                    td { "{c.city}" }
                                    td { "{c.district}" }
                                    td { "{c.address}" }
                                    td { "{c.agreement}" }
                                    td { "{c.name}" }
                                    td { "{c.brand}" }
                                    td { "{c.vehicle_type}" }
                                    td { "{c.color}" }
                                    td { "{c.vehicle_year}" }
                                    td { {c.tenor.map(|t| t.to_string()).unwrap_or_default()} }
                                    td { "{c.phone}" }
                                    td { "{c.sales_name}" }
                                    td { "{c.max_overdue}" }
                                    td { "{c.valid_until}" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
