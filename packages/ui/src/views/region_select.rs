use dioxus::prelude::*;
use store::listing::{RegionFilter, Regions, ALL};

/// City and district dropdowns. Picking a city resets the district.
#[component]
pub fn RegionSelect(
    regions: Regions,
    filter: RegionFilter,
    on_change: EventHandler<RegionFilter>,
) -> Element {
    let city = filter.city_label().to_string();
    let district = filter.district_label().to_string();
    let districts: Vec<String> = regions
        .districts_in(&city)
        .into_iter()
        .map(str::to_string)
        .collect();
    let selected_city = city.clone();

    rsx! {
        div {
            class: "region-select",
            div {
                class: "field",
                label { r#for: "city", "City" }
                select {
                    id: "city",
                    value: "{city}",
                    onchange: move |evt: FormEvent| {
                        on_change.call(RegionFilter::from_labels(&evt.value(), ALL));
                    },
                    option { value: ALL, selected: city == ALL, "{ALL}" }
                    for name in regions.cities().iter().cloned() {
                        option {
                            key: "{name}",
                            value: "{name}",
                            selected: name == city,
                            "{name}"
                        }
                    }
                }
            }
            div {
                class: "field",
                label { r#for: "district", "District" }
                select {
                    id: "district",
                    value: "{district}",
                    disabled: city == ALL,
                    onchange: move |evt: FormEvent| {
                        on_change.call(RegionFilter::from_labels(&selected_city, &evt.value()));
                    },
                    option { value: ALL, selected: district == ALL, "{ALL}" }
                    for name in districts {
                        option {
                            key: "{name}",
                            value: "{name}",
                            selected: name == district,
                            "{name}"
                        }
                    }
                }
            }
        }
    }
}
