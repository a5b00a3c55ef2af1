use dioxus::prelude::*;
use store::Coordinates;

/// Half-width of the embedded map's bounding box, in degrees.
const SPAN: f64 = 0.005;

/// Embedded OpenStreetMap view with a marker at `at`.
#[component]
pub fn MapPreview(at: Coordinates, #[props(default = 300)] height: u32) -> Element {
    let src = embed_url(at);
    rsx! {
        iframe {
            class: "map-preview",
            title: "Map",
            height: "{height}",
            src: "{src}",
        }
    }
}

fn embed_url(at: Coordinates) -> String {
    format!(
        "https://www.openstreetmap.org/export/embed.html?bbox={},{},{},{}&layer=mapnik&marker={},{}",
        at.lng - SPAN,
        at.lat - SPAN,
        at.lng + SPAN,
        at.lat + SPAN,
        at.lat,
        at.lng
    )
}
