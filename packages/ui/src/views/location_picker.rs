//! Clickable map for choosing a customer's position.
//!
//! The map is drawn from OpenStreetMap raster tiles laid out around the
//! current point (Web Mercator, 256 px tiles). A click is turned back into
//! coordinates from the pixel offset inside the viewport, so no map script
//! is needed in the page.

use std::f64::consts::PI;

use dioxus::prelude::*;
use store::Coordinates;

pub const TILE_SIZE: f64 = 256.0;
pub const DEFAULT_ZOOM: u8 = 15;

const VIEW_WIDTH: f64 = 480.0;
const VIEW_HEIGHT: f64 = 300.0;
const TILE_URL: &str = "https://tile.openstreetmap.org";

/// A point in world pixels at a given zoom.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldPoint {
    pub x: f64,
    pub y: f64,
}

fn world_size(zoom: u8) -> f64 {
    TILE_SIZE * f64::from(1u32 << zoom)
}

pub fn project(at: Coordinates, zoom: u8) -> WorldPoint {
    let size = world_size(zoom);
    let lat = at.lat.clamp(-85.0511, 85.0511).to_radians();
    WorldPoint {
        x: (at.lng + 180.0) / 360.0 * size,
        y: (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0 * size,
    }
}

pub fn unproject(point: WorldPoint, zoom: u8) -> Coordinates {
    let size = world_size(zoom);
    let lng = point.x / size * 360.0 - 180.0;
    let lat = (PI * (1.0 - 2.0 * point.y / size)).sinh().atan().to_degrees();
    Coordinates::new(lat, lng)
}

/// Viewport of `width` x `height` pixels centred on a point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub center: Coordinates,
    pub zoom: u8,
    pub width: f64,
    pub height: f64,
}

/// One tile to draw: its address and where its top-left corner lands in the
/// viewport.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedTile {
    pub x: u32,
    pub y: u32,
    pub left: f64,
    pub top: f64,
}

impl PlacedTile {
    pub fn url(&self, zoom: u8) -> String {
        format!("{TILE_URL}/{zoom}/{}/{}.png", self.x, self.y)
    }
}

impl Viewport {
    fn origin(&self) -> WorldPoint {
        let c = project(self.center, self.zoom);
        WorldPoint {
            x: c.x - self.width / 2.0,
            y: c.y - self.height / 2.0,
        }
    }

    /// Coordinates under a pixel offset inside the viewport.
    pub fn coordinates_at(&self, offset_x: f64, offset_y: f64) -> Coordinates {
        let origin = self.origin();
        unproject(
            WorldPoint {
                x: origin.x + offset_x,
                y: origin.y + offset_y,
            },
            self.zoom,
        )
    }

    /// Tiles covering the viewport. Columns wrap around the antimeridian;
    /// rows beyond the poles are skipped.
    pub fn tiles(&self) -> Vec<PlacedTile> {
        let origin = self.origin();
        let count = 1i64 << self.zoom;
        let first_col = (origin.x / TILE_SIZE).floor() as i64;
        let last_col = ((origin.x + self.width) / TILE_SIZE).floor() as i64;
        let first_row = (origin.y / TILE_SIZE).floor() as i64;
        let last_row = ((origin.y + self.height) / TILE_SIZE).floor() as i64;

        let mut tiles = Vec::new();
        for row in first_row.max(0)..=last_row.min(count - 1) {
            for col in first_col..=last_col {
                tiles.push(PlacedTile {
                    x: col.rem_euclid(count) as u32,
                    y: row as u32,
                    left: col as f64 * TILE_SIZE - origin.x,
                    top: row as f64 * TILE_SIZE - origin.y,
                });
            }
        }
        tiles
    }
}

/// Map centred on `at` with a marker in the middle. Clicking anywhere
/// reports the coordinates under the pointer.
#[component]
pub fn LocationPicker(at: Coordinates, on_pick: EventHandler<Coordinates>) -> Element {
    let view = Viewport {
        center: at,
        zoom: DEFAULT_ZOOM,
        width: VIEW_WIDTH,
        height: VIEW_HEIGHT,
    };
    let tiles = view.tiles();
    let (marker_x, marker_y) = (VIEW_WIDTH / 2.0, VIEW_HEIGHT / 2.0);

    rsx! {
        div {
            class: "location-picker",
            style: "width: {VIEW_WIDTH}px; height: {VIEW_HEIGHT}px;",
            for tile in tiles {
                img {
                    key: "{tile.x}-{tile.y}-{tile.left}",
                    class: "map-tile",
                    src: tile.url(DEFAULT_ZOOM),
                    alt: "",
                    draggable: "false",
                    style: "left: {tile.left}px; top: {tile.top}px;",
                }
            }
            div {
                class: "map-marker",
                style: "left: {marker_x}px; top: {marker_y}px;",
            }
            // Sits on top so click offsets are always relative to the viewport
            div {
                class: "map-click-layer",
                onclick: move |evt: MouseEvent| {
                    let point = evt.element_coordinates();
                    let picked = view.coordinates_at(point.x, point.y);
                    tracing::debug!(lat = picked.lat, lng = picked.lng, "location picked");
                    on_pick.call(picked);
                },
            }
            span { class: "map-attribution", "© OpenStreetMap contributors" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const METRO: Coordinates = Coordinates {
        lat: -5.1131,
        lng: 105.3067,
    };

    fn view() -> Viewport {
        Viewport {
            center: METRO,
            zoom: DEFAULT_ZOOM,
            width: VIEW_WIDTH,
            height: VIEW_HEIGHT,
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_projection_round_trip_and_origin() {
        let origin = project(Coordinates::new(0.0, 0.0), 1);
        assert!(close(origin.x, 256.0));
        assert!(close(origin.y, 256.0));

        let back = unproject(project(METRO, DEFAULT_ZOOM), DEFAULT_ZOOM);
        assert!(close(back.lat, METRO.lat));
        assert!(close(back.lng, METRO.lng));
    }

    #[test]
    fn test_click_in_centre_is_current_point() {
        let picked = view().coordinates_at(VIEW_WIDTH / 2.0, VIEW_HEIGHT / 2.0);
        assert!(close(picked.lat, METRO.lat));
        assert!(close(picked.lng, METRO.lng));
    }

    #[test]
    fn test_click_direction() {
        let v = view();
        let right = v.coordinates_at(VIEW_WIDTH, VIEW_HEIGHT / 2.0);
        let below = v.coordinates_at(VIEW_WIDTH / 2.0, VIEW_HEIGHT);

        assert!(right.lng > METRO.lng);
        assert!(close(right.lat, METRO.lat));
        assert!(below.lat < METRO.lat);
        assert!(close(below.lng, METRO.lng));
    }

    #[test]
    fn test_tiles_cover_viewport() {
        let tiles = view().tiles();
        assert!(!tiles.is_empty());
        for tile in &tiles {
            assert!(tile.left > -TILE_SIZE && tile.left < VIEW_WIDTH);
            assert!(tile.top > -TILE_SIZE && tile.top < VIEW_HEIGHT);
        }
        // Some tile contains the top-left corner of the viewport
        assert!(tiles
            .iter()
            .any(|t| t.left <= 0.0 && t.top <= 0.0 && t.left + TILE_SIZE > 0.0 && t.top + TILE_SIZE > 0.0));
        assert!(tiles[0].url(DEFAULT_ZOOM).starts_with("https://tile.openstreetmap.org/15/"));
    }

    #[test]
    fn test_tiles_wrap_antimeridian() {
        let v = Viewport {
            center: Coordinates::new(0.0, 179.99),
            zoom: 2,
            width: VIEW_WIDTH,
            height: VIEW_HEIGHT,
        };
        let count = 1u32 << 2;
        assert!(v.tiles().iter().all(|t| t.x < count && t.y < count));
        assert!(v.tiles().iter().any(|t| t.x == 0));
    }
}
