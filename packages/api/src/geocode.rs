//! Reverse geocoding through the Google Geocoding API.
//!
//! Only used by the dashboard to preselect the city and district the user
//! is standing in. In Indonesian addresses the province shows up as
//! `administrative_area_level_1` and the regency/city as
//! `administrative_area_level_2`, which the dashboard filters call city
//! (kota) and district (kecamatan).

use serde::Deserialize;
use store::Coordinates;

use crate::client::ApiClient;
use crate::error::ApiError;

pub const GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

const CITY_TYPE: &str = "administrative_area_level_1";
const DISTRICT_TYPE: &str = "administrative_area_level_2";

/// What the geocoder knows about a position.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Place {
    pub formatted_address: Option<String>,
    pub city: Option<String>,
    pub district: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    #[serde(default)]
    formatted_address: Option<String>,
    #[serde(default)]
    address_components: Vec<AddressComponent>,
}

#[derive(Debug, Deserialize)]
struct AddressComponent {
    long_name: String,
    #[serde(default)]
    types: Vec<String>,
}

impl GeocodeResponse {
    fn into_place(self) -> Result<Place, ApiError> {
        if self.status != "OK" {
            return Err(ApiError::Decode(format!("geocoder status {}", self.status)));
        }
        let component = |kind: &str| {
            self.results
                .iter()
                .flat_map(|r| &r.address_components)
                .find(|c| c.types.iter().any(|t| t == kind))
                .map(|c| c.long_name.clone())
        };
        Ok(Place {
            formatted_address: self
                .results
                .first()
                .and_then(|r| r.formatted_address.clone()),
            city: component(CITY_TYPE),
            district: component(DISTRICT_TYPE),
        })
    }
}

impl ApiClient {
    /// Look up the address at `at`. A non-`OK` geocoder status is an error.
    pub async fn reverse_geocode(&self, api_key: &str, at: Coordinates) -> Result<Place, ApiError> {
        let req = self.http().get(GEOCODE_URL).query(&[
            ("latlng", format!("{},{}", at.lat, at.lng)),
            ("key", api_key.to_string()),
        ]);
        let response: GeocodeResponse = Self::send_json(req).await?;
        response.into_place()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<Place, ApiError> {
        serde_json::from_str::<GeocodeResponse>(json)
            .unwrap()
            .into_place()
    }

    #[test]
    fn test_area_extraction() {
        let place = parse(
            r#"{
              "status": "OK",
              "results": [
                {
                  "formatted_address": "Jl. Raden Intan No.1, Bandar Lampung",
                  "address_components": [
                    {"long_name": "Jalan Raden Intan", "types": ["route"]},
                    {"long_name": "Kota Bandar Lampung", "types": ["administrative_area_level_2", "political"]},
                    {"long_name": "Lampung", "types": ["administrative_area_level_1", "political"]}
                  ]
                },
                {
                  "formatted_address": "Lampung, Indonesia",
                  "address_components": [
                    {"long_name": "Sumatra", "types": ["administrative_area_level_1"]}
                  ]
                }
              ]
            }"#,
        )
        .unwrap();

        assert_eq!(
            place.formatted_address.as_deref(),
            Some("Jl. Raden Intan No.1, Bandar Lampung")
        );
        assert_eq!(place.city.as_deref(), Some("Lampung"));
        assert_eq!(place.district.as_deref(), Some("Kota Bandar Lampung"));
    }

    #[test]
    fn test_missing_areas() {
        let place = parse(r#"{"status": "OK", "results": [{"address_components": []}]}"#).unwrap();
        assert_eq!(place, Place::default());
    }

    #[test]
    fn test_bad_status() {
        let err = parse(r#"{"status": "ZERO_RESULTS", "results": []}"#).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
