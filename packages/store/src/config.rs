//! # Client configuration
//!
//! Everything the client needs to know about its environment, resolved once
//! at start-up. Values come from build-time environment variables (the
//! application is a static WASM bundle, so there is no runtime environment to
//! read), falling back to the defaults below.
//!
//! | Variable | Field | Default |
//! |----------|-------|---------|
//! | `CRM_API_URL` | [`ApiConfig::base_url`] | `http://localhost:3000` |
//! | `CRM_GOOGLE_MAPS_KEY` | [`MapsConfig::google_api_key`] | none (reverse geocoding disabled) |
//! | `CRM_ADMIN_CODE` | [`AdminConfig::registration_code`] | none (admin sign-up disabled) |
//!
//! All structs derive `Default` and deserialize with `#[serde(default)]`, so a
//! partial JSON document is equivalent to the defaults plus overrides.

use serde::{Deserialize, Serialize};

use crate::models::Coordinates;

/// Top-level client configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub maps: MapsConfig,
    #[serde(default)]
    pub admin: AdminConfig,
}

/// REST backend location.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl ApiConfig {
    /// Absolute URL of an `/api` endpoint, e.g. `endpoint("/auth/check")`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url.trim_end_matches('/'), path)
    }
}

/// Map and geocoding settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapsConfig {
    #[serde(default)]
    pub google_api_key: Option<String>,
    /// Where the map starts when the browser will not tell us where we are.
    #[serde(default = "default_center")]
    pub default_center: Coordinates,
    /// Search radius for the nearby-customers query, in metres.
    #[serde(default = "default_nearby_radius")]
    pub nearby_radius_m: u32,
}

fn default_center() -> Coordinates {
    // Bandar Lampung
    Coordinates::new(-5.395489, 105.2282571)
}

fn default_nearby_radius() -> u32 {
    1000
}

impl Default for MapsConfig {
    fn default() -> Self {
        Self {
            google_api_key: None,
            default_center: default_center(),
            nearby_radius_m: default_nearby_radius(),
        }
    }
}

/// Admin self-registration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AdminConfig {
    /// Code a new admin must enter on the registration form.
    #[serde(default)]
    pub registration_code: Option<String>,
}

impl ClientConfig {
    /// Configuration baked in at compile time.
    pub fn from_build_env() -> Self {
        Self::from_vars(
            option_env!("CRM_API_URL"),
            option_env!("CRM_GOOGLE_MAPS_KEY"),
            option_env!("CRM_ADMIN_CODE"),
        )
    }

    fn from_vars(
        api_url: Option<&str>,
        maps_key: Option<&str>,
        admin_code: Option<&str>,
    ) -> Self {
        let non_empty = |v: Option<&str>| {
            v.map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        let mut config = Self::default();
        if let Some(url) = non_empty(api_url) {
            config.api.base_url = url;
        }
        config.maps.google_api_key = non_empty(maps_key);
        config.admin.registration_code = non_empty(admin_code);
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::from_vars(None, None, None);
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.api.base_url, "http://localhost:3000");
        assert_eq!(config.maps.nearby_radius_m, 1000);
        assert!(config.admin.registration_code.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = ClientConfig::from_vars(
            Some("https://crm.example.com/"),
            Some("maps-key"),
            Some("  "),
        );
        assert_eq!(config.api.base_url, "https://crm.example.com/");
        assert_eq!(config.maps.google_api_key.as_deref(), Some("maps-key"));
        // Blank values count as unset
        assert!(config.admin.registration_code.is_none());
    }

    #[test]
    fn test_endpoint() {
        let api = ApiConfig {
            base_url: "https://crm.example.com/".to_string(),
        };
        assert_eq!(
            api.endpoint("/auth/check"),
            "https://crm.example.com/api/auth/check"
        );
        assert_eq!(
            ApiConfig::default().endpoint("/customers"),
            "http://localhost:3000/api/customers"
        );
    }

    #[test]
    fn test_partial_json() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"maps": {"nearby_radius_m": 2500}}"#).unwrap();
        assert_eq!(config.maps.nearby_radius_m, 2500);
        assert_eq!(config.maps.default_center, default_center());
        assert_eq!(config.api, ApiConfig::default());
    }
}
