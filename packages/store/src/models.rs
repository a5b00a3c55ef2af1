//! # Wire models shared by every crate
//!
//! These types mirror the JSON the CRM backend sends and receives. Rust field
//! names are English; the `serde` renames carry the backend's own (Indonesian)
//! field names so the structs can be posted back unchanged.
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Session`] | `{ token, refreshToken, user }` returned by login and OTP verification. |
//! | [`UserProfile`] | The signed-in user, also the row type of the admin user list. |
//! | [`ServerTimestamp`] | Server time, accepted as `{ "_seconds", "_nanoseconds" }` or bare seconds. |
//! | [`Customer`] | One customer record (address, vehicle, financing and location fields). |
//! | [`Coordinates`] | A latitude/longitude pair. |
//!
//! The backend is not strict about scalar types (a phone number may arrive as
//! a number, `tenor` as a string), so a few fields go through the lenient
//! deserializers at the bottom of this file.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An authenticated session as persisted by the token store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    #[serde(rename = "refreshToken", default)]
    pub refresh_token: String,
    pub user: UserProfile,
}

/// Account role. Anything the client does not recognise is treated as a
/// regular user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    #[serde(other)]
    User,
}

/// Profile of a staff account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default, alias = "uid", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub phone: Option<String>,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified_date: Option<ServerTimestamp>,
}

impl UserProfile {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// When the account was last verified, if the server told us.
    pub fn verified_at(&self) -> Option<DateTime<Utc>> {
        self.verified_date.and_then(|ts| ts.to_datetime())
    }
}

/// A timestamp issued by the server.
///
/// Serialised back in the Firestore shape so a stored profile reads the same
/// way it was received.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawTimestamp")]
pub struct ServerTimestamp {
    #[serde(rename = "_seconds")]
    pub seconds: i64,
    #[serde(rename = "_nanoseconds")]
    pub nanoseconds: u32,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Firestore {
        #[serde(rename = "_seconds", alias = "seconds")]
        seconds: i64,
        #[serde(rename = "_nanoseconds", alias = "nanoseconds", default)]
        nanoseconds: u32,
    },
    Seconds(i64),
}

impl From<RawTimestamp> for ServerTimestamp {
    fn from(raw: RawTimestamp) -> Self {
        match raw {
            RawTimestamp::Firestore {
                seconds,
                nanoseconds,
            } => Self {
                seconds,
                nanoseconds,
            },
            RawTimestamp::Seconds(seconds) => Self {
                seconds,
                nanoseconds: 0,
            },
        }
    }
}

impl ServerTimestamp {
    pub fn from_datetime(at: DateTime<Utc>) -> Self {
        Self {
            seconds: at.timestamp(),
            nanoseconds: at.timestamp_subsec_nanos(),
        }
    }

    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.seconds, self.nanoseconds)
    }
}

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }
}

/// A customer record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(rename = "kota", default, deserialize_with = "lenient::string")]
    pub city: String,
    #[serde(rename = "kecamatan", default, deserialize_with = "lenient::string")]
    pub district: String,
    #[serde(rename = "alamat", default, deserialize_with = "lenient::string")]
    pub address: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub agreement: String,
    #[serde(rename = "namaCustomer", default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(rename = "merk", default, deserialize_with = "lenient::string")]
    pub brand: String,
    #[serde(rename = "type", default, deserialize_with = "lenient::string")]
    pub vehicle_type: String,
    #[serde(rename = "warna", default, deserialize_with = "lenient::string")]
    pub color: String,
    #[serde(rename = "tahunMobil", default, deserialize_with = "lenient::string")]
    pub vehicle_year: String,
    #[serde(default, deserialize_with = "lenient::opt_u32")]
    pub tenor: Option<u32>,
    #[serde(rename = "handphone", default, deserialize_with = "lenient::string")]
    pub phone: String,
    #[serde(rename = "namaSales", default, deserialize_with = "lenient::string")]
    pub sales_name: String,
    #[serde(rename = "maxOvd", default, deserialize_with = "lenient::string")]
    pub max_overdue: String,
    #[serde(rename = "tanggalValid", default, deserialize_with = "lenient::string")]
    pub valid_until: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
}

impl Customer {
    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Some(Coordinates { lat, lng }),
            _ => None,
        }
    }

    pub fn set_coordinates(&mut self, at: Coordinates) {
        self.lat = Some(at.lat);
        self.lng = Some(at.lng);
    }

    /// True when every text field is blank and no tenor or location is set.
    pub fn is_blank(&self) -> bool {
        self.tenor.is_none()
            && self.lat.is_none()
            && self.lng.is_none()
            && [
                &self.city,
                &self.district,
                &self.address,
                &self.agreement,
                &self.name,
                &self.brand,
                &self.vehicle_type,
                &self.color,
                &self.vehicle_year,
                &self.phone,
                &self.sales_name,
                &self.max_overdue,
                &self.valid_until,
            ]
            .iter()
            .all(|field| field.trim().is_empty())
    }
}

mod lenient {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Int(i64),
        Float(f64),
        Bool(bool),
    }

    impl Scalar {
        fn into_string(self) -> String {
            match self {
                Scalar::Text(s) => s,
                Scalar::Int(n) => n.to_string(),
                Scalar::Float(f) => f.to_string(),
                Scalar::Bool(b) => b.to_string(),
            }
        }
    }

    pub fn string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        Ok(Option::<Scalar>::deserialize(d)?
            .map(Scalar::into_string)
            .unwrap_or_default())
    }

    pub fn opt_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(Option::<Scalar>::deserialize(d)?
            .map(Scalar::into_string)
            .filter(|s| !s.trim().is_empty()))
    }

    pub fn opt_u32<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u32>, D::Error> {
        Ok(match Option::<Scalar>::deserialize(d)? {
            Some(Scalar::Text(s)) => s.trim().parse().ok(),
            Some(Scalar::Int(n)) => u32::try_from(n).ok(),
            Some(Scalar::Float(f)) if f >= 0.0 && f <= u32::MAX as f64 => Some(f as u32),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_firestore_timestamp() {
        let ts: ServerTimestamp =
            serde_json::from_str(r#"{"_seconds": 1720000000, "_nanoseconds": 5}"#).unwrap();
        assert_eq!(ts.seconds, 1_720_000_000);
        assert_eq!(ts.nanoseconds, 5);

        // Bare seconds are accepted too
        let ts: ServerTimestamp = serde_json::from_str("1720000000").unwrap();
        assert_eq!(ts.seconds, 1_720_000_000);
        assert_eq!(ts.nanoseconds, 0);

        // And written back in the Firestore shape
        let json = serde_json::to_value(ts).unwrap();
        assert_eq!(json["_seconds"], 1_720_000_000);
    }

    #[test]
    fn test_login_payload() {
        let json = r#"{
            "token": "abc",
            "refreshToken": "def",
            "user": {
                "name": "Rina",
                "email": "rina@example.com",
                "phone": 628123456789,
                "role": "admin",
                "is_verified": true,
                "verified_date": {"_seconds": 1720000000, "_nanoseconds": 0}
            }
        }"#;
        let session: Session = serde_json::from_str(json).unwrap();
        assert_eq!(session.refresh_token, "def");
        assert!(session.user.is_admin());
        assert_eq!(session.user.phone.as_deref(), Some("628123456789"));
        assert!(session.user.verified_at().is_some());
    }

    #[test]
    fn test_unknown_role_is_user() {
        let user: UserProfile =
            serde_json::from_str(r#"{"name": "A", "email": "a@b.c", "role": "auditor"}"#).unwrap();
        assert_eq!(user.role, Role::User);
        assert!(!user.is_verified);
        assert!(user.verified_date.is_none());
    }

    #[test]
    fn test_customer_wire_names() {
        let json = r#"{
            "id": "c1",
            "kota": "Bandar Lampung",
            "kecamatan": "Kedaton",
            "alamat": "Jl. Teuku Umar 1",
            "namaCustomer": "Budi",
            "tahunMobil": 2019,
            "tenor": "36",
            "handphone": 812345,
            "lat": -5.39,
            "lng": 105.25
        }"#;
        let customer: Customer = serde_json::from_str(json).unwrap();
        assert_eq!(customer.city, "Bandar Lampung");
        assert_eq!(customer.vehicle_year, "2019");
        assert_eq!(customer.tenor, Some(36));
        assert_eq!(customer.phone, "812345");
        assert_eq!(customer.coordinates(), Some(Coordinates::new(-5.39, 105.25)));

        let back = serde_json::to_value(&customer).unwrap();
        assert_eq!(back["namaCustomer"], "Budi");
        assert_eq!(back["kecamatan"], "Kedaton");
        assert_eq!(back["tenor"], 36);
    }

    #[test]
    fn test_blank_customer() {
        assert!(Customer::default().is_blank());
        let customer = Customer {
            agreement: " ".to_string(),
            ..Default::default()
        };
        assert!(customer.is_blank());
        let customer = Customer {
            tenor: Some(12),
            ..Default::default()
        };
        assert!(!customer.is_blank());
    }
}
