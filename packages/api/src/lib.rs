//! # API crate: REST client and session flows for the CRM
//!
//! This crate is everything between the views and the backend: the HTTP
//! client, the endpoint wrappers, and the authentication flows that decide
//! what a signed-in (or not quite signed-in) user may see. It has no UI
//! dependencies, so every flow here is tested natively against an in-memory
//! backend and [`store::MemoryStore`].
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`auth`] | Auth check, route guard decisions, login, OTP challenge, registration, session watchdog |
//! | [`client`] | [`ApiClient`]: base URL, `authorization` header, error mapping |
//! | [`customers`] | Customer CRUD, nearby search, bulk insert |
//! | [`users`] | Admin user list and delete |
//! | [`geocode`] | Reverse geocoding for the dashboard's region preselection |
//! | [`error`] | [`ApiError`] and the UI message mapping |

pub mod auth;
pub mod client;
pub mod customers;
pub mod error;
pub mod geocode;
pub mod users;

pub use client::ApiClient;
pub use error::{ApiError, GENERIC_FAILURE};
pub use geocode::Place;
