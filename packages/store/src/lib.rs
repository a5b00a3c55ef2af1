pub mod config;
pub mod import;
pub mod listing;
pub mod models;
pub mod session;

mod memory;
pub use memory::MemoryStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local::LocalStore;

pub use config::ClientConfig;
pub use import::{parse_customers_csv, ImportError};
pub use models::{Coordinates, Customer, Role, ServerTimestamp, Session, UserProfile};
pub use session::{KeyValueStore, TokenStore};
