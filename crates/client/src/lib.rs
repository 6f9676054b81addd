//! Offline-first client state: a typed store with reducer-style updates,
//! pluggable persistence, page navigation with the admin guard, the HTTP
//! API client, and dashboard statistics.

pub mod api;
pub mod errors;
pub mod pages;
pub mod persist;
pub mod stats;
pub mod store;

pub use errors::ClientError;
pub use pages::Page;
pub use store::{Action, AppState, Store};
