//! Entity definitions plus the camelCase wire layer.
//!
//! Each entity module owns three things: the sea-orm `Model` (snake_case
//! columns), a `Dto` that is the single source of truth for the JSON field
//! names the SPA speaks, and the conversions between the two. Route handlers
//! never rename fields by hand.

pub mod errors;
pub mod db;
pub mod user;
pub mod service;
pub mod product;
pub mod course;
pub mod booking;
pub mod enrollment;
pub mod gallery;
pub mod order;
pub mod settings;
