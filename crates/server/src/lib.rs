//! HTTP layer: router, auth extractors, error mapping and startup.

pub mod errors;
pub mod extract;
pub mod openapi;
pub mod routes;
pub mod startup;
pub mod state;
