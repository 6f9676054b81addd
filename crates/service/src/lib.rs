//! Business logic on top of the models layer: authentication, mail
//! notifications and the bulk sync used by the offline-first client.

pub mod auth;
pub mod errors;
pub mod mailer;
pub mod sync;

pub use errors::ServiceError;
