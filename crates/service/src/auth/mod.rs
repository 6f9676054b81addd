pub mod domain;
pub mod errors;
pub mod repository;
pub mod seaorm;
pub mod service;

pub use domain::{AuthSession, Claims, LoginInput, RegisterInput};
pub use errors::AuthError;
pub use repository::AuthRepository;
pub use seaorm::SeaOrmAuthRepository;
pub use service::{decode_claims, AuthService};
