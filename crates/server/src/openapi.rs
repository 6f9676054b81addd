use utoipa::{OpenApi, ToSchema};

#[derive(ToSchema)]
pub struct LoginRequest {
    /// Username or email.
    pub identifier: String,
    pub password: String,
}

#[derive(ToSchema)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub username: String,
    pub password: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health::health,
        crate::routes::auth::login,
        crate::routes::auth::register,
        crate::routes::auth::forgot_password,
        crate::routes::auth::reset_password,
        crate::routes::services::list,
        crate::routes::services::create,
        crate::routes::services::update,
        crate::routes::services::remove,
        crate::routes::products::list,
        crate::routes::courses::list,
        crate::routes::bookings::list,
        crate::routes::bookings::create,
        crate::routes::enrollments::list,
        crate::routes::enrollments::create,
        crate::routes::gallery::list,
        crate::routes::orders::list,
        crate::routes::orders::create,
        crate::routes::settings::get_settings,
        crate::routes::settings::update_settings,
        crate::routes::sync::push,
        crate::routes::sync::pull,
        crate::routes::upload::upload,
    ),
    components(schemas(LoginRequest, RegisterRequest)),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "services"),
        (name = "products"),
        (name = "courses"),
        (name = "bookings"),
        (name = "enrollments"),
        (name = "gallery"),
        (name = "orders"),
        (name = "settings"),
        (name = "sync"),
        (name = "upload")
    )
)]
pub struct ApiDoc;
