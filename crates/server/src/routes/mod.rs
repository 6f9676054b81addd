use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{openapi::ApiDoc, state::AppState};

pub mod auth;
pub mod bookings;
pub mod courses;
pub mod enrollments;
pub mod gallery;
pub mod health;
pub mod orders;
pub mod products;
pub mod services;
pub mod settings;
pub mod sync;
pub mod upload;

/// Build the full application router: the JSON API under `/api`, uploaded
/// images under `/uploads`, Swagger under `/docs`, and the SPA as fallback
/// when a dist directory is configured.
pub fn build_router(state: AppState, cors: CorsLayer, frontend_dist: Option<String>) -> Router {
    let uploads_dir = state.uploads_dir.clone();

    let api = Router::new()
        .route("/api/health", get(health::health))
        .nest("/api/auth", auth::router())
        .nest("/api/services", services::router())
        .nest("/api/products", products::router())
        .nest("/api/courses", courses::router())
        .nest("/api/bookings", bookings::router())
        .nest("/api/enrollments", enrollments::router())
        .nest("/api/gallery", gallery::router())
        .nest("/api/orders", orders::router())
        .nest("/api/settings", settings::router())
        .nest("/api/sync", sync::router())
        .route("/api/upload", post(upload::upload))
        .with_state(state);

    let mut app = api
        .nest_service("/uploads", ServeDir::new(uploads_dir))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    if let Some(dist) = frontend_dist {
        let index = format!("{dist}/index.html");
        // Client-side routes all resolve to index.html
        app = app.fallback_service(ServeDir::new(dist).fallback(ServeFile::new(index)));
    } else {
        app = app.route("/", get(banner));
    }

    app.layer(cors).layer(trace_layer())
}

/// Served at `/` when the API runs headless.
async fn banner() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "message": "Salon API is running",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "/api/health",
            "auth": "/api/auth",
            "docs": "/docs"
        }
    }))
}

fn trace_layer(
) -> TraceLayer<tower_http::classify::SharedClassifier<tower_http::classify::ServerErrorsAsFailures>>
{
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
        .on_failure(DefaultOnFailure::new().level(Level::ERROR))
}
