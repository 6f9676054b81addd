use std::sync::Arc;
use std::time::Instant;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use migration::{Migrator, MigratorTrait};
use serde_json::json;
use tower::ServiceExt;

use server::{routes, state::AppState};
use service::auth::Claims;
use service::mailer::RecordingMailer;

const SECRET: &str = "integration-test-secret-0123456789abcdef";

async fn app() -> Router {
    let db = models::db::connect_in_memory().await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    let state = AppState {
        db,
        jwt_secret: SECRET.into(),
        frontend_url: "http://localhost:5173".into(),
        mailer: Arc::new(RecordingMailer::default()),
        notify_to: String::new(),
        uploads_dir: std::env::temp_dir(),
        started_at: Instant::now(),
    };
    routes::build_router(state, tower_http::cors::CorsLayer::permissive(), None)
}

fn token(role: &str) -> String {
    let exp = (Utc::now() + Duration::hours(1)).timestamp() as usize;
    let claims = Claims { id: 1, role: role.into(), exp };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET.as_bytes())).unwrap()
}

fn request(method: &str, uri: &str, bearer: Option<&str>, body: Option<serde_json::Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(t) = bearer {
        builder = builder.header("authorization", format!("Bearer {t}"));
    }
    match body {
        Some(v) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&v).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn body_json(resp: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn sample_service() -> serde_json::Value {
    json!({
        "category": "Hair",
        "name": "Balayage",
        "description": "Freehand color",
        "duration": 90,
        "price": 150.0,
        "imageUrl": "/uploads/balayage.jpg",
        "alt": "Balayage result"
    })
}

#[tokio::test]
async fn service_create_requires_admin() {
    let app = app().await;

    let resp = app
        .clone()
        .oneshot(request("POST", "/api/services", None, Some(sample_service())))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let client = token("Client");
    let resp = app
        .clone()
        .oneshot(request("POST", "/api/services", Some(&client), Some(sample_service())))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn service_crud_roundtrip() {
    let app = app().await;
    let admin = token("Super Admin");

    // Create
    let resp = app
        .clone()
        .oneshot(request("POST", "/api/services", Some(&admin), Some(sample_service())))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created = body_json(resp).await;
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["name"], "Balayage");

    // Listed publicly with wire names
    let resp = app.clone().oneshot(request("GET", "/api/services", None, None)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let list = body_json(resp).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["imageUrl"], "/uploads/balayage.jpg");
    assert_eq!(list[0]["alt"], "Balayage result");

    // Update
    let mut updated = sample_service();
    updated["price"] = json!(175.0);
    let resp = app
        .clone()
        .oneshot(request("PUT", &format!("/api/services/{id}"), Some(&admin), Some(updated)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["price"], 175.0);

    // Delete, then delete again: both succeed
    for _ in 0..2 {
        let resp = app
            .clone()
            .oneshot(request("DELETE", &format!("/api/services/{id}"), Some(&admin), None))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let resp = app.clone().oneshot(request("GET", "/api/services", None, None)).await.unwrap();
    assert!(body_json(resp).await.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn update_of_missing_id_is_404() {
    let app = app().await;
    let admin = token("Super Admin");
    let resp = app
        .clone()
        .oneshot(request("PUT", "/api/services/9999", Some(&admin), Some(sample_service())))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn booking_created_publicly_is_forced_pending() {
    let app = app().await;

    let body = json!({
        "clientName": "Olivia Martinez",
        "clientEmail": "olivia.m@example.com",
        "clientPhone": "555-5678",
        "service": "Balayage",
        "staff": "Alex",
        "date": "2023-11-21",
        "time": "12:00 PM",
        "status": "Confirmed",
        "price": 150.0,
        "duration": 90
    });
    let resp = app.clone().oneshot(request("POST", "/api/bookings", None, Some(body))).await.unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created = body_json(resp).await;
    // Whatever the body claimed, a new booking starts Pending
    assert_eq!(created["status"], "Pending");

    // Bookings list is public
    let resp = app.clone().oneshot(request("GET", "/api/bookings", None, None)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let list = body_json(resp).await;
    assert_eq!(list[0]["service"], "Balayage");

    // Status changes are admin territory
    let id = created["id"].as_i64().unwrap();
    let mut update = created.clone();
    update["status"] = json!("Confirmed");
    let resp = app
        .clone()
        .oneshot(request("PUT", &format!("/api/bookings/{id}"), None, Some(update.clone())))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let admin = token("Super Admin");
    let resp = app
        .clone()
        .oneshot(request("PUT", &format!("/api/bookings/{id}"), Some(&admin), Some(update)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn booking_with_bad_date_rejected() {
    let app = app().await;
    let body = json!({
        "clientName": "A",
        "clientEmail": "a@b.c",
        "clientPhone": "1",
        "service": "Cut",
        "staff": "B",
        "date": "Nov 21, 2023",
        "time": "10:00 AM",
        "price": 20.0,
        "duration": 30
    });
    let resp = app.clone().oneshot(request("POST", "/api/bookings", None, Some(body))).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn orders_need_a_token_to_list_but_not_to_create() {
    let app = app().await;

    let order = json!({
        "id": "ORD-1001",
        "clientName": "Olivia Martinez",
        "date": "2023-11-21",
        "total": 42.5
    });
    let resp = app.clone().oneshot(request("POST", "/api/orders", None, Some(order))).await.unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created = body_json(resp).await;
    assert_eq!(created["id"], "ORD-1001");
    assert_eq!(created["status"], "Pending");

    let resp = app.clone().oneshot(request("GET", "/api/orders", None, None)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let client = token("Client");
    let resp = app.clone().oneshot(request("GET", "/api/orders", Some(&client), None)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let list = body_json(resp).await;
    assert_eq!(list[0]["id"], "ORD-1001");
}

#[tokio::test]
async fn settings_read_public_write_admin() {
    let app = app().await;

    let resp = app.clone().oneshot(request("GET", "/api/settings", None, None)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let mut settings = body_json(resp).await;

    settings["salonName"] = json!("Hair Doc");
    let resp = app
        .clone()
        .oneshot(request("PUT", "/api/settings", None, Some(settings.clone())))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let admin = token("Super Admin");
    let resp = app
        .clone()
        .oneshot(request("PUT", "/api/settings", Some(&admin), Some(settings)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app.clone().oneshot(request("GET", "/api/settings", None, None)).await.unwrap();
    assert_eq!(body_json(resp).await["salonName"], "Hair Doc");
}
