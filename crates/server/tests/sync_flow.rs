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

fn snapshot() -> serde_json::Value {
    json!({
        "services": [
            {"id": 10, "category": "Hair", "name": "Cut", "description": "",
             "duration": 45, "price": 40.0, "imageUrl": "", "alt": ""},
            {"id": 11, "category": "Hair", "name": "Color", "description": "",
             "duration": 90, "price": 120.0, "imageUrl": "", "alt": ""}
        ],
        "gallery": [
            {"id": 3, "category": "Braids", "caption": "Box braids",
             "imageUrl": "/uploads/braids.jpg", "alt": "Box braids"}
        ]
    })
}

#[tokio::test]
async fn push_requires_admin() {
    let app = app().await;

    let resp = app.clone().oneshot(request("POST", "/api/sync/push", None, Some(snapshot()))).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let client = token("Client");
    let resp = app
        .clone()
        .oneshot(request("POST", "/api/sync/push", Some(&client), Some(snapshot())))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn push_then_pull_roundtrip() {
    let app = app().await;
    let admin = token("Super Admin");

    let resp = app
        .clone()
        .oneshot(request("POST", "/api/sync/push", Some(&admin), Some(snapshot())))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["status"], "success");

    let resp = app.clone().oneshot(request("GET", "/api/sync/pull", Some(&admin), None)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["status"], "success");
    let pulled = &body["data"];

    // Client ids survive the roundtrip
    let services = pulled["services"].as_array().unwrap();
    assert_eq!(services.len(), 2);
    assert!(services.iter().any(|s| s["id"] == 10 && s["name"] == "Cut"));
    assert_eq!(pulled["gallery"][0]["id"], 3);

    // Collections absent from the push are still present in the pull
    assert!(pulled["bookings"].as_array().unwrap().is_empty());
    assert!(pulled["settings"].is_object());

    // Accounts never travel through sync
    assert!(pulled.as_object().unwrap().get("users").is_none());
}

#[tokio::test]
async fn accounts_survive_a_push() {
    let app = app().await;
    let admin = token("Super Admin");

    let resp = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({
                "name": "Alice Smith",
                "email": "alice@example.com",
                "username": "alice",
                "password": "password123"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = app
        .clone()
        .oneshot(request("POST", "/api/sync/push", Some(&admin), Some(snapshot())))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    // The push replaced the collections it carried; accounts are not one of them.
    let resp = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "identifier": "alice", "password": "password123" })),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert!(body["token"].as_str().is_some());
}

#[tokio::test]
async fn failed_push_changes_nothing() {
    let app = app().await;
    let admin = token("Super Admin");

    app.clone()
        .oneshot(request("POST", "/api/sync/push", Some(&admin), Some(snapshot())))
        .await
        .unwrap();

    // Two rows with the same id cannot both insert; the push must fail
    // and leave the previous state intact.
    let bad = json!({
        "services": [
            {"id": 7, "category": "Hair", "name": "A", "description": "",
             "duration": 30, "price": 10.0, "imageUrl": "", "alt": ""},
            {"id": 7, "category": "Hair", "name": "B", "description": "",
             "duration": 30, "price": 10.0, "imageUrl": "", "alt": ""}
        ]
    });
    let resp = app
        .clone()
        .oneshot(request("POST", "/api/sync/push", Some(&admin), Some(bad)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let resp = app.clone().oneshot(request("GET", "/api/sync/pull", Some(&admin), None)).await.unwrap();
    let pulled = body_json(resp).await;
    assert_eq!(pulled["data"]["services"].as_array().unwrap().len(), 2);
}
