//! Shared helpers for the HTTP integration tests.
//!
//! Every test app runs the production middleware stack over a
//! [`MemoryGateway`] seeded with the built-in categories and departments.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use civic_api::config::ServerConfig;
use civic_api::router::build_app_router;
use civic_api::state::AppState;
use civic_core::status::ComplaintStatus;
use civic_db::models::complaint::{Complaint, NewComplaint};
use civic_events::ChangeFeed;
use civic_workflow::{MemoryGateway, PersistenceGateway};
use http_body_util::BodyExt;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        change_feed_capacity: 64,
    }
}

/// A router plus direct handles on its gateway and feed.
pub struct TestApp {
    pub router: Router,
    pub gateway: Arc<MemoryGateway>,
    pub feed: Arc<ChangeFeed>,
}

impl TestApp {
    /// A fresh router for one request; `oneshot` consumes it.
    pub fn app(&self) -> Router {
        self.router.clone()
    }

    /// Insert a complaint in the given category, then move it to `status`
    /// directly through the gateway (no notification or log).
    pub async fn seed_complaint(&self, category: &str, status: ComplaintStatus) -> Complaint {
        let category = self
            .gateway
            .category_named(category)
            .await
            .expect("category is seeded");
        let complaint = self
            .gateway
            .insert_complaint(&NewComplaint {
                user_id: uuid::Uuid::new_v4(),
                category_id: category.id,
                department_id: category.department_id,
                description: "Overflowing bins behind the library".to_string(),
            })
            .await
            .unwrap();
        if status != ComplaintStatus::Received {
            self.gateway
                .update_complaint_status(complaint.id, status, chrono::Utc::now())
                .await
                .unwrap();
        }
        self.gateway
            .get_complaint(complaint.id)
            .await
            .unwrap()
            .unwrap()
    }
}

/// Build the full application over an in-memory gateway.
pub fn build_test_app() -> TestApp {
    let feed = Arc::new(ChangeFeed::new(64));
    let gateway = Arc::new(MemoryGateway::with_reference_data().with_feed(Arc::clone(&feed)));
    let state = AppState::new(gateway.clone(), Arc::clone(&feed), test_config());
    TestApp {
        router: build_app_router(state),
        gateway,
        feed,
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(
        app,
        Request::builder().uri(uri).body(Body::empty()).unwrap(),
    )
    .await
}

/// POST with no body, optionally naming the acting administrator.
pub async fn post_empty(app: Router, uri: &str, admin: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder().method(Method::POST).uri(uri);
    if let Some(admin) = admin {
        builder = builder.header("x-admin-id", admin);
    }
    send(app, builder.body(Body::empty()).unwrap()).await
}

pub async fn post_json(
    app: Router,
    uri: &str,
    admin: Option<&str>,
    body: serde_json::Value,
) -> Response<Body> {
    json_request(app, Method::POST, uri, admin, body).await
}

pub async fn put_json(
    app: Router,
    uri: &str,
    admin: Option<&str>,
    body: serde_json::Value,
) -> Response<Body> {
    json_request(app, Method::PUT, uri, admin, body).await
}

async fn json_request(
    app: Router,
    method: Method,
    uri: &str,
    admin: Option<&str>,
    body: serde_json::Value,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(admin) = admin {
        builder = builder.header("x-admin-id", admin);
    }
    send(app, builder.body(Body::from(body.to_string())).unwrap()).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
