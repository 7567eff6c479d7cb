//! HTTP-level tests for administrator actions and the activity log.

mod common;

use axum::http::StatusCode;
use civic_core::activity::ActivityAction;
use civic_core::status::ComplaintStatus;
use civic_workflow::GatewayOp;
use common::{body_json, get, post_empty, post_json, put_json};
use serde_json::json;

const ADMIN: &str = "7d3f4a52-1c8e-4b7a-9f4e-2f6c1d0b9a11";

// ---------------------------------------------------------------------------
// POST /admin/complaints/{id}/status
// ---------------------------------------------------------------------------

#[tokio::test]
async fn update_status_returns_204_and_writes_side_effects() {
    let test = common::build_test_app();
    let complaint = test
        .seed_complaint("Infrastructure", ComplaintStatus::Received)
        .await;

    let response = post_json(
        test.app(),
        &format!("/api/v1/admin/complaints/{}/status", complaint.id),
        Some(ADMIN),
        json!({"status": "Resolved"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let stored = test.gateway.complaints().await;
    assert_eq!(stored[0].status, ComplaintStatus::Resolved);

    let notifications = test.gateway.notifications().await;
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].user_id, complaint.user_id);
    assert_eq!(
        notifications[0].content,
        "Your complaint has been marked as Resolved"
    );

    let logs = test.gateway.activity_logs().await;
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].user_id, Some(ADMIN.parse().unwrap()));
}

#[tokio::test]
async fn update_status_on_missing_complaint_returns_404() {
    let test = common::build_test_app();

    let response = post_json(
        test.app(),
        &format!("/api/v1/admin/complaints/{}/status", uuid::Uuid::new_v4()),
        Some(ADMIN),
        json!({"status": "Resolved"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
    assert!(test.gateway.notifications().await.is_empty());
    assert!(test.gateway.activity_logs().await.is_empty());
}

#[tokio::test]
async fn update_status_rejects_unknown_status() {
    let test = common::build_test_app();
    let complaint = test
        .seed_complaint("Infrastructure", ComplaintStatus::Received)
        .await;

    let response = post_json(
        test.app(),
        &format!("/api/v1/admin/complaints/{}/status", complaint.id),
        Some(ADMIN),
        json!({"status": "Closed"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["error"].as_str().unwrap().contains("Under Review"));
    assert!(test.gateway.notifications().await.is_empty());
}

#[tokio::test]
async fn update_status_without_admin_header_logs_empty_actor() {
    let test = common::build_test_app();
    let complaint = test
        .seed_complaint("Other", ComplaintStatus::Received)
        .await;

    let response = post_json(
        test.app(),
        &format!("/api/v1/admin/complaints/{}/status", complaint.id),
        Some(""),
        json!({"status": "Under Review"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(test.gateway.activity_logs().await[0].user_id, None);
}

#[tokio::test]
async fn malformed_admin_header_returns_400() {
    let test = common::build_test_app();
    let complaint = test
        .seed_complaint("Other", ComplaintStatus::Received)
        .await;

    let response = post_empty(
        test.app(),
        &format!("/api/v1/admin/complaints/{}/view", complaint.id),
        Some("admin-one"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
    assert!(test.gateway.activity_logs().await.is_empty());
}

#[tokio::test]
async fn notification_failure_returns_502_and_keeps_status() {
    let test = common::build_test_app();
    let complaint = test
        .seed_complaint("Environmental", ComplaintStatus::Received)
        .await;
    test.gateway.fail_on(GatewayOp::InsertNotification).await;

    let response = post_json(
        test.app(),
        &format!("/api/v1/admin/complaints/{}/status", complaint.id),
        Some(ADMIN),
        json!({"status": "Resolved"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(body_json(response).await["code"], "GATEWAY_ERROR");
    assert_eq!(
        test.gateway.complaints().await[0].status,
        ComplaintStatus::Resolved
    );
    assert!(test.gateway.activity_logs().await.is_empty());
}

// ---------------------------------------------------------------------------
// POST /admin/complaints/{id}/view
// ---------------------------------------------------------------------------

#[tokio::test]
async fn viewing_received_complaint_moves_it_under_review() {
    let test = common::build_test_app();
    let complaint = test
        .seed_complaint("Public Safety", ComplaintStatus::Received)
        .await;

    let response = post_empty(
        test.app(),
        &format!("/api/v1/admin/complaints/{}/view", complaint.id),
        Some(ADMIN),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let detail = body_json(
        get(test.app(), &format!("/api/v1/complaints/{}", complaint.id)).await,
    )
    .await;
    assert_eq!(detail["data"]["status"], "Under Review");

    let actions: Vec<ActivityAction> = test
        .gateway
        .activity_logs()
        .await
        .iter()
        .map(|l| l.action)
        .collect();
    assert_eq!(
        actions,
        vec![
            ActivityAction::UpdateComplaintStatus,
            ActivityAction::ViewComplaint
        ]
    );
}

#[tokio::test]
async fn viewing_missing_complaint_returns_404() {
    let test = common::build_test_app();

    let response = post_empty(
        test.app(),
        &format!("/api/v1/admin/complaints/{}/view", uuid::Uuid::new_v4()),
        Some(ADMIN),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// PUT /admin/complaints/{id}/department
// ---------------------------------------------------------------------------

#[tokio::test]
async fn reassigning_department_leaves_status_timestamp_alone() {
    let test = common::build_test_app();
    let complaint = test
        .seed_complaint("Other", ComplaintStatus::UnderReview)
        .await;
    let departments = body_json(get(test.app(), "/api/v1/departments").await).await;
    let target = departments["data"][0]["id"].as_str().unwrap().to_string();

    let response = put_json(
        test.app(),
        &format!("/api/v1/admin/complaints/{}/department", complaint.id),
        Some(ADMIN),
        json!({"department_id": target}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["department_id"], target);
    assert_eq!(json["data"]["status"], "Under Review");

    let stored = &test.gateway.complaints().await[0];
    assert_eq!(
        stored.last_status_updated_at,
        complaint.last_status_updated_at
    );
    assert!(stored.updated_at >= complaint.updated_at);
    assert!(test.gateway.notifications().await.is_empty());
    assert!(test.gateway.activity_logs().await.is_empty());
}

#[tokio::test]
async fn reassigning_missing_complaint_returns_404() {
    let test = common::build_test_app();

    let response = put_json(
        test.app(),
        &format!("/api/v1/admin/complaints/{}/department", uuid::Uuid::new_v4()),
        Some(ADMIN),
        json!({"department_id": null}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// GET /admin/activity-logs
// ---------------------------------------------------------------------------

#[tokio::test]
async fn activity_logs_filter_by_complaint_and_action() {
    let test = common::build_test_app();
    let first = test
        .seed_complaint("Infrastructure", ComplaintStatus::Received)
        .await;
    let second = test
        .seed_complaint("Infrastructure", ComplaintStatus::Resolved)
        .await;

    for id in [first.id, second.id] {
        let response = post_empty(
            test.app(),
            &format!("/api/v1/admin/complaints/{id}/view"),
            Some(ADMIN),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    let all = body_json(
        get(
            test.app(),
            &format!("/api/v1/admin/activity-logs?complaint_id={}", first.id),
        )
        .await,
    )
    .await;
    assert_eq!(all["data"].as_array().unwrap().len(), 2);

    let views = body_json(
        get(
            test.app(),
            "/api/v1/admin/activity-logs?action=VIEW_COMPLAINT",
        )
        .await,
    )
    .await;
    let views = views["data"].as_array().unwrap();
    assert_eq!(views.len(), 2);
    assert!(views.iter().all(|v| v["action"] == "VIEW_COMPLAINT"));
    assert!(views.iter().all(|v| v["metadata"]["timestamp"].is_string()));
}

#[tokio::test]
async fn logged_old_status_matches_new_status_over_http() {
    let test = common::build_test_app();
    let complaint = test
        .seed_complaint("Social Services", ComplaintStatus::Received)
        .await;

    post_json(
        test.app(),
        &format!("/api/v1/admin/complaints/{}/status", complaint.id),
        Some(ADMIN),
        json!({"status": "Resolved"}),
    )
    .await;

    let logs = body_json(get(test.app(), "/api/v1/admin/activity-logs").await).await;
    let metadata = &logs["data"][0]["metadata"];
    assert_eq!(metadata["old_status"], "Resolved");
    assert_eq!(metadata["new_status"], "Resolved");
    assert_eq!(metadata["complaint_id"], complaint.id.to_string());
}

// ---------------------------------------------------------------------------
// Change feed
// ---------------------------------------------------------------------------

#[tokio::test]
async fn status_update_reaches_notification_subscribers() {
    let test = common::build_test_app();
    let complaint = test
        .seed_complaint("Infrastructure", ComplaintStatus::Received)
        .await;

    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let subscription = test.feed.subscribe(
        civic_events::Table::Notifications,
        civic_events::EventFilter::Insert,
        move |change| {
            let _ = tx.send(change);
        },
    );

    post_json(
        test.app(),
        &format!("/api/v1/admin/complaints/{}/status", complaint.id),
        Some(ADMIN),
        json!({"status": "Under Review"}),
    )
    .await;

    let change = tokio::time::timeout(std::time::Duration::from_secs(2), rx.recv())
        .await
        .expect("notification change delivered")
        .unwrap();
    assert_eq!(change.new["user_id"], complaint.user_id.to_string());
    assert_eq!(
        change.new["content"],
        "Your complaint has been marked as Under Review"
    );

    subscription.unsubscribe().await;
}
