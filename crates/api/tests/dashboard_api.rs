//! HTTP-level integration tests for the dashboard catalog and layout
//! endpoints.
//!
//! Uses `tower::ServiceExt::oneshot` to send requests straight to the
//! router without a TCP listener.

mod common;

use axum::http::StatusCode;
use common::{body_bytes, body_json, get, patch_json, post_json};
use medboard_core::wire::ApiEnvelope;
use medboard_core::{WidgetCatalog, WidgetDefinition};
use serde_json::json;

fn starter_body() -> serde_json::Value {
    json!({
        "name": "Default Dashboard",
        "is_default": true,
        "layout": [
            { "code": "financial_summary", "x": 0, "y": 0, "w": 2, "h": 2 },
            { "code": "appointments_today", "x": 2, "y": 0, "w": 2, "h": 1 }
        ]
    })
}

// ---------------------------------------------------------------------------
// Widget catalog
// ---------------------------------------------------------------------------

#[tokio::test]
async fn widgets_are_grouped_by_module_in_order() {
    let catalog = WidgetCatalog::new()
        .with_module("pharmacy", vec![WidgetDefinition::new("stock", "Stock", "pharmacy")])
        .with_module(
            "invoicing",
            vec![WidgetDefinition::new("fin", "Finance", "invoicing").with_size(2, 2)],
        );
    let app = common::build_app_with_catalog(catalog);

    let response = get(app, "/api/v1/dashboard/widgets").await;
    assert_eq!(response.status(), StatusCode::OK);

    // Parse straight from the bytes: `serde_json::Value` would sort the keys.
    let bytes = body_bytes(response).await;
    let envelope: ApiEnvelope<WidgetCatalog> = serde_json::from_slice(&bytes).unwrap();
    assert!(envelope.success);

    let catalog = envelope.data.unwrap();
    let modules: Vec<&str> = catalog.modules().map(|(m, _)| m).collect();
    assert_eq!(modules, vec!["pharmacy", "invoicing"]);
    assert_eq!(catalog.find("fin").unwrap().size().w, 2);
}

// ---------------------------------------------------------------------------
// Default layout
// ---------------------------------------------------------------------------

#[tokio::test]
async fn default_layout_is_null_before_anything_is_stored() {
    let app = common::build_test_app(common::test_state());
    let response = get(app, "/api/v1/dashboard/layouts/default").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert!(json["data"].is_null());
}

#[tokio::test]
async fn created_default_layout_is_returned_as_default() {
    let state = common::test_state();

    let response = post_json(
        common::build_test_app(state.clone()),
        "/api/v1/dashboard/layouts",
        starter_body(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let id = created["data"]["id"].as_i64().unwrap();

    let response = get(
        common::build_test_app(state),
        "/api/v1/dashboard/layouts/default",
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["id"], id);
    assert_eq!(json["data"]["is_default"], true);
    assert_eq!(json["data"]["layout"][0]["code"], "financial_summary");
}

#[tokio::test]
async fn newer_default_replaces_older_one() {
    let state = common::test_state();

    let first = body_json(
        post_json(
            common::build_test_app(state.clone()),
            "/api/v1/dashboard/layouts",
            starter_body(),
        )
        .await,
    )
    .await;
    let second = body_json(
        post_json(
            common::build_test_app(state.clone()),
            "/api/v1/dashboard/layouts",
            json!({ "name": "Reception", "is_default": true, "layout": [] }),
        )
        .await,
    )
    .await;

    let json = body_json(
        get(
            common::build_test_app(state.clone()),
            "/api/v1/dashboard/layouts/default",
        )
        .await,
    )
    .await;
    assert_eq!(json["data"]["id"], second["data"]["id"]);

    let first_id = first["data"]["id"].as_i64().unwrap();
    let json = body_json(
        get(
            common::build_test_app(state),
            &format!("/api/v1/dashboard/layouts/{first_id}"),
        )
        .await,
    )
    .await;
    assert_eq!(json["data"]["is_default"], false);
}

// ---------------------------------------------------------------------------
// Create validation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_with_duplicate_codes_returns_400() {
    let app = common::build_test_app(common::test_state());
    let response = post_json(
        app,
        "/api/v1/dashboard/layouts",
        json!({
            "name": "Broken",
            "is_default": true,
            "layout": [
                { "code": "fin", "x": 0, "y": 0, "w": 2, "h": 1 },
                { "code": "fin", "x": 2, "y": 0, "w": 2, "h": 1 }
            ]
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn create_with_zero_span_returns_400() {
    let app = common::build_test_app(common::test_state());
    let response = post_json(
        app,
        "/api/v1/dashboard/layouts",
        json!({
            "name": "Flat",
            "layout": [{ "code": "fin", "x": 0, "y": 0, "w": 0, "h": 1 }]
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Get / patch by id
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_unknown_layout_returns_404() {
    let app = common::build_test_app(common::test_state());
    let response = get(app, "/api/v1/dashboard/layouts/999").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

#[tokio::test]
async fn patch_replaces_items_only() {
    let state = common::test_state();
    let created = body_json(
        post_json(
            common::build_test_app(state.clone()),
            "/api/v1/dashboard/layouts",
            starter_body(),
        )
        .await,
    )
    .await;
    let id = created["data"]["id"].as_i64().unwrap();

    let response = patch_json(
        common::build_test_app(state.clone()),
        &format!("/api/v1/dashboard/layouts/{id}"),
        json!({ "layout": [{ "code": "patient_alerts", "x": 0, "y": 0, "w": 2, "h": 1 }] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);

    let json = body_json(
        get(
            common::build_test_app(state),
            &format!("/api/v1/dashboard/layouts/{id}"),
        )
        .await,
    )
    .await;
    assert_eq!(json["data"]["name"], "Default Dashboard");
    assert_eq!(json["data"]["is_default"], true);
    assert_eq!(json["data"]["layout"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"]["layout"][0]["code"], "patient_alerts");
}

#[tokio::test]
async fn patch_unknown_layout_returns_404() {
    let app = common::build_test_app(common::test_state());
    let response = patch_json(app, "/api/v1/dashboard/layouts/5", json!({ "layout": [] })).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_returns_every_layout() {
    let state = common::test_state();
    for _ in 0..2 {
        post_json(
            common::build_test_app(state.clone()),
            "/api/v1/dashboard/layouts",
            starter_body(),
        )
        .await;
    }

    let json = body_json(get(common::build_test_app(state), "/api/v1/dashboard/layouts").await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
}
