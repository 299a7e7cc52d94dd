//! Pointer gestures driving the placement over HTTP.
//!
//! All tests run at 72 dpi with two letter pages: page 0 spans view
//! y 0..792, page 1 spans 812..1604. A 120x60 signature lands as a 200x100
//! stamp at (206, 346) on the viewed page.

mod common;

use axum::http::StatusCode;
use common::{assert_close, assert_error, fixtures, TestApp};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

const PAGE_1_TOP: f64 = 812.0;

async fn signed_app() -> TestApp {
    let app = TestApp::at_72_dpi();
    app.load_document(fixtures::pdf_with_pages(&[fixtures::LETTER, fixtures::LETTER]))
        .await;
    app.load_signature(fixtures::signature_png(120, 60)).await;
    app
}

fn num(v: &Value) -> f64 {
    v.as_f64().unwrap()
}

#[tokio::test]
async fn test_drag_moves_placement() {
    let app = signed_app().await;

    let down: Value = app
        .post_json("/api/pointer/down", json!({ "x": 306.0, "y": 396.0 }))
        .await
        .json();
    assert_eq!(down["consumed"], true);
    assert_eq!(down["state"], "dragging");

    let moved: Value = app
        .post_json("/api/pointer/move", json!({ "x": 356.0, "y": 446.0 }))
        .await
        .json();
    assert_eq!(moved["placement"]["x"], 256.0);
    assert_eq!(moved["placement"]["y"], 396.0);

    let up: Value = app.post("/api/pointer/up").await.json();
    assert_eq!(up["state"], "idle");
    assert_eq!(up["placement"]["x"], 256.0);
}

#[tokio::test]
async fn test_drag_clamped_to_page() {
    let app = signed_app().await;

    let up = app.drag((306.0, 396.0), &[(-1000.0, -1000.0)]).await;
    assert_eq!(up["placement"]["x"], 0.0);
    assert_eq!(up["placement"]["y"], 0.0);
    assert_eq!(up["placement"]["page_index"], 0);

    let up = app.drag((100.0, 50.0), &[(5000.0, 700.0)]).await;
    assert_eq!(up["placement"]["x"], 612.0 - 200.0);
    assert_eq!(up["placement"]["y"], 650.0);
}

#[tokio::test]
async fn test_drag_onto_next_page_moves_active_page() {
    let app = signed_app().await;

    let up = app
        .drag((306.0, 396.0), &[(306.0, 700.0), (306.0, PAGE_1_TOP + 400.0)])
        .await;
    assert_eq!(up["placement"]["page_index"], 1);
    assert_eq!(up["placement"]["y"], 350.0);
    assert_eq!(up["active_page"], 1);
    assert_eq!(up["viewed_page"], 1);
}

#[tokio::test]
async fn test_resize_keeps_aspect_and_minimum() {
    let app = signed_app().await;

    let down: Value = app
        .post_json(
            "/api/pointer/down",
            json!({ "x": 406.0, "y": 446.0, "target": "resize" }),
        )
        .await
        .json();
    assert_eq!(down["state"], "resizing");

    let moved: Value = app
        .post_json("/api/pointer/move", json!({ "x": 456.0, "y": 0.0 }))
        .await
        .json();
    assert_eq!(moved["placement"]["width"], 250.0);
    assert_eq!(moved["placement"]["height"], 125.0);

    let moved: Value = app
        .post_json("/api/pointer/move", json!({ "x": -1000.0, "y": 0.0 }))
        .await
        .json();
    assert_eq!(moved["placement"]["width"], 40.0);
    assert_eq!(moved["placement"]["height"], 20.0);
    app.post("/api/pointer/up").await;
}

#[tokio::test]
async fn test_resize_handle_found_by_hit_test() {
    let app = signed_app().await;
    let down: Value = app
        .post_json("/api/pointer/down", json!({ "x": 404.0, "y": 444.0 }))
        .await
        .json();
    assert_eq!(down["state"], "resizing");
}

#[tokio::test]
async fn test_rotate_about_centre_normalized() {
    let app = signed_app().await;

    // Rotate handle sits 24px above the top edge's midpoint.
    let down: Value = app
        .post_json("/api/pointer/down", json!({ "x": 306.0, "y": 322.0 }))
        .await
        .json();
    assert_eq!(down["state"], "rotating");

    let mut angles = Vec::new();
    for (x, y) in [(380.0, 396.0), (306.0, 470.0), (232.0, 396.0), (306.0, 300.0)] {
        let moved: Value = app
            .post_json("/api/pointer/move", json!({ "x": x, "y": y }))
            .await
            .json();
        angles.push(num(&moved["placement"]["rotation"]));
    }
    assert_close(angles[0], 90.0);
    assert_close(angles[1], 180.0);
    assert_close(angles[2], 270.0);
    assert!(angles[3] >= 0.0 && angles[3] < 360.0);
    assert_close(angles[3], 0.0);

    let up: Value = app.post("/api/pointer/up").await.json();
    // Rotation never moves the stamp.
    assert_eq!(up["placement"]["x"], 206.0);
    assert_eq!(up["placement"]["y"], 346.0);
}

#[tokio::test]
async fn test_second_pointer_down_ignored() {
    let app = signed_app().await;
    app.post_json("/api/pointer/down", json!({ "x": 306.0, "y": 396.0 }))
        .await;

    let second: Value = app
        .post_json(
            "/api/pointer/down",
            json!({ "x": 406.0, "y": 446.0, "target": "resize" }),
        )
        .await
        .json();
    assert_eq!(second["consumed"], false);
    assert_eq!(second["state"], "dragging");
}

#[tokio::test]
async fn test_pointer_down_off_stamp_is_ignored() {
    let app = signed_app().await;
    let down: Value = app
        .post_json("/api/pointer/down", json!({ "x": 10.0, "y": 10.0 }))
        .await
        .json();
    assert_eq!(down["consumed"], false);
    assert_eq!(down["state"], "idle");

    let moved: Value = app
        .post_json("/api/pointer/move", json!({ "x": 50.0, "y": 50.0 }))
        .await
        .json();
    assert_eq!(moved["consumed"], false);
    assert_eq!(moved["placement"]["x"], 206.0);
}

#[tokio::test]
async fn test_page_click_suppressed_during_gesture() {
    let app = signed_app().await;
    app.post_json("/api/pointer/down", json!({ "x": 306.0, "y": 396.0 }))
        .await;

    let click: Value = app.post("/api/pages/1/click").await.json();
    assert_eq!(click["consumed"], false);
    assert_eq!(click["viewed_page"], 0);

    app.post("/api/pointer/up").await;
    let click: Value = app.post("/api/pages/1/click").await.json();
    assert_eq!(click["consumed"], true);
    assert_eq!(click["viewed_page"], 1);
    // Export still targets the signature's page.
    assert_eq!(click["active_page"], 0);
    assert_eq!(click["placement"]["page_index"], 0);
}

#[tokio::test]
async fn test_page_click_errors() {
    let app = TestApp::new();
    assert_error(&app.post("/api/pages/0/click").await, StatusCode::CONFLICT);

    app.load_document(fixtures::pdf_with_pages(&[fixtures::LETTER]))
        .await;
    assert_error(&app.post("/api/pages/4/click").await, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_placement_snapshot() {
    let app = TestApp::new();
    let idle: Value = app.get("/api/placement").await.json();
    assert_eq!(idle["state"], "idle");
    assert!(idle["placement"].is_null());
}
