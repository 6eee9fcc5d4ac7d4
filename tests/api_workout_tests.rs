// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout API happy-path tests.

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;
use workout_map::db::keys;

mod common;
use common::{body_json, create_test_app, create_test_app_with, empty_request, json_request};

fn running_body() -> serde_json::Value {
    json!({
        "kind": "running",
        "coords": [51.5, -0.1],
        "distance": "5",
        "duration": "25",
        "cadence": "180"
    })
}

fn cycling_body() -> serde_json::Value {
    json!({
        "kind": "cycling",
        "coords": [48.85, 2.35],
        "distance": 27,
        "duration": 95,
        "elevation": 523
    })
}

#[tokio::test]
async fn test_health() {
    let (app, _, _) = create_test_app();

    let response = app.oneshot(empty_request("GET", "/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_create_running_workout() {
    let (app, state, memory) = create_test_app();

    let response = app
        .oneshot(json_request("POST", "/api/workouts", running_body()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["kind"], "running");
    assert_eq!(body["coords"], json!([51.5, -0.1]));
    assert_eq!(body["popup_class"], "running-popup");
    assert!(body["title"].as_str().unwrap().starts_with("Running on "));
    assert_eq!(body["metrics"][2]["value"], "5.0");
    assert_eq!(body["metrics"][2]["unit"], "min/km");

    assert_eq!(state.tracker().unwrap().on_startup().len(), 1);
    assert!(memory.raw(keys::WORKOUTS).is_some());
}

#[tokio::test]
async fn test_list_in_append_order() {
    let (app, _, _) = create_test_app();

    for body in [running_body(), cycling_body()] {
        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/workouts", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
        .oneshot(empty_request("GET", "/api/workouts"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["total"], 2);
    assert_eq!(body["workouts"][0]["kind"], "running");
    assert_eq!(body["workouts"][1]["kind"], "cycling");
    assert_eq!(body["workouts"][1]["metrics"][2]["value"], "17.1");
}

#[tokio::test]
async fn test_get_and_focus_workout() {
    let (app, _, _) = create_test_app();

    let created = body_json(
        app.clone()
            .oneshot(json_request("POST", "/api/workouts", cycling_body()))
            .await
            .unwrap(),
    )
    .await;
    let id = created["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(empty_request("GET", &format!("/api/workouts/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, created);

    let response = app
        .clone()
        .oneshot(empty_request("GET", &format!("/api/workouts/{}/focus", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let focus = body_json(response).await;
    assert_eq!(focus["coords"], json!([48.85, 2.35]));
    assert_eq!(focus["zoom"], 13);
    assert_eq!(focus["animate"], true);

    let response = app
        .oneshot(empty_request("GET", "/api/workouts/unknown-id"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_focus_unknown_workout() {
    let (app, _, _) = create_test_app();

    let response = app
        .oneshot(empty_request("GET", "/api/workouts/unknown-id/focus"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "not_found");
}

#[tokio::test]
async fn test_restart_restores_workouts() {
    let (app, _, memory) = create_test_app();

    let created = body_json(
        app.oneshot(json_request("POST", "/api/workouts", running_body()))
            .await
            .unwrap(),
    )
    .await;

    let (restarted, state, _) = create_test_app_with(memory);
    assert_eq!(state.tracker().unwrap().on_startup().len(), 1);

    let listed = body_json(
        restarted
            .oneshot(empty_request("GET", "/api/workouts"))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(listed["workouts"][0], created);
}

#[tokio::test]
async fn test_reset_clears_everything() {
    let (app, state, memory) = create_test_app();

    app.clone()
        .oneshot(json_request("POST", "/api/workouts", running_body()))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(empty_request("DELETE", "/api/workouts"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["reset"], true);
    assert_eq!(body["reload"], true);

    assert!(state.tracker().unwrap().on_startup().is_empty());
    assert!(memory.raw(keys::WORKOUTS).is_none());

    let (_, restarted, _) = create_test_app_with(memory);
    assert!(restarted.tracker().unwrap().on_startup().is_empty());
}
