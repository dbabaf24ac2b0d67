use super::*;
use crate::state::test_helpers::{spawn_app, temp_state};

fn snapshot_body() -> Value {
    json!({
        "shapes": [
            { "id": 1, "type": "rect", "pos": [10.0, 20.0], "size": [30.0, -40.0], "color": "#00ff00" },
            { "id": 2, "type": "line", "pos": [0.0, 0.0], "size": [5.0, 5.0], "color": "#0000ff" }
        ],
        "animations": [
            { "id": "anim_3", "shapeId": 1, "type": "translate_y", "start": 0.0, "end": 100.0,
              "startTime": 0.0, "duration": 2.0, "loop": true }
        ]
    })
}

#[tokio::test]
async fn save_writes_scene_file() {
    let state = temp_state();
    let path = state.config.scene_path();
    let base = spawn_app(state).await;

    let res = reqwest::Client::new()
        .post(format!("{base}/api/save"))
        .json(&snapshot_body())
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    assert_eq!(res.json::<Value>().await.unwrap(), json!({ "success": true }));

    let saved: Value = serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(saved, snapshot_body());
}

#[tokio::test]
async fn save_accepts_empty_scene() {
    let state = temp_state();
    let path = state.config.scene_path();
    let base = spawn_app(state).await;

    let res = reqwest::Client::new()
        .post(format!("{base}/api/save"))
        .json(&json!({ "shapes": [], "animations": [] }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    let saved: SceneSnapshot = serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(saved, SceneSnapshot::default());
}

#[tokio::test]
async fn save_reports_store_failure() {
    let state = temp_state();
    std::fs::remove_dir_all(&state.config.data_dir).unwrap();
    let base = spawn_app(state).await;

    let res = reqwest::Client::new()
        .post(format!("{base}/api/save"))
        .json(&snapshot_body())
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().is_some_and(|e| !e.is_empty()));
}

#[tokio::test]
async fn save_rejects_malformed_json() {
    let base = spawn_app(temp_state()).await;

    let res = reqwest::Client::new()
        .post(format!("{base}/api/save"))
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn healthz_is_ok() {
    let base = spawn_app(temp_state()).await;
    let res = reqwest::get(format!("{base}/healthz")).await.unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::OK);
}
