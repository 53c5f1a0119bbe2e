use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::build_router;

async fn read_json_body(response: axum::response::Response) -> Value {
    let body = to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

fn post_json(uri: &str, payload: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_vec(payload).expect("serialize payload"),
        ))
        .expect("request")
}

async fn start_session(router: &axum::Router) -> String {
    let request = post_json(
        "/api/v1/screenings",
        &json!({
            "instrument": "qchat-10",
            "participant": { "name": "Mina", "age": 4, "gender": "female" },
        }),
    );
    let response = router.clone().oneshot(request).await.expect("dispatch");
    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let payload = read_json_body(response).await;
    payload
        .get("session_id")
        .and_then(Value::as_str)
        .expect("session id present")
        .to_string()
}

#[tokio::test]
async fn instruments_endpoint_lists_the_catalog() {
    let router = build_router();
    let response = router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/v1/instruments")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("dispatch");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let list = payload.as_array().expect("array payload");
    assert_eq!(list.len(), 4);
    assert!(list
        .iter()
        .any(|entry| entry.get("id") == Some(&json!("isaa-40"))));
}

#[tokio::test]
async fn start_rejects_unknown_instruments() {
    let router = build_router();
    let request = post_json(
        "/api/v1/screenings",
        &json!({
            "instrument": "nope",
            "participant": { "name": "Mina", "age": 4, "gender": "other" },
        }),
    );
    let response = router.oneshot(request).await.expect("dispatch");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn answers_flow_through_progress() {
    let router = build_router();
    let session_id = start_session(&router).await;

    let response = router
        .clone()
        .oneshot(post_json(
            &format!("/api/v1/screenings/{session_id}/answers"),
            &json!({ "question": 0, "answer": "Yes" }),
        ))
        .await
        .expect("dispatch");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("answered"), Some(&json!(1)));
    assert_eq!(payload.get("complete"), Some(&json!(false)));
}

#[tokio::test]
async fn invalid_answers_are_unprocessable() {
    let router = build_router();
    let session_id = start_session(&router).await;

    let response = router
        .oneshot(post_json(
            &format!("/api/v1/screenings/{session_id}/answers"),
            &json!({ "question": 0, "answer": "Possibly" }),
        ))
        .await
        .expect("dispatch");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn incomplete_submission_names_the_missing_questions() {
    let router = build_router();
    let session_id = start_session(&router).await;

    let response = router
        .clone()
        .oneshot(post_json(
            &format!("/api/v1/screenings/{session_id}/answers"),
            &json!({ "question": 0, "answer": "Yes" }),
        ))
        .await
        .expect("dispatch");
    assert_eq!(response.status(), StatusCode::OK);

    let response = router
        .oneshot(post_json(
            &format!("/api/v1/screenings/{session_id}/submit"),
            &json!({}),
        ))
        .await
        .expect("dispatch");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    let missing = payload
        .get("missing_questions")
        .and_then(Value::as_array)
        .expect("missing questions listed");
    assert_eq!(missing.len(), 9);
}

#[tokio::test]
async fn complete_submission_returns_summary_and_report() {
    let router = build_router();
    let session_id = start_session(&router).await;

    for question in 0..10 {
        let response = router
            .clone()
            .oneshot(post_json(
                &format!("/api/v1/screenings/{session_id}/answers"),
                &json!({ "question": question, "answer": "Yes" }),
            ))
            .await
            .expect("dispatch");
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = router
        .clone()
        .oneshot(post_json(
            &format!("/api/v1/screenings/{session_id}/submit"),
            &json!({ "recorded_on": "2026-04-02" }),
        ))
        .await
        .expect("dispatch");
    assert_eq!(response.status(), StatusCode::OK);

    let payload = read_json_body(response).await;
    assert_eq!(payload.get("persisted"), Some(&json!(true)));
    let summary = payload.get("summary").expect("summary present");
    assert_eq!(summary.get("total_score"), Some(&json!(10)));
    assert_eq!(summary.get("risk_label"), Some(&json!("High")));
    assert!(payload
        .get("report_text")
        .and_then(Value::as_str)
        .expect("report text")
        .contains("Risk Level: High"));

    // The session is gone once submitted.
    let response = router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(format!("/api/v1/screenings/{session_id}"))
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("dispatch");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn navigation_moves_the_cursor() {
    let router = build_router();
    let session_id = start_session(&router).await;

    let response = router
        .clone()
        .oneshot(post_json(
            &format!("/api/v1/screenings/{session_id}/navigate"),
            &json!({ "direction": "next" }),
        ))
        .await
        .expect("dispatch");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("cursor"), Some(&json!(1)));

    let response = router
        .oneshot(post_json(
            &format!("/api/v1/screenings/{session_id}/navigate"),
            &json!({ "direction": "previous" }),
        ))
        .await
        .expect("dispatch");
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("cursor"), Some(&json!(0)));
}

#[tokio::test]
async fn abandoning_a_session_returns_no_content() {
    let router = build_router();
    let session_id = start_session(&router).await;

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/v1/screenings/{session_id}"))
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("dispatch");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(format!("/api/v1/screenings/{session_id}"))
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("dispatch");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_sessions_are_not_found() {
    let router = build_router();
    let response = router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/v1/screenings/scr-999999")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("dispatch");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
