//! Integration tests for the chat HTTP surface.
//!
//! Each test builds its own router over an in-memory store and a seeded
//! random source, then drives it with `oneshot` requests.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use giken_api::create_router;
use giken_api::handlers::HealthResponse;
use giken_api::state::AppState;
use giken_core::GikenConfig;
use giken_npc::{ResponseAssembler, SeededRandom};
use giken_storage::{Database, KvStore, MemoryStore};

// =============================================================================
// Helpers
// =============================================================================

fn make_state_with(store: Arc<dyn KvStore>) -> AppState {
    AppState::new(
        GikenConfig::default(),
        store,
        ResponseAssembler::default(),
        Box::new(SeededRandom::new(42)),
    )
}

fn make_state() -> AppState {
    make_state_with(Arc::new(MemoryStore::new()))
}

/// Percent-encode a form body the way a browser would.
fn form_body(pairs: &[(&str, &str)]) -> String {
    fn encode(s: &str) -> String {
        let mut out = String::new();
        for b in s.bytes() {
            match b {
                b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'*' => {
                    out.push(b as char)
                }
                b' ' => out.push('+'),
                _ => out.push_str(&format!("%{:02X}", b)),
            }
        }
        out
    }
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", encode(k), encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

fn post_form(pairs: &[(&str, &str)]) -> Request<Body> {
    Request::post("/")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form_body(pairs)))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

async fn body_string(resp: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn transcript(state: &AppState) -> Vec<Value> {
    let resp = create_router(state.clone()).oneshot(get("/log")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let value: Value = serde_json::from_str(&body_string(resp).await).unwrap();
    value.as_array().unwrap().clone()
}

// =============================================================================
// GET /
// =============================================================================

#[tokio::test]
async fn test_get_renders_empty_room() {
    let resp = create_router(make_state()).oneshot(get("/")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let content_type = resp.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"));

    let html = body_string(resp).await;
    assert!(html.contains("技研チャット風サンプル"));
    assert!(html.contains("最大お名前バイト数は 12 です"));
    assert!(html.contains("最大お言葉バイト数は 240 です"));
    assert!(html.contains("<option value=\"にょ\">にょ</option>"));
    assert!(html.contains("value=\"\""));
    assert!(!html.contains("<b>"));
}

#[tokio::test]
async fn test_other_methods_render_page() {
    let state = make_state();
    for method in ["PUT", "DELETE", "PATCH"] {
        let req = Request::builder()
            .method(method)
            .uri("/")
            .body(Body::empty())
            .unwrap();
        let resp = create_router(state.clone()).oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK, "method {}", method);
        assert!(body_string(resp).await.contains("<!DOCTYPE html>"));
    }
    assert!(transcript(&state).await.is_empty());
}

// =============================================================================
// POST /
// =============================================================================

#[tokio::test]
async fn test_post_appends_user_and_npc_lines() {
    let state = make_state();
    let resp = create_router(state.clone())
        .oneshot(post_form(&[
            ("name", "Alice"),
            ("msg", "hello, I'm happy today!"),
            ("goobi", "にょ"),
        ]))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let html = body_string(resp).await;
    assert!(html.contains("<b>Alice</b>： hello, I&#39;m happy today! (にょ)"));
    assert!(html.contains("<b>杏奈(NPC)</b>"));
    assert!(html.contains("value=\"Alice\""));

    let log = transcript(&state).await;
    assert!(log.len() >= 3, "expected user line plus at least two NPC lines");
    assert_eq!(log[0]["name"], "Alice");
    assert_eq!(log[0]["message"], "hello, I'm happy today!");
    assert_eq!(log[0]["goobi"], "にょ");

    let config = GikenConfig::default();
    let npc_goobi = log[1]["goobi"].as_str().unwrap().to_string();
    assert!(config.chat.is_known_goobi(&npc_goobi));
    for entry in &log[1..] {
        assert_eq!(entry["name"], "杏奈(NPC)");
        assert_eq!(entry["goobi"], npc_goobi.as_str());
        assert!(!entry["message"].as_str().unwrap().is_empty());
    }
}

#[tokio::test]
async fn test_post_remembers_last_name() {
    let state = make_state();
    create_router(state.clone())
        .oneshot(post_form(&[("name", "Alice"), ("msg", "hi"), ("goobi", "")]))
        .await
        .unwrap();

    let html = body_string(create_router(state.clone()).oneshot(get("/")).await.unwrap()).await;
    assert!(html.contains("value=\"Alice\""));
}

#[tokio::test]
async fn test_post_empty_message_is_ignored() {
    let state = make_state();
    let resp = create_router(state.clone())
        .oneshot(post_form(&[("name", "Bob"), ("msg", ""), ("goobi", "にょ")]))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_string(resp).await.contains("value=\"Bob\""));
    assert!(transcript(&state).await.is_empty());

    let html = body_string(create_router(state.clone()).oneshot(get("/")).await.unwrap()).await;
    assert!(!html.contains("value=\"Bob\""));
}

#[tokio::test]
async fn test_post_missing_fields_read_as_empty() {
    let state = make_state();
    let resp = create_router(state.clone())
        .oneshot(post_form(&[("msg", "anyone here?")]))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(transcript(&state).await.is_empty());
}

#[tokio::test]
async fn test_post_sanitizes_input() {
    let state = make_state();
    create_router(state.clone())
        .oneshot(post_form(&[
            ("name", "  あいうえおか  "),
            ("msg", "<script>alert(1)</script>hi there"),
            ("goobi", "<i>not-a-goobi</i>"),
        ]))
        .await
        .unwrap();

    let log = transcript(&state).await;
    assert_eq!(log[0]["name"], "あいうえ");
    assert_eq!(log[0]["message"], "alert(1)hi there");
    assert_eq!(log[0]["goobi"], "");
}

#[tokio::test]
async fn test_message_cut_to_byte_budget() {
    let state = make_state();
    let long = "あ".repeat(100);
    create_router(state.clone())
        .oneshot(post_form(&[("name", "Eve"), ("msg", &long), ("goobi", "")]))
        .await
        .unwrap();

    let log = transcript(&state).await;
    let stored = log[0]["message"].as_str().unwrap();
    assert_eq!(stored.len(), 240);
    assert_eq!(stored.chars().count(), 80);
}

#[tokio::test]
async fn test_transcript_is_capped() {
    let state = make_state();
    for i in 0..20 {
        create_router(state.clone())
            .oneshot(post_form(&[
                ("name", "Carol"),
                ("msg", &format!("message number {}", i)),
                ("goobi", "りゅん"),
            ]))
            .await
            .unwrap();
    }

    let log = transcript(&state).await;
    assert_eq!(log.len(), 30);
    let last_user = log
        .iter()
        .rev()
        .find(|e| e["name"] == "Carol")
        .unwrap();
    assert_eq!(last_user["message"], "message number 19");
}

#[tokio::test]
async fn test_oversized_body_rejected() {
    let state = make_state();
    let huge = "x".repeat(32 * 1024);
    let resp = create_router(state.clone())
        .oneshot(post_form(&[("name", "Mallory"), ("msg", &huge)]))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert!(transcript(&state).await.is_empty());
}

#[tokio::test]
async fn test_sqlite_store_end_to_end() {
    let state = make_state_with(Arc::new(Database::in_memory().unwrap()));
    create_router(state.clone())
        .oneshot(post_form(&[("name", "Dave"), ("msg", "good morning"), ("goobi", "ノレ")]))
        .await
        .unwrap();

    let log = transcript(&state).await;
    assert_eq!(log[0]["name"], "Dave");
    assert_eq!(log[0]["goobi"], "ノレ");
}

// =============================================================================
// JSON endpoints
// =============================================================================

#[tokio::test]
async fn test_health() {
    let state = make_state();
    create_router(state.clone())
        .oneshot(post_form(&[("name", "Alice"), ("msg", "hello"), ("goobi", "")]))
        .await
        .unwrap();

    let resp = create_router(state.clone()).oneshot(get("/health")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let health: HealthResponse = serde_json::from_str(&body_string(resp).await).unwrap();
    assert_eq!(health.status, "healthy");
    assert_eq!(health.version, "0.1.0");
    assert_eq!(health.transcript_len as usize, transcript(&state).await.len());
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let resp = create_router(make_state()).oneshot(get("/nope")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
