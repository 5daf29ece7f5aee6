mod common;

use axum::{Router, routing::post};
use axum_test::TestServer;
use serde_json::json;
use draftmyforms_api::api::handlers::generate_handler;

use common::{USER_ID, profile};

fn server(state: draftmyforms_api::AppState) -> TestServer {
    let app = Router::new()
        .route("/api/ai-generate", post(generate_handler))
        .with_state(state);
    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_generate_returns_html_and_credits() {
    let (state, ctx) = common::create_test_state();
    ctx.profiles.insert(profile(USER_ID, "free", 0));
    ctx.llm
        .set_reply("```html\n<h1>Invoice</h1><p>Consulting, 3 hours</p>\n```");
    let server = server(state);

    let response = server
        .post("/api/ai-generate")
        .json(&json!({
            "prompt": "Invoice for 3 hours of consulting",
            "docType": "invoice",
            "userId": USER_ID
        }))
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["html"], "<h1>Invoice</h1><p>Consulting, 3 hours</p>");
    assert_eq!(json["mode"], "generate");
    assert_eq!(json["plan"], "free");
    assert_eq!(json["credits"]["used"], 1);
    assert_eq!(json["credits"]["limit"], 5);
    assert_eq!(json["credits"]["remaining"], 4);
    assert_eq!(json["usage"]["input_tokens"], 120);

    assert_eq!(ctx.profiles.get(USER_ID).unwrap().credits_used, 1);
}

#[tokio::test]
async fn test_generate_missing_prompt() {
    let (state, _ctx) = common::create_test_state();
    let server = server(state);

    let response = server
        .post("/api/ai-generate")
        .json(&json!({ "userId": USER_ID }))
        .await;

    response.assert_status_bad_request();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "validation_error");
    assert_eq!(json["error"]["message"], "Prompt is required");
}

#[tokio::test]
async fn test_generate_blank_prompt() {
    let (state, _ctx) = common::create_test_state();
    let server = server(state);

    let response = server
        .post("/api/ai-generate")
        .json(&json!({ "prompt": "   ", "userId": USER_ID }))
        .await;

    response.assert_status_bad_request();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["message"], "Prompt is required");
}

#[tokio::test]
async fn test_generate_rejects_malformed_user_id() {
    let (state, _ctx) = common::create_test_state();
    let server = server(state);

    let response = server
        .post("/api/ai-generate")
        .json(&json!({ "prompt": "A lease", "userId": "not-a-uuid" }))
        .await;

    response.assert_status_bad_request();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["message"], "userId must be a UUID");
}

#[tokio::test]
async fn test_generate_unknown_user() {
    let (state, _ctx) = common::create_test_state();
    let server = server(state);

    let response = server
        .post("/api/ai-generate")
        .json(&json!({ "prompt": "A lease", "userId": USER_ID }))
        .await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_generate_exhausted_credits() {
    let (state, ctx) = common::create_test_state();
    ctx.profiles.insert(profile(USER_ID, "free", 5));
    let server = server(state);

    let response = server
        .post("/api/ai-generate")
        .json(&json!({ "prompt": "A lease", "userId": USER_ID }))
        .await;

    response.assert_status(axum::http::StatusCode::PAYMENT_REQUIRED);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "payment_required");
    assert!(ctx.llm.requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_edit_requires_current_html() {
    let (state, ctx) = common::create_test_state();
    ctx.profiles.insert(profile(USER_ID, "pro", 0));
    let server = server(state);

    let response = server
        .post("/api/ai-generate")
        .json(&json!({ "prompt": "Make the header blue", "mode": "edit", "userId": USER_ID }))
        .await;

    response.assert_status_bad_request();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["message"], "currentHtml is required for edit mode");
}

#[tokio::test]
async fn test_edit_sends_current_document() {
    let (state, ctx) = common::create_test_state();
    ctx.profiles.insert(profile(USER_ID, "pro", 10));
    let server = server(state);

    let response = server
        .post("/api/ai-generate")
        .json(&json!({
            "prompt": "Make the header blue",
            "mode": "edit",
            "userId": USER_ID,
            "currentHtml": "<h1>Old header</h1>"
        }))
        .await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["mode"], "edit");
    assert_eq!(json["credits"]["limit"], 100);
    assert_eq!(json["credits"]["used"], 11);

    let requests = ctx.llm.requests.lock().unwrap();
    assert!(requests[0].user_message.contains("<h1>Old header</h1>"));
}
