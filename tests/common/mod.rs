use std::collections::HashMap;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use devfest_backend::{config::Config, database::Stores, routes, AppState};
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;

#[allow(dead_code)]
pub fn memory_config(extra: &[(&str, &str)]) -> Config {
    let mut vars: HashMap<String, String> = HashMap::new();
    vars.insert("DATABASE_BACKEND".into(), "memory".into());
    for (key, value) in extra {
        vars.insert(key.to_string(), value.to_string());
    }
    Config::from_lookup(|name| vars.get(name).cloned()).expect("config")
}

#[allow(dead_code)]
pub fn memory_app() -> Router {
    let state = AppState::new(memory_config(&[]), Stores::memory());
    routes::build_router(state).expect("router")
}

#[allow(dead_code)]
pub fn john_doe() -> JsonValue {
    json!({
        "candidateName": "john.doe",
        "candidateEmail": "john@x.com",
        "candidateFullName": "John Doe",
        "position": "Backend Developer",
        "cvFilename": "john_cv.pdf"
    })
}

#[allow(dead_code)]
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<JsonValue>) -> (StatusCode, JsonValue) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let body = if bytes.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null)
    };
    (status, body)
}
