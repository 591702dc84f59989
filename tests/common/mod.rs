//! Shared helpers: an in-process axum backend and a client pointed at it
#![allow(dead_code)]

use axum::http::HeaderMap;
use axum::{Json, Router};
use quiz_admin::api::{MemoryTokenStore, QuizClient, TokenPair};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;

/// Serve `router` on an ephemeral port and return its base URL
pub async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

pub fn tokens(access: &str, refresh: &str) -> TokenPair {
    TokenPair {
        access_token: access.to_string(),
        refresh_token: refresh.to_string(),
    }
}

pub fn logged_in_store() -> Arc<MemoryTokenStore> {
    Arc::new(MemoryTokenStore::with_tokens(tokens("old-access", "old-refresh")))
}

pub fn client(base_url: &str, store: Arc<MemoryTokenStore>) -> QuizClient {
    QuizClient::new(base_url, store, Duration::from_secs(5), "quiz-admin-tests").unwrap()
}

/// Wrap a payload the way the backend does
pub fn envelope(value: Value) -> Json<Value> {
    Json(json!({"message": "", "responseObject": value}))
}

pub fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string)
}

pub fn question_json(id: &str, category_id: i64) -> Value {
    json!({
        "_id": id,
        "categoryId": category_id,
        "status": "pending",
        "type": "choice",
        "difficulty": 2,
        "locales": [{
            "language": "en",
            "question": format!("Question {}?", id),
            "correct": "yes",
            "wrong": ["no", "maybe", "never"],
            "isValid": true
        }],
        "requiredLanguages": ["en"],
        "isValid": true
    })
}
