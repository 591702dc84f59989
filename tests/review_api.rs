mod common;

use axum::extract::{Path, Query, State};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use common::{client, envelope, logged_in_store, question_json, spawn};
use quiz_admin::api::models::{CategoryLocale, QuestionPool, QuestionStatus};
use quiz_admin::api::ApiError;
use quiz_admin::domain::locales::QuestionLocaleEditor;
use quiz_admin::domain::{LocaleEditor, Pagination, QuestionFilters};
use quiz_admin::services::{CategoryService, QuestionService};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct ReviewMock {
    requests: Mutex<Vec<(String, Value)>>,
}

impl ReviewMock {
    fn record(&self, route: &str, value: Value) {
        self.requests.lock().unwrap().push((route.to_string(), value));
    }

    fn recorded(&self) -> Vec<(String, Value)> {
        self.requests.lock().unwrap().clone()
    }
}

async fn list(
    State(mock): State<Arc<ReviewMock>>,
    Path(pool): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    mock.record(&format!("list:{}", pool), json!(query));
    envelope(json!({
        "questions": [question_json("q1", 4), question_json("q2", 4)],
        "totalPages": 3,
        "questionsCount": 12
    }))
}

async fn update_category(
    State(mock): State<Arc<ReviewMock>>,
    Path(pool): Path<String>,
    Json(body): Json<Value>,
) -> Json<Value> {
    mock.record(&format!("move:{}", pool), body);
    Json(json!({"message": "Category updated"}))
}

async fn translate_question(
    State(mock): State<Arc<ReviewMock>>,
    Path((pool, id)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Json<Value> {
    mock.record(&format!("translate:{}:{}", pool, id), body);
    envelope(json!({
        "question": "Питання?",
        "correct": "так",
        "wrong": ["ні", "можливо", "ніколи"]
    }))
}

async fn translate_category(State(mock): State<Arc<ReviewMock>>, Json(body): Json<Value>) -> Json<Value> {
    mock.record("translate-category", body);
    // Object-map shape, including a language the editor already holds
    envelope(json!({
        "uk": "Мистецтво",
        "es": {"value": "Arte"},
        "en": "Overwritten"
    }))
}

async fn start() -> (Arc<ReviewMock>, String) {
    let mock = Arc::new(ReviewMock::default());
    let router = Router::new()
        .route("/questions/{pool}", get(list))
        .route("/questions/{pool}/update-category", patch(update_category))
        .route("/questions/{pool}/translate/{id}", post(translate_question))
        .route("/categories/translate", post(translate_category))
        .with_state(mock.clone());
    let base_url = spawn(router).await;
    (mock, base_url)
}

fn history_filters() -> QuestionFilters {
    QuestionFilters {
        title: Some("capital".to_string()),
        difficulty: Some(3),
        status: Some(QuestionStatus::Approved),
        locale_excluded: Some("uk".to_string()),
        category: Some("  ".to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_history_list_sends_pagination_and_filters() {
    let (mock, base_url) = start().await;
    let service = QuestionService::new(client(&base_url, logged_in_store()));

    let page = service
        .list(QuestionPool::History, &Pagination::new(2, 5), &history_filters())
        .await
        .unwrap();

    assert_eq!(page.questions.len(), 2);
    assert_eq!(page.total_pages, Some(3));
    let (route, query) = &mock.recorded()[0];
    assert_eq!(route, "list:history");
    assert_eq!(
        query,
        &json!({
            "page": "2",
            "limit": "5",
            "title": "capital",
            "difficulty": "3",
            "status": "approved",
            "localeExcluded": "uk"
        })
    );
}

#[tokio::test]
async fn test_generated_list_ignores_filters() {
    let (mock, base_url) = start().await;
    let service = QuestionService::new(client(&base_url, logged_in_store()));

    service
        .list(QuestionPool::Generated, &Pagination::new(1, 5), &history_filters())
        .await
        .unwrap();

    let (route, query) = &mock.recorded()[0];
    assert_eq!(route, "list:generated");
    assert_eq!(query, &json!({"page": "1", "limit": "5"}));
}

#[tokio::test]
async fn test_move_sends_ids_and_target_in_one_request() {
    let (mock, base_url) = start().await;
    let service = QuestionService::new(client(&base_url, logged_in_store()));
    let ids = vec!["q1".to_string(), "q2".to_string(), "q3".to_string()];

    let moved = service.move_questions(QuestionPool::History, &ids, 42).await.unwrap();

    assert_eq!(moved, 3);
    assert_eq!(
        mock.recorded(),
        vec![(
            "move:history".to_string(),
            json!({"questionIds": ["q1", "q2", "q3"], "categoryId": 42})
        )]
    );
}

#[tokio::test]
async fn test_move_without_ids_never_reaches_the_server() {
    let (mock, base_url) = start().await;
    let service = QuestionService::new(client(&base_url, logged_in_store()));

    let err = service.move_questions(QuestionPool::Generated, &[], 42).await.unwrap_err();

    assert!(matches!(err, ApiError::Validation(_)));
    assert!(mock.recorded().is_empty());
}

#[tokio::test]
async fn test_question_translation_appends_unvalidated_locale() {
    let (mock, base_url) = start().await;
    let service = QuestionService::new(client(&base_url, logged_in_store()));
    let question = serde_json::from_value::<quiz_admin::api::Question>(question_json("q1", 4)).unwrap();
    let mut editor = QuestionLocaleEditor::new(question.locales).unwrap();

    service
        .translate_into(QuestionPool::History, "q1", &mut editor, "uk")
        .await
        .unwrap();

    let added = editor.locales().iter().find(|l| l.language == "uk").unwrap();
    assert_eq!(added.question, "Питання?");
    assert!(!added.is_valid);
    assert_eq!(mock.recorded()[0], ("translate:history:q1".to_string(), json!({"language": "uk"})));

    // a language the question already has is refused before any request
    let err = service
        .translate_into(QuestionPool::History, "q1", &mut editor, "uk")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
    assert_eq!(mock.recorded().len(), 1);
}

#[tokio::test]
async fn test_category_translation_fills_only_missing_languages() {
    let (mock, base_url) = start().await;
    let service = CategoryService::new(client(&base_url, logged_in_store()));
    let supported = vec!["en".to_string(), "uk".to_string(), "es".to_string()];
    let mut editor = LocaleEditor::from_locales(vec![CategoryLocale::new("en", "Art")], supported).unwrap();

    let added = service.translate_into(&mut editor, "Art").await.unwrap();

    assert_eq!(added, 2);
    let locales = editor.locales();
    assert_eq!(locales.len(), 3);
    assert_eq!(locales[0], CategoryLocale::new("en", "Art"));
    assert!(locales.contains(&CategoryLocale::new("uk", "Мистецтво")));
    assert!(locales.contains(&CategoryLocale::new("es", "Arte")));
    assert_eq!(
        mock.recorded()[0].1,
        json!({"requiredLocales": ["uk", "es"], "sourceLanguage": "en", "originalText": "Art"})
    );
}

#[tokio::test]
async fn test_category_translation_with_empty_text_never_reaches_the_server() {
    let (mock, base_url) = start().await;
    let service = CategoryService::new(client(&base_url, logged_in_store()));
    let mut editor = LocaleEditor::new(vec!["en".to_string(), "uk".to_string()]);

    let err = service.translate_into(&mut editor, "  ").await.unwrap_err();

    assert!(matches!(err, ApiError::Validation(_)));
    assert!(mock.recorded().is_empty());
}
