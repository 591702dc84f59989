//! Wire models for the quiz backend
//!
//! Field names follow the backend's camelCase JSON with Mongo-style `_id`
//! keys. Every response is wrapped in an [`ApiResponse`] envelope.

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

pub type CategoryId = i64;
pub type QuestionId = String;

/// Response envelope shared by every backend endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub message: String,
    pub response_object: T,
}

/// Envelope for endpoints that only answer with a message
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryLocale {
    pub language: String,
    pub value: String,
}

impl CategoryLocale {
    pub fn new(language: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<CategoryId>,
    #[serde(default)]
    pub ancestors: Vec<CategoryId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    #[serde(default)]
    pub locales: Vec<CategoryLocale>,
    /// Only present on the with-questions-count listing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub questions_count: Option<u64>,
}

impl Category {
    /// Locale value for `language`, falling back to the default name.
    /// Empty locale values count as missing.
    pub fn display_name(&self, language: &str) -> &str {
        self.locales
            .iter()
            .find(|l| l.language == language && !l.value.is_empty())
            .map(|l| l.value.as_str())
            .unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPage {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub categories_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryList {
    #[serde(default)]
    pub categories: Vec<Category>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum QuestionStatus {
    Pending,
    Approved,
    Rejected,
    ProofReading,
}

impl fmt::Display for QuestionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            QuestionStatus::Pending => "pending",
            QuestionStatus::Approved => "approved",
            QuestionStatus::Rejected => "rejected",
            QuestionStatus::ProofReading => "proof_reading",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    #[default]
    Choice,
    Map,
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionType::Choice => write!(f, "choice"),
            QuestionType::Map => write!(f, "map"),
        }
    }
}

/// Which server-side pool a question lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum QuestionPool {
    /// Freshly generated or parsed candidates
    Generated,
    /// Reviewed questions
    History,
}

impl QuestionPool {
    pub fn as_path(&self) -> &'static str {
        match self {
            QuestionPool::Generated => "generated",
            QuestionPool::History => "history",
        }
    }
}

impl fmt::Display for QuestionPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_path())
    }
}

/// Correct answer: text for choice questions, coordinates for map questions
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum CorrectAnswer {
    Text(String),
    Coordinates(Vec<f64>),
}

impl Default for CorrectAnswer {
    fn default() -> Self {
        CorrectAnswer::Text(String::new())
    }
}

impl fmt::Display for CorrectAnswer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorrectAnswer::Text(text) => write!(f, "{}", text),
            CorrectAnswer::Coordinates(coords) => {
                let parts: Vec<String> = coords.iter().map(|c| c.to_string()).collect();
                write!(f, "[{}]", parts.join(", "))
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuestionLocale {
    pub language: String,
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub correct: CorrectAnswer,
    #[serde(default)]
    pub wrong: Vec<String>,
    #[serde(default)]
    pub is_valid: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(rename = "_id")]
    pub id: QuestionId,
    #[serde(default, deserialize_with = "string_or_number")]
    pub category_id: String,
    pub status: QuestionStatus,
    #[serde(rename = "type", default)]
    pub question_type: QuestionType,
    #[serde(default = "default_difficulty")]
    pub difficulty: u8,
    #[serde(default)]
    pub locales: Vec<QuestionLocale>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub required_languages: Vec<String>,
    #[serde(default)]
    pub is_valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_difficulty() -> u8 {
    1
}

impl Question {
    /// Question text in `language`, else the first locale's text
    pub fn headline(&self, language: &str) -> &str {
        self.locales
            .iter()
            .find(|l| l.language == language)
            .or_else(|| self.locales.first())
            .map(|l| l.question.as_str())
            .unwrap_or("")
    }

    pub fn languages(&self) -> Vec<&str> {
        self.locales.iter().map(|l| l.language.as_str()).collect()
    }
}

/// The backend sends `categoryId` as a number on some endpoints and a string on others
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(de::Error::custom(format!("invalid categoryId: {}", other))),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionPage {
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(default)]
    pub total_pages: Option<u32>,
    #[serde(default)]
    pub questions_count: Option<u64>,
}

/// Server-computed duplicate clusters for one category
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DuplicateCheckResult {
    #[serde(default)]
    pub duplicates: Vec<Vec<QuestionId>>,
    #[serde(default)]
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeeplLogStat {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub characters_used: u64,
    #[serde(default)]
    pub source_language: String,
    #[serde(default)]
    pub target_language: String,
    #[serde(default)]
    pub request_text: String,
    #[serde(default)]
    pub translated_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeeplLogPage {
    #[serde(default)]
    pub logs: Vec<DeeplLogStat>,
    #[serde(default)]
    pub total_characters: u64,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_requests: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<CategoryId>,
    pub locales: Vec<CategoryLocale>,
}

#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<CategoryId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locales: Option<Vec<CategoryLocale>>,
}

impl UpdateCategoryRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.parent_id.is_none() && self.locales.is_none()
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TranslateCategoryRequest {
    pub required_locales: Vec<String>,
    pub source_language: String,
    pub original_text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TranslateQuestionRequest {
    pub language: String,
}

/// Body of a per-question translation response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslatedQuestion {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub correct: CorrectAnswer,
    #[serde(default)]
    pub wrong: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateTranslationRequest {
    pub question_id: QuestionId,
    pub original_language: String,
    pub target_language: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationValidation {
    pub is_valid: bool,
    #[serde(default)]
    pub suggestions: Vec<Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct IdsRequest {
    pub ids: Vec<QuestionId>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuestionsCategoryRequest {
    pub question_ids: Vec<QuestionId>,
    pub category_id: CategoryId,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQuestionsRequest {
    pub prompt: String,
    pub difficulty: u8,
    pub max_tokens: u32,
    pub count: u32,
    pub category: String,
    pub temperature: f32,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub model: String,
    pub required_languages: Vec<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ParseQuestionsRequest {
    pub boilerplate_text: String,
    pub category_id: CategoryId,
    pub language: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
}

/// Token usage reported by generate/parse
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GenerationOutcome {
    #[serde(default)]
    pub total_tokens_used: u64,
    #[serde(default)]
    pub questions: Vec<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_category_decodes_wire_names() {
        let category: Category = serde_json::from_value(json!({
            "_id": 4,
            "name": "Geography",
            "parentId": null,
            "ancestors": [],
            "locales": [{"language": "uk", "value": "Географія"}]
        }))
        .unwrap();

        assert_eq!(category.id, 4);
        assert_eq!(category.parent_id, None);
        assert_eq!(category.display_name("uk"), "Географія");
        assert_eq!(category.display_name("en"), "Geography");
    }

    #[test]
    fn test_display_name_skips_empty_locale_value() {
        let category = Category {
            id: 1,
            name: "Root".to_string(),
            parent_id: None,
            ancestors: vec![],
            hash: None,
            locales: vec![CategoryLocale::new("en", "")],
            questions_count: None,
        };
        assert_eq!(category.display_name("en"), "Root");
    }

    #[test]
    fn test_question_accepts_numeric_category_id_and_map_answer() {
        let question: Question = serde_json::from_value(json!({
            "_id": "q1",
            "categoryId": 17,
            "status": "proof_reading",
            "type": "map",
            "difficulty": 3,
            "locales": [{
                "language": "en",
                "question": "Where is Kyiv?",
                "correct": [50.45, 30.52],
                "wrong": [],
                "isValid": true
            }],
            "tags": [],
            "requiredLanguages": ["en"],
            "isValid": true,
            "createdAt": "2024-03-01T10:00:00.000Z",
            "updatedAt": "2024-03-01T10:00:00.000Z"
        }))
        .unwrap();

        assert_eq!(question.category_id, "17");
        assert_eq!(question.status, QuestionStatus::ProofReading);
        assert_eq!(question.question_type, QuestionType::Map);
        assert_eq!(
            question.locales[0].correct,
            CorrectAnswer::Coordinates(vec![50.45, 30.52])
        );
        assert!(question.created_at.is_some());
    }

    #[test]
    fn test_headline_falls_back_to_first_locale() {
        let question: Question = serde_json::from_value(json!({
            "_id": "q2",
            "categoryId": "3",
            "status": "pending",
            "locales": [{"language": "fr", "question": "Bonjour?", "correct": "Oui", "wrong": ["Non"]}]
        }))
        .unwrap();

        assert_eq!(question.headline("en"), "Bonjour?");
        assert_eq!(question.headline("fr"), "Bonjour?");
    }

    #[test]
    fn test_update_category_request_skips_unset_fields() {
        let body = UpdateCategoryRequest {
            name: Some("History".to_string()),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&body).unwrap(), json!({"name": "History"}));
    }
}
