//! Form state for AI question generation and boilerplate parsing

use super::validation::{ValidationError, require_text};
use crate::api::models::{
    CategoryId, GenerateQuestionsRequest, GenerationOutcome, ParseQuestionsRequest, QuestionType,
};
use serde_json::Value;

/// Models the generation endpoint accepts
pub const GPT_MODELS: [&str; 11] = [
    "gpt-3.5-turbo",
    "gpt-4-turbo",
    "gpt-4",
    "gpt-4o",
    "gpt-4o-mini",
    "o1",
    "o1-mini",
    "o3",
    "o3-mini",
    "gpt-4.5",
    "gpt-5",
];

/// Languages offered for boilerplate parsing
pub const PARSE_LANGUAGES: [&str; 6] = ["en", "es", "fr", "de", "uk", "zh"];

pub const DIFFICULTY_RANGE: std::ops::RangeInclusive<u8> = 1..=5;
pub const TEMPERATURE_RANGE: std::ops::RangeInclusive<f32> = 0.0..=2.0;

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSettings {
    pub category: String,
    pub prompt: String,
    pub max_tokens: u32,
    pub count: u32,
    pub temperature: f32,
    pub difficulty: u8,
    pub question_type: QuestionType,
    pub model: String,
    pub required_languages: Vec<String>,
    pub questions: Vec<Value>,
    pub tokens_used: u64,
    pub error: Option<String>,
    pub is_generated: bool,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            category: "Art".to_string(),
            prompt: String::new(),
            max_tokens: 140,
            count: 5,
            temperature: 0.5,
            difficulty: 1,
            question_type: QuestionType::Choice,
            model: "gpt-3.5-turbo".to_string(),
            required_languages: vec!["en".to_string()],
            questions: Vec::new(),
            tokens_used: 0,
            error: None,
            is_generated: false,
        }
    }
}

impl GenerationSettings {
    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        self.category = category.into();
    }

    pub fn set_difficulty(&mut self, difficulty: u8) {
        self.difficulty = difficulty;
    }

    pub fn set_temperature(&mut self, temperature: f32) {
        self.temperature = temperature;
    }

    pub fn set_count(&mut self, count: u32) {
        self.count = count;
    }

    pub fn set_max_tokens(&mut self, max_tokens: u32) {
        self.max_tokens = max_tokens;
    }

    pub fn set_model(&mut self, model: impl Into<String>) {
        self.model = model.into();
    }

    pub fn set_question_type(&mut self, question_type: QuestionType) {
        self.question_type = question_type;
    }

    /// Add the language if absent, remove it otherwise
    pub fn toggle_language(&mut self, language: &str) {
        if let Some(pos) = self.required_languages.iter().position(|l| l == language) {
            self.required_languages.remove(pos);
        } else {
            self.required_languages.push(language.to_string());
        }
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }

    pub fn clear_prompt(&mut self) {
        self.prompt.clear();
    }

    /// Record a successful run: keep its output, clear the prompt and any error
    pub fn mark_generated(&mut self, outcome: GenerationOutcome) {
        self.questions = outcome.questions;
        self.tokens_used = outcome.total_tokens_used;
        self.is_generated = true;
        self.clear_prompt();
        self.set_error(None);
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text(&self.prompt, "Prompt")?;
        require_text(&self.category, "Category")?;
        if !DIFFICULTY_RANGE.contains(&self.difficulty) {
            return Err(ValidationError::OutOfRange {
                field: "difficulty",
                min: DIFFICULTY_RANGE.start().to_string(),
                max: DIFFICULTY_RANGE.end().to_string(),
            });
        }
        if !TEMPERATURE_RANGE.contains(&self.temperature) {
            return Err(ValidationError::OutOfRange {
                field: "temperature",
                min: TEMPERATURE_RANGE.start().to_string(),
                max: TEMPERATURE_RANGE.end().to_string(),
            });
        }
        if self.count == 0 {
            return Err(ValidationError::Invalid("count must be at least 1".to_string()));
        }
        if self.max_tokens == 0 {
            return Err(ValidationError::Invalid("max tokens must be at least 1".to_string()));
        }
        if !GPT_MODELS.contains(&self.model.as_str()) {
            return Err(ValidationError::Invalid(format!("unknown model '{}'", self.model)));
        }
        if self.required_languages.is_empty() {
            return Err(ValidationError::Empty("Required languages"));
        }
        Ok(())
    }

    /// Validated request body; the prompt and category are sent trimmed
    pub fn to_request(&self) -> Result<GenerateQuestionsRequest, ValidationError> {
        self.validate()?;
        Ok(GenerateQuestionsRequest {
            prompt: self.prompt.trim().to_string(),
            difficulty: self.difficulty,
            max_tokens: self.max_tokens,
            count: self.count,
            category: self.category.trim().to_string(),
            temperature: self.temperature,
            question_type: self.question_type,
            model: self.model.clone(),
            required_languages: self.required_languages.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseForm {
    pub category_id: Option<CategoryId>,
    pub boilerplate_text: String,
    pub language: String,
    pub question_type: QuestionType,
    pub tokens_used: u64,
    pub error: Option<String>,
    pub is_generated: bool,
}

impl Default for ParseForm {
    fn default() -> Self {
        Self {
            category_id: None,
            boilerplate_text: String::new(),
            language: "en".to_string(),
            question_type: QuestionType::Choice,
            tokens_used: 0,
            error: None,
            is_generated: false,
        }
    }
}

impl ParseForm {
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.boilerplate_text = text.into();
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }

    pub fn mark_parsed(&mut self, outcome: &GenerationOutcome) {
        self.tokens_used = outcome.total_tokens_used;
        self.is_generated = true;
        self.boilerplate_text.clear();
        self.error = None;
    }

    pub fn to_request(&self) -> Result<ParseQuestionsRequest, ValidationError> {
        if self.boilerplate_text.trim().is_empty() {
            return Err(ValidationError::Empty("Boilerplate text"));
        }
        if !PARSE_LANGUAGES.contains(&self.language.as_str()) {
            return Err(ValidationError::UnsupportedLanguage(self.language.clone()));
        }
        let category_id = self
            .category_id
            .ok_or(ValidationError::Empty("Category"))?;
        Ok(ParseQuestionsRequest {
            boilerplate_text: self.boilerplate_text.clone(),
            category_id,
            language: self.language.clone(),
            question_type: self.question_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready() -> GenerationSettings {
        let mut settings = GenerationSettings::default();
        settings.set_prompt("  Famous paintings  ");
        settings
    }

    #[test]
    fn test_defaults() {
        let settings = GenerationSettings::default();
        assert_eq!(settings.category, "Art");
        assert_eq!(settings.max_tokens, 140);
        assert_eq!(settings.count, 5);
        assert_eq!(settings.temperature, 0.5);
        assert_eq!(settings.difficulty, 1);
        assert_eq!(settings.model, "gpt-3.5-turbo");
        assert_eq!(settings.required_languages, vec!["en"]);
        assert!(!settings.is_generated);
    }

    #[test]
    fn test_to_request_trims_prompt() {
        let request = ready().to_request().unwrap();
        assert_eq!(request.prompt, "Famous paintings");
        assert_eq!(request.question_type, QuestionType::Choice);
    }

    #[test]
    fn test_invalid_settings_never_build_a_request() {
        assert_eq!(
            GenerationSettings::default().to_request(),
            Err(ValidationError::Empty("Prompt"))
        );

        let mut settings = ready();
        settings.set_difficulty(6);
        assert!(matches!(settings.to_request(), Err(ValidationError::OutOfRange { field: "difficulty", .. })));

        let mut settings = ready();
        settings.set_temperature(2.5);
        assert!(matches!(settings.to_request(), Err(ValidationError::OutOfRange { field: "temperature", .. })));

        let mut settings = ready();
        settings.set_count(0);
        assert!(settings.to_request().is_err());

        let mut settings = ready();
        settings.toggle_language("en");
        assert_eq!(settings.to_request(), Err(ValidationError::Empty("Required languages")));

        let mut settings = ready();
        settings.set_model("davinci");
        assert!(settings.to_request().is_err());
    }

    #[test]
    fn test_mark_generated_clears_prompt_and_error() {
        let mut settings = ready();
        settings.set_error(Some("Failed to generate questions".to_string()));
        settings.mark_generated(GenerationOutcome {
            total_tokens_used: 812,
            questions: vec![serde_json::json!({"question": "?"})],
        });

        assert!(settings.is_generated);
        assert_eq!(settings.tokens_used, 812);
        assert!(settings.prompt.is_empty());
        assert!(settings.error.is_none());
        assert_eq!(settings.questions.len(), 1);
    }

    #[test]
    fn test_parse_form_requires_text_and_category() {
        let mut form = ParseForm::default();
        assert_eq!(
            form.to_request().unwrap_err().to_string(),
            "Boilerplate text cannot be empty"
        );

        form.set_text("1. What is 2+2? a) 4 b) 5");
        assert_eq!(form.to_request(), Err(ValidationError::Empty("Category")));

        form.category_id = Some(12);
        let request = form.to_request().unwrap();
        assert_eq!(request.category_id, 12);
        assert_eq!(request.language, "en");

        form.mark_parsed(&GenerationOutcome {
            total_tokens_used: 40,
            questions: Vec::new(),
        });
        assert!(form.boilerplate_text.is_empty());
        assert_eq!(form.tokens_used, 40);
    }
}
