//! Locale list editing for categories and questions
//!
//! Both editors keep one entry per language. Anything that would introduce a
//! second entry for a language is rejected with
//! [`ValidationError::DuplicateLanguage`] instead of being merged.

use super::validation::ValidationError;
use crate::api::models::{
    CategoryLocale, QuestionLocale, TranslateCategoryRequest, TranslatedQuestion,
};
use serde_json::Value;

/// Languages the backend translates into, in picker order
pub const ALL_LANGUAGES: [&str; 9] = ["en", "uk", "es", "ru", "fr", "de", "it", "pl", "tr"];

pub fn default_languages() -> Vec<String> {
    ALL_LANGUAGES.iter().map(|l| l.to_string()).collect()
}

/// Editable locale list of one category
#[derive(Debug, Clone, PartialEq)]
pub struct LocaleEditor {
    locales: Vec<CategoryLocale>,
    supported: Vec<String>,
}

impl LocaleEditor {
    /// New-category editor, seeded with an empty English entry
    pub fn new(supported: Vec<String>) -> Self {
        Self {
            locales: vec![CategoryLocale::new("en", "")],
            supported,
        }
    }

    /// Editor over an existing list; fails if the list already repeats a language
    pub fn from_locales(locales: Vec<CategoryLocale>, supported: Vec<String>) -> Result<Self, ValidationError> {
        let mut editor = Self {
            locales: Vec::with_capacity(locales.len()),
            supported,
        };
        for locale in locales {
            if editor.contains(&locale.language) {
                return Err(ValidationError::DuplicateLanguage(locale.language));
            }
            editor.locales.push(locale);
        }
        Ok(editor)
    }

    pub fn locales(&self) -> &[CategoryLocale] {
        &self.locales
    }

    pub fn into_locales(self) -> Vec<CategoryLocale> {
        self.locales
    }

    pub fn contains(&self, language: &str) -> bool {
        self.locales.iter().any(|l| l.language == language)
    }

    /// Supported languages with no entry yet, in supported order
    pub fn missing_languages(&self) -> Vec<String> {
        self.supported
            .iter()
            .filter(|lang| !self.contains(lang))
            .cloned()
            .collect()
    }

    fn check_supported(&self, language: &str) -> Result<(), ValidationError> {
        if self.supported.iter().any(|l| l == language) {
            Ok(())
        } else {
            Err(ValidationError::UnsupportedLanguage(language.to_string()))
        }
    }

    /// Append an empty entry for the first supported language not yet used
    pub fn add_next(&mut self) -> Result<String, ValidationError> {
        let language = self
            .missing_languages()
            .into_iter()
            .next()
            .ok_or(ValidationError::NoLanguageAvailable)?;
        self.locales.push(CategoryLocale::new(language.clone(), ""));
        Ok(language)
    }

    pub fn add(&mut self, language: &str, value: &str) -> Result<(), ValidationError> {
        self.check_supported(language)?;
        if self.contains(language) {
            return Err(ValidationError::DuplicateLanguage(language.to_string()));
        }
        self.locales.push(CategoryLocale::new(language, value));
        Ok(())
    }

    /// Set the value for `language`, adding the entry when it is missing
    pub fn upsert(&mut self, language: &str, value: &str) -> Result<(), ValidationError> {
        if self.contains(language) {
            self.set_value(language, value)
        } else {
            self.add(language, value)
        }
    }

    pub fn remove(&mut self, language: &str) -> Result<(), ValidationError> {
        if !self.contains(language) {
            return Err(ValidationError::MissingLanguage(language.to_string()));
        }
        if self.locales.len() == 1 {
            return Err(ValidationError::LastLocale);
        }
        self.locales.retain(|l| l.language != language);
        Ok(())
    }

    pub fn change_language(&mut self, from: &str, to: &str) -> Result<(), ValidationError> {
        if from == to {
            return Ok(());
        }
        self.check_supported(to)?;
        if self.contains(to) {
            return Err(ValidationError::DuplicateLanguage(to.to_string()));
        }
        let locale = self
            .locales
            .iter_mut()
            .find(|l| l.language == from)
            .ok_or_else(|| ValidationError::MissingLanguage(from.to_string()))?;
        locale.language = to.to_string();
        Ok(())
    }

    pub fn set_value(&mut self, language: &str, value: &str) -> Result<(), ValidationError> {
        let locale = self
            .locales
            .iter_mut()
            .find(|l| l.language == language)
            .ok_or_else(|| ValidationError::MissingLanguage(language.to_string()))?;
        locale.value = value.to_string();
        Ok(())
    }

    /// Translation request for every missing language, sourced from the first entry
    pub fn translate_request(&self, original_text: &str) -> Result<TranslateCategoryRequest, ValidationError> {
        let source = self
            .locales
            .first()
            .ok_or(ValidationError::LastLocale)?;
        let original_text = super::validation::require_text(original_text, "name")?;
        let required_locales = self.missing_languages();
        if required_locales.is_empty() {
            return Err(ValidationError::NoLanguageAvailable);
        }
        Ok(TranslateCategoryRequest {
            required_locales,
            source_language: source.language.clone(),
            original_text,
        })
    }

    /// Splice in translated entries for languages still missing; existing
    /// entries are never overwritten. Returns how many were added.
    pub fn merge_translations(&mut self, translated: Vec<CategoryLocale>) -> usize {
        let mut added = 0;
        for locale in translated {
            if !self.contains(&locale.language) {
                self.locales.push(locale);
                added += 1;
            }
        }
        added
    }
}

/// Decode a category translation payload.
///
/// The backend answers either with a locale list or with an object keyed by
/// language whose values are strings or `{value}` objects.
pub fn translated_locales(value: Value) -> Vec<CategoryLocale> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value::<CategoryLocale>(item).ok())
            .collect(),
        Value::Object(map) => map
            .into_iter()
            .filter_map(|(language, v)| {
                let text = match v {
                    Value::String(s) => s,
                    Value::Object(inner) => inner.get("value")?.as_str()?.to_string(),
                    _ => return None,
                };
                Some(CategoryLocale::new(language, text))
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Parse a `LANG=VALUE` command-line pair
pub fn parse_locale_arg(arg: &str) -> Result<CategoryLocale, ValidationError> {
    let (language, value) = arg
        .split_once('=')
        .ok_or_else(|| ValidationError::MalformedLocale(arg.to_string()))?;
    let language = language.trim();
    if language.is_empty() {
        return Err(ValidationError::MalformedLocale(arg.to_string()));
    }
    Ok(CategoryLocale::new(language, value.trim()))
}

/// Editable locale list of one question. The first entry is the base locale.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionLocaleEditor {
    locales: Vec<QuestionLocale>,
}

impl QuestionLocaleEditor {
    /// Fails when a language appears twice
    pub fn new(locales: Vec<QuestionLocale>) -> Result<Self, ValidationError> {
        let mut editor = Self {
            locales: Vec::with_capacity(locales.len()),
        };
        for locale in locales {
            if editor.contains(&locale.language) {
                return Err(ValidationError::DuplicateLanguage(locale.language));
            }
            editor.locales.push(locale);
        }
        Ok(editor)
    }

    pub fn locales(&self) -> &[QuestionLocale] {
        &self.locales
    }

    pub fn into_locales(self) -> Vec<QuestionLocale> {
        self.locales
    }

    pub fn contains(&self, language: &str) -> bool {
        self.locales.iter().any(|l| l.language == language)
    }

    pub fn base_language(&self) -> Option<&str> {
        self.locales.first().map(|l| l.language.as_str())
    }

    pub fn missing_languages(&self, supported: &[String]) -> Vec<String> {
        supported.iter().filter(|l| !self.contains(l)).cloned().collect()
    }

    /// Append a machine translation; it stays unvalidated until reviewed
    pub fn append_translated(&mut self, language: &str, translated: TranslatedQuestion) -> Result<(), ValidationError> {
        if self.contains(language) {
            return Err(ValidationError::DuplicateLanguage(language.to_string()));
        }
        self.locales.push(QuestionLocale {
            language: language.to_string(),
            question: translated.question,
            correct: translated.correct,
            wrong: translated.wrong,
            is_valid: false,
        });
        Ok(())
    }

    pub fn remove(&mut self, language: &str) -> Result<(), ValidationError> {
        if self.base_language() == Some(language) {
            return Err(ValidationError::Invalid("cannot delete the base locale".to_string()));
        }
        if !self.contains(language) {
            return Err(ValidationError::MissingLanguage(language.to_string()));
        }
        self.locales.retain(|l| l.language != language);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::CorrectAnswer;
    use serde_json::json;

    fn editor(pairs: &[(&str, &str)]) -> LocaleEditor {
        LocaleEditor::from_locales(
            pairs.iter().map(|(l, v)| CategoryLocale::new(*l, *v)).collect(),
            default_languages(),
        )
        .unwrap()
    }

    fn languages(editor: &LocaleEditor) -> Vec<&str> {
        editor.locales().iter().map(|l| l.language.as_str()).collect()
    }

    #[test]
    fn test_new_editor_starts_with_empty_english() {
        let editor = LocaleEditor::new(default_languages());
        assert_eq!(editor.locales(), &[CategoryLocale::new("en", "")]);
    }

    #[test]
    fn test_from_locales_rejects_repeated_language() {
        let result = LocaleEditor::from_locales(
            vec![CategoryLocale::new("en", "A"), CategoryLocale::new("en", "B")],
            default_languages(),
        );
        assert_eq!(result, Err(ValidationError::DuplicateLanguage("en".into())));
    }

    #[test]
    fn test_add_next_picks_first_unused_language() {
        let mut editor = editor(&[("en", "Art"), ("es", "Arte")]);
        assert_eq!(editor.add_next().unwrap(), "uk");
        assert_eq!(languages(&editor), vec!["en", "es", "uk"]);
    }

    #[test]
    fn test_add_next_fails_when_all_used() {
        let mut editor = LocaleEditor::new(vec!["en".to_string()]);
        assert_eq!(editor.add_next(), Err(ValidationError::NoLanguageAvailable));
    }

    #[test]
    fn test_no_operation_introduces_a_duplicate_language() {
        let mut editor = editor(&[("en", "Art"), ("uk", "Мистецтво")]);

        assert_eq!(editor.add("uk", "x"), Err(ValidationError::DuplicateLanguage("uk".into())));
        assert_eq!(
            editor.change_language("en", "uk"),
            Err(ValidationError::DuplicateLanguage("uk".into()))
        );
        assert_eq!(editor.add("xx", "x"), Err(ValidationError::UnsupportedLanguage("xx".into())));

        editor.change_language("uk", "de").unwrap();
        assert_eq!(languages(&editor), vec!["en", "de"]);
    }

    #[test]
    fn test_remove_keeps_at_least_one_locale() {
        let mut editor = editor(&[("en", "Art"), ("de", "Kunst")]);
        editor.remove("de").unwrap();
        assert_eq!(editor.remove("en"), Err(ValidationError::LastLocale));
        assert_eq!(editor.remove("fr"), Err(ValidationError::MissingLanguage("fr".into())));
    }

    #[test]
    fn test_upsert_sets_or_adds() {
        let mut editor = editor(&[("en", "")]);
        editor.upsert("en", "Art").unwrap();
        editor.upsert("fr", "Art FR").unwrap();
        assert_eq!(
            editor.locales(),
            &[CategoryLocale::new("en", "Art"), CategoryLocale::new("fr", "Art FR")]
        );
    }

    #[test]
    fn test_translate_request_asks_for_missing_languages() {
        let editor = LocaleEditor::from_locales(
            vec![CategoryLocale::new("uk", "Мистецтво")],
            vec!["en".into(), "uk".into(), "de".into()],
        )
        .unwrap();

        let request = editor.translate_request("Art").unwrap();
        assert_eq!(request.required_locales, vec!["en", "de"]);
        assert_eq!(request.source_language, "uk");
        assert_eq!(request.original_text, "Art");

        assert_eq!(editor.translate_request("  "), Err(ValidationError::Empty("name")));
    }

    #[test]
    fn test_merge_translations_never_overwrites() {
        let mut editor = editor(&[("en", "Art"), ("de", "Kunst (edited)")]);
        let added = editor.merge_translations(vec![
            CategoryLocale::new("de", "Kunst"),
            CategoryLocale::new("fr", "Art FR"),
        ]);

        assert_eq!(added, 1);
        assert_eq!(editor.locales()[1].value, "Kunst (edited)");
        assert_eq!(languages(&editor), vec!["en", "de", "fr"]);
    }

    #[test]
    fn test_translated_locales_accepts_list_and_map() {
        let from_list = translated_locales(json!([{"language": "de", "value": "Kunst"}]));
        assert_eq!(from_list, vec![CategoryLocale::new("de", "Kunst")]);

        let mut from_map = translated_locales(json!({"fr": "Art", "it": {"value": "Arte"}}));
        from_map.sort_by(|a, b| a.language.cmp(&b.language));
        assert_eq!(
            from_map,
            vec![CategoryLocale::new("fr", "Art"), CategoryLocale::new("it", "Arte")]
        );
    }

    #[test]
    fn test_parse_locale_arg() {
        assert_eq!(parse_locale_arg("uk=Мистецтво").unwrap(), CategoryLocale::new("uk", "Мистецтво"));
        assert_eq!(parse_locale_arg("en=a=b").unwrap().value, "a=b");
        assert!(matches!(parse_locale_arg("oops"), Err(ValidationError::MalformedLocale(_))));
        assert!(matches!(parse_locale_arg("=x"), Err(ValidationError::MalformedLocale(_))));
    }

    #[test]
    fn test_question_editor_appends_unvalidated_translation() {
        let mut editor = QuestionLocaleEditor::new(vec![QuestionLocale {
            language: "en".into(),
            question: "Capital of France?".into(),
            correct: CorrectAnswer::Text("Paris".into()),
            wrong: vec!["Lyon".into()],
            is_valid: true,
        }])
        .unwrap();

        let translated = TranslatedQuestion {
            question: "Capitale de la France ?".into(),
            correct: CorrectAnswer::Text("Paris".into()),
            wrong: vec!["Lyon".into()],
        };
        editor.append_translated("fr", translated.clone()).unwrap();
        assert!(!editor.locales()[1].is_valid);
        assert_eq!(
            editor.append_translated("fr", translated),
            Err(ValidationError::DuplicateLanguage("fr".into()))
        );

        assert!(editor.remove("en").is_err());
        editor.remove("fr").unwrap();
        assert_eq!(editor.locales().len(), 1);
    }

    #[test]
    fn test_question_editor_rejects_repeated_language() {
        let locale = |question: &str| QuestionLocale {
            language: "en".into(),
            question: question.into(),
            correct: CorrectAnswer::Text("Paris".into()),
            wrong: Vec::new(),
            is_valid: true,
        };

        let result = QuestionLocaleEditor::new(vec![locale("Capital of France?"), locale("France capital?")]);
        assert_eq!(result, Err(ValidationError::DuplicateLanguage("en".into())));
    }
}
