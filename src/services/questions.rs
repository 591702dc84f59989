//! Review lists, status transitions, translation, generation and bulk moves

use crate::api::constants::questions as endpoints;
use crate::api::models::{
    CategoryId, DuplicateCheckResult, GenerationOutcome, IdsRequest, MessageResponse, Question,
    QuestionId, QuestionPage, QuestionPool, TranslateQuestionRequest, TranslatedQuestion,
    TranslationValidation, UpdateQuestionsCategoryRequest, ValidateTranslationRequest,
};
use crate::api::{ApiResult, QuizClient, RequestSpec};
use crate::domain::generation::{GenerationSettings, ParseForm};
use crate::domain::locales::QuestionLocaleEditor;
use crate::domain::review::{Pagination, QuestionFilters};
use crate::domain::validation::{ValidationError, require_text};

#[derive(Clone)]
pub struct QuestionService {
    client: QuizClient,
}

impl QuestionService {
    pub fn new(client: QuizClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &QuizClient {
        &self.client
    }

    /// One page of a pool. Filters only apply to the history pool.
    pub async fn list(
        &self,
        pool: QuestionPool,
        pagination: &Pagination,
        filters: &QuestionFilters,
    ) -> ApiResult<QuestionPage> {
        let mut query = pagination.to_query_params();
        match pool {
            QuestionPool::History => query.extend(filters.to_query_params()),
            QuestionPool::Generated if !filters.is_empty() => {
                log::debug!("Ignoring filters for the generated pool");
            }
            QuestionPool::Generated => {}
        }
        self.client
            .send(RequestSpec::get(endpoints::collection(pool)).query(query))
            .await
    }

    pub async fn get(&self, pool: QuestionPool, id: &str) -> ApiResult<Question> {
        self.client.send(RequestSpec::get(endpoints::record(pool, id))).await
    }

    pub async fn update(&self, pool: QuestionPool, question: &Question) -> ApiResult<Question> {
        log::info!("Saving {} question {}", pool, question.id);
        self.client
            .send(RequestSpec::put(endpoints::record(pool, &question.id)).json(question)?)
            .await
    }

    /// Approve the given ids: one id uses the per-record endpoint, more use the bulk one
    pub async fn confirm(&self, pool: QuestionPool, ids: &[QuestionId]) -> ApiResult<String> {
        let spec = match ids {
            [] => return Err(ValidationError::Empty("question ids").into()),
            [id] => RequestSpec::post(endpoints::confirm_one(pool, id)),
            many => RequestSpec::post(endpoints::confirm_many(pool)).json(&IdsRequest { ids: many.to_vec() })?,
        };
        log::info!("Confirming {} {} question(s)", ids.len(), pool);
        let response: MessageResponse = self.client.send_raw(spec).await?;
        Ok(response.message)
    }

    /// Reject the given ids, single or bulk as for [`confirm`](Self::confirm)
    pub async fn reject(&self, pool: QuestionPool, ids: &[QuestionId]) -> ApiResult<String> {
        match ids {
            [] => Err(ValidationError::Empty("question ids").into()),
            [id] => self.reject_one(pool, id).await,
            many => self.reject_many(pool, many).await,
        }
    }

    pub async fn reject_one(&self, pool: QuestionPool, id: &str) -> ApiResult<String> {
        log::info!("Rejecting {} question {}", pool, id);
        let response: MessageResponse = self
            .client
            .send_raw(RequestSpec::delete(endpoints::reject_one(pool, id)))
            .await?;
        Ok(response.message)
    }

    pub async fn reject_many(&self, pool: QuestionPool, ids: &[QuestionId]) -> ApiResult<String> {
        if ids.is_empty() {
            return Err(ValidationError::Empty("question ids").into());
        }
        log::info!("Rejecting {} {} questions in one batch", ids.len(), pool);
        let spec = RequestSpec::delete(endpoints::reject_many(pool)).json(&IdsRequest { ids: ids.to_vec() })?;
        let response: MessageResponse = self.client.send_raw(spec).await?;
        Ok(response.message)
    }

    /// Reassign questions to `category_id` in a single request; returns how many were sent
    pub async fn move_questions(
        &self,
        pool: QuestionPool,
        ids: &[QuestionId],
        category_id: CategoryId,
    ) -> ApiResult<usize> {
        if ids.is_empty() {
            return Err(ValidationError::Empty("question ids").into());
        }
        let body = UpdateQuestionsCategoryRequest {
            question_ids: ids.to_vec(),
            category_id,
        };
        log::info!("Moving {} {} questions to category {}", ids.len(), pool, category_id);
        let _: MessageResponse = self
            .client
            .send_raw(RequestSpec::patch(endpoints::update_category(pool)).json(&body)?)
            .await?;
        Ok(ids.len())
    }

    pub async fn translate(&self, pool: QuestionPool, id: &str, language: &str) -> ApiResult<TranslatedQuestion> {
        let body = TranslateQuestionRequest {
            language: require_text(language, "language")?,
        };
        log::info!("Translating {} question {} into {}", pool, id, body.language);
        self.client
            .send(RequestSpec::post(endpoints::translate(pool, id)).json(&body)?)
            .await
    }

    /// Translate into `language` and append the result as an unvalidated locale.
    /// A language the question already has is rejected before any request.
    pub async fn translate_into(
        &self,
        pool: QuestionPool,
        id: &str,
        editor: &mut QuestionLocaleEditor,
        language: &str,
    ) -> ApiResult<()> {
        if editor.contains(language) {
            return Err(ValidationError::DuplicateLanguage(language.to_string()).into());
        }
        let translated = self.translate(pool, id, language).await?;
        editor.append_translated(language, translated)?;
        Ok(())
    }

    pub async fn validate_translation(
        &self,
        id: &str,
        original_language: &str,
        target_language: &str,
    ) -> ApiResult<TranslationValidation> {
        let body = ValidateTranslationRequest {
            question_id: require_text(id, "question id")?,
            original_language: require_text(original_language, "original language")?,
            target_language: require_text(target_language, "target language")?,
        };
        self.client
            .send(RequestSpec::post(endpoints::VALIDATE_TRANSLATION).json(&body)?)
            .await
    }

    pub async fn generate(&self, settings: &GenerationSettings) -> ApiResult<GenerationOutcome> {
        let body = settings.to_request()?;
        log::info!(
            "Generating {} {} question(s) in '{}' with {}",
            body.count,
            body.question_type,
            body.category,
            body.model
        );
        self.client
            .send(RequestSpec::post(endpoints::GENERATE).json(&body)?)
            .await
    }

    pub async fn parse(&self, form: &ParseForm) -> ApiResult<GenerationOutcome> {
        let body = form.to_request()?;
        log::info!(
            "Parsing {} characters of boilerplate into category {}",
            body.boilerplate_text.len(),
            body.category_id
        );
        self.client
            .send(RequestSpec::post(endpoints::PARSE).json(&body)?)
            .await
    }

    pub async fn check_duplicates(&self, category_id: CategoryId) -> ApiResult<DuplicateCheckResult> {
        log::info!("Checking duplicates in category {}", category_id);
        self.client
            .send(RequestSpec::post(endpoints::check_duplicates(category_id)))
            .await
    }
}
