//! Category listing, CRUD, translation and cache maintenance

use crate::api::constants::categories as endpoints;
use crate::api::models::{
    Category, CategoryId, CategoryList, CategoryLocale, CategoryPage, CreateCategoryRequest,
    MessageResponse, TranslateCategoryRequest, UpdateCategoryRequest,
};
use crate::api::{ApiResult, QuizClient, RequestSpec};
use crate::domain::locales::{LocaleEditor, translated_locales};
use crate::domain::review::Pagination;
use crate::domain::tree::{CategoryTree, TreeBuilder};
use crate::domain::validation::{ValidationError, require_text};
use serde_json::Value;
use std::collections::HashSet;

/// Page size used when walking the whole category listing
const FETCH_ALL_LIMIT: u32 = 100;

#[derive(Clone)]
pub struct CategoryService {
    client: QuizClient,
}

impl CategoryService {
    pub fn new(client: QuizClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, pagination: &Pagination, title: Option<&str>) -> ApiResult<CategoryPage> {
        let mut query = pagination.to_query_params();
        if let Some(title) = title.map(str::trim).filter(|t| !t.is_empty()) {
            query.push(("title".to_string(), title.to_string()));
        }
        self.client
            .send(RequestSpec::get(endpoints::COLLECTION).query(query))
            .await
    }

    /// Every category across all pages, in server order
    pub async fn list_all(&self) -> ApiResult<Vec<Category>> {
        let mut pagination = Pagination::new(1, FETCH_ALL_LIMIT);
        let mut categories = Vec::new();

        loop {
            let page = self.list(&pagination, None).await?;
            log::debug!(
                "Fetched category page {}/{} ({} items)",
                pagination.page(),
                page.total_pages,
                page.categories.len()
            );
            let empty = page.categories.is_empty();
            categories.extend(page.categories);
            pagination.set_total_pages(page.total_pages);
            if empty || !pagination.next() {
                break;
            }
        }

        Ok(categories)
    }

    pub async fn with_questions_count(&self) -> ApiResult<Vec<Category>> {
        let list: CategoryList = self
            .client
            .send(RequestSpec::get(endpoints::WITH_QUESTIONS_COUNT))
            .await?;
        Ok(list.categories)
    }

    /// Management tree over the full listing
    pub async fn tree(&self, language: &str, search: Option<&str>) -> ApiResult<CategoryTree> {
        let categories = self.list_all().await?;
        let mut builder = TreeBuilder::new(language);
        if let Some(search) = search {
            builder = builder.search(search);
        }
        Ok(builder.build(&categories))
    }

    /// Duplicate-check picker: read-only tree with question counts
    pub async fn tree_with_counts(&self, language: &str, search: Option<&str>) -> ApiResult<CategoryTree> {
        let categories = self.with_questions_count().await?;
        let mut builder = TreeBuilder::new(language).without_actions();
        if let Some(search) = search {
            builder = builder.search(search);
        }
        Ok(builder.build(&categories))
    }

    pub async fn get(&self, id: CategoryId) -> ApiResult<Category> {
        self.client.send(RequestSpec::get(endpoints::record(id))).await
    }

    pub async fn create(
        &self,
        name: &str,
        parent_id: Option<CategoryId>,
        locales: Vec<CategoryLocale>,
    ) -> ApiResult<Category> {
        let body = CreateCategoryRequest {
            name: require_text(name, "name")?,
            parent_id,
            locales: check_unique(locales)?,
        };
        log::info!("Creating category '{}' under {:?}", body.name, parent_id);
        self.client
            .send(RequestSpec::post(endpoints::COLLECTION).json(&body)?)
            .await
    }

    pub async fn update(&self, id: CategoryId, mut changes: UpdateCategoryRequest) -> ApiResult<Category> {
        if changes.is_empty() {
            return Err(ValidationError::Invalid("nothing to update".to_string()).into());
        }
        if let Some(name) = &changes.name {
            changes.name = Some(require_text(name, "name")?);
        }
        if let Some(locales) = changes.locales.take() {
            changes.locales = Some(check_unique(locales)?);
        }
        log::info!("Updating category {}", id);
        self.client
            .send(RequestSpec::put(endpoints::record(id)).json(&changes)?)
            .await
    }

    pub async fn delete(&self, id: CategoryId) -> ApiResult<String> {
        log::info!("Deleting category {}", id);
        let response: MessageResponse = self
            .client
            .send_raw(RequestSpec::delete(endpoints::record(id)))
            .await?;
        Ok(response.message)
    }

    pub async fn translate(&self, request: &TranslateCategoryRequest) -> ApiResult<Vec<CategoryLocale>> {
        log::info!(
            "Translating '{}' from {} into {:?}",
            request.original_text,
            request.source_language,
            request.required_locales
        );
        let payload: Value = self
            .client
            .send(RequestSpec::post(endpoints::TRANSLATE).json(request)?)
            .await?;
        Ok(translated_locales(payload))
    }

    /// Translate `original_text` into every missing language of `editor` and
    /// splice the results in without touching existing entries
    pub async fn translate_into(&self, editor: &mut LocaleEditor, original_text: &str) -> ApiResult<usize> {
        let request = editor.translate_request(original_text)?;
        let translated = self.translate(&request).await?;
        Ok(editor.merge_translations(translated))
    }

    pub async fn clear_cache(&self, id: CategoryId) -> ApiResult<String> {
        let response: MessageResponse = self
            .client
            .send_raw(RequestSpec::delete(endpoints::clear_cache(id)))
            .await?;
        Ok(response.message)
    }

    pub async fn sync(&self) -> ApiResult<String> {
        let response: MessageResponse = self.client.send_raw(RequestSpec::post(endpoints::SYNC)).await?;
        Ok(response.message)
    }
}

fn check_unique(locales: Vec<CategoryLocale>) -> Result<Vec<CategoryLocale>, ValidationError> {
    let mut seen = HashSet::new();
    for locale in &locales {
        if !seen.insert(locale.language.as_str()) {
            return Err(ValidationError::DuplicateLanguage(locale.language.clone()));
        }
    }
    Ok(locales)
}
