//! Duplicate consolidation: drives a [`DuplicateReview`] and performs the
//! rejections each transition asks for.
//!
//! Rejections are optimistic. The review advances whether or not every
//! reject succeeded; failures are only reported back through
//! [`RejectionReport`].

use super::questions::QuestionService;
use crate::api::models::{CategoryId, DuplicateCheckResult, QuestionId, QuestionPool};
use crate::api::{ApiLogger, ApiResult, MonitoringConfig};
use crate::domain::duplicates::DuplicateReview;
use async_trait::async_trait;
use futures::future::join_all;
use std::time::Instant;

/// Backend operations the consolidation flow needs
#[async_trait]
pub trait DuplicateBackend: Send + Sync {
    async fn check_duplicates(&self, category_id: CategoryId) -> ApiResult<DuplicateCheckResult>;
    async fn reject_one(&self, id: &str) -> ApiResult<()>;
    async fn reject_many(&self, ids: &[QuestionId]) -> ApiResult<()>;
}

#[async_trait]
impl DuplicateBackend for QuestionService {
    async fn check_duplicates(&self, category_id: CategoryId) -> ApiResult<DuplicateCheckResult> {
        QuestionService::check_duplicates(self, category_id).await
    }

    async fn reject_one(&self, id: &str) -> ApiResult<()> {
        QuestionService::reject_one(self, QuestionPool::Generated, id).await.map(|_| ())
    }

    async fn reject_many(&self, ids: &[QuestionId]) -> ApiResult<()> {
        QuestionService::reject_many(self, QuestionPool::Generated, ids).await.map(|_| ())
    }
}

/// What happened to the rejects issued by one keep action
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RejectionReport {
    pub requested: Vec<QuestionId>,
    /// Failed ids with the error text
    pub failed: Vec<(QuestionId, String)>,
}

impl RejectionReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn succeeded(&self) -> usize {
        self.requested.len() - self.failed.len()
    }

    pub fn failed_ids(&self) -> Vec<&str> {
        self.failed.iter().map(|(id, _)| id.as_str()).collect()
    }

    /// One-line warning, or `None` when every reject went through
    pub fn warning(&self) -> Option<String> {
        if self.is_clean() {
            return None;
        }
        Some(format!(
            "Failed to reject {} of {} question(s): {}",
            self.failed.len(),
            self.requested.len(),
            self.failed_ids().join(", ")
        ))
    }
}

pub struct DuplicateConsolidator<B: DuplicateBackend> {
    backend: B,
    review: DuplicateReview,
    api_logger: ApiLogger,
}

impl<B: DuplicateBackend> DuplicateConsolidator<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            review: DuplicateReview::default(),
            api_logger: ApiLogger::new(MonitoringConfig::default()),
        }
    }

    pub fn with_logger(mut self, api_logger: ApiLogger) -> Self {
        self.api_logger = api_logger;
        self
    }

    pub fn review(&self) -> &DuplicateReview {
        &self.review
    }

    /// Fetch fresh groups for `category_id`, discarding any previous review
    pub async fn check(&mut self, category_id: CategoryId) -> ApiResult<&DuplicateReview> {
        let result = self.backend.check_duplicates(category_id).await?;
        log::info!(
            "Category {}: {} duplicate group(s) among {} question(s)",
            category_id,
            result.duplicates.len(),
            result.questions.len()
        );
        self.review = DuplicateReview::from_result(result);
        Ok(&self.review)
    }

    /// Keep `selected_id` and reject the rest of its group, one request per id, concurrently
    pub async fn keep(&mut self, selected_id: &str, group_ids: &[QuestionId]) -> RejectionReport {
        let decision = self.review.keep(selected_id, group_ids);
        self.review = decision.next;

        let started = Instant::now();
        let backend = &self.backend;
        let results = join_all(decision.to_reject.iter().map(|id| async move {
            (id.clone(), backend.reject_one(id).await)
        }))
        .await;

        let failed: Vec<(QuestionId, String)> = results
            .into_iter()
            .filter_map(|(id, result)| result.err().map(|e| (id, e.to_string())))
            .collect();

        self.api_logger
            .log_fan_out("reject_one", decision.to_reject.len(), failed.len(), started.elapsed());

        let report = RejectionReport {
            requested: decision.to_reject,
            failed,
        };
        if let Some(warning) = report.warning() {
            log::warn!("{}", warning);
        }
        report
    }

    /// Keep the first question of every remaining group and reject the others in one batch
    pub async fn keep_first_from_all(&mut self) -> RejectionReport {
        let decision = self.review.keep_first_from_all();
        self.review = decision.next;

        let mut report = RejectionReport {
            requested: decision.to_reject,
            failed: Vec::new(),
        };
        if report.requested.is_empty() {
            return report;
        }

        if let Err(e) = self.backend.reject_many(&report.requested).await {
            log::error!("Batch reject of {} questions failed: {}", report.requested.len(), e);
            let message = e.to_string();
            report.failed = report
                .requested
                .iter()
                .map(|id| (id.clone(), message.clone()))
                .collect();
        }
        report
    }
}
