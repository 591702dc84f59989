use crate::api::constants::stats as endpoints;
use crate::api::models::DeeplLogPage;
use crate::api::{ApiResult, QuizClient, RequestSpec};
use crate::domain::review::Pagination;

/// Translation usage statistics
#[derive(Clone)]
pub struct StatsService {
    client: QuizClient,
}

impl StatsService {
    pub fn new(client: QuizClient) -> Self {
        Self { client }
    }

    pub async fn deepl_logs(&self, pagination: &Pagination) -> ApiResult<DeeplLogPage> {
        self.client
            .send(RequestSpec::get(endpoints::DEEPL_LOGS).query(pagination.to_query_params()))
            .await
    }
}
