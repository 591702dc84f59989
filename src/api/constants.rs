//! API constants and endpoint builders for the quiz backend

/// Base URL used when neither the config file nor the environment names one
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// User agent sent with every request
pub const USER_AGENT: &str = "quiz-admin/0.1";

/// Standard headers for backend requests
pub mod headers {
    /// Content type for JSON requests
    pub const CONTENT_TYPE_JSON: &str = "application/json";

    /// Correlation header attached to every request for log tracing
    pub const X_CORRELATION_ID: &str = "X-Correlation-Id";
}

pub mod auth {
    pub const LOGIN: &str = "/auth/login";
    pub const REFRESH: &str = "/auth/refresh";
    pub const LOGOUT: &str = "/auth/logout";
}

pub mod categories {
    use crate::api::models::CategoryId;

    pub const COLLECTION: &str = "/categories";
    pub const WITH_QUESTIONS_COUNT: &str = "/categories/with-questions-count";
    pub const TRANSLATE: &str = "/categories/translate";
    pub const SYNC: &str = "/categories/sync";

    pub fn record(id: CategoryId) -> String {
        format!("{}/{}", COLLECTION, id)
    }

    pub fn clear_cache(id: CategoryId) -> String {
        format!("{}/{}/clear-cache", COLLECTION, id)
    }
}

pub mod questions {
    use crate::api::models::{CategoryId, QuestionPool};

    pub const GENERATE: &str = "/questions/generate";
    pub const PARSE: &str = "/questions/parse";
    pub const VALIDATE_TRANSLATION: &str = "/questions/history/validate-translation";

    pub fn collection(pool: QuestionPool) -> String {
        format!("/questions/{}", pool.as_path())
    }

    pub fn record(pool: QuestionPool, id: &str) -> String {
        format!("/questions/{}/{}", pool.as_path(), urlencoding::encode(id))
    }

    pub fn confirm_one(pool: QuestionPool, id: &str) -> String {
        format!("/questions/{}/confirm/{}", pool.as_path(), urlencoding::encode(id))
    }

    pub fn confirm_many(pool: QuestionPool) -> String {
        format!("/questions/{}/confirm", pool.as_path())
    }

    pub fn reject_one(pool: QuestionPool, id: &str) -> String {
        format!("/questions/{}/reject/{}", pool.as_path(), urlencoding::encode(id))
    }

    pub fn reject_many(pool: QuestionPool) -> String {
        format!("/questions/{}/reject", pool.as_path())
    }

    pub fn translate(pool: QuestionPool, id: &str) -> String {
        format!("/questions/{}/translate/{}", pool.as_path(), urlencoding::encode(id))
    }

    pub fn update_category(pool: QuestionPool) -> String {
        format!("/questions/{}/update-category", pool.as_path())
    }

    pub fn check_duplicates(category_id: CategoryId) -> String {
        format!("/questions/generated/check-duplicates/{}", category_id)
    }
}

pub mod stats {
    pub const DEEPL_LOGS: &str = "/stats/deepl/logs";
}

/// Join a base URL and an endpoint path without doubling the slash
pub fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}
