//! Client for the quiz backend's REST surface
//!
//! Bearer-token HTTP client with one-shot refresh-and-replay on 401, the
//! wire models, endpoint table, and structured request logging.

pub mod auth;
pub mod client;
pub mod constants;
pub mod error;
pub mod logging;
pub mod models;

pub use auth::{AuthManager, MemoryTokenStore, TokenStore};
pub use client::{QuizClient, RequestSpec};
pub use error::{ApiError, ApiResult};
pub use logging::{ApiLogger, LogLevel, MonitoringConfig, RequestContext};
pub use models::{
    Category, CategoryId, CategoryLocale, DeeplLogStat, DuplicateCheckResult, Question,
    QuestionId, QuestionLocale, QuestionPool, QuestionStatus, QuestionType, TokenPair,
};
