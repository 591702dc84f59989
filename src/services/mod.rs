//! Backend-facing services over an injected [`QuizClient`](crate::api::QuizClient)

pub mod categories;
pub mod duplicates;
pub mod questions;
pub mod stats;

pub use categories::CategoryService;
pub use duplicates::{DuplicateBackend, DuplicateConsolidator, RejectionReport};
pub use questions::QuestionService;
pub use stats::StatsService;
