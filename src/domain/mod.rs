//! Client-side state and transformations with no I/O
//!
//! Everything here is synchronous and deterministic; the services layer
//! feeds it backend payloads and performs the side effects it asks for.

pub mod duplicates;
pub mod generation;
pub mod locales;
pub mod review;
pub mod tree;
pub mod validation;

pub use duplicates::{DuplicateReview, KeepDecision};
pub use generation::{GenerationSettings, ParseForm};
pub use locales::{LocaleEditor, QuestionLocaleEditor, parse_locale_arg};
pub use review::{Pagination, QuestionFilters, Selection};
pub use tree::{CategoryNode, CategoryTree, NodeAction, TreeBuilder, build_tree};
pub use validation::ValidationError;
