pub mod auth;
pub mod categories;
pub mod duplicates;
pub mod questions;
pub mod settings;
pub mod stats;

pub use auth::{AuthCommands, AuthSubcommands};
pub use categories::{CategoriesCommands, CategoriesSubcommands};
pub use duplicates::{DuplicatesCommands, DuplicatesSubcommands};
pub use questions::{HistoryFilterArgs, QuestionsCommands, QuestionsSubcommands};
pub use settings::{SettingsCommands, SettingsSubcommands};
pub use stats::{StatsCommands, StatsSubcommands};
