use crate::api::models::CategoryId;
use clap::{Args, Subcommand};

#[derive(Args)]
pub struct CategoriesCommands {
    #[command(subcommand)]
    pub command: CategoriesSubcommands,
}

#[derive(Subcommand)]
pub enum CategoriesSubcommands {
    /// Print the category tree
    Tree {
        /// Display language (defaults to the configured one)
        #[arg(short, long)]
        language: Option<String>,
        /// Only show categories whose name contains this text
        #[arg(short, long)]
        search: Option<String>,
        /// Show question counts per category
        #[arg(long)]
        counts: bool,
    },
    /// Show one category with its locales
    Show {
        id: CategoryId,
    },
    /// Create a category
    Create {
        #[arg(short, long)]
        name: String,
        /// Parent category id
        #[arg(short, long)]
        parent: Option<CategoryId>,
        /// Locale entry as LANG=VALUE, repeatable
        #[arg(short, long = "locale", value_name = "LANG=VALUE")]
        locales: Vec<String>,
        /// Fill missing languages by machine translation before saving
        #[arg(long)]
        translate: bool,
    },
    /// Edit a category
    Edit {
        id: CategoryId,
        #[arg(short, long)]
        name: Option<String>,
        /// New parent category id
        #[arg(short, long)]
        parent: Option<CategoryId>,
        /// Locale entry as LANG=VALUE, repeatable; replaces the value for that language
        #[arg(short, long = "locale", value_name = "LANG=VALUE")]
        locales: Vec<String>,
        /// Remove the locale for this language, repeatable
        #[arg(long = "remove-locale", value_name = "LANG")]
        remove_locales: Vec<String>,
        /// Fill missing languages by machine translation before saving
        #[arg(long)]
        translate: bool,
    },
    /// Delete a category
    Delete {
        id: CategoryId,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Translate a category's name into every missing language and save
    Translate {
        id: CategoryId,
    },
    /// Clear the backend cache for a category
    ClearCache {
        id: CategoryId,
    },
    /// Ask the backend to re-sync categories
    Sync,
}
