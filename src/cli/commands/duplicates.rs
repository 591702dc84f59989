use crate::api::models::CategoryId;
use clap::{Args, Subcommand};

#[derive(Args)]
pub struct DuplicatesCommands {
    #[command(subcommand)]
    pub command: DuplicatesSubcommands,
}

#[derive(Subcommand)]
pub enum DuplicatesSubcommands {
    /// Find duplicate generated questions in a category and resolve them
    Check {
        category_id: CategoryId,
        /// Keep the first question of every group without prompting
        #[arg(long)]
        keep_first: bool,
        /// Only print the groups
        #[arg(long)]
        dry_run: bool,
    },
    /// Pick a category from the tree with question counts
    Categories {
        #[arg(short, long)]
        search: Option<String>,
        #[arg(short, long)]
        language: Option<String>,
    },
}
