use crate::api::models::{CategoryId, QuestionPool, QuestionStatus, QuestionType};
use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Args)]
pub struct QuestionsCommands {
    #[command(subcommand)]
    pub command: QuestionsSubcommands,
}

#[derive(Args, Debug, Clone, Default)]
pub struct HistoryFilterArgs {
    /// Text contained in the question
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub difficulty: Option<u8>,
    #[arg(long, value_enum)]
    pub status: Option<QuestionStatus>,
    /// Only questions that have this locale
    #[arg(long)]
    pub locale_included: Option<String>,
    /// Only questions missing this locale
    #[arg(long)]
    pub locale_excluded: Option<String>,
    /// Category id or name
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long = "type", value_enum)]
    pub question_type: Option<QuestionType>,
}

#[derive(Subcommand)]
pub enum QuestionsSubcommands {
    /// List one page of a pool
    List {
        #[arg(value_enum)]
        pool: QuestionPool,
        #[arg(short, long, default_value_t = 1)]
        page: u32,
        /// Page size (defaults to the configured one)
        #[arg(short, long)]
        limit: Option<u32>,
        /// Filters, applied to the history pool only
        #[command(flatten)]
        filters: HistoryFilterArgs,
    },
    /// Show one question with all locales
    Show {
        #[arg(value_enum)]
        pool: QuestionPool,
        id: String,
    },
    /// Approve questions
    Confirm {
        #[arg(value_enum)]
        pool: QuestionPool,
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Reject questions
    Reject {
        #[arg(value_enum)]
        pool: QuestionPool,
        #[arg(required = true)]
        ids: Vec<String>,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Move questions to another category
    Move {
        #[arg(value_enum)]
        pool: QuestionPool,
        /// Target category id
        #[arg(long)]
        to: CategoryId,
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Machine-translate a question into one more language and save it
    Translate {
        #[arg(value_enum)]
        pool: QuestionPool,
        id: String,
        #[arg(short, long)]
        language: String,
        /// Print the translation without saving it
        #[arg(long)]
        dry_run: bool,
    },
    /// Check a translation of a history question
    Validate {
        id: String,
        /// Language of the translation to check
        #[arg(short, long)]
        language: String,
        /// Language it was translated from
        #[arg(long, default_value = "en")]
        from: String,
    },
    /// Generate questions with an AI model
    Generate {
        #[arg(long)]
        prompt: String,
        /// Category name passed to the model
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        difficulty: Option<u8>,
        #[arg(long)]
        count: Option<u32>,
        #[arg(long)]
        max_tokens: Option<u32>,
        #[arg(long)]
        temperature: Option<f32>,
        #[arg(long = "type", value_enum)]
        question_type: Option<QuestionType>,
        #[arg(long)]
        model: Option<String>,
        /// Required language, repeatable (default: en)
        #[arg(long = "language", value_name = "LANG")]
        languages: Vec<String>,
    },
    /// Parse questions out of boilerplate text
    Parse {
        /// Target category id
        #[arg(long)]
        category: CategoryId,
        /// Read the text from a file
        #[arg(long, conflicts_with = "text")]
        file: Option<PathBuf>,
        /// Inline text
        #[arg(long)]
        text: Option<String>,
        #[arg(long, default_value = "en")]
        language: String,
        #[arg(long = "type", value_enum, default_value_t = QuestionType::Choice)]
        question_type: QuestionType,
    },
}
