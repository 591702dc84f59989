use super::commands::{
    AuthCommands, CategoriesCommands, DuplicatesCommands, QuestionsCommands, SettingsCommands,
    StatsCommands,
};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "quiz-admin")]
#[command(about = "Administration tool for the multilingual quiz-question backend")]
#[command(version)]
pub struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Authentication management
    Auth(AuthCommands),
    /// Category tree and category management
    Categories(CategoriesCommands),
    /// Generated and history question review
    Questions(QuestionsCommands),
    /// Duplicate-question consolidation
    Duplicates(DuplicatesCommands),
    /// Translation usage statistics
    Stats(StatsCommands),
    /// Application settings management
    Settings(SettingsCommands),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::{CategoriesSubcommands, QuestionsSubcommands};
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_move() {
        let cli = Cli::parse_from(["quiz-admin", "questions", "move", "history", "--to", "7", "a", "b"]);
        let Commands::Questions(args) = cli.command else {
            panic!("expected questions command");
        };
        let QuestionsSubcommands::Move { to, ids, .. } = args.command else {
            panic!("expected move");
        };
        assert_eq!(to, 7);
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_parse_repeated_locales() {
        let cli = Cli::parse_from([
            "quiz-admin", "categories", "create", "--name", "Art", "-l", "en=Art", "-l", "uk=Мистецтво",
        ]);
        let Commands::Categories(args) = cli.command else {
            panic!("expected categories command");
        };
        let CategoriesSubcommands::Create { locales, parent, .. } = args.command else {
            panic!("expected create");
        };
        assert_eq!(locales, vec!["en=Art", "uk=Мистецтво"]);
        assert_eq!(parent, None);
    }
}
