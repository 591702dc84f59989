use anyhow::Result;
use clap::Parser;
use log::info;

use quiz_admin::cli::Cli;
use quiz_admin::cli::app::Commands;
use quiz_admin::cli::commands::{AuthSubcommands, SettingsSubcommands};
use quiz_admin::commands::{self, AppContext};
use quiz_admin::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Log to file, truncated on each run
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("quiz-admin.log")?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    let cli = Cli::parse();
    if cli.no_color {
        colored::control::set_override(false);
    }
    info!("Starting quiz-admin");

    let mut config = Config::load()?;

    match cli.command {
        Commands::Settings(args) => match args.command {
            SettingsSubcommands::Show => commands::settings::show_command(&config).await,
            SettingsSubcommands::Get { name } => commands::settings::get_command(&config, name).await,
            SettingsSubcommands::Set { name, value } => {
                commands::settings::set_command(&mut config, name, value).await
            }
            SettingsSubcommands::Reset { name } => commands::settings::reset_command(&mut config, name).await,
            SettingsSubcommands::ResetAll { force } => {
                commands::settings::reset_all_command(&mut config, force).await
            }
        },
        Commands::Auth(args) => {
            let ctx = AppContext::new(config)?;
            match args.command {
                AuthSubcommands::Login { username, password } => {
                    commands::auth::login_command(&ctx, username, password).await
                }
                AuthSubcommands::Logout => commands::auth::logout_command(&ctx).await,
                AuthSubcommands::Status { check } => commands::auth::status_command(&ctx, check).await,
            }
        }
        Commands::Categories(args) => {
            let ctx = logged_in(config)?;
            commands::categories::categories_command(&ctx, args.command).await
        }
        Commands::Questions(args) => {
            let ctx = logged_in(config)?;
            commands::questions::questions_command(&ctx, args.command).await
        }
        Commands::Duplicates(args) => {
            let ctx = logged_in(config)?;
            commands::duplicates::duplicates_command(&ctx, args.command).await
        }
        Commands::Stats(args) => {
            let ctx = logged_in(config)?;
            commands::stats::stats_command(&ctx, args.command).await
        }
    }
}

/// Context for commands that talk to protected endpoints
fn logged_in(config: Config) -> Result<AppContext> {
    let ctx = AppContext::new(config)?;
    ctx.require_login()?;
    Ok(ctx)
}
