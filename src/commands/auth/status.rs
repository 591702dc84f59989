use crate::commands::AppContext;
use crate::ui::{output, with_spinner};
use anyhow::Result;
use colored::*;
use log::info;

pub async fn status_command(ctx: &AppContext, check: bool) -> Result<()> {
    info!("Executing auth status command");

    output::header("quiz-admin authentication status");
    output::field("Backend", &ctx.base_url().cyan().to_string());
    output::field("Config file", &ctx.config.path()?.display().to_string());

    let auth = ctx.auth();
    if !auth.is_logged_in() {
        println!();
        println!("  {}", "⚠️  Not logged in".bright_yellow().bold());
        println!("  {}", "Run 'quiz-admin auth login' to sign in.".dimmed());
        return Ok(());
    }

    println!();
    println!("  {}", "● Tokens stored".bright_green());

    if check {
        println!();
        match with_spinner("Refreshing tokens...", auth.refresh()).await {
            Ok(_) => output::success("Refresh token accepted"),
            Err(e) => output::failure(&format!("Refresh failed, tokens cleared: {}", e)),
        }
    }
    Ok(())
}
