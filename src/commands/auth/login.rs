use crate::commands::AppContext;
use crate::ui::{output, prompts, with_spinner};
use anyhow::{Context, Result};
use log::info;

pub async fn login_command(ctx: &AppContext, username: Option<String>, password: Option<String>) -> Result<()> {
    info!("Executing auth login command");

    if (username.is_none() || password.is_none()) && !prompts::is_interactive() {
        anyhow::bail!("--username and --password are required when not running in a terminal");
    }
    let (username, password) = prompts::prompt_credentials(username, password)?;

    let auth = ctx.auth();
    with_spinner(format!("Logging in to {}...", ctx.base_url()), auth.login(&username, &password))
        .await
        .context("Login failed")?;

    output::success(&format!("Logged in as {}", username));
    Ok(())
}
