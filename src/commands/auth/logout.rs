use crate::commands::AppContext;
use crate::ui::output;
use anyhow::Result;
use log::info;

pub async fn logout_command(ctx: &AppContext) -> Result<()> {
    info!("Executing auth logout command");

    let auth = ctx.auth();
    if !auth.is_logged_in() {
        println!("Not logged in.");
        return Ok(());
    }

    // tokens are cleared locally even when the backend call fails
    match auth.logout().await {
        Ok(()) => output::success("Logged out"),
        Err(e) => output::warning(&format!("Backend logout failed ({}); local tokens were cleared", e)),
    }
    Ok(())
}
