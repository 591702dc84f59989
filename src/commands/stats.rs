use crate::cli::commands::StatsSubcommands;
use crate::commands::AppContext;
use crate::domain::Pagination;
use crate::ui::{output, with_spinner};
use anyhow::Result;
use colored::*;

pub async fn stats_command(ctx: &AppContext, command: StatsSubcommands) -> Result<()> {
    match command {
        StatsSubcommands::Deepl { page, limit } => deepl_command(ctx, page, limit).await,
    }
}

async fn deepl_command(ctx: &AppContext, page: u32, limit: Option<u32>) -> Result<()> {
    let mut pagination = Pagination::new(page, ctx.page_limit(limit));
    let result = with_spinner("Loading DeepL logs...", ctx.stats().deepl_logs(&pagination)).await?;
    pagination.set_total_pages(result.total_pages);

    output::header("DeepL usage");
    output::field("Total requests", &result.total_requests.to_string());
    output::field("Total characters", &result.total_characters.to_string());
    println!();

    if result.logs.is_empty() {
        println!("  {}", "No logs on this page.".dimmed());
        return Ok(());
    }
    for log in &result.logs {
        output::print_deepl_log(log);
    }
    println!();
    println!(
        "  {}",
        format!("Page {} of {}", pagination.page(), pagination.total_pages()).dimmed()
    );
    Ok(())
}
