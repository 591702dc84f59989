use crate::api::models::{CategoryId, QuestionId};
use crate::cli::commands::DuplicatesSubcommands;
use crate::commands::AppContext;
use crate::domain::DuplicateReview;
use crate::services::{DuplicateConsolidator, QuestionService, RejectionReport};
use crate::ui::prompts::{is_interactive, prompt_keeper};
use crate::ui::{output, with_spinner};
use anyhow::{Result, bail};
use colored::*;
use log::info;

pub async fn duplicates_command(ctx: &AppContext, command: DuplicatesSubcommands) -> Result<()> {
    match command {
        DuplicatesSubcommands::Check {
            category_id,
            keep_first,
            dry_run,
        } => check_command(ctx, category_id, keep_first, dry_run).await,
        DuplicatesSubcommands::Categories { search, language } => {
            let language = ctx.language(language);
            let tree = with_spinner(
                "Loading categories...",
                ctx.categories().tree_with_counts(&language, search.as_deref()),
            )
            .await?;
            output::header("Categories with question counts");
            output::print_tree(&tree);
            println!();
            println!(
                "  {}",
                "Run `quiz-admin duplicates check <id>` on a category to review its duplicates.".dimmed()
            );
            Ok(())
        }
    }
}

async fn check_command(ctx: &AppContext, category_id: CategoryId, keep_first: bool, dry_run: bool) -> Result<()> {
    let mut consolidator =
        DuplicateConsolidator::new(ctx.questions()).with_logger(ctx.client().api_logger().clone());

    let review = with_spinner("Checking for duplicates...", consolidator.check(category_id)).await?;
    output::header(&format!("Duplicates in category {}", category_id));
    if review.is_resolved() {
        output::success("No duplicates found");
        print_unique_summary(review);
        return Ok(());
    }

    let language = ctx.language(None);
    for (index, group) in review.groups().iter().enumerate() {
        print_group(review, index, group, &language);
    }

    if dry_run {
        println!();
        println!("  {}", "Dry run: nothing rejected.".dimmed());
        return Ok(());
    }

    if keep_first {
        info!("Keeping the first question of every group in category {}", category_id);
        let report = with_spinner("Rejecting duplicates...", consolidator.keep_first_from_all()).await;
        print_report(&report);
    } else {
        if !is_interactive() {
            bail!("Choosing keepers needs an interactive terminal; use --keep-first or --dry-run");
        }
        resolve_interactively(&mut consolidator, &language).await?;
    }

    print_unique_summary(consolidator.review());
    Ok(())
}

/// Prompt for a keeper per group. Groups emptied by an earlier keep are skipped.
async fn resolve_interactively(
    consolidator: &mut DuplicateConsolidator<QuestionService>,
    language: &str,
) -> Result<()> {
    let groups: Vec<Vec<QuestionId>> = consolidator.review().groups().to_vec();
    for group in groups {
        if !consolidator.review().groups().contains(&group) {
            continue;
        }

        let labels: Vec<String> = group
            .iter()
            .map(|id| match consolidator.review().question(id) {
                Some(q) => format!("{} {}", id, output::truncate(q.headline(language), 60)),
                None => id.clone(),
            })
            .collect();

        println!();
        let Some(selected) = prompt_keeper(&labels)? else {
            continue;
        };
        let report = consolidator.keep(&group[selected], &group).await;
        print_report(&report);
    }
    Ok(())
}

fn print_group(review: &DuplicateReview, index: usize, group: &[QuestionId], language: &str) {
    println!();
    println!("  {}", format!("Group {} ({} questions)", index + 1, group.len()).bold());
    for id in group {
        match review.question(id) {
            Some(question) => println!(
                "    {} {}",
                id.dimmed(),
                output::truncate(question.headline(language), 70)
            ),
            None => println!("    {} {}", id.dimmed(), "(not in the candidate pool)".dimmed()),
        }
    }
}

fn print_report(report: &RejectionReport) {
    if report.requested.is_empty() {
        return;
    }
    match report.warning() {
        None => output::success(&format!("Rejected {} question(s)", report.succeeded())),
        Some(warning) => {
            output::warning(&warning);
            for (id, message) in &report.failed {
                println!("    {} {}", id.dimmed(), message);
            }
        }
    }
}

fn print_unique_summary(review: &DuplicateReview) {
    println!();
    output::field("Kept", &review.kept().len().to_string());
    output::field("Unique questions", &review.unique_questions().len().to_string());
    if !review.is_resolved() {
        output::field("Unresolved groups", &review.groups().len().to_string());
    }
}
