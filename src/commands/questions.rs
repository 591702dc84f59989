use crate::api::models::{CategoryId, QuestionId, QuestionPool, QuestionType};
use crate::cli::commands::{HistoryFilterArgs, QuestionsSubcommands};
use crate::commands::AppContext;
use crate::domain::locales::QuestionLocaleEditor;
use crate::domain::{GenerationSettings, Pagination, ParseForm, QuestionFilters, Selection};
use crate::ui::prompts::confirm_destructive;
use crate::ui::{output, with_spinner};
use anyhow::{Context, Result};
use colored::*;
use log::info;
use std::path::PathBuf;

pub async fn questions_command(ctx: &AppContext, command: QuestionsSubcommands) -> Result<()> {
    match command {
        QuestionsSubcommands::List {
            pool,
            page,
            limit,
            filters,
        } => list_command(ctx, pool, page, limit, filters).await,
        QuestionsSubcommands::Show { pool, id } => {
            let question = ctx.questions().get(pool, &id).await?;
            output::print_question(&question);
            Ok(())
        }
        QuestionsSubcommands::Confirm { pool, ids } => confirm_command(ctx, pool, select(ids)).await,
        QuestionsSubcommands::Reject { pool, ids, force } => {
            reject_command(ctx, pool, select(ids), force).await
        }
        QuestionsSubcommands::Move { pool, to, ids } => move_command(ctx, pool, to, select(ids)).await,
        QuestionsSubcommands::Translate {
            pool,
            id,
            language,
            dry_run,
        } => translate_command(ctx, pool, id, language, dry_run).await,
        QuestionsSubcommands::Validate { id, language, from } => {
            validate_command(ctx, id, language, from).await
        }
        QuestionsSubcommands::Generate {
            prompt,
            category,
            difficulty,
            count,
            max_tokens,
            temperature,
            question_type,
            model,
            languages,
        } => {
            let mut settings = GenerationSettings::default();
            settings.set_prompt(prompt);
            if let Some(category) = category {
                settings.set_category(category);
            }
            if let Some(difficulty) = difficulty {
                settings.set_difficulty(difficulty);
            }
            if let Some(count) = count {
                settings.set_count(count);
            }
            if let Some(max_tokens) = max_tokens {
                settings.set_max_tokens(max_tokens);
            }
            if let Some(temperature) = temperature {
                settings.set_temperature(temperature);
            }
            if let Some(question_type) = question_type {
                settings.set_question_type(question_type);
            }
            if let Some(model) = model {
                settings.set_model(model);
            }
            if !languages.is_empty() {
                settings.required_languages = languages;
            }
            generate_command(ctx, settings).await
        }
        QuestionsSubcommands::Parse {
            category,
            file,
            text,
            language,
            question_type,
        } => parse_command(ctx, category, file, text, language, question_type).await,
    }
}

impl From<HistoryFilterArgs> for QuestionFilters {
    fn from(args: HistoryFilterArgs) -> Self {
        Self {
            title: args.title,
            difficulty: args.difficulty,
            status: args.status,
            locale_included: args.locale_included,
            locale_excluded: args.locale_excluded,
            category: args.category,
            question_type: args.question_type,
        }
    }
}

async fn list_command(
    ctx: &AppContext,
    pool: QuestionPool,
    page: u32,
    limit: Option<u32>,
    filters: HistoryFilterArgs,
) -> Result<()> {
    let mut pagination = Pagination::new(page, ctx.page_limit(limit));
    let filters = QuestionFilters::from(filters);
    if pool == QuestionPool::Generated && !filters.is_empty() {
        output::warning("Filters only apply to the history pool and were ignored");
    }

    let result = with_spinner(
        format!("Loading {} questions...", pool),
        ctx.questions().list(pool, &pagination, &filters),
    )
    .await?;
    if let Some(total_pages) = result.total_pages {
        pagination.set_total_pages(total_pages);
    }

    output::header(&format!("{} questions", capitalize(pool.as_path())));
    if result.questions.is_empty() {
        println!("  {}", "No questions found.".dimmed());
        return Ok(());
    }

    let language = ctx.language(None);
    for question in &result.questions {
        output::print_question_row(question, &language);
    }

    println!();
    let mut footer = format!("Page {} of {}", pagination.page(), pagination.total_pages());
    if let Some(count) = result.questions_count {
        footer.push_str(&format!(" ({} total)", count));
    }
    println!("  {}", footer.dimmed());
    if pagination.has_next() {
        println!(
            "  {}",
            format!("Next page: quiz-admin questions list {} --page {}", pool, pagination.page() + 1).dimmed()
        );
    }
    Ok(())
}

async fn confirm_command(ctx: &AppContext, pool: QuestionPool, ids: Vec<QuestionId>) -> Result<()> {
    info!("Confirming {} {} question(s)", ids.len(), pool);
    let message = ctx.questions().confirm(pool, &ids).await?;
    output::success(&summary(message, &format!("Approved {} question(s)", ids.len())));
    Ok(())
}

async fn reject_command(ctx: &AppContext, pool: QuestionPool, ids: Vec<QuestionId>, force: bool) -> Result<()> {
    if !confirm_destructive(&format!("Reject {} {} question(s)?", ids.len(), pool), force)? {
        println!("Operation cancelled.");
        return Ok(());
    }

    let message = ctx.questions().reject(pool, &ids).await?;
    output::success(&summary(message, &format!("Rejected {} question(s)", ids.len())));
    Ok(())
}

async fn move_command(ctx: &AppContext, pool: QuestionPool, to: CategoryId, ids: Vec<QuestionId>) -> Result<()> {
    let moved = ctx
        .questions()
        .move_questions(pool, &ids, to)
        .await
        .with_context(|| format!("Failed to move questions to category {}", to))?;
    output::success(&format!("Moved {} question(s) to category {}", moved, to));
    Ok(())
}

async fn translate_command(
    ctx: &AppContext,
    pool: QuestionPool,
    id: QuestionId,
    language: String,
    dry_run: bool,
) -> Result<()> {
    let service = ctx.questions();
    let mut question = service.get(pool, &id).await?;
    let mut editor = QuestionLocaleEditor::new(question.locales.clone())
        .with_context(|| format!("Question {} has a malformed locale list", id))?;

    with_spinner(
        format!("Translating into {}...", language),
        service.translate_into(pool, &id, &mut editor, &language),
    )
    .await
    .with_context(|| format!("Failed to translate question {} into '{}'", id, language))?;

    if let Some(added) = editor.locales().iter().find(|l| l.language == language) {
        output::header(&format!("Translation ({})", language));
        println!("  {}", added.question);
        println!("  {} {}", "correct:".dimmed(), added.correct.to_string().bright_green());
        if !added.wrong.is_empty() {
            println!("  {} {}", "wrong:".dimmed(), added.wrong.join(" | "));
        }
    }

    if dry_run {
        println!();
        println!("  {}", "Dry run: nothing saved.".dimmed());
        return Ok(());
    }

    question.locales = editor.into_locales();
    service.update(pool, &question).await?;
    println!();
    output::success(&format!("Saved '{}' locale for question {} (unvalidated)", language, id));
    Ok(())
}

async fn validate_command(ctx: &AppContext, id: QuestionId, language: String, from: String) -> Result<()> {
    let result = with_spinner(
        "Validating translation...",
        ctx.questions().validate_translation(&id, &from, &language),
    )
    .await?;

    if result.is_valid {
        output::success(&format!("Translation {} → {} looks valid", from, language));
    } else {
        output::failure(&format!("Translation {} → {} needs attention", from, language));
    }
    for suggestion in &result.suggestions {
        let text = match suggestion {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        println!("    {} {}", "•".dimmed(), text);
    }
    Ok(())
}

async fn generate_command(ctx: &AppContext, mut settings: GenerationSettings) -> Result<()> {
    settings.validate()?;
    let outcome = match with_spinner("Generating questions...", ctx.questions().generate(&settings)).await {
        Ok(outcome) => outcome,
        Err(e) => {
            settings.set_error(Some(e.to_string()));
            return Err(e).context("Question generation failed");
        }
    };
    settings.mark_generated(outcome);

    output::success(&format!(
        "Generated {} question(s) into the generated pool",
        settings.questions.len()
    ));
    output::field("Tokens used", &settings.tokens_used.to_string());
    Ok(())
}

async fn parse_command(
    ctx: &AppContext,
    category: CategoryId,
    file: Option<PathBuf>,
    text: Option<String>,
    language: String,
    question_type: QuestionType,
) -> Result<()> {
    let text = match file {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => text.unwrap_or_default(),
    };

    let mut form = ParseForm {
        category_id: Some(category),
        language,
        question_type,
        ..Default::default()
    };
    form.set_text(text);
    form.to_request()?;

    let outcome = match with_spinner("Parsing text...", ctx.questions().parse(&form)).await {
        Ok(outcome) => outcome,
        Err(e) => {
            form.set_error(Some(e.to_string()));
            return Err(e).context("Parsing failed");
        }
    };
    form.mark_parsed(&outcome);

    output::success(&format!(
        "Parsed {} question(s) into category {}",
        outcome.questions.len(),
        category
    ));
    output::field("Tokens used", &form.tokens_used.to_string());
    Ok(())
}

/// Selected ids in argument order, repeats dropped
fn select(ids: Vec<QuestionId>) -> Vec<QuestionId> {
    let mut selection = Selection::new();
    selection.select_all(ids);
    selection.take()
}

fn summary(message: String, fallback: &str) -> String {
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
