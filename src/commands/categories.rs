use crate::api::models::{CategoryId, UpdateCategoryRequest};
use crate::cli::commands::CategoriesSubcommands;
use crate::commands::AppContext;
use crate::domain::locales::{LocaleEditor, parse_locale_arg};
use crate::ui::prompts::confirm_destructive;
use crate::ui::{output, with_spinner};
use anyhow::{Context, Result};
use colored::*;
use log::info;

pub async fn categories_command(ctx: &AppContext, command: CategoriesSubcommands) -> Result<()> {
    match command {
        CategoriesSubcommands::Tree { language, search, counts } => {
            tree_command(ctx, language, search, counts).await
        }
        CategoriesSubcommands::Show { id } => show_command(ctx, id).await,
        CategoriesSubcommands::Create {
            name,
            parent,
            locales,
            translate,
        } => create_command(ctx, name, parent, locales, translate).await,
        CategoriesSubcommands::Edit {
            id,
            name,
            parent,
            locales,
            remove_locales,
            translate,
        } => edit_command(ctx, id, name, parent, locales, remove_locales, translate).await,
        CategoriesSubcommands::Delete { id, force } => delete_command(ctx, id, force).await,
        CategoriesSubcommands::Translate { id } => translate_command(ctx, id).await,
        CategoriesSubcommands::ClearCache { id } => {
            let message = ctx.categories().clear_cache(id).await?;
            output::success(&non_empty(message, &format!("Cache cleared for category {}", id)));
            Ok(())
        }
        CategoriesSubcommands::Sync => {
            let message = with_spinner("Syncing categories...", ctx.categories().sync()).await?;
            output::success(&non_empty(message, "Categories synced"));
            Ok(())
        }
    }
}

async fn tree_command(
    ctx: &AppContext,
    language: Option<String>,
    search: Option<String>,
    counts: bool,
) -> Result<()> {
    let language = ctx.language(language);
    info!("Building category tree in '{}'", language);

    let service = ctx.categories();
    let tree = if counts {
        with_spinner("Loading categories...", service.tree_with_counts(&language, search.as_deref())).await?
    } else {
        with_spinner("Loading categories...", service.tree(&language, search.as_deref())).await?
    };

    output::header(&format!("Categories ({})", language));
    output::print_tree(&tree);
    Ok(())
}

async fn show_command(ctx: &AppContext, id: CategoryId) -> Result<()> {
    let category = ctx.categories().get(id).await?;
    output::print_category(&category, &ctx.config.settings.default_language);
    Ok(())
}

/// Apply `LANG=VALUE` arguments to an editor, replacing existing values
fn apply_locale_args(editor: &mut LocaleEditor, args: &[String]) -> Result<()> {
    for arg in args {
        let locale = parse_locale_arg(arg)?;
        editor
            .upsert(&locale.language, &locale.value)
            .with_context(|| format!("Invalid locale '{}'", arg))?;
    }
    Ok(())
}

async fn create_command(
    ctx: &AppContext,
    name: String,
    parent: Option<CategoryId>,
    locales: Vec<String>,
    translate: bool,
) -> Result<()> {
    let service = ctx.categories();
    let mut editor = LocaleEditor::new(ctx.supported_languages());
    apply_locale_args(&mut editor, &locales)?;

    if translate {
        let added = with_spinner("Translating...", service.translate_into(&mut editor, &name))
            .await
            .context("Failed to translate category")?;
        println!("  {} {} translated locale(s) added", "+".bright_green(), added);
    }

    let category = service.create(&name, parent, editor.into_locales()).await?;
    output::success(&format!("Created category '{}' with id {}", category.name, category.id));
    Ok(())
}

async fn edit_command(
    ctx: &AppContext,
    id: CategoryId,
    name: Option<String>,
    parent: Option<CategoryId>,
    locales: Vec<String>,
    remove_locales: Vec<String>,
    translate: bool,
) -> Result<()> {
    let service = ctx.categories();
    let mut changes = UpdateCategoryRequest {
        name: name.clone(),
        parent_id: parent,
        locales: None,
    };

    if !locales.is_empty() || !remove_locales.is_empty() || translate {
        let current = service.get(id).await?;
        let mut editor = LocaleEditor::from_locales(current.locales, ctx.supported_languages())?;
        apply_locale_args(&mut editor, &locales)?;
        for language in &remove_locales {
            editor.remove(language)?;
        }
        if translate {
            let text = name.as_deref().unwrap_or(&current.name);
            let added = with_spinner("Translating...", service.translate_into(&mut editor, text))
                .await
                .context("Failed to translate category")?;
            println!("  {} {} translated locale(s) added", "+".bright_green(), added);
        }
        changes.locales = Some(editor.into_locales());
    }

    let category = service.update(id, changes).await?;
    output::success(&format!("Updated category {} ({})", category.id, category.name));
    Ok(())
}

async fn delete_command(ctx: &AppContext, id: CategoryId, force: bool) -> Result<()> {
    let service = ctx.categories();
    let category = service.get(id).await?;

    if !confirm_destructive(&format!("Delete category '{}' ({})?", category.name, id), force)? {
        println!("Operation cancelled.");
        return Ok(());
    }

    let message = service.delete(id).await?;
    output::success(&non_empty(message, &format!("Deleted category {}", id)));
    Ok(())
}

async fn translate_command(ctx: &AppContext, id: CategoryId) -> Result<()> {
    let service = ctx.categories();
    let category = service.get(id).await?;
    let mut editor = LocaleEditor::from_locales(category.locales.clone(), ctx.supported_languages())?;

    let added = with_spinner(
        format!("Translating '{}'...", category.name),
        service.translate_into(&mut editor, &category.name),
    )
    .await
    .context("Failed to translate category")?;

    if added == 0 {
        println!("No new locales returned.");
        return Ok(());
    }

    let changes = UpdateCategoryRequest {
        locales: Some(editor.into_locales()),
        ..Default::default()
    };
    let updated = service.update(id, changes).await?;
    output::success(&format!("Added {} locale(s) to '{}'", added, updated.name));
    output::print_category(&updated, &ctx.config.settings.default_language);
    Ok(())
}

fn non_empty(message: String, fallback: &str) -> String {
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}
