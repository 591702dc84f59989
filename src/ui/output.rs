//! Console formatting shared by the command handlers

use crate::api::models::{Category, DeeplLogStat, Question};
use crate::domain::tree::{CategoryNode, CategoryTree};
use colored::*;

pub fn header(title: &str) {
    println!();
    println!("  {}", title.bright_blue().bold());
    println!("  {}", "═".repeat(title.chars().count()).bright_blue());
}

pub fn success(message: &str) {
    println!("  {} {}", "✓".bright_green().bold(), message);
}

pub fn failure(message: &str) {
    println!("  {} {}", "✗".bright_red().bold(), message.red());
}

pub fn warning(message: &str) {
    println!("  {} {}", "⚠".bright_yellow().bold(), message.yellow());
}

pub fn field(label: &str, value: &str) {
    println!("    {}: {}", label.dimmed(), value);
}

/// Cut `text` to `max` characters, marking the cut with an ellipsis
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

pub fn print_tree(tree: &CategoryTree) {
    if tree.is_empty() {
        println!("  {}", "No categories found".dimmed());
        return;
    }
    for root in tree.roots() {
        println!("  {}", node_label(root));
        print_children(&root.children, "  ");
    }
    println!();
    println!("  {} {}", "Total categories:".dimmed(), tree.len());
}

fn print_children(children: &[CategoryNode], prefix: &str) {
    for (i, child) in children.iter().enumerate() {
        let last = i + 1 == children.len();
        let branch = if last { "└── " } else { "├── " };
        println!("{}{}{}", prefix, branch.dimmed(), node_label(child));
        let next_prefix = format!("{}{}", prefix, if last { "    " } else { "│   " });
        print_children(&child.children, &next_prefix);
    }
}

fn node_label(node: &CategoryNode) -> String {
    let mut label = format!("{} {}", node.title.bright_white(), format!("[{}]", node.id).dimmed());
    if let Some(count) = node.questions_count {
        label.push_str(&format!(" {}", format!("({} questions)", count).cyan()));
    }
    label
}

pub fn print_category(category: &Category, language: &str) {
    header(&format!("Category {}", category.id));
    field("Name", &category.name);
    field("Display name", category.display_name(language));
    field(
        "Parent",
        &category
            .parent_id
            .map(|p| p.to_string())
            .unwrap_or_else(|| "none".to_string()),
    );
    if !category.ancestors.is_empty() {
        let ancestors: Vec<String> = category.ancestors.iter().map(|a| a.to_string()).collect();
        field("Ancestors", &ancestors.join(" › "));
    }
    if let Some(count) = category.questions_count {
        field("Questions", &count.to_string());
    }
    println!();
    println!("  {}", "Locales:".bright_white().bold());
    if category.locales.is_empty() {
        println!("    {}", "none".dimmed());
    }
    for locale in &category.locales {
        let value = if locale.value.is_empty() {
            "(empty)".dimmed().to_string()
        } else {
            locale.value.clone()
        };
        println!("    {} {}", format!("{:<4}", locale.language).cyan(), value);
    }
}

pub fn print_question_row(question: &Question, language: &str) {
    let status = question.status.to_string();
    let status = match question.status {
        crate::api::models::QuestionStatus::Approved => status.bright_green(),
        crate::api::models::QuestionStatus::Rejected => status.bright_red(),
        crate::api::models::QuestionStatus::ProofReading => status.bright_yellow(),
        crate::api::models::QuestionStatus::Pending => status.white(),
    };
    println!(
        "  {:<26} {:<14} {:<7} {} {}",
        question.id.dimmed(),
        status,
        question.question_type,
        format!("d{}", question.difficulty).cyan(),
        truncate(question.headline(language), 70)
    );
}

pub fn print_question(question: &Question) {
    header(&format!("Question {}", question.id));
    field("Status", &question.status.to_string());
    field("Type", &question.question_type.to_string());
    field("Category", &question.category_id);
    field("Difficulty", &question.difficulty.to_string());
    field("Valid", if question.is_valid { "yes" } else { "no" });
    if !question.tags.is_empty() {
        field("Tags", &question.tags.join(", "));
    }
    if !question.required_languages.is_empty() {
        field("Required languages", &question.required_languages.join(", "));
    }
    if let Some(created) = question.created_at {
        field("Created", &created.format("%Y-%m-%d %H:%M").to_string());
    }

    for locale in &question.locales {
        println!();
        let marker = if locale.is_valid { "✓".bright_green() } else { "?".bright_yellow() };
        println!("  {} {}", marker, locale.language.cyan().bold());
        println!("    {}", locale.question);
        println!("    {} {}", "correct:".dimmed(), locale.correct.to_string().bright_green());
        if !locale.wrong.is_empty() {
            println!("    {} {}", "wrong:".dimmed(), locale.wrong.join(" | "));
        }
    }
}

pub fn print_deepl_log(log: &DeeplLogStat) {
    let when = log
        .created_at
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "N/A".to_string());
    println!(
        "  {:<16} {:>3} → {:<3} {:>7}  {}",
        when.dimmed(),
        log.source_language,
        log.target_language,
        log.characters_used.to_string().cyan(),
        truncate(if log.request_text.is_empty() { "N/A" } else { &log.request_text }, 60)
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("Географія світу", 6), "Геогр…");
    }
}
