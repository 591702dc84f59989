use anyhow::Result;
use dialoguer::{Input, Password, Select};
use is_terminal::IsTerminal;

pub fn is_interactive() -> bool {
    std::io::stdin().is_terminal()
}

/// Yes/No picker; `default_yes` preselects "Yes"
pub fn prompt_confirmation(prompt: &str, default_yes: bool) -> Result<bool> {
    let items = vec!["Yes", "No"];
    let default_index = if default_yes { 0 } else { 1 };

    let selection = Select::new()
        .with_prompt(prompt)
        .items(&items)
        .default(default_index)
        .interact()?;

    Ok(selection == 0)
}

/// Confirm a destructive action; `--force` skips the prompt, a non-TTY stdin refuses
pub fn confirm_destructive(prompt: &str, force: bool) -> Result<bool> {
    if force {
        return Ok(true);
    }
    if !is_interactive() {
        anyhow::bail!("Refusing to continue without confirmation; pass --force when not running in a terminal");
    }
    prompt_confirmation(prompt, false)
}

pub fn prompt_credentials(username: Option<String>, password: Option<String>) -> Result<(String, String)> {
    let username_val = if let Some(u) = username {
        u
    } else {
        Input::<String>::new()
            .with_prompt("Username")
            .interact_text()?
    };

    let password_val = if let Some(p) = password {
        p
    } else {
        Password::new()
            .with_prompt("Password")
            .interact()?
    };

    Ok((username_val, password_val))
}

/// Pick the keeper of one duplicate group. `None` means skip the group.
pub fn prompt_keeper(labels: &[String]) -> Result<Option<usize>> {
    let mut items: Vec<String> = labels.to_vec();
    items.push("Skip this group".to_string());

    let selection = Select::new()
        .with_prompt("Which question should be kept?")
        .items(&items)
        .default(0)
        .interact()?;

    Ok((selection < labels.len()).then_some(selection))
}
