use crate::config::{API_URL_ENV, Config, SETTING_NAMES};
use crate::ui::output;
use anyhow::Result;
use colored::*;

pub async fn show_command(config: &Config) -> Result<()> {
    output::header("quiz-admin settings");

    for name in SETTING_NAMES {
        println!("  {:<22} {}", name.bright_white(), config.get_setting(name)?);
    }

    println!();
    output::field("Config file", &config.path()?.display().to_string());
    if std::env::var(API_URL_ENV).is_ok() {
        output::field("Effective base-url", &format!("{} (from {})", config.base_url(), API_URL_ENV));
    }
    Ok(())
}
