use crate::config::Config;
use crate::ui::prompts::confirm_destructive;
use anyhow::Result;
use log::info;

pub async fn reset_command(config: &mut Config, name: String) -> Result<()> {
    info!("Resetting setting: {}", name);

    config.reset_setting(&name)?;
    println!("Reset {} to {}", name, config.get_setting(&name)?);
    Ok(())
}

/// Restore the `[api]` and `[settings]` defaults; stored tokens are kept
pub async fn reset_all_command(config: &mut Config, force: bool) -> Result<()> {
    info!("Resetting all settings to defaults");

    if !confirm_destructive("Reset all settings to their default values?", force)? {
        println!("Operation cancelled.");
        return Ok(());
    }

    config.reset_all()?;

    println!("All settings have been reset to default values:");
    for name in crate::config::SETTING_NAMES {
        println!("  {}: {}", name, config.get_setting(name)?);
    }
    Ok(())
}
