use crate::config::Config;
use anyhow::Result;
use log::info;

/// Validate and persist one setting. Invalid values leave the file untouched.
pub async fn set_command(config: &mut Config, name: String, value: String) -> Result<()> {
    info!("Setting {} to {}", name, value);

    config.set_setting(&name, &value)?;

    if name == "page-limit" && config.settings.page_limit > 200 {
        println!("Warning: a page limit of {} may make list responses slow.", config.settings.page_limit);
    }

    println!("Set {} to {}", name, config.get_setting(&name)?);
    Ok(())
}
