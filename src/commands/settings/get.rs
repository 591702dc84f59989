use crate::config::Config;
use anyhow::Result;
use log::info;

/// Print the raw value of one setting, suitable for scripts
pub async fn get_command(config: &Config, name: String) -> Result<()> {
    info!("Getting setting: {}", name);
    println!("{}", config.get_setting(&name)?);
    Ok(())
}
