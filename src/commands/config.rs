use anyhow::Result;
use owo_colors::OwoColorize;
use parlamento_core::config::SiteConfig;

pub fn run(config: &SiteConfig) -> Result<()> {
    let path = SiteConfig::config_path()?;

    println!("{} {}", "Config file:".dimmed(), path.display());
    println!();
    print!("{}", toml::to_string_pretty(config)?);

    Ok(())
}
