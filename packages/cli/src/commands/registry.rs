use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagecraft_registry::{ComponentConfig, ComponentRegistry};

#[derive(Debug, Args)]
pub struct RegistryArgs {
    /// Print the configurations as JSON
    #[arg(long)]
    pub json: bool,

    /// Only list types in this category
    #[arg(short, long)]
    pub category: Option<String>,
}

pub fn registry(args: RegistryArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let registry = config.load_registry(cwd)?;

    let configs: Vec<&ComponentConfig> = registry
        .configs()
        .into_iter()
        .filter(|c| args.category.as_deref().map_or(true, |cat| c.category == cat))
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&configs)?);
        return Ok(());
    }

    let mut categories: Vec<&str> = Vec::new();
    for config in &configs {
        if !categories.contains(&config.category.as_str()) {
            categories.push(&config.category);
        }
    }

    for category in categories {
        println!("{}", category.bright_blue().bold());
        for config in configs.iter().filter(|c| c.category == category) {
            println!("  {}", describe(config));
        }
        println!();
    }

    println!("{} component types", configs.len());
    Ok(())
}

fn describe(config: &ComponentConfig) -> String {
    let mut line = format!("{:<12} {}", config.component_type, config.display_name);
    if config.can_have_children {
        line.push_str(&format!(" {}", "[container]".green()));
    }
    if !config.description.is_empty() {
        line.push_str(&format!(" - {}", config.description.dimmed()));
    }
    line
}
