//! Build and plan command implementations.

use crate::manifest;
use anyhow::{Context, Result};
use quill_core::{Config, PageManifest, SiteBuilder, SitePlan};
use std::path::Path;

/// Plan the site, register every page and write the page manifest
pub fn build_site(config_path: &Path) -> Result<()> {
    let config = load_config(config_path)?;
    tracing::info!("Building site: {}", config.site.title);

    let plan = plan_pages(&config)?;

    let mut manifest = PageManifest::new();
    let count = match plan.register(&mut manifest) {
        Ok(count) => count,
        Err(never) => match never {},
    };

    let path = manifest::write_manifest(&config, &manifest)?;

    tracing::info!("✓ Registered {} pages", count);
    tracing::info!("✓ Manifest written to {:?}", path);

    Ok(())
}

/// Print the planned pages
pub fn show_plan(config_path: &Path, json: bool) -> Result<()> {
    let config = load_config(config_path)?;
    let plan = plan_pages(&config)?;

    if json {
        let out = serde_json::to_string_pretty(&plan.pages).context("Failed to serialize plan")?;
        println!("{}", out);
        return Ok(());
    }

    for page in &plan.pages {
        println!(
            "{:<8} {:<40} {}",
            page.kind.as_str(),
            page.path,
            page.component
        );
    }
    println!("{} pages", plan.len());

    Ok(())
}

fn load_config(config_path: &Path) -> Result<Config> {
    tracing::info!("Loading config from {:?}", config_path);
    Config::from_file(config_path).context("Failed to load configuration")
}

fn plan_pages(config: &Config) -> Result<SitePlan> {
    SiteBuilder::new(config.clone())
        .plan()
        .context("Failed to plan pages")
}
