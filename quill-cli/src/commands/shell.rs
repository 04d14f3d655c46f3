//! Shell command implementation.

use anyhow::{bail, Context, Result};
use quill_core::Config;
use quill_render::{render_shell, ShellProps};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

pub struct ShellOptions {
    pub body: Option<PathBuf>,
    pub head: Vec<PathBuf>,
    pub html_attrs: Vec<(String, String)>,
    pub body_attrs: Vec<(String, String)>,
    pub output: Option<PathBuf>,
}

/// Render a page body inside the HTML document shell
pub fn render_shell_page(config_path: &Path, opts: ShellOptions) -> Result<()> {
    // The shell only needs the site language, so a missing config is fine
    let config = if config_path.exists() {
        Config::from_file(config_path).context("Failed to load configuration")?
    } else {
        tracing::debug!("No config at {:?}; using defaults", config_path);
        Config::default()
    };

    let body = match &opts.body {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?
        }
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read body from stdin")?;
            buf
        }
    };

    let head_components = opts
        .head
        .iter()
        .map(|path| fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path)))
        .collect::<Result<Vec<_>>>()?;

    let props = ShellProps {
        html_attributes: opts.html_attrs.into_iter().collect(),
        head_components,
        body_attributes: opts.body_attrs.into_iter().collect(),
        body,
        ..ShellProps::default()
    };

    let html = render_shell(&props, &config.site.lang).context("Failed to render shell")?;

    match &opts.output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {:?}", parent))?;
            }
            fs::write(path, html).with_context(|| format!("Failed to write {:?}", path))?;
            tracing::info!("✓ Shell written to {:?}", path);
        }
        None => print!("{}", html),
    }

    Ok(())
}

/// Parse a `name=value` attribute argument
pub fn parse_attribute(raw: &str) -> Result<(String, String)> {
    let Some((name, value)) = raw.split_once('=') else {
        bail!("expected name=value, got {:?}", raw);
    };
    let name = name.trim();
    if name.is_empty() {
        bail!("attribute name is empty in {:?}", raw);
    }
    Ok((name.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_attribute() {
        assert_eq!(
            parse_attribute("class=dark").unwrap(),
            ("class".to_string(), "dark".to_string())
        );
        assert_eq!(
            parse_attribute("data-x=a=b").unwrap(),
            ("data-x".to_string(), "a=b".to_string())
        );
        assert!(parse_attribute("novalue").is_err());
        assert!(parse_attribute("=x").is_err());
    }
}
