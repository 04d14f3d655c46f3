//! Init command implementation.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

const DEFAULT_CONFIG: &str = include_str!("../../../quill.yml.example");

/// Initialize a new quill project
pub fn init_project(path: Option<&Path>) -> Result<()> {
    let root = path.unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(root).with_context(|| format!("Failed to create {:?}", root))?;

    write_config(root)?;
    scaffold_content(root)?;

    println!("✓ quill initialized in {:?}", root);
    println!("  - Edit quill.yml to customize site metadata");
    println!("  - Write posts in content/");
    Ok(())
}

fn write_config(root: &Path) -> Result<()> {
    let config_path = root.join("quill.yml");
    if config_path.exists() {
        println!("quill.yml already exists at {:?}", config_path);
        return Ok(());
    }

    fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {:?}", config_path))?;
    println!("Created {:?}", config_path);
    Ok(())
}

fn scaffold_content(root: &Path) -> Result<()> {
    let content = root.join("content");
    fs::create_dir_all(&content).with_context(|| format!("Failed to create {:?}", content))?;

    let sample = content.join("hello-world.md");
    if !sample.exists() {
        fs::write(&sample, SAMPLE_POST)
            .with_context(|| format!("Failed to write {:?}", sample))?;
        println!("Created {:?}", sample);
    }

    Ok(())
}

const SAMPLE_POST: &str = r#"---
title: Hello World
description: First post
date: 2018-01-01
tags:
  - intro
---

# Hello World

Run `quill plan` to see the pages this post produces.
"#;
