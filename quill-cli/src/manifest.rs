//! Page manifest written next to build artifacts.

use anyhow::{Context, Result};
use chrono::Utc;
use quill_core::{Config, PageManifest};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

const MANIFEST_VERSION: &str = "1";
const MANIFEST_FILENAME: &str = "pages.json";

#[derive(Serialize)]
struct ManifestFile<'a> {
    version: &'a str,
    generated_at: String,
    #[serde(flatten)]
    manifest: &'a PageManifest,
}

pub fn manifest_path(config: &Config) -> PathBuf {
    config.output_dir().join(MANIFEST_FILENAME)
}

/// Persist every registered page to the output directory.
pub fn write_manifest(config: &Config, manifest: &PageManifest) -> Result<PathBuf> {
    let path = manifest_path(config);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output dir {:?}", parent))?;
    }

    let payload = ManifestFile {
        version: MANIFEST_VERSION,
        generated_at: Utc::now().to_rfc3339(),
        manifest,
    };

    let json =
        serde_json::to_vec_pretty(&payload).context("Failed to serialize page manifest")?;
    fs::write(&path, json).with_context(|| format!("Failed to write manifest {:?}", path))?;
    Ok(path)
}
