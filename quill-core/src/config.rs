//! Configuration parsing and management.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    ParseError(#[from] serde_yaml::Error),
}

/// Main configuration struct matching the quill.yml schema
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,

    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub content: ContentConfig,

    #[serde(default)]
    pub pagination: PaginationConfig,

    #[serde(default)]
    pub templates: TemplatesConfig,

    // Internal: path to config file (for relative path resolution)
    #[serde(skip)]
    config_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub url: String,

    /// Document language written on the `<html>` element of the shell
    #[serde(default = "default_lang")]
    pub lang: String,
}

fn default_lang() -> String {
    String::from("zh")
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            url: String::new(),
            lang: default_lang(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_content_dir")]
    pub content: PathBuf,

    #[serde(default = "default_output_dir")]
    pub output: PathBuf,

    #[serde(default = "default_templates_dir")]
    pub templates: PathBuf,
}

fn default_content_dir() -> PathBuf {
    PathBuf::from("content")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("public")
}

fn default_templates_dir() -> PathBuf {
    PathBuf::from("src/templates")
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            content: default_content_dir(),
            output: default_output_dir(),
            templates: default_templates_dir(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Base directory stripped from file-derived slugs
    #[serde(default = "default_base_path")]
    pub base_path: String,

    /// Maximum number of items returned by the content query
    #[serde(default = "default_limit")]
    pub limit: usize,

    #[serde(default)]
    pub ignore_patterns: Vec<String>,
}

fn default_base_path() -> String {
    String::from("pages")
}

fn default_limit() -> usize {
    1000
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            base_path: default_base_path(),
            limit: default_limit(),
            ignore_patterns: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    #[serde(default = "default_per_page")]
    pub per_page: usize,

    #[serde(default)]
    pub path_prefix: String,
}

fn default_per_page() -> usize {
    10
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            per_page: default_per_page(),
            path_prefix: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplatesConfig {
    #[serde(default = "default_post_template")]
    pub default: String,

    #[serde(default = "default_index_template")]
    pub index: String,

    #[serde(default = "default_tag_template")]
    pub tag: String,

    #[serde(default = "default_template_extension")]
    pub extension: String,
}

fn default_post_template() -> String {
    String::from("blog-post")
}

fn default_index_template() -> String {
    String::from("index")
}

fn default_tag_template() -> String {
    String::from("tag")
}

fn default_template_extension() -> String {
    String::from("js")
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            default: default_post_template(),
            index: default_index_template(),
            tag: default_tag_template(),
            extension: default_template_extension(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::from_yaml(&contents)?;

        // Store config file path for relative path resolution
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Parse configuration from a YAML string. Relative paths stay relative
    /// to the working directory.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes to unit, not to an empty mapping
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Get the content directory, resolved relative to config file
    pub fn content_dir(&self) -> PathBuf {
        self.resolve_path(&self.paths.content)
    }

    /// Get the output directory, resolved relative to config file
    pub fn output_dir(&self) -> PathBuf {
        self.resolve_path(&self.paths.output)
    }

    /// Get the templates directory, resolved relative to config file
    pub fn templates_dir(&self) -> PathBuf {
        self.resolve_path(&self.paths.templates)
    }

    /// Resolve a path relative to the config file location
    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else if let Some(parent) = self.config_path.as_ref().and_then(|p| p.parent()) {
            parent.join(path)
        } else {
            path.to_path_buf()
        }
    }
}
