//! Content model structs for content items and page descriptors.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Frontmatter metadata from markdown files
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Frontmatter {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub date: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub tags: Option<Vec<String>>,

    /// Template used to render the item's page (defaults to the post template)
    #[serde(default, rename = "templateKey")]
    pub template_key: Option<String>,

    /// Custom URL path; blank values fall back to the file-derived path
    #[serde(default)]
    pub slug: Option<String>,

    #[serde(default, rename = "headerImage")]
    pub header_image: Option<String>,

    /// Everything else, kept verbatim
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl Frontmatter {
    /// Tags declared by this item, empty when the field is absent
    pub fn tags(&self) -> &[String] {
        self.tags.as_deref().unwrap_or_default()
    }

    /// Template key when present and non-blank
    pub fn template_key(&self) -> Option<&str> {
        self.template_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

/// A single markdown file as returned by the content query
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContentItem {
    /// Stable identifier (content-relative source path)
    pub id: String,

    /// Resolved URL path (custom frontmatter slug or file-derived path)
    pub slug: String,

    /// File-derived path, kept for fallback when the custom slug is blank
    pub derived_slug: String,

    /// Source path relative to the content directory
    pub source_path: String,

    /// Original frontmatter
    pub frontmatter: Frontmatter,

    /// Publication date parsed from the frontmatter
    pub date: Option<NaiveDateTime>,
}

impl ContentItem {
    pub fn tags(&self) -> &[String] {
        self.frontmatter.tags()
    }
}

const NAIVE_DATETIME_LAYOUTS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse a frontmatter date in any of the accepted layouts
///
/// Accepts `YYYY-MM-DD`, local date-times separated by `T` or a space (with
/// or without seconds) and RFC 3339 timestamps.
pub fn parse_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    for layout in NAIVE_DATETIME_LAYOUTS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, layout) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Kind of generated page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageKind {
    Index,
    Content,
    Tag,
}

impl PageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PageKind::Index => "index",
            PageKind::Content => "content",
            PageKind::Tag => "tag",
        }
    }
}

/// Declarative record telling the page registry what to render at a path
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PageDescriptor {
    pub path: String,

    /// Component template file reference
    pub component: String,

    /// Data handed to the template
    pub context: serde_json::Map<String, serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    pub kind: PageKind,
}

impl PageDescriptor {
    /// Lookup key used for collision checks (`/a/` and `/a` are the same page)
    pub fn path_key(&self) -> String {
        normalize_page_path(&self.path)
    }
}

/// Ensure a leading slash and drop trailing slashes (except for the root)
///
/// Whitespace is significant: `/tag/go` and `/tag/go ` are different pages.
pub fn normalize_page_path(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return "/".to_string();
    }
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}
