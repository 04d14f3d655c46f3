//! Slug derivation for content files.

use std::path::{Component, Path};

/// Derive a URL path from a file's location relative to the content root
///
/// Rules:
/// - The path is taken relative to `base_path` (shared leading directories
///   are removed, steps above the root are dropped)
/// - The extension is removed
/// - A file named `index` maps to its directory
/// - The result always has a leading and trailing slash
///
/// # Examples
///
/// ```
/// use quill_core::slug::file_path_slug;
/// use std::path::Path;
///
/// assert_eq!(file_path_slug(Path::new("blog/hello.md"), "pages"), "/blog/hello/");
/// assert_eq!(file_path_slug(Path::new("pages/about/index.md"), "pages"), "/about/");
/// assert_eq!(file_path_slug(Path::new("index.md"), "pages"), "/");
/// ```
pub fn file_path_slug(relative_path: &Path, base_path: &str) -> String {
    let segments = normal_segments(relative_path);
    let base = normal_segments(Path::new(base_path));

    let shared = segments
        .iter()
        .zip(base.iter())
        .take_while(|(a, b)| a == b)
        .count();
    let rest = &segments[shared..];

    let Some((file_name, dirs)) = rest.split_last() else {
        return "/".to_string();
    };

    let stem = Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name);

    let mut parts: Vec<&str> = dirs.iter().map(String::as_str).collect();
    if stem != "index" {
        parts.push(stem);
    }

    if parts.is_empty() {
        "/".to_string()
    } else {
        format!("/{}/", parts.join("/"))
    }
}

/// Pick the page path for an item: the custom slug when it is non-blank,
/// otherwise the file-derived path
pub fn resolve_slug(custom: Option<&str>, derived: &str) -> String {
    match custom {
        Some(slug) if !slug.trim().is_empty() => slug.to_string(),
        _ => derived.to_string(),
    }
}

fn normal_segments(path: &Path) -> Vec<String> {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect()
}
