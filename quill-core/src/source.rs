//! Content query over a directory of markdown files.

use crate::{
    config::Config,
    frontmatter::{parse_frontmatter, FrontmatterError},
    models::{parse_date, ContentItem},
    slug::{file_path_slug, resolve_slug},
};
use regex::Regex;
use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown"];

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid frontmatter in {path:?}: {source}")]
    Frontmatter {
        path: PathBuf,
        #[source]
        source: FrontmatterError,
    },

    #[error("Failed to walk content directory: {0}")]
    Walk(#[from] walkdir::Error),
}

/// The content query reported one or more errors; no items are returned.
#[derive(Error, Debug)]
#[error("content query failed with {} error(s): {}", .errors.len(), summarize(.errors))]
pub struct QueryError {
    pub errors: Vec<SourceError>,
}

fn summarize(errors: &[SourceError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Source of content items for a build
///
/// Implementations return every item sorted by date, newest first, or fail
/// as a whole.
pub trait ContentQuery {
    fn query(&self) -> Result<Vec<ContentItem>, QueryError>;
}

/// Markdown files below the configured content directory
pub struct MarkdownSource {
    root: PathBuf,
    base_path: String,
    limit: usize,
    ignore_patterns: Vec<Regex>,
}

impl MarkdownSource {
    pub fn new(config: &Config) -> Self {
        Self {
            root: config.content_dir(),
            base_path: config.content.base_path.clone(),
            limit: config.content.limit,
            ignore_patterns: compile_ignore_patterns(&config.content.ignore_patterns),
        }
    }

    /// Discover all markdown files in the content directory
    fn discover_markdown_files(&self) -> Result<Vec<PathBuf>, SourceError> {
        let mut files = Vec::new();

        for entry in WalkDir::new(&self.root).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }

            let is_markdown = entry
                .path()
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| MARKDOWN_EXTENSIONS.contains(&ext));
            if !is_markdown {
                continue;
            }

            let rel = relative_display(entry.path(), &self.root);
            if should_ignore(&rel, &self.ignore_patterns) {
                tracing::debug!("Ignoring {} due to ignore_patterns", rel);
                continue;
            }

            files.push(entry.path().to_path_buf());
        }

        Ok(files)
    }

    /// Build a content item from a markdown file, computing its slug field
    fn load_item(&self, path: &Path) -> Result<ContentItem, SourceError> {
        let content = fs::read_to_string(path).map_err(|source| SourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let (frontmatter, _body) =
            parse_frontmatter(&content).map_err(|source| SourceError::Frontmatter {
                path: path.to_path_buf(),
                source,
            })?;

        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        let source_path = relative_display(path, &self.root);
        let derived_slug = file_path_slug(relative, &self.base_path);
        let slug = resolve_slug(frontmatter.slug.as_deref(), &derived_slug);

        let date = frontmatter.date.as_deref().and_then(|raw| {
            let parsed = parse_date(raw);
            if parsed.is_none() {
                tracing::warn!("Unrecognized date {:?} in {}", raw, source_path);
            }
            parsed
        });

        Ok(ContentItem {
            id: source_path.clone(),
            slug,
            derived_slug,
            source_path,
            frontmatter,
            date,
        })
    }
}

impl ContentQuery for MarkdownSource {
    fn query(&self) -> Result<Vec<ContentItem>, QueryError> {
        let files = self
            .discover_markdown_files()
            .map_err(|e| QueryError { errors: vec![e] })?;

        tracing::info!("Found {} markdown files", files.len());

        let mut items = Vec::with_capacity(files.len());
        let mut errors = Vec::new();
        for path in &files {
            match self.load_item(path) {
                Ok(item) => items.push(item),
                Err(e) => {
                    tracing::error!("{}", e);
                    errors.push(e);
                }
            }
        }

        if !errors.is_empty() {
            return Err(QueryError { errors });
        }

        sort_newest_first(&mut items);
        if items.len() > self.limit {
            tracing::warn!(
                "Content query limited to {} of {} items",
                self.limit,
                items.len()
            );
            items.truncate(self.limit);
        }

        Ok(items)
    }
}

/// Date descending; undated items last, ties by source path
pub fn sort_newest_first(items: &mut [ContentItem]) {
    items.sort_by(|a, b| match (&a.date, &b.date) {
        (Some(x), Some(y)) => y.cmp(x).then_with(|| a.source_path.cmp(&b.source_path)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.source_path.cmp(&b.source_path),
    });
}

fn relative_display(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn compile_ignore_patterns(patterns: &[String]) -> Vec<Regex> {
    let mut compiled = Vec::new();
    for pat in patterns {
        match Regex::new(pat) {
            Ok(re) => compiled.push(re),
            Err(err) => tracing::warn!("Invalid ignore pattern '{}': {}", pat, err),
        }
    }
    compiled
}

fn should_ignore(path: &str, ignores: &[Regex]) -> bool {
    ignores.iter().any(|re| re.is_match(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn source_for(dir: &TempDir, extra: &str) -> MarkdownSource {
        let yaml = format!("paths:\n  content: {}\n{}", dir.path().display(), extra);
        MarkdownSource::new(&Config::from_yaml(&yaml).unwrap())
    }

    #[test]
    fn test_query_sorts_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "old.md", "---\ntitle: Old\ndate: 2017-01-01\n---\n");
        write(dir.path(), "new.md", "---\ntitle: New\ndate: 2019-06-01\n---\n");
        write(dir.path(), "undated.md", "---\ntitle: Undated\n---\n");
        write(dir.path(), "notes.txt", "not markdown");

        let items = source_for(&dir, "").query().unwrap();
        let ids: Vec<_> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["new.md", "old.md", "undated.md"]);
        assert_eq!(items[0].slug, "/new/");
    }

    #[test]
    fn test_mixed_date_layouts_sort_together() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "spaced.md", "---\ndate: 2018-01-01 10:00:00\n---\n");
        write(dir.path(), "day.md", "---\ndate: 2018-01-01\n---\n");
        write(dir.path(), "minutes.md", "---\ndate: 2018-01-02 08:30\n---\n");
        write(dir.path(), "zoned.md", "---\ndate: 2017-12-31T23:00:00Z\n---\n");

        let items = source_for(&dir, "").query().unwrap();
        let ids: Vec<_> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["minutes.md", "spaced.md", "day.md", "zoned.md"]);
        assert!(items.iter().all(|i| i.date.is_some()));
    }

    #[test]
    fn test_custom_slug_overrides_file_path() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "2018/intro/index.md",
            "---\ntitle: Intro\nslug: /hello-world\n---\n",
        );
        write(dir.path(), "2018/blank.md", "---\ntitle: Blank\nslug: '  '\n---\n");

        let items = source_for(&dir, "").query().unwrap();
        let intro = items.iter().find(|i| i.id == "2018/intro/index.md").unwrap();
        assert_eq!(intro.slug, "/hello-world");
        assert_eq!(intro.derived_slug, "/2018/intro/");

        let blank = items.iter().find(|i| i.id == "2018/blank.md").unwrap();
        assert_eq!(blank.slug, "/2018/blank/");
    }

    #[test]
    fn test_invalid_file_fails_whole_query() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "good.md", "---\ntitle: Good\n---\n");
        write(dir.path(), "bad.md", "---\ntitle: [oops\n---\n");

        let err = source_for(&dir, "").query().unwrap_err();
        assert_eq!(err.errors.len(), 1);
        assert!(matches!(err.errors[0], SourceError::Frontmatter { .. }));
        assert!(err.to_string().contains("bad.md"));
    }

    #[test]
    fn test_missing_content_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let yaml = format!("paths:\n  content: {}\n", dir.path().join("nope").display());
        let source = MarkdownSource::new(&Config::from_yaml(&yaml).unwrap());

        assert!(source.query().is_err());
    }

    #[test]
    fn test_ignore_patterns_and_limit() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.md", "---\ndate: 2020-01-03\n---\n");
        write(dir.path(), "b.md", "---\ndate: 2020-01-02\n---\n");
        write(dir.path(), "c.md", "---\ndate: 2020-01-01\n---\n");
        write(dir.path(), "drafts/d.md", "---\ndate: 2021-01-01\n---\n");

        let source = source_for(
            &dir,
            "content:\n  limit: 2\n  ignore_patterns: ['^drafts/', '[unclosed']\n",
        );
        let items = source.query().unwrap();
        let ids: Vec<_> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["a.md", "b.md"]);
    }
}
