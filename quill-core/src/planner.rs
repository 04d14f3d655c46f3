//! Page planning: turns the sorted content list into page descriptors.
//!
//! Pages come out in registration order: paginated index pages, then one page
//! per content item, then one page per distinct tag.

use crate::{
    config::Config,
    models::{ContentItem, PageDescriptor, PageKind},
};
use serde_json::{json, Map, Value};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum PlanError {
    #[error("Duplicate page path {path}: {first} collides with {second}")]
    DuplicatePath {
        path: String,
        first: String,
        second: String,
    },
}

/// Where template keys resolve to component files
#[derive(Debug, Clone)]
pub struct TemplateSet {
    pub dir: String,
    pub extension: String,
    pub default: String,
    pub index: String,
    pub tag: String,
}

impl TemplateSet {
    /// Component file reference for a template key
    pub fn component(&self, key: &str) -> String {
        let dir = self.dir.trim_end_matches('/');
        if dir.is_empty() {
            format!("{}.{}", key, self.extension)
        } else {
            format!("{}/{}.{}", dir, key, self.extension)
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            dir: config.templates_dir().to_string_lossy().into_owned(),
            extension: config.templates.extension.clone(),
            default: config.templates.default.clone(),
            index: config.templates.index.clone(),
            tag: config.templates.tag.clone(),
        }
    }
}

/// The full set of pages for one build, in registration order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SitePlan {
    pub pages: Vec<PageDescriptor>,
}

impl SitePlan {
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn pages_of(&self, kind: PageKind) -> impl Iterator<Item = &PageDescriptor> {
        self.pages.iter().filter(move |p| p.kind == kind)
    }

    pub fn paths(&self) -> Vec<&str> {
        self.pages.iter().map(|p| p.path.as_str()).collect()
    }
}

/// Builds index, content and tag pages from sorted content items
#[derive(Debug, Clone)]
pub struct PagePlanner {
    per_page: usize,
    path_prefix: String,
    templates: TemplateSet,
}

impl PagePlanner {
    pub fn new(per_page: usize, path_prefix: impl Into<String>, templates: TemplateSet) -> Self {
        Self {
            per_page: per_page.max(1),
            path_prefix: path_prefix.into().trim_matches('/').to_string(),
            templates,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.pagination.per_page,
            config.pagination.path_prefix.clone(),
            TemplateSet::from_config(config),
        )
    }

    /// Plan every page for `items` (expected newest first)
    ///
    /// Fails without producing any pages when two pages would share a path.
    pub fn plan(&self, items: &[ContentItem]) -> Result<SitePlan, PlanError> {
        let mut pages = self.index_pages(items);
        pages.extend(self.content_pages(items));

        let tags = collect_tags(items);
        pages.extend(tags.iter().map(|tag| self.tag_page(tag)));

        check_unique_paths(&pages)?;

        tracing::debug!(
            "Planned {} pages ({} items, {} tags)",
            pages.len(),
            items.len(),
            tags.len()
        );

        Ok(SitePlan { pages })
    }

    /// Path of the 1-based index page `index`
    pub fn index_path(&self, index: usize) -> String {
        match (index, self.path_prefix.as_str()) {
            (0 | 1, _) => "/".to_string(),
            (n, "") => format!("/{}", n),
            (n, prefix) => format!("/{}/{}", prefix, n),
        }
    }

    fn index_pages(&self, items: &[ContentItem]) -> Vec<PageDescriptor> {
        let page_count = items.len().div_ceil(self.per_page);

        items
            .chunks(self.per_page)
            .enumerate()
            .map(|(i, group)| {
                let index = i + 1;
                let mut context = Map::new();
                context.insert("totalCount".into(), json!(items.len()));
                context.insert("index".into(), json!(index));
                context.insert("pageCount".into(), json!(page_count));
                context.insert("first".into(), json!(index == 1));
                context.insert("last".into(), json!(index == page_count));
                context.insert("pathPrefix".into(), json!(self.path_prefix));
                context.insert(
                    "group".into(),
                    Value::Array(group.iter().map(|item| json!(item.id)).collect()),
                );

                PageDescriptor {
                    path: self.index_path(index),
                    component: self.templates.component(&self.templates.index),
                    context,
                    tags: None,
                    kind: PageKind::Index,
                }
            })
            .collect()
    }

    fn content_pages<'a>(
        &'a self,
        items: &'a [ContentItem],
    ) -> impl Iterator<Item = PageDescriptor> + 'a {
        items.iter().enumerate().map(|(index, item)| {
            let template = item
                .frontmatter
                .template_key()
                .unwrap_or(&self.templates.default);

            let mut context = Map::new();
            context.insert("id".into(), json!(item.id));
            context.insert("index".into(), json!(index));

            PageDescriptor {
                path: item.slug.clone(),
                component: self.templates.component(template),
                context,
                tags: item.frontmatter.tags.clone(),
                kind: PageKind::Content,
            }
        })
    }

    fn tag_page(&self, tag: &str) -> PageDescriptor {
        let mut context = Map::new();
        context.insert("tag".into(), json!(tag));

        PageDescriptor {
            path: format!("/tag/{}", tag),
            component: self.templates.component(&self.templates.tag),
            context,
            tags: None,
            kind: PageKind::Tag,
        }
    }
}

/// Distinct non-blank tags across all items, in first-seen order
pub fn collect_tags(items: &[ContentItem]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut tags = Vec::new();
    for tag in items.iter().flat_map(|item| item.tags()) {
        if tag.trim().is_empty() {
            continue;
        }
        if seen.insert(tag.as_str()) {
            tags.push(tag.clone());
        }
    }
    tags
}

fn check_unique_paths(pages: &[PageDescriptor]) -> Result<(), PlanError> {
    let mut owners: HashMap<String, &PageDescriptor> = HashMap::with_capacity(pages.len());
    for page in pages {
        if let Some(existing) = owners.insert(page.path_key(), page) {
            tracing::warn!("Duplicate page path: {}", page.path);
            return Err(PlanError::DuplicatePath {
                path: page.path_key(),
                first: describe(existing),
                second: describe(page),
            });
        }
    }
    Ok(())
}

fn describe(page: &PageDescriptor) -> String {
    let detail = match page.kind {
        PageKind::Content => page.context.get("id"),
        PageKind::Tag => page.context.get("tag"),
        PageKind::Index => page.context.get("index"),
    };
    match detail {
        Some(Value::String(s)) => format!("{} page {:?}", page.kind.as_str(), s),
        Some(other) => format!("{} page {}", page.kind.as_str(), other),
        None => format!("{} page", page.kind.as_str()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Frontmatter;
    use crate::slug::{file_path_slug, resolve_slug};
    use std::path::Path;

    fn item(rel: &str, slug: Option<&str>, tags: &[&str]) -> ContentItem {
        let derived = file_path_slug(Path::new(rel), "pages");
        let frontmatter = Frontmatter {
            slug: slug.map(String::from),
            tags: if tags.is_empty() {
                None
            } else {
                Some(tags.iter().map(|t| t.to_string()).collect())
            },
            ..Frontmatter::default()
        };
        ContentItem {
            id: rel.to_string(),
            slug: resolve_slug(frontmatter.slug.as_deref(), &derived),
            derived_slug: derived,
            source_path: rel.to_string(),
            frontmatter,
            date: None,
        }
    }

    fn planner(per_page: usize) -> PagePlanner {
        let templates = TemplateSet {
            dir: "src/templates".into(),
            extension: "js".into(),
            default: "blog-post".into(),
            index: "index".into(),
            tag: "tag".into(),
        };
        PagePlanner::new(per_page, "", templates)
    }

    #[test]
    fn test_three_items_two_tags() {
        let items = vec![
            item("c.md", None, &["go"]),
            item("b.md", None, &["go", "rust"]),
            item("a.md", None, &[]),
        ];

        let plan = planner(10).plan(&items).unwrap();

        let content: Vec<_> = plan.pages_of(PageKind::Content).map(|p| &p.path).collect();
        assert_eq!(content, vec!["/c/", "/b/", "/a/"]);

        let tags: Vec<_> = plan.pages_of(PageKind::Tag).map(|p| &p.path).collect();
        assert_eq!(tags, vec!["/tag/go", "/tag/rust"]);

        insta::assert_debug_snapshot!(plan.paths(), @r###"
        [
            "/",
            "/c/",
            "/b/",
            "/a/",
            "/tag/go",
            "/tag/rust",
        ]
        "###);
    }

    #[test]
    fn test_pagination_counts_and_paths() {
        let items: Vec<_> = (0..23)
            .map(|i| item(&format!("post-{}.md", i), None, &[]))
            .collect();

        let plan = planner(10).plan(&items).unwrap();
        let index: Vec<_> = plan.pages_of(PageKind::Index).collect();

        assert_eq!(index.len(), 3);
        assert_eq!(index[0].path, "/");
        assert_eq!(index[1].path, "/2");
        assert_eq!(index[2].path, "/3");
        assert_eq!(index[0].component, "src/templates/index.js");

        let last = &index[2].context;
        assert_eq!(last["totalCount"], json!(23));
        assert_eq!(last["pageCount"], json!(3));
        assert_eq!(last["last"], json!(true));
        assert_eq!(last["first"], json!(false));
        assert_eq!(last["group"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_exact_multiple_and_empty() {
        let items: Vec<_> = (0..4).map(|i| item(&format!("{}.md", i), None, &[])).collect();
        assert_eq!(planner(2).plan(&items).unwrap().pages_of(PageKind::Index).count(), 2);

        let empty = planner(2).plan(&[]).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_path_prefix() {
        let mut p = planner(1);
        p.path_prefix = "pages".into();
        assert_eq!(p.index_path(1), "/");
        assert_eq!(p.index_path(4), "/pages/4");
    }

    #[test]
    fn test_content_page_context_and_template() {
        let mut about = item("about.md", Some("/about-me"), &[]);
        about.frontmatter.template_key = Some("about-page".into());
        let items = vec![item("first.md", Some("   "), &["x"]), about];

        let plan = planner(10).plan(&items).unwrap();
        let content: Vec<_> = plan.pages_of(PageKind::Content).collect();

        assert_eq!(content[0].path, "/first/");
        assert_eq!(content[0].component, "src/templates/blog-post.js");
        assert_eq!(content[0].context["id"], json!("first.md"));
        assert_eq!(content[0].context["index"], json!(0));
        assert_eq!(content[0].tags, Some(vec!["x".to_string()]));

        assert_eq!(content[1].path, "/about-me");
        assert_eq!(content[1].component, "src/templates/about-page.js");
        assert_eq!(content[1].context["index"], json!(1));
    }

    #[test]
    fn test_custom_slug_colliding_with_pagination() {
        let items = vec![
            item("a.md", None, &[]),
            item("b.md", Some("/2"), &[]),
            item("c.md", None, &[]),
        ];

        let err = planner(1).plan(&items).unwrap_err();
        assert_eq!(
            err,
            PlanError::DuplicatePath {
                path: "/2".into(),
                first: "index page 2".into(),
                second: "content page \"b.md\"".into(),
            }
        );
    }

    #[test]
    fn test_custom_slug_colliding_with_tag_page() {
        let items = vec![item("a.md", Some("/tag/go/"), &["go"])];
        assert!(matches!(
            planner(10).plan(&items),
            Err(PlanError::DuplicatePath { .. })
        ));
    }

    #[test]
    fn test_whitespace_variant_tags_get_separate_pages() {
        let items = vec![
            item("a.md", None, &["go"]),
            item("b.md", None, &["go "]),
            item("c.md", Some("/c"), &[]),
            item("d.md", Some("/c "), &[]),
        ];

        let plan = planner(10).plan(&items).unwrap();
        let tags: Vec<_> = plan.pages_of(PageKind::Tag).map(|p| p.path.as_str()).collect();
        assert_eq!(tags, vec!["/tag/go", "/tag/go "]);
        assert_eq!(plan.pages_of(PageKind::Content).count(), 4);
    }

    #[test]
    fn test_collect_tags_dedupes_and_skips_blank() {
        let items = vec![
            item("a.md", None, &["rust", " ", "go"]),
            item("b.md", None, &["go", "rust", "cli"]),
        ];
        assert_eq!(collect_tags(&items), vec!["rust", "go", "cli"]);
    }
}
