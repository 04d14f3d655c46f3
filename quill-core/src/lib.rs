//! # quill-core
//!
//! Core library for the quill blog generator.
//!
//! This crate queries markdown content, derives page slugs, and plans the
//! index, post and tag pages handed to a page registry.

pub mod builder;
pub mod config;
pub mod frontmatter;
pub mod models;
pub mod planner;
pub mod registry;
pub mod slug;
pub mod source;

pub use builder::{plan_site, BuildError, SiteBuilder};
pub use config::Config;
pub use models::{ContentItem, Frontmatter, PageDescriptor, PageKind};
pub use planner::{PagePlanner, PlanError, SitePlan, TemplateSet};
pub use registry::{PageManifest, PageSink};
pub use slug::{file_path_slug, resolve_slug};
pub use source::{ContentQuery, MarkdownSource, QueryError, SourceError};
