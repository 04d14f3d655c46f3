//! Page registration.

use crate::models::PageDescriptor;
use crate::planner::SitePlan;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;

/// Receiver of planned pages (the "create page" side of a build)
pub trait PageSink {
    type Error;

    fn create_page(&mut self, page: &PageDescriptor) -> Result<(), Self::Error>;
}

impl SitePlan {
    /// Hand every page to `sink` in plan order, returning the number registered
    pub fn register<S: PageSink>(&self, sink: &mut S) -> Result<usize, S::Error> {
        for page in &self.pages {
            sink.create_page(page)?;
            tracing::debug!("Registered {} page {}", page.kind.as_str(), page.path);
        }
        Ok(self.pages.len())
    }
}

/// Sink that keeps every registered page, in registration order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageManifest {
    pub pages: Vec<PageDescriptor>,
}

impl PageManifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find a registered page by its exact path
    pub fn find_by_path(&self, path: &str) -> Option<&PageDescriptor> {
        self.pages.iter().find(|p| p.path == path)
    }
}

impl PageSink for PageManifest {
    type Error = Infallible;

    fn create_page(&mut self, page: &PageDescriptor) -> Result<(), Infallible> {
        self.pages.push(page.clone());
        Ok(())
    }
}
