//! Site planning - one content query followed by page planning.

use crate::{
    config::Config,
    planner::{PagePlanner, PlanError, SitePlan},
    source::{ContentQuery, MarkdownSource, QueryError},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Plan(#[from] PlanError),
}

/// Query content once and plan every page
///
/// Any query error fails the whole step before a single page is planned.
pub fn plan_site<Q: ContentQuery + ?Sized>(
    query: &Q,
    planner: &PagePlanner,
) -> Result<SitePlan, BuildError> {
    let items = query.query()?;
    tracing::info!("Loaded {} content items", items.len());

    let plan = planner.plan(&items)?;
    tracing::info!("Planned {} pages", plan.len());

    Ok(plan)
}

/// Main site builder
pub struct SiteBuilder {
    config: Config,
}

impl SiteBuilder {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Plan the site described by the configuration
    pub fn plan(&self) -> Result<SitePlan, BuildError> {
        let source = MarkdownSource::new(&self.config);
        let planner = PagePlanner::from_config(&self.config);
        plan_site(&source, &planner)
    }
}
