//! Project listing endpoints.

use reqwest::Method;
use tracing::debug;

use market_types::{MemberId, Page, Project, Result};

use crate::ApiClient;

/// Page size of the public project listing
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Page size used to load all of a manager's projects at once
pub const MANAGER_PAGE_SIZE: u32 = 100;

impl ApiClient {
    /// `GET /api/projects` with the given query parameters.
    ///
    /// The parameters are passed through as-is; building them (and leaving
    /// out blank facets) is the caller's job. The decoded envelope is
    /// checked for `page_index < total_pages`.
    pub async fn list_projects(&self, params: &[(&'static str, String)]) -> Result<Page<Project>> {
        debug!("Listing projects with {:?}", params);
        let request = self.request(Method::GET, "/api/projects").query(params);
        let page: Page<Project> = self.send_json(request).await?;
        page.check_bounds()?;
        debug!(
            "Received page {} of {} ({} projects)",
            page.display_number(),
            page.total_pages,
            page.items.len()
        );
        Ok(page)
    }

    /// `GET /api/projects/manager/{managerId}?size=N`
    pub async fn list_manager_projects(&self, manager_id: MemberId, size: u32) -> Result<Page<Project>> {
        debug!("Listing projects of manager {} (size {})", manager_id, size);
        let request = self
            .request(Method::GET, &format!("/api/projects/manager/{manager_id}"))
            .query(&[("size", size.to_string())]);
        let page: Page<Project> = self.send_json(request).await?;
        page.check_bounds()?;
        Ok(page)
    }
}
