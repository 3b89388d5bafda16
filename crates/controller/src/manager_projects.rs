//! Controller of a manager's own-projects view.
//!
//! Loads every project of one manager in a single request and narrows the
//! list on the client with status tabs.

use tracing::{error, info};

use api_client::{ApiClient, MANAGER_PAGE_SIZE};
use listing::{StatusTab, StatusTabFilter, TransformChain, ViewContext, tab_counts};
use market_types::{FavoriteSet, MemberId, Project};

use crate::notice::{Notices, UiEffect};

pub struct ManagerProjectsController {
    api: ApiClient,
    manager_id: MemberId,
    projects: Vec<Project>,
    tab: StatusTab,
    loading: bool,
    notices: Notices,
}

impl ManagerProjectsController {
    pub fn new(api: ApiClient, manager_id: MemberId) -> Self {
        Self {
            api,
            manager_id,
            projects: Vec::new(),
            tab: StatusTab::All,
            loading: false,
            notices: Notices::default(),
        }
    }

    pub fn manager_id(&self) -> MemberId {
        self.manager_id
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn active_tab(&self) -> StatusTab {
        self.tab
    }

    /// Every loaded project, whatever the tab.
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Load the manager's projects. On failure the list is left as it was.
    pub async fn load(&mut self) {
        self.loading = true;
        let result = self
            .api
            .list_manager_projects(self.manager_id, MANAGER_PAGE_SIZE)
            .await;
        self.loading = false;

        match result {
            Ok(page) => {
                info!(
                    "Loaded {} projects of manager {}",
                    page.items.len(),
                    self.manager_id
                );
                self.projects = page.items;
            }
            Err(err) => {
                error!("Loading projects of manager {} failed: {}", self.manager_id, err);
                self.notices.report("Failed to load projects", &err);
            }
        }
    }

    pub fn select_tab(&mut self, tab: StatusTab) {
        self.tab = tab;
    }

    /// Projects under the active tab, in load order.
    pub fn visible(&self) -> Vec<Project> {
        let favorites = FavoriteSet::empty();
        TransformChain::new()
            .add_transform(StatusTabFilter::new(self.tab))
            .apply(self.projects.clone(), &ViewContext::new(&favorites, false))
    }

    /// Project count under every tab, in display order.
    pub fn tab_counts(&self) -> Vec<(StatusTab, usize)> {
        tab_counts(&self.projects)
    }

    pub fn take_effects(&mut self) -> Vec<UiEffect> {
        self.notices.take()
    }
}
