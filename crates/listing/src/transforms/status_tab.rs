//! Status tabs of the manager's own-projects view.
//!
//! The manager view loads every project of one manager and narrows the
//! list on the client: one tab per status plus an "all" tab, each showing
//! how many projects it holds.

use std::fmt;
use std::str::FromStr;

use crate::traits::{PageTransform, ViewContext};
use market_types::{ClientError, Project, ProjectStatus};

/// A status tab of the manager view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StatusTab {
    #[default]
    All,
    Only(ProjectStatus),
}

impl StatusTab {
    /// Every tab, in display order
    pub fn tabs() -> impl Iterator<Item = StatusTab> {
        std::iter::once(StatusTab::All).chain(ProjectStatus::ALL.into_iter().map(StatusTab::Only))
    }

    pub fn matches(self, project: &Project) -> bool {
        match self {
            StatusTab::All => true,
            StatusTab::Only(status) => project.status == Some(status),
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            StatusTab::All => "ALL",
            StatusTab::Only(status) => status.code(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatusTab::All => "전체",
            StatusTab::Only(status) => status.label(),
        }
    }
}

impl fmt::Display for StatusTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for StatusTab {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("all") || trimmed == "전체" {
            return Ok(StatusTab::All);
        }
        trimmed
            .parse::<ProjectStatus>()
            .map(StatusTab::Only)
            .map_err(|_| ClientError::invalid_value("statusTab", s))
    }
}

/// Number of projects under every tab, in display order.
pub fn tab_counts(projects: &[Project]) -> Vec<(StatusTab, usize)> {
    StatusTab::tabs()
        .map(|tab| (tab, projects.iter().filter(|p| tab.matches(p)).count()))
        .collect()
}

/// Keeps only the projects under one tab.
pub struct StatusTabFilter {
    tab: StatusTab,
}

impl StatusTabFilter {
    pub fn new(tab: StatusTab) -> Self {
        Self { tab }
    }
}

impl PageTransform for StatusTabFilter {
    fn name(&self) -> &str {
        "StatusTabFilter"
    }

    fn apply(&self, items: Vec<Project>, _context: &ViewContext<'_>) -> Vec<Project> {
        items.into_iter().filter(|p| self.tab.matches(p)).collect()
    }
}
